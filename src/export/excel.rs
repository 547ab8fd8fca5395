// Spreadsheet report: one dated sheet per run, ratio columns as live formulas
use crate::model::{Catalog, CategoryItems, ExportError};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;
use umya_spreadsheet::{
    Color, ColorScale, ConditionalFormatValueObject, ConditionalFormatValueObjectValues,
    ConditionalFormatValues, ConditionalFormatting, ConditionalFormattingRule, Spreadsheet,
    Worksheet,
};

pub const COLUMN_WIDTH: f64 = 20.0;
pub const FIXED_WIDTH_COLUMNS: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];

const CATEGORY_CAPTION: &str = "Категория";
const NAME: &str = "Название";
const PRICE: &str = "Цена";
const WEIGHT: &str = "Вес";
const QUANTITY: &str = "Кол-во";
const PRICE_PER_WEIGHT: &str = "Стоимость/Вес";
const PRICE_PER_QUANTITY: &str = "Стоимость/Кол-во";

// green (cheap) -> yellow -> red (expensive)
const LOW_COLOR: &str = "FF00FF00";
const MID_COLOR: &str = "FFFFFF00";
const HIGH_COLOR: &str = "FFFF0000";

pub fn report_file_name(city: &str) -> String {
    format!("Фарфор {}.xlsx", city)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Number(u32),
    /// Formula body without the leading `=`.
    Formula(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    pub coordinate: String,
    pub value: CellValue,
    pub bold: bool,
}

/// Column layout of one category block, decided once from its products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMode {
    /// E = quantity, F = price/weight, G = price/quantity.
    WithQuantity,
    /// E = price/weight.
    WeightOnly,
}

impl ColumnMode {
    pub fn for_items(items: &CategoryItems) -> Self {
        if items.values().any(|d| d.quantity.is_some()) {
            Self::WithQuantity
        } else {
            Self::WeightOnly
        }
    }

    fn ratio_columns(self) -> &'static [char] {
        match self {
            Self::WithQuantity => &['F', 'G'],
            Self::WeightOnly => &['E'],
        }
    }
}

/// Everything the report writes into its sheet, independent of the workbook library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportLayout {
    pub cells: Vec<CellWrite>,
    /// Ranges such as `F3:F9` that get a color scale.
    pub color_scales: Vec<String>,
}

impl ReportLayout {
    pub fn cell(&self, coordinate: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .rev()
            .find(|c| c.coordinate == coordinate)
            .map(|c| &c.value)
    }

    fn put(&mut self, column: char, row: u32, value: CellValue) {
        self.cells.push(CellWrite {
            coordinate: coordinate(column, row),
            value,
            bold: false,
        });
    }

    fn text(&mut self, column: char, row: u32, text: &str) {
        self.put(column, row, CellValue::Text(text.to_string()));
    }

    fn number(&mut self, column: char, row: u32, value: Option<u32>) {
        if let Some(value) = value {
            self.put(column, row, CellValue::Number(value));
        }
    }

    fn ratio(&mut self, column: char, row: u32, dividend: char, divisor: char) {
        let formula = format!("{}/{}", coordinate(dividend, row), coordinate(divisor, row));
        self.put(column, row, CellValue::Formula(formula));
    }
}

fn coordinate(column: char, row: u32) -> String {
    format!("{}{}", column, row)
}

/// Lays the catalog out starting at row 2, one block per category with a
/// blank row between blocks.
pub fn build_layout(catalog: &Catalog) -> ReportLayout {
    let mut layout = ReportLayout::default();
    layout.text('A', 1, CATEGORY_CAPTION);

    let mut row = 2;
    for (category, items) in catalog {
        row = layout_category(&mut layout, row, category, items) + 1;
    }
    layout
}

/// Writes one category block at `header_row`; returns the first row after it.
fn layout_category(
    layout: &mut ReportLayout,
    header_row: u32,
    category: &str,
    items: &CategoryItems,
) -> u32 {
    let mode = ColumnMode::for_items(items);

    layout.cells.push(CellWrite {
        coordinate: coordinate('A', header_row),
        value: CellValue::Text(category.to_string()),
        bold: true,
    });
    layout.text('B', header_row, NAME);
    layout.text('C', header_row, PRICE);
    layout.text('D', header_row, WEIGHT);
    match mode {
        ColumnMode::WithQuantity => {
            layout.text('E', header_row, QUANTITY);
            layout.text('F', header_row, PRICE_PER_WEIGHT);
            layout.text('G', header_row, PRICE_PER_QUANTITY);
        }
        ColumnMode::WeightOnly => layout.text('E', header_row, PRICE_PER_WEIGHT),
    }

    let first_row = header_row + 1;
    let mut row = first_row;
    for (name, details) in items {
        layout.text('B', row, name);
        layout.number('C', row, details.price);
        layout.number('D', row, details.weight);
        match (mode, details.quantity) {
            (ColumnMode::WithQuantity, Some(quantity)) => {
                layout.number('E', row, Some(quantity));
                layout.ratio('F', row, 'C', 'D');
                layout.ratio('G', row, 'C', 'E');
            }
            (ColumnMode::WithQuantity, None) => layout.ratio('F', row, 'C', 'D'),
            (ColumnMode::WeightOnly, _) => layout.ratio('E', row, 'C', 'D'),
        }
        row += 1;
    }

    if row > first_row {
        let last_row = row - 1;
        for &column in mode.ratio_columns() {
            layout.color_scales.push(format!("{}{}:{}{}", column, first_row, column, last_row));
        }
    }
    row
}

/// Writes the catalog into `Фарфор {city}.xlsx` under `dir`. An existing
/// workbook keeps its sheets and gets a new one named after `date`.
pub fn write_report(
    catalog: &Catalog,
    city: &str,
    date: NaiveDate,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(report_file_name(city));
    let mut book = if path.exists() {
        info!("Appending to existing workbook {}", path.display());
        umya_spreadsheet::reader::xlsx::read(&path).map_err(workbook_error)?
    } else {
        umya_spreadsheet::new_file()
    };

    let sheet_name = date.format("%Y-%m-%d").to_string();
    let sheet = target_sheet(&mut book, &sheet_name)?;
    apply_layout(sheet, &build_layout(catalog));

    umya_spreadsheet::writer::xlsx::write(&book, &path).map_err(workbook_error)?;
    info!("Saved workbook {}", path.display());
    Ok(path)
}

/// Reuses the only sheet of a blank workbook, otherwise appends a new one.
/// A sheet written by an earlier run always has `A1`, so it is never reused.
fn target_sheet<'a>(book: &'a mut Spreadsheet, date_name: &str) -> Result<&'a mut Worksheet, ExportError> {
    let fresh = book.get_sheet_collection().len() == 1
        && book
            .get_sheet(&0)
            .map(|sheet| sheet.get_highest_row() == 0)
            .unwrap_or(false);
    let name = free_sheet_name(book, date_name);

    if fresh {
        let sheet = book
            .get_sheet_mut(&0)
            .ok_or_else(|| ExportError::Workbook("workbook has no sheets".to_string()))?;
        sheet.set_name(name);
        Ok(sheet)
    } else {
        book.new_sheet(name)
            .map_err(|e| ExportError::Workbook(e.to_string()))
    }
}

fn free_sheet_name(book: &Spreadsheet, base: &str) -> String {
    if book.get_sheet_by_name(base).is_none() {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{} ({})", base, n))
        .find(|name| book.get_sheet_by_name(name).is_none())
        .unwrap_or_else(|| base.to_string())
}

fn apply_layout(sheet: &mut Worksheet, layout: &ReportLayout) {
    for column in FIXED_WIDTH_COLUMNS {
        sheet.get_column_dimension_mut(column).set_width(COLUMN_WIDTH);
    }

    for write in &layout.cells {
        let cell = sheet.get_cell_mut(write.coordinate.as_str());
        match &write.value {
            CellValue::Text(text) => {
                cell.set_value_string(text.as_str());
            }
            CellValue::Number(n) => {
                cell.set_value_number(*n);
            }
            CellValue::Formula(formula) => {
                cell.set_formula(formula.as_str());
            }
        }
        if write.bold {
            sheet
                .get_style_mut(write.coordinate.as_str())
                .get_font_mut()
                .set_bold(true);
        }
    }

    for (idx, range) in layout.color_scales.iter().enumerate() {
        sheet.add_conditional_formatting_collection(color_scale(range, idx as i32 + 1));
    }
}

fn color_scale(range: &str, priority: i32) -> ConditionalFormatting {
    let stops = [
        (ConditionalFormatValueObjectValues::Min, None, LOW_COLOR),
        (ConditionalFormatValueObjectValues::Percentile, Some("50"), MID_COLOR),
        (ConditionalFormatValueObjectValues::Max, None, HIGH_COLOR),
    ];

    let mut scale = ColorScale::default();
    for (kind, value, argb) in stops {
        let mut cfvo = ConditionalFormatValueObject::default();
        cfvo.set_type(kind);
        if let Some(value) = value {
            cfvo.set_val(value);
        }
        scale.add_cfvo_collection(cfvo);

        let mut color = Color::default();
        color.set_argb(argb);
        scale.add_color_collection(color);
    }

    let mut rule = ConditionalFormattingRule::default();
    rule.set_type(ConditionalFormatValues::ColorScale);
    rule.set_priority(priority);
    rule.set_color_scale(scale);

    let mut formatting = ConditionalFormatting::default();
    formatting.get_sequence_of_references_mut().set_sqref(range);
    formatting.add_conditional_collection(rule);
    formatting
}

fn workbook_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Workbook(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductDetails;

    fn details(price: u32, weight: u32, quantity: Option<u32>) -> ProductDetails {
        ProductDetails {
            price: Some(price),
            weight: Some(weight),
            quantity,
        }
    }

    fn catalog(blocks: &[(&str, &[(&str, ProductDetails)])]) -> Catalog {
        blocks
            .iter()
            .map(|(category, items)| {
                let items: CategoryItems = items
                    .iter()
                    .map(|(name, d)| (name.to_string(), d.clone()))
                    .collect();
                (category.to_string(), items)
            })
            .collect()
    }

    fn formula(body: &str) -> CellValue {
        CellValue::Formula(body.to_string())
    }

    fn text(body: &str) -> CellValue {
        CellValue::Text(body.to_string())
    }

    #[test]
    fn weight_only_category_has_single_ratio_column() {
        let catalog = catalog(&[(
            "Пицца",
            &[("Маргарита", details(450, 500, None)), ("Пепперони", details(520, 550, None))],
        )]);
        let layout = build_layout(&catalog);

        assert_eq!(layout.cell("A1"), Some(&text("Категория")));
        assert_eq!(layout.cell("A2"), Some(&text("Пицца")));
        assert_eq!(layout.cell("E2"), Some(&text("Стоимость/Вес")));
        assert_eq!(layout.cell("F2"), None);
        assert_eq!(layout.cell("B3"), Some(&text("Маргарита")));
        assert_eq!(layout.cell("C3"), Some(&CellValue::Number(450)));
        assert_eq!(layout.cell("E3"), Some(&formula("C3/D3")));
        assert_eq!(layout.cell("E4"), Some(&formula("C4/D4")));
        assert_eq!(layout.color_scales, vec!["E3:E4".to_string()]);
    }

    #[test]
    fn weight_only_category_never_mentions_quantity() {
        let catalog = catalog(&[("Соусы", &[("Соевый", details(30, 40, None))])]);
        let layout = build_layout(&catalog);
        for write in &layout.cells {
            assert_ne!(write.value, text("Кол-во"));
            assert_ne!(write.value, text("Стоимость/Кол-во"));
            if let CellValue::Formula(f) = &write.value {
                assert!(!f.contains('E'), "price/quantity formula in {}", write.coordinate);
            }
        }
    }

    #[test]
    fn one_quantity_switches_the_whole_category() {
        let catalog = catalog(&[(
            "Роллы",
            &[
                ("Без количества", details(300, 250, None)),
                ("Калифорния", details(400, 240, Some(8))),
                ("Тоже без", details(350, 260, None)),
            ],
        )]);
        let layout = build_layout(&catalog);

        assert_eq!(layout.cell("E2"), Some(&text("Кол-во")));
        assert_eq!(layout.cell("F2"), Some(&text("Стоимость/Вес")));
        assert_eq!(layout.cell("G2"), Some(&text("Стоимость/Кол-во")));

        // rows without quantity carry only the price/weight ratio, in F
        for row in [3, 5] {
            assert_eq!(layout.cell(&format!("E{row}")), None);
            assert_eq!(layout.cell(&format!("F{row}")), Some(&formula(&format!("C{row}/D{row}"))));
            assert_eq!(layout.cell(&format!("G{row}")), None);
        }
        assert_eq!(layout.cell("E4"), Some(&CellValue::Number(8)));
        assert_eq!(layout.cell("F4"), Some(&formula("C4/D4")));
        assert_eq!(layout.cell("G4"), Some(&formula("C4/E4")));
        assert_eq!(layout.color_scales, vec!["F3:F5".to_string(), "G3:G5".to_string()]);
    }

    #[test]
    fn blocks_are_separated_by_a_blank_row() {
        let catalog = catalog(&[
            ("Сеты", &[("Сет 1", details(999, 1000, Some(24)))]),
            ("Напитки", &[("Морс", details(120, 500, None))]),
        ]);
        let layout = build_layout(&catalog);
        // Сеты: header 2, data 3; blank 4; Напитки: header 5, data 6
        assert_eq!(layout.cell("A2"), Some(&text("Сеты")));
        assert!(layout.cells.iter().all(|c| &c.coordinate[1..] != "4"));
        assert_eq!(layout.cell("A5"), Some(&text("Напитки")));
        assert_eq!(layout.cell("E6"), Some(&formula("C6/D6")));
        assert_eq!(
            layout.color_scales,
            vec!["F3:F3".to_string(), "G3:G3".to_string(), "E6:E6".to_string()]
        );
    }

    #[test]
    fn empty_category_gets_header_but_no_color_scale() {
        let catalog = catalog(&[("Пусто", &[])]);
        let layout = build_layout(&catalog);
        assert_eq!(layout.cell("A2"), Some(&text("Пусто")));
        assert!(layout.color_scales.is_empty());
    }

    #[test]
    fn category_header_is_bold() {
        let catalog = catalog(&[("Вок", &[("Удон", details(310, 330, None))])]);
        let layout = build_layout(&catalog);
        let bold: Vec<_> = layout.cells.iter().filter(|c| c.bold).map(|c| c.coordinate.as_str()).collect();
        assert_eq!(bold, vec!["A2"]);
    }

    #[test]
    fn missing_price_leaves_cell_empty() {
        let mut items = CategoryItems::new();
        items.insert(
            "Загадка".to_string(),
            ProductDetails {
                price: None,
                weight: Some(100),
                quantity: None,
            },
        );
        let mut catalog = Catalog::new();
        catalog.insert("Разное".to_string(), items);
        let layout = build_layout(&catalog);
        assert_eq!(layout.cell("C3"), None);
        assert_eq!(layout.cell("E3"), Some(&formula("C3/D3")));
    }

    #[test]
    fn file_name_keeps_city_verbatim() {
        assert_eq!(report_file_name("Нижний Тагил"), "Фарфор Нижний Тагил.xlsx");
    }
}
