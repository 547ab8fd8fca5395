// Operator menu: city number, then export format
use crate::config::CityTable;
use crate::export::ExportFormat;
use crate::model::City;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("not a city number: {0:?}")]
    InvalidCity(String),
    #[error("input closed before an answer was given")]
    Closed,
}

fn read_answer<R: BufRead>(input: &mut R) -> Result<String, PromptError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PromptError::Closed);
    }
    Ok(line.trim().to_string())
}

/// Prints the numbered city list and reads one answer. A bad answer is not
/// re-asked.
pub fn choose_city<'a, R: BufRead, W: Write>(
    table: &'a CityTable,
    input: &mut R,
    output: &mut W,
) -> Result<&'a City, PromptError> {
    for (i, city) in table.cities().iter().enumerate() {
        writeln!(output, "{}. {}", i + 1, city.name)?;
    }
    writeln!(output, "Введите номер города:\n")?;
    output.flush()?;

    let answer = read_answer(input)?;
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| table.by_number(n))
        .ok_or(PromptError::InvalidCity(answer))
}

/// Asks for the export format until `1` or `2` is entered.
pub fn choose_export_format<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<ExportFormat, PromptError> {
    writeln!(output, "Данные собраны. Выберите формат экспорта:\n 1. Excel\n 2. JSON")?;
    output.flush()?;
    loop {
        let answer = read_answer(input)?;
        if let Some(format) = ExportFormat::from_choice(&answer) {
            return Ok(format);
        }
        writeln!(output, "Неверная команда")?;
        output.flush()?;
    }
}
