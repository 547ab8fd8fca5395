/// Number of leading characters of a price/weight/quantity fragment that are
/// looked at. Anything after it (currency, units, second numbers) is dropped.
pub const AMOUNT_PREFIX_CHARS: usize = 4;

/// Keeps only the ASCII digits of `raw`, in their original order.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// First `n` characters of `raw` (characters, not bytes).
pub fn truncate_chars(raw: &str, n: usize) -> &str {
    match raw.char_indices().nth(n) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}

/// Reads the amount at the start of a raw fragment: "123 руб." -> 123.
/// Returns `None` when the prefix holds no digits.
pub fn leading_amount(raw: &str) -> Option<u32> {
    let digits = digits_only(truncate_chars(raw, AMOUNT_PREFIX_CHARS));
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
