//! Currency input masking and display formatting

const MAX_DIGITS: usize = 8;

/// Turn raw keyboard input into a fixed two-decimal amount.
///
/// Non-digits are dropped, leading zeros stripped and at most eight digits kept;
/// the last two digits become the cents. `"12345"` gives `"123.45"`.
pub fn format_currency_input(value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.trim_start_matches('0');
    let digits = &digits[..digits.len().min(MAX_DIGITS)];

    match digits.len() {
        0 => "0.00".to_string(),
        1 => format!("0.0{}", digits),
        2 => format!("0.{}", digits),
        n => format!("{}.{}", &digits[..n - 2], &digits[n - 2..]),
    }
}

/// Format a stored amount the Brazilian way: `1234.5` gives `"1.234,50"`.
///
/// Empty or non-numeric values give an empty string.
pub fn format_currency_display(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    // Blank input reads as zero.
    let trimmed = value.trim();
    let amount = match trimmed.parse::<f64>() {
        _ if trimmed.is_empty() => 0.0,
        Ok(n) if n.is_finite() => n,
        _ => return String::new(),
    };

    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{},{}", sign, grouped, frac_part)
}
