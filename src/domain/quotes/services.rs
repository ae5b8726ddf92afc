/// Format a price as US dollars: `$1,234.56`, negative values as `-$1,234.56`.
///
/// Two fraction digits, ties rounded to even.
pub fn format_usd(price: f64) -> String {
    if price.is_nan() {
        return "NaN".to_string();
    }
    let sign = if price.is_sign_negative() && price != 0.0 { "-" } else { "" };
    if price.is_infinite() {
        return format!("{}$∞", sign);
    }

    let fixed = format!("{:.2}", price.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
