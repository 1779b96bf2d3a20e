/// Render an estimate the way the result panel shows it: dollar sign,
/// thousands grouping, always two decimals.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${}", amount);
    }

    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let rem = cents % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, c) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${}.{:02}", if negative { "-" } else { "" }, grouped, rem)
}

#[test]
fn test_format_usd() {
    assert_eq!(format_usd(25000.5), "$25,000.50");
    assert_eq!(format_usd(0.0), "$0.00");
    assert_eq!(format_usd(999.994), "$999.99");
    assert_eq!(format_usd(1234567.891), "$1,234,567.89");
    assert_eq!(format_usd(-300.0), "-$300.00");
}
