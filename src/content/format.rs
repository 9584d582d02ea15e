//! US display formatting for money and rates.

use crate::core::round_to_cents;

/// `$1,500` style, no cents.
pub fn format_whole_dollars(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}

/// `$1,234.56` style.
pub fn format_usd(amount: f64) -> String {
    let cents = (round_to_cents(amount).abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}${}.{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Whole rates print without a fraction: `200%`, `17.65%`.
pub fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{rate:.0}%")
    } else {
        let text = format!("{rate:.2}");
        format!("{}%", text.trim_end_matches('0'))
    }
}

pub fn format_apr(apr: Option<f64>) -> String {
    match apr {
        Some(apr) => format_rate(apr),
        None => "No cap".to_string(),
    }
}

pub fn format_limit(amount: Option<f64>) -> String {
    match amount {
        Some(amount) => format_whole_dollars(amount),
        None => "No limit".to_string(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
