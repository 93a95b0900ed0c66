//! Brazilian real formatting for the amount inputs and the history table.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::models::Record;

pub const CURRENCY_PREFIX: &str = "R$";

/// Value the amount inputs are reset to after a registration.
pub const ZERO_AMOUNT: &str = "R$ 0,00";

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Reformats whatever the user typed as `R$ <int>,<dec>`, reading the digits as cents.
pub fn format_money_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let significant = digits.trim_start_matches('0');

    let (integer, decimal) = if significant.len() <= 2 {
        ("0".to_string(), format!("{:0>2}", significant))
    } else {
        let (integer, decimal) = significant.split_at(significant.len() - 2);
        (group_thousands(integer), decimal.to_string())
    };

    format!("{} {},{}", CURRENCY_PREFIX, integer, decimal)
}

/// Inverse of [`format_money_input`]: `"R$ 1.234,56"` becomes `1234.56`.
pub fn brl_string_to_float(brl: &str) -> Option<f64> {
    let value = brl.replacen(CURRENCY_PREFIX, "", 1);
    let value = value.trim().replace('.', "").replacen(',', ".", 1);
    value.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

/// Amount cell text, e.g. `R$ 10,50` or `R$ -50,00` for expenses.
pub fn format_record_amount(amount: f64) -> String {
    format!("{} {}", CURRENCY_PREFIX, format!("{:.2}", amount).replace('.', ","))
}

/// `DD/MM/YYYY` in local time. Unrecognized timestamps are shown unchanged.
pub fn format_record_date(created_at: &str) -> String {
    match parse_timestamp(created_at) {
        Some(timestamp) => timestamp.format("%d/%m/%Y").to_string(),
        None => created_at.to_string(),
    }
}

pub fn balance(records: &[Record]) -> f64 {
    records.iter().map(|record| record.amount).sum()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Local));
    }
    // Flask's JSON encoder emits `Mon, 14 Oct 2024 12:00:00 GMT`.
    if let Ok(timestamp) = DateTime::parse_from_rfc2822(raw) {
        return Some(timestamp.with_timezone(&Local));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }
    // Date-only strings are UTC midnight, as browsers read them.
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().map(|date| {
        Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
            .with_timezone(&Local)
    })
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
