//! Display Formatting
//!
//! Currency, dates and month labels used across tables and forms.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

pub const DEFAULT_LOCALE: &str = "en-IN";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `₹1,23,456.50` style amount in the default locale; `None` renders as zero
pub fn format_currency(amount: Option<f64>) -> String {
    format_currency_in(amount, DEFAULT_LOCALE)
}

/// Rupee amount with two decimals, grouped for `locale`
pub fn format_currency_in(amount: Option<f64>, locale: &str) -> String {
    let value = amount.filter(|v| v.is_finite()).unwrap_or(0.0);
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = if uses_indian_grouping(locale) {
        group_indian(int_part)
    } else {
        group_western(int_part)
    };

    let negative = value < 0.0 && fixed != "0.00";
    format!("{}₹{}.{}", if negative { "-" } else { "" }, grouped, frac_part)
}

fn uses_indian_grouping(locale: &str) -> bool {
    let locale = locale.trim().to_ascii_lowercase();
    locale.is_empty() || locale.ends_with("-in") || locale == "hi" || locale == "ne"
}

fn group_western(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Last three digits, then pairs: 12,34,567
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::new();
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}

/// ISO date or datetime as `05 Jan 2024`; anything else is returned as-is
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "-".to_string();
    }
    parse_date(raw)
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn format_optional_date(raw: Option<&str>) -> String {
    raw.map(format_date).unwrap_or_else(|| "-".to_string())
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok().map(|dt| dt.date()))
        .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

/// 1-based month to short name
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i as usize))
        .copied()
        .unwrap_or("?")
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn current_year() -> i32 {
    today().year()
}

/// Value for `<input type="date">`
pub fn today_iso() -> String {
    today().format("%Y-%m-%d").to_string()
}

pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_missing_amounts() {
        assert_eq!(format_currency(Some(0.0)), "₹0.00");
        assert_eq!(format_currency(None), "₹0.00");
        assert_eq!(format_currency(Some(f64::NAN)), "₹0.00");
    }

    #[test]
    fn test_english_locale_grouping() {
        assert_eq!(format_currency_in(Some(1234.5), "en"), "₹1,234.50");
        assert_eq!(format_currency_in(Some(1234567.0), "en-US"), "₹1,234,567.00");
    }

    #[test]
    fn test_indian_grouping_default() {
        assert_eq!(format_currency(Some(1234.5)), "₹1,234.50");
        assert_eq!(format_currency(Some(1234567.891)), "₹12,34,567.89");
        assert_eq!(format_currency(Some(999.0)), "₹999.00");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_currency_in(Some(-50.0), "en"), "-₹50.00");
        assert_eq!(format_currency(Some(-0.001)), "₹0.00");
    }

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date("2024-01-05"), "05 Jan 2024");
        assert_eq!(format_date("2024-01-05T10:20:30.000Z"), "05 Jan 2024");
        assert_eq!(format_date("soon"), "soon");
        assert_eq!(format_date(""), "-");
    }

    #[test]
    fn test_month_name_bounds() {
        assert_eq!(month_name(1), "Jan");
        assert_eq!(month_name(12), "Dec");
        assert_eq!(month_name(0), "?");
        assert_eq!(month_name(13), "?");
    }

    #[test]
    fn test_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2.0 KB");
    }
}
