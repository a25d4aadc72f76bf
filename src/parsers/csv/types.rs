use std::{str::FromStr, sync::LazyLock};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ParenthesesPolicy;

#[derive(Clone, Copy)]
enum FieldOrder {
    YearMonthDay,
    DayMonthYear,
}

/// Patterns searched anywhere in the cell, in priority order.
static DATE_PATTERNS: LazyLock<Vec<(Regex, FieldOrder)>> = LazyLock::new(|| {
    [
        (r"([0-9]{4})-([0-9]{2})-([0-9]{2})", FieldOrder::YearMonthDay),
        (r"([0-9]{2})/([0-9]{2})/([0-9]{4})", FieldOrder::DayMonthYear),
        (r"([0-9]{2})-([0-9]{2})-([0-9]{4})", FieldOrder::DayMonthYear),
    ]
    .into_iter()
    .filter_map(|(pattern, order)| Regex::new(pattern).ok().map(|re| (re, order)))
    .collect()
});

/// Whole-string layouts tried when none of the patterns yields a date.
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%m/%d/%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const FALLBACK_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// A date cell as it appears in a statement export.
///
/// Exports mix ISO dates with day-first layouts, so parsing tries:
/// - YYYY-MM-DD
/// - DD/MM/YYYY
/// - DD-MM-YYYY
///
/// and then a handful of common layouts (US month-first, month names,
/// RFC 3339/2822) as a generic fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvDate(String);

impl CsvDate {
    /// `None` for blank input and for text no layout understands.
    pub fn parse(&self) -> Option<NaiveDate> {
        let s = self.0.trim();
        if s.is_empty() {
            return None;
        }

        match_date_patterns(s).or_else(|| parse_generic_date(s))
    }
}

fn match_date_patterns(s: &str) -> Option<NaiveDate> {
    DATE_PATTERNS.iter().find_map(|(re, order)| {
        let caps = re.captures(s)?;
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let third: u32 = caps[3].parse().ok()?;

        match order {
            FieldOrder::YearMonthDay => NaiveDate::from_ymd_opt(first as i32, second, third),
            FieldOrder::DayMonthYear => NaiveDate::from_ymd_opt(third as i32, second, first),
        }
    })
}

fn parse_generic_date(s: &str) -> Option<NaiveDate> {
    FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            FALLBACK_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| DateTime::parse_from_rfc2822(s).ok().map(|dt| dt.date_naive()))
}

impl From<String> for CsvDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CsvDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// An amount cell, possibly carrying a currency symbol, thousands separators
/// or accounting-style parentheses: `R1,200.50`, `$ 45.00`, `(150.00)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvAmount(String);

impl CsvAmount {
    /// Never fails: blank or unreadable cells count as zero.
    pub fn parse(&self, policy: ParenthesesPolicy) -> Decimal {
        let mut parenthesized = false;
        let cleaned: String = self
            .0
            .chars()
            .filter(|c| match c {
                'R' | '$' | '€' | '£' | ',' => false,
                '(' | ')' => {
                    parenthesized = true;
                    false
                }
                c => !c.is_whitespace(),
            })
            .collect();

        let amount = leading_number(&cleaned).unwrap_or(Decimal::ZERO);

        match policy {
            ParenthesesPolicy::Negate if parenthesized && !amount.is_zero() => -amount.abs(),
            _ => amount,
        }
    }
}

/// Reads the longest `[+-]digits[.digits]` prefix, ignoring whatever trails
/// it, so `12.5abc` reads as 12.5.
fn leading_number(s: &str) -> Option<Decimal> {
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let (int_part, after_int) = rest.split_at(int_len);

    let frac_part = after_int
        .strip_prefix('.')
        .map(|frac| {
            let frac_len = frac.bytes().take_while(u8::is_ascii_digit).count();
            &frac[..frac_len]
        })
        .unwrap_or("");

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut normalized = String::with_capacity(int_len + frac_part.len() + 3);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        normalized.push('.');
        normalized.push_str(frac_part);
    }

    Decimal::from_str(&normalized).ok()
}

impl From<String> for CsvAmount {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CsvAmount {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Parses a free-form statement date. See [`CsvDate`] for the accepted layouts.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    CsvDate::from(raw).parse()
}

/// Parses a currency-formatted amount, returning zero when nothing numeric
/// can be read. Parentheses are dropped without changing the sign.
pub fn parse_amount(raw: &str) -> Decimal {
    parse_amount_with(raw, ParenthesesPolicy::Strip)
}

pub fn parse_amount_with(raw: &str, policy: ParenthesesPolicy) -> Decimal {
    CsvAmount::from(raw).parse(policy)
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
