//! Totals, category breakdown and statement period for a list of transactions.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::types::{BankFormat, Category, Transaction};

const PERIOD_DATE_FORMAT: &str = "%Y/%m/%d";
const UNKNOWN_PERIOD: &str = "Unknown";

/// Date range covered by a statement.
///
/// Rendered as `2024/01/15 - 2024/01/24`, or `Unknown` for an empty statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Unknown,
    Range { start: NaiveDate, end: NaiveDate },
}

impl Period {
    fn covering<'a, I>(dates: I) -> Self
    where
        I: IntoIterator<Item = &'a NaiveDate>,
    {
        dates
            .into_iter()
            .fold(Period::Unknown, |period, &date| match period {
                Period::Unknown => Period::Range { start: date, end: date },
                Period::Range { start, end } => Period::Range {
                    start: start.min(date),
                    end: end.max(date),
                },
            })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Unknown => f.write_str(UNKNOWN_PERIOD),
            Period::Range { start, end } => write!(
                f,
                "{} - {}",
                start.format(PERIOD_DATE_FORMAT),
                end.format(PERIOD_DATE_FORMAT)
            ),
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == UNKNOWN_PERIOD {
            return Ok(Period::Unknown);
        }

        let (start, end) = s
            .split_once(" - ")
            .ok_or_else(|| format!("Invalid period: {}", s))?;
        let parse = |raw: &str| {
            NaiveDate::parse_from_str(raw.trim(), PERIOD_DATE_FORMAT)
                .map_err(|e| format!("Invalid period date {:?}: {}", raw, e))
        };

        Ok(Period::Range {
            start: parse(start)?,
            end: parse(end)?,
        })
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(de::Error::custom)
    }
}

/// Normalized ledger with its totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementSummary {
    /// Newest first; transactions sharing a date keep their input order.
    pub transactions: Vec<Transaction>,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    /// Absolute amounts per category, only for categories that occur.
    pub categories: BTreeMap<Category, Decimal>,
    pub period: Period,
    pub format: BankFormat,
}

impl StatementSummary {
    pub fn net_balance(&self) -> Decimal {
        self.total_income - self.total_expenses
    }

    pub fn category_total(&self, category: Category) -> Decimal {
        self.categories
            .get(&category)
            .copied()
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl Default for StatementSummary {
    fn default() -> Self {
        aggregate(Vec::new())
    }
}

/// Aggregates transactions that did not come from a detected export.
pub fn aggregate(transactions: Vec<Transaction>) -> StatementSummary {
    aggregate_with_format(transactions, BankFormat::Generic)
}

pub fn aggregate_with_format(
    mut transactions: Vec<Transaction>,
    format: BankFormat,
) -> StatementSummary {
    // stable: same-day rows keep export order
    transactions.sort_by(|a, b| b.date.cmp(&a.date));

    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut categories = BTreeMap::new();

    // totals clamp at Decimal::MAX instead of overflowing
    for txn in &transactions {
        let magnitude = txn.amount.abs();
        if txn.is_income() {
            total_income = total_income.saturating_add(magnitude);
        } else {
            total_expenses = total_expenses.saturating_add(magnitude);
        }
        let bucket = categories.entry(txn.category).or_insert(Decimal::ZERO);
        *bucket = bucket.saturating_add(magnitude);
    }

    let period = Period::covering(transactions.iter().map(|t| &t.date));

    StatementSummary {
        transactions,
        total_income,
        total_expenses,
        categories,
        period,
        format,
    }
}
