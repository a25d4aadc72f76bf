use serde::{Deserialize, Serialize};

use crate::{
    config::ColumnCandidates,
    matching::{KeywordRules, first_position},
    types::BankFormat,
};

/// Where each logical field lives in a row. `None` means no header matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnMap {
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub amount: Option<usize>,
    pub balance: Option<usize>,
}

impl ColumnMap {
    /// Date, description and amount all resolved from the header.
    pub fn is_complete(&self) -> bool {
        self.date.is_some() && self.description.is_some() && self.amount.is_some()
    }
}

/// Guesses the issuing bank from the raw header line.
pub fn detect_format(header_line: &str, rules: &KeywordRules<BankFormat>) -> BankFormat {
    rules
        .first_match(header_line)
        .copied()
        .unwrap_or(BankFormat::Generic)
}

/// Resolves column positions from header cells. Cells are trimmed and
/// lower-cased before matching; candidates are expected lower-case.
pub fn map_columns<S: AsRef<str>>(headers: &[S], candidates: &ColumnCandidates) -> ColumnMap {
    let headers: Vec<String> = headers
        .iter()
        .map(|h| h.as_ref().trim().to_lowercase())
        .collect();

    ColumnMap {
        date: first_position(&headers, &candidates.date),
        description: first_position(&headers, &candidates.description),
        amount: first_position(&headers, &candidates.amount),
        balance: first_position(&headers, &candidates.balance),
    }
}
