use serde::{Deserialize, Serialize};

use super::{
    layout::ColumnMap,
    types::{CsvAmount, CsvDate},
};
use crate::{categorizer::Categorizer, config::ParserConfig, types::Transaction};

const DATE_FALLBACK_COLUMN: usize = 0;
const DESCRIPTION_FALLBACK_COLUMN: usize = 1;
const AMOUNT_FALLBACK_COLUMN: usize = 2;

/// Minimum number of cells a data row needs to be considered at all.
pub const MIN_ROW_CELLS: usize = 3;

/// Why a data row did not become a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowRejection {
    TooFewCells,
    InvalidDate,
}

/// One data row split into cleaned cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvRow {
    pub cells: Vec<String>,
}

impl CsvRow {
    /// Trims every cell and drops any quote characters left after CSV decoding.
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            cells: cells
                .into_iter()
                .map(|c| c.as_ref().trim().replace('"', ""))
                .collect(),
        }
    }

    /// The mapped cell when it exists and is non-empty, otherwise the cell
    /// at the fallback position (again only when non-empty).
    fn resolve(&self, mapped: Option<usize>, fallback: usize) -> Option<&str> {
        mapped
            .and_then(|idx| self.non_empty(idx))
            .or_else(|| self.non_empty(fallback))
    }

    fn non_empty(&self, idx: usize) -> Option<&str> {
        self.cells
            .get(idx)
            .map(String::as_str)
            .filter(|cell| !cell.is_empty())
    }

    /// Builds a transaction from this row, or explains why it cannot.
    pub fn to_transaction(
        &self,
        columns: &ColumnMap,
        config: &ParserConfig,
        categorizer: &Categorizer<'_>,
    ) -> Result<Transaction, RowRejection> {
        if self.cells.len() < MIN_ROW_CELLS {
            return Err(RowRejection::TooFewCells);
        }

        let date = self
            .resolve(columns.date, DATE_FALLBACK_COLUMN)
            .and_then(|cell| CsvDate::from(cell).parse())
            .ok_or(RowRejection::InvalidDate)?;

        let description_cell = self.resolve(columns.description, DESCRIPTION_FALLBACK_COLUMN);
        let description = description_cell
            .unwrap_or(config.placeholder_description.as_str())
            .to_string();

        let amount = self
            .resolve(columns.amount, AMOUNT_FALLBACK_COLUMN)
            .map(|cell| CsvAmount::from(cell).parse(config.parentheses))
            .unwrap_or_default();

        let balance = columns.balance.map(|idx| {
            self.cells
                .get(idx)
                .map(|cell| CsvAmount::from(cell.as_str()).parse(config.parentheses))
                .unwrap_or_default()
        });

        Ok(Transaction {
            date,
            description,
            amount,
            balance,
            category: categorizer.categorize(description_cell.unwrap_or("")),
        })
    }
}
