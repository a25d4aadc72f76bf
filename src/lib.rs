//! Turn exported bank statements into a categorized ledger with totals,
//! a statement period and 50/30/20 budget metrics.
//!
//! ```rust,ignore
//! use statement_ledger::{FinancialMetrics, Goals, ParserBuilder};
//!
//! let summary = ParserBuilder::new()
//!     .content(&file_content)
//!     .mime_type("text/csv")
//!     .analyze()?;
//!
//! let metrics = FinancialMetrics::derive(&summary, &goals);
//! ```

mod builder;
mod categorizer;
mod matching;
mod summary;
mod types;

pub mod config;
pub mod errors;
pub mod metrics;
pub mod parsers;

pub use builder::{FileFormat, ParserBuilder};
pub use categorizer::{Categorizer, categorize};
pub use config::{ColumnCandidates, ParenthesesPolicy, ParserConfig};
pub use errors::{StatementParseError, StatementResult};
pub use matching::{KeywordRule, KeywordRules, first_position};
pub use metrics::{FinancialMetrics, Goals, Timeframe};
pub use parsers::prelude::*;
pub use summary::{Period, StatementSummary, aggregate, aggregate_with_format};
pub use types::{BankFormat, Category, Transaction};
