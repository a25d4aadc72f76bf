mod dto;
mod layout;
mod parser;
mod types;

pub mod prelude {
    pub use super::dto::{CsvRow, MIN_ROW_CELLS, RowRejection};
    pub use super::layout::{ColumnMap, detect_format, map_columns};
    pub use super::parser::{CsvParser, ParsedStatement};
    pub use super::types::{CsvAmount, CsvDate, parse_amount, parse_amount_with, parse_date};
}
