use csv::{ReaderBuilder, StringRecord};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::{
    dto::CsvRow,
    layout::{ColumnMap, detect_format, map_columns},
};
use crate::{
    categorizer::Categorizer,
    config::ParserConfig,
    errors::StatementResult,
    parsers::traits::Parser,
    summary::{StatementSummary, aggregate_with_format},
    types::{BankFormat, Transaction},
};

/// Result of reading one delimited export, before aggregation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedStatement {
    pub format: BankFormat,
    pub columns: ColumnMap,
    /// Accepted rows in file order.
    pub transactions: Vec<Transaction>,
    /// Data rows dropped for having too few cells or no readable date.
    pub rejected_rows: usize,
}

impl ParsedStatement {
    pub fn into_summary(self) -> StatementSummary {
        aggregate_with_format(self.transactions, self.format)
    }
}

pub struct CsvParser;

impl Parser for CsvParser {
    type Output = ParsedStatement;

    const MIME_TYPES: &'static [&'static str] = &[
        "text/csv",
        "application/csv",
        "text/comma-separated-values",
        "text/plain",
    ];

    const EXTENSIONS: &'static [&'static str] = &["csv"];

    fn looks_like(content: &str, config: &ParserConfig) -> bool {
        content
            .lines()
            .find(|line| !line.trim().is_empty())
            .is_some_and(|header| header.contains(config.delimiter))
    }

    fn parse(content: &str, config: &ParserConfig) -> StatementResult<Self::Output> {
        let delimiter = u8::try_from(config.delimiter).unwrap_or_else(|_| {
            warn!(
                "Delimiter {:?} is not a single byte, falling back to ','",
                config.delimiter
            );
            b','
        });

        let mut lines = content.lines().filter(|line| !line.trim().is_empty());

        let Some(header_line) = lines.next() else {
            debug!("Statement is empty, nothing to parse");
            return Ok(ParsedStatement::default());
        };

        let format = detect_format(header_line, &config.formats);
        let headers = split_line(header_line, delimiter)
            .map(|row| row.cells)
            .unwrap_or_default();
        let columns = map_columns(&headers, &config.columns);
        debug!("Detected {} statement format, columns {:?}", format, columns);

        if !columns.is_complete() {
            warn!(
                "Header {:?} does not name every column, using positional fallback",
                header_line
            );
        }

        let categorizer = Categorizer::from_config(config);
        let mut transactions = Vec::new();
        let mut rejected_rows = 0;

        for (line_no, line) in lines.enumerate() {
            let converted = split_line(line, delimiter)
                .map(|row| row.to_transaction(&columns, config, &categorizer));

            match converted {
                Some(Ok(txn)) => transactions.push(txn),
                Some(Err(reason)) => {
                    trace!("Dropping data row {}: {:?}", line_no + 1, reason);
                    rejected_rows += 1;
                }
                None => {
                    trace!("Dropping data row {}: unreadable record", line_no + 1);
                    rejected_rows += 1;
                }
            }
        }

        debug!(
            "Parsed {} transactions, dropped {} rows",
            transactions.len(),
            rejected_rows
        );

        Ok(ParsedStatement {
            format,
            columns,
            transactions,
            rejected_rows,
        })
    }
}

/// Splits a single line, honouring quotes. Every line is read on its own so an
/// unbalanced quote cannot swallow the rows that follow it.
fn split_line(line: &str, delimiter: u8) -> Option<CsvRow> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => Some(CsvRow::new(record.iter())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ParenthesesPolicy, types::Category};
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const SAMPLE_CSV: &str = r#"Date,Description,Amount,Balance
2024-01-15,Salary Deposit,"R25,000.00","R30,000.00"
2024-01-16,Rent Payment,-8000.00,22000.00
2024-01-17,"Checkers Grocery",-1200.00,20800.00
"#;

    fn parse(content: &str) -> ParsedStatement {
        CsvParser::parse(content, &ParserConfig::default()).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[rstest]
    #[case(SAMPLE_CSV, true)]
    #[case("\n\n  \nDate;Amount\n", false)]
    #[case("\n\nDate,Amount\n", true)]
    #[case("%PDF-1.7 binary", false)]
    #[case("", false)]
    fn test_looks_like(#[case] content: &str, #[case] expected: bool) {
        assert_eq!(CsvParser::looks_like(content, &ParserConfig::default()), expected);
    }

    #[rstest]
    #[case("text/csv", true)]
    #[case("TEXT/CSV; charset=utf-8", true)]
    #[case("text/plain", true)]
    #[case("application/pdf", false)]
    #[case("image/png", false)]
    #[case("", false)]
    fn test_accepts_mime(#[case] mime: &str, #[case] expected: bool) {
        assert_eq!(CsvParser::accepts_mime(mime), expected);
    }

    #[rstest]
    #[case("statement.csv", true)]
    #[case("Statement.CSV", true)]
    #[case("statement.pdf", false)]
    #[case("csv", false)]
    fn test_accepts_filename(#[case] filename: &str, #[case] expected: bool) {
        assert_eq!(CsvParser::accepts_filename(filename), expected);
    }

    #[test]
    fn test_parse_valid_csv() {
        let parsed = parse(SAMPLE_CSV);

        assert_eq!(parsed.format, BankFormat::Generic);
        assert_eq!(parsed.rejected_rows, 0);
        assert_eq!(parsed.transactions.len(), 3);

        let salary = &parsed.transactions[0];
        assert_eq!(salary.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(salary.amount, dec("25000.00"));
        assert_eq!(salary.balance, Some(dec("30000.00")));
        assert_eq!(salary.category, Category::Income);

        assert_eq!(parsed.transactions[2].description, "Checkers Grocery");
        assert_eq!(parsed.transactions[2].category, Category::Groceries);
    }

    #[test]
    fn test_parse_well_formed_rows_are_all_kept() {
        let mut content = String::from("Posting Date,Details,Transaction Amount\n");
        for day in 1..=28 {
            content.push_str(&format!("{:02}/02/2024,Purchase {},-{}.50\n", day, day, day));
        }

        let parsed = parse(&content);
        assert_eq!(parsed.transactions.len(), 28);
        assert_eq!(parsed.rejected_rows, 0);
        assert_eq!(parsed.transactions[27].amount, dec("-28.50"));
    }

    #[test]
    fn test_parse_drops_malformed_rows() {
        let content = "Date,Description,Amount\n\
                       2024-01-15,Salary,25000\n\
                       \n\
                       just a note\n\
                       Closing balance,,17000\n\
                       2024-01-16,Rent,-8000\n\
                       ,,,\n";

        let parsed = parse(content);
        assert_eq!(parsed.transactions.len(), 2);
        assert_eq!(parsed.rejected_rows, 3);
        assert_eq!(parsed.transactions[1].description, "Rent");
    }

    #[test]
    fn test_parse_detects_bank_format() {
        let content = "Capitec Date,Description,Amount\n2024-01-15,Salary,25000\n";
        let parsed = parse(content);

        assert_eq!(parsed.format, BankFormat::Capitec);
        assert_eq!(parsed.transactions.len(), 1);
    }

    #[test]
    fn test_parse_without_recognized_headers_uses_positions() {
        let content = "When,What,How much\n15/01/2024,Uber Trip,-85\n";
        let parsed = parse(content);

        assert_eq!(parsed.columns, ColumnMap::default());
        assert_eq!(parsed.transactions.len(), 1);
        assert_eq!(parsed.transactions[0].category, Category::Transport);
        assert_eq!(parsed.transactions[0].balance, None);
    }

    #[test]
    fn test_parse_crlf_and_quotes() {
        let content = "\"Date\",\"Description\",\"Amount\"\r\n\"2024-01-15\",\"Netflix\",\"-199.00\"\r\n";
        let parsed = parse(content);

        assert_eq!(parsed.transactions.len(), 1);
        assert_eq!(parsed.transactions[0].description, "Netflix");
        assert_eq!(parsed.transactions[0].amount, dec("-199.00"));
    }

    #[test]
    fn test_parse_unbalanced_quote_stays_on_its_line() {
        let content = "Date,Description,Amount\n2024-01-15,\"Broken,-10\n2024-01-16,Rent,-8000\n";
        let parsed = parse(content);

        assert_eq!(parsed.transactions.len(), 1);
        assert_eq!(parsed.transactions[0].description, "Rent");
    }

    #[test]
    fn test_parse_custom_delimiter_and_policy() {
        let config = ParserConfig::default()
            .with_delimiter(';')
            .with_parentheses(ParenthesesPolicy::Negate);
        let content = "Date;Description;Amount\n2024-01-15;Bank charge;(35.00)\n";

        let parsed = CsvParser::parse(content, &config).unwrap();
        assert_eq!(parsed.transactions.len(), 1);
        assert_eq!(parsed.transactions[0].amount, dec("-35.00"));
        assert_eq!(parsed.transactions[0].category, Category::Banking);
    }

    #[rstest]
    #[case("")]
    #[case("\n \n\t\n")]
    #[case("Date,Description,Amount\n")]
    fn test_parse_empty_input(#[case] content: &str) {
        let parsed = parse(content);
        assert!(parsed.transactions.is_empty());
        assert_eq!(parsed.rejected_rows, 0);
    }

    #[test]
    fn test_into_summary_carries_format() {
        let content = "FNB,Date,Description,Amount\nx,2024-01-15,Salary,25000\n";
        let summary = parse(content).into_summary();

        assert_eq!(summary.format, BankFormat::Fnb);
        assert_eq!(summary.total_income, dec("25000"));
    }
}
