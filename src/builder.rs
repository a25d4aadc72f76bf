use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    config::ParserConfig,
    errors::StatementParseError,
    parsers::prelude::*,
    summary::StatementSummary,
    types::Transaction,
};

const PDF_MIME_TYPES: &[&str] = &["application/pdf"];
const PDF_EXTENSION: &str = "pdf";
const PDF_MAGIC: &str = "%PDF";

/// Declared kind of an uploaded statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    #[serde(rename = "csv")]
    Csv,
    /// Recognized so it can be rejected explicitly; no document parsing is done.
    #[serde(rename = "pdf")]
    Pdf,
}

impl FileFormat {
    fn parse(
        &self,
        content: &str,
        config: &ParserConfig,
    ) -> Result<ParsedStatement, StatementParseError> {
        match self {
            FileFormat::Csv => CsvParser::parse(content, config),
            FileFormat::Pdf => {
                warn!("PDF statements are not parsed, only delimited text exports are supported");
                Err(StatementParseError::UnsupportedFormat)
            }
        }
    }

    /// A declared MIME type wins over the filename, which wins over sniffing
    /// the content.
    fn detect(
        mime_type: Option<&str>,
        filename: Option<&str>,
        content: Option<&str>,
        config: &ParserConfig,
    ) -> Result<Self, StatementParseError> {
        if let Some(mime) = mime_type {
            if CsvParser::accepts_mime(mime) {
                return Ok(FileFormat::Csv);
            }
            if is_pdf_mime(mime) {
                return Ok(FileFormat::Pdf);
            }
            debug!("Rejecting declared type {:?}", mime);
            return Err(StatementParseError::UnsupportedFormat);
        }

        if let Some(filename) = filename {
            if CsvParser::accepts_filename(filename) {
                return Ok(FileFormat::Csv);
            }
            if filename
                .rsplit_once('.')
                .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(PDF_EXTENSION))
            {
                return Ok(FileFormat::Pdf);
            }
            debug!("Rejecting file {:?} by extension", filename);
            return Err(StatementParseError::UnsupportedFormat);
        }

        if let Some(content) = content {
            if content.trim_start().starts_with(PDF_MAGIC) {
                return Ok(FileFormat::Pdf);
            }
            if CsvParser::looks_like(content, config) {
                return Ok(FileFormat::Csv);
            }
        }

        Err(StatementParseError::UnsupportedFormat)
    }
}

fn is_pdf_mime(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    PDF_MIME_TYPES.contains(&essence.as_str())
}

/// Entry point for turning an uploaded statement into a ledger.
///
/// ```rust,ignore
/// let summary = ParserBuilder::new()
///     .content(&text)
///     .mime_type("text/csv")
///     .analyze()?;
/// ```
#[derive(Default)]
pub struct ParserBuilder {
    content: Option<String>,
    filename: Option<String>,
    mime_type: Option<String>,
    format: Option<FileFormat>,
    config: Option<ParserConfig>,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    /// Only used for format detection, the file is never opened.
    pub fn filename(mut self, filename: &str) -> Self {
        self.filename = Some(filename.to_string());
        self
    }

    pub fn mime_type(mut self, mime_type: &str) -> Self {
        self.mime_type = Some(mime_type.to_string());
        self
    }

    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn config(mut self, config: ParserConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Accepted transactions in file order.
    pub fn parse(self) -> Result<Vec<Transaction>, StatementParseError> {
        self.parse_statement().map(|parsed| parsed.transactions)
    }

    /// Sorted ledger with totals and period.
    pub fn analyze(self) -> Result<StatementSummary, StatementParseError> {
        self.parse_statement().map(ParsedStatement::into_summary)
    }

    pub fn parse_statement(self) -> Result<ParsedStatement, StatementParseError> {
        let config = self.config.as_ref().unwrap_or_else(|| ParserConfig::shared());

        let content = self
            .content
            .as_deref()
            .ok_or(StatementParseError::MissingContent)?;

        let format = match self.format {
            Some(format) => format,
            None => FileFormat::detect(
                self.mime_type.as_deref(),
                self.filename.as_deref(),
                Some(content),
                config,
            )?,
        };

        format.parse(content, config)
    }
}
