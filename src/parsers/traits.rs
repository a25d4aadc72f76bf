use crate::{config::ParserConfig, errors::StatementResult};

pub trait Parser {
    type Output;

    /// MIME types routed to this parser, compared without parameters.
    const MIME_TYPES: &'static [&'static str];

    /// File extensions routed to this parser, lower-case and without the dot.
    const EXTENSIONS: &'static [&'static str];

    fn parse(content: &str, config: &ParserConfig) -> StatementResult<Self::Output>;

    /// Content sniffing for input that arrives without a declared type.
    fn looks_like(content: &str, config: &ParserConfig) -> bool;

    fn accepts_mime(mime_type: &str) -> bool {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        Self::MIME_TYPES.contains(&essence.as_str())
    }

    fn accepts_filename(filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .is_some_and(|ext| Self::EXTENSIONS.contains(&ext.as_str()))
    }
}
