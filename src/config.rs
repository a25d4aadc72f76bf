//! Static lookup tables that drive parsing.
//!
//! The defaults reproduce the keyword, bank and header tables the engine ships
//! with. A [`ParserConfig`] is plain data: build one in code, load one from
//! JSON, or borrow the process-wide default via [`ParserConfig::shared`].

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::{
    errors::StatementResult,
    matching::{KeywordRule, KeywordRules},
    types::{BankFormat, Category},
};

static DEFAULT_CONFIG: LazyLock<ParserConfig> = LazyLock::new(ParserConfig::default);

pub const DEFAULT_PLACEHOLDER_DESCRIPTION: &str = "Unknown Transaction";

/// How a parenthesized amount such as `(150.00)` is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParenthesesPolicy {
    /// Drop the parentheses and keep the sign as written.
    #[default]
    Strip,
    /// Treat a parenthesized value as an outflow.
    Negate,
}

/// Header substrings tried, in order, for each logical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnCandidates {
    pub date: Vec<String>,
    pub description: Vec<String>,
    pub amount: Vec<String>,
    pub balance: Vec<String>,
}

impl Default for ColumnCandidates {
    fn default() -> Self {
        fn owned(names: &[&str]) -> Vec<String> {
            names.iter().map(|n| n.to_string()).collect()
        }

        Self {
            date: owned(&["date", "transaction date", "posting date"]),
            description: owned(&["description", "reference", "details", "transaction details"]),
            amount: owned(&["amount", "debit", "credit", "transaction amount"]),
            balance: owned(&["balance", "running balance", "available balance"]),
        }
    }
}

impl ColumnCandidates {
    fn normalize(&mut self) {
        for names in [
            &mut self.date,
            &mut self.description,
            &mut self.amount,
            &mut self.balance,
        ] {
            for name in names.iter_mut() {
                *name = name.trim().to_lowercase();
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub categories: KeywordRules<Category>,
    pub formats: KeywordRules<BankFormat>,
    pub columns: ColumnCandidates,
    pub delimiter: char,
    pub parentheses: ParenthesesPolicy,
    pub placeholder_description: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            categories: default_category_rules(),
            formats: default_format_rules(),
            columns: ColumnCandidates::default(),
            delimiter: ',',
            parentheses: ParenthesesPolicy::default(),
            placeholder_description: DEFAULT_PLACEHOLDER_DESCRIPTION.to_string(),
        }
    }
}

impl ParserConfig {
    /// The default configuration, built once per process.
    pub fn shared() -> &'static ParserConfig {
        &DEFAULT_CONFIG
    }

    /// Loads a configuration document. Fields left out keep their defaults,
    /// so a document may override a single table.
    pub fn from_json(json: &str) -> StatementResult<Self> {
        let mut config: ParserConfig = serde_json::from_str(json)?;
        config.categories.normalize();
        config.formats.normalize();
        config.columns.normalize();
        Ok(config)
    }

    pub fn with_parentheses(mut self, policy: ParenthesesPolicy) -> Self {
        self.parentheses = policy;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Keyword table for South African retail, utility and banking descriptions.
pub fn default_category_rules() -> KeywordRules<Category> {
    KeywordRules::new(vec![
        KeywordRule::new(Category::Rent, ["rent", "rental", "property", "landlord"]),
        KeywordRule::new(
            Category::Utilities,
            ["electricity", "water", "gas", "municipal", "rates", "eskom"],
        ),
        KeywordRule::new(
            Category::Groceries,
            ["checkers", "pick n pay", "woolworths", "spar", "shoprite", "food", "grocery"],
        ),
        KeywordRule::new(
            Category::Transport,
            ["uber", "bolt", "taxi", "petrol", "fuel", "garage", "transport"],
        ),
        KeywordRule::new(
            Category::Entertainment,
            ["netflix", "dstv", "showmax", "spotify", "cinema", "movies"],
        ),
        KeywordRule::new(
            Category::Dining,
            ["restaurant", "takeaway", "mcdonald", "kfc", "pizza", "nando", "steers"],
        ),
        KeywordRule::new(
            Category::Shopping,
            ["clothing", "fashion", "shoes", "mall", "online", "amazon", "takealot"],
        ),
        KeywordRule::new(
            Category::Medical,
            ["doctor", "pharmacy", "medical", "hospital", "clinic", "dentist"],
        ),
        KeywordRule::new(
            Category::Education,
            ["university", "college", "school", "tuition", "books", "study"],
        ),
        KeywordRule::new(
            Category::Subscriptions,
            ["subscription", "monthly", "annual", "membership"],
        ),
        KeywordRule::new(Category::Banking, ["bank", "fee", "charge", "interest", "atm"]),
        KeywordRule::new(
            Category::Income,
            ["salary", "wage", "payment", "deposit", "transfer in"],
        ),
    ])
}

/// Header fingerprints of the banks we recognize.
pub fn default_format_rules() -> KeywordRules<BankFormat> {
    KeywordRules::new(vec![
        KeywordRule::new(BankFormat::Capitec, ["capitec"]),
        KeywordRule::new(BankFormat::Fnb, ["fnb", "first national"]),
        KeywordRule::new(BankFormat::Nedbank, ["nedbank"]),
        KeywordRule::new(BankFormat::StandardBank, ["standard", "stanbic"]),
    ])
}
