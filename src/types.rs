use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One ledger entry after normalization.
///
/// Every transaction handed out by the parser has a real calendar date and a
/// numeric amount; rows that fail either check never become a `Transaction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    /// Positive values are inflows, negative values are outflows.
    pub amount: Decimal,
    /// Running balance, `None` when the export has no balance column.
    pub balance: Option<Decimal>,
    pub category: Category,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

/// Spending category assigned by keyword matching.
///
/// Declaration order is the default matching priority and also the ordering
/// used for category maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Rent,
    Utilities,
    Groceries,
    Transport,
    Entertainment,
    Dining,
    Shopping,
    Medical,
    Education,
    Subscriptions,
    Banking,
    Income,
    Other,
}

impl Category {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Rent => "rent",
            Category::Utilities => "utilities",
            Category::Groceries => "groceries",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Dining => "dining",
            Category::Shopping => "shopping",
            Category::Medical => "medical",
            Category::Education => "education",
            Category::Subscriptions => "subscriptions",
            Category::Banking => "banking",
            Category::Income => "income",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bank that produced an export, guessed from its header line.
///
/// Every variant is parsed by the same column-mapping path today; the tag is
/// carried along so a bank-specific layout can diverge later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankFormat {
    Capitec,
    Fnb,
    Nedbank,
    StandardBank,
    #[default]
    Generic,
}

impl fmt::Display for BankFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BankFormat::Capitec => "Capitec",
            BankFormat::Fnb => "FNB",
            BankFormat::Nedbank => "Nedbank",
            BankFormat::StandardBank => "Standard Bank",
            BankFormat::Generic => "generic",
        };
        f.write_str(name)
    }
}
