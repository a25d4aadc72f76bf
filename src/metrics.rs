//! Budget and goal metrics derived from a statement summary.
//!
//! Spending is compared against the 50/30/20 rule (needs, wants, savings) and
//! the user's income goal is turned into a progress figure with a revised
//! timeline when the statement shows overspending.

use std::fmt;

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{summary::StatementSummary, types::Category};

const NEEDS: &[Category] = &[Category::Rent, Category::Utilities, Category::Groceries];
const WANTS: &[Category] = &[Category::Entertainment, Category::Shopping, Category::Dining];

/// Horizon the user wants to reach their target income in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1-year")]
    OneYear,
    #[serde(rename = "2-years")]
    TwoYears,
    #[serde(rename = "3-years")]
    ThreeYears,
    #[serde(rename = "5-years")]
    FiveYears,
    #[serde(rename = "10-years")]
    TenYears,
    #[serde(untagged)]
    Other(String),
}

impl Timeframe {
    pub fn label(&self) -> &str {
        match self {
            Timeframe::OneYear => "1-year",
            Timeframe::TwoYears => "2-years",
            Timeframe::ThreeYears => "3-years",
            Timeframe::FiveYears => "5-years",
            Timeframe::TenYears => "10-years",
            Timeframe::Other(label) => label,
        }
    }

    /// Realistic horizon once the statement shows the user is overspending.
    pub fn revised(&self) -> &'static str {
        match self {
            Timeframe::OneYear => "18 months",
            Timeframe::TwoYears => "3 years",
            Timeframe::ThreeYears => "4-5 years",
            Timeframe::FiveYears => "7-8 years",
            Timeframe::TenYears => "12-15 years",
            Timeframe::Other(_) => "longer than planned",
        }
    }
}

impl From<&str> for Timeframe {
    fn from(value: &str) -> Self {
        match value.trim() {
            "1-year" => Timeframe::OneYear,
            "2-years" => Timeframe::TwoYears,
            "3-years" => Timeframe::ThreeYears,
            "5-years" => Timeframe::FiveYears,
            "10-years" => Timeframe::TenYears,
            other => Timeframe::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the user told us about their income goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goals {
    pub current_income: Decimal,
    pub target_income: Decimal,
    pub timeframe: Timeframe,
    #[serde(default)]
    pub study_goals: String,
    #[serde(default)]
    pub career_goals: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: Decimal,
    /// How far expenses exceed income, zero when they don't.
    pub overspending: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: Decimal,
}

/// One row of the 50/30/20 comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBucket {
    pub name: String,
    pub current: Decimal,
    pub recommended: Decimal,
    pub percentage: u32,
}

impl BudgetBucket {
    fn new(name: &str, current: Decimal, income: Decimal, percentage: u32) -> Self {
        let share = Decimal::from(percentage);
        let recommended = income
            .checked_mul(share)
            .map(|scaled| scaled / Decimal::ONE_HUNDRED)
            .unwrap_or_else(|| income / Decimal::ONE_HUNDRED * share);

        Self {
            name: format!("{} ({}%)", name, percentage),
            current,
            recommended,
            percentage,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.current > self.recommended
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTracker {
    pub current_income: Decimal,
    pub target_income: Decimal,
    /// `None` when no positive target was given.
    pub progress_percentage: Option<u32>,
    pub on_track: bool,
    pub timeline: String,
    pub revised_timeline: String,
}

/// Everything the report layer needs besides the narrative text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    pub overview: Overview,
    /// Expenses as a percentage of income, one decimal place.
    pub spending_ratio: Option<Decimal>,
    pub highest_category: Option<CategoryTotal>,
    pub budget_plan: Vec<BudgetBucket>,
    pub goal_tracker: GoalTracker,
}

impl FinancialMetrics {
    pub fn derive(summary: &StatementSummary, goals: &Goals) -> Self {
        let income = summary.total_income;
        let expenses = summary.total_expenses;
        let overspending = (expenses - income).max(Decimal::ZERO);

        let overview = Overview {
            total_income: income,
            total_expenses: expenses,
            net_balance: summary.net_balance(),
            overspending,
        };

        // None with zero income or when the ratio does not fit a Decimal
        let spending_ratio = expenses
            .checked_div(income)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(|ratio| ratio.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero));

        let sum_of = |categories: &[Category]| -> Decimal {
            categories
                .iter()
                .fold(Decimal::ZERO, |acc, &c| acc.saturating_add(summary.category_total(c)))
        };

        let budget_plan = vec![
            BudgetBucket::new("Needs", sum_of(NEEDS), income, 50),
            BudgetBucket::new("Wants", sum_of(WANTS), income, 30),
            BudgetBucket::new("Savings", (income - expenses).max(Decimal::ZERO), income, 20),
        ];

        let on_track = overspending.is_zero();
        let goal_tracker = GoalTracker {
            current_income: goals.current_income,
            target_income: goals.target_income,
            progress_percentage: progress_percentage(goals.current_income, goals.target_income),
            on_track,
            timeline: goals.timeframe.label().to_string(),
            revised_timeline: if on_track {
                goals.timeframe.label().to_string()
            } else {
                goals.timeframe.revised().to_string()
            },
        };

        FinancialMetrics {
            overview,
            spending_ratio,
            highest_category: highest_category(summary),
            budget_plan,
            goal_tracker,
        }
    }
}

fn progress_percentage(current: Decimal, target: Decimal) -> Option<u32> {
    if target <= Decimal::ZERO {
        return None;
    }

    current
        .checked_div(target)?
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .max(Decimal::ZERO)
        .to_u32()
}

/// Largest category; on ties the one declared first wins.
fn highest_category(summary: &StatementSummary) -> Option<CategoryTotal> {
    summary
        .categories
        .iter()
        .fold(None, |best: Option<(&Category, &Decimal)>, (category, amount)| {
            match best {
                Some((_, best_amount)) if best_amount >= amount => best,
                _ => Some((category, amount)),
            }
        })
        .map(|(&category, &amount)| CategoryTotal { category, amount })
}
