use crate::{config::ParserConfig, matching::KeywordRules, types::Category};

/// Assigns a [`Category`] to a transaction description.
///
/// Matching is substring containment, case-insensitive, and the first rule in
/// table order wins. Descriptions that match nothing fall into
/// [`Category::Other`].
#[derive(Debug, Clone, Copy)]
pub struct Categorizer<'a> {
    rules: &'a KeywordRules<Category>,
}

impl<'a> Categorizer<'a> {
    pub fn new(rules: &'a KeywordRules<Category>) -> Self {
        Self { rules }
    }

    pub fn from_config(config: &'a ParserConfig) -> Self {
        Self::new(&config.categories)
    }

    pub fn categorize(&self, description: &str) -> Category {
        self.rules
            .first_match(description)
            .copied()
            .unwrap_or(Category::Other)
    }
}

impl Default for Categorizer<'static> {
    fn default() -> Self {
        Self::from_config(ParserConfig::shared())
    }
}

/// Categorizes with the default keyword table.
pub fn categorize(description: &str) -> Category {
    Categorizer::default().categorize(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::KeywordRule;
    use rstest::rstest;

    #[rstest]
    #[case("Checkers Grocery", Category::Groceries)]
    #[case("Random Shop XYZ", Category::Other)]
    #[case("Salary Deposit", Category::Income)]
    #[case("Rent Payment", Category::Rent)] // rent is declared before income
    #[case("NETFLIX SUBSCRIPTION", Category::Entertainment)]
    #[case("Uber Trip", Category::Transport)]
    #[case("McDonald's", Category::Dining)]
    #[case("Electricity Bill", Category::Utilities)]
    #[case("Takealot Purchase", Category::Shopping)]
    #[case("Petrol Station", Category::Transport)]
    #[case("Clicks Pharmacy", Category::Medical)]
    #[case("UNISA tuition", Category::Education)]
    #[case("Gym membership", Category::Subscriptions)]
    #[case("Monthly account fee", Category::Subscriptions)] // "monthly" beats "fee"
    #[case("ATM withdrawal", Category::Banking)]
    #[case("Transfer in from savings", Category::Income)]
    #[case("Organic food market", Category::Groceries)]
    #[case("", Category::Other)]
    fn test_categorize_default_table(#[case] description: &str, #[case] expected: Category) {
        assert_eq!(categorize(description), expected);
    }

    #[test]
    fn test_first_declared_match_wins() {
        // "gas" (utilities) sits inside "Vegas", utilities outranks entertainment
        assert_eq!(categorize("Vegas cinema night"), Category::Utilities);
    }

    #[test]
    fn test_substituted_table() {
        let rules = KeywordRules::new(vec![
            KeywordRule::new(Category::Groceries, ["makro"]),
            KeywordRule::new(Category::Income, ["bursary"]),
        ]);
        let categorizer = Categorizer::new(&rules);

        assert_eq!(categorizer.categorize("MAKRO Centurion"), Category::Groceries);
        assert_eq!(categorizer.categorize("NSFAS Bursary"), Category::Income);
        assert_eq!(categorizer.categorize("Checkers"), Category::Other);
    }

    #[test]
    fn test_empty_table_is_other() {
        let rules = KeywordRules::default();
        assert_eq!(Categorizer::new(&rules).categorize("salary"), Category::Other);
    }
}
