//! Ordered, first-match-wins keyword rules.
//!
//! Categorization, bank format detection and column mapping all boil down to
//! "scan an ordered list and stop at the first hit". The two shapes here cover
//! them: [`KeywordRules`] asks which label owns a piece of text, and
//! [`first_position`] asks which cell in a row a list of candidates points at.

use serde::{Deserialize, Serialize};

/// A label and the lower-case substrings that select it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule<T> {
    pub label: T,
    pub keywords: Vec<String>,
}

impl<T> KeywordRule<T> {
    pub fn new<I, S>(label: T, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            label,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// Rules evaluated in declaration order. The first rule with any keyword
/// contained in the text wins, regardless of how long or specific later
/// matches would be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordRules<T>(Vec<KeywordRule<T>>);

impl<T> KeywordRules<T> {
    pub fn new(rules: Vec<KeywordRule<T>>) -> Self {
        let mut rules = Self(rules);
        rules.normalize();
        rules
    }

    /// Appends a rule with the lowest priority.
    pub fn push<I, S>(&mut self, label: T, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.0.push(KeywordRule::new(label, keywords));
    }

    pub fn rules(&self) -> &[KeywordRule<T>] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Label of the first rule matching `text`, compared case-insensitively.
    pub fn first_match(&self, text: &str) -> Option<&T> {
        let lowered = text.to_lowercase();
        self.0
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| &rule.label)
    }

    /// Lower-cases every keyword. Tables built through [`KeywordRules::new`]
    /// are already normalized; deserialized tables are not.
    pub(crate) fn normalize(&mut self) {
        for rule in &mut self.0 {
            for keyword in &mut rule.keywords {
                *keyword = keyword.to_lowercase();
            }
        }
    }
}

impl<T> Default for KeywordRules<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> FromIterator<KeywordRule<T>> for KeywordRules<T> {
    fn from_iter<I: IntoIterator<Item = KeywordRule<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Index of the first cell matching the candidates, candidate-major: every
/// cell is tried against the first candidate before the second candidate is
/// considered. Cells are expected to be lower-cased already.
pub fn first_position<C, S>(cells: &[C], candidates: &[S]) -> Option<usize>
where
    C: AsRef<str>,
    S: AsRef<str>,
{
    candidates.iter().find_map(|candidate| {
        let candidate = candidate.as_ref();
        cells
            .iter()
            .position(|cell| cell.as_ref().contains(candidate))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_rules() -> KeywordRules<&'static str> {
        KeywordRules::new(vec![
            KeywordRule::new("fruit", ["Apple", "pear"]),
            KeywordRule::new("tree", ["apple tree", "oak"]),
        ])
    }

    #[rstest]
    #[case("Green APPLE", Some("fruit"))]
    #[case("apple tree in the yard", Some("fruit"))] // declaration order beats specificity
    #[case("old oak", Some("tree"))]
    #[case("granite", None)]
    #[case("", None)]
    fn test_first_match(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(sample_rules().first_match(text).copied(), expected);
    }

    #[test]
    fn test_new_lowercases_keywords() {
        let rules = sample_rules();
        assert_eq!(rules.rules()[0].keywords, vec!["apple", "pear"]);
    }

    #[test]
    fn test_push_appends_lowest_priority() {
        let mut rules = sample_rules();
        rules.push("stone", ["GRANITE", "apple"]);

        assert_eq!(rules.first_match("granite slab"), Some(&"stone"));
        assert_eq!(rules.first_match("apple"), Some(&"fruit"));
    }

    #[test]
    fn test_normalize_after_deserialize() {
        let mut rules: KeywordRules<String> =
            serde_json::from_str(r#"[{"label":"x","keywords":["ABC"]}]"#).unwrap();
        assert_eq!(rules.first_match("abc"), None);

        rules.normalize();
        assert_eq!(rules.first_match("xAbCx"), Some(&"x".to_string()));
    }

    #[rstest]
    #[case(&["posting date", "date"], &["date", "posting date"], Some(0))]
    #[case(&["amount", "balance"], &["debit", "amount"], Some(0))]
    #[case(&["id", "value"], &["date"], None)]
    #[case(&[], &["date"], None)]
    fn test_first_position(
        #[case] cells: &[&str],
        #[case] candidates: &[&str],
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(first_position(cells, candidates), expected);
    }

    #[test]
    fn test_first_position_is_candidate_major() {
        // "credit" sits before "amount" in the row, but "amount" is the
        // higher-priority candidate.
        let cells = ["credit", "transaction amount"];
        assert_eq!(first_position(&cells, &["amount", "credit"]), Some(1));
    }
}
