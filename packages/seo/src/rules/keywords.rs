use crate::analyzer::SeoInput;
use crate::issue::Issue;
use crate::rules::SeoRule;

const RULE: &str = "keywords";

/// Meta keywords presence
pub struct KeywordsRule;

impl SeoRule for KeywordsRule {
    fn name(&self) -> &'static str {
        RULE
    }

    fn description(&self) -> &'static str {
        "Meta keywords should be present"
    }

    fn points(&self, input: &SeoInput<'_>) -> u32 {
        if input.keywords.is_empty() {
            0
        } else {
            10
        }
    }

    fn check(&self, input: &SeoInput<'_>) -> Vec<Issue> {
        if !input.keywords.is_empty() {
            return Vec::new();
        }
        vec![Issue::warning(RULE, "Keywords are missing")
            .with_suggestion("List a few comma-separated search terms")]
    }
}
