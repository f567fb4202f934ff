use crate::analyzer::SeoInput;
use crate::issue::Issue;
use crate::rules::SeoRule;
use std::ops::RangeInclusive;

const RULE: &str = "title";
const IDEAL_LENGTH: RangeInclusive<usize> = 30..=60;

/// Page title presence and length
pub struct TitleRule;

impl SeoRule for TitleRule {
    fn name(&self) -> &'static str {
        RULE
    }

    fn description(&self) -> &'static str {
        "Page title should be present and 30-60 characters long"
    }

    fn points(&self, input: &SeoInput<'_>) -> u32 {
        if input.title.is_empty() {
            return 0;
        }
        let bonus = if IDEAL_LENGTH.contains(&input.title_length()) { 10 } else { 0 };
        20 + bonus
    }

    fn check(&self, input: &SeoInput<'_>) -> Vec<Issue> {
        let length = input.title_length();

        let issue = if input.title.is_empty() {
            Issue::error(RULE, "Page title is missing")
                .with_suggestion("Add a descriptive title in the SEO settings")
        } else if length < *IDEAL_LENGTH.start() {
            Issue::warning(RULE, "Page title is too short (recommended: 30-60 characters)")
        } else if length > *IDEAL_LENGTH.end() {
            Issue::warning(RULE, "Page title is too long (recommended: 30-60 characters)")
        } else {
            return Vec::new();
        };

        vec![issue]
    }
}
