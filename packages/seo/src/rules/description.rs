use crate::analyzer::SeoInput;
use crate::issue::Issue;
use crate::rules::SeoRule;
use std::ops::RangeInclusive;

const RULE: &str = "description";
const IDEAL_LENGTH: RangeInclusive<usize> = 120..=160;

/// Meta description presence and length
pub struct DescriptionRule;

impl SeoRule for DescriptionRule {
    fn name(&self) -> &'static str {
        RULE
    }

    fn description(&self) -> &'static str {
        "Meta description should be present and 120-160 characters long"
    }

    fn points(&self, input: &SeoInput<'_>) -> u32 {
        if input.description.is_empty() {
            return 0;
        }
        let bonus = if IDEAL_LENGTH.contains(&input.description_length()) {
            10
        } else {
            0
        };
        20 + bonus
    }

    fn check(&self, input: &SeoInput<'_>) -> Vec<Issue> {
        let length = input.description_length();

        let issue = if input.description.is_empty() {
            Issue::error(RULE, "Meta description is missing")
                .with_suggestion("Summarise the page in one or two sentences")
        } else if length < *IDEAL_LENGTH.start() {
            Issue::warning(
                RULE,
                "Meta description is too short (recommended: 120-160 characters)",
            )
        } else if length > *IDEAL_LENGTH.end() {
            Issue::warning(
                RULE,
                "Meta description is too long (recommended: 120-160 characters)",
            )
        } else {
            return Vec::new();
        };

        vec![issue]
    }
}
