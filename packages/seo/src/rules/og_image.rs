use crate::analyzer::SeoInput;
use crate::issue::Issue;
use crate::rules::SeoRule;

const RULE: &str = "og-image";

/// Open Graph image presence
pub struct OgImageRule;

impl SeoRule for OgImageRule {
    fn name(&self) -> &'static str {
        RULE
    }

    fn description(&self) -> &'static str {
        "An Open Graph image should be set for social sharing"
    }

    fn points(&self, input: &SeoInput<'_>) -> u32 {
        if input.og_image.is_empty() {
            0
        } else {
            10
        }
    }

    fn check(&self, input: &SeoInput<'_>) -> Vec<Issue> {
        if !input.og_image.is_empty() {
            return Vec::new();
        }
        vec![Issue::info(
            RULE,
            "Open Graph image is missing (recommended for social sharing)",
        )]
    }
}
