use crate::analyzer::SeoInput;
use crate::issue::Issue;
use crate::rules::SeoRule;

const RULE: &str = "slug";
const MAX_LENGTH: usize = 75;

/// URL slug presence and shape
pub struct SlugRule;

impl SeoRule for SlugRule {
    fn name(&self) -> &'static str {
        RULE
    }

    fn description(&self) -> &'static str {
        "Page slug should be present, short and free of spaces"
    }

    fn points(&self, input: &SeoInput<'_>) -> u32 {
        if input.slug.is_empty() {
            return 0;
        }
        let clean = input.slug.chars().count() <= MAX_LENGTH && !input.slug.contains(' ');
        if clean {
            20
        } else {
            10
        }
    }

    fn check(&self, input: &SeoInput<'_>) -> Vec<Issue> {
        if input.slug.is_empty() {
            return vec![Issue::error(RULE, "Page slug is missing")];
        }
        if input.slug.contains(' ') {
            return vec![
                Issue::error(RULE, "Page slug contains spaces (use hyphens instead)")
                    .with_suggestion(input.slug.split_whitespace().collect::<Vec<_>>().join("-")),
            ];
        }
        // Over-long slugs only lose the bonus
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(slug: &str) -> SeoInput<'_> {
        SeoInput {
            slug,
            ..SeoInput::default()
        }
    }

    #[test]
    fn test_slug_points() {
        assert_eq!(SlugRule.points(&input("")), 0);
        assert_eq!(SlugRule.points(&input("home")), 20);
        assert_eq!(SlugRule.points(&input("home page")), 10);
        assert_eq!(SlugRule.points(&input(&"s".repeat(75))), 20);
        assert_eq!(SlugRule.points(&input(&"s".repeat(76))), 10);
    }

    #[test]
    fn test_spaces_suggest_hyphens() {
        let issues = SlugRule.check(&input("home page"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].suggestion.as_deref(), Some("home-page"));
    }

    #[test]
    fn test_long_slug_has_no_issue() {
        assert!(SlugRule.check(&input(&"s".repeat(90))).is_empty());
    }
}
