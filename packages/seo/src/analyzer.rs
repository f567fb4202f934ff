use crate::issue::{Issue, IssueLevel};
use crate::rules::RuleRegistry;
use ienet_document::PageData;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_SCORE: u32 = 100;

/// The page metadata the rubric looks at.
///
/// Title, description, keywords and Open Graph image come from the page's
/// SEO block; the slug is the page's own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeoInput<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub keywords: &'a str,
    pub slug: &'a str,
    pub og_image: &'a str,
}

impl<'a> SeoInput<'a> {
    pub fn from_page(page: &'a PageData) -> Self {
        Self {
            title: &page.seo.title,
            description: &page.seo.description,
            keywords: &page.seo.keywords,
            slug: &page.slug,
            og_image: page.seo.og_image.as_deref().unwrap_or_default(),
        }
    }

    /// Title length in characters
    pub fn title_length(&self) -> usize {
        self.title.chars().count()
    }

    /// Description length in characters
    pub fn description_length(&self) -> usize {
        self.description.chars().count()
    }
}

/// Coarse rating of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Good,
    Fair,
    Poor,
}

impl Grade {
    pub fn from_score(score: u32) -> Self {
        match score {
            80.. => Grade::Good,
            60..=79 => Grade::Fair,
            _ => Grade::Poor,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Grade::Good => "Good",
            Grade::Fair => "Fair",
            Grade::Poor => "Poor",
        })
    }
}

/// Result of scoring a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoReport {
    pub score: u32,
    pub grade: Grade,
    pub issues: Vec<Issue>,
}

impl SeoReport {
    pub fn count(&self, level: IssueLevel) -> usize {
        self.issues.iter().filter(|issue| issue.level == level).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(IssueLevel::Error) > 0
    }
}

/// Score a page against the built-in rubric
pub fn analyze(page: &PageData) -> SeoReport {
    analyze_with(&SeoInput::from_page(page), &RuleRegistry::default())
}

/// Score metadata against a custom rule set
pub fn analyze_with(input: &SeoInput<'_>, registry: &RuleRegistry) -> SeoReport {
    let mut total = 0;
    let mut issues = Vec::new();

    for rule in registry.rules() {
        total += rule.points(input);
        issues.extend(rule.check(input));
    }

    let score = total.min(MAX_SCORE);
    SeoReport {
        score,
        grade: Grade::from_score(score),
        issues,
    }
}

/// Rubric score only, 0 to 100
pub fn score(page: &PageData) -> u32 {
    let input = SeoInput::from_page(page);
    let total: u32 = RuleRegistry::default()
        .rules()
        .iter()
        .map(|rule| rule.points(&input))
        .sum();
    total.min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::SeoRule;

    struct Bonus(u32);

    impl SeoRule for Bonus {
        fn name(&self) -> &'static str {
            "bonus"
        }

        fn description(&self) -> &'static str {
            "Fixed points"
        }

        fn points(&self, _input: &SeoInput<'_>) -> u32 {
            self.0
        }

        fn check(&self, _input: &SeoInput<'_>) -> Vec<Issue> {
            Vec::new()
        }
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_score(100), Grade::Good);
        assert_eq!(Grade::from_score(80), Grade::Good);
        assert_eq!(Grade::from_score(79), Grade::Fair);
        assert_eq!(Grade::from_score(60), Grade::Fair);
        assert_eq!(Grade::from_score(59), Grade::Poor);
    }

    #[test]
    fn test_score_is_clamped() {
        let mut registry = RuleRegistry::empty();
        registry.add_rule(Box::new(Bonus(70)));
        registry.add_rule(Box::new(Bonus(70)));

        let report = analyze_with(&SeoInput::default(), &registry);
        assert_eq!(report.score, 100);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_empty_page_scores_zero() {
        let page = PageData::new("p", "");
        let report = analyze(&page);

        assert_eq!(report.score, 0);
        assert_eq!(report.grade, Grade::Poor);
        // title, description, slug errors; keywords warning; og image info
        assert_eq!(report.count(IssueLevel::Error), 3);
        assert_eq!(report.count(IssueLevel::Warning), 1);
        assert_eq!(report.count(IssueLevel::Info), 1);
    }
}
