mod description;
mod keywords;
mod og_image;
mod slug;
mod title;

pub use description::DescriptionRule;
pub use keywords::KeywordsRule;
pub use og_image::OgImageRule;
pub use slug::SlugRule;
pub use title::TitleRule;

use crate::analyzer::SeoInput;
use crate::issue::Issue;

/// A single criterion of the SEO rubric.
///
/// Scoring and issue reporting are independent: a rule may award points
/// and still report a warning (a present but short title).
pub trait SeoRule: Send + Sync {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Points this rule awards for `input`
    fn points(&self, input: &SeoInput<'_>) -> u32;

    /// Issues this rule finds in `input`
    fn check(&self, input: &SeoInput<'_>) -> Vec<Issue>;
}

/// Registry of scoring rules, evaluated in insertion order
pub struct RuleRegistry {
    rules: Vec<Box<dyn SeoRule>>,
}

impl RuleRegistry {
    /// Create a registry with the built-in rubric
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(TitleRule),
                Box::new(DescriptionRule),
                Box::new(KeywordsRule),
                Box::new(SlugRule),
                Box::new(OgImageRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn SeoRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn SeoRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
