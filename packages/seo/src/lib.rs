mod analyzer;
mod issue;
mod rules;

pub use analyzer::{analyze, analyze_with, score, Grade, SeoInput, SeoReport};
pub use issue::{Issue, IssueLevel};
pub use rules::{
    DescriptionRule, KeywordsRule, OgImageRule, RuleRegistry, SeoRule, SlugRule, TitleRule,
};
