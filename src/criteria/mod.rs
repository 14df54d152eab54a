//! GEO criteria
//!
//! Ten independent rules, each checking one structural property of an
//! article that answer engines tend to reward. The registry below fixes
//! their order; ids are 1..=10 and match the position in that order.

mod base;
mod citations;
mod definition;
mod direct_answer;
mod facts;
mod faq;
mod headings;
mod lists;
mod meta_description;
mod tables;
mod word_count;

pub use base::{Criterion, Evaluation};
pub use citations::CitationsCriterion;
pub use definition::DefinitionCriterion;
pub use direct_answer::DirectAnswerCriterion;
pub use facts::FactsCriterion;
pub use faq::FaqCriterion;
pub use headings::HeadingsCriterion;
pub use lists::ListsCriterion;
pub use meta_description::MetaDescriptionCriterion;
pub use tables::TablesCriterion;
pub use word_count::WordCountCriterion;

use crate::config::CriteriaConfig;
use std::sync::Arc;

/// Create the ten criteria, in id order, with thresholds from `config`
pub fn default_criteria(config: &CriteriaConfig) -> Vec<Arc<dyn Criterion>> {
    vec![
        Arc::new(DirectAnswerCriterion::new(config.min_intro_words)),
        Arc::new(DefinitionCriterion::new(config.strict)),
        Arc::new(HeadingsCriterion::new(config.min_headings)),
        Arc::new(FactsCriterion::new(config.min_numbers, config.strict)),
        Arc::new(CitationsCriterion::new(config.strict)),
        Arc::new(FaqCriterion),
        Arc::new(ListsCriterion::new(config.min_list_items)),
        Arc::new(TablesCriterion),
        Arc::new(WordCountCriterion::new(config.min_words)),
        Arc::new(MetaDescriptionCriterion::new(
            config.meta_min_len,
            config.meta_max_len,
        )),
    ]
}
