//! Domain services

pub mod faq;
pub mod prompt;
pub mod tour;
pub mod wizard;

pub use faq::{slugify, FaqEntry, FaqIndex, FaqItem, FaqSection, FaqView, HighlightSpan, ALL_CATEGORIES};
pub use prompt::{build_prompt, extract_product_features, PromptInputs};
pub use tour::{GuidedTour, TourStep, TOUR_STEPS};
pub use wizard::{CompletionContext, WizardController, WizardView};
