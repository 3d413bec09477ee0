//! Prompt domain
//!
//! Templates for the request sent to the generative planning engine.

mod template;

pub use template::PromptTemplate;
