pub mod catalog;
pub mod field_extraction;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod reclassify;
pub mod tool_extractor;
pub mod validation;
