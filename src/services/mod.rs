pub mod answer_key;
pub mod classifier;
pub mod enrichment_parser;
pub mod llm_service;
pub mod prompt_builder;
pub mod segmenter;
pub mod workbook_writer;

pub use llm_service::{ChatBackend, ChatRequest, LlmService};
