//! Completion API adapters

pub mod openai;

pub use openai::OpenAiCompletion;
