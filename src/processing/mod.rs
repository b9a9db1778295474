//! Scoring pipeline: anonymization, skill extraction, similarity and aggregation

pub mod analyzer;
pub mod anonymizer;
pub mod batch;
pub mod entities;
pub mod scorer;
pub mod similarity;
pub mod skill_extractor;
pub mod stop_words;
pub mod text_processor;
