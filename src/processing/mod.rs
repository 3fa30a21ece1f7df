//! Text processing and analysis module

pub mod document;
pub mod skill_matcher;
pub mod sections;
pub mod similarity;
pub mod style;
pub mod lint;
pub mod scoring;
pub mod recommendations;
pub mod analyzer;
