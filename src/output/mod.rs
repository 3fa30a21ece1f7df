//! Report rendering and persistence

pub mod formatter;
pub mod report;
