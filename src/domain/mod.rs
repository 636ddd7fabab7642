//! Core domain types and logic.

pub mod instrument;
pub mod series;
pub mod indicator;
pub mod export;
pub mod chart;
pub mod pipeline;
pub mod error;
