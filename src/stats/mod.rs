//! Statistics module - Descriptive summaries

mod describe;

pub use describe::{describe, Description};
