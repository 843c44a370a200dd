//! CLI library components for the kanji dataset builder.

pub mod logging;
pub mod pipeline;
