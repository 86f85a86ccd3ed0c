//! Render options and the streaming overlay pipeline.

pub mod opts;
pub mod pipeline;
