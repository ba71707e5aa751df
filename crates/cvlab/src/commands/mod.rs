//! CLI command implementations

pub mod audit;
pub mod batch;
pub mod render;
pub mod sample;
pub mod translate;
