//! Project configuration (`cvlab.toml`)

pub mod consts;
mod model;

pub use model::{BatchConfig, Config, PreviewConfig, StoreConfig};
