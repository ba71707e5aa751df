// Core modules
pub mod audit;
pub mod batch;
pub mod config;
pub mod document;
pub mod error;
pub mod preview;
pub mod resume;
pub mod store;
pub mod template;

// Re-export commonly used types
pub use error::{CvlabError, Result};
pub use resume::{build_context, CvData};
pub use template::{render, Engine, TemplateError};
