//! Constants shared across the crate

/// Page geometry of the rendered document
pub mod page {
    /// A4 width in millimetres
    pub const A4_WIDTH_MM: u32 = 210;
}

/// File names used by stores and outputs
pub mod files {
    /// Project configuration file looked up in the working directory
    pub const CONFIG_FILE: &str = "cvlab.toml";

    /// Default template store
    pub const DEFAULT_STORE: &str = "templates.json";

    /// Default batch output directory
    pub const DEFAULT_OUTPUT_DIR: &str = "media/templates";

    /// Template markup inside a directory store entry
    pub const TEMPLATE_HTML: &str = "template.html";

    /// Template stylesheet inside a directory store entry
    pub const TEMPLATE_CSS: &str = "template.css";

    /// Template metadata inside a directory store entry
    pub const TEMPLATE_META: &str = "meta.toml";

    /// Extension of rendered documents
    pub const OUTPUT_EXTENSION: &str = "html";
}

/// Preview defaults
pub mod preview {
    /// Shown when no render has succeeded yet
    pub const FALLBACK_MESSAGE: &str = "Preview unavailable";
}
