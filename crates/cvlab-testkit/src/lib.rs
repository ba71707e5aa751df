//! Test utilities for cvlab
//!
//! This crate provides shared testing utilities used across the cvlab workspace.

pub mod fixtures;

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the current directory
///
/// Test output stays next to the crate under test, in a location that is
/// gitignored and easy to clean up by hand. The directory is removed when
/// the returned `TempDir` is dropped.
///
/// # Panics
///
/// Panics if the current directory is unknown or `.tmp/` cannot be created.
///
/// # Examples
///
/// ```rust
/// use cvlab_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("template.html");
/// std::fs::write(&file_path, "<p>{{full_name}}</p>").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let tmp_base = std::env::current_dir()?.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
