//! Tests for template engine
//!
//! This module contains comprehensive tests for the template engine,
//! organized into focused submodules for better maintainability.

use super::*;

// Test helper functions
mod helpers;


mod render_escaping;
mod render_helpers;
mod render_sections;
