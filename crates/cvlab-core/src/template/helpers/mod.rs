//! Helper registry
//!
//! Helpers are pure, named functions callable from canonical templates
//! (`{{first title 4}}`, `{{#if (hasItems skills_data)}}`). A registry is an
//! ordinary value; the built-in set is also available as a process-wide
//! immutable instance created once on first use.

mod builtin;

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

pub use builtin::{
    equal, first, has_items, last, nl2br, percentage, preserve_whitespace, substr, year,
};

/// Result of a helper call
#[derive(Debug, Clone, PartialEq)]
pub enum HelperValue {
    /// Ordinary value, HTML-escaped when interpolated
    Plain(Value),
    /// Markup that is emitted verbatim
    Safe(String),
}

impl HelperValue {
    /// View the result as a plain value (safe markup becomes a string)
    pub fn into_value(self) -> Value {
        match self {
            HelperValue::Plain(value) => value,
            HelperValue::Safe(markup) => Value::String(markup),
        }
    }
}

type HelperFn = dyn Fn(&[Value]) -> HelperValue + Send + Sync;

/// A registered helper with its accepted argument range
#[derive(Clone)]
pub struct Helper {
    min_arity: usize,
    max_arity: usize,
    func: Arc<HelperFn>,
}

impl Helper {
    /// Create a helper accepting between `min_arity` and `max_arity` arguments
    pub fn new<F>(min_arity: usize, max_arity: usize, func: F) -> Self
    where
        F: Fn(&[Value]) -> HelperValue + Send + Sync + 'static,
    {
        Self {
            min_arity,
            max_arity: max_arity.max(min_arity),
            func: Arc::new(func),
        }
    }

    /// Whether `count` arguments are accepted
    pub fn accepts(&self, count: usize) -> bool {
        (self.min_arity..=self.max_arity).contains(&count)
    }

    /// Accepted range formatted for error messages
    pub fn arity_label(&self) -> String {
        if self.min_arity == self.max_arity {
            self.min_arity.to_string()
        } else {
            format!("{}..={}", self.min_arity, self.max_arity)
        }
    }

    /// Invoke the helper with already-resolved arguments
    pub fn call(&self, args: &[Value]) -> HelperValue {
        (self.func)(args)
    }
}

impl fmt::Debug for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Helper")
            .field("min_arity", &self.min_arity)
            .field("max_arity", &self.max_arity)
            .finish_non_exhaustive()
    }
}

/// Name → helper table
#[derive(Debug, Clone, Default)]
pub struct HelperRegistry {
    helpers: HashMap<String, Helper>,
}

static BUILTIN: LazyLock<Arc<HelperRegistry>> =
    LazyLock::new(|| Arc::new(HelperRegistry::with_builtins()));

impl HelperRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in helpers
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("percentage", Helper::new(1, 2, builtin::percentage));
        registry.register("hasItems", Helper::new(1, 1, builtin::has_items));
        registry.register("nl2br", Helper::new(1, 1, builtin::nl2br));
        registry.register(
            "preserveWhitespace",
            Helper::new(1, 1, builtin::preserve_whitespace),
        );
        registry.register("substr", Helper::new(2, 3, builtin::substr));
        registry.register("first", Helper::new(2, 2, builtin::first));
        registry.register("last", Helper::new(2, 2, builtin::last));
        registry.register("year", Helper::new(1, 1, builtin::year));
        registry.register("equal", Helper::new(2, 2, builtin::equal));
        registry
    }

    /// Shared built-in registry, constructed once per process
    pub fn builtin() -> Arc<HelperRegistry> {
        Arc::clone(&BUILTIN)
    }

    /// Bind `name` to `helper`
    ///
    /// Returns `false` and keeps the existing binding when the name is taken.
    pub fn register(&mut self, name: &str, helper: Helper) -> bool {
        if self.helpers.contains_key(name) {
            tracing::debug!(helper = name, "helper already registered, keeping first binding");
            return false;
        }
        self.helpers.insert(name.to_string(), helper);
        true
    }

    /// Look up a helper by name
    pub fn get(&self, name: &str) -> Option<&Helper> {
        self.helpers.get(name)
    }

    /// Whether a helper is bound to `name`
    pub fn contains(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    /// Number of registered helpers
    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_registry_has_all_helpers() {
        let registry = HelperRegistry::builtin();
        for name in [
            "percentage",
            "hasItems",
            "nl2br",
            "preserveWhitespace",
            "substr",
            "first",
            "last",
            "year",
            "equal",
        ] {
            assert!(registry.contains(name), "missing helper {}", name);
        }
        assert_eq!(registry.len(), 9);
    }

    #[test]
    fn test_builtin_registry_is_shared() {
        let a = HelperRegistry::builtin();
        let b = HelperRegistry::builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_double_registration_is_noop() {
        let mut registry = HelperRegistry::with_builtins();
        let replaced = registry.register(
            "first",
            Helper::new(0, 0, |_| HelperValue::Plain(json!("shadow"))),
        );
        assert!(!replaced);
        assert_eq!(registry.len(), 9);

        let first = registry.get("first").unwrap();
        assert_eq!(
            first.call(&[json!("abcdef"), json!(2)]),
            HelperValue::Plain(json!("ab"))
        );
    }

    #[test]
    fn test_register_custom_helper() {
        let mut registry = HelperRegistry::new();
        assert!(registry.register(
            "upper",
            Helper::new(1, 1, |args| {
                HelperValue::Plain(json!(crate::template::value::display(&args[0]).to_uppercase()))
            })
        ));
        assert!(registry.contains("upper"));
        assert!(!registry.contains("first"));
    }

    #[test]
    fn test_arity_label() {
        assert_eq!(Helper::new(2, 2, builtin::first).arity_label(), "2");
        assert_eq!(Helper::new(1, 2, builtin::percentage).arity_label(), "1..=2");
        assert!(Helper::new(2, 3, builtin::substr).accepts(3));
        assert!(!Helper::new(2, 3, builtin::substr).accepts(1));
    }
}
