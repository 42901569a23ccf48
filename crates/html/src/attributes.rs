//! Attribute operations on [`Element`].
//!
//! Keys compare ASCII case-insensitively and keep their first-seen casing. Namespaces compare
//! exactly; the plain methods address the null namespace.

use crate::types::{Attribute, Element};

impl Element {
    pub fn find_attr_ns(&self, namespace: Option<&str>, key: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attr| attr.matches(namespace, key))
    }

    pub fn attr_ns(&self, namespace: Option<&str>, key: &str) -> Option<&str> {
        self.find_attr_ns(namespace, key)
            .map(|attr| attr.value.as_str())
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attr_ns(None, key)
    }

    pub fn has_attr_ns(&self, namespace: Option<&str>, key: &str) -> bool {
        self.find_attr_ns(namespace, key).is_some()
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.has_attr_ns(None, key)
    }

    /// Whether `key` holds `token` as one of its whitespace-separated values.
    pub fn attr_has_token(&self, key: &str, token: &str) -> bool {
        self.attr(key).is_some_and(|value| {
            value
                .split_ascii_whitespace()
                .any(|part| part.eq_ignore_ascii_case(token))
        })
    }

    /// Replaces the value in place, or appends a new attribute.
    pub fn set_attr_ns(&mut self, namespace: Option<&str>, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|attr| attr.matches(namespace, key))
        {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                namespace: namespace.map(str::to_string),
                key: key.to_string(),
                value,
            }),
        }
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        self.set_attr_ns(None, key, value);
    }

    /// Adds `value` after the current value, joined by `sep`.
    ///
    /// Absent or empty attributes are set to `value`. The separator is skipped when the
    /// existing value already ends with it.
    pub fn append_attr_value_ns(
        &mut self,
        namespace: Option<&str>,
        key: &str,
        value: &str,
        sep: &str,
    ) {
        let combined = match self.attr_ns(namespace, key) {
            None | Some("") => value.to_string(),
            Some(existing) if !sep.is_empty() && existing.ends_with(sep) => {
                format!("{existing}{value}")
            }
            Some(existing) => format!("{existing}{sep}{value}"),
        };
        self.set_attr_ns(namespace, key, combined);
    }

    pub fn append_attr_value(&mut self, key: &str, value: &str, sep: &str) {
        self.append_attr_value_ns(None, key, value, sep);
    }

    /// Adds `value` before the current value, joined by `sep`.
    pub fn prepend_attr_value_ns(
        &mut self,
        namespace: Option<&str>,
        key: &str,
        value: &str,
        sep: &str,
    ) {
        let combined = match self.attr_ns(namespace, key) {
            None | Some("") => value.to_string(),
            Some(existing) => format!("{value}{sep}{existing}"),
        };
        self.set_attr_ns(namespace, key, combined);
    }

    pub fn prepend_attr_value(&mut self, key: &str, value: &str, sep: &str) {
        self.prepend_attr_value_ns(None, key, value, sep);
    }

    /// Removes every attribute matching `key`. Returns whether anything was removed.
    pub fn remove_attr_ns(&mut self, namespace: Option<&str>, key: &str) -> bool {
        let before = self.attributes.len();
        self.attributes.retain(|attr| !attr.matches(namespace, key));
        self.attributes.len() != before
    }

    pub fn remove_attr(&mut self, key: &str) -> bool {
        self.remove_attr_ns(None, key)
    }
}
