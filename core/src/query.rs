//! Deterministic query-string construction.
//!
//! Keys are kept in a `BTreeMap`, so the encoded string is always sorted by
//! key. Values are form-urlencoded (space becomes `+`); list values are
//! encoded item by item and joined with a literal `,`.
//!
//! Optional parameters are skipped when zero-valued. Flags that an endpoint
//! always sends use [`Query::flag`]; flags sent only when set use
//! [`Query::flag_if_true`] or [`Query::flag_if_false`].

use std::collections::BTreeMap;

use url::form_urlencoded::byte_serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<&'static str, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Single(String),
    List(Vec<String>),
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always emitted, even when empty.
    pub fn set(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.insert(key, Value::Single(value.into()));
        self
    }

    /// Emitted only when `value` is non-empty.
    pub fn text(self, key: &'static str, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.set(key, value)
        }
    }

    /// Emitted only when `value` is non-zero.
    pub fn number(self, key: &'static str, value: i64) -> Self {
        if value == 0 {
            self
        } else {
            self.set(key, value.to_string())
        }
    }

    /// Always emitted as `true` or `false`.
    pub fn flag(self, key: &'static str, value: bool) -> Self {
        self.set(key, value.to_string())
    }

    /// Emitted as `true` only when set.
    pub fn flag_if_true(self, key: &'static str, value: bool) -> Self {
        if value {
            self.set(key, "true")
        } else {
            self
        }
    }

    /// Emitted as `false` only when cleared.
    pub fn flag_if_false(self, key: &'static str, value: bool) -> Self {
        if value {
            self
        } else {
            self.set(key, "false")
        }
    }

    /// Comma-joined into a single parameter; omitted when empty.
    pub fn list<S: AsRef<str>>(mut self, key: &'static str, values: &[S]) -> Self {
        if !values.is_empty() {
            let items = values.iter().map(|v| v.as_ref().to_string()).collect();
            self.params.insert(key, Value::List(items));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn encode(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::Single(v) => encode(v),
                    Value::List(items) => items
                        .iter()
                        .map(|item| encode(item))
                        .collect::<Vec<_>>()
                        .join(","),
                };
                format!("{}={}", encode(key), value)
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}
