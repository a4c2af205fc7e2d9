//! Client-side request validation.
//!
//! # Design
//! Every request type exposes `validate()`, composed from small predicate
//! functions that each return a [`Check`]. A [`Validator`] runs the checks
//! for each field in declaration order and keeps the first failing reason
//! per field; every failing field is collected, so one call reports every
//! problem. Nested structures validate themselves and their errors are
//! namespaced under the parent field.
//!
//! Rendering is deterministic: one `Field: reason` line per failing field,
//! in the order the fields were declared. Nested errors render as
//! `Parent: {` followed by tab-indented child lines and a closing `}`.

use std::fmt;
use std::fmt::Display;

/// Outcome of one predicate: `Err` carries the human-readable reason.
pub type Check = Result<(), String>;

/// Aggregate of every failing field of a request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    entries: Vec<(String, Reason)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Reason {
    Message(String),
    Nested(ValidationErrors),
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Names of the failing fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Reason recorded for a top-level field, if it is a plain message.
    pub fn reason(&self, field: &str) -> Option<&str> {
        self.entries.iter().find_map(|(name, reason)| match reason {
            Reason::Message(msg) if name == field => Some(msg.as_str()),
            _ => None,
        })
    }

    /// Errors recorded under a nested field.
    pub fn nested(&self, field: &str) -> Option<&ValidationErrors> {
        self.entries.iter().find_map(|(name, reason)| match reason {
            Reason::Nested(inner) if name == field => Some(inner),
            _ => None,
        })
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for (i, (name, reason)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            let indent = "\t".repeat(depth);
            let label = if name.is_empty() {
                String::new()
            } else {
                format!("{name}: ")
            };
            match reason {
                Reason::Message(msg) => write!(f, "{indent}{label}{msg}")?,
                Reason::Nested(inner) => {
                    writeln!(f, "{indent}{label}{{")?;
                    inner.write_indented(f, depth + 1)?;
                    write!(f, "\n{indent}}}")?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

impl std::error::Error for ValidationErrors {}

/// Collects per-field results for one request.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `checks` for `name`; the first failure is recorded.
    pub fn field<I>(mut self, name: &str, checks: I) -> Self
    where
        I: IntoIterator<Item = Check>,
    {
        if let Some(Err(reason)) = checks.into_iter().find(Result::is_err) {
            self.errors
                .entries
                .push((name.to_string(), Reason::Message(reason)));
        }
        self
    }

    /// Record the outcome of a sub-object's own validation under `name`.
    pub fn nested(mut self, name: &str, result: Result<(), ValidationErrors>) -> Self {
        if let Err(inner) = result {
            self.errors
                .entries
                .push((name.to_string(), Reason::Nested(inner)));
        }
        self
    }

    /// Validate every element of a list; failures are keyed by index.
    pub fn each<'a, T, F>(self, name: &str, items: &'a [T], validate: F) -> Self
    where
        F: Fn(&'a T) -> Result<(), ValidationErrors>,
    {
        let mut inner = ValidationErrors::default();
        for (i, item) in items.iter().enumerate() {
            if let Err(errors) = validate(item) {
                inner.entries.push((i.to_string(), Reason::Nested(errors)));
            }
        }
        if inner.is_empty() {
            self
        } else {
            self.nested(name, Err(inner))
        }
    }

    /// A rule that belongs to the whole request rather than one field.
    pub fn rule(mut self, check: Check) -> Self {
        if let Err(reason) = check {
            self.errors
                .entries
                .push((String::new(), Reason::Message(reason)));
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Values that have an "unset" state.
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.is_none()
    }
}

impl Blank for bool {
    fn is_blank(&self) -> bool {
        !*self
    }
}

macro_rules! blank_int {
    ($($ty:ty),*) => {
        $(impl Blank for $ty {
            fn is_blank(&self) -> bool {
                *self == 0
            }
        })*
    };
}

blank_int!(i32, i64, u32, u64, usize);

impl<T: Blank + ?Sized> Blank for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

pub fn required<T: Blank + ?Sized>(value: &T) -> Check {
    if value.is_blank() {
        Err("cannot be blank".to_string())
    } else {
        Ok(())
    }
}

/// `required` that only applies while `condition` holds.
pub fn required_when<T: Blank + ?Sized>(condition: bool, value: &T) -> Check {
    if condition {
        required(value)
    } else {
        Ok(())
    }
}

/// `value` must be set whenever `other` is set; `other_name` appears in the
/// reason.
pub fn required_with<T, U>(value: &T, other: &U, other_name: &str) -> Check
where
    T: Blank + ?Sized,
    U: Blank + ?Sized,
{
    if value.is_blank() && !other.is_blank() {
        Err(format!("cannot be blank when {other_name} is provided"))
    } else {
        Ok(())
    }
}

/// Zero means "unset" and passes.
pub fn min(value: i64, bound: i64) -> Check {
    if value != 0 && value < bound {
        Err(format!("must be no less than {bound}"))
    } else {
        Ok(())
    }
}

/// Zero means "unset" and passes.
pub fn max(value: i64, bound: i64) -> Check {
    if value != 0 && value > bound {
        Err(format!("must be no greater than {bound}"))
    } else {
        Ok(())
    }
}

/// Blank values pass; pair with `required` when the field is mandatory.
pub fn one_of<T: AsRef<str>>(value: &str, allowed: &[T]) -> Check {
    if value.is_empty() || allowed.iter().any(|a| a.as_ref() == value) {
        Ok(())
    } else {
        Err("must be a valid value".to_string())
    }
}

/// Custom predicate with a fixed reason.
pub fn check(ok: bool, reason: impl Display) -> Check {
    if ok {
        Ok(())
    } else {
        Err(reason.to_string())
    }
}

/// Replace the reason of a failing check.
pub fn with_message(result: Check, reason: &str) -> Check {
    result.map_err(|_| reason.to_string())
}
