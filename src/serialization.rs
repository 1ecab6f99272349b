//! serde hooks for values that have no natural JSON form.
//!
//! Anything implementing `Display` (timestamps in particular) is written as
//! its display string, so response records serialize without per-field code.

use std::fmt::Display;

use serde::Serializer;

pub fn display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

pub fn display_opt<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    match value {
        Some(v) => serializer.collect_str(v),
        None => serializer.serialize_none(),
    }
}
