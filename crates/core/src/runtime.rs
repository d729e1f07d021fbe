//! Movie running time in whole minutes.
//!
//! On the wire a runtime is a JSON string such as `"102 min"`; in memory
//! and in the database it is a plain `i32`.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unit suffix of the textual form.
pub const RUNTIME_UNIT: &str = "min";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid runtime format")]
pub struct InvalidRuntimeFormat;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Runtime(i32);

impl Runtime {
    pub const fn new(minutes: i32) -> Self {
        Self(minutes)
    }

    pub const fn minutes(self) -> i32 {
        self.0
    }
}

impl From<i32> for Runtime {
    fn from(minutes: i32) -> Self {
        Self(minutes)
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {RUNTIME_UNIT}", self.0)
    }
}

impl FromStr for Runtime {
    type Err = InvalidRuntimeFormat;

    /// Parse `"<minutes> min"`: exactly one space, the exact unit, and a
    /// base-10 `i32`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(' ').collect();
        let [minutes, unit] = parts.as_slice() else {
            return Err(InvalidRuntimeFormat);
        };
        if *unit != RUNTIME_UNIT {
            return Err(InvalidRuntimeFormat);
        }
        minutes
            .parse::<i32>()
            .map(Runtime)
            .map_err(|_| InvalidRuntimeFormat)
    }
}

impl Serialize for Runtime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Runtime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(RuntimeVisitor)
    }
}

struct RuntimeVisitor;

impl Visitor<'_> for RuntimeVisitor {
    type Value = Runtime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a string of the form \"<minutes> {RUNTIME_UNIT}\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Runtime, E> {
        v.parse().map_err(E::custom)
    }
}
