//! # Roster Options
//!
//! Some components of the engine accept optional configuration that changes their behavior. An
//! example would be fixing the number of pools instead of deriving it from the participants.
//!
//! This module provides this kind of configuration via [`RosterOption`] using a key-value map.
//! [`OptionValue`] contains all types supported. A component describes the options it accepts
//! using [`RosterOptions`] (usually built with a [`Builder`]), callers pass plain
//! [`RosterOptionValues`].
#[cfg(feature = "serde")]
mod serde_impl;

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown key {0}")]
    UnknownKey(String),
    #[error("invalid value for {key}: expected {expected}, found {found}")]
    InvalidValue {
        key: String,
        found: &'static str,
        expected: &'static str,
    },
}

/// A list of options accepted by a component, including a human readable name and the default
/// value of every option. [`RosterOptionValues`] should be used when just expecting a list of
/// key-value pairs.
#[derive(Clone, Debug, Default)]
pub struct RosterOptions(HashMap<String, RosterOption>);

impl RosterOptions {
    /// Creates a new [`Builder`].
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Inserts a new [`RosterOption`] with the provided `key`, overwriting the previous value
    /// if it exists.
    pub fn insert<K>(&mut self, key: K, option: RosterOption)
    where
        K: ToString,
    {
        self.0.insert(key.to_string(), option);
    }

    /// Returns all [`RosterOption`]s sorted by their key.
    pub fn sorted(&self) -> Vec<(&str, &RosterOption)> {
        let mut options: Vec<_> = self
            .0
            .iter()
            .map(|(key, option)| (key.as_str(), option))
            .collect();

        options.sort_unstable_by_key(|(key, _)| *key);
        options
    }
}

impl From<RosterOptions> for RosterOptionValues {
    fn from(options: RosterOptions) -> Self {
        Self(
            options
                .0
                .into_iter()
                .map(|(key, option)| (key, option.value))
                .collect(),
        )
    }
}

/// A list of optional key-values which only contains the values.
///
/// With the `serde` feature enabled, values deserialize from a plain map, e.g.
/// `{"pool_count": 4, "pool_prefix": "Group"}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RosterOptionValues(HashMap<String, OptionValue>);

impl RosterOptionValues {
    /// Creates a new empty list of values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self, key: &str) -> Option<OptionValue> {
        self.0.remove(key)
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: ToString,
        V: Into<OptionValue>,
    {
        self.0.insert(key.to_string(), value.into());
    }

    /// Validates the values against the accepted `options` and fills all missing keys with the
    /// defaults from `options`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if a key is not accepted by `options` or if a value has a different
    /// type than its default.
    pub fn merge(mut self, mut options: RosterOptions) -> Result<Self, Error> {
        for (key, value) in self.0.iter() {
            let default_value = match options.0.remove(key) {
                Some(value) => value,
                None => return Err(Error::UnknownKey(key.to_owned())),
            };

            if default_value.value.value_type() != value.value_type() {
                return Err(Error::InvalidValue {
                    key: key.to_owned(),
                    found: value.value_type(),
                    expected: default_value.value.value_type(),
                });
            }
        }

        for (key, option) in options.0.into_iter() {
            self.0.insert(key, option.value);
        }

        Ok(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterOption {
    pub name: String,
    pub value: OptionValue,
}

/// The value of a [`RosterOption`]. All numeric options are unsigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    U64(u64),
    String(String),
}

impl OptionValue {
    /// Returns the name of the type of this value.
    pub fn value_type(&self) -> &'static str {
        match self {
            Self::U64(_) => "u64",
            Self::String(_) => "string",
        }
    }

    /// Returns the contained [`U64`] value or the provided default.
    ///
    /// # Examples
    ///
    /// ```
    /// # use roster_core::options::OptionValue;
    /// let val = OptionValue::U64(5);
    /// assert_eq!(val.unwrap_u64_or(0), 5);
    ///
    /// let val = OptionValue::from("five");
    /// assert_eq!(val.unwrap_u64_or(0), 0);
    /// ```
    ///
    /// [`U64`]: Self::U64
    #[inline]
    pub fn unwrap_u64_or(self, default: u64) -> u64 {
        match self {
            Self::U64(val) => val,
            Self::String(_) => default,
        }
    }

    /// Returns the contained [`String`] or computes it from the provided closure.
    ///
    /// [`String`]: Self::String
    #[inline]
    pub fn unwrap_string_or_else<F>(self, f: F) -> String
    where
        F: FnOnce() -> String,
    {
        match self {
            Self::String(val) => val,
            Self::U64(_) => f(),
        }
    }
}

impl Display for OptionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::U64(val) => Display::fmt(val, f),
            Self::String(val) => write!(f, "{:?}", val),
        }
    }
}

impl From<u64> for OptionValue {
    #[inline]
    fn from(value: u64) -> Self {
        Self::U64(value)
    }
}

impl<'a> From<&'a str> for OptionValue {
    #[inline]
    fn from(value: &'a str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for OptionValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// A builder for [`RosterOptions`].
#[derive(Clone, Debug, Default)]
pub struct Builder {
    options: RosterOptions,
}

impl Builder {
    /// Inserts a new [`RosterOption`]. If the `key` already exists, it is overwritten.
    pub fn option<T, V>(mut self, key: &'static str, name: T, value: V) -> Self
    where
        T: ToString,
        V: Into<OptionValue>,
    {
        self.options.insert(
            key,
            RosterOption {
                name: name.to_string(),
                value: value.into(),
            },
        );
        self
    }

    /// Consumes the `Builder`, returning the collected [`RosterOptions`].
    #[inline]
    pub fn build(self) -> RosterOptions {
        self.options
    }
}
