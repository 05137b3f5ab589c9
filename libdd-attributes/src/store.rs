// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::destination::{AttributeFilter, Destinations};
use crate::value::AttributeValue;

/// Longest admissible key, in bytes of its UTF-8 form.
pub const MAX_KEY_BYTES: usize = 255;
/// Longest text value a read will return, in bytes of its UTF-8 form.
pub const MAX_VALUE_BYTES: usize = 255;

/// A stored attribute: its value plus the mask of channels it should reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub value: AttributeValue,
    pub destinations: Destinations,
}

/// Why an attribute did not make it into the store.
///
/// Admission is silent by contract; these only feed the debug log.
#[derive(Debug, PartialEq, Eq)]
enum RejectReason {
    /// Key exceeds [`MAX_KEY_BYTES`] in encoded form.
    OversizedKey(usize),
    /// The store already holds `limit` distinct keys and this key is new.
    CapacityExceeded,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::OversizedKey(len) => {
                write!(f, "key is {len} bytes, limit is {MAX_KEY_BYTES}")
            }
            RejectReason::CapacityExceeded => write!(f, "attribute limit reached"),
        }
    }
}

/// Bounded collection of attributes attached to one telemetry unit.
///
/// Keys keep their insertion order; overwriting an existing key keeps its
/// original position. [`get`] filters by destination mask overlap and caps
/// oversized text in the returned copy, leaving stored values untouched.
///
/// The store is built for reuse: a pooled unit calls [`reset`] between uses
/// instead of reallocating.
///
/// [`get`]: AttributeStore::get
/// [`reset`]: AttributeStore::reset
#[derive(Debug, Clone)]
pub struct AttributeStore {
    scope: String,
    limit: usize,
    entries: IndexMap<String, Entry>,
}

impl AttributeStore {
    /// Creates a store with no practical bound on the number of keys.
    pub fn new(scope: impl Into<String>) -> AttributeStore {
        AttributeStore::with_limit(scope, usize::MAX)
    }

    /// Creates a store retaining at most `limit` distinct keys.
    ///
    /// `scope` labels the kind of unit that owns the store ("transaction",
    /// "segment", ...) and only ever shows up in diagnostics.
    pub fn with_limit(scope: impl Into<String>, limit: usize) -> AttributeStore {
        AttributeStore {
            scope: scope.into(),
            limit,
            entries: IndexMap::new(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Records `value` for every channel in `destinations`.
    ///
    /// Admission can fail (oversized key, store at capacity for a new key);
    /// failures never surface to the caller, so instrumentation call sites
    /// cannot gain a new failure path from attaching diagnostics. A rejected
    /// attribute is simply absent from later reads.
    pub fn add_attribute(
        &mut self,
        destinations: Destinations,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) {
        self.admit(destinations, key.into(), value.into());
    }

    /// Bulk form of [`add_attribute`]. Pairs are admitted in iteration order
    /// against the cumulative state: an earlier pair can take the last free
    /// slot and cause a later new key in the same call to be dropped, while
    /// its other siblings still land on their own merits.
    ///
    /// [`add_attribute`]: AttributeStore::add_attribute
    pub fn add_attributes<K, V>(
        &mut self,
        destinations: Destinations,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        for (key, value) in attributes {
            self.admit(destinations, key.into(), value.into());
        }
    }

    /// Records one dynamically-typed value.
    ///
    /// Strings, numbers, and booleans are admitted like [`add_attribute`];
    /// null, arrays, objects, and every other shape are dropped.
    ///
    /// [`add_attribute`]: AttributeStore::add_attribute
    pub fn add_json_attribute(
        &mut self,
        destinations: Destinations,
        key: impl Into<String>,
        value: &Value,
    ) {
        let key = key.into();
        match AttributeValue::from_json(value) {
            Some(value) => self.admit(destinations, key, value),
            None => debug!(
                scope = %self.scope,
                key = %key,
                "Attribute rejected, unsupported value type"
            ),
        }
    }

    /// Bulk dynamic form: admits the conforming subset of `attributes`,
    /// skipping offending keys individually.
    pub fn add_json_attributes<'a>(
        &mut self,
        destinations: Destinations,
        attributes: impl IntoIterator<Item = (&'a String, &'a Value)>,
    ) {
        for (key, value) in attributes {
            self.add_json_attribute(destinations, key.as_str(), value);
        }
    }

    /// Records `value` with its channels resolved through `filter` instead of
    /// taken verbatim from the call site.
    ///
    /// A key the filter silences entirely (resolves to [`Destinations::NONE`])
    /// is still stored; it just matches no read.
    pub fn add_filtered(
        &mut self,
        filter: &impl AttributeFilter,
        requested: Destinations,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) {
        let key = key.into();
        let destinations = filter.resolve(requested, &key);
        self.admit(destinations, key, value.into());
    }

    fn admit(&mut self, destinations: Destinations, key: String, value: AttributeValue) {
        if let Err((key, reason)) = self.try_add(destinations, key, value) {
            debug!(
                scope = %self.scope,
                key = %key,
                reason = %reason,
                "Attribute rejected"
            );
        }
    }

    /// Validation and insertion as one unit, so the capacity invariant holds
    /// across the check and the write. Hands the key back on rejection for
    /// the caller's log line.
    fn try_add(
        &mut self,
        destinations: Destinations,
        key: String,
        value: AttributeValue,
    ) -> Result<(), (String, RejectReason)> {
        if key.len() > MAX_KEY_BYTES {
            let len = key.len();
            return Err((key, RejectReason::OversizedKey(len)));
        }
        if self.entries.len() >= self.limit && !self.entries.contains_key(&key) {
            return Err((key, RejectReason::CapacityExceeded));
        }
        // IndexMap keeps the original position on overwrite, which first-N
        // selection in `get` relies on.
        let entry = Entry {
            value,
            destinations,
        };
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Extracts a fresh copy of everything visible to `destinations`.
    ///
    /// An entry matches when its stored mask shares any bit with the request.
    /// Matches come back in insertion order, at most `limit` of them; text
    /// longer than [`MAX_VALUE_BYTES`] is capped in the copy on a character
    /// boundary. Stored entries are never modified by a read, and a
    /// destination nothing was tagged for yields an empty map.
    pub fn get(&self, destinations: Destinations) -> IndexMap<String, AttributeValue> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.destinations.intersects(destinations))
            .take(self.limit)
            .map(|(key, entry)| (key.clone(), entry.value.truncated(MAX_VALUE_BYTES)))
            .collect()
    }

    /// Drops every entry, keeping scope and limit.
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}
