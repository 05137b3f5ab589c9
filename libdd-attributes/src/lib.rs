// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Bounded attribute storage for telemetry units.
//!
//! Each transaction or span owns an [`AttributeStore`]: a capped collection of
//! key/value pairs where every pair carries a [`Destinations`] mask naming the
//! reporting channels it should reach. Call sites add attributes freely during
//! the unit's lifetime; when a payload for one channel is assembled,
//! [`AttributeStore::get`] extracts the matching subset with oversized text
//! capped on the way out.
//!
//! Admission never fails loudly. An attribute with an oversized key, an
//! unsupported value type, or no room left in the store is dropped without an
//! error reaching the caller, so instrumentation can attach diagnostics
//! without gaining a new failure path.
//!
//! A store is owned by exactly one telemetry unit. Mutation takes `&mut self`;
//! units whose processing model allows concurrent adds wrap the store in a
//! `Mutex`.
//!
//! ```
//! use libdd_attributes::{AttributeStore, Destinations};
//!
//! let mut store = AttributeStore::with_limit("transaction", 64);
//! store.add_attribute(Destinations::TRANS_COMMON, "http.status_code", 200);
//! store.add_attribute(Destinations::SPAN_EVENT, "db.statement", "SELECT 1");
//!
//! let event_attributes = store.get(Destinations::TRANS_EVENT);
//! assert!(event_attributes.contains_key("http.status_code"));
//! assert!(!event_attributes.contains_key("db.statement"));
//! ```

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod destination;
pub mod store;
mod truncate;
pub mod value;

pub use destination::{AttributeFilter, Destinations};
pub use store::{AttributeStore, Entry, MAX_KEY_BYTES, MAX_VALUE_BYTES};
pub use value::AttributeValue;
