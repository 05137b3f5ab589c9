// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Bitmask naming every reporting channel an attribute should reach.
///
/// The named constants cover the standard channels, but the enumeration is
/// open: callers may carve out further bits with [`Destinations::from_bits`]
/// and the store will carry them through untouched. The store itself only
/// ever ANDs and ORs these values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Destinations(u32);

impl Destinations {
    /// Matches no channel. Attributes tagged with this mask are retained but
    /// invisible to every read.
    pub const NONE: Destinations = Destinations(0);
    /// Transaction analytics events.
    pub const TRANS_EVENT: Destinations = Destinations(1 << 0);
    /// Transaction traces.
    pub const TRANS_TRACE: Destinations = Destinations(1 << 1);
    /// Error events and traced errors.
    pub const ERROR_EVENT: Destinations = Destinations(1 << 2);
    /// Browser monitoring payloads.
    pub const BROWSER_EVENT: Destinations = Destinations(1 << 3);
    /// Span events.
    pub const SPAN_EVENT: Destinations = Destinations(1 << 4);
    /// Transaction segments.
    pub const TRANS_SEGMENT: Destinations = Destinations(1 << 5);

    /// Every transaction-level channel.
    pub const TRANS_COMMON: Destinations = Destinations(
        Self::TRANS_EVENT.0 | Self::TRANS_TRACE.0 | Self::ERROR_EVENT.0 | Self::BROWSER_EVENT.0,
    );
    /// Every segment-level channel.
    pub const SEGMENT_SCOPE: Destinations =
        Destinations(Self::TRANS_SEGMENT.0 | Self::SPAN_EVENT.0);

    pub const fn from_bits(bits: u32) -> Destinations {
        Destinations(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when the two masks share at least one channel.
    pub const fn intersects(self, other: Destinations) -> bool {
        self.0 & other.0 != 0
    }

    /// True when every channel in `other` is also in `self`.
    pub const fn contains(self, other: Destinations) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Destinations) -> Destinations {
        Destinations(self.0 | other.0)
    }
}

impl BitOr for Destinations {
    type Output = Destinations;

    fn bitor(self, rhs: Destinations) -> Destinations {
        self.union(rhs)
    }
}

impl BitOrAssign for Destinations {
    fn bitor_assign(&mut self, rhs: Destinations) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Destinations {
    type Output = Destinations;

    fn bitand(self, rhs: Destinations) -> Destinations {
        Destinations(self.0 & rhs.0)
    }
}

impl From<u32> for Destinations {
    fn from(bits: u32) -> Destinations {
        Destinations(bits)
    }
}

impl fmt::Debug for Destinations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Destinations({:#04x})", self.0)
    }
}

/// Capability resolving the channels an attribute may actually reach, given
/// the channels its call site asked for.
///
/// Include/exclude rule configuration lives behind this seam; the store never
/// interprets key names itself. See [`AttributeStore::add_filtered`].
///
/// [`AttributeStore::add_filtered`]: crate::AttributeStore::add_filtered
pub trait AttributeFilter {
    fn resolve(&self, requested: Destinations, key: &str) -> Destinations;
}

impl<F> AttributeFilter for F
where
    F: Fn(Destinations, &str) -> Destinations,
{
    fn resolve(&self, requested: Destinations, key: &str) -> Destinations {
        self(requested, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_masks_intersect_their_members() {
        assert!(Destinations::TRANS_COMMON.intersects(Destinations::ERROR_EVENT));
        assert!(Destinations::TRANS_COMMON.contains(Destinations::TRANS_EVENT));
        assert!(!Destinations::TRANS_COMMON.intersects(Destinations::SPAN_EVENT));
        assert!(Destinations::SEGMENT_SCOPE.contains(Destinations::SPAN_EVENT));
    }

    #[test]
    fn test_operators_match_raw_bits() {
        let mask = Destinations::TRANS_EVENT | Destinations::SPAN_EVENT;
        assert_eq!(mask.bits(), 0x11);
        assert_eq!((mask & Destinations::SPAN_EVENT).bits(), 0x10);

        let mut accum = Destinations::NONE;
        accum |= Destinations::TRANS_TRACE;
        accum |= Destinations::from_bits(1 << 9);
        assert!(accum.intersects(Destinations::from_bits(1 << 9)));
        assert!(!accum.is_empty());
    }

    #[test]
    fn test_none_matches_nothing() {
        assert!(!Destinations::NONE.intersects(Destinations::TRANS_COMMON));
        assert!(Destinations::NONE.is_empty());
        assert_eq!(Destinations::default(), Destinations::NONE);
    }

    #[test]
    fn test_debug_is_hex() {
        assert_eq!(
            format!("{:?}", Destinations::TRANS_TRACE),
            "Destinations(0x02)"
        );
    }
}
