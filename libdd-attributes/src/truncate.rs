// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Caps `s` at `limit` bytes without splitting a multi-byte character.
///
/// When the limit lands inside an encoded character the cut rounds down to
/// the previous character boundary, so the result may be shorter than
/// `limit` bytes.
pub(crate) fn truncate_utf8(s: &str, limit: usize) -> &str {
    if s.len() <= limit {
        return s;
    }
    let mut end = limit;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
