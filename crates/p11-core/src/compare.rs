//! Case-insensitive ordering for attribute names.
//!
//! This file is also compiled into `build.rs` so the generated table and the
//! runtime search agree on the exact same ordering. It must not reference
//! anything else in the crate.

use std::cmp::Ordering;

/// Compare two names byte-wise after folding ASCII `A-Z` to `a-z`.
///
/// Matches `strcasecmp` in the POSIX locale: no Unicode folding, and bytes
/// outside the ASCII letter range compare by their raw value. A name that is
/// a prefix of another orders first.
pub fn compare_ignore_ascii_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|byte| byte.to_ascii_lowercase())
        .cmp(b.bytes().map(|byte| byte.to_ascii_lowercase()))
}
