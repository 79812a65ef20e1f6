#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Shared helpers for following local `$ref` targets through a raw document tree.
//!
//! These utilities never fetch external documents: only fragment-only references
//! (`#/...`) are considered resolvable.

use percent_encoding::percent_decode_str;
use serde_json::Value;

/// Returns the JSON Pointer part of a local `$ref` (e.g. `#/components/schemas/User`),
/// percent-decoded.
///
/// Returns `None` for references that point outside the current document.
/// The bare fragment `#` yields the empty pointer (the document root).
pub(crate) fn local_pointer(ref_str: &str) -> Option<String> {
    let pointer = ref_str.strip_prefix('#')?;
    if !pointer.is_empty() && !pointer.starts_with('/') {
        return None;
    }
    Some(percent_decode_str(pointer).decode_utf8_lossy().into_owned())
}

/// Resolves a local `$ref` against `root`.
///
/// `~1` / `~0` escapes and array indices are handled by [`Value::pointer`].
/// Any missing segment yields `None`.
pub(crate) fn lookup_pointer<'a>(root: &'a Value, ref_str: &str) -> Option<&'a Value> {
    root.pointer(&local_pointer(ref_str)?)
}
