//! URL encoding utilities for constructing safe API paths.
//!
//! Resource ids and names are interpolated into request paths; encoding them
//! keeps a value such as `a/b` from addressing a different resource.
//!
//! # Example
//!
//! ```
//! use keystone_client::endpoints::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("tenant/1"), "tenant%2F1");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters percent-encoded in path segments.
///
/// RFC 3986 path delimiters plus characters that proxies commonly reject.
/// `:` stays literal so extension prefixes such as `OS-KSADM:` survive.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b';')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode `segment` for use as one URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
