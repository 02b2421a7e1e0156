//! API version parsing.
//!
//! The server reports its version as `"major.minor.patch"`; callers compare
//! versions as a single integer `major * 10000 + minor * 100 + patch`, so
//! `"5.4.0"` becomes `50400`.

use crate::error::{ClientError, ClientResult};

/// Parses a dotted version string into its integer form.
///
/// Suffixes such as `"7.0.0rc1"` are ignored. A missing patch component
/// counts as zero.
pub fn parse_api_version(raw: &str) -> ClientResult<u32> {
    let invalid = || ClientError::InvalidVersion(raw.to_string());

    let mut parts = raw.trim().split('.').map(leading_number);
    let major = parts.next().flatten().ok_or_else(invalid)?;
    let minor = parts.next().flatten().ok_or_else(invalid)?;
    let patch = parts.next().flatten().unwrap_or(0);

    if minor > 99 || patch > 99 {
        return Err(invalid());
    }
    major
        .checked_mul(10_000)
        .and_then(|v| v.checked_add(minor * 100 + patch))
        .ok_or_else(invalid)
}

fn leading_number(part: &str) -> Option<u32> {
    let end = part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(part.len());
    part[..end].parse().ok()
}
