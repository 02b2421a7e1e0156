//! Version- and type-dependent defaults.

use itemsync_model::ValueType;

/// Trend retention used when nothing else applies.
pub const DEFAULT_TRENDS: &str = "365d";

/// Trend retention meaning "keep no trends".
pub const TRENDS_DISABLED: &str = "0";

/// First API version that accepts disabled trends for textual items.
pub const TRENDS_OPTIONAL_SINCE: u32 = 50_400;

/// Returns the trends default for a value type on a given server.
///
/// Textual values (text, log) have no trends, and servers from 5.4 expect
/// that spelled out as `"0"`. Older servers and numeric types get `"365d"`.
pub fn default_trends(api_version: u32, value_type: ValueType) -> &'static str {
    if api_version >= TRENDS_OPTIONAL_SINCE && value_type.is_textual() {
        TRENDS_DISABLED
    } else {
        DEFAULT_TRENDS
    }
}

/// An explicit, non-empty value wins over the default.
pub fn resolve_trends(explicit: Option<&str>, api_version: u32, value_type: ValueType) -> String {
    match explicit {
        Some(trends) if !trends.is_empty() => trends.to_string(),
        _ => default_trends(api_version, value_type).to_string(),
    }
}
