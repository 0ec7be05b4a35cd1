//! String normalization shared by every portal mapping.

/// Trim `value` and map blank strings to `None`.
///
/// Portals disagree on how they send "no value": some omit the field, some
/// send `null`, some send `""`. All three collapse to `None` here.
pub fn normalize_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
