//! Id formatting and counter inference helpers

/// Format an object id from a counter value
pub fn format_object_id(n: u64) -> String {
    format!("obj-{n}")
}

/// Format a link id from a counter value
pub fn format_link_id(n: u64) -> String {
    format!("link-{n}")
}

/// Parse the trailing run of ASCII digits of an id.
///
/// Works for any id format (`obj-12`, `body12`, `12`); returns `None` when the
/// id does not end in a digit or the number overflows `u64`.
pub fn numeric_suffix(id: &str) -> Option<u64> {
    let digits = id.len() - id.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    id[id.len() - digits..].parse().ok()
}

/// Next counter value for a set of ids: one past the largest numeric suffix,
/// or 1 when no id carries one. `None` when the largest suffix is `u64::MAX`
/// and no further id can be issued.
pub fn infer_next_counter<'a>(ids: impl IntoIterator<Item = &'a str>) -> Option<u64> {
    match ids.into_iter().filter_map(numeric_suffix).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}
