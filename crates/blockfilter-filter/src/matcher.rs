//! Include/exclude matching over a single device attribute.
//!
//! Comparison folds case but keeps whitespace, and list entries are never
//! trimmed, so `" QEMU"` does not match `"QEMU"`.

/// Whether `value` equals any candidate, ignoring case.
#[inline]
pub fn matches<S: AsRef<str>>(candidates: &[S], value: &str) -> bool {
    candidates
        .iter()
        .any(|candidate| eq_ignore_case(candidate.as_ref(), value))
}

/// Include predicate: an empty list lets every device through.
#[inline]
pub fn include<S: AsRef<str>>(include_list: &[S], value: &str) -> bool {
    if include_list.is_empty() {
        return true;
    }
    matches(include_list, value)
}

/// Exclude predicate: returns true when the device is *not* excluded.
///
/// An empty list excludes nothing.
#[inline]
pub fn exclude<S: AsRef<str>>(exclude_list: &[S], value: &str) -> bool {
    if exclude_list.is_empty() {
        return true;
    }
    !matches(exclude_list, value)
}

/// Splits a comma separated config value. Empty input gives an empty list.
pub fn split_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(str::to_string).collect()
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
