use std::cmp::Ordering;
use std::path::PathBuf;

/// Human ordering for file names: digit runs compare by value, so `track2`
/// sorts before `track10`. Letters compare case-insensitively; names that only
/// differ in case fall back to a case-sensitive comparison so the order stays
/// total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natord::compare_ignore_case(a, b)
        .then_with(|| natord::compare(a, b))
        .then_with(|| a.cmp(b))
}

pub fn natural_sort(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()));
}
