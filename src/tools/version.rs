//! Version extraction and comparison.
//!
//! Parsing is permissive: a component that is not a non-negative integer
//! counts as `0` instead of failing the comparison. `"3.x"` therefore
//! compares like `"3.0"`.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// First `MAJOR.MINOR.PATCH` run of digits in a probe's output.
static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+\.\d+)").expect("valid version regex"));

/// Extract the first three-component dotted version from tool output.
///
/// `"gcc (GCC) 9.4.0"` yields `Some("9.4.0")`, `"v18.17.1"` yields
/// `Some("18.17.1")`. Output with no such substring yields `None`.
pub fn extract_version(output: &str) -> Option<String> {
    VERSION_REGEX
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn parse_components(version: &str) -> Vec<u64> {
    version
        .trim()
        .split('.')
        .map(|part| part.trim().parse::<u64>().unwrap_or(0))
        .collect()
}

/// Compare two dotted versions component by component.
///
/// Missing trailing components are treated as `0`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a = parse_components(a);
    let b = parse_components(b);

    for i in 0..a.len().max(b.len()) {
        let l = a.get(i).copied().unwrap_or(0);
        let r = b.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Whether `actual` is at least `required`.
pub fn meets_minimum(actual: &str, required: &str) -> bool {
    compare_versions(actual, required) != Ordering::Less
}
