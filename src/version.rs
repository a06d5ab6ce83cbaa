//! Heuristic ordering of dotted version strings.
//!
//! Used to pick the larger of two compiler stamps found in one section. Each
//! dotted component is weighted by a power of ten according to its position,
//! so leading components dominate. A component that is not an integer counts
//! as `-1`, which makes `"2.0"` greater than both `"2.0 alpha1"` and
//! `"2.0.rc1"`. This is not a semantic-versioning comparator: components of
//! ten or more spill into the next position.

/// Weighted magnitude of a version already split into its dotted parts.
///
/// Part `i` of `n` contributes `value(i) * 10^(n - 1 - i)`.
pub fn version_magnitude(parts: &[&str]) -> i64 {
    let n = parts.len();
    parts.iter().enumerate().fold(0i64, |sum, (i, part)| {
        let value = part.parse::<i64>().unwrap_or(-1);
        let weight = 10i64.saturating_pow((n - 1 - i) as u32);
        sum.saturating_add(value.saturating_mul(weight))
    })
}

/// Returns true if version `a` is greater than version `b`.
///
/// The shorter version is padded with `"0"` components first, so `"2"` and
/// `"2.0.0"` compare equal.
pub fn first_is_greater(a: &str, b: &str) -> bool {
    let mut a_parts: Vec<&str> = a.split('.').collect();
    let mut b_parts: Vec<&str> = b.split('.').collect();
    let len = a_parts.len().max(b_parts.len());
    a_parts.resize(len, "0");
    b_parts.resize(len, "0");
    version_magnitude(&a_parts) > version_magnitude(&b_parts)
}
