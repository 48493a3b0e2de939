//! Assertion utilities for testing.
//!
//! Helpers for checking the ordering and shape properties of API responses.

use serde_json::Value;

/// Assert that a sequence of string keys never decreases.
///
/// # Panics
///
/// Panics at the first index where a key is smaller than its predecessor.
pub fn assert_non_decreasing(keys: &[&str]) {
    for (i, pair) in keys.windows(2).enumerate() {
        assert!(
            pair[0] <= pair[1],
            "Sequence decreases at index {}: {} > {}",
            i + 1,
            pair[0],
            pair[1]
        );
    }
}

/// Assert that a value is a JSON number or null.
///
/// # Panics
///
/// Panics for any other JSON type.
pub fn assert_number_or_null(value: &Value, context: &str) {
    assert!(
        value.is_number() || value.is_null(),
        "{}: expected number or null, got {}",
        context,
        value
    );
}

/// Assert that a stats object satisfies `min <= avg <= max`.
///
/// # Panics
///
/// Panics if any of the three fields is missing, non-numeric, or out of order.
pub fn assert_ordered_stats(stats: &Value) {
    let field = |name: &str| {
        stats[name]
            .as_f64()
            .unwrap_or_else(|| panic!("{} missing or not a number in {}", name, stats))
    };
    let (min, avg, max) = (
        field("Min. Temperature"),
        field("Avg. Temperature"),
        field("Max. Temperature"),
    );

    assert!(
        min <= avg && avg <= max,
        "Stats out of order: min = {}, avg = {}, max = {}",
        min,
        avg,
        max
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assert_non_decreasing() {
        assert_non_decreasing(&["2016-08-23", "2016-08-23", "2016-08-24"]);
        assert_non_decreasing(&[]);

        // This would fail: assert_non_decreasing(&["2016-08-24", "2016-08-23"]);
    }

    #[test]
    fn test_assert_ordered_stats() {
        assert_ordered_stats(&json!({
            "Min. Temperature": 58.0,
            "Avg. Temperature": 74.5,
            "Max. Temperature": 87.0
        }));
    }
}
