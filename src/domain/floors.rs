//! Canonical "G+N" floor notation.
//!
//! All floor strings pass through [`FloorSpec::parse`]; estimators only ever
//! see the resolved [`FloorSpec::floor_count`].

use serde::{Serialize, Serializer};
use std::fmt;

/// Ground floor plus `N` additional floors, always rendered as `G+N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorSpec {
    canonical: String,
}

impl FloorSpec {
    /// Canonicalize free-form floor input such as `"3"`, `"g + 2"` or `"Ground+1"`.
    ///
    /// Never fails: input that cannot be understood is kept in `G+...` form
    /// and resolves to a single floor.
    pub fn parse(raw: &str) -> Self {
        let s: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();

        let canonical = if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            // Bare number is a total floor count
            match s.parse::<u32>() {
                Ok(total) if total > 0 => format!("G+{}", total - 1),
                _ => "G+0".to_string(),
            }
        } else if let Some(rest) = s.strip_prefix('G') {
            let rest = rest
                .strip_prefix("ROUND")
                .or_else(|| rest.strip_prefix('F'))
                .unwrap_or(rest);
            with_ground_prefix(rest)
        } else {
            with_ground_prefix(&s)
        };

        Self { canonical }
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Total number of floors including the ground floor (always >= 1).
    pub fn floor_count(&self) -> u32 {
        self.canonical
            .split('+')
            .nth(1)
            .and_then(|additional| additional.parse::<u32>().ok())
            .and_then(|additional| additional.checked_add(1))
            .unwrap_or(1)
    }
}

fn with_ground_prefix(rest: &str) -> String {
    let rest = rest.trim_start_matches('+');
    if rest.is_empty() {
        "G+0".to_string()
    } else {
        format!("G+{rest}")
    }
}

impl Default for FloorSpec {
    fn default() -> Self {
        Self {
            canonical: "G+0".to_string(),
        }
    }
}

impl fmt::Display for FloorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl Serialize for FloorSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bare_numbers_are_total_floor_counts() {
        assert_eq!(FloorSpec::parse("3").canonical(), "G+2");
        assert_eq!(FloorSpec::parse("3").floor_count(), 3);
        assert_eq!(FloorSpec::parse("1").canonical(), "G+0");
        assert_eq!(FloorSpec::parse("0").canonical(), "G+0");
        assert_eq!(FloorSpec::parse("0").floor_count(), 1);
    }

    #[test]
    fn ground_notation_is_case_and_space_insensitive() {
        assert_eq!(FloorSpec::parse("g + 2").canonical(), "G+2");
        assert_eq!(FloorSpec::parse(" G+4 ").floor_count(), 5);
        assert_eq!(FloorSpec::parse("Ground+1").canonical(), "G+1");
        assert_eq!(FloorSpec::parse("GF+3").floor_count(), 4);
        assert_eq!(FloorSpec::parse("G").canonical(), "G+0");
    }

    #[test]
    fn missing_ground_marker_is_prefixed() {
        assert_eq!(FloorSpec::parse("+2").canonical(), "G+2");
        assert_eq!(FloorSpec::parse("+2").floor_count(), 3);
        assert_eq!(FloorSpec::parse("").canonical(), "G+0");
    }

    #[test]
    fn garbage_resolves_to_one_floor() {
        for raw in ["abc", "G+two", "G+-1", "2.5", "99999999999"] {
            assert_eq!(FloorSpec::parse(raw).floor_count(), 1, "input {raw:?}");
        }
    }

    #[test]
    fn only_the_first_addend_counts() {
        assert_eq!(FloorSpec::parse("G+2+1").floor_count(), 3);
    }

    proptest! {
        #[test]
        fn ground_plus_n_has_n_plus_one_floors(n in 0u32..10_000) {
            let spec = FloorSpec::parse(&format!("G+{n}"));
            prop_assert_eq!(spec.floor_count(), n + 1);
            prop_assert_eq!(spec.canonical(), format!("G+{n}"));
        }

        #[test]
        fn bare_count_round_trips(k in 1u32..10_000) {
            let spec = FloorSpec::parse(&k.to_string());
            prop_assert_eq!(spec.floor_count(), k);
            prop_assert_eq!(spec.canonical(), format!("G+{}", k - 1));
            prop_assert_eq!(FloorSpec::parse(spec.canonical()).floor_count(), k);
        }

        #[test]
        fn floor_count_is_never_zero(raw in ".{0,12}") {
            prop_assert!(FloorSpec::parse(&raw).floor_count() >= 1);
        }
    }
}
