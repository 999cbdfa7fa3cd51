//! Tolerant version parsing and comparison.
//!
//! Tools report versions in many shapes: `3.11.2`, `3.12.0rc1`,
//! `2.43.0.windows.1`, `v20.11.0`, or a banner such as
//! `Version 19.40.33811 for x64`. A [`Version`] keeps only the leading
//! dotted numeric components; anything after them is ignored for ordering.
//! Missing trailing components compare as zero, so `3.10 == 3.10.0`.
//!
//! # Example
//!
//! ```
//! use buildready::requirements::version::{satisfies_minimum, Version};
//!
//! assert_eq!(Version::parse("3.10"), Version::parse("3.10.0"));
//! assert!(Version::parse("3.9.12") < Version::parse("3.10.0"));
//! assert!(satisfies_minimum("3.11.2", "3.10.0"));
//! assert!(!satisfies_minimum("not a version", "3.10.0"));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Patterns tried in order when pulling a version out of tool output.
const VERSION_PATTERNS: &[&str] = &[
    r"(\d+\.\d+\.\d+)",
    r"(?i)version\s+(\d+\.\d+)",
    r"v(\d+\.\d+)",
    r"\b(\d+\.\d+)\b",
];

static VERSION_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    VERSION_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// A dotted numeric version.
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    /// Parse the leading dotted numeric part of `input`.
    ///
    /// Surrounding whitespace and a leading `v` are ignored, as is any
    /// suffix after the numeric components. Returns `None` when `input`
    /// does not start with a number or a component overflows `u64`.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let trimmed = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let mut components = Vec::new();
        for part in trimmed.split('.') {
            let digits: &str = &part[..part
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(part.len())];
            if digits.is_empty() {
                break;
            }
            // All digits, so the only failure left is overflow.
            let Ok(value) = digits.parse::<u64>() else {
                return None;
            };
            components.push(value);
            if digits.len() != part.len() {
                break;
            }
        }

        if components.is_empty() {
            None
        } else {
            Some(Self { components })
        }
    }

    /// The parsed components, as written.
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    fn component(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or(0)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Compare two version strings. `None` if either side is unparsable.
pub fn compare_versions(a: &str, b: &str) -> Option<Ordering> {
    Some(Version::parse(a)?.cmp(&Version::parse(b)?))
}

/// Whether `actual >= minimum`. Fails closed: any unparsable input is
/// "not satisfied".
pub fn satisfies_minimum(actual: &str, minimum: &str) -> bool {
    matches!(
        compare_versions(actual, minimum),
        Some(Ordering::Greater | Ordering::Equal)
    )
}

/// Extract a version string from command output.
pub fn extract_version(output: &str) -> Option<String> {
    VERSION_REGEXES.iter().find_map(|re| {
        re.captures(output)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn missing_components_are_zero() {
        assert_eq!(v("3.10"), v("3.10.0"));
        assert_eq!(v("3"), v("3.0.0"));
    }

    #[test]
    fn numeric_not_lexicographic_ordering() {
        assert!(v("3.9.12") < v("3.10.0"));
        assert!(v("10.0") > v("9.99.99"));
    }

    #[test]
    fn overflowing_component_is_unparsable() {
        assert!(Version::parse("3.99999999999999999999").is_none());
        assert!(!satisfies_minimum("3.99999999999999999999", "3.10"));
        assert!(!satisfies_minimum("3.12", "99999999999999999999"));
        assert_eq!(v("3.18446744073709551615"), v("3.18446744073709551615.0"));
    }

    #[test]
    fn suffixes_are_ignored() {
        assert_eq!(v("3.12.0rc1"), v("3.12.0"));
        assert_eq!(v("2.43.0.windows.1"), v("2.43.0"));
        assert_eq!(v("19.40.33811 for x64"), v("19.40.33811"));
    }

    #[test]
    fn whitespace_and_v_prefix_are_ignored() {
        assert_eq!(v("  3.11.2\n"), v("3.11.2"));
        assert_eq!(v("v20.11.0"), v("20.11.0"));
    }

    #[test]
    fn unparsable_inputs() {
        assert!(Version::parse("").is_none());
        assert!(Version::parse("   ").is_none());
        assert!(Version::parse("unknown").is_none());
        assert!(Version::parse(".5").is_none());
    }

    #[test]
    fn trailing_dot_keeps_parsed_prefix() {
        assert_eq!(v("3.10."), v("3.10"));
    }

    #[test]
    fn ordering_is_antisymmetric_and_transitive() {
        let versions = ["1", "1.0.1", "1.2", "1.10", "2.0.0", "2.0.0.1", "10"];
        for a in versions {
            for b in versions {
                assert_eq!(v(a).cmp(&v(b)), v(b).cmp(&v(a)).reverse(), "{a} vs {b}");
                for c in versions {
                    if v(a) <= v(b) && v(b) <= v(c) {
                        assert!(v(a) <= v(c), "{a} <= {b} <= {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn compare_versions_fails_on_garbage() {
        assert_eq!(compare_versions("3.10", "3.10.0"), Some(Ordering::Equal));
        assert_eq!(compare_versions("garbage", "3.10"), None);
        assert_eq!(compare_versions("3.10", "garbage"), None);
    }

    #[test]
    fn satisfies_minimum_fails_closed() {
        assert!(satisfies_minimum("3.11.2", "3.10.0"));
        assert!(satisfies_minimum("3.10", "3.10.0"));
        assert!(!satisfies_minimum("3.9.12", "3.10.0"));
        assert!(!satisfies_minimum("", "3.10.0"));
        assert!(!satisfies_minimum("Python", "3.10.0"));
        assert!(!satisfies_minimum("3.11.2", "latest"));
    }

    #[test]
    fn display_shows_parsed_components() {
        assert_eq!(v("v3.11.2rc1").to_string(), "3.11.2");
    }

    #[test]
    fn extract_version_from_tool_banners() {
        assert_eq!(
            extract_version("Python 3.11.2"),
            Some("3.11.2".to_string())
        );
        assert_eq!(
            extract_version("git version 2.43.0.windows.1"),
            Some("2.43.0".to_string())
        );
        assert_eq!(
            extract_version("pip 24.0 from /usr/lib/python3/dist-packages/pip (python 3.12)"),
            Some("24.0".to_string())
        );
        assert_eq!(
            extract_version(
                "Microsoft (R) C/C++ Optimizing Compiler Version 19.40.33811 for x64"
            ),
            Some("19.40.33811".to_string())
        );
        assert_eq!(extract_version("v18.17"), Some("18.17".to_string()));
    }

    #[test]
    fn extract_version_no_match() {
        assert!(extract_version("no version here").is_none());
        assert!(extract_version("").is_none());
    }
}
