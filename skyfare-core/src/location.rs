use serde::{Deserialize, Serialize};

/// Entry of the location directory. Names are opaque matching keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub name: String,
}

/// Lower-cased, trimmed form used on the wire and for comparisons.
pub fn canonical_location(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_location() {
        assert_eq!(canonical_location("  New York "), "new york");
        assert_eq!(canonical_location("PARIS"), "paris");
    }
}
