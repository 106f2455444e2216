use serde::{Deserialize, Serialize};

/// Directional trend of a price series.
///
/// `Unknown` only exists before a detector has computed its first
/// classification; once a trend resolves it never returns to `Unknown`
/// except through an explicit detector reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendType {
    Up,
    Down,
    Flat,
    #[default]
    Unknown,
}

impl TrendType {
    /// Wire representation (`"UP"`, `"DOWN"`, `"FLAT"`, `"UNKNOWN"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendType::Up => "UP",
            TrendType::Down => "DOWN",
            TrendType::Flat => "FLAT",
            TrendType::Unknown => "UNKNOWN",
        }
    }

    /// Whether a classification has been computed at all.
    pub fn is_known(&self) -> bool {
        *self != TrendType::Unknown
    }
}

impl std::fmt::Display for TrendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(TrendType::default(), TrendType::Unknown);
        assert!(!TrendType::default().is_known());
    }

    #[test]
    fn test_serializes_as_uppercase_literals() {
        assert_eq!(serde_json::to_string(&TrendType::Up).unwrap(), "\"UP\"");
        assert_eq!(serde_json::to_string(&TrendType::Down).unwrap(), "\"DOWN\"");
        assert_eq!(serde_json::to_string(&TrendType::Flat).unwrap(), "\"FLAT\"");
        assert_eq!(
            serde_json::to_string(&TrendType::Unknown).unwrap(),
            "\"UNKNOWN\""
        );
    }

    #[test]
    fn test_display_matches_wire_format() {
        assert_eq!(TrendType::Flat.to_string(), "FLAT");
    }
}
