use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

/// Learner proficiency. Unknown or missing values read as intermediate.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown proficiency level '{0}'")]
pub struct UnknownLevel(pub String);

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }

    /// Approximate CEFR band, used in prompts.
    pub fn cefr(self) -> &'static str {
        match self {
            Level::Beginner => "A1-A2",
            Level::Intermediate => "B1-B2",
            Level::Advanced => "C1-C2",
        }
    }

    pub fn parse_lossy(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            _ => Err(UnknownLevel(raw.to_string())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Beginner".parse::<Level>(), Ok(Level::Beginner));
        assert_eq!(" ADVANCED ".parse::<Level>(), Ok(Level::Advanced));
        assert!("expert".parse::<Level>().is_err());
    }

    #[test]
    fn lossy_parse_defaults_to_intermediate() {
        assert_eq!(Level::parse_lossy(None), Level::Intermediate);
        assert_eq!(Level::parse_lossy(Some("expert")), Level::Intermediate);
        assert_eq!(Level::parse_lossy(Some("beginner")), Level::Beginner);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Level::Advanced).unwrap(), "\"advanced\"");
        let level: Level = serde_json::from_str("\"beginner\"").unwrap();
        assert_eq!(level, Level::Beginner);
    }
}
