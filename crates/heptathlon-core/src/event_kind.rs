//! Event kind enum as the single source of truth for event tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The seven heptathlon disciplines.
///
/// Ordering follows the competition programme, which is also the order
/// per-event scores are listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Sprint100m,
    HighJump,
    ShotPut,
    Sprint200m,
    LongJump,
    Javelin,
    Run800m,
}

impl EventKind {
    /// All variants in programme order.
    pub const ALL: [Self; 7] = [
        Self::Sprint100m,
        Self::HighJump,
        Self::ShotPut,
        Self::Sprint200m,
        Self::LongJump,
        Self::Javelin,
        Self::Run800m,
    ];

    /// Canonical token for this event.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sprint100m => "100m",
            Self::Sprint200m => "200m",
            Self::Run800m => "800m",
            Self::HighJump => "high_jump",
            Self::LongJump => "long_jump",
            Self::ShotPut => "shot_put",
            Self::Javelin => "javelin",
        }
    }

    /// Track events are timed, so a lower performance is better.
    #[must_use]
    pub const fn is_track(&self) -> bool {
        matches!(self, Self::Sprint100m | Self::Sprint200m | Self::Run800m)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "100m" | "sprint_100m" | "100" => Ok(Self::Sprint100m),
            "200m" | "sprint_200m" | "200" => Ok(Self::Sprint200m),
            "800m" | "run_800m" | "800" => Ok(Self::Run800m),
            "high_jump" | "high" | "hj" => Ok(Self::HighJump),
            "long_jump" | "long" | "lj" => Ok(Self::LongJump),
            "shot_put" | "shot" | "sp" => Ok(Self::ShotPut),
            "javelin" | "jav" | "jt" => Ok(Self::Javelin),
            _ => Err(UnknownEventKind(s.to_string())),
        }
    }
}

impl Serialize for EventKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for event tokens outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventKind(pub String);

impl fmt::Display for UnknownEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized event: {}", self.0)
    }
}

impl std::error::Error for UnknownEventKind {}
