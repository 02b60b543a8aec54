use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub name: String,
    pub text: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    Facebook,
    Twitter,
    Instagram,
}

impl SharePlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
            Self::Instagram => "instagram",
        }
    }
}

impl fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SharePlatform {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "facebook" => Ok(Self::Facebook),
            "twitter" => Ok(Self::Twitter),
            "instagram" => Ok(Self::Instagram),
            other => Err(format!("unsupported share platform: {}", other)),
        }
    }
}

/// Where the client should send the visitor after a share is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShareTarget {
    /// Open this URL in a new window.
    Link { url: String },
    /// The platform has no web share endpoint; the visitor must post from the app.
    Manual { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareOutcome {
    pub platform: SharePlatform,
    pub text: String,
    pub target: ShareTarget,
}
