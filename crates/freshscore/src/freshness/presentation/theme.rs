use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colours applied to the page chrome; risk colours never change with theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
}

impl Theme {
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                background: "#f7f9fc",
                surface: "#ffffff",
                text: "#1f2933",
                muted: "#616e7c",
                accent: "#FF4B4B",
            },
            Self::Dark => Palette {
                background: "#0e1117",
                surface: "#1a1f2b",
                text: "#fafafa",
                muted: "#a3aab8",
                accent: "#FF4B4B",
            },
        }
    }

    /// Parses a request value, falling back when it is missing or unknown.
    pub fn resolve(raw: Option<&str>, fallback: Theme) -> Theme {
        raw.and_then(|value| value.parse().ok()).unwrap_or(fallback)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{0}'")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(UnknownTheme(raw.to_string())),
        }
    }
}
