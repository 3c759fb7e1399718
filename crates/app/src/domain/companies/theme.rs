//! Company visual themes.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Page background chosen for a company's public chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Theme {
    /// Flat background colour; `None` falls back to the renderer default.
    Solid { color: Option<String> },

    /// CSS `linear-gradient` arguments, e.g. `90deg, #0f172a, #1e3a8a`.
    Gradient { spec: String },

    /// Background image URL.
    Image { url: String },
}

impl Default for Theme {
    fn default() -> Self {
        Self::Solid { color: None }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown theme type `{0}`")]
    UnknownKind(String),

    #[error("theme `{0}` requires a value")]
    MissingValue(&'static str),
}

impl Theme {
    pub(crate) const SOLID: &'static str = "solid";
    pub(crate) const GRADIENT: &'static str = "gradient";
    pub(crate) const IMAGE: &'static str = "image";

    /// Storage discriminant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Solid { .. } => Self::SOLID,
            Self::Gradient { .. } => Self::GRADIENT,
            Self::Image { .. } => Self::IMAGE,
        }
    }

    /// Storage payload for the active variant.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Solid { color } => color.as_deref(),
            Self::Gradient { spec } => Some(spec),
            Self::Image { url } => Some(url),
        }
    }

    /// Rebuild a theme from its stored `(kind, value)` columns.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown kind, or a gradient/image without a value.
    pub fn from_parts(kind: &str, value: Option<String>) -> Result<Self, ThemeError> {
        let value = value.filter(|value| !value.trim().is_empty());

        match kind {
            Self::SOLID => Ok(Self::Solid { color: value }),
            Self::GRADIENT => value
                .map(|spec| Self::Gradient { spec })
                .ok_or(ThemeError::MissingValue(Self::GRADIENT)),
            Self::IMAGE => value
                .map(|url| Self::Image { url })
                .ok_or(ThemeError::MissingValue(Self::IMAGE)),
            other => Err(ThemeError::UnknownKind(other.to_string())),
        }
    }
}

/// Parses `kind[:value]`, e.g. `solid:#0f172a` or `gradient:90deg, #fff, #000`.
impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = match s.split_once(':') {
            Some((kind, value)) => (kind, Some(value.trim().to_string())),
            None => (s, None),
        };

        Self::from_parts(kind.trim(), value)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{}:{value}", self.kind()),
            None => f.write_str(self.kind()),
        }
    }
}
