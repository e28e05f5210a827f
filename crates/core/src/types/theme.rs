//! Light/dark display preference.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Display theme chosen by the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Parse a stored preference. Anything other than `dark` is light.
    #[must_use]
    pub fn from_preference(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("dark") {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_unknown_preference_is_light() {
        assert_eq!(Theme::from_preference("dark"), Theme::Dark);
        assert_eq!(Theme::from_preference("DARK"), Theme::Dark);
        assert_eq!(Theme::from_preference("solarized"), Theme::Light);
        assert_eq!(Theme::from_preference(""), Theme::Light);
    }
}
