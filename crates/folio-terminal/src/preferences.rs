//! Site-wide display preferences set from the terminal.

use std::fmt;
use std::str::FromStr;

use folio_types::error::FolioError;

/// Global color scheme (`mode`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    Dark,
    Light,
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(FolioError::InvalidArgument(format!(
                "unknown mode: {s} (use dark or light)"
            ))),
        }
    }
}

/// Accent color (`theme`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Accent {
    Red,
    Blue,
    #[default]
    Green,
}

impl Accent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Accent {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Ok(Self::Red),
            "blue" => Ok(Self::Blue),
            "green" => Ok(Self::Green),
            _ => Err(FolioError::InvalidArgument(format!(
                "unknown theme: {s} (use red, blue or green)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub color_scheme: ColorScheme,
    pub accent: Accent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_modes_case_insensitive() {
        assert_eq!("dark".parse::<ColorScheme>().unwrap(), ColorScheme::Dark);
        assert_eq!("LIGHT".parse::<ColorScheme>().unwrap(), ColorScheme::Light);
        assert!("sepia".parse::<ColorScheme>().is_err());
    }

    #[test]
    fn parse_accents() {
        assert_eq!("blue".parse::<Accent>().unwrap(), Accent::Blue);
        let err = "purple".parse::<Accent>().unwrap_err();
        assert!(format!("{err}").contains("purple"));
    }

    #[test]
    fn display_matches_parse() {
        for scheme in [ColorScheme::Dark, ColorScheme::Light] {
            assert_eq!(scheme.to_string().parse::<ColorScheme>().unwrap(), scheme);
        }
        for accent in [Accent::Red, Accent::Blue, Accent::Green] {
            assert_eq!(accent.to_string().parse::<Accent>().unwrap(), accent);
        }
    }

    #[test]
    fn defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.color_scheme, ColorScheme::Dark);
        assert_eq!(prefs.accent, Accent::Green);
    }
}
