//! Colour themes

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ugc_types::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    Cyberpunk,
    Sunset,
    Ocean,
    Forest,
    Royal,
    Rose,
}

impl Theme {
    pub const ALL: [Theme; 8] = [
        Theme::Light,
        Theme::Dark,
        Theme::Cyberpunk,
        Theme::Sunset,
        Theme::Ocean,
        Theme::Forest,
        Theme::Royal,
        Theme::Rose,
    ];

    /// Stored name
    pub fn key(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Cyberpunk => "cyberpunk",
            Theme::Sunset => "sunset",
            Theme::Ocean => "ocean",
            Theme::Forest => "forest",
            Theme::Royal => "royal",
            Theme::Rose => "rose",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Cyberpunk => "Cyberpunk",
            Theme::Sunset => "Sunset",
            Theme::Ocean => "Ocean",
            Theme::Forest => "Forest",
            Theme::Royal => "Royal",
            Theme::Rose => "Rose",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Theme::Light => "Clean and bright",
            Theme::Dark => "Easy on the eyes",
            Theme::Cyberpunk => "Neon and futuristic",
            Theme::Sunset => "Warm and cozy",
            Theme::Ocean => "Cool and refreshing",
            Theme::Forest => "Natural and calming",
            Theme::Royal => "Elegant and luxurious",
            Theme::Rose => "Romantic and soft",
        }
    }

    /// Base is a dark palette
    pub fn is_dark(self) -> bool {
        matches!(
            self,
            Theme::Dark | Theme::Cyberpunk | Theme::Ocean | Theme::Forest | Theme::Royal
        )
    }

    /// Accent colour as RGB
    pub fn accent(self) -> [u8; 3] {
        match self {
            Theme::Light => [79, 70, 229],
            Theme::Dark => [129, 140, 248],
            Theme::Cyberpunk => [236, 72, 153],
            Theme::Sunset => [249, 115, 22],
            Theme::Ocean => [14, 165, 233],
            Theme::Forest => [34, 197, 94],
            Theme::Royal => [168, 85, 247],
            Theme::Rose => [244, 63, 94],
        }
    }

    /// Quick toggle: dark goes to light, everything else goes to dark
    pub fn toggled(self) -> Self {
        if self == Theme::Dark {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    /// Next theme in the fixed order, wrapping around
    pub fn cycled(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Theme::ALL
            .iter()
            .copied()
            .find(|t| t.key() == wanted)
            .ok_or_else(|| ValidationError::UnknownTheme(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Ocean.toggled(), Theme::Dark);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Theme::Rose.cycled(), Theme::Light);
        assert_eq!(Theme::Light.cycled(), Theme::Dark);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Sunset".parse::<Theme>().unwrap(), Theme::Sunset);
        assert!("neon".parse::<Theme>().is_err());
    }
}
