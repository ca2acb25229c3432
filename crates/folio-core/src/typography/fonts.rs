//! Font catalogue.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Family used when neither the override nor the fallback is recognized.
pub const GLOBAL_DEFAULT_FAMILY: &str = "inherit";

/// Label shown for an unset or unknown font.
pub const DEFAULT_FONT_LABEL: &str = "Default";

/// Selectable font identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontId {
    Display,
    Sans,
    Serif,
    Poppins,
    Cormorant,
    WorkSans,
    Crimson,
}

/// One entry of the font picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontOption {
    pub id: FontId,
    pub label: &'static str,
    pub family: &'static str,
}

/// Fonts in picker order.
pub const FONT_OPTIONS: &[FontOption] = &[
    FontOption {
        id: FontId::Display,
        label: "Playfair Display",
        family: "'Playfair Display', 'Times New Roman', serif",
    },
    FontOption {
        id: FontId::Sans,
        label: "Plus Jakarta Sans",
        family: "'Plus Jakarta Sans', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif",
    },
    FontOption {
        id: FontId::Serif,
        label: "Georgia",
        family: "'Georgia', 'Times New Roman', serif",
    },
    FontOption {
        id: FontId::Poppins,
        label: "Poppins",
        family: "'Poppins', 'Segoe UI', sans-serif",
    },
    FontOption {
        id: FontId::Cormorant,
        label: "Cormorant Garamond",
        family: "'Cormorant Garamond', 'Times New Roman', serif",
    },
    FontOption {
        id: FontId::WorkSans,
        label: "Work Sans",
        family: "'Work Sans', 'Segoe UI', sans-serif",
    },
    FontOption {
        id: FontId::Crimson,
        label: "Crimson Text",
        family: "'Crimson Text', 'Times New Roman', serif",
    },
];

impl FontId {
    /// Identifier as stored in the override map.
    pub fn as_str(&self) -> &'static str {
        match self {
            FontId::Display => "display",
            FontId::Sans => "sans",
            FontId::Serif => "serif",
            FontId::Poppins => "poppins",
            FontId::Cormorant => "cormorant",
            FontId::WorkSans => "workSans",
            FontId::Crimson => "crimson",
        }
    }

    /// Recognize a stored identifier. Matching is exact.
    pub fn from_id(id: &str) -> Option<Self> {
        FONT_OPTIONS
            .iter()
            .map(|option| option.id)
            .find(|font| font.as_str() == id)
    }

    pub fn option(&self) -> &'static FontOption {
        // FONT_OPTIONS lists every variant in declaration order
        &FONT_OPTIONS[*self as usize]
    }

    pub fn family(&self) -> &'static str {
        self.option().family
    }

    pub fn label(&self) -> &'static str {
        self.option().label
    }
}

impl fmt::Display for FontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontId::from_id(s).ok_or_else(|| {
            let known: Vec<&str> = FONT_OPTIONS.iter().map(|o| o.id.as_str()).collect();
            format!("unknown font '{}' (expected one of: {})", s, known.join(", "))
        })
    }
}

/// Picker label for a stored identifier, [`DEFAULT_FONT_LABEL`] if unknown.
pub fn font_label(id: &str) -> &'static str {
    FontId::from_id(id)
        .map(|font| font.label())
        .unwrap_or(DEFAULT_FONT_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_indexed_by_variant() {
        for (index, option) in FONT_OPTIONS.iter().enumerate() {
            assert_eq!(option.id as usize, index);
            assert_eq!(FontId::from_id(option.id.as_str()), Some(option.id));
        }
    }

    #[test]
    fn test_font_label_known_and_unknown() {
        assert_eq!(font_label("workSans"), "Work Sans");
        assert_eq!(font_label("worksans"), "Default");
        assert_eq!(font_label(""), "Default");
    }

    #[test]
    fn test_serde_uses_stored_identifiers() {
        assert_eq!(serde_json::to_string(&FontId::WorkSans).unwrap(), "\"workSans\"");
        let parsed: FontId = serde_json::from_str("\"crimson\"").unwrap();
        assert_eq!(parsed, FontId::Crimson);
    }

    #[test]
    fn test_from_str_lists_known_fonts_on_error() {
        let err = "comic".parse::<FontId>().unwrap_err();
        assert!(err.contains("display"));
        assert!(err.contains("crimson"));
    }
}
