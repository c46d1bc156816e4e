//! Day color tags and the display colors they map to.

use std::fmt;

/// The symbolic category assigned to a day in the date table.
///
/// Known schedule colors are closed variants; anything else a sheet contains
/// ("No School", "Snow Day", ...) is kept verbatim as a `Label`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorTag {
    Pink,
    Green,
    Blue,
    Blue2018,
    Red,
    Red2018,
    Purple,
    Purple2018,
    Yellow,
    Yellow2018,
    Orange,
    AcceleratedTerm,
    Label(String),
}

impl ColorTag {
    /// Parse a tag as written in the workbook. Surrounding whitespace is
    /// ignored, spelling is otherwise matched exactly.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "pink" => ColorTag::Pink,
            "green" => ColorTag::Green,
            "blue" => ColorTag::Blue,
            "blue2018" => ColorTag::Blue2018,
            "red" => ColorTag::Red,
            "red2018" => ColorTag::Red2018,
            "purple" => ColorTag::Purple,
            "purple2018" => ColorTag::Purple2018,
            "yellow" => ColorTag::Yellow,
            "yellow2018" => ColorTag::Yellow2018,
            "orange" => ColorTag::Orange,
            "Accelerated Term" => ColorTag::AcceleratedTerm,
            other => ColorTag::Label(other.to_string()),
        }
    }

    /// The tag text as it appears in the workbook.
    pub fn as_str(&self) -> &str {
        match self {
            ColorTag::Pink => "pink",
            ColorTag::Green => "green",
            ColorTag::Blue => "blue",
            ColorTag::Blue2018 => "blue2018",
            ColorTag::Red => "red",
            ColorTag::Red2018 => "red2018",
            ColorTag::Purple => "purple",
            ColorTag::Purple2018 => "purple2018",
            ColorTag::Yellow => "yellow",
            ColorTag::Yellow2018 => "yellow2018",
            ColorTag::Orange => "orange",
            ColorTag::AcceleratedTerm => "Accelerated Term",
            ColorTag::Label(label) => label,
        }
    }

    /// Tags whose period order differs from their base color while the
    /// period count stays the same. A count+color check cannot see an order
    /// change, so these days are always rebuilt.
    pub fn forces_regeneration(&self) -> bool {
        matches!(self, ColorTag::Red2018 | ColorTag::Purple2018)
    }

    pub fn is_accelerated_term(&self) -> bool {
        matches!(self, ColorTag::AcceleratedTerm)
    }
}

impl From<&str> for ColorTag {
    fn from(raw: &str) -> Self {
        ColorTag::parse(raw)
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event colors from the calendar provider's fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayColor {
    PaleRed,
    Green,
    Blue,
    Red,
    Mauve,
    Yellow,
    Orange,
    Cyan,
}

impl DisplayColor {
    /// Token stored in the `COLOR` property of generated events (RFC 7986
    /// uses CSS3 color names).
    pub fn token(self) -> &'static str {
        match self {
            DisplayColor::PaleRed => "lightcoral",
            DisplayColor::Green => "green",
            DisplayColor::Blue => "royalblue",
            DisplayColor::Red => "red",
            DisplayColor::Mauve => "mediumpurple",
            DisplayColor::Yellow => "gold",
            DisplayColor::Orange => "orange",
            DisplayColor::Cyan => "cyan",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "lightcoral" => Some(DisplayColor::PaleRed),
            "green" => Some(DisplayColor::Green),
            "royalblue" => Some(DisplayColor::Blue),
            "red" => Some(DisplayColor::Red),
            "mediumpurple" => Some(DisplayColor::Mauve),
            "gold" => Some(DisplayColor::Yellow),
            "orange" => Some(DisplayColor::Orange),
            "cyan" => Some(DisplayColor::Cyan),
            _ => None,
        }
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisplayColor::PaleRed => "pale red",
            DisplayColor::Green => "green",
            DisplayColor::Blue => "blue",
            DisplayColor::Red => "red",
            DisplayColor::Mauve => "mauve",
            DisplayColor::Yellow => "yellow",
            DisplayColor::Orange => "orange",
            DisplayColor::Cyan => "cyan",
        };
        write!(f, "{}", name)
    }
}

/// Map a day's tag to the color its events are painted with.
///
/// Labels have no color: events for them keep the calendar default.
pub fn resolve_display_color(tag: &ColorTag) -> Option<DisplayColor> {
    match tag {
        ColorTag::Pink => Some(DisplayColor::PaleRed),
        ColorTag::Green => Some(DisplayColor::Green),
        ColorTag::Blue | ColorTag::Blue2018 => Some(DisplayColor::Blue),
        ColorTag::Red | ColorTag::Red2018 => Some(DisplayColor::Red),
        ColorTag::Purple | ColorTag::Purple2018 => Some(DisplayColor::Mauve),
        ColorTag::Yellow | ColorTag::Yellow2018 => Some(DisplayColor::Yellow),
        ColorTag::Orange => Some(DisplayColor::Orange),
        ColorTag::AcceleratedTerm => Some(DisplayColor::Cyan),
        ColorTag::Label(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags_and_labels() {
        assert_eq!(ColorTag::parse("blue2018"), ColorTag::Blue2018);
        assert_eq!(ColorTag::parse("  orange "), ColorTag::Orange);
        assert_eq!(ColorTag::parse("Accelerated Term"), ColorTag::AcceleratedTerm);
        // Spelling is exact: capitalized colors are labels
        assert_eq!(ColorTag::parse("Blue"), ColorTag::Label("Blue".to_string()));
        assert_eq!(
            ColorTag::parse("Thanksgiving Break"),
            ColorTag::Label("Thanksgiving Break".to_string())
        );
    }

    #[test]
    fn test_display_keeps_raw_spelling() {
        assert_eq!(ColorTag::AcceleratedTerm.to_string(), "Accelerated Term");
        assert_eq!(ColorTag::Label("No School".into()).to_string(), "No School");
    }

    #[test]
    fn test_variants_share_base_color() {
        assert_eq!(resolve_display_color(&ColorTag::Pink), Some(DisplayColor::PaleRed));
        assert_eq!(resolve_display_color(&ColorTag::Blue2018), Some(DisplayColor::Blue));
        assert_eq!(resolve_display_color(&ColorTag::Red2018), Some(DisplayColor::Red));
        assert_eq!(resolve_display_color(&ColorTag::Purple2018), Some(DisplayColor::Mauve));
        assert_eq!(resolve_display_color(&ColorTag::Yellow2018), Some(DisplayColor::Yellow));
        assert_eq!(resolve_display_color(&ColorTag::AcceleratedTerm), Some(DisplayColor::Cyan));
        assert_eq!(resolve_display_color(&ColorTag::Label("PD".into())), None);
    }

    #[test]
    fn test_only_two_tags_force_regeneration() {
        let forced: Vec<_> = [
            ColorTag::Pink,
            ColorTag::Green,
            ColorTag::Blue,
            ColorTag::Blue2018,
            ColorTag::Red,
            ColorTag::Red2018,
            ColorTag::Purple,
            ColorTag::Purple2018,
            ColorTag::Yellow,
            ColorTag::Yellow2018,
            ColorTag::Orange,
            ColorTag::AcceleratedTerm,
        ]
        .into_iter()
        .filter(ColorTag::forces_regeneration)
        .collect();

        assert_eq!(forced, vec![ColorTag::Red2018, ColorTag::Purple2018]);
    }

    #[test]
    fn test_color_token_parses_back() {
        assert_eq!(DisplayColor::from_token("ROYALBLUE"), Some(DisplayColor::Blue));
        assert_eq!(DisplayColor::from_token("chartreuse"), None);
    }
}
