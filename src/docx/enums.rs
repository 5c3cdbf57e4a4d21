//! Enumerations for WordprocessingML values used by header extraction.

use serde::Serialize;

/// Paragraph alignment, from `<w:jc w:val="..."/>`.
///
/// Absence of `w:jc` is represented as `None` at the record level and is
/// distinct from an explicit `left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Parse a `w:jc` value. WordprocessingML spells justified text "both".
    pub(crate) fn from_xml(value: &str) -> Option<Self> {
        match value {
            "left" | "start" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            "both" | "justify" | "distribute" => Some(Self::Justify),
            _ => None,
        }
    }

    /// Lowercase name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }
}

/// Which pages a header applies to, from `w:headerReference w:type`.
///
/// A section may define up to three headers; all of them take part in
/// extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderType {
    /// Odd pages (or all pages when no other header is defined)
    #[default]
    Default,
    /// First page of the section
    First,
    /// Even pages
    Even,
}

impl HeaderType {
    pub(crate) fn from_xml(value: &str) -> Self {
        match value {
            "first" => Self::First,
            "even" => Self::Even,
            _ => Self::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_from_xml() {
        assert_eq!(Alignment::from_xml("left"), Some(Alignment::Left));
        assert_eq!(Alignment::from_xml("start"), Some(Alignment::Left));
        assert_eq!(Alignment::from_xml("center"), Some(Alignment::Center));
        assert_eq!(Alignment::from_xml("end"), Some(Alignment::Right));
        assert_eq!(Alignment::from_xml("both"), Some(Alignment::Justify));
        assert_eq!(Alignment::from_xml("mediumKashida"), None);
    }

    #[test]
    fn test_header_type_from_xml() {
        assert_eq!(HeaderType::from_xml("default"), HeaderType::Default);
        assert_eq!(HeaderType::from_xml("first"), HeaderType::First);
        assert_eq!(HeaderType::from_xml("even"), HeaderType::Even);
        assert_eq!(HeaderType::from_xml("anything"), HeaderType::Default);
    }
}
