//! Layout and typographic metadata. Templates are made of nothing else: they
//! decide how a section looks, never what it contains.

use serde::{Deserialize, Serialize};

use crate::models::{AccentColor, Customization, Font, FontSize, Spacing};
use crate::templates::render::SectionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingStyle {
    Plain,
    Underlined,
    SmallCaps,
    Banner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStyle {
    Bullets,
    Inline,
    Pills,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
}

/// How a single section is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLayout {
    pub heading: HeadingStyle,
    pub alignment: Alignment,
    pub columns: u8,
    pub divider: bool,
    pub item_style: ItemStyle,
    /// Whether the heading is drawn in the accent color.
    pub accent: bool,
}

/// A template's layout policy: a base section layout plus per-section
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateLayout {
    pub base: SectionLayout,
    pub overrides: Vec<(SectionKind, SectionLayout)>,
}

impl TemplateLayout {
    pub fn new(base: SectionLayout) -> Self {
        Self {
            base,
            overrides: Vec::new(),
        }
    }

    pub fn with(mut self, kind: SectionKind, layout: SectionLayout) -> Self {
        self.overrides.push((kind, layout));
        self
    }

    pub fn section(&self, kind: SectionKind) -> SectionLayout {
        self.overrides
            .iter()
            .rev()
            .find(|(k, _)| *k == kind)
            .map(|(_, layout)| *layout)
            .unwrap_or(self.base)
    }
}

/// Concrete typography resolved from a [`Customization`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Typography {
    pub font_family: &'static str,
    pub font_size_pt: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    pub accent_hex: &'static str,
}

pub fn typography(customization: &Customization) -> Typography {
    Typography {
        font_family: match customization.font {
            Font::Inter => "Inter",
            Font::Roboto => "Roboto",
            Font::Poppins => "Poppins",
            Font::OpenSans => "Open Sans",
        },
        font_size_pt: match customization.font_size {
            FontSize::Small => 10.0,
            FontSize::Medium => 11.0,
            FontSize::Large => 12.0,
        },
        line_height: match customization.spacing {
            Spacing::Compact => 1.15,
            Spacing::Normal => 1.4,
            Spacing::Relaxed => 1.7,
        },
        accent_hex: match customization.accent_color {
            AccentColor::Blue => "#3B82F6",
            AccentColor::Green => "#22C55E",
            AccentColor::Purple => "#A855F7",
            AccentColor::Gray => "#6B7280",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: SectionLayout = SectionLayout {
        heading: HeadingStyle::Plain,
        alignment: Alignment::Left,
        columns: 1,
        divider: false,
        item_style: ItemStyle::Bullets,
        accent: false,
    };

    #[test]
    fn test_override_wins_over_base() {
        let pills = SectionLayout {
            item_style: ItemStyle::Pills,
            ..BASE
        };
        let layout = TemplateLayout::new(BASE).with(SectionKind::Skills, pills);
        assert_eq!(layout.section(SectionKind::Skills), pills);
        assert_eq!(layout.section(SectionKind::Experience), BASE);
    }

    #[test]
    fn test_default_customization_typography() {
        let t = typography(&Customization::default());
        assert_eq!(t.font_family, "Inter");
        assert_eq!(t.font_size_pt, 11.0);
        assert_eq!(t.line_height, 1.4);
        assert_eq!(t.accent_hex, "#3B82F6");
    }

    #[test]
    fn test_customization_changes_typography() {
        let t = typography(&Customization {
            font: Font::OpenSans,
            font_size: FontSize::Large,
            spacing: Spacing::Compact,
            accent_color: AccentColor::Gray,
        });
        assert_eq!(t.font_family, "Open Sans");
        assert_eq!(t.font_size_pt, 12.0);
        assert_eq!(t.line_height, 1.15);
        assert_eq!(t.accent_hex, "#6B7280");
    }
}
