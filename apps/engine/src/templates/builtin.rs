use crate::templates::layout::{
    Alignment, HeadingStyle, ItemStyle, SectionLayout, TemplateLayout,
};
use crate::templates::render::SectionKind;
use crate::templates::Template;

const MODERN: SectionLayout = SectionLayout {
    heading: HeadingStyle::Underlined,
    alignment: Alignment::Left,
    columns: 1,
    divider: false,
    item_style: ItemStyle::Bullets,
    accent: true,
};

const CLASSIC: SectionLayout = SectionLayout {
    heading: HeadingStyle::SmallCaps,
    alignment: Alignment::Left,
    columns: 1,
    divider: true,
    item_style: ItemStyle::Inline,
    accent: false,
};

const CREATIVE: SectionLayout = SectionLayout {
    heading: HeadingStyle::Banner,
    alignment: Alignment::Left,
    columns: 1,
    divider: false,
    item_style: ItemStyle::Pills,
    accent: true,
};

const MINIMAL: SectionLayout = SectionLayout {
    heading: HeadingStyle::Plain,
    alignment: Alignment::Left,
    columns: 1,
    divider: false,
    item_style: ItemStyle::Inline,
    accent: false,
};

pub(crate) fn builtin_templates() -> Vec<Template> {
    vec![
        Template {
            id: "modern".to_string(),
            label: "Modern".to_string(),
            resume_description: "Clean and professional design with a modern touch".to_string(),
            cover_letter_description: "Clean and professional design with a modern touch"
                .to_string(),
            layout: TemplateLayout::new(MODERN)
                .with(
                    SectionKind::Skills,
                    SectionLayout {
                        item_style: ItemStyle::Pills,
                        ..MODERN
                    },
                )
                .with(
                    SectionKind::Interests,
                    SectionLayout {
                        item_style: ItemStyle::Pills,
                        ..MODERN
                    },
                ),
        },
        Template {
            id: "classic".to_string(),
            label: "Classic".to_string(),
            resume_description: "Traditional resume layout that works for all industries"
                .to_string(),
            cover_letter_description: "Traditional format suitable for conservative industries"
                .to_string(),
            layout: TemplateLayout::new(CLASSIC).with(
                SectionKind::Header,
                SectionLayout {
                    alignment: Alignment::Center,
                    ..CLASSIC
                },
            ),
        },
        Template {
            id: "creative".to_string(),
            label: "Creative".to_string(),
            resume_description: "Stand out with a unique and creative design".to_string(),
            cover_letter_description: "Bold design for creative industries".to_string(),
            // Header splits name and contact details into two columns.
            layout: TemplateLayout::new(CREATIVE).with(
                SectionKind::Header,
                SectionLayout {
                    columns: 2,
                    ..CREATIVE
                },
            ),
        },
        Template {
            id: "minimal".to_string(),
            label: "Minimal".to_string(),
            resume_description: "Simple and elegant design focusing on content".to_string(),
            cover_letter_description: "Simple and elegant design focusing on content".to_string(),
            layout: TemplateLayout::new(MINIMAL),
        },
    ]
}
