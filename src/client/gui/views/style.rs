//! Shared palette and container appearances for the EduTalk views.

use iced::{Color, Font};

pub const BG_MAIN: Color = Color::from_rgb(0.96, 0.96, 0.98);
pub const CARD_BG: Color = Color::WHITE;
pub const INPUT_BG: Color = Color::from_rgb(0.93, 0.93, 0.96);
pub const ACCENT: Color = Color::from_rgb(0.55, 0.3, 0.85);
pub const ACCENT_SOFT: Color = Color::from_rgb(0.35, 0.45, 0.9);
pub const TEXT_PRIMARY: Color = Color::from_rgb(0.1, 0.1, 0.15);
pub const TEXT_SECONDARY: Color = Color::from_rgb(0.45, 0.45, 0.5);
pub const HIGHLIGHT_BG: Color = Color::from_rgb(1.0, 0.9, 0.35);
pub const MY_MESSAGE_BG: Color = Color::from_rgb(0.55, 0.3, 0.85);
pub const OTHER_MESSAGE_BG: Color = Color::from_rgb(0.9, 0.9, 0.93);

pub const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

pub fn page_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(BG_MAIN)),
        text_color: Some(TEXT_PRIMARY),
        ..Default::default()
    }
}

pub fn card_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(CARD_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border {
            width: 0.0,
            color: Color::TRANSPARENT,
            radius: 12.0.into(),
        },
        shadow: iced::Shadow {
            offset: iced::Vector::new(0.0, 2.0),
            blur_radius: 8.0,
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.12),
        },
    }
}

pub fn input_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(INPUT_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border {
            width: 1.0,
            color: Color::from_rgb(0.8, 0.8, 0.85),
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

pub fn card<'a, M: 'a>(
    content: impl Into<iced::Element<'a, M>>,
) -> iced::widget::Container<'a, M> {
    iced::widget::Container::new(content)
        .padding(16)
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
}
