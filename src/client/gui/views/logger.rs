use iced::widget::{Container, Row, Text};
use iced::{Element, Font, Length};

#[derive(Debug, Clone)]
pub enum LogLevel {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: String,
}

impl LogMessage {
    pub fn emoji(&self) -> &'static str {
        match self.level {
            LogLevel::Success => "✅",
            LogLevel::Error => "❌",
            LogLevel::Info => "ℹ️",
            LogLevel::Warning => "⚠️",
        }
    }

    pub fn color(&self) -> iced::Color {
        match self.level {
            LogLevel::Success => iced::Color::from_rgb(0.2, 0.7, 0.4),
            LogLevel::Error => iced::Color::from_rgb(0.9, 0.25, 0.25),
            LogLevel::Info => iced::Color::from_rgb(0.3, 0.5, 0.9),
            LogLevel::Warning => iced::Color::from_rgb(0.95, 0.7, 0.1),
        }
    }
}

/// Single transient alert bar showing the most recent entry.
pub fn logger_view(messages: &[LogMessage]) -> Element<'_, crate::client::models::messages::Message> {
    let Some(log) = messages.last() else {
        return iced::widget::Space::new(Length::Fill, Length::Fixed(0.0)).into();
    };
    let bg_color = log.color();
    Container::new(
        Row::new()
            .spacing(12)
            .push(
                Text::new(log.emoji())
                    .font(Font::with_name("Segoe UI Emoji"))
                    .size(18)
                    .style(iced::Color::WHITE),
            )
            .push(Text::new(&log.message).size(16).style(iced::Color::WHITE)),
    )
    .padding([10, 16])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(move |_: &iced::Theme| {
        iced::widget::container::Appearance {
            background: Some(iced::Background::Color(bg_color)),
            text_color: Some(iced::Color::WHITE),
            border: iced::Border { radius: 8.0.into(), ..Default::default() },
            ..Default::default()
        }
    })))
    .into()
}
