use iced::widget::{Button, Column, Container, Row, Space, Text};
use iced::{Alignment, Element, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::views::style::{card, page_appearance, BOLD_FONT, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::client::models::app_state::EduAppState;
use crate::client::models::messages::Message;

fn action_card<'a>(title: &'a str, detail: &'a str, action: Message) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(12)
        .push(Text::new(title).font(BOLD_FONT).size(18).style(TEXT_PRIMARY))
        .push(Text::new(detail).size(13).style(TEXT_SECONDARY))
        .push(
            Button::new(Text::new("Open").size(14))
                .style(iced::theme::Button::Primary)
                .on_press(action)
                .padding([8, 20]),
        );
    card(content).width(Length::Fixed(260.0)).into()
}

pub fn view(state: &EduAppState) -> Element<Message> {
    let header = Row::new()
        .align_items(Alignment::Center)
        .padding([16, 24])
        .push(Text::new("Welcome to EduTalk").font(BOLD_FONT).size(26).style(TEXT_PRIMARY))
        .push(Space::new(Length::Fill, Length::Fixed(0.0)))
        .push(
            Button::new(Text::new("Log out").size(14))
                .style(iced::theme::Button::Destructive)
                .on_press(Message::Logout)
                .padding([8, 16]),
        );

    let mut actions = Row::new()
        .spacing(20)
        .push(action_card(
            "Chat",
            "Talk with your classmates and teachers",
            Message::OpenChat,
        ))
        .push(action_card(
            "Courses",
            "Your classes, materials and announcements",
            Message::OpenCourses,
        ));
    if state.current_user_type == "student" {
        actions = actions.push(action_card(
            "Assignments",
            "Review and hand in your work",
            Message::OpenCourses,
        ));
    }

    let content = Column::new()
        .width(Length::Fill)
        .push(logger_view(&state.logger))
        .push(header)
        .push(
            Container::new(actions)
                .width(Length::Fill)
                .center_x()
                .padding(24),
        );

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(page_appearance)))
        .into()
}
