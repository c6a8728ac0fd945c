use iced::widget::{Button, Column, Container, Row, Scrollable, Space, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::views::style::{
    card, input_appearance, page_appearance, BOLD_FONT, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::client::models::app_state::EduAppState;
use crate::client::models::messages::Message;
use crate::common::models::Course;

fn course_card(course: &Course) -> Element<'_, Message> {
    let content = Column::new()
        .spacing(8)
        .push(Text::new(&course.name).font(BOLD_FONT).size(17).style(TEXT_PRIMARY))
        .push(Text::new(&course.description).size(13).style(TEXT_SECONDARY))
        .push(
            Text::new(format!("Class code: {}", course.code))
                .size(12)
                .style(TEXT_SECONDARY),
        )
        .push(
            Button::new(Text::new("View class").size(13))
                .style(iced::theme::Button::Primary)
                .on_press(Message::OpenCourseDetail(course.id.clone()))
                .padding([6, 14]),
        );
    card(content).width(Length::Fixed(300.0)).into()
}

pub fn view(state: &EduAppState) -> Element<Message> {
    let header = Row::new()
        .align_items(Alignment::Center)
        .spacing(12)
        .padding([16, 24])
        .push(
            Button::new(Text::new("← Back").size(14))
                .on_press(Message::OpenHome)
                .style(iced::theme::Button::Secondary)
                .padding(8),
        )
        .push(Text::new("My classes").font(BOLD_FONT).size(24).style(TEXT_PRIMARY))
        .push(Space::new(Length::Fill, Length::Fixed(0.0)))
        .push(
            Container::new(
                TextInput::new("Class code", &state.join_course_code)
                    .on_input(Message::JoinCourseCodeChanged)
                    .on_submit(Message::JoinCourseSubmit)
                    .padding(8)
                    .size(14)
                    .width(Length::Fixed(160.0)),
            )
            .style(iced::theme::Container::Custom(Box::new(input_appearance))),
        )
        .push(
            Button::new(Text::new("Join class").size(14))
                .style(iced::theme::Button::Primary)
                .on_press(Message::JoinCourseSubmit)
                .padding([8, 14]),
        );

    let mut grid = Column::new().spacing(16).padding(24);
    if state.courses.is_empty() {
        grid = grid.push(
            Text::new("No classes yet. Join one with the code your teacher gave you.")
                .size(14)
                .style(TEXT_SECONDARY),
        );
    } else {
        // Three cards per row, same as the portal grid
        for chunk in state.courses.chunks(3) {
            let mut row = Row::new().spacing(16);
            for course in chunk {
                row = row.push(course_card(course));
            }
            grid = grid.push(row);
        }
    }

    let content = Column::new()
        .width(Length::Fill)
        .push(logger_view(&state.logger))
        .push(header)
        .push(Scrollable::new(grid).width(Length::Fill).height(Length::Fill));

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(page_appearance)))
        .into()
}
