use iced::widget::{Button, Column, Container, Row, Space, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::views::style::{
    card_appearance, input_appearance, page_appearance, ACCENT, BOLD_FONT, TEXT_PRIMARY,
    TEXT_SECONDARY,
};
use crate::client::models::app_state::EduAppState;
use crate::client::models::messages::Message;

fn labeled_input<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    on_input: fn(String) -> Message,
) -> Column<'a, Message> {
    Column::new()
        .spacing(6)
        .push(Text::new(label).size(13).style(TEXT_SECONDARY))
        .push(
            Container::new(
                TextInput::new(placeholder, value)
                    .on_input(on_input)
                    .width(Length::Fill)
                    .padding(10)
                    .size(14),
            )
            .style(iced::theme::Container::Custom(Box::new(input_appearance))),
        )
}

pub fn view(state: &EduAppState) -> Element<Message> {
    let is_login = state.is_login;
    let loading = state.loading;

    let email_valid = state.email.contains('@');
    let password_valid = state.password.len() >= 6;
    let register_valid = is_login
        || (!state.username.trim().is_empty()
            && !state.name.trim().is_empty()
            && !state.lastname.trim().is_empty()
            && !state.grade.trim().is_empty());
    let submit_enabled = email_valid && password_valid && register_valid && !loading;

    let logger_bar = if state.logger.is_empty() {
        Container::new(Space::new(Length::Fill, Length::Fixed(0.0))).width(Length::Fill)
    } else {
        Container::new(logger_view(&state.logger))
            .width(Length::Fill)
            .padding([8, 12, 0, 12])
    };

    let title = Text::new("EduTalk")
        .size(40)
        .font(BOLD_FONT)
        .style(ACCENT)
        .horizontal_alignment(iced::alignment::Horizontal::Center);
    let subtitle = Text::new("Your learning platform")
        .size(15)
        .style(TEXT_SECONDARY)
        .horizontal_alignment(iced::alignment::Horizontal::Center);

    let tab = |label: &'static str, active: bool| {
        let text = if active {
            Text::new(label).font(BOLD_FONT).size(15).style(TEXT_PRIMARY)
        } else {
            Text::new(label).size(15).style(TEXT_SECONDARY)
        };
        let button = Button::new(
            Container::new(text).width(Length::Fill).center_x(),
        )
        .width(Length::Fill)
        .padding([10, 16])
        .style(if active {
            iced::theme::Button::Primary
        } else {
            iced::theme::Button::Secondary
        });
        if active {
            button
        } else {
            button.on_press(Message::ToggleLoginRegister)
        }
    };
    let tabs = Row::new()
        .spacing(2)
        .push(tab("Sign in", is_login))
        .push(tab("Register", !is_login));

    let mut form = Column::new().spacing(14);
    if !is_login {
        form = form
            .push(labeled_input("Username", "Pick a username", &state.username, Message::UsernameChanged))
            .push(
                Row::new()
                    .spacing(10)
                    .push(labeled_input("Name", "First name", &state.name, Message::NameChanged).width(Length::Fill))
                    .push(labeled_input("Last name", "Last name", &state.lastname, Message::LastnameChanged).width(Length::Fill)),
            )
            .push(labeled_input("Grade", "e.g. 5", &state.grade, Message::GradeChanged));
    }
    form = form.push(labeled_input("Email", "you@school.edu", &state.email, Message::EmailChanged));

    let password_input = Container::new(
        Row::new()
            .align_items(Alignment::Center)
            .push(
                TextInput::new("At least 6 characters", &state.password)
                    .on_input(Message::PasswordChanged)
                    .on_submit(if submit_enabled {
                        Message::SubmitLoginOrRegister
                    } else {
                        Message::None
                    })
                    .secure(!state.show_password)
                    .width(Length::Fill)
                    .padding(10)
                    .size(14),
            )
            .push(
                Button::new(Text::new(if state.show_password { "Hide" } else { "Show" }).size(12))
                    .on_press(Message::ToggleShowPassword)
                    .style(iced::theme::Button::Text)
                    .padding([6, 10]),
            ),
    )
    .style(iced::theme::Container::Custom(Box::new(input_appearance)));
    form = form.push(
        Column::new()
            .spacing(6)
            .push(Text::new("Password").size(13).style(TEXT_SECONDARY))
            .push(password_input),
    );

    let submit_label = if loading {
        "Connecting..."
    } else if is_login {
        "Sign in"
    } else {
        "Create account"
    };
    let submit = {
        let button = Button::new(
            Container::new(Text::new(submit_label).font(BOLD_FONT).size(15))
                .width(Length::Fill)
                .center_x(),
        )
        .width(Length::Fill)
        .padding(14)
        .style(iced::theme::Button::Primary);
        if submit_enabled {
            button.on_press(Message::SubmitLoginOrRegister)
        } else {
            button
        }
    };

    let error_line: Element<Message> = match &state.error_message {
        Some(message) => Text::new(message)
            .size(13)
            .style(iced::Color::from_rgb(0.85, 0.2, 0.2))
            .into(),
        None => Space::new(Length::Fill, Length::Fixed(0.0)).into(),
    };

    let card_content = Column::new()
        .width(Length::Fixed(420.0))
        .spacing(20)
        .padding(32)
        .align_items(Alignment::Center)
        .push(Column::new().spacing(6).align_items(Alignment::Center).push(title).push(subtitle))
        .push(tabs)
        .push(form)
        .push(error_line)
        .push(submit);

    let card = Container::new(card_content)
        .style(iced::theme::Container::Custom(Box::new(card_appearance)));

    let content = Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(logger_bar)
        .push(
            Container::new(card)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x()
                .center_y(),
        );

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(page_appearance)))
        .into()
}
