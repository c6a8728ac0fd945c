use iced::widget::{Button, Column, Container, Row, Scrollable, Space, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::views::style::{
    card, input_appearance, page_appearance, BOLD_FONT, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::client::models::app_state::{AppState, EduAppState};
use crate::client::models::messages::Message;
use crate::common::models::{Question, QuestionType};

fn question_editor(index: usize, question: &Question) -> Element<'_, Message> {
    let type_label = match question.question_type {
        QuestionType::MultipleChoice => "Multiple choice",
        QuestionType::OpenEnded => "Open answer",
    };

    let mut content = Column::new()
        .spacing(8)
        .push(
            Row::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(
                    Text::new(format!("Question {}", index + 1))
                        .font(BOLD_FONT)
                        .size(15)
                        .style(TEXT_PRIMARY),
                )
                .push(
                    Button::new(Text::new(type_label).size(12))
                        .style(iced::theme::Button::Secondary)
                        .on_press(Message::QuestionTypeToggled { index })
                        .padding([4, 10]),
                )
                .push(Space::new(Length::Fill, Length::Fixed(0.0)))
                .push(
                    Button::new(Text::new("Remove").size(12))
                        .style(iced::theme::Button::Destructive)
                        .on_press(Message::RemoveQuestion(index))
                        .padding([4, 10]),
                ),
        )
        .push(
            Container::new(
                TextInput::new("Question text", &question.question_text)
                    .on_input(move |text| Message::QuestionTextChanged { index, text })
                    .padding(8)
                    .size(14),
            )
            .style(iced::theme::Container::Custom(Box::new(input_appearance))),
        );

    if let Some(options) = &question.options {
        for (option_index, option) in options.iter().enumerate() {
            content = content.push(
                Container::new(
                    TextInput::new(&format!("Option {}", option_index + 1), option)
                        .on_input(move |value| Message::QuestionOptionChanged {
                            index,
                            option: option_index,
                            value,
                        })
                        .padding(8)
                        .size(13),
                )
                .style(iced::theme::Container::Custom(Box::new(input_appearance))),
            );
        }
    }

    content = content.push(
        Container::new(
            TextInput::new("Correct answer", &question.correct_answer)
                .on_input(move |answer| Message::QuestionAnswerChanged { index, answer })
                .padding(8)
                .size(13),
        )
        .style(iced::theme::Container::Custom(Box::new(input_appearance))),
    );

    card(content).width(Length::Fill).into()
}

pub fn view(state: &EduAppState) -> Element<Message> {
    let back_target = match &state.app_state {
        AppState::CreateQuiz { course_id } => Message::OpenCourseDetail(course_id.clone()),
        _ => Message::OpenCourses,
    };

    let header = Row::new()
        .align_items(Alignment::Center)
        .spacing(12)
        .padding([16, 24])
        .push(
            Button::new(Text::new("← Back").size(14))
                .on_press(back_target)
                .style(iced::theme::Button::Secondary)
                .padding(8),
        )
        .push(Text::new("New quiz").font(BOLD_FONT).size(24).style(TEXT_PRIMARY));

    let mut body = Column::new().spacing(16).padding(24).push(
        Container::new(
            TextInput::new("Quiz title", &state.quiz_title)
                .on_input(Message::QuizTitleChanged)
                .padding(10)
                .size(15),
        )
        .style(iced::theme::Container::Custom(Box::new(input_appearance))),
    );

    if state.quiz_questions.is_empty() {
        body = body.push(
            Text::new("Add at least one question.").size(13).style(TEXT_SECONDARY),
        );
    }
    for (index, question) in state.quiz_questions.iter().enumerate() {
        body = body.push(question_editor(index, question));
    }

    body = body.push(
        Row::new()
            .spacing(8)
            .push(
                Button::new(Text::new("Add question").size(14))
                    .style(iced::theme::Button::Secondary)
                    .on_press(Message::AddQuestion)
                    .padding([8, 16]),
            )
            .push(Space::new(Length::Fill, Length::Fixed(0.0)))
            .push(
                Button::new(Text::new("Create quiz").size(14))
                    .style(iced::theme::Button::Primary)
                    .on_press(Message::CreateQuizSubmit)
                    .padding([8, 16]),
            ),
    );

    let content = Column::new()
        .width(Length::Fill)
        .push(logger_view(&state.logger))
        .push(header)
        .push(Scrollable::new(body).width(Length::Fill).height(Length::Fill));

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(page_appearance)))
        .into()
}
