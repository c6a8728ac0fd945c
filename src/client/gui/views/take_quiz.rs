use iced::widget::{Button, Column, Container, Radio, Row, Scrollable, Space, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::views::style::{
    card, input_appearance, page_appearance, ACCENT, BOLD_FONT, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::client::models::app_state::EduAppState;
use crate::client::models::messages::Message;
use crate::common::models::{Question, QuestionType};

fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn question_card<'a>(
    index: usize,
    question: &'a Question,
    answer: &'a str,
    locked: bool,
) -> Element<'a, Message> {
    let mut content = Column::new().spacing(10).push(
        Text::new(format!("Question {}: {}", index + 1, question.question_text))
            .font(BOLD_FONT)
            .size(15)
            .style(TEXT_PRIMARY),
    );

    match question.question_type {
        QuestionType::MultipleChoice => {
            if let Some(options) = &question.options {
                for option in options {
                    let selected = if answer == option.as_str() {
                        Some(option.as_str())
                    } else {
                        None
                    };
                    let choice = option.clone();
                    content = content.push(
                        Radio::new(option.as_str(), option.as_str(), selected, move |_| {
                            if locked {
                                Message::None
                            } else {
                                Message::QuizAnswerChanged { index, answer: choice.clone() }
                            }
                        })
                        .size(16)
                        .text_size(14),
                    );
                }
            }
        }
        QuestionType::OpenEnded => {
            let mut input = TextInput::new("Write your answer", answer).padding(8).size(14);
            if !locked {
                input = input.on_input(move |answer| Message::QuizAnswerChanged { index, answer });
            }
            content = content.push(
                Container::new(input)
                    .style(iced::theme::Container::Custom(Box::new(input_appearance))),
            );
        }
    }

    card(content).width(Length::Fill).into()
}

pub fn view(state: &EduAppState) -> Element<Message> {
    let Some(quiz) = &state.quiz else {
        return Container::new(Text::new("Loading quiz...").size(16).style(TEXT_SECONDARY))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y()
            .style(iced::theme::Container::Custom(Box::new(page_appearance)))
            .into();
    };

    let mut header = Row::new()
        .align_items(Alignment::Center)
        .spacing(12)
        .padding([16, 24])
        .push(Text::new(&quiz.title).font(BOLD_FONT).size(24).style(TEXT_PRIMARY))
        .push(Space::new(Length::Fill, Length::Fixed(0.0)));
    if quiz.time_limit_minutes > 0 {
        header = header.push(
            Text::new(format!("Time left: {}", format_time(state.quiz_time_left)))
                .font(BOLD_FONT)
                .size(16)
                .style(ACCENT),
        );
    }

    let mut body = Column::new().spacing(16).padding(24);
    for (index, question) in quiz.questions.iter().enumerate() {
        let answer = state
            .quiz_responses
            .get(index)
            .map(|r| r.student_answer.as_str())
            .unwrap_or("");
        body = body.push(question_card(index, question, answer, state.quiz_submitting));
    }

    let submit_label = if state.quiz_submitting { "Submitting..." } else { "Submit quiz" };
    let submit = {
        let button = Button::new(Text::new(submit_label).size(14))
            .style(iced::theme::Button::Primary)
            .padding([10, 20]);
        if state.quiz_submitting {
            button
        } else {
            button.on_press(Message::SubmitQuizAttempt)
        }
    };
    body = body.push(
        Row::new()
            .spacing(8)
            .push(Space::new(Length::Fill, Length::Fixed(0.0)))
            .push(
                Button::new(Text::new("Cancel").size(14))
                    .style(iced::theme::Button::Secondary)
                    .on_press(Message::OpenHome)
                    .padding([10, 16]),
            )
            .push(submit),
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
