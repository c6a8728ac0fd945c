use iced::widget::{Button, Column, Container, Row, Scrollable, Space, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::views::style::{
    card, input_appearance, page_appearance, ACCENT, BOLD_FONT, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::client::models::app_state::EduAppState;
use crate::client::models::messages::Message;
use crate::common::models::{Submission, SubmissionStatus};

fn status_label(submission: &Submission) -> (&'static str, iced::Color) {
    match submission.status {
        SubmissionStatus::Graded => ("Graded", ACCENT),
        _ if submission.on_time => ("On time", iced::Color::from_rgb(0.2, 0.65, 0.35)),
        _ => ("Late", iced::Color::from_rgb(0.85, 0.25, 0.25)),
    }
}

fn submission_row<'a>(state: &'a EduAppState, submission: &'a Submission) -> Element<'a, Message> {
    let (label, color) = status_label(submission);
    let when = submission
        .created_at
        .with_timezone(&chrono::Local)
        .format("%d %B %H:%M")
        .to_string();

    let grade_value = state
        .grade_inputs
        .get(&submission.id)
        .map(String::as_str)
        .unwrap_or("");
    let unchanged = match submission.grade {
        Some(grade) => grade_value == grade.to_string(),
        None => grade_value.is_empty(),
    };
    let update_button = {
        let button = Button::new(Text::new(if unchanged { "✓" } else { "Update" }).size(13))
            .style(iced::theme::Button::Primary)
            .padding([6, 12]);
        if unchanged {
            button
        } else {
            button.on_press(Message::UpdateGrade { submission_id: submission.id.clone() })
        }
    };

    let mut left = Column::new()
        .spacing(4)
        .push(Text::new(submission.student_label()).font(BOLD_FONT).size(14).style(TEXT_PRIMARY))
        .push(
            Row::new()
                .spacing(8)
                .push(Text::new(label).size(12).style(color))
                .push(Text::new(when).size(12).style(TEXT_SECONDARY)),
        );
    left = left.push(Text::new(&submission.file_url).size(11).style(TEXT_SECONDARY));

    let mut right = Row::new().spacing(8).align_items(Alignment::Center);
    if let Some(grade) = submission.grade {
        right = right.push(Text::new(format!("{}/100", grade)).size(13).style(TEXT_PRIMARY));
    }
    right = right
        .push(
            Container::new(
                TextInput::new("0-100", grade_value)
                    .on_input({
                        let submission_id = submission.id.clone();
                        move |value| Message::GradeInputChanged {
                            submission_id: submission_id.clone(),
                            value,
                        }
                    })
                    .padding(6)
                    .size(13)
                    .width(Length::Fixed(70.0)),
            )
            .style(iced::theme::Container::Custom(Box::new(input_appearance))),
        )
        .push(update_button);

    card(
        Row::new()
            .align_items(Alignment::Center)
            .push(left.width(Length::Fill))
            .push(right),
    )
    .width(Length::Fill)
    .into()
}

pub fn view(state: &EduAppState) -> Element<Message> {
    let count = |status: SubmissionStatus| {
        state.submissions.iter().filter(|s| s.status == status).count()
    };

    let title = state
        .current_assignment
        .as_ref()
        .map(|a| format!("{} - Submissions", a.title))
        .unwrap_or_else(|| "Submissions".to_string());
    let back_target = state
        .current_assignment
        .as_ref()
        .map(|a| Message::OpenCourseDetail(a.course_id.clone()))
        .unwrap_or(Message::OpenCourses);

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
        .push(Text::new(title).font(BOLD_FONT).size(22).style(TEXT_PRIMARY))
        .push(Space::new(Length::Fill, Length::Fixed(0.0)))
        .push(
            Text::new(format!(
                "{} on time • {} late • {} graded",
                count(SubmissionStatus::Submitted),
                count(SubmissionStatus::Late),
                count(SubmissionStatus::Graded)
            ))
            .size(13)
            .style(TEXT_SECONDARY),
        );

    let mut list = Column::new().spacing(12).padding(24);
    if state.submissions.is_empty() {
        list = list.push(Text::new("No submissions yet.").size(14).style(TEXT_SECONDARY));
    } else {
        for submission in &state.submissions {
            list = list.push(submission_row(state, submission));
        }
    }

    let content = Column::new()
        .width(Length::Fill)
        .push(logger_view(&state.logger))
        .push(header)
        .push(Scrollable::new(list).width(Length::Fill).height(Length::Fill));

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(page_appearance)))
        .into()
}
