use iced::widget::{Button, Column, Container, Row, Scrollable, Space, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::views::style::{
    card, input_appearance, page_appearance, ACCENT, BOLD_FONT, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::client::models::app_state::EduAppState;
use crate::client::models::messages::Message;
use crate::common::models::{Assignment, AssignmentType};

fn details_card(assignment: &Assignment) -> Element<'_, Message> {
    let due = assignment
        .delivery_date
        .with_timezone(&chrono::Local)
        .format("%d %B %H:%M")
        .to_string();
    let mut content = Column::new()
        .spacing(8)
        .push(Text::new("Assignment details").font(BOLD_FONT).size(16).style(TEXT_PRIMARY))
        .push(Text::new(format!("Due: {}", due)).size(13).style(TEXT_SECONDARY))
        .push(Text::new(&assignment.description).size(14).style(TEXT_PRIMARY));
    for (i, _url) in assignment.file_url.iter().enumerate() {
        content = content.push(
            Text::new(format!("Attachment {}", i + 1)).size(12).style(ACCENT),
        );
    }
    card(content).width(Length::Fill).into()
}

fn comments_card(state: &EduAppState) -> Element<'_, Message> {
    let mut thread = Column::new().spacing(10);
    for comment in &state.comments {
        let author = state.users.display_name(&comment.author_id);
        let when = comment
            .created_at
            .with_timezone(&chrono::Local)
            .format("%d %B %H:%M")
            .to_string();
        thread = thread.push(
            Column::new()
                .spacing(2)
                .push(
                    Row::new()
                        .spacing(8)
                        .push(Text::new(author).font(BOLD_FONT).size(13).style(TEXT_PRIMARY))
                        .push(Text::new(when).size(11).style(TEXT_SECONDARY)),
                )
                .push(Text::new(&comment.content).size(13).style(TEXT_PRIMARY)),
        );
    }

    let input_row = Row::new()
        .spacing(8)
        .push(
            Container::new(
                TextInput::new("Add a class comment...", &state.comment_input)
                    .on_input(Message::CommentInputChanged)
                    .on_submit(Message::SubmitComment)
                    .padding(8)
                    .size(13)
                    .width(Length::Fill),
            )
            .style(iced::theme::Container::Custom(Box::new(input_appearance)))
            .width(Length::Fill),
        )
        .push(
            Button::new(Text::new("Comment").size(13))
                .style(iced::theme::Button::Primary)
                .on_press(Message::SubmitComment)
                .padding([8, 12]),
        );

    card(
        Column::new()
            .spacing(12)
            .push(Text::new("Class comments").font(BOLD_FONT).size(16).style(TEXT_PRIMARY))
            .push(input_row)
            .push(thread),
    )
    .width(Length::Fill)
    .into()
}

/// Right-hand panel: quiz entry for quiz assignments, file hand-in otherwise.
fn submission_panel<'a>(state: &'a EduAppState, assignment: &'a Assignment) -> Element<'a, Message> {
    if assignment.assignment_type == AssignmentType::Quiz {
        let inner: Element<'a, Message> = match &state.my_submission {
            Some(submission) => {
                let mut done = Column::new()
                    .spacing(6)
                    .push(Text::new("You already completed this quiz").size(13).style(TEXT_PRIMARY));
                if let Some(grade) = submission.grade {
                    done = done.push(
                        Text::new(format!("Your score: {}%", grade)).size(13).style(ACCENT),
                    );
                }
                done.into()
            }
            None => Button::new(
                Container::new(Text::new("Start quiz").size(14)).width(Length::Fill).center_x(),
            )
            .style(iced::theme::Button::Primary)
            .on_press(match &assignment.quiz_id {
                Some(quiz_id) => Message::OpenTakeQuiz(quiz_id.clone()),
                None => Message::None,
            })
            .width(Length::Fill)
            .padding(12)
            .into(),
        };
        return card(
            Column::new()
                .spacing(10)
                .push(Text::new("Your work").font(BOLD_FONT).size(16).style(TEXT_PRIMARY))
                .push(inner),
        )
        .width(Length::Fixed(300.0))
        .into();
    }

    let mut content = Column::new()
        .spacing(10)
        .push(Text::new("Your work").font(BOLD_FONT).size(16).style(TEXT_PRIMARY));

    if let Some(submission) = &state.my_submission {
        content = content.push(Text::new("Handed in").size(13).style(ACCENT));
        if let Some(grade) = submission.grade {
            content = content.push(
                Text::new(format!("Grade: {}/100", grade)).size(13).style(TEXT_PRIMARY),
            );
        }
    } else {
        let submit_label = if state.uploading { "Uploading..." } else { "Hand in" };
        let submit = {
            let button = Button::new(
                Container::new(Text::new(submit_label).size(14)).width(Length::Fill).center_x(),
            )
            .style(iced::theme::Button::Primary)
            .width(Length::Fill)
            .padding(12);
            if state.uploading {
                button
            } else {
                button.on_press(Message::SubmitAssignment)
            }
        };
        content = content
            .push(
                Container::new(
                    TextInput::new("Path to your file (.pdf, .doc, .docx)", &state.submission_file_input)
                        .on_input(Message::SubmissionFileChanged)
                        .padding(8)
                        .size(13)
                        .width(Length::Fill),
                )
                .style(iced::theme::Container::Custom(Box::new(input_appearance))),
            )
            .push(submit);
    }

    card(content).width(Length::Fixed(300.0)).into()
}

pub fn view(state: &EduAppState) -> Element<Message> {
    let header_title = state
        .current_assignment
        .as_ref()
        .map(|a| a.title.clone())
        .unwrap_or_else(|| "Loading assignment...".to_string());
    let subtitle = state
        .current_assignment
        .as_ref()
        .map(|a| {
            format!(
                "{} • {}",
                a.course_name.clone().unwrap_or_default(),
                a.teacher_name.clone().unwrap_or_default()
            )
        })
        .unwrap_or_default();

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
        .push(
            Column::new()
                .spacing(2)
                .push(Text::new(header_title).font(BOLD_FONT).size(22).style(TEXT_PRIMARY))
                .push(Text::new(subtitle).size(13).style(TEXT_SECONDARY)),
        )
        .push(Space::new(Length::Fill, Length::Fixed(0.0)));

    let mut left = Column::new().spacing(16).width(Length::Fill);
    if let Some(assignment) = &state.current_assignment {
        left = left.push(details_card(assignment));
    }
    left = left.push(comments_card(state));

    let mut body = Row::new().spacing(16).padding(24).push(left);
    if let Some(assignment) = &state.current_assignment {
        if state.current_user_type == "student" {
            body = body.push(submission_panel(state, assignment));
        }
    }

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
