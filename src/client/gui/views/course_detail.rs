use iced::widget::{Button, Column, Container, Row, Scrollable, Space, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::views::style::{
    card, input_appearance, page_appearance, BOLD_FONT, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::client::models::app_state::EduAppState;
use crate::client::models::messages::Message;
use crate::common::models::Assignment;

fn assignment_row<'a>(assignment: &'a Assignment, is_teacher: bool) -> Element<'a, Message> {
    let date = assignment
        .delivery_date
        .with_timezone(&chrono::Local)
        .format("%d %B %H:%M")
        .to_string();
    let mut actions = Row::new().spacing(8).push(
        Button::new(Text::new("Open").size(13))
            .style(iced::theme::Button::Primary)
            .on_press(Message::OpenAssignmentDetail(assignment.id.clone()))
            .padding([6, 12]),
    );
    if is_teacher {
        actions = actions.push(
            Button::new(Text::new("Submissions").size(13))
                .style(iced::theme::Button::Secondary)
                .on_press(Message::OpenSubmissions(assignment.id.clone()))
                .padding([6, 12]),
        );
    }

    let mut content = Column::new()
        .spacing(6)
        .push(Text::new(&assignment.title).font(BOLD_FONT).size(16).style(TEXT_PRIMARY))
        .push(Text::new(&assignment.description).size(13).style(TEXT_SECONDARY))
        .push(Text::new(format!("Due: {}", date)).size(12).style(TEXT_SECONDARY));
    for (i, _url) in assignment.file_url.iter().enumerate() {
        content = content.push(
            Text::new(format!("Attachment {}", i + 1))
                .size(12)
                .style(TEXT_SECONDARY),
        );
    }
    content = content.push(actions);
    card(content).width(Length::Fill).into()
}

fn publish_form(state: &EduAppState) -> Element<'_, Message> {
    let text_input = |placeholder, value, on_input: fn(String) -> Message| {
        Container::new(
            TextInput::new(placeholder, value)
                .on_input(on_input)
                .padding(8)
                .size(14)
                .width(Length::Fill),
        )
        .style(iced::theme::Container::Custom(Box::new(input_appearance)))
    };

    let mut files = Column::new().spacing(4);
    for path in &state.assignment_files {
        files = files.push(
            Row::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(Text::new(path).size(12).style(TEXT_SECONDARY))
                .push(
                    Button::new(Text::new("x").size(12))
                        .style(iced::theme::Button::Destructive)
                        .on_press(Message::RemoveAssignmentFile(path.clone()))
                        .padding([2, 8]),
                ),
        );
    }

    let submit_label = if state.creating_assignment { "Publishing..." } else { "Publish" };
    let submit = {
        let button = Button::new(Text::new(submit_label).size(14))
            .style(iced::theme::Button::Primary)
            .padding([8, 16]);
        if state.creating_assignment {
            button
        } else {
            button.on_press(Message::CreateAssignmentSubmit)
        }
    };

    let content = Column::new()
        .spacing(10)
        .push(Text::new("Post something to the class").font(BOLD_FONT).size(16).style(TEXT_PRIMARY))
        .push(text_input("Assignment title", &state.assignment_title, Message::AssignmentTitleChanged))
        .push(text_input(
            "Description",
            &state.assignment_description,
            Message::AssignmentDescriptionChanged,
        ))
        .push(text_input(
            "Due date (YYYY-MM-DD)",
            &state.assignment_due_date,
            Message::AssignmentDueDateChanged,
        ))
        .push(
            Row::new()
                .spacing(8)
                .push(text_input(
                    "Attachment path (.pdf, .doc, .docx)",
                    &state.assignment_file_input,
                    Message::AssignmentFilePathChanged,
                ))
                .push(
                    Button::new(Text::new("Add file").size(13))
                        .style(iced::theme::Button::Secondary)
                        .on_press(Message::AddAssignmentFile)
                        .padding([8, 12]),
                ),
        )
        .push(files)
        .push(submit);
    card(content).width(Length::Fill).into()
}

pub fn view(state: &EduAppState) -> Element<Message> {
    let is_teacher = state.current_user_type == "teacher";

    let (name, description, code) = match &state.current_course {
        Some(course) => (course.name.clone(), course.description.clone(), course.code.clone()),
        None => ("Loading class...".to_string(), String::new(), String::new()),
    };

    let header = Row::new()
        .align_items(Alignment::Center)
        .spacing(12)
        .padding([16, 24])
        .push(
            Button::new(Text::new("← Back").size(14))
                .on_press(Message::OpenCourses)
                .style(iced::theme::Button::Secondary)
                .padding(8),
        )
        .push(Text::new(name).font(BOLD_FONT).size(24).style(TEXT_PRIMARY))
        .push(Space::new(Length::Fill, Length::Fixed(0.0)));

    let info = card(
        Column::new()
            .spacing(6)
            .push(Text::new(description).size(14).style(TEXT_SECONDARY))
            .push(Text::new(format!("Class code: {}", code)).size(12).style(TEXT_SECONDARY)),
    )
    .width(Length::Fill);

    let mut body = Column::new().spacing(16).padding(24).push(info);

    if is_teacher {
        body = body.push(publish_form(state)).push(
            Button::new(Text::new("New quiz").size(14))
                .style(iced::theme::Button::Secondary)
                .on_press(match &state.current_course {
                    Some(course) => Message::OpenCreateQuiz { course_id: course.id.clone() },
                    None => Message::None,
                })
                .padding([8, 16]),
        );
    }

    if state.course_assignments.is_empty() {
        body = body.push(Text::new("Nothing posted yet.").size(14).style(TEXT_SECONDARY));
    } else {
        for assignment in &state.course_assignments {
            body = body.push(assignment_row(assignment, is_teacher));
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
