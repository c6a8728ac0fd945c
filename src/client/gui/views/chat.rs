use iced::widget::{Button, Column, Container, Row, Scrollable, Space, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::views::style::{
    card_appearance, input_appearance, page_appearance, BOLD_FONT, HIGHLIGHT_BG, MY_MESSAGE_BG,
    OTHER_MESSAGE_BG, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::client::models::app_state::EduAppState;
use crate::client::models::messages::Message;
use crate::client::services::chat_controller::highlight_segments;
use crate::common::models::{ChatMessage, Conversation, DeliveryState};

fn delivery_marks(state: DeliveryState) -> (&'static str, iced::Color) {
    match state {
        DeliveryState::Pending => ("✓", iced::Color::from_rgb(0.8, 0.8, 0.8)),
        DeliveryState::Unread => ("✓✓", iced::Color::from_rgb(0.8, 0.8, 0.8)),
        DeliveryState::Seen => ("✓✓", iced::Color::from_rgb(0.4, 0.75, 1.0)),
    }
}

fn sidebar_entry<'a>(state: &'a EduAppState, conversation: &'a Conversation) -> Element<'a, Message> {
    let peer = conversation.peer_of(&state.current_user_id);
    let name = state.users.display_name(peer);
    let date = conversation.created_at.format("%Y-%m-%d").to_string();
    let preview = state
        .chat_session
        .last_message(&conversation.id)
        .map(|m| m.content.clone())
        .unwrap_or_else(|| "No messages yet".to_string());
    let selected = state.chat_session.conversation_id() == Some(conversation.id.as_str());

    Button::new(
        Column::new()
            .spacing(2)
            .push(
                Row::new()
                    .push(Text::new(name).font(BOLD_FONT).size(14).style(TEXT_PRIMARY))
                    .push(Space::new(Length::Fill, Length::Fixed(0.0)))
                    .push(Text::new(date).size(11).style(TEXT_SECONDARY)),
            )
            .push(Text::new(preview).size(12).style(TEXT_SECONDARY)),
    )
    .style(if selected {
        iced::theme::Button::Primary
    } else {
        iced::theme::Button::Text
    })
    .on_press(Message::SelectConversation(conversation.clone()))
    .width(Length::Fill)
    .padding(10)
    .into()
}

fn sidebar(state: &EduAppState) -> Element<'_, Message> {
    let search = Container::new(
        TextInput::new("Search chats...", &state.conversation_search)
            .on_input(Message::ConversationSearchChanged)
            .padding(8)
            .size(13)
            .width(Length::Fill),
    )
    .style(iced::theme::Container::Custom(Box::new(input_appearance)));

    let new_chat = Row::new()
        .spacing(6)
        .push(
            Container::new(
                TextInput::new("User id to chat with", &state.new_chat_peer)
                    .on_input(Message::NewChatPeerChanged)
                    .on_submit(Message::StartConversation)
                    .padding(8)
                    .size(13)
                    .width(Length::Fill),
            )
            .style(iced::theme::Container::Custom(Box::new(input_appearance)))
            .width(Length::Fill),
        )
        .push(
            Button::new(Text::new("+").size(14))
                .style(iced::theme::Button::Primary)
                .on_press(Message::StartConversation)
                .padding([8, 12]),
        );

    let filter = state.conversation_search.trim().to_lowercase();
    let mut list = Column::new().spacing(2);
    for conversation in &state.conversations {
        if !filter.is_empty() {
            let peer = conversation.peer_of(&state.current_user_id);
            let name = state.users.display_name(peer).to_lowercase();
            if !name.contains(&filter) {
                continue;
            }
        }
        list = list.push(sidebar_entry(state, conversation));
    }

    Container::new(
        Column::new()
            .spacing(10)
            .padding(12)
            .push(search)
            .push(new_chat)
            .push(Scrollable::new(list).height(Length::Fill)),
    )
    .width(Length::Fixed(280.0))
    .height(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(card_appearance)))
    .into()
}

/// One bubble; matched search terms render on a highlight background.
fn message_bubble<'a>(state: &'a EduAppState, message: &'a ChatMessage) -> Element<'a, Message> {
    let is_mine = message.sender_id == state.current_user_id;
    let bubble_bg = if is_mine { MY_MESSAGE_BG } else { OTHER_MESSAGE_BG };
    let text_color = if is_mine { iced::Color::WHITE } else { TEXT_PRIMARY };

    let mut content_row = Row::new();
    for segment in highlight_segments(&message.content, state.chat_session.search_term()) {
        let text = Text::new(segment.text).size(14).style(if segment.highlighted {
            TEXT_PRIMARY
        } else {
            text_color
        });
        if segment.highlighted {
            content_row = content_row.push(
                Container::new(text).style(iced::theme::Container::Custom(Box::new(
                    |_: &iced::Theme| iced::widget::container::Appearance {
                        background: Some(iced::Background::Color(HIGHLIGHT_BG)),
                        ..Default::default()
                    },
                ))),
            );
        } else {
            content_row = content_row.push(text);
        }
    }

    let mut meta = Row::new()
        .spacing(4)
        .align_items(Alignment::Center)
        .push(Text::new(message.formatted_time()).size(10).style(TEXT_SECONDARY));
    if is_mine {
        let (marks, color) = delivery_marks(message.state);
        meta = meta.push(Text::new(marks).size(10).style(color));
    }

    let bubble = Container::new(
        Column::new().spacing(4).push(content_row).push(meta),
    )
    .padding([8, 12])
    .width(Length::Fixed(320.0))
    .style(iced::theme::Container::Custom(Box::new(move |_: &iced::Theme| {
        iced::widget::container::Appearance {
            background: Some(iced::Background::Color(bubble_bg)),
            border: iced::Border { radius: 12.0.into(), ..Default::default() },
            ..Default::default()
        }
    })));

    Container::new(bubble)
        .width(Length::Fill)
        .align_x(if is_mine {
            iced::alignment::Horizontal::Right
        } else {
            iced::alignment::Horizontal::Left
        })
        .into()
}

fn conversation_area(state: &EduAppState) -> Element<'_, Message> {
    let Some(conversation) = state.chat_session.conversation() else {
        return Container::new(
            Text::new("Pick a chat to get started").size(16).style(TEXT_SECONDARY),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .into();
    };

    let peer = conversation.peer_of(&state.current_user_id);
    let header = Row::new()
        .spacing(12)
        .align_items(Alignment::Center)
        .padding([10, 14])
        .push(
            Text::new(state.users.display_name(peer))
                .font(BOLD_FONT)
                .size(17)
                .style(TEXT_PRIMARY),
        )
        .push(Space::new(Length::Fill, Length::Fixed(0.0)))
        .push(
            Container::new(
                TextInput::new("Search in messages...", &state.message_search_input)
                    .on_input(Message::MessageSearchChanged)
                    .on_submit(Message::RunMessageSearch)
                    .padding(8)
                    .size(13)
                    .width(Length::Fixed(200.0)),
            )
            .style(iced::theme::Container::Custom(Box::new(input_appearance))),
        )
        .push(
            Button::new(Text::new("Search").size(13))
                .style(iced::theme::Button::Secondary)
                .on_press(Message::RunMessageSearch)
                .padding([8, 12]),
        );

    let mut messages_column = Column::new().spacing(8).padding([12, 16]);
    if state.chat_session.filtered_messages().is_empty() {
        let empty_text = if state.chat_session.search_term().is_empty() {
            "No messages yet. Say hello!"
        } else {
            "No messages match your search."
        };
        messages_column = messages_column.push(
            Container::new(Text::new(empty_text).size(14).style(TEXT_SECONDARY))
                .width(Length::Fill)
                .center_x()
                .padding(20),
        );
    } else {
        for message in state.chat_session.filtered_messages() {
            messages_column = messages_column.push(message_bubble(state, message));
        }
    }
    messages_column = messages_column.push(Space::new(Length::Fixed(0.0), Length::Fixed(16.0)));

    let input_area = Row::new()
        .spacing(8)
        .align_items(Alignment::Center)
        .padding([10, 14])
        .push(
            Container::new(
                TextInput::new("Write a message...", &state.chat_input)
                    .on_input(Message::ChatInputChanged)
                    .on_submit(Message::SendChatMessage)
                    .padding(10)
                    .size(14)
                    .width(Length::Fill),
            )
            .style(iced::theme::Container::Custom(Box::new(input_appearance)))
            .width(Length::Fill),
        )
        .push(
            Button::new(Text::new("Send").size(14))
                .style(iced::theme::Button::Primary)
                .on_press(Message::SendChatMessage)
                .padding([10, 18]),
        );

    Column::new()
        .push(header)
        .push(
            Scrollable::new(messages_column)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(input_area)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

pub fn view(state: &EduAppState) -> Element<Message> {
    let header = Row::new()
        .align_items(Alignment::Center)
        .spacing(12)
        .padding([12, 24])
        .push(
            Button::new(Text::new("← Back").size(14))
                .on_press(Message::OpenHome)
                .style(iced::theme::Button::Secondary)
                .padding(8),
        )
        .push(Text::new("Chat").font(BOLD_FONT).size(22).style(TEXT_PRIMARY));

    let body = Row::new()
        .spacing(12)
        .padding([0, 16, 16, 16])
        .height(Length::Fill)
        .push(sidebar(state))
        .push(conversation_area(state));

    let content = Column::new()
        .width(Length::Fill)
        .push(logger_view(&state.logger))
        .push(header)
        .push(body);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(page_appearance)))
        .into()
}
