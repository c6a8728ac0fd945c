//! WebSocket side of the chat: one persistent connection per session, a
//! per-conversation channel subscription that follows the open conversation,
//! and the global delivery-state channel. Parsed events are handed to the UI
//! loop through an unbounded mpsc channel.

use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::common::models::{ChatMessage, DeliveryState};

pub const STATE_CHANNEL: &str = "chat.message.state";
pub const MESSAGE_EVENT: &str = "chat.message";

pub fn conversation_channel(conversation_id: &str) -> String {
    format!("chat.conversation.{}", conversation_id)
}

/// Event delivered to the application.
#[derive(Debug, Clone)]
pub enum SocketEvent {
    ConversationMessage {
        conversation_id: String,
        message: ChatMessage,
    },
    MessageState {
        message_id: String,
        state: DeliveryState,
    },
    Disconnected(String),
}

#[derive(Debug, Clone)]
pub enum SocketError {
    ConnectionFailed(String),
    NotConnected,
    SendFailed(String),
    InvalidUrl(String),
}

impl std::fmt::Display for SocketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SocketError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            SocketError::NotConnected => write!(f, "Socket not connected"),
            SocketError::SendFailed(msg) => write!(f, "Send failed: {}", msg),
            SocketError::InvalidUrl(msg) => write!(f, "Invalid socket url: {}", msg),
        }
    }
}

impl std::error::Error for SocketError {}

pub struct SocketClient {
    url: String,
    /// Channel handing parsed events to the application
    event_sender: Option<mpsc::UnboundedSender<SocketEvent>>,
    /// Receiver for the application; taken once
    event_receiver: Option<mpsc::UnboundedReceiver<SocketEvent>>,
    /// Sender feeding the writer task
    outgoing_sender: Option<mpsc::UnboundedSender<serde_json::Value>>,
}

impl SocketClient {
    pub fn new(url: String) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            url,
            event_sender: Some(tx),
            event_receiver: Some(rx),
            outgoing_sender: None,
        }
    }

    /// Next event if one is queued, without blocking the UI loop.
    pub fn try_receive_event(&mut self) -> Option<SocketEvent> {
        match self.event_receiver.as_mut()?.try_recv() {
            Ok(event) => Some(event),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                warn!("[WS:CLIENT] Event channel disconnected");
                None
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.outgoing_sender.is_some()
    }

    /// Connect and spawn the reader/writer tasks. The global delivery-state
    /// channel is subscribed immediately; per-conversation channels follow
    /// the open conversation.
    pub async fn connect(&mut self) -> Result<(), SocketError> {
        url::Url::parse(&self.url).map_err(|e| SocketError::InvalidUrl(e.to_string()))?;

        info!("[WS:CLIENT] Connecting to {}", self.url);
        let (ws_stream, _) = connect_async(&self.url)
            .await
            .map_err(|e| SocketError::ConnectionFailed(e.to_string()))?;
        let (mut ws_sender, mut ws_receiver) = ws_stream.split();

        let (outgoing_tx, mut outgoing_rx) = mpsc::unbounded_channel::<serde_json::Value>();

        // Writer task: serialize queued frames onto the socket
        tokio::spawn(async move {
            while let Some(frame) = outgoing_rx.recv().await {
                let json = frame.to_string();
                if let Err(e) = ws_sender.send(Message::Text(json)).await {
                    error!("[WS:CLIENT] Failed to send frame: {}", e);
                    break;
                }
            }
            debug!("[WS:CLIENT] Writer task ended");
        });

        // Reader task: parse incoming frames and forward them to the app
        if let Some(sender) = &self.event_sender {
            let sender = sender.clone();
            tokio::spawn(async move {
                while let Some(message) = ws_receiver.next().await {
                    match message {
                        Ok(Message::Text(text)) => match parse_socket_event(&text) {
                            Ok(event) => {
                                if sender.send(event).is_err() {
                                    warn!("[WS:CLIENT] Event receiver dropped, stopping reader");
                                    break;
                                }
                            }
                            Err(e) => {
                                warn!("[WS:CLIENT] Ignoring unparseable frame: {} - raw: {}", e, text);
                            }
                        },
                        Ok(Message::Close(_)) => {
                            info!("[WS:CLIENT] Connection closed by server");
                            let _ = sender.send(SocketEvent::Disconnected("closed by server".into()));
                            break;
                        }
                        Ok(_) => {
                            // binary, ping and pong frames are not part of the protocol
                        }
                        Err(e) => {
                            error!("[WS:CLIENT] Socket error: {}", e);
                            let _ = sender.send(SocketEvent::Disconnected(e.to_string()));
                            break;
                        }
                    }
                }
                debug!("[WS:CLIENT] Reader task ended");
            });
        }

        self.outgoing_sender = Some(outgoing_tx);
        self.send_frame(serde_json::json!({
            "event": "subscribe",
            "channel": STATE_CHANNEL,
        }))?;
        info!("[WS:CLIENT] Connected, state channel subscribed");
        Ok(())
    }

    pub fn subscribe_conversation(&self, conversation_id: &str) -> Result<(), SocketError> {
        debug!("[WS:CLIENT] Subscribing to conversation {}", conversation_id);
        self.send_frame(serde_json::json!({
            "event": "subscribe",
            "channel": conversation_channel(conversation_id),
        }))
    }

    /// Unsubscribe from the previous conversation's channel before switching,
    /// so its handler does not keep firing.
    pub fn unsubscribe_conversation(&self, conversation_id: &str) -> Result<(), SocketError> {
        debug!("[WS:CLIENT] Unsubscribing from conversation {}", conversation_id);
        self.send_frame(serde_json::json!({
            "event": "unsubscribe",
            "channel": conversation_channel(conversation_id),
        }))
    }

    /// Notify peers of a message the REST call already created.
    pub fn emit_message(&self, message: &ChatMessage) -> Result<(), SocketError> {
        let data = serde_json::to_value(message)
            .map_err(|e| SocketError::SendFailed(e.to_string()))?;
        self.send_frame(serde_json::json!({
            "event": MESSAGE_EVENT,
            "data": data,
        }))
    }

    fn send_frame(&self, frame: serde_json::Value) -> Result<(), SocketError> {
        match &self.outgoing_sender {
            Some(sender) => sender
                .send(frame)
                .map_err(|_| SocketError::SendFailed("writer task ended".into())),
            None => Err(SocketError::NotConnected),
        }
    }
}

/// Parse an incoming JSON frame into a typed event.
pub fn parse_socket_event(text: &str) -> Result<SocketEvent, String> {
    let frame: serde_json::Value =
        serde_json::from_str(text).map_err(|e| format!("invalid JSON: {}", e))?;
    let event = frame
        .get("event")
        .and_then(|v| v.as_str())
        .ok_or("missing event field")?;

    if let Some(conversation_id) = event.strip_prefix("chat.conversation.") {
        let data = frame.get("data").ok_or("missing data field")?;
        let message: ChatMessage = serde_json::from_value(data.clone())
            .map_err(|e| format!("bad message payload: {}", e))?;
        return Ok(SocketEvent::ConversationMessage {
            conversation_id: conversation_id.to_string(),
            message,
        });
    }

    if event == STATE_CHANNEL {
        let data = frame.get("data").ok_or("missing data field")?;
        let message_id = data
            .get("message_id")
            .and_then(|v| v.as_str())
            .ok_or("missing message_id")?
            .to_string();
        let state: DeliveryState = serde_json::from_value(
            data.get("state").cloned().ok_or("missing state")?,
        )
        .map_err(|e| format!("bad state value: {}", e))?;
        return Ok(SocketEvent::MessageState { message_id, state });
    }

    Err(format!("unknown event: {}", event))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_conversation_message_frame() {
        let frame = r#"{
            "event": "chat.conversation.c42",
            "data": {
                "id": "m1",
                "conversation_id": "c42",
                "sender_id": "u2",
                "content": "hola",
                "sent_at": "2024-03-20T10:30:00Z",
                "state": "unread"
            }
        }"#;
        match parse_socket_event(frame).unwrap() {
            SocketEvent::ConversationMessage { conversation_id, message } => {
                assert_eq!(conversation_id, "c42");
                assert_eq!(message.id, "m1");
                assert_eq!(message.state, DeliveryState::Unread);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn parses_state_frame() {
        let frame = r#"{"event": "chat.message.state", "data": {"message_id": "m7", "state": "seen"}}"#;
        match parse_socket_event(frame).unwrap() {
            SocketEvent::MessageState { message_id, state } => {
                assert_eq!(message_id, "m7");
                assert_eq!(state, DeliveryState::Seen);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_and_malformed_frames() {
        assert!(parse_socket_event("not json").is_err());
        assert!(parse_socket_event(r#"{"data": {}}"#).is_err());
        assert!(parse_socket_event(r#"{"event": "presence.update", "data": {}}"#).is_err());
        assert!(parse_socket_event(r#"{"event": "chat.message.state", "data": {"state": "seen"}}"#).is_err());
    }

    #[test]
    fn conversation_channel_name() {
        assert_eq!(conversation_channel("abc"), "chat.conversation.abc");
    }
}
