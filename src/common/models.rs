// Common models shared between the API client, the socket layer and the views
use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub user_type: String,
    pub username: Option<String>,
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub grade: Option<String>,
}

impl User {
    /// Human-facing name for message headers and the chat sidebar.
    pub fn display_name(&self) -> String {
        match (&self.name, &self.lastname) {
            (Some(name), Some(lastname)) => format!("{} {}", name, lastname),
            (Some(name), None) => name.clone(),
            _ => self
                .username
                .clone()
                .unwrap_or_else(|| self.email.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
}

/// Two-party messaging thread. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conversation {
    pub id: String,
    pub participant_one_id: String,
    pub participant_two_id: String,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// The participant that is not `user_id`.
    pub fn peer_of(&self, user_id: &str) -> &str {
        if self.participant_one_id == user_id {
            &self.participant_two_id
        } else {
            &self.participant_one_id
        }
    }
}

/// Delivery marker on a chat message. Ordered: a message only ever moves
/// forward (pending -> unread -> seen); regressions are dropped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryState {
    Pending,
    Unread,
    Seen,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub state: DeliveryState,
}

impl ChatMessage {
    /// HH:MM local-time label shown inside the bubble.
    pub fn formatted_time(&self) -> String {
        self.sent_at.with_timezone(&chrono::Local).format("%H:%M").to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewChatMessage {
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub description: String,
    pub code: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentType {
    #[default]
    Homework,
    Quiz,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub delivery_date: DateTime<Utc>,
    pub status: bool,
    #[serde(default)]
    pub file_url: Vec<String>,
    #[serde(default)]
    pub assignment_type: AssignmentType,
    #[serde(default)]
    pub quiz_id: Option<String>,
    // Display projections the backend inlines on detail endpoints
    #[serde(default, rename = "courseName")]
    pub course_name: Option<String>,
    #[serde(default, rename = "teacherName")]
    pub teacher_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAssignment {
    pub title: String,
    pub description: String,
    pub course_id: String,
    pub delivery_date: String,
    pub file_url: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Submitted,
    Late,
    Graded,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submission {
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    pub file_url: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub status: SubmissionStatus,
    #[serde(rename = "onTime")]
    pub on_time: bool,
    pub grade: Option<u8>,
    #[serde(default)]
    pub student: Option<User>,
}

impl Submission {
    pub fn student_label(&self) -> String {
        match &self.student {
            Some(student) => student.display_name(),
            // Same fallback the backend-less views use: last 4 chars of the id
            None => {
                let tail: String = self
                    .student_id
                    .chars()
                    .rev()
                    .take(4)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("Student {}", tail)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSubmission {
    pub assignment_id: String,
    pub student_id: String,
    pub file_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub assignment_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub author: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub assignment_id: String,
    pub author_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    OpenEnded,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub question_text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub time_limit_minutes: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewQuiz {
    pub title: String,
    pub class_id: String,
    pub questions: Vec<Question>,
    pub feedback_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizResponse {
    pub question_text: String,
    pub student_answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizAttempt {
    pub quiz_id: String,
    pub student_id: String,
    pub responses: Vec<QuizResponse>,
    pub time_taken_minutes: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizAttemptResult {
    pub score: f64,
}

/// Time-limited credentials for uploading directly to the asset host
/// without exposing backend secrets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadTicket {
    pub signature: String,
    pub timestamp: i64,
    #[serde(rename = "apiKey")]
    pub api_key: String,
    #[serde(rename = "cloudName")]
    pub cloud_name: String,
    #[serde(default)]
    pub folder: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_state_ordering_is_monotonic() {
        assert!(DeliveryState::Pending < DeliveryState::Unread);
        assert!(DeliveryState::Unread < DeliveryState::Seen);
    }

    #[test]
    fn delivery_state_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&DeliveryState::Seen).unwrap(), "\"seen\"");
        let state: DeliveryState = serde_json::from_str("\"unread\"").unwrap();
        assert_eq!(state, DeliveryState::Unread);
    }

    #[test]
    fn conversation_peer_resolution() {
        let conversation = Conversation {
            id: "c1".into(),
            participant_one_id: "u1".into(),
            participant_two_id: "u2".into(),
            created_at: Utc::now(),
        };
        assert_eq!(conversation.peer_of("u1"), "u2");
        assert_eq!(conversation.peer_of("u2"), "u1");
    }

    #[test]
    fn message_deserializes_from_backend_shape() {
        let json = r#"{
            "id": "m1",
            "conversation_id": "c1",
            "sender_id": "u1",
            "content": "hola",
            "sent_at": "2024-03-20T10:30:00Z",
            "state": "pending"
        }"#;
        let message: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.state, DeliveryState::Pending);
        assert_eq!(message.content, "hola");
    }

    #[test]
    fn user_display_name_falls_back() {
        let mut user = User {
            id: "u1".into(),
            email: "ana@example.com".into(),
            user_type: "student".into(),
            username: None,
            name: None,
            lastname: None,
            grade: None,
        };
        assert_eq!(user.display_name(), "ana@example.com");
        user.username = Some("ana".into());
        assert_eq!(user.display_name(), "ana");
        user.name = Some("Ana".into());
        user.lastname = Some("Martinez".into());
        assert_eq!(user.display_name(), "Ana Martinez");
    }
}
