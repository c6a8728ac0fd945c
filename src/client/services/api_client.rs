//! REST client for the EduTalk backend. One method per endpoint; the bearer
//! token captured at login is attached to every call. All failures collapse
//! into `anyhow::Error` with the backend's own error text when it sends one.

use anyhow::{anyhow, Result};
use log::debug;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::common::models::{
    Assignment, AuthResponse, ChatMessage, Comment, Conversation, Course, DeliveryState,
    NewAssignment, NewChatMessage, NewComment, NewQuiz, NewSubmission, Quiz, QuizAttempt,
    QuizAttemptResult, Submission, UploadTicket, User,
};

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub grade: String,
    #[serde(rename = "type")]
    pub user_type: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(anyhow!(extract_error(status, &body)));
        }
        serde_json::from_str(&body).map_err(|e| anyhow!("unexpected response body: {}", e))
    }

    async fn expect_ok(response: Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(anyhow!(extract_error(status, &body)))
    }

    // --- auth ---

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(request)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn logout(&self) -> Result<()> {
        let response = self
            .authorized(self.http.post(self.url("/api/auth/logout")))
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    /// Signed ticket letting the client upload directly to the asset host.
    pub async fn get_upload_signature(&self) -> Result<UploadTicket> {
        let response = self
            .authorized(self.http.post(self.url("/api/auth/get-signature")))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    // --- chat ---

    pub async fn conversations_for_user(&self, user_id: &str) -> Result<Vec<Conversation>> {
        let response = self
            .authorized(self.http.get(self.url(&format!("/api/conversation/user/{}", user_id))))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn create_conversation(
        &self,
        participant_one_id: &str,
        participant_two_id: &str,
    ) -> Result<Conversation> {
        let response = self
            .authorized(self.http.post(self.url("/api/conversation")))
            .json(&serde_json::json!({
                "participant_one_id": participant_one_id,
                "participant_two_id": participant_two_id,
            }))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn messages_for_conversation(&self, conversation_id: &str) -> Result<Vec<ChatMessage>> {
        debug!("[API] Fetching messages for conversation {}", conversation_id);
        let response = self
            .authorized(
                self.http
                    .get(self.url(&format!("/api/message/conversation/{}", conversation_id))),
            )
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn send_message(&self, message: &NewChatMessage) -> Result<ChatMessage> {
        let response = self
            .authorized(self.http.post(self.url("/api/message")))
            .json(message)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn update_message_state(&self, message_id: &str, state: DeliveryState) -> Result<()> {
        let response = self
            .authorized(self.http.patch(self.url(&format!("/api/message/{}/state", message_id))))
            .json(&serde_json::json!({ "state": state }))
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    /// Bulk mark-as-read for everything the peer sent in a conversation.
    pub async fn mark_conversation_read(&self, conversation_id: &str) -> Result<()> {
        let response = self
            .authorized(
                self.http
                    .put(self.url(&format!("/api/message/conversation/{}/read", conversation_id))),
            )
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    pub async fn user(&self, user_id: &str) -> Result<User> {
        let response = self
            .authorized(self.http.get(self.url(&format!("/api/user/{}", user_id))))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    // --- courses ---

    pub async fn courses_for_user(&self, user_id: &str) -> Result<Vec<Course>> {
        let response = self
            .authorized(self.http.get(self.url(&format!("/api/course/user/{}", user_id))))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn course(&self, course_id: &str) -> Result<Course> {
        let response = self
            .authorized(self.http.get(self.url(&format!("/api/course/{}", course_id))))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn join_course(&self, code: &str) -> Result<Course> {
        let response = self
            .authorized(self.http.post(self.url("/api/course/join")))
            .json(&serde_json::json!({ "code": code }))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    // --- assignments ---

    pub async fn assignments_for_course(&self, course_id: &str) -> Result<Vec<Assignment>> {
        let response = self
            .authorized(self.http.get(self.url(&format!("/api/assignment/course/{}", course_id))))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn assignment(&self, assignment_id: &str) -> Result<Assignment> {
        let response = self
            .authorized(self.http.get(self.url(&format!("/api/assignment/{}", assignment_id))))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn create_assignment(&self, assignment: &NewAssignment) -> Result<Assignment> {
        let response = self
            .authorized(self.http.post(self.url("/api/assignment")))
            .json(assignment)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    // --- submissions ---

    pub async fn submissions_for_assignment(&self, assignment_id: &str) -> Result<Vec<Submission>> {
        let response = self
            .authorized(
                self.http
                    .get(self.url(&format!("/api/submission/assignment/{}", assignment_id))),
            )
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn create_submission(&self, submission: &NewSubmission) -> Result<Submission> {
        let response = self
            .authorized(self.http.post(self.url("/api/submission")))
            .json(submission)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn update_submission_grade(
        &self,
        submission_id: &str,
        grade: Option<u8>,
    ) -> Result<Submission> {
        let response = self
            .authorized(
                self.http
                    .patch(self.url(&format!("/api/submission/{}/grade", submission_id))),
            )
            .json(&serde_json::json!({ "grade": grade }))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    // --- comments ---

    pub async fn comments_for_assignment(&self, assignment_id: &str) -> Result<Vec<Comment>> {
        let response = self
            .authorized(
                self.http
                    .get(self.url(&format!("/api/comment/assignment/{}", assignment_id))),
            )
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let response = self
            .authorized(self.http.post(self.url("/api/comment")))
            .json(comment)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    // --- quizzes ---

    pub async fn quiz(&self, quiz_id: &str) -> Result<Quiz> {
        let response = self
            .authorized(self.http.get(self.url(&format!("/api/quizzes/{}", quiz_id))))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn create_quiz(&self, quiz: &NewQuiz) -> Result<Quiz> {
        let response = self
            .authorized(self.http.post(self.url("/api/quizzes")))
            .json(quiz)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn submit_quiz_attempt(&self, attempt: &QuizAttempt) -> Result<QuizAttemptResult> {
        let response = self
            .authorized(self.http.post(self.url("/api/quiz-attempts")))
            .json(attempt)
            .send()
            .await?;
        Self::expect_json(response).await
    }
}

/// Prefer the backend's `{"error": ...}` / `{"message": ...}` text over a
/// bare status line.
fn extract_error(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    format!("request failed with status {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_body_wins_over_status() {
        let message = extract_error(
            StatusCode::UNAUTHORIZED,
            r#"{"error": "Invalid credentials"}"#,
        );
        assert_eq!(message, "Invalid credentials");

        let message = extract_error(StatusCode::BAD_REQUEST, r#"{"message": "missing field"}"#);
        assert_eq!(message, "missing field");
    }

    #[test]
    fn malformed_error_body_falls_back_to_status() {
        let message = extract_error(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(message, "request failed with status 500 Internal Server Error");
    }

    #[test]
    fn register_request_serializes_type_field() {
        let request = RegisterRequest {
            username: "ana".into(),
            name: "Ana".into(),
            lastname: "Martinez".into(),
            email: "ana@example.com".into(),
            password: "secret123".into(),
            grade: "5".into(),
            user_type: "student".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "student");
        assert!(value.get("user_type").is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("https://example.com/".into());
        assert_eq!(client.url("/api/message"), "https://example.com/api/message");
    }
}
