use std::collections::HashMap;
use std::path::PathBuf;

use iced::Command;
use log::{error, warn};

use crate::client::gui::views::logger::{LogLevel, LogMessage};
use crate::client::models::messages::Message;
use crate::client::services::chat_controller::{sendable_text, ChatSession};
use crate::client::services::socket_client::SocketEvent;
use crate::client::services::user_directory::UserDirectory;
use crate::client::services::Services;
use crate::common::models::{
    Assignment, Comment, Conversation, Course, DeliveryState, NewAssignment, NewChatMessage,
    NewComment, NewQuiz, NewSubmission, Question, QuestionType, Quiz, QuizAttempt, QuizResponse,
    Submission,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    CheckingSession,
    Auth,
    Home,
    Courses,
    CourseDetail(String),
    AssignmentDetail(String),
    Submissions(String),
    Chat,
    TakeQuiz(String),
    CreateQuiz { course_id: String },
}

#[derive(Default)]
pub struct EduAppState {
    pub app_state: AppState,

    // Identity
    pub session_token: Option<String>,
    pub current_user_id: String,
    pub current_user_type: String,

    // Auth form
    pub email: String,
    pub password: String,
    pub username: String,
    pub name: String,
    pub lastname: String,
    pub grade: String,
    pub is_login: bool,
    pub show_password: bool,
    pub loading: bool,
    pub error_message: Option<String>,
    pub logger: Vec<LogMessage>,

    // Chat
    pub conversations: Vec<Conversation>,
    pub conversation_search: String,
    pub chat_session: ChatSession,
    pub users: UserDirectory,
    pub chat_input: String,
    pub message_search_input: String,
    pub new_chat_peer: String,

    // Courses
    pub courses: Vec<Course>,
    pub join_course_code: String,
    pub current_course: Option<Course>,
    pub course_assignments: Vec<Assignment>,

    // Assignment creation form
    pub assignment_title: String,
    pub assignment_description: String,
    pub assignment_due_date: String,
    pub assignment_file_input: String,
    pub assignment_files: Vec<String>,
    pub creating_assignment: bool,

    // Assignment detail
    pub current_assignment: Option<Assignment>,
    pub comments: Vec<Comment>,
    pub comment_input: String,
    pub submission_file_input: String,
    pub uploading: bool,
    pub my_submission: Option<Submission>,

    // Grading
    pub submissions: Vec<Submission>,
    pub grade_inputs: HashMap<String, String>,

    // Quiz taking
    pub quiz: Option<Quiz>,
    pub quiz_responses: Vec<QuizResponse>,
    pub quiz_time_left: u32,
    pub quiz_submitting: bool,

    // Quiz creation
    pub quiz_title: String,
    pub quiz_questions: Vec<Question>,
}

fn blank_question() -> Question {
    Question {
        question_text: String::new(),
        question_type: QuestionType::MultipleChoice,
        options: Some(vec![String::new(); 4]),
        correct_answer: String::new(),
    }
}

/// Logger bars auto-dismiss after a short delay, same rhythm everywhere.
fn clear_log_later() -> Command<Message> {
    Command::perform(
        async {
            tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;
            Message::ClearLog
        },
        |m| m,
    )
}

impl EduAppState {
    fn push_log(&mut self, level: LogLevel, message: impl Into<String>) -> Command<Message> {
        self.logger.clear();
        self.logger.push(LogMessage { level, message: message.into() });
        clear_log_later()
    }

    /// Start lazy lookups for any participant the directory has not seen.
    fn resolve_users(&mut self, services: &Services, user_ids: Vec<String>) -> Command<Message> {
        let mut commands = Vec::new();
        for user_id in user_ids {
            if !self.users.mark_requested(&user_id) {
                continue;
            }
            let api = services.api.clone();
            commands.push(Command::perform(
                async move {
                    match api.user(&user_id).await {
                        Ok(user) => Message::UserResolved(user),
                        Err(e) => {
                            warn!("[API] User lookup {} failed: {}", user_id, e);
                            Message::None
                        }
                    }
                },
                |m| m,
            ));
        }
        Command::batch(commands)
    }

    pub fn update(&mut self, message: Message, services: &mut Services) -> Command<Message> {
        match message {
            Message::None => {}
            Message::ClearLog => {
                self.logger.clear();
            }
            Message::LogInfo(text) => return self.push_log(LogLevel::Info, text),
            Message::LogSuccess(text) => return self.push_log(LogLevel::Success, text),
            Message::LogError(text) => return self.push_log(LogLevel::Error, text),

            // --- auth form ---
            Message::EmailChanged(value) => self.email = value,
            Message::PasswordChanged(value) => self.password = value,
            Message::UsernameChanged(value) => self.username = value,
            Message::NameChanged(value) => self.name = value,
            Message::LastnameChanged(value) => self.lastname = value,
            Message::GradeChanged(value) => self.grade = value,
            Message::ToggleLoginRegister => {
                self.is_login = !self.is_login;
                self.error_message = None;
            }
            Message::ToggleShowPassword => self.show_password = !self.show_password,

            // --- navigation ---
            Message::OpenHome => {
                self.app_state = AppState::Home;
            }
            Message::OpenCourses => {
                self.app_state = AppState::Courses;
                let api = services.api.clone();
                let user_id = self.current_user_id.clone();
                return Command::perform(
                    async move {
                        match api.courses_for_user(&user_id).await {
                            Ok(courses) => Message::CoursesLoaded(courses),
                            Err(e) => {
                                error!("[API] Could not load courses: {}", e);
                                Message::LogError(format!("Could not load courses: {}", e))
                            }
                        }
                    },
                    |m| m,
                );
            }
            Message::OpenCourseDetail(course_id) => {
                self.app_state = AppState::CourseDetail(course_id.clone());
                self.current_course = None;
                self.course_assignments.clear();
                self.assignment_title.clear();
                self.assignment_description.clear();
                self.assignment_due_date.clear();
                self.assignment_file_input.clear();
                self.assignment_files.clear();

                let api = services.api.clone();
                let id = course_id.clone();
                let fetch_course = Command::perform(
                    async move {
                        match api.course(&id).await {
                            Ok(course) => Message::CourseLoaded(course),
                            Err(e) => {
                                error!("[API] Could not load course {}: {}", id, e);
                                Message::LogError(format!("Could not load course: {}", e))
                            }
                        }
                    },
                    |m| m,
                );
                let api = services.api.clone();
                let fetch_assignments = Command::perform(
                    async move {
                        match api.assignments_for_course(&course_id).await {
                            Ok(assignments) => Message::CourseAssignmentsLoaded(assignments),
                            Err(e) => {
                                error!("[API] Could not load assignments: {}", e);
                                Message::LogError(format!("Could not load assignments: {}", e))
                            }
                        }
                    },
                    |m| m,
                );
                return Command::batch([fetch_course, fetch_assignments]);
            }
            Message::OpenAssignmentDetail(assignment_id) => {
                self.app_state = AppState::AssignmentDetail(assignment_id.clone());
                self.current_assignment = None;
                self.comments.clear();
                self.comment_input.clear();
                self.submission_file_input.clear();
                self.my_submission = None;
                return Command::batch([
                    fetch_assignment(services, assignment_id.clone()),
                    fetch_comments(services, assignment_id.clone()),
                    fetch_submissions(services, assignment_id),
                ]);
            }
            Message::OpenSubmissions(assignment_id) => {
                self.app_state = AppState::Submissions(assignment_id.clone());
                self.submissions.clear();
                self.grade_inputs.clear();
                return Command::batch([
                    fetch_assignment(services, assignment_id.clone()),
                    fetch_submissions(services, assignment_id),
                ]);
            }
            Message::OpenChat => {
                self.app_state = AppState::Chat;
                let api = services.api.clone();
                let user_id = self.current_user_id.clone();
                return Command::perform(
                    async move {
                        match api.conversations_for_user(&user_id).await {
                            Ok(conversations) => Message::ConversationsLoaded(conversations),
                            Err(e) => {
                                error!("[API] Could not load conversations: {}", e);
                                Message::LogError(format!("Could not load conversations: {}", e))
                            }
                        }
                    },
                    |m| m,
                );
            }
            Message::OpenTakeQuiz(quiz_id) => {
                self.app_state = AppState::TakeQuiz(quiz_id.clone());
                self.quiz = None;
                self.quiz_responses.clear();
                self.quiz_time_left = 0;
                self.quiz_submitting = false;
                let api = services.api.clone();
                return Command::perform(
                    async move {
                        match api.quiz(&quiz_id).await {
                            Ok(quiz) => Message::QuizLoaded(quiz),
                            Err(e) => {
                                error!("[API] Could not load quiz {}: {}", quiz_id, e);
                                Message::LogError(format!("Could not load quiz: {}", e))
                            }
                        }
                    },
                    |m| m,
                );
            }
            Message::OpenCreateQuiz { course_id } => {
                self.app_state = AppState::CreateQuiz { course_id };
                self.quiz_title.clear();
                self.quiz_questions = vec![blank_question()];
            }

            // --- chat ---
            Message::ConversationsLoaded(conversations) => {
                let peers: Vec<String> = conversations
                    .iter()
                    .map(|c| c.peer_of(&self.current_user_id).to_string())
                    .collect();
                self.conversations = conversations;
                return self.resolve_users(services, peers);
            }
            Message::ConversationSearchChanged(value) => self.conversation_search = value,
            Message::SelectConversation(conversation) => {
                let previous = self.chat_session.conversation_id().map(String::from);
                let generation = self.chat_session.select(conversation.clone());
                self.message_search_input.clear();

                let socket = services.socket.clone();
                let api = services.api.clone();
                let conversation_id = conversation.id.clone();
                let fetch = Command::perform(
                    async move {
                        {
                            let guard = socket.lock().await;
                            if let Some(previous) = previous {
                                if let Err(e) = guard.unsubscribe_conversation(&previous) {
                                    warn!("[WS:CLIENT] Unsubscribe failed: {}", e);
                                }
                            }
                            if let Err(e) = guard.subscribe_conversation(&conversation_id) {
                                warn!("[WS:CLIENT] Subscribe failed: {}", e);
                            }
                        }
                        match api.messages_for_conversation(&conversation_id).await {
                            Ok(messages) => Message::MessagesFetched { generation, messages },
                            Err(e) => {
                                error!("[API] Could not load messages: {}", e);
                                Message::LogError(format!("Could not load messages: {}", e))
                            }
                        }
                    },
                    |m| m,
                );
                let peer = conversation.peer_of(&self.current_user_id).to_string();
                let resolve = self.resolve_users(services, vec![peer]);
                return Command::batch([fetch, resolve]);
            }
            Message::MessagesFetched { generation, messages } => {
                if self.chat_session.install_history(generation, messages) {
                    // Everything the peer sent is now on screen
                    if let Some(conversation_id) = self.chat_session.conversation_id() {
                        let api = services.api.clone();
                        let conversation_id = conversation_id.to_string();
                        return Command::perform(
                            async move {
                                if let Err(e) = api.mark_conversation_read(&conversation_id).await {
                                    warn!("[API] Mark-as-read failed: {}", e);
                                }
                                Message::None
                            },
                            |m| m,
                        );
                    }
                }
            }
            Message::ChatInputChanged(value) => self.chat_input = value,
            Message::SendChatMessage => {
                // Whitespace-only input: no network call, input untouched
                let Some(text) = sendable_text(&self.chat_input) else {
                    return Command::none();
                };
                let Some(conversation_id) = self.chat_session.conversation_id() else {
                    return Command::none();
                };
                let outgoing = NewChatMessage {
                    conversation_id: conversation_id.to_string(),
                    sender_id: self.current_user_id.clone(),
                    content: text.to_string(),
                };
                let api = services.api.clone();
                return Command::perform(
                    async move {
                        match api.send_message(&outgoing).await {
                            Ok(created) => Message::ChatMessageSent(created),
                            Err(e) => Message::ChatSendFailed(e.to_string()),
                        }
                    },
                    |m| m,
                );
            }
            Message::ChatMessageSent(message) => {
                self.chat_input.clear();
                let conversation_id = message.conversation_id.clone();
                self.chat_session.record_last_message(message.clone());
                self.chat_session.apply_live_message(&conversation_id, message.clone());
                // Notify peers over the socket; the REST call already persisted it
                let socket = services.socket.clone();
                return Command::perform(
                    async move {
                        let guard = socket.lock().await;
                        if let Err(e) = guard.emit_message(&message) {
                            warn!("[WS:CLIENT] Emit after send failed: {}", e);
                        }
                        Message::None
                    },
                    |m| m,
                );
            }
            Message::ChatSendFailed(reason) => {
                // Single attempt, no retry; the input stays for manual resend
                error!("[CHAT] Send failed: {}", reason);
                return self.push_log(LogLevel::Error, format!("Message not sent: {}", reason));
            }
            Message::MessageSearchChanged(value) => self.message_search_input = value,
            Message::RunMessageSearch => {
                self.chat_session.set_search_term(self.message_search_input.clone());
                self.chat_session.run_search();
            }
            Message::NewChatPeerChanged(value) => self.new_chat_peer = value,
            Message::StartConversation => {
                let peer = self.new_chat_peer.trim().to_string();
                if peer.is_empty() {
                    return Command::none();
                }
                let api = services.api.clone();
                let me = self.current_user_id.clone();
                return Command::perform(
                    async move {
                        match api.create_conversation(&me, &peer).await {
                            Ok(conversation) => Message::ConversationStarted(conversation),
                            Err(e) => {
                                error!("[API] Could not start chat: {}", e);
                                Message::LogError(format!("Could not start chat: {}", e))
                            }
                        }
                    },
                    |m| m,
                );
            }
            Message::ConversationStarted(conversation) => {
                self.new_chat_peer.clear();
                if !self.conversations.iter().any(|c| c.id == conversation.id) {
                    self.conversations.push(conversation.clone());
                }
                return Command::perform(async move { Message::SelectConversation(conversation) }, |m| m);
            }
            Message::UserResolved(user) => self.users.insert(user),
            Message::SocketEventReceived(event) => match event {
                SocketEvent::ConversationMessage { conversation_id, message } => {
                    let from_peer = message.sender_id != self.current_user_id;
                    let message_id = message.id.clone();
                    if self.chat_session.apply_live_message(&conversation_id, message) && from_peer {
                        // It landed in the open conversation, so the peer's
                        // message is seen the moment it renders
                        let api = services.api.clone();
                        return Command::perform(
                            async move {
                                if let Err(e) =
                                    api.update_message_state(&message_id, DeliveryState::Seen).await
                                {
                                    warn!("[API] Read receipt failed: {}", e);
                                }
                                Message::None
                            },
                            |m| m,
                        );
                    }
                }
                SocketEvent::MessageState { message_id, state } => {
                    self.chat_session.apply_state_event(&message_id, state);
                }
                SocketEvent::Disconnected(reason) => {
                    warn!("[WS:CLIENT] Disconnected: {}", reason);
                    return self.push_log(LogLevel::Warning, "Live updates disconnected");
                }
            },

            // --- courses ---
            Message::CoursesLoaded(courses) => self.courses = courses,
            Message::JoinCourseCodeChanged(value) => self.join_course_code = value,
            Message::JoinCourseSubmit => {
                let code = self.join_course_code.trim().to_string();
                if code.is_empty() {
                    return Command::none();
                }
                let api = services.api.clone();
                return Command::perform(
                    async move {
                        match api.join_course(&code).await {
                            Ok(course) => Message::CourseJoined(course),
                            Err(e) => {
                                error!("[API] Could not join course: {}", e);
                                Message::LogError(format!("Could not join course: {}", e))
                            }
                        }
                    },
                    |m| m,
                );
            }
            Message::CourseJoined(course) => {
                self.join_course_code.clear();
                let name = course.name.clone();
                if !self.courses.iter().any(|c| c.id == course.id) {
                    self.courses.push(course);
                }
                return self.push_log(LogLevel::Success, format!("Joined {}", name));
            }
            Message::CourseLoaded(course) => self.current_course = Some(course),
            Message::CourseAssignmentsLoaded(assignments) => self.course_assignments = assignments,

            // --- assignment creation ---
            Message::AssignmentTitleChanged(value) => self.assignment_title = value,
            Message::AssignmentDescriptionChanged(value) => self.assignment_description = value,
            Message::AssignmentDueDateChanged(value) => self.assignment_due_date = value,
            Message::AssignmentFilePathChanged(value) => self.assignment_file_input = value,
            Message::AddAssignmentFile => {
                let path = self.assignment_file_input.trim().to_string();
                if path.is_empty() {
                    return Command::none();
                }
                if !self.assignment_files.contains(&path) {
                    self.assignment_files.push(path);
                }
                self.assignment_file_input.clear();
            }
            Message::RemoveAssignmentFile(path) => {
                self.assignment_files.retain(|p| p != &path);
            }
            Message::CreateAssignmentSubmit => {
                let AppState::CourseDetail(course_id) = &self.app_state else {
                    return Command::none();
                };
                if self.assignment_title.trim().is_empty()
                    || self.assignment_description.trim().is_empty()
                    || self.assignment_due_date.trim().is_empty()
                {
                    return self.push_log(LogLevel::Error, "Please fill in every field");
                }
                self.creating_assignment = true;
                let api = services.api.clone();
                let uploads = services.uploads.clone();
                let new_assignment = NewAssignment {
                    title: self.assignment_title.clone(),
                    description: self.assignment_description.clone(),
                    course_id: course_id.clone(),
                    delivery_date: self.assignment_due_date.clone(),
                    file_url: Vec::new(),
                };
                let files: Vec<PathBuf> =
                    self.assignment_files.iter().map(PathBuf::from).collect();
                return Command::perform(
                    async move {
                        let mut uploaded = Vec::new();
                        for path in &files {
                            match uploads.upload_file(&api, path).await {
                                Ok(url) => uploaded.push(url),
                                Err(e) => {
                                    return Message::AssignmentCreationFailed(format!(
                                        "{}: {}",
                                        path.display(),
                                        e
                                    ))
                                }
                            }
                        }
                        let assignment = NewAssignment { file_url: uploaded, ..new_assignment };
                        match api.create_assignment(&assignment).await {
                            Ok(created) => Message::AssignmentCreated(created),
                            Err(e) => Message::AssignmentCreationFailed(e.to_string()),
                        }
                    },
                    |m| m,
                );
            }
            Message::AssignmentCreated(assignment) => {
                self.creating_assignment = false;
                self.course_assignments.push(assignment);
                self.assignment_title.clear();
                self.assignment_description.clear();
                self.assignment_due_date.clear();
                self.assignment_files.clear();
                return self.push_log(LogLevel::Success, "Assignment published");
            }
            Message::AssignmentCreationFailed(reason) => {
                self.creating_assignment = false;
                error!("[API] Assignment creation failed: {}", reason);
                return self.push_log(LogLevel::Error, format!("Could not create assignment: {}", reason));
            }

            // --- assignment detail / submission ---
            Message::AssignmentLoaded(assignment) => self.current_assignment = Some(assignment),
            Message::CommentsLoaded(comments) => {
                let authors: Vec<String> = comments.iter().map(|c| c.author_id.clone()).collect();
                self.comments = comments;
                return self.resolve_users(services, authors);
            }
            Message::CommentInputChanged(value) => self.comment_input = value,
            Message::SubmitComment => {
                let Some(assignment) = &self.current_assignment else {
                    return Command::none();
                };
                if self.comment_input.trim().is_empty() {
                    return Command::none();
                }
                let comment = NewComment {
                    assignment_id: assignment.id.clone(),
                    author_id: self.current_user_id.clone(),
                    content: self.comment_input.clone(),
                };
                let api = services.api.clone();
                return Command::perform(
                    async move {
                        match api.create_comment(&comment).await {
                            Ok(created) => Message::CommentCreated(created),
                            Err(e) => {
                                error!("[API] Could not post comment: {}", e);
                                Message::LogError(format!("Could not post comment: {}", e))
                            }
                        }
                    },
                    |m| m,
                );
            }
            Message::CommentCreated(comment) => {
                self.comment_input.clear();
                self.comments.push(comment);
            }
            Message::SubmissionFileChanged(value) => self.submission_file_input = value,
            Message::SubmitAssignment => {
                let Some(assignment) = &self.current_assignment else {
                    return Command::none();
                };
                let path = self.submission_file_input.trim().to_string();
                if path.is_empty() {
                    return self.push_log(LogLevel::Error, "Choose a file to submit");
                }
                self.uploading = true;
                let api = services.api.clone();
                let uploads = services.uploads.clone();
                let submission = NewSubmission {
                    assignment_id: assignment.id.clone(),
                    student_id: self.current_user_id.clone(),
                    file_url: String::new(),
                };
                return Command::perform(
                    async move {
                        let url = match uploads.upload_file(&api, &PathBuf::from(path)).await {
                            Ok(url) => url,
                            Err(e) => return Message::SubmissionFailed(e.to_string()),
                        };
                        let submission = NewSubmission { file_url: url, ..submission };
                        match api.create_submission(&submission).await {
                            Ok(created) => Message::AssignmentSubmitted(created),
                            Err(e) => Message::SubmissionFailed(e.to_string()),
                        }
                    },
                    |m| m,
                );
            }
            Message::AssignmentSubmitted(submission) => {
                self.uploading = false;
                self.submission_file_input.clear();
                self.my_submission = Some(submission);
                return self.push_log(LogLevel::Success, "Submission uploaded");
            }
            Message::SubmissionFailed(reason) => {
                self.uploading = false;
                error!("[UPLOAD] Submission failed: {}", reason);
                return self.push_log(LogLevel::Error, format!("Submission failed: {}", reason));
            }

            // --- grading ---
            Message::SubmissionsLoaded(submissions) => {
                self.my_submission = submissions
                    .iter()
                    .find(|s| s.student_id == self.current_user_id)
                    .cloned();
                self.grade_inputs = submissions
                    .iter()
                    .map(|s| {
                        let value = s.grade.map(|g| g.to_string()).unwrap_or_default();
                        (s.id.clone(), value)
                    })
                    .collect();
                self.submissions = submissions;
            }
            Message::GradeInputChanged { submission_id, value } => {
                self.grade_inputs.insert(submission_id, value);
            }
            Message::UpdateGrade { submission_id } => {
                let raw = self
                    .grade_inputs
                    .get(&submission_id)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default();
                let grade = if raw.is_empty() {
                    None
                } else {
                    match raw.parse::<u8>() {
                        Ok(value) if value <= 100 => Some(value),
                        _ => return self.push_log(LogLevel::Error, "Grade must be 0-100"),
                    }
                };
                let api = services.api.clone();
                return Command::perform(
                    async move {
                        match api.update_submission_grade(&submission_id, grade).await {
                            Ok(updated) => Message::GradeUpdated(updated),
                            Err(e) => {
                                error!("[API] Grade update failed: {}", e);
                                Message::LogError(format!("Grade update failed: {}", e))
                            }
                        }
                    },
                    |m| m,
                );
            }
            Message::GradeUpdated(submission) => {
                if let Some(existing) =
                    self.submissions.iter_mut().find(|s| s.id == submission.id)
                {
                    *existing = submission;
                }
                return self.push_log(LogLevel::Success, "Grade saved");
            }

            // --- quiz taking ---
            Message::QuizLoaded(quiz) => {
                self.quiz_responses = quiz
                    .questions
                    .iter()
                    .map(|q| QuizResponse {
                        question_text: q.question_text.clone(),
                        student_answer: String::new(),
                    })
                    .collect();
                self.quiz_time_left = quiz.time_limit_minutes * 60;
                self.quiz = Some(quiz);
            }
            Message::QuizAnswerChanged { index, answer } => {
                if let Some(response) = self.quiz_responses.get_mut(index) {
                    response.student_answer = answer;
                }
            }
            Message::QuizTick => {
                if self.quiz_time_left > 0 && !self.quiz_submitting {
                    self.quiz_time_left -= 1;
                    if self.quiz_time_left == 0 {
                        // Time is up: the attempt goes in as-is
                        return Command::perform(async { Message::SubmitQuizAttempt }, |m| m);
                    }
                }
            }
            Message::SubmitQuizAttempt => {
                let Some(quiz) = &self.quiz else {
                    return Command::none();
                };
                if self.quiz_submitting {
                    return Command::none();
                }
                self.quiz_submitting = true;
                let time_taken = if quiz.time_limit_minutes > 0 {
                    Some(quiz.time_limit_minutes - self.quiz_time_left.div_ceil(60))
                } else {
                    None
                };
                let attempt = QuizAttempt {
                    quiz_id: quiz.id.clone(),
                    student_id: self.current_user_id.clone(),
                    responses: self.quiz_responses.clone(),
                    time_taken_minutes: time_taken,
                };
                let api = services.api.clone();
                return Command::perform(
                    async move {
                        match api.submit_quiz_attempt(&attempt).await {
                            Ok(result) => Message::QuizSubmitted(result),
                            Err(e) => Message::QuizSubmitFailed(e.to_string()),
                        }
                    },
                    |m| m,
                );
            }
            Message::QuizSubmitted(result) => {
                self.quiz_submitting = false;
                self.quiz = None;
                self.app_state = AppState::Home;
                return self.push_log(
                    LogLevel::Success,
                    format!("Quiz submitted. Your score: {:.0}%", result.score),
                );
            }
            Message::QuizSubmitFailed(reason) => {
                self.quiz_submitting = false;
                error!("[API] Quiz submission failed: {}", reason);
                return self.push_log(LogLevel::Error, format!("Could not submit quiz: {}", reason));
            }

            // --- quiz creation ---
            Message::QuizTitleChanged(value) => self.quiz_title = value,
            Message::QuestionTextChanged { index, text } => {
                if let Some(question) = self.quiz_questions.get_mut(index) {
                    question.question_text = text;
                }
            }
            Message::QuestionTypeToggled { index } => {
                if let Some(question) = self.quiz_questions.get_mut(index) {
                    question.question_type = match question.question_type {
                        QuestionType::MultipleChoice => {
                            question.options = None;
                            QuestionType::OpenEnded
                        }
                        QuestionType::OpenEnded => {
                            question.options = Some(vec![String::new(); 4]);
                            QuestionType::MultipleChoice
                        }
                    };
                }
            }
            Message::QuestionOptionChanged { index, option, value } => {
                if let Some(options) = self
                    .quiz_questions
                    .get_mut(index)
                    .and_then(|q| q.options.as_mut())
                {
                    if let Some(slot) = options.get_mut(option) {
                        *slot = value;
                    }
                }
            }
            Message::QuestionAnswerChanged { index, answer } => {
                if let Some(question) = self.quiz_questions.get_mut(index) {
                    question.correct_answer = answer;
                }
            }
            Message::AddQuestion => self.quiz_questions.push(blank_question()),
            Message::RemoveQuestion(index) => {
                if index < self.quiz_questions.len() {
                    self.quiz_questions.remove(index);
                }
            }
            Message::CreateQuizSubmit => {
                let AppState::CreateQuiz { course_id } = &self.app_state else {
                    return Command::none();
                };
                if self.quiz_title.trim().is_empty()
                    || self
                        .quiz_questions
                        .iter()
                        .any(|q| q.question_text.trim().is_empty() || q.correct_answer.trim().is_empty())
                {
                    return self.push_log(LogLevel::Error, "Please fill in every question and answer");
                }
                let quiz = NewQuiz {
                    title: self.quiz_title.clone(),
                    class_id: course_id.clone(),
                    questions: self.quiz_questions.clone(),
                    feedback_enabled: true,
                };
                let api = services.api.clone();
                return Command::perform(
                    async move {
                        match api.create_quiz(&quiz).await {
                            Ok(created) => Message::QuizCreated(created),
                            Err(e) => Message::QuizCreationFailed(e.to_string()),
                        }
                    },
                    |m| m,
                );
            }
            Message::QuizCreated(quiz) => {
                let course_id = match &self.app_state {
                    AppState::CreateQuiz { course_id } => course_id.clone(),
                    _ => String::new(),
                };
                self.quiz_title.clear();
                self.quiz_questions.clear();
                let open = Command::perform(
                    async move { Message::OpenCourseDetail(course_id) },
                    |m| m,
                );
                let notice = self.push_log(LogLevel::Success, format!("Quiz \"{}\" created", quiz.title));
                return Command::batch([open, notice]);
            }
            Message::QuizCreationFailed(reason) => {
                error!("[API] Quiz creation failed: {}", reason);
                return self.push_log(LogLevel::Error, format!("Could not create quiz: {}", reason));
            }

            // Handled in the application layer (auth, session, socket loop)
            _ => {}
        }
        Command::none()
    }
}

fn fetch_assignment(services: &Services, assignment_id: String) -> Command<Message> {
    let api = services.api.clone();
    Command::perform(
        async move {
            match api.assignment(&assignment_id).await {
                Ok(assignment) => Message::AssignmentLoaded(assignment),
                Err(e) => {
                    error!("[API] Could not load assignment {}: {}", assignment_id, e);
                    Message::LogError(format!("Could not load assignment: {}", e))
                }
            }
        },
        |m| m,
    )
}

fn fetch_comments(services: &Services, assignment_id: String) -> Command<Message> {
    let api = services.api.clone();
    Command::perform(
        async move {
            match api.comments_for_assignment(&assignment_id).await {
                Ok(comments) => Message::CommentsLoaded(comments),
                Err(e) => {
                    // Comments are decoration; the assignment still renders
                    warn!("[API] Could not load comments: {}", e);
                    Message::None
                }
            }
        },
        |m| m,
    )
}

fn fetch_submissions(services: &Services, assignment_id: String) -> Command<Message> {
    let api = services.api.clone();
    Command::perform(
        async move {
            match api.submissions_for_assignment(&assignment_id).await {
                Ok(submissions) => Message::SubmissionsLoaded(submissions),
                Err(e) => {
                    warn!("[API] Could not load submissions: {}", e);
                    Message::None
                }
            }
        },
        |m| m,
    )
}
