use iced::{Application, Command, Element, Subscription, Theme};
use log::{error, info, warn};

use crate::client::config::ClientConfig;
use crate::client::gui::views;
use crate::client::gui::views::logger::{LogLevel, LogMessage};
use crate::client::models::app_state::{AppState, EduAppState};
use crate::client::models::messages::Message;
use crate::client::services::api_client::RegisterRequest;
use crate::client::services::Services;
use crate::client::utils::{session_store, token_claims};

pub struct EduApp {
    pub state: EduAppState,
    pub services: Services,
}

impl Application for EduApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        let services = Services::from_config(ClientConfig::from_env());
        let state = EduAppState { is_login: true, ..Default::default() };
        let app = EduApp { state, services };

        // Startup: a stored token whose payload still decodes counts as a
        // session; the backend rejects it on the first call if it expired.
        let cmd = Command::perform(
            async {
                match session_store::load_session_token() {
                    Some(token) => {
                        info!("[APP_START] Found saved session token (redacted)");
                        match token_claims::decode_claims(&token) {
                            Ok(_) => Message::AuthResult {
                                success: true,
                                message: "Welcome back".to_string(),
                                token: Some(token),
                            },
                            Err(e) => {
                                warn!("[APP_START] Saved token unusable: {}", e);
                                Message::SessionMissing
                            }
                        }
                    }
                    None => Message::SessionMissing,
                }
            },
            |m| m,
        );

        (app, cmd)
    }

    fn title(&self) -> String {
        "EduTalk".to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::SubmitLoginOrRegister => {
                let api = self.services.api.clone();
                let is_login = self.state.is_login;
                let email = self.state.email.clone();
                let password = self.state.password.clone();
                let register = RegisterRequest {
                    username: self.state.username.clone(),
                    name: self.state.name.clone(),
                    lastname: self.state.lastname.clone(),
                    email: self.state.email.clone(),
                    password: self.state.password.clone(),
                    grade: self.state.grade.clone(),
                    // the portal only self-registers students
                    user_type: "student".to_string(),
                };
                self.state.loading = true;
                self.state.error_message = None;
                self.state.logger.push(LogMessage {
                    level: LogLevel::Info,
                    message: "Contacting EduTalk...".to_string(),
                });
                return Command::perform(
                    async move {
                        let result = if is_login {
                            api.login(&email, &password).await
                        } else {
                            api.register(&register).await
                        };
                        match result {
                            Ok(auth) => Message::AuthResult {
                                success: true,
                                message: auth.message,
                                token: Some(auth.token),
                            },
                            Err(e) => Message::AuthResult {
                                success: false,
                                message: e.to_string(),
                                token: None,
                            },
                        }
                    },
                    |m| m,
                );
            }
            Message::AuthResult { success, message, token } => {
                self.state.loading = false;
                if !success {
                    self.state.error_message = Some(message.clone());
                    self.state.logger.clear();
                    self.state.logger.push(LogMessage { level: LogLevel::Error, message });
                    return Command::none();
                }
                let Some(token) = token else {
                    return Command::none();
                };
                let claims = match token_claims::decode_claims(&token) {
                    Ok(claims) => claims,
                    Err(e) => {
                        error!("[APP] Credential token unusable: {}", e);
                        self.state.error_message = Some("Received an unusable token".to_string());
                        return Command::none();
                    }
                };
                self.state.current_user_id = claims.id;
                self.state.current_user_type = claims.user_type.unwrap_or_default();
                self.state.session_token = Some(token.clone());
                self.services.api.set_token(token.clone());
                if let Err(e) = session_store::save_session_token(&token) {
                    // non-fatal: the session just will not survive a restart
                    warn!("[APP] Could not persist session token: {}", e);
                }
                self.state.password.clear();
                self.state.app_state = AppState::Home;
                self.state.logger.clear();
                self.state.logger.push(LogMessage {
                    level: LogLevel::Success,
                    message,
                });

                // Bring up the live-update channel
                let socket = self.services.socket.clone();
                let connect = Command::perform(
                    async move {
                        let mut guard = socket.lock().await;
                        match guard.connect().await {
                            Ok(()) => Message::SocketConnected,
                            Err(e) => Message::SocketFailed { error: e.to_string() },
                        }
                    },
                    |m| m,
                );
                let cleanup = Command::perform(
                    async {
                        tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;
                        Message::ClearLog
                    },
                    |m| m,
                );
                return Command::batch([connect, cleanup]);
            }
            Message::SessionMissing => {
                self.state.app_state = AppState::Auth;
                self.state.loading = false;
                return Command::none();
            }
            Message::SocketConnected => {
                info!("[APP] Socket connected, starting event loop");
                return Command::perform(async { Message::CheckSocketEvents }, |m| m);
            }
            Message::SocketFailed { error } => {
                // Chat degrades to fetch-on-open; everything else still works
                warn!("[APP] Socket unavailable: {}", error);
                return self
                    .state
                    .update(Message::LogError("Live updates unavailable".to_string()), &mut self.services);
            }
            Message::CheckSocketEvents => {
                let socket = self.services.socket.clone();
                return Command::perform(
                    async move {
                        let mut guard = socket.lock().await;
                        if let Some(event) = guard.try_receive_event() {
                            Message::SocketEventReceived(event)
                        } else {
                            drop(guard);
                            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
                            Message::CheckSocketEvents
                        }
                    },
                    |m| m,
                );
            }
            Message::SocketEventReceived(event) => {
                let applied = self
                    .state
                    .update(Message::SocketEventReceived(event), &mut self.services);
                let resume = Command::perform(async { Message::CheckSocketEvents }, |m| m);
                return Command::batch([applied, resume]);
            }
            Message::Logout => {
                let _ = session_store::clear_session_token();
                let api = self.services.api.clone();
                self.services.api.clear_token();
                self.state = EduAppState { app_state: AppState::Auth, is_login: true, ..Default::default() };
                return Command::perform(
                    async move {
                        if let Err(e) = api.logout().await {
                            warn!("[API] Logout call failed: {}", e);
                        }
                        Message::LogoutCompleted
                    },
                    |m| m,
                );
            }
            Message::LogoutCompleted => {
                return Command::none();
            }
            other => return self.state.update(other, &mut self.services),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        // Quiz countdown; nothing else needs a clock
        match &self.state.app_state {
            AppState::TakeQuiz(_) if self.state.quiz_time_left > 0 && !self.state.quiz_submitting => {
                iced::time::every(std::time::Duration::from_secs(1)).map(|_| Message::QuizTick)
            }
            _ => Subscription::none(),
        }
    }

    fn view(&self) -> Element<Message> {
        match &self.state.app_state {
            AppState::CheckingSession => iced::widget::Text::new("Checking session...").into(),
            AppState::Auth => views::auth::view(&self.state),
            AppState::Home => views::home::view(&self.state),
            AppState::Courses => views::courses::view(&self.state),
            AppState::CourseDetail(_) => views::course_detail::view(&self.state),
            AppState::AssignmentDetail(_) => views::assignment_detail::view(&self.state),
            AppState::Submissions(_) => views::submissions::view(&self.state),
            AppState::Chat => views::chat::view(&self.state),
            AppState::TakeQuiz(_) => views::take_quiz::view(&self.state),
            AppState::CreateQuiz { .. } => views::create_quiz::view(&self.state),
        }
    }
}
