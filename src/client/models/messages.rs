use crate::client::services::socket_client::SocketEvent;
use crate::common::models::{
    Assignment, ChatMessage, Comment, Conversation, Course, Quiz, QuizAttemptResult, Submission,
    User,
};

#[derive(Debug, Clone)]
pub enum Message {
    None,
    ClearLog,
    LogInfo(String),
    LogSuccess(String),
    LogError(String),

    // Auth flow
    EmailChanged(String),
    PasswordChanged(String),
    UsernameChanged(String),
    NameChanged(String),
    LastnameChanged(String),
    GradeChanged(String),
    ToggleLoginRegister,
    ToggleShowPassword,
    SubmitLoginOrRegister,
    AuthResult { success: bool, message: String, token: Option<String> },
    SessionMissing,
    Logout,
    LogoutCompleted,

    // Navigation
    OpenHome,
    OpenCourses,
    OpenCourseDetail(String),
    OpenAssignmentDetail(String),
    OpenSubmissions(String),
    OpenChat,
    OpenTakeQuiz(String),
    OpenCreateQuiz { course_id: String },

    // Socket plumbing
    SocketConnected,
    SocketFailed { error: String },
    SocketEventReceived(SocketEvent),
    CheckSocketEvents,

    // Chat
    ConversationsLoaded(Vec<Conversation>),
    ConversationSearchChanged(String),
    SelectConversation(Conversation),
    MessagesFetched { generation: u64, messages: Vec<ChatMessage> },
    ChatInputChanged(String),
    SendChatMessage,
    ChatMessageSent(ChatMessage),
    ChatSendFailed(String),
    MessageSearchChanged(String),
    RunMessageSearch,
    NewChatPeerChanged(String),
    StartConversation,
    ConversationStarted(Conversation),
    UserResolved(User),

    // Courses
    CoursesLoaded(Vec<Course>),
    JoinCourseCodeChanged(String),
    JoinCourseSubmit,
    CourseJoined(Course),
    CourseLoaded(Course),
    CourseAssignmentsLoaded(Vec<Assignment>),

    // Assignment creation (course detail)
    AssignmentTitleChanged(String),
    AssignmentDescriptionChanged(String),
    AssignmentDueDateChanged(String),
    AssignmentFilePathChanged(String),
    AddAssignmentFile,
    RemoveAssignmentFile(String),
    CreateAssignmentSubmit,
    AssignmentCreated(Assignment),
    AssignmentCreationFailed(String),

    // Assignment detail / submission
    AssignmentLoaded(Assignment),
    CommentsLoaded(Vec<Comment>),
    CommentInputChanged(String),
    SubmitComment,
    CommentCreated(Comment),
    SubmissionFileChanged(String),
    SubmitAssignment,
    AssignmentSubmitted(Submission),
    SubmissionFailed(String),

    // Grading
    SubmissionsLoaded(Vec<Submission>),
    GradeInputChanged { submission_id: String, value: String },
    UpdateGrade { submission_id: String },
    GradeUpdated(Submission),

    // Quiz taking
    QuizLoaded(Quiz),
    QuizAnswerChanged { index: usize, answer: String },
    QuizTick,
    SubmitQuizAttempt,
    QuizSubmitted(QuizAttemptResult),
    QuizSubmitFailed(String),

    // Quiz creation
    QuizTitleChanged(String),
    QuestionTextChanged { index: usize, text: String },
    QuestionTypeToggled { index: usize },
    QuestionOptionChanged { index: usize, option: usize, value: String },
    QuestionAnswerChanged { index: usize, answer: String },
    AddQuestion,
    RemoveQuestion(usize),
    CreateQuizSubmit,
    QuizCreated(Quiz),
    QuizCreationFailed(String),
}
