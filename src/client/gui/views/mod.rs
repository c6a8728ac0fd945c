pub mod assignment_detail;
pub mod auth;
pub mod chat;
pub mod course_detail;
pub mod courses;
pub mod create_quiz;
pub mod home;
pub mod logger;
pub mod style;
pub mod submissions;
pub mod take_quiz;
