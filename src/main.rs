use iced::Application;

fn main() -> iced::Result {
    // load environment from .env (optional)
    let _ = dotenvy::dotenv();
    env_logger::init();
    edutalk::client::gui::app::EduApp::run(iced::Settings::default())
}
