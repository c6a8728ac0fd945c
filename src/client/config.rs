use std::env;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub socket_url: String,
    pub upload_base_url: String,
    pub upload_folder: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            api_base_url: env::var("EDUTALK_API_URL")
                .unwrap_or_else(|_| "https://edutalk-by8w.onrender.com".to_string()),
            socket_url: env::var("EDUTALK_SOCKET_URL")
                .unwrap_or_else(|_| "wss://edutalk-by8w.onrender.com/socket".to_string()),
            upload_base_url: env::var("EDUTALK_UPLOAD_URL")
                .unwrap_or_else(|_| "https://api.cloudinary.com/v1_1".to_string()),
            upload_folder: env::var("EDUTALK_UPLOAD_FOLDER")
                .unwrap_or_else(|_| "tareas".to_string()),
        }
    }
}
