pub mod api_client;
pub mod chat_controller;
pub mod socket_client;
pub mod upload_service;
pub mod user_directory;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::client::config::ClientConfig;

/// Everything the update loop needs to talk to the outside world, owned by
/// the application and passed down explicitly (no module-level globals).
pub struct Services {
    pub api: api_client::ApiClient,
    pub socket: Arc<Mutex<socket_client::SocketClient>>,
    pub uploads: upload_service::UploadService,
    pub config: ClientConfig,
}

impl Services {
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            api: api_client::ApiClient::new(config.api_base_url.clone()),
            socket: Arc::new(Mutex::new(socket_client::SocketClient::new(
                config.socket_url.clone(),
            ))),
            uploads: upload_service::UploadService::new(
                config.upload_base_url.clone(),
                config.upload_folder.clone(),
            ),
            config,
        }
    }
}
