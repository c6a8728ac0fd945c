//! Direct-to-asset-host upload: ask the backend for a signed ticket, push
//! the file bytes straight to the host, and hand back the resulting URL for
//! registration as a submission or attachment.

use anyhow::{anyhow, Context, Result};
use log::info;
use serde::Deserialize;

use crate::client::services::api_client::ApiClient;
use crate::common::models::UploadTicket;

/// Accepted document types, mirroring the portal's submission rules.
const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];
const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Deserialize)]
struct AssetHostResponse {
    secure_url: String,
}

#[derive(Debug, Clone)]
pub struct UploadService {
    http: reqwest::Client,
    upload_base_url: String,
    folder: String,
}

impl UploadService {
    pub fn new(upload_base_url: String, folder: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            upload_base_url: upload_base_url.trim_end_matches('/').to_string(),
            folder,
        }
    }

    /// Reject files the backend would reject anyway, before spending a
    /// ticket on them.
    pub fn validate(path: &std::path::Path, size: u64) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(anyhow!("only PDF and Word documents are accepted"));
        }
        if size > MAX_FILE_BYTES {
            return Err(anyhow!("file exceeds the 5 MB limit"));
        }
        Ok(())
    }

    /// Upload one local file: signed ticket from the backend, then a
    /// multipart POST to the asset host. Returns the hosted URL.
    pub async fn upload_file(&self, api: &ApiClient, path: &std::path::Path) -> Result<String> {
        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::validate(path, metadata.len())?;

        let ticket = api.get_upload_signature().await?;
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("cannot read {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin")
            .to_string();

        let url = self.upload_url(&ticket);
        let folder = ticket.folder.clone().unwrap_or_else(|| self.folder.clone());
        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name.clone()),
            )
            .text("api_key", ticket.api_key.clone())
            .text("timestamp", ticket.timestamp.to_string())
            .text("signature", ticket.signature.clone())
            .text("folder", folder);

        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("asset host rejected upload ({}): {}", status, body));
        }
        let hosted: AssetHostResponse = response.json().await?;
        info!("[UPLOAD] {} -> {}", file_name, hosted.secure_url);
        Ok(hosted.secure_url)
    }

    fn upload_url(&self, ticket: &UploadTicket) -> String {
        format!("{}/{}/raw/upload", self.upload_base_url, ticket.cloud_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn accepts_documents_and_rejects_the_rest() {
        assert!(UploadService::validate(Path::new("tarea.pdf"), 1024).is_ok());
        assert!(UploadService::validate(Path::new("tarea.DOCX"), 1024).is_ok());
        assert!(UploadService::validate(Path::new("tarea.png"), 1024).is_err());
        assert!(UploadService::validate(Path::new("tarea"), 1024).is_err());
    }

    #[test]
    fn rejects_oversized_files() {
        assert!(UploadService::validate(Path::new("tarea.pdf"), MAX_FILE_BYTES).is_ok());
        assert!(UploadService::validate(Path::new("tarea.pdf"), MAX_FILE_BYTES + 1).is_err());
    }

    #[test]
    fn upload_url_targets_the_ticket_cloud() {
        let service = UploadService::new("https://assets.example.com/".into(), "tareas".into());
        let ticket = UploadTicket {
            signature: "sig".into(),
            timestamp: 1,
            api_key: "key".into(),
            cloud_name: "edutalk".into(),
            folder: None,
        };
        assert_eq!(
            service.upload_url(&ticket),
            "https://assets.example.com/edutalk/raw/upload"
        );
    }
}
