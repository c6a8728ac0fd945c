//! Bearer-token persistence across restarts. Primary store is the OS
//! keyring; a plain-file fallback exists but only when explicitly enabled
//! via `KEYRING_FALLBACK=true`, so tokens never land on disk silently.

use std::path::PathBuf;

use keyring::Entry;

const SERVICE: &str = "edutalk_app";
const ACCOUNT: &str = "edutalk_session";

fn fallback_enabled() -> bool {
    std::env::var("KEYRING_FALLBACK").unwrap_or_default() == "true"
}

fn fallback_path() -> PathBuf {
    PathBuf::from("data").join("session_token.txt")
}

pub fn save_session_token(token: &str) -> anyhow::Result<()> {
    if Entry::new(SERVICE, ACCOUNT).set_password(token).is_ok() {
        return Ok(());
    }
    if !fallback_enabled() {
        return Err(anyhow::anyhow!("keyring unavailable and file fallback disabled"));
    }
    let path = fallback_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    std::fs::write(&path, token)?;
    // warn but never print the token itself
    log::warn!("[SESSION_STORE] Keyring unavailable, persisted token to fallback file");
    Ok(())
}

pub fn load_session_token() -> Option<String> {
    if let Ok(token) = Entry::new(SERVICE, ACCOUNT).get_password() {
        let token = token.trim().to_string();
        if !token.is_empty() {
            return Some(token);
        }
    }
    if fallback_enabled() {
        if let Ok(contents) = std::fs::read_to_string(fallback_path()) {
            let token = contents.trim().to_string();
            if !token.is_empty() {
                return Some(token);
            }
        }
    }
    None
}

pub fn clear_session_token() -> anyhow::Result<()> {
    let _ = Entry::new(SERVICE, ACCOUNT).delete_password();
    if fallback_enabled() {
        let path = fallback_path();
        if path.exists() {
            let _ = std::fs::remove_file(&path);
        }
    }
    Ok(())
}
