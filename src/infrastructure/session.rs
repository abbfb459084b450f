use crate::domain::Session;
use std::fs;
use std::path::{Path, PathBuf};

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn from_env() -> Self {
        Self {
            path: resolve_session_path(),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Option<Session> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save(&self, session: &Session) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| e.to_string())?;
            }
        }
        match serde_json::to_string_pretty(session) {
            Ok(json) => fs::write(&self.path, json).map_err(|e| e.to_string()),
            Err(e) => Err(format!("Serialization failed: {}", e)),
        }
    }

    pub fn clear(&self) -> Result<(), String> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.to_string()),
        }
    }
}

fn resolve_session_path() -> PathBuf {
    if let Ok(path) = std::env::var("UTSAV_SESSION_FILE") {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return Path::new(&home).join(".utsav").join("session.json");
        }
    }
    PathBuf::from(".utsav-session.json")
}
