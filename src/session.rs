//! Session controller: authentication state, navigation mode, persistence.

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{REDACTED, Role};

/// Persisted authentication.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &REDACTED)
            .field("role", &self.role)
            .finish()
    }
}

/// Top-level navigation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Kiosk,
    Admin,
}

/// View the app should mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Kiosk,
    Login,
    Admin,
    SuperAdmin,
}

/// Durable storage for the session.
pub trait SessionStore: Send {
    fn load(&self) -> Result<Option<Session>>;
    fn save(&self, session: &Session) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// JSON file in the platform data directory.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the per-user data directory, falling back to the working directory.
    pub fn default_location() -> Self {
        Self::new(data_dir().join("session.json"))
    }
}

/// Per-user data directory for session and log files.
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("org", "BeninExcellence", "pointage")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(session)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Volatile store, used in tests.
#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.session.lock().map(|s| s.clone()).unwrap_or_default())
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Ok(mut slot) = self.session.lock() {
            *slot = Some(session.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if let Ok(mut slot) = self.session.lock() {
            *slot = None;
        }
        Ok(())
    }
}

/// Owns the current session and mode; the single writer of session storage.
pub struct SessionController {
    store: Box<dyn SessionStore>,
    session: Option<Session>,
    mode: Mode,
}

impl SessionController {
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self {
            store,
            session: None,
            mode: Mode::default(),
        }
    }

    /// Controller rehydrated from durable storage.
    ///
    /// The token is not checked against the server; an expired token shows up
    /// on the next failing request.
    pub fn restore(store: Box<dyn SessionStore>) -> Self {
        let mut controller = Self::new(store);
        match controller.store.load() {
            Ok(Some(session)) => {
                tracing::info!("Restored {} session", session.role.label());
                controller.session = Some(session);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Ignoring unreadable session: {}", e),
        }
        controller
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(|s| s.role)
    }

    /// Record a successful login.
    pub fn login_succeeded(&mut self, token: String, role: Role) {
        let session = Session { token, role };
        if let Err(e) = self.store.save(&session) {
            tracing::error!("Failed to persist session: {}", e);
        }
        tracing::info!("Logged in as {}", role.label());
        self.session = Some(session);
    }

    /// Forget the session and return to the kiosk.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::error!("Failed to clear stored session: {}", e);
        }
        self.session = None;
        self.mode = Mode::Kiosk;
        tracing::info!("Logged out");
    }

    pub fn active_view(&self) -> ActiveView {
        match (self.mode, self.role()) {
            (Mode::Kiosk, _) => ActiveView::Kiosk,
            (Mode::Admin, None) => ActiveView::Login,
            (Mode::Admin, Some(Role::SuperAdmin)) => ActiveView::SuperAdmin,
            (Mode::Admin, Some(Role::Admin)) => ActiveView::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> SessionController {
        SessionController::new(Box::new(MemorySessionStore::default()))
    }

    #[test]
    fn test_default_view_is_kiosk() {
        let session = controller();
        assert_eq!(session.mode(), Mode::Kiosk);
        assert!(!session.is_authenticated());
        assert_eq!(session.active_view(), ActiveView::Kiosk);
    }

    #[test]
    fn test_admin_mode_requires_login() {
        let mut session = controller();
        session.set_mode(Mode::Admin);
        assert_eq!(session.active_view(), ActiveView::Login);
    }

    #[test]
    fn test_role_selects_view() {
        let mut session = controller();
        session.set_mode(Mode::Admin);
        session.login_succeeded("t1".to_string(), Role::SuperAdmin);
        assert_eq!(session.active_view(), ActiveView::SuperAdmin);

        let mut session = controller();
        session.set_mode(Mode::Admin);
        session.login_succeeded("t2".to_string(), Role::Admin);
        assert_eq!(session.active_view(), ActiveView::Admin);
        assert_eq!(session.token(), Some("t2"));
    }

    #[test]
    fn test_authenticated_kiosk_mode_shows_kiosk() {
        let mut session = controller();
        session.login_succeeded("t".to_string(), Role::Admin);
        assert_eq!(session.active_view(), ActiveView::Kiosk);
    }

    #[test]
    fn test_session_debug_hides_token() {
        let session = Session {
            token: "jeton-secret".to_string(),
            role: Role::SuperAdmin,
        };
        let text = format!("{session:?}");
        assert!(text.contains("SuperAdmin"));
        assert!(!text.contains("jeton-secret"));
    }

    #[test]
    fn test_logout_clears_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = SessionController::new(Box::new(FileSessionStore::new(&path)));
        session.set_mode(Mode::Admin);
        session.login_succeeded("secret".to_string(), Role::Admin);
        assert!(path.exists());

        session.logout();
        assert!(!path.exists());
        assert!(!session.is_authenticated());
        assert_eq!(session.mode(), Mode::Kiosk);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_restore_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut first = SessionController::new(Box::new(FileSessionStore::new(&path)));
        first.login_succeeded("persisted".to_string(), Role::SuperAdmin);

        let restored = SessionController::restore(Box::new(FileSessionStore::new(&path)));
        assert!(restored.is_authenticated());
        assert_eq!(restored.token(), Some("persisted"));
        assert_eq!(restored.role(), Some(Role::SuperAdmin));
        assert_eq!(restored.mode(), Mode::Kiosk);
    }

    #[test]
    fn test_restore_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let restored = SessionController::restore(Box::new(FileSessionStore::new(&path)));
        assert!(!restored.is_authenticated());
    }

    #[test]
    fn test_clear_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("absent.json"));
        assert!(store.clear().is_ok());
        assert!(store.load().unwrap().is_none());
    }
}
