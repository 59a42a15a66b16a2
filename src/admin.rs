//! Administration console state: members, import/export, presence, history,
//! and (for the superadmin) admin accounts and password change.
//!
//! User actions and request results go in; the requests the view must issue
//! come out. Every successful mutation asks for exactly one list refresh.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::client::ExportKind;
use crate::error::{AppError, Result};
use crate::feedback::FeedbackSlot;
use crate::models::{
    AdminAccount, ChangePassword, ImportSummary, Lien, Member, Movement, NewAdmin, NewMember, Present,
};

/// Shown when the server rejects the stored token without a message.
pub const SESSION_EXPIRED: &str = "Session expirée, veuillez vous reconnecter";

/// File extensions accepted for bulk import.
pub const IMPORT_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

/// Console tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    AddMember,
    Import,
    Members,
    Presents,
    History,
    Accounts,
    Password,
}

impl AdminTab {
    /// Tabs available to a plain admin.
    pub const ADMIN: [AdminTab; 5] = [
        AdminTab::AddMember,
        AdminTab::Import,
        AdminTab::Members,
        AdminTab::Presents,
        AdminTab::History,
    ];

    /// Tabs available to the superadmin.
    pub const SUPER_ADMIN: [AdminTab; 7] = [
        AdminTab::Accounts,
        AdminTab::Password,
        AdminTab::AddMember,
        AdminTab::Import,
        AdminTab::Members,
        AdminTab::Presents,
        AdminTab::History,
    ];
}

/// Request the view must perform.
#[derive(Debug)]
pub enum AdminRequest {
    LoadMembers,
    LoadMovements,
    LoadPresents,
    LoadAdmins,
    CreateMember(NewMember),
    DeactivateMember(i64),
    Import(PathBuf),
    Export(ExportKind),
    CreateAdmin(NewAdmin),
    DeleteAdmin(i64),
    ChangePassword(ChangePassword),
}

/// Result of a request.
#[derive(Debug)]
pub enum AdminEvent {
    MembersLoaded(Result<Vec<Member>>),
    MovementsLoaded(Result<Vec<Movement>>),
    PresentsLoaded(Result<Vec<Present>>),
    AdminsLoaded(Result<Vec<AdminAccount>>),
    MemberCreated(Result<()>),
    MemberDeactivated(Result<()>),
    ImportFinished(Result<ImportSummary>),
    Exported(Result<PathBuf>),
    AdminCreated(Result<()>),
    AdminDeleted(Result<()>),
    PasswordChanged(Result<()>),
}

/// Add-member form.
#[derive(Debug, Clone, Default)]
pub struct MemberForm {
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    pub lien: Lien,
}

impl MemberForm {
    /// Build the request; all three text fields are required.
    pub fn to_request(&self) -> Result<NewMember> {
        let nom = self.nom.trim();
        let prenom = self.prenom.trim();
        let telephone = self.telephone.trim();
        if nom.is_empty() || prenom.is_empty() || telephone.is_empty() {
            return Err(AppError::validation("Nom, prénom et téléphone sont requis"));
        }
        Ok(NewMember {
            nom: nom.to_string(),
            prenom: prenom.to_string(),
            telephone: telephone.to_string(),
            lien: self.lien.clone(),
        })
    }
}

/// Password change form.
#[derive(Clone, Default)]
pub struct PasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// A destructive action awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirm {
    pub id: i64,
    pub label: String,
}

pub struct AdminState {
    pub tab: AdminTab,
    super_admin: bool,
    pub members: Vec<Member>,
    pub movements: Vec<Movement>,
    pub presents: Vec<Present>,
    pub admins: Vec<AdminAccount>,
    pub member_form: MemberForm,
    pub admin_form: NewAdmin,
    pub password_form: PasswordForm,
    pending_deactivation: Option<PendingConfirm>,
    pending_admin_delete: Option<PendingConfirm>,
    importing: bool,
    exporting: bool,
    feedback: FeedbackSlot,
}

impl AdminState {
    pub fn new(super_admin: bool, message_ttl: Duration) -> Self {
        Self {
            tab: if super_admin { AdminTab::Accounts } else { AdminTab::AddMember },
            super_admin,
            members: Vec::new(),
            movements: Vec::new(),
            presents: Vec::new(),
            admins: Vec::new(),
            member_form: MemberForm::default(),
            admin_form: NewAdmin::default(),
            password_form: PasswordForm::default(),
            pending_deactivation: None,
            pending_admin_delete: None,
            importing: false,
            exporting: false,
            feedback: FeedbackSlot::expiring(message_ttl),
        }
    }

    pub fn is_super_admin(&self) -> bool {
        self.super_admin
    }

    pub fn tabs(&self) -> &'static [AdminTab] {
        if self.super_admin { &AdminTab::SUPER_ADMIN } else { &AdminTab::ADMIN }
    }

    /// Fetches issued when the console is mounted.
    pub fn initial_requests(&self) -> Vec<AdminRequest> {
        let mut requests = vec![
            AdminRequest::LoadMembers,
            AdminRequest::LoadMovements,
            AdminRequest::LoadPresents,
        ];
        if self.super_admin {
            requests.push(AdminRequest::LoadAdmins);
        }
        requests
    }

    pub fn feedback(&self) -> &FeedbackSlot {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut FeedbackSlot {
        &mut self.feedback
    }

    pub fn tick(&mut self, now: Instant) {
        self.feedback.tick(now);
    }

    pub fn is_importing(&self) -> bool {
        self.importing
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    // ========== Members ==========

    pub fn submit_member(&mut self, now: Instant) -> Option<AdminRequest> {
        match self.member_form.to_request() {
            Ok(member) => Some(AdminRequest::CreateMember(member)),
            Err(e) => {
                self.feedback.error(e.user_message("Erreur"), now);
                None
            }
        }
    }

    /// Ask for confirmation before deactivating. Inactive members are ignored.
    pub fn request_deactivation(&mut self, member: &Member) -> bool {
        if !member.can_deactivate() {
            return false;
        }
        self.pending_deactivation = Some(PendingConfirm {
            id: member.id,
            label: member.display_name(),
        });
        true
    }

    pub fn pending_deactivation(&self) -> Option<&PendingConfirm> {
        self.pending_deactivation.as_ref()
    }

    pub fn confirm_deactivation(&mut self) -> Option<AdminRequest> {
        self.pending_deactivation
            .take()
            .map(|pending| AdminRequest::DeactivateMember(pending.id))
    }

    pub fn cancel_deactivation(&mut self) {
        self.pending_deactivation = None;
    }

    // ========== Import / export ==========

    /// Start uploading `path`; only spreadsheet and CSV files are accepted.
    pub fn start_import(&mut self, path: PathBuf, now: Instant) -> Option<AdminRequest> {
        if self.importing {
            return None;
        }
        if !is_importable(&path) {
            self.feedback
                .error("Format non supporté (fichiers .xlsx, .xls ou .csv uniquement)", now);
            return None;
        }
        self.importing = true;
        Some(AdminRequest::Import(path))
    }

    pub fn start_export(&mut self, kind: ExportKind) -> Option<AdminRequest> {
        if self.exporting {
            return None;
        }
        self.exporting = true;
        Some(AdminRequest::Export(kind))
    }

    // ========== Admin accounts ==========

    pub fn submit_admin(&mut self, now: Instant) -> Option<AdminRequest> {
        if !self.super_admin {
            return None;
        }
        match self.admin_form.validate() {
            Ok(()) => Some(AdminRequest::CreateAdmin(self.admin_form.clone())),
            Err(e) => {
                self.feedback.error(e.user_message("Erreur"), now);
                None
            }
        }
    }

    /// Ask for confirmation before deleting. Never offered for the superadmin.
    pub fn request_admin_deletion(&mut self, admin: &AdminAccount) -> bool {
        if !self.super_admin || !admin.can_be_deleted() {
            return false;
        }
        self.pending_admin_delete = Some(PendingConfirm {
            id: admin.id,
            label: admin.username.clone(),
        });
        true
    }

    pub fn pending_admin_delete(&self) -> Option<&PendingConfirm> {
        self.pending_admin_delete.as_ref()
    }

    pub fn confirm_admin_deletion(&mut self) -> Option<AdminRequest> {
        self.pending_admin_delete
            .take()
            .map(|pending| AdminRequest::DeleteAdmin(pending.id))
    }

    pub fn cancel_admin_deletion(&mut self) {
        self.pending_admin_delete = None;
    }

    /// Validate the password form; a confirmation mismatch never reaches the server.
    pub fn submit_password(&mut self, now: Instant) -> Option<AdminRequest> {
        let form = &self.password_form;
        match ChangePassword::from_form(&form.old_password, &form.new_password, &form.confirm_password) {
            Ok(body) => Some(AdminRequest::ChangePassword(body)),
            Err(e) => {
                self.feedback.error(e.user_message("Erreur"), now);
                None
            }
        }
    }

    // ========== Results ==========

    /// Apply a request result and return the follow-up requests.
    pub fn handle(&mut self, event: AdminEvent, now: Instant) -> Vec<AdminRequest> {
        match event {
            AdminEvent::MembersLoaded(result) => {
                self.loaded(result, |s, v| s.members = v, "membres", now);
                vec![]
            }
            AdminEvent::MovementsLoaded(result) => {
                self.loaded(result, |s, v| s.movements = v, "mouvements", now);
                vec![]
            }
            AdminEvent::PresentsLoaded(result) => {
                self.loaded(result, |s, v| s.presents = v, "présents", now);
                vec![]
            }
            AdminEvent::AdminsLoaded(result) => {
                self.loaded(result, |s, v| s.admins = v, "admins", now);
                vec![]
            }
            AdminEvent::MemberCreated(result) => match result {
                Ok(()) => {
                    self.feedback.success("Membre ajouté avec succès", now);
                    self.member_form = MemberForm::default();
                    vec![AdminRequest::LoadMembers]
                }
                Err(e) => self.failed(&e, "Erreur", now),
            },
            AdminEvent::MemberDeactivated(result) => match result {
                Ok(()) => {
                    self.feedback.success("Membre désactivé", now);
                    vec![AdminRequest::LoadMembers]
                }
                Err(e) => self.failed(&e, "Erreur", now),
            },
            AdminEvent::ImportFinished(result) => {
                self.importing = false;
                match result {
                    Ok(summary) => {
                        tracing::info!("Import finished: {} ({} errors)", summary.message, summary.erreurs);
                        if summary.has_errors() {
                            self.feedback.warning(summary.message, now);
                        } else {
                            self.feedback.success(summary.message, now);
                        }
                        vec![AdminRequest::LoadMembers]
                    }
                    Err(e) => self.failed(&e, "Erreur import", now),
                }
            }
            AdminEvent::Exported(result) => {
                self.exporting = false;
                match result {
                    Ok(path) => {
                        tracing::info!("Export saved to {}", path.display());
                        self.feedback
                            .success(format!("Export réussi : {}", path.display()), now);
                        vec![]
                    }
                    Err(e) => self.failed(&e, "Erreur export", now),
                }
            }
            AdminEvent::AdminCreated(result) => match result {
                Ok(()) => {
                    self.feedback.success("Admin ajouté avec succès", now);
                    self.admin_form = NewAdmin::default();
                    vec![AdminRequest::LoadAdmins]
                }
                Err(e) => self.failed(&e, "Erreur", now),
            },
            AdminEvent::AdminDeleted(result) => match result {
                Ok(()) => {
                    self.feedback.success("Admin supprimé", now);
                    vec![AdminRequest::LoadAdmins]
                }
                Err(e) => self.failed(&e, "Erreur", now),
            },
            AdminEvent::PasswordChanged(result) => match result {
                Ok(()) => {
                    self.feedback.success("Mot de passe changé avec succès", now);
                    self.password_form = PasswordForm::default();
                    vec![]
                }
                Err(e) => self.failed(&e, "Erreur", now),
            },
        }
    }

    fn loaded<T>(&mut self, result: Result<T>, store: impl FnOnce(&mut Self, T), what: &str, now: Instant) {
        match result {
            Ok(value) => store(self, value),
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", what, e);
                let fallback = format!("Erreur chargement {what}");
                self.feedback.error(user_message(&e, &fallback), now);
            }
        }
    }

    fn failed(&mut self, e: &AppError, fallback: &str, now: Instant) -> Vec<AdminRequest> {
        tracing::warn!("Admin action failed: {}", e);
        self.feedback.error(user_message(e, fallback), now);
        vec![]
    }
}

fn user_message(e: &AppError, fallback: &str) -> String {
    if e.is_unauthorized() {
        e.user_message(SESSION_EXPIRED)
    } else {
        e.user_message(fallback)
    }
}

fn is_importable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMPORT_EXTENSIONS.iter().any(|ok| ext.eq_ignore_ascii_case(ok)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Tone;
    use crate::models::{MemberStatus, Role};
    use reqwest::StatusCode;

    const TTL: Duration = Duration::from_secs(4);

    fn admin() -> AdminState {
        AdminState::new(false, TTL)
    }

    fn super_admin() -> AdminState {
        AdminState::new(true, TTL)
    }

    fn member(id: i64, statut: MemberStatus) -> Member {
        Member {
            id,
            nom: "AGBO".to_string(),
            prenom: "Marie".to_string(),
            telephone: "96654321".to_string(),
            lien: Lien::Maman,
            statut,
        }
    }

    fn account(id: i64, role: Role) -> AdminAccount {
        AdminAccount {
            id,
            username: format!("user{id}"),
            role,
            date_creation: None,
        }
    }

    fn server_error(message: &str) -> AppError {
        AppError::Server {
            status: StatusCode::BAD_REQUEST,
            message: Some(message.to_string()),
        }
    }

    fn tone(state: &AdminState) -> Option<Tone> {
        state.feedback().current().map(|f| f.tone)
    }

    #[test]
    fn test_initial_requests() {
        assert_eq!(admin().initial_requests().len(), 3);
        let requests = super_admin().initial_requests();
        assert_eq!(requests.len(), 4);
        assert!(matches!(requests[3], AdminRequest::LoadAdmins));
    }

    #[test]
    fn test_super_admin_has_every_admin_tab() {
        let state = super_admin();
        for tab in AdminTab::ADMIN {
            assert!(state.tabs().contains(&tab));
        }
        assert!(state.tabs().contains(&AdminTab::Accounts));
        assert!(!admin().tabs().contains(&AdminTab::Accounts));
    }

    #[test]
    fn test_member_form_requires_fields() {
        let now = Instant::now();
        let mut state = admin();
        state.member_form.nom = "AGBO".to_string();
        state.member_form.prenom = "Marie".to_string();

        assert!(state.submit_member(now).is_none());
        assert_eq!(tone(&state), Some(Tone::Error));

        state.member_form.telephone = " 96654321 ".to_string();
        match state.submit_member(now) {
            Some(AdminRequest::CreateMember(m)) => {
                assert_eq!(m.telephone, "96654321");
                assert_eq!(m.lien, Lien::Membre);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_member_created_clears_form_and_refreshes_once() {
        let now = Instant::now();
        let mut state = admin();
        state.member_form.nom = "AGBO".to_string();

        let follow_up = state.handle(AdminEvent::MemberCreated(Ok(())), now);
        assert!(matches!(follow_up.as_slice(), [AdminRequest::LoadMembers]));
        assert!(state.member_form.nom.is_empty());
        assert_eq!(tone(&state), Some(Tone::Success));
    }

    #[test]
    fn test_member_creation_failure_keeps_form() {
        let now = Instant::now();
        let mut state = admin();
        state.member_form.nom = "AGBO".to_string();

        let follow_up = state.handle(AdminEvent::MemberCreated(Err(server_error("Téléphone déjà utilisé"))), now);
        assert!(follow_up.is_empty());
        assert_eq!(state.member_form.nom, "AGBO");
        assert_eq!(state.feedback().current().unwrap().text, "Téléphone déjà utilisé");
    }

    #[test]
    fn test_deactivation_requires_confirmation() {
        let mut state = admin();
        let active = member(3, MemberStatus::Actif);

        assert!(state.request_deactivation(&active));
        assert_eq!(state.pending_deactivation().map(|p| p.id), Some(3));

        state.cancel_deactivation();
        assert!(state.confirm_deactivation().is_none());

        state.request_deactivation(&active);
        assert!(matches!(state.confirm_deactivation(), Some(AdminRequest::DeactivateMember(3))));
        assert!(state.pending_deactivation().is_none());
    }

    #[test]
    fn test_inactive_member_has_no_action() {
        let mut state = admin();
        assert!(!state.request_deactivation(&member(3, MemberStatus::Inactif)));
        assert!(state.pending_deactivation().is_none());
    }

    #[test]
    fn test_deactivated_member_stays_listed() {
        let now = Instant::now();
        let mut state = admin();
        state.handle(AdminEvent::MembersLoaded(Ok(vec![member(3, MemberStatus::Actif)])), now);

        let follow_up = state.handle(AdminEvent::MemberDeactivated(Ok(())), now);
        assert!(matches!(follow_up.as_slice(), [AdminRequest::LoadMembers]));

        state.handle(AdminEvent::MembersLoaded(Ok(vec![member(3, MemberStatus::Inactif)])), now);
        assert_eq!(state.members.len(), 1);
        assert!(!state.members[0].can_deactivate());
    }

    #[test]
    fn test_import_rejects_unknown_extension() {
        let now = Instant::now();
        let mut state = admin();
        assert!(state.start_import(PathBuf::from("membres.pdf"), now).is_none());
        assert!(state.start_import(PathBuf::from("membres"), now).is_none());
        assert_eq!(tone(&state), Some(Tone::Error));
        assert!(!state.is_importing());

        assert!(state.start_import(PathBuf::from("membres.CSV"), now).is_some());
        assert!(state.is_importing());
        assert!(state.start_import(PathBuf::from("autre.xlsx"), now).is_none());
    }

    #[test]
    fn test_import_with_row_errors_is_warning() {
        let now = Instant::now();
        let mut state = admin();
        state.start_import(PathBuf::from("membres.xlsx"), now);

        let follow_up = state.handle(
            AdminEvent::ImportFinished(Ok(ImportSummary {
                message: "10 membres importés avec succès".to_string(),
                erreurs: 2,
            })),
            now,
        );

        assert!(matches!(follow_up.as_slice(), [AdminRequest::LoadMembers]));
        assert_eq!(tone(&state), Some(Tone::Warning));
        assert!(!state.is_importing());
    }

    #[test]
    fn test_clean_import_is_success() {
        let now = Instant::now();
        let mut state = admin();
        state.handle(
            AdminEvent::ImportFinished(Ok(ImportSummary {
                message: "12 membres importés".to_string(),
                erreurs: 0,
            })),
            now,
        );
        assert_eq!(tone(&state), Some(Tone::Success));
    }

    #[test]
    fn test_failed_import_does_not_refresh() {
        let now = Instant::now();
        let mut state = admin();
        let follow_up = state.handle(AdminEvent::ImportFinished(Err(AppError::validation("x"))), now);
        assert!(follow_up.is_empty());
        assert_eq!(tone(&state), Some(Tone::Error));
    }

    #[test]
    fn test_one_export_at_a_time() {
        let now = Instant::now();
        let mut state = admin();
        assert!(state.start_export(ExportKind::Members).is_some());
        assert!(state.start_export(ExportKind::Movements).is_none());

        state.handle(AdminEvent::Exported(Ok(PathBuf::from("membres.xlsx"))), now);
        assert!(!state.is_exporting());
        assert!(state.start_export(ExportKind::Movements).is_some());
    }

    #[test]
    fn test_load_failure_shows_message() {
        let now = Instant::now();
        let mut state = admin();
        state.handle(AdminEvent::PresentsLoaded(Err(AppError::from(std::io::Error::other("x")))), now);
        assert_eq!(state.feedback().current().unwrap().text, "Erreur chargement présents");
    }

    #[test]
    fn test_rejected_token_asks_for_login() {
        let now = Instant::now();
        let mut state = admin();
        state.handle(
            AdminEvent::MembersLoaded(Err(AppError::Server {
                status: StatusCode::UNAUTHORIZED,
                message: None,
            })),
            now,
        );
        assert_eq!(state.feedback().current().unwrap().text, SESSION_EXPIRED);

        state.handle(AdminEvent::MemberDeactivated(Err(server_error("Token invalide"))), now);
        assert_eq!(state.feedback().current().unwrap().text, "Token invalide");
    }

    #[test]
    fn test_messages_expire() {
        let now = Instant::now();
        let mut state = admin();
        state.handle(AdminEvent::MemberDeactivated(Ok(())), now);
        state.tick(now + TTL);
        assert!(state.feedback().current().is_none());
    }

    #[test]
    fn test_superadmin_deletion_never_offered() {
        let mut state = super_admin();
        state.admins = vec![account(1, Role::SuperAdmin), account(2, Role::Admin)];

        let protected = state.admins[0].clone();
        assert!(!state.request_admin_deletion(&protected));
        assert!(state.pending_admin_delete().is_none());

        let plain = state.admins[1].clone();
        assert!(state.request_admin_deletion(&plain));
        assert!(matches!(state.confirm_admin_deletion(), Some(AdminRequest::DeleteAdmin(2))));
    }

    #[test]
    fn test_plain_admin_cannot_manage_accounts() {
        let now = Instant::now();
        let mut state = admin();
        state.admin_form.username = "bob".to_string();
        state.admin_form.password = "secret1".to_string();
        assert!(state.submit_admin(now).is_none());
        assert!(!state.request_admin_deletion(&account(2, Role::Admin)));
    }

    #[test]
    fn test_admin_created_refreshes_accounts() {
        let now = Instant::now();
        let mut state = super_admin();
        state.admin_form.username = "bob".to_string();
        state.admin_form.password = "secret1".to_string();

        assert!(matches!(state.submit_admin(now), Some(AdminRequest::CreateAdmin(_))));
        let follow_up = state.handle(AdminEvent::AdminCreated(Ok(())), now);
        assert!(matches!(follow_up.as_slice(), [AdminRequest::LoadAdmins]));
        assert!(state.admin_form.username.is_empty());

        let follow_up = state.handle(AdminEvent::AdminDeleted(Ok(())), now);
        assert!(matches!(follow_up.as_slice(), [AdminRequest::LoadAdmins]));
    }

    #[test]
    fn test_short_admin_password_rejected() {
        let now = Instant::now();
        let mut state = super_admin();
        state.admin_form.username = "bob".to_string();
        state.admin_form.password = "12345".to_string();
        assert!(state.submit_admin(now).is_none());
        assert_eq!(tone(&state), Some(Tone::Error));
    }

    #[test]
    fn test_password_mismatch_sends_nothing() {
        let now = Instant::now();
        let mut state = super_admin();
        state.password_form = PasswordForm {
            old_password: "ancien-mdp".to_string(),
            new_password: "nouveau-mdp".to_string(),
            confirm_password: "nouveau-mdq".to_string(),
        };

        assert!(state.submit_password(now).is_none());
        assert_eq!(
            state.feedback().current().unwrap().text,
            "Les mots de passe ne correspondent pas"
        );
        assert_eq!(state.password_form.new_password, "nouveau-mdp");
    }

    #[test]
    fn test_request_debug_hides_passwords() {
        let change = ChangePassword::from_form("ancien-secret", "nouveau-secret", "nouveau-secret").unwrap();
        let text = format!("{:?}", AdminRequest::ChangePassword(change));
        assert!(text.starts_with("ChangePassword"));
        assert!(!text.contains("ancien-secret"));
        assert!(!text.contains("nouveau-secret"));

        let admin = NewAdmin {
            username: "bob".to_string(),
            password: "secret-bob".to_string(),
        };
        let text = format!("{:?}", AdminRequest::CreateAdmin(admin));
        assert!(text.contains("bob"));
        assert!(!text.contains("secret-bob"));
    }

    #[test]
    fn test_password_changed_clears_form() {
        let now = Instant::now();
        let mut state = super_admin();
        state.password_form = PasswordForm {
            old_password: "ancien-mdp".to_string(),
            new_password: "nouveau-mdp".to_string(),
            confirm_password: "nouveau-mdp".to_string(),
        };

        assert!(matches!(state.submit_password(now), Some(AdminRequest::ChangePassword(_))));
        let follow_up = state.handle(AdminEvent::PasswordChanged(Ok(())), now);
        assert!(follow_up.is_empty());
        assert!(state.password_form.old_password.is_empty());
    }
}
