//! Pointage REST API client.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use reqwest::{Client, Request, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::models::{
    AdminAccount, ChangePassword, CheckInRequest, CheckInResponse, ImportSummary, LoginRequest, LoginResponse, Member,
    Movement, NewAdmin, NewMember, Present, REDACTED,
};

/// Which spreadsheet the server should export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Members,
    Movements,
}

impl ExportKind {
    fn path(self) -> &'static str {
        match self {
            ExportKind::Members => "export/membres",
            ExportKind::Movements => "export/mouvements",
        }
    }

    /// Fixed filename the export is saved under.
    pub fn filename(self) -> &'static str {
        match self {
            ExportKind::Members => "membres.xlsx",
            ExportKind::Movements => "mouvements.xlsx",
        }
    }
}

/// Error body returned by the API.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Whether a request carries the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Bearer,
    Public,
}

/// HTTP client for the pointage API.
///
/// Cheap to clone; each view task takes its own copy. Kiosk endpoints
/// (search, pointage) are called without the bearer token.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| REDACTED))
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Copy of this client authenticated with `token`.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{base}/{path}", base = self.base_url, path = path.trim_start_matches('/'))
    }

    /// URL with `segment` appended as a single, percent-encoded path segment.
    fn segment_url(&self, path: &str, segment: &str) -> Result<Url> {
        let mut url = Url::parse(&self.url(path)).map_err(|e| AppError::config(format!("Invalid API URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| AppError::config("API URL cannot be a base"))?
            .push(segment);
        Ok(url)
    }

    fn build(&self, request: RequestBuilder, auth: Auth) -> Result<Request> {
        let request = match (auth, &self.token) {
            (Auth::Bearer, Some(token)) => request.bearer_auth(token),
            _ => request,
        };
        Ok(request.build()?)
    }

    async fn send(&self, request: Request) -> Result<Response> {
        tracing::debug!("{} {}", request.method(), request.url().path());
        let response = self.client.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = server_error(status, &body);
        tracing::warn!("API request failed: {}", err);
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    fn get_request(&self, path: &str) -> Result<Request> {
        self.build(self.client.get(self.url(path)), Auth::Bearer)
    }

    fn post_request<B: Serialize + ?Sized>(&self, path: &str, body: &B, auth: Auth) -> Result<Request> {
        self.build(self.client.post(self.url(path)).json(body), auth)
    }

    fn delete_request(&self, path: &str) -> Result<Request> {
        self.build(self.client.delete(self.url(path)), Auth::Bearer)
    }

    // ========== Auth ==========

    /// Exchange credentials for a bearer token and role.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        tracing::debug!("Login attempt for {}", username);
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.send_json(self.post_request("login", &body, Auth::Public)?).await
    }

    pub async fn change_password(&self, body: &ChangePassword) -> Result<()> {
        self.send(self.post_request("change-password", body, Auth::Bearer)?)
            .await?;
        Ok(())
    }

    // ========== Kiosk ==========

    fn search_request(&self, fragment: &str) -> Result<Request> {
        let url = self.segment_url("search-membres", fragment)?;
        self.build(self.client.get(url), Auth::Public)
    }

    fn check_in_request(&self, membre_id: i64) -> Result<Request> {
        self.post_request("pointer-by-id", &CheckInRequest { membre_id }, Auth::Public)
    }

    /// Members whose phone number matches `fragment`.
    pub async fn search_members(&self, fragment: &str) -> Result<Vec<Member>> {
        self.send_json(self.search_request(fragment)?).await
    }

    /// Toggle entry/exit for a member.
    pub async fn check_in(&self, membre_id: i64) -> Result<CheckInResponse> {
        self.send_json(self.check_in_request(membre_id)?).await
    }

    // ========== Members ==========

    pub async fn list_members(&self) -> Result<Vec<Member>> {
        self.send_json(self.get_request("membres")?).await
    }

    pub async fn create_member(&self, member: &NewMember) -> Result<()> {
        self.send(self.post_request("membres", member, Auth::Bearer)?)
            .await?;
        Ok(())
    }

    /// Soft-delete a member.
    pub async fn deactivate_member(&self, id: i64) -> Result<()> {
        self.send(self.delete_request(&format!("membres/{id}"))?)
            .await?;
        Ok(())
    }

    fn import_request(&self, file_name: String, bytes: Vec<u8>) -> Result<Request> {
        let mime = mime_for(&file_name);
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)?;
        let form = reqwest::multipart::Form::new().part("file", part);
        self.build(self.client.post(self.url("import")).multipart(form), Auth::Bearer)
    }

    /// Upload a spreadsheet or CSV of members.
    pub async fn import_members(&self, path: &Path) -> Result<ImportSummary> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "import".to_string());
        let bytes = tokio::fs::read(path).await?;
        tracing::debug!("Uploading {} ({} bytes)", file_name, bytes.len());

        self.send_json(self.import_request(file_name, bytes)?).await
    }

    // ========== Movements ==========

    fn movements_request(&self, limit: u32) -> Result<Request> {
        self.get_request(&format!("mouvements?limit={limit}"))
    }

    pub async fn list_movements(&self, limit: u32) -> Result<Vec<Movement>> {
        self.send_json(self.movements_request(limit)?).await
    }

    pub async fn list_presents(&self) -> Result<Vec<Present>> {
        self.send_json(self.get_request("presents")?).await
    }

    /// Download a server-generated spreadsheet.
    pub async fn export(&self, kind: ExportKind) -> Result<Vec<u8>> {
        let response = self.send(self.get_request(kind.path())?).await?;
        Ok(response.bytes().await?.to_vec())
    }

    // ========== Admin accounts ==========

    pub async fn list_admins(&self) -> Result<Vec<AdminAccount>> {
        self.send_json(self.get_request("admins")?).await
    }

    pub async fn create_admin(&self, admin: &NewAdmin) -> Result<()> {
        tracing::debug!("Creating admin {}", admin.username);
        self.send(self.post_request("admins", admin, Auth::Bearer)?)
            .await?;
        Ok(())
    }

    pub async fn delete_admin(&self, id: i64) -> Result<()> {
        self.send(self.delete_request(&format!("admins/{id}"))?)
            .await?;
        Ok(())
    }
}

/// Build the error for a non-success response body.
fn server_error(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty());
    AppError::Server { status, message }
}

fn mime_for(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".csv") {
        "text/csv"
    } else if lower.ends_with(".xls") {
        "application/vnd.ms-excel"
    } else {
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_url_joining() {
        let api = client("http://localhost:5000/api/");
        assert_eq!(api.base_url(), "http://localhost:5000/api");
        assert_eq!(api.url("membres"), "http://localhost:5000/api/membres");
        assert_eq!(api.url("/presents"), "http://localhost:5000/api/presents");
        assert_eq!(api.url("mouvements?limit=100"), "http://localhost:5000/api/mouvements?limit=100");
    }

    #[test]
    fn test_search_fragment_is_one_segment() {
        let api = client("http://localhost:5000/api");
        let url = api.segment_url("search-membres", "971").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/search-membres/971");

        let url = api.segment_url("search-membres", "97/admins").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/search-membres/97%2Fadmins");
    }

    #[test]
    fn test_with_token_keeps_base() {
        let api = client("http://localhost:5000/api").with_token("abc");
        assert_eq!(api.token.as_deref(), Some("abc"));
        assert_eq!(api.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn test_debug_hides_token() {
        let api = client("http://localhost:5000/api").with_token("jeton-secret");
        let text = format!("{api:?}");
        assert!(text.contains("http://localhost:5000/api"));
        assert!(!text.contains("jeton-secret"));
    }

    fn authorization(request: &Request) -> Option<&str> {
        request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .map(|value| value.to_str().unwrap())
    }

    #[test]
    fn test_kiosk_requests_are_public() {
        let api = client("http://localhost:5000/api").with_token("tok");

        let search = api.search_request("0612").unwrap();
        assert_eq!(search.method(), reqwest::Method::GET);
        assert_eq!(search.url().as_str(), "http://localhost:5000/api/search-membres/0612");
        assert_eq!(authorization(&search), None);

        let check_in = api.check_in_request(42).unwrap();
        assert_eq!(check_in.method(), reqwest::Method::POST);
        assert_eq!(check_in.url().as_str(), "http://localhost:5000/api/pointer-by-id");
        assert_eq!(authorization(&check_in), None);
        let body = check_in.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, br#"{"membreId":42}"#);
    }

    #[test]
    fn test_admin_requests_carry_token() {
        let api = client("http://localhost:5000/api").with_token("tok");

        let members = api.get_request("membres").unwrap();
        assert_eq!(authorization(&members), Some("Bearer tok"));

        let admins = api.get_request("admins").unwrap();
        assert_eq!(admins.url().as_str(), "http://localhost:5000/api/admins");
        assert_eq!(authorization(&admins), Some("Bearer tok"));

        let deactivate = api.delete_request("membres/7").unwrap();
        assert_eq!(deactivate.method(), reqwest::Method::DELETE);
        assert_eq!(authorization(&deactivate), Some("Bearer tok"));

        let import = api.import_request("membres.csv".to_string(), b"nom;prenom".to_vec()).unwrap();
        assert_eq!(import.url().as_str(), "http://localhost:5000/api/import");
        assert_eq!(authorization(&import), Some("Bearer tok"));
        let content_type = import.headers().get(reqwest::header::CONTENT_TYPE).unwrap();
        assert!(content_type.to_str().unwrap().starts_with("multipart/form-data"));
    }

    #[test]
    fn test_requests_without_token_have_no_header() {
        let api = client("http://localhost:5000/api");
        assert_eq!(authorization(&api.get_request("membres").unwrap()), None);
    }

    #[test]
    fn test_movements_limit_in_query() {
        let api = client("http://localhost:5000/api").with_token("tok");
        let request = api.movements_request(100).unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:5000/api/mouvements?limit=100");
        assert_eq!(request.url().query(), Some("limit=100"));
        assert_eq!(authorization(&request), Some("Bearer tok"));
    }

    #[test]
    fn test_server_error_with_message() {
        let err = server_error(StatusCode::BAD_REQUEST, r#"{"error": "Ce numéro existe déjà"}"#);
        match err {
            AppError::Server { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message.as_deref(), Some("Ce numéro existe déjà"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_server_error_without_json() {
        let err = server_error(StatusCode::BAD_GATEWAY, "<html>Bad gateway</html>");
        assert_eq!(err.user_message("Erreur de connexion"), "Erreur de connexion");
    }

    #[test]
    fn test_server_error_blank_message() {
        let err = server_error(StatusCode::FORBIDDEN, r#"{"error": ""}"#);
        assert_eq!(err.user_message("Erreur"), "Erreur");
    }

    #[test]
    fn test_export_filenames() {
        assert_eq!(ExportKind::Members.filename(), "membres.xlsx");
        assert_eq!(ExportKind::Movements.filename(), "mouvements.xlsx");
        assert_eq!(ExportKind::Movements.path(), "export/mouvements");
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("membres.CSV"), "text/csv");
        assert_eq!(mime_for("old.xls"), "application/vnd.ms-excel");
        assert_eq!(
            mime_for("membres.xlsx"),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_http_error() {
        // Nothing listens on port 9 of localhost
        let api = client("http://127.0.0.1:9/api");
        let err = api.list_members().await.unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
        assert_eq!(err.user_message("Erreur de connexion"), "Erreur de connexion");
    }
}
