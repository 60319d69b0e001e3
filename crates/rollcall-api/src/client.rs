//! The API client: request plumbing and endpoint wrappers.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use rollcall_session::{Navigator, SessionManager};
use rollcall_store::{Store, TOKEN_KEY};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::ApiError;
use crate::models::{
    ApiAck, AttendanceRecord, CheckStudentResponse, ErrorBody, LoginRequest, LoginResponse,
    MarkAttendanceRequest, MarkAttendanceResponse, RecordsBody, RegisterFaceRequest,
    RegisterFaceResponse, RegisterStudentRequest, StudentRecord, StudentsBody, TrainingOutcome,
    TrainingStatus,
};

/// Upper bound on any single request; attendance marking uploads a
/// webcam frame and the backend runs recognition on it before answering.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed client for the attendance backend.
///
/// Shares the store with the session manager: the manager decides whether
/// a session exists, the client reads the raw token from the same store
/// to attach the bearer header. A 401 on any call feeds straight back
/// into [`SessionManager::handle_unauthorized`].
pub struct ApiClient<S: Store, N: Navigator> {
    http: reqwest::Client,
    base_url: String,
    store: S,
    session: SessionManager<S, N>,
}

impl<S: Store, N: Navigator> ApiClient<S, N> {
    /// Creates a client for the backend at `base_url`.
    ///
    /// `store` must be the same underlying store the session manager
    /// reads, or the bearer header will not match the session.
    ///
    /// # Errors
    /// Returns [`ApiError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(
        base_url: impl Into<String>,
        store: S,
        session: SessionManager<S, N>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            store,
            session,
        })
    }

    // -- Authentication ---------------------------------------------------

    /// `POST /auth/login`.
    ///
    /// On success, writes the token to the store *then* establishes the
    /// session — in that order, so the session manager's
    /// decode-and-schedule pass sees the fresh token.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self.post("auth/login", request).await?;

        self.store.set(TOKEN_KEY, &response.token)?;
        self.session.login(response.user.clone());

        Ok(response)
    }

    // -- Admin endpoints --------------------------------------------------

    /// `POST /admin/register-student`.
    pub async fn register_student(
        &self,
        request: &RegisterStudentRequest,
    ) -> Result<ApiAck, ApiError> {
        self.post("admin/register-student", request).await
    }

    /// `POST /admin/upload-face/{student_id}`.
    pub async fn upload_face(
        &self,
        student_id: &str,
        images: &[String],
    ) -> Result<RegisterFaceResponse, ApiError> {
        let path = format!("admin/upload-face/{student_id}");
        self.post(&path, &serde_json::json!({ "images": images })).await
    }

    /// `POST /admin/train-model`.
    pub async fn train_model(&self) -> Result<TrainingOutcome, ApiError> {
        self.post("admin/train-model", &serde_json::json!({})).await
    }

    /// `GET /admin/training-status`.
    pub async fn training_status(&self) -> Result<TrainingStatus, ApiError> {
        self.get("admin/training-status").await
    }

    /// `GET /admin/check-student/{student_id}` — ID availability check for
    /// the registration form.
    pub async fn check_student(&self, student_id: &str) -> Result<CheckStudentResponse, ApiError> {
        let path = format!("admin/check-student/{student_id}");
        self.get(&path).await
    }

    /// `GET /admin/students`.
    pub async fn students(&self) -> Result<Vec<StudentRecord>, ApiError> {
        let body: StudentsBody = self.get("admin/students").await?;
        Ok(body.students)
    }

    /// `GET /admin/attendance/daily/{date}` — `date` is `YYYY-MM-DD`.
    pub async fn daily_attendance(&self, date: &str) -> Result<Vec<AttendanceRecord>, ApiError> {
        let path = format!("admin/attendance/daily/{date}");
        let body: RecordsBody = self.get(&path).await?;
        Ok(body.records)
    }

    // -- Student endpoints ------------------------------------------------

    /// `POST /student/mark-attendance`.
    pub async fn mark_attendance(
        &self,
        request: &MarkAttendanceRequest,
    ) -> Result<MarkAttendanceResponse, ApiError> {
        debug!(
            student_id = %request.student_id,
            image_bytes = request.image.len(),
            "marking attendance"
        );
        self.post("student/mark-attendance", request).await
    }

    /// `GET /student/attendance/{student_id}`.
    pub async fn attendance(&self, student_id: &str) -> Result<Vec<AttendanceRecord>, ApiError> {
        let path = format!("student/attendance/{student_id}");
        let body: RecordsBody = self.get(&path).await?;
        Ok(body.records)
    }

    /// `POST /student/register-face`.
    pub async fn register_face(
        &self,
        request: &RegisterFaceRequest,
    ) -> Result<RegisterFaceResponse, ApiError> {
        self.post("student/register-face", request).await
    }

    // -- Plumbing ---------------------------------------------------------

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Attaches `Authorization: Bearer <token>` when a token is stored.
    ///
    /// Requests go out unauthenticated when the store has no token (or
    /// can't be read) — the backend answers 401 and the normal
    /// invalidation path takes over.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(e) => {
                warn!(error = %e, "could not read token from store");
                request
            }
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorized(self.http.get(self.url(path)));
        self.execute(path, request).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.authorized(self.http.post(self.url(path)).json(body));
        self.execute(path, request).await
    }

    /// Sends a request and maps the response per the API contract:
    /// 401 invalidates the session, other failures become
    /// [`ApiError::Backend`] with the backend's `error` message.
    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(path, status = status.as_u16(), "api response");

        if status == StatusCode::UNAUTHORIZED {
            self.session.handle_unauthorized();
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_default();
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use rollcall_session::NoopNavigator;
    use rollcall_store::MemoryStore;

    use super::*;

    fn client(base_url: &str) -> ApiClient<MemoryStore, NoopNavigator> {
        let store = MemoryStore::new();
        let session = SessionManager::new(store.clone(), NoopNavigator);
        ApiClient::new(base_url, store, session).expect("client should build")
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let api = client("http://localhost:5000/api");
        assert_eq!(api.url("auth/login"), "http://localhost:5000/api/auth/login");
    }

    #[test]
    fn test_url_tolerates_trailing_slash() {
        let api = client("http://localhost:5000/api/");
        assert_eq!(
            api.url("admin/students"),
            "http://localhost:5000/api/admin/students"
        );
    }

    #[test]
    fn test_url_interpolates_path_parameters() {
        let api = client("http://localhost:5000/api");
        assert_eq!(
            api.url(&format!("student/attendance/{}", "S42")),
            "http://localhost:5000/api/student/attendance/S42"
        );
    }
}
