//! Request and response bodies for the attendance backend.
//!
//! Response models use `#[serde(default)]` liberally: the backend has
//! grown fields over time and older deployments omit some of them.
//! Unknown fields are always ignored.

use rollcall_session::UserIdentity;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// `POST /auth/login` request.
///
/// `identifier` accepts a student ID, an admin ID, or an email address —
/// the backend resolves it.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// `POST /auth/login` response: the bearer token plus the full identity
/// record that gets cached in the store.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserIdentity,
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// `POST /admin/register-student` request.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterStudentRequest {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub department: String,
    pub year: String,
}

/// Minimal acknowledgement body for endpoints whose payload the portal
/// doesn't consume beyond success/failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// `GET /admin/check-student/{student_id}` response: whether the ID is
/// already taken, used by the registration form while the admin types.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckStudentResponse {
    #[serde(default)]
    pub exists: bool,
    /// Name of the holder, present when the ID is already registered.
    #[serde(default)]
    pub registered_name: Option<String>,
}

/// A student row from `GET /admin/students`.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentRecord {
    pub student_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub face_registered: bool,
}

/// `GET /admin/training-status` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingStatus {
    #[serde(default)]
    pub training: bool,
    #[serde(default)]
    pub message: String,
}

/// Outcome of a model-training run, embedded in face-registration
/// responses and returned by `POST /admin/train-model`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainingOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

// ---------------------------------------------------------------------------
// Student endpoints
// ---------------------------------------------------------------------------

/// `POST /student/mark-attendance` request.
///
/// `image` is a base64 data-URL snapshot from the webcam; the backend
/// runs face matching on it and checks the coordinates against the
/// campus geofence.
#[derive(Debug, Clone, Serialize)]
pub struct MarkAttendanceRequest {
    pub student_id: String,
    pub image: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// `POST /student/mark-attendance` response.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendanceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// `POST /student/register-face` request: the enrollment image set.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterFaceRequest {
    pub student_id: String,
    pub images: Vec<String>,
}

/// `POST /student/register-face` (and `POST /admin/upload-face/{id}`)
/// response.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterFaceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub face_images_count: u32,
    /// Present when the backend auto-trained the model after upload.
    #[serde(default)]
    pub training_result: Option<TrainingOutcome>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One attendance entry, as listed by `GET /student/attendance/{id}` and
/// `GET /admin/attendance/daily/{date}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub status: String,
}

// ---------------------------------------------------------------------------
// Wrapper bodies — the backend nests its lists
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct StudentsBody {
    #[serde(default)]
    pub students: Vec<StudentRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordsBody {
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
}

/// The backend's error body shape: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_session::Role;

    #[test]
    fn test_login_response_deserializes() {
        let json = r#"{
            "token": "a.b.c",
            "user": {"name": "Ada", "role": "admin", "student_id": "S1"}
        }"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token, "a.b.c");
        assert_eq!(response.user.role, Role::Admin);
    }

    #[test]
    fn test_student_record_tolerates_missing_fields() {
        let record: StudentRecord =
            serde_json::from_str(r#"{"student_id":"S1","name":"Ada"}"#).unwrap();
        assert!(!record.face_registered);
        assert!(record.email.is_none());
    }

    #[test]
    fn test_register_face_response_with_training_result() {
        let json = r#"{
            "success": true,
            "face_images_count": 7,
            "training_result": {"success": true, "message": "trained"}
        }"#;
        let response: RegisterFaceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.face_images_count, 7);
        assert!(response.training_result.unwrap().success);
    }

    #[test]
    fn test_records_body_defaults_to_empty() {
        let body: RecordsBody = serde_json::from_str("{}").unwrap();
        assert!(body.records.is_empty());
    }

    #[test]
    fn test_check_student_response_taken_and_available() {
        let taken: CheckStudentResponse =
            serde_json::from_str(r#"{"exists":true,"registered_name":"Ada"}"#).unwrap();
        assert!(taken.exists);
        assert_eq!(taken.registered_name.as_deref(), Some("Ada"));

        let available: CheckStudentResponse = serde_json::from_str(r#"{"exists":false}"#).unwrap();
        assert!(!available.exists);
        assert!(available.registered_name.is_none());
    }

    #[test]
    fn test_login_request_wire_shape() {
        let request = LoginRequest {
            identifier: "stu001".into(),
            password: "secret".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["identifier"], "stu001");
        assert_eq!(json["password"], "secret");
    }
}
