//! HTTP client for the attendance backend's REST API.
//!
//! All of the system's hard problems — face recognition, geofence
//! checking, model training — live behind this API. The client is
//! deliberately thin: typed request/response models, bearer-header
//! attachment from the shared store, and the 401 contract (any
//! unauthorized response invalidates the session and schedules a redirect
//! to the landing view).
//!
//! Authorization is enforced by the backend on every call; nothing in
//! this crate grants or checks permissions itself.

mod client;
mod error;
mod models;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::{
    ApiAck, AttendanceRecord, CheckStudentResponse, LoginRequest, LoginResponse,
    MarkAttendanceRequest, MarkAttendanceResponse, RegisterFaceRequest, RegisterFaceResponse,
    RegisterStudentRequest, StudentRecord, TrainingOutcome, TrainingStatus,
};
