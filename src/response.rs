use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Uniform `{success, message, data}` wrapper returned by every handler.
///
/// "Not found" and "duplicate" outcomes are envelope values, not errors; only
/// transport-level auth failures and configuration faults surface as
/// [`crate::error::ApiError`].
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(message: &str, data: T) -> Self {
        Self { success: true, message: message.to_string(), data: Some(data) }
    }

    pub fn fail(message: &str) -> Self {
        Self { success: false, message: message.to_string(), data: None }
    }

    /// Conflict-as-data: a uniqueness violation reports `success = false` but
    /// still surfaces the pre-existing conflicting row as `data`.
    pub fn conflict(message: &str, existing: T) -> Self {
        Self { success: false, message: message.to_string(), data: Some(existing) }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub mod messages {
    pub const OPERATION_SUCCESSFUL: &str = "Operation Successful";
    pub const NO_ENTRY: &str = "No data was found";

    pub const INVALID_EMAIL: &str = "Email Address is not in the correct format";
    pub const EMAIL_EXISTS: &str = "Email Address already exist";

    pub const USER_NOT_FOUND: &str = "User was not found";
    pub const USER_UPDATED: &str = "User updated/changed Successfully";
    pub const USER_REMOVED: &str = "User has been deleted";
    pub const USER_DISABLED: &str = "User Disabled Successfully";
    pub const USER_ENABLED: &str = "User Enabled Successfully";
    pub const USER_PASSWORD_RESET: &str = "User Password has been reset successfully";

    pub const TITLE_ADDED: &str = "Title Added Successfully";
    pub const TITLE_REMOVED: &str = "Title Removed Successfully";
    pub const TITLE_EXISTS: &str = "Title name already exist";

    pub const MEMBER_ADDED: &str = "Member Added Successfully";
    pub const INVALID_PROFILE_PICTURE: &str =
        "Profile picture must be valid image data no larger than 5 MB";

    pub const SERVICE_ADDED: &str = "Service Added Successfully";
    pub const SERVICE_TYPE_EXISTS: &str = "Service Type already exist";

    pub const ATTENDANCE_TYPE_ADDED: &str = "Attendance Type was added successfully";
    pub const ATTENDANCE_TYPE_REMOVED: &str = "Attendance Type removed successfully";
    pub const ATTENDANCE_TYPE_EXISTS: &str = "The Attendance Type name already exist";
}
