use dioxus::prelude::ServerFnError;
use shared_types::AppError;

use crate::backend::BackendError;

/// Map a backend failure onto the error kinds the client understands.
pub fn backend_to_app_error(err: BackendError) -> AppError {
    match err {
        BackendError::NoRows => AppError::not_found("Resource not found"),
        BackendError::Status { status, message } if status == 401 || status == 403 => {
            AppError::unauthorized(message)
        }
        BackendError::Status { status, message } if status >= 500 => {
            AppError::backend_unavailable(format!("Backend error ({status}): {message}"))
        }
        BackendError::Status { message, .. } => AppError::bad_request(message),
        BackendError::Transport(message) => AppError::backend_unavailable(message),
        BackendError::NotConfigured(var) => {
            AppError::backend_unavailable(format!("Backend is not configured ({var})"))
        }
        BackendError::Decode(message) => AppError::internal(message),
    }
}

/// Map a failed password sign-in. Credential rejections read the same
/// whatever the backend said, so the response doesn't reveal which part was wrong.
pub fn login_failure(err: BackendError) -> AppError {
    if err.is_auth_rejection() {
        AppError::unauthorized("Invalid email or password")
    } else {
        backend_to_app_error(err)
    }
}

/// Convert an AppError into a ServerFnError by serializing as JSON.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// Extension trait providing `.into_app_error()` on BackendError.
pub trait BackendErrorExt {
    fn into_app_error(self) -> AppError;
}

impl BackendErrorExt for BackendError {
    fn into_app_error(self) -> AppError {
        backend_to_app_error(self)
    }
}

/// Extension trait providing `.into_server_fn_error()` on AppError.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
