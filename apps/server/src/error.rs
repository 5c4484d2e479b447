use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use dojo_core::CoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
	#[error(transparent)]
	Core(#[from] CoreError),

	#[error("not found")]
	NotFound,
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		let (status, message) = match &self {
			Self::Core(e @ CoreError::Validation(_)) => (StatusCode::BAD_REQUEST, e.user_message()),
			Self::Core(e) => {
				error!("Request failed: {e}");
				(StatusCode::INTERNAL_SERVER_ERROR, e.user_message())
			}
			Self::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
		};

		(status, Json(json!({ "error": message }))).into_response()
	}
}
