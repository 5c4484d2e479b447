//! Non-blocking user notifications (toasts)

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
	Success,
	Warning,
	Error,
}

/// A message shown to the user after an operation, never blocking the view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
	pub level: NoticeLevel,
	pub title: String,
	pub description: String,
}

impl Notice {
	pub fn success(description: impl Into<String>) -> Self {
		Self {
			level: NoticeLevel::Success,
			title: "Success".to_string(),
			description: description.into(),
		}
	}

	pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			level: NoticeLevel::Warning,
			title: title.into(),
			description: description.into(),
		}
	}

	pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			level: NoticeLevel::Error,
			title: title.into(),
			description: description.into(),
		}
	}

	pub fn is_error(&self) -> bool {
		self.level == NoticeLevel::Error
	}
}
