use crate::{
	domain::{Announcement, Coach, Event, MediaItem, Record},
	notice::Notice,
};

use thiserror::Error;

/// A required form field was left empty
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
	missing: Vec<&'static str>,
	message: &'static str,
}

impl ValidationError {
	pub fn new(missing: Vec<&'static str>, message: &'static str) -> Self {
		Self { missing, message }
	}

	pub fn missing(&self) -> &[&'static str] {
		&self.missing
	}

	/// Text shown to the user
	pub fn message(&self) -> &'static str {
		self.message
	}

	pub fn notice(&self) -> Notice {
		Notice::warning("Missing Information", self.message)
	}
}

/// Check that every `(name, value)` pair has a non-blank value
pub fn require_present(
	fields: &[(&'static str, &str)],
	message: &'static str,
) -> Result<(), ValidationError> {
	let missing: Vec<_> = fields
		.iter()
		.filter(|(_, value)| value.trim().is_empty())
		.map(|(name, _)| *name)
		.collect();

	if missing.is_empty() {
		Ok(())
	} else {
		Err(ValidationError::new(missing, message))
	}
}

/// A record the admin dashboard edits through a form.
///
/// Validation is presence-only and happens entirely on this side; the store
/// accepts whatever it is sent.
pub trait Editable: Record {
	/// Noun used in prompts and notices ("event", "coach", ...)
	const NOUN: &'static str;

	/// Shown when a required field is empty
	const MISSING_MESSAGE: &'static str;

	/// Fields that must be non-blank, with their current values
	fn required_fields(&self) -> Vec<(&'static str, &str)>;

	fn validate(&self) -> Result<(), ValidationError> {
		require_present(&self.required_fields(), Self::MISSING_MESSAGE)
	}
}

impl Editable for Event {
	const NOUN: &'static str = "event";
	const MISSING_MESSAGE: &'static str = "Please fill in the title and date";

	fn required_fields(&self) -> Vec<(&'static str, &str)> {
		vec![("title", self.title.as_str()), ("date", self.date.as_str())]
	}
}

impl Editable for Announcement {
	const NOUN: &'static str = "announcement";
	const MISSING_MESSAGE: &'static str = "Please fill in title and description";

	fn required_fields(&self) -> Vec<(&'static str, &str)> {
		vec![("title", self.title.as_str()), ("description", self.description.as_str())]
	}
}

impl Editable for Coach {
	const NOUN: &'static str = "coach";
	const MISSING_MESSAGE: &'static str = "Please fill in all fields";

	fn required_fields(&self) -> Vec<(&'static str, &str)> {
		vec![
			("name", self.name.as_str()),
			("role", self.role.as_str()),
			("bio", self.bio.as_str()),
		]
	}
}

impl Editable for MediaItem {
	const NOUN: &'static str = "photo";
	const MISSING_MESSAGE: &'static str = "Please select a photo and enter a caption";

	fn required_fields(&self) -> Vec<(&'static str, &str)> {
		vec![("url", self.url.as_str()), ("caption", self.caption.as_str())]
	}
}
