//! Email alerts for the public join and contact forms
//!
//! Alerts go to the academy inbox through the [`EmailNotifier`] on a detached
//! task. The visitor is never told whether delivery worked; failures are only
//! logged.
//!
//! [`EmailNotifier`]: crate::infra::provider::EmailNotifier

use crate::{
	context::SiteContext,
	error::Result,
	infra::provider::TemplateVars,
	ops::validate::{require_present, ValidationError},
};

use serde::Deserialize;
use std::fmt::Write;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const NOT_PROVIDED: &str = "N/A";
const DEFAULT_RANK: &str = "Beginner";
const MISSING_MESSAGE: &str = "Please fill in all required fields";

/// A form submission that is forwarded as an alert email
pub trait Alert {
	/// Short name used in logs
	const KIND: &'static str;

	fn validate(&self) -> Result<(), ValidationError>;

	fn subject(&self) -> &'static str;

	/// HTML body, with every submitted value escaped
	fn html(&self) -> String;

	fn template_vars(&self, recipient: &str) -> TemplateVars {
		TemplateVars::from([
			("to_email".to_string(), recipient.to_string()),
			("subject".to_string(), self.subject().to_string()),
			("message".to_string(), self.html()),
		])
	}
}

/// Join form. Absent fields decode as empty and fail the presence check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Registration {
	pub athlete_name: String,
	pub age: String,
	pub email: String,
	pub phone: String,
	pub program: Option<String>,
	pub preferred_coach: Option<String>,
	pub current_rank: Option<String>,
}

/// Contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactMessage {
	pub name: String,
	pub email: String,
	pub phone: Option<String>,
	pub message: String,
}

impl Alert for Registration {
	const KIND: &'static str = "registration";

	fn validate(&self) -> Result<(), ValidationError> {
		require_present(
			&[
				("athlete_name", self.athlete_name.as_str()),
				("age", self.age.as_str()),
				("email", self.email.as_str()),
				("phone", self.phone.as_str()),
			],
			MISSING_MESSAGE,
		)
	}

	fn subject(&self) -> &'static str {
		"New Athlete Registration Alert"
	}

	fn html(&self) -> String {
		let mut html = String::from("<h2>New Athlete Registration</h2>\n");
		field(&mut html, "Name", &self.athlete_name);
		field(&mut html, "Age", &self.age);
		field(&mut html, "Email", &self.email);
		field(&mut html, "Phone", &self.phone);
		field(&mut html, "Program", or_default(&self.program, NOT_PROVIDED));
		field(&mut html, "Coach", or_default(&self.preferred_coach, NOT_PROVIDED));
		field(&mut html, "Rank", or_default(&self.current_rank, DEFAULT_RANK));
		html
	}
}

impl Alert for ContactMessage {
	const KIND: &'static str = "contact message";

	fn validate(&self) -> Result<(), ValidationError> {
		require_present(
			&[
				("name", self.name.as_str()),
				("email", self.email.as_str()),
				("message", self.message.as_str()),
			],
			MISSING_MESSAGE,
		)
	}

	fn subject(&self) -> &'static str {
		"New Message from Website"
	}

	fn html(&self) -> String {
		let mut html = String::from("<h2>New Contact Message</h2>\n");
		field(&mut html, "Name", &self.name);
		field(&mut html, "Email", &self.email);
		field(&mut html, "Phone", or_default(&self.phone, NOT_PROVIDED));
		html.push_str("<p><strong>Message:</strong></p>\n");
		let _ = writeln!(html, "<blockquote>{}</blockquote>", escape_html(&self.message));
		html
	}
}

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
	value
		.as_deref()
		.map(str::trim)
		.filter(|v| !v.is_empty())
		.unwrap_or(default)
}

fn field(html: &mut String, label: &str, value: &str) {
	let _ = writeln!(html, "<p><strong>{label}:</strong> {}</p>", escape_html(value));
}

pub fn escape_html(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());
	for c in value.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			c => escaped.push(c),
		}
	}
	escaped
}

/// Check `alert` and hand it to the notifier in the background.
///
/// Returns the handle of the delivery task; awaiting it is optional.
pub fn send_alert<A: Alert>(ctx: &SiteContext, alert: &A) -> Result<JoinHandle<()>> {
	alert.validate()?;

	let alerts = &ctx.config.alerts;
	let vars = alert.template_vars(&alerts.recipient);

	Ok(deliver(ctx, alerts.template_id.clone(), vars, A::KIND))
}

fn deliver(
	ctx: &SiteContext,
	template_id: String,
	vars: TemplateVars,
	kind: &'static str,
) -> JoinHandle<()> {
	let notifier = ctx.notifier.clone();

	tokio::spawn(async move {
		match notifier.send(&template_id, vars).await {
			Ok(()) => debug!("Sent {kind} alert"),
			Err(e) => warn!("Failed to send {kind} alert: {e}"),
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn missing_optionals_render_defaults() {
		let registration = Registration {
			athlete_name: "Mina".into(),
			age: "9".into(),
			email: "parent@example.com".into(),
			phone: "555-0100".into(),
			program: Some("  ".into()),
			..Default::default()
		};

		let html = registration.html();

		assert!(html.contains("<p><strong>Program:</strong> N/A</p>"));
		assert!(html.contains("<p><strong>Coach:</strong> N/A</p>"));
		assert!(html.contains("<p><strong>Rank:</strong> Beginner</p>"));
	}

	#[test]
	fn submitted_values_are_escaped() {
		let contact = ContactMessage {
			name: "<script>".into(),
			email: "a@b.c".into(),
			phone: None,
			message: "Tom & \"Jerry\"".into(),
		};

		let html = contact.html();

		assert!(html.contains("&lt;script&gt;"));
		assert!(html.contains("<blockquote>Tom &amp; &quot;Jerry&quot;</blockquote>"));
		assert!(!html.contains("<script>"));
	}

	#[test]
	fn template_vars_address_the_recipient() {
		let contact = ContactMessage {
			name: "Lee".into(),
			email: "lee@example.com".into(),
			phone: Some("555".into()),
			message: "Hi".into(),
		};

		let vars = contact.template_vars("office@dojo.local");

		assert_eq!(vars["to_email"], "office@dojo.local");
		assert_eq!(vars["subject"], "New Message from Website");
		assert_eq!(vars.len(), 3);
	}

	#[test]
	fn registration_requires_contact_details() {
		let err = Registration {
			athlete_name: "Mina".into(),
			..Default::default()
		}
		.validate()
		.unwrap_err();

		assert_eq!(err.missing(), ["age", "email", "phone"]);
	}
}
