//! Enrollment alert delivery tests

mod site_helpers;

use dojo_core::{
	enrollment::{send_alert, ContactMessage, Registration},
	CoreError,
};
use pretty_assertions::assert_eq;
use site_helpers::{within, TestSite};

fn registration() -> Registration {
	Registration {
		athlete_name: "Mina".into(),
		age: "9".into(),
		email: "parent@example.com".into(),
		phone: "555-0100".into(),
		program: Some("Kids".into()),
		..Default::default()
	}
}

#[tokio::test]
async fn test_registration_alert_goes_to_configured_inbox() {
	let site = TestSite::new();

	let delivery = send_alert(&site.ctx, &registration()).unwrap();
	within(delivery).await.unwrap();

	let sent = site.backend.notifier.sent();
	assert_eq!(sent.len(), 1);
	let (template_id, vars) = &sent[0];
	assert_eq!(template_id, &site.ctx.config.alerts.template_id);
	assert_eq!(vars["to_email"], site.ctx.config.alerts.recipient);
	assert_eq!(vars["subject"], "New Athlete Registration Alert");
	assert!(vars["message"].contains("<p><strong>Program:</strong> Kids</p>"));
}

#[tokio::test]
async fn test_delivery_failure_is_swallowed() {
	let site = TestSite::new();
	site.backend.notifier.set_fail(true);
	let message = ContactMessage {
		name: "Lee".into(),
		email: "lee@example.com".into(),
		phone: None,
		message: "Do you run adult classes?".into(),
	};

	let delivery = send_alert(&site.ctx, &message).unwrap();

	// The task completes normally; nothing reaches the visitor.
	within(delivery).await.unwrap();
	assert!(site.backend.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_incomplete_form_sends_nothing() {
	let site = TestSite::new();

	let err = send_alert(&site.ctx, &ContactMessage::default()).unwrap_err();

	assert_eq!(err.user_message(), "Please fill in all required fields");
	match err {
		CoreError::Validation(e) => assert_eq!(e.missing(), ["name", "email", "message"]),
		other => panic!("expected a validation error, got {other:?}"),
	}
	tokio::task::yield_now().await;
	assert!(site.backend.notifier.sent().is_empty());
}
