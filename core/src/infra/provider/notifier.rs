use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

/// Named variables substituted into an email template
pub type TemplateVars = BTreeMap<String, String>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
	#[error("email delivery failed (template: {template_id}): {reason}")]
	DeliveryFailed { template_id: String, reason: String },
}

/// Outbound transactional email service
#[async_trait]
pub trait EmailNotifier: Send + Sync {
	async fn send(&self, template_id: &str, variables: TemplateVars) -> Result<(), NotifyError>;
}
