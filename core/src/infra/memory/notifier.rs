use super::recover;
use crate::infra::provider::{EmailNotifier, NotifyError, TemplateVars};

use async_trait::async_trait;
use std::sync::{
	atomic::{AtomicBool, Ordering},
	Mutex,
};
use tracing::info;

/// Records outgoing emails instead of delivering them
#[derive(Debug, Default)]
pub struct MemoryNotifier {
	sent: Mutex<Vec<(String, TemplateVars)>>,
	fail: AtomicBool,
}

impl MemoryNotifier {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn sent(&self) -> Vec<(String, TemplateVars)> {
		recover(self.sent.lock()).clone()
	}

	pub fn set_fail(&self, fail: bool) {
		self.fail.store(fail, Ordering::SeqCst);
	}
}

#[async_trait]
impl EmailNotifier for MemoryNotifier {
	async fn send(&self, template_id: &str, variables: TemplateVars) -> Result<(), NotifyError> {
		if self.fail.load(Ordering::SeqCst) {
			return Err(NotifyError::DeliveryFailed {
				template_id: template_id.to_string(),
				reason: "relay refused connection".into(),
			});
		}

		info!(
			"Email queued (template: {template_id}, subject: {:?})",
			variables.get("subject")
		);
		recover(self.sent.lock()).push((template_id.to_string(), variables));
		Ok(())
	}
}
