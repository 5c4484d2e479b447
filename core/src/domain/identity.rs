use super::{Collection, Record};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque session token issued by the auth provider
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	pub fn expose(&self) -> &str {
		&self.0
	}
}

// Tokens must not end up in logs.
impl fmt::Debug for SessionToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SessionToken(..)")
	}
}

/// An authenticated session principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
	pub email: String,
	pub token: SessionToken,
}

/// Admin authorization record, stored under the admin's exact email.
///
/// Only the existence of the document matters; its content is never read
/// for authorization decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminGrant {
	#[serde(default)]
	pub note: Option<String>,
}

impl Record for AdminGrant {
	const COLLECTION: Collection = Collection::Admins;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn token_is_redacted_in_debug_output() {
		let identity = Identity {
			email: "sensei@dojo.test".into(),
			token: SessionToken::new("secret-token"),
		};

		let rendered = format!("{identity:?}");

		assert!(rendered.contains("sensei@dojo.test"));
		assert!(!rendered.contains("secret-token"));
	}
}
