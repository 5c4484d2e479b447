use super::{Collection, Record};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coach {
	pub name: String,
	pub role: String,
	pub bio: String,
	/// Public address of the profile photo, empty when none was uploaded
	#[serde(default, rename = "photoUrl")]
	pub photo_url: String,
}

impl Record for Coach {
	const COLLECTION: Collection = Collection::Coaches;
}

impl Coach {
	pub fn has_photo(&self) -> bool {
		!self.photo_url.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn photo_address_is_stored_as_photo_url() {
		let coach = Coach {
			name: "Master Park".into(),
			role: "Head Instructor".into(),
			bio: "5th dan".into(),
			photo_url: "http://blobs.test/coaches/1_abcdef.jpg".into(),
		};

		let doc = coach.to_document().unwrap();

		assert_eq!(doc.get("photoUrl"), Some(&json!("http://blobs.test/coaches/1_abcdef.jpg")));
		assert!(!doc.contains_key("photo_url"));
	}
}
