//! Upload-then-write for records that embed a blob address
//!
//! Media writes happen in two phases:
//!
//! 1. [`stage`] uploads the file under a collision-resistant name and reads
//!    back its public address, yielding a [`StagedBlob`].
//! 2. The record carrying that address is written through the facade
//!    (`create_with_blob` / `update_with_blob`).
//!
//! A failed upload stops before any record is touched. The two phases are not
//! a transaction: if phase 2 fails, the blob stays in storage with nothing
//! pointing at it. That case surfaces as [`MutationError::Orphaned`] and is
//! logged at `warn` with the blob path so it can be removed by hand.

use super::MutationError;
use crate::context::SiteContext;

use bytes::Bytes;
use chrono::Utc;
use rand::Rng;
use tracing::{debug, warn};

const SUFFIX_LEN: usize = 6;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A file chosen in a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
	pub file_name: String,
	pub bytes: Bytes,
}

impl FileUpload {
	pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
		Self {
			file_name: file_name.into(),
			bytes: bytes.into(),
		}
	}

	/// Text after the last `.` of the file name, if any
	pub fn extension(&self) -> Option<&str> {
		self.file_name
			.rsplit_once('.')
			.map(|(_, ext)| ext)
			.filter(|ext| !ext.is_empty())
	}
}

/// A blob that has been uploaded but not yet referenced by any record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedBlob {
	pub path: String,
	pub url: String,
}

impl StagedBlob {
	/// Wrap a phase-2 failure, recording that this blob is now unreferenced
	pub fn orphan(&self, source: MutationError) -> MutationError {
		warn!(
			"Record write failed after upload; blob {} is orphaned and needs manual removal: {source}",
			self.path
		);
		MutationError::Orphaned {
			blob_path: self.path.clone(),
			source: Box::new(source),
		}
	}
}

/// `{prefix}/{unix_millis}_{suffix}.{ext}`
pub fn blob_path(prefix: &str, upload: &FileUpload, unix_millis: i64, suffix: &str) -> String {
	let prefix = prefix.trim_end_matches('/');
	match upload.extension() {
		Some(ext) => format!("{prefix}/{unix_millis}_{suffix}.{ext}"),
		None => format!("{prefix}/{unix_millis}_{suffix}"),
	}
}

pub fn random_suffix(rng: &mut impl Rng) -> String {
	(0..SUFFIX_LEN)
		.map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
		.collect()
}

/// Phase 1: upload the file and resolve its public address
pub async fn stage(
	ctx: &SiteContext,
	prefix: &str,
	upload: &FileUpload,
) -> Result<StagedBlob, MutationError> {
	let suffix = random_suffix(&mut rand::thread_rng());
	let path = blob_path(prefix, upload, Utc::now().timestamp_millis(), &suffix);

	debug!("Uploading {} ({} bytes)", path, upload.bytes.len());
	let handle = ctx.blobs.upload(&path, upload.bytes.clone()).await?;
	let url = ctx.blobs.public_url(&handle).await?;

	Ok(StagedBlob { path, url })
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{rngs::StdRng, SeedableRng};

	#[test]
	fn path_embeds_time_suffix_and_extension() {
		let upload = FileUpload::new("belt test.final.JPG", Bytes::new());

		let path = blob_path("coaches/", &upload, 1_714_000_000_000, "k3x9qa");

		assert_eq!(path, "coaches/1714000000000_k3x9qa.JPG");
	}

	#[test]
	fn path_without_extension_has_no_trailing_dot() {
		let upload = FileUpload::new("README", Bytes::new());

		assert_eq!(blob_path("gallery", &upload, 5, "aaaaaa"), "gallery/5_aaaaaa");
		assert_eq!(FileUpload::new("archive.", Bytes::new()).extension(), None);
	}

	#[test]
	fn suffix_is_lowercase_base36() {
		let mut rng = StdRng::seed_from_u64(7);

		let suffix = random_suffix(&mut rng);

		assert_eq!(suffix.len(), SUFFIX_LEN);
		assert!(suffix
			.chars()
			.all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
	}
}
