/// Asks the user to confirm a destructive action
pub trait Confirm {
	fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
	F: Fn(&str) -> bool,
{
	fn confirm(&self, prompt: &str) -> bool {
		self(prompt)
	}
}
