use super::{Collection, Record};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used by every date field on the site (`<input type="date">`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A scheduled academy event (tournament, grading, seminar...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
	pub title: String,
	pub date: String,
	#[serde(default)]
	pub time: String,
	#[serde(default)]
	pub location: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub category: String,
}

impl Record for Event {
	const COLLECTION: Collection = Collection::Events;
}

impl Event {
	pub fn parsed_date(&self) -> Option<NaiveDate> {
		NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
	}

	/// An event is upcoming when its date is strictly after `today`.
	/// Unparseable dates are never upcoming.
	pub fn is_upcoming(&self, today: NaiveDate) -> bool {
		self.parsed_date().is_some_and(|date| date > today)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn event(date: &str) -> Event {
		Event {
			title: "Grading".into(),
			date: date.into(),
			..Default::default()
		}
	}

	#[test]
	fn upcoming_is_strictly_after_today() {
		let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

		assert!(event("2024-03-02").is_upcoming(today));
		assert!(!event("2024-03-01").is_upcoming(today));
		assert!(!event("2024-02-28").is_upcoming(today));
		assert!(!event("next week").is_upcoming(today));
	}
}
