//! String formatting utilities.
//!
//! Provides the fixed calendar rendering used for order dates and
//! identifier truncation for readable log output.

use chrono::{DateTime, Utc};

/// Formats a store timestamp as a fixed `dd/MM/yy HH:mm` calendar string.
///
/// Pure and deterministic. The input must be present; callers guard absent
/// timestamps with presence checks before calling.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
	timestamp.format("%d/%m/%y %H:%M").to_string()
}

/// Utility function to truncate an identifier for display purposes.
///
/// Shows only the first 8 characters followed by ".." for longer strings.
pub fn truncate_id(id: &str) -> String {
	if id.len() <= 8 {
		id.to_string()
	} else {
		format!("{}..", &id[..8])
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	#[test]
	fn test_format_timestamp() {
		let ts = Utc.with_ymd_and_hms(2022, 7, 4, 16, 30, 0).unwrap();
		assert_eq!(format_timestamp(ts), "04/07/22 16:30");

		// Single-digit fields are zero padded
		let ts = Utc.with_ymd_and_hms(2023, 1, 9, 8, 5, 59).unwrap();
		assert_eq!(format_timestamp(ts), "09/01/23 08:05");
	}

	#[test]
	fn test_format_timestamp_is_deterministic() {
		let ts = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 0).unwrap();
		assert_eq!(format_timestamp(ts), format_timestamp(ts));
	}

	#[test]
	fn test_truncate_id() {
		assert_eq!(truncate_id("12345678"), "12345678");
		assert_eq!(truncate_id("123456789"), "12345678..");
		assert_eq!(truncate_id("order-abcdef"), "order-ab..");
	}
}
