//! Timestamp rendering and the lenient parsing applied to front-matter dates.

use time::{
	Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
	format_description::{BorrowedFormatItem, well_known::Rfc3339},
	macros::format_description,
};

const ISO_MILLIS: &[BorrowedFormatItem<'static>] = format_description!(
	"[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);
const NAIVE_T: &[BorrowedFormatItem<'static>] =
	format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
const NAIVE_SPACE: &[BorrowedFormatItem<'static>] =
	format_description!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]");
const DAY: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DAY_LABEL: &[BorrowedFormatItem<'static>] =
	format_description!("[month repr:short] [day padding:none]");

/// Renders `ts` in UTC with millisecond precision, e.g. `2026-10-18T12:00:00.000Z`.
pub fn format_iso(ts: OffsetDateTime) -> String {
	let utc = ts.to_offset(UtcOffset::UTC);

	utc.format(ISO_MILLIS).unwrap_or_else(|_| utc.unix_timestamp().to_string())
}

pub fn format_day(date: Date) -> String {
	date.format(DAY).unwrap_or_else(|_| date.to_string())
}

/// Short month and day, e.g. `Oct 8`.
pub fn format_day_label(date: Date) -> String {
	date.format(DAY_LABEL).unwrap_or_else(|_| date.to_string())
}

/// Accepts RFC 3339, offset-less date-times (read as UTC) and bare dates (UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
	let raw = raw.trim();

	if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
		return Some(ts);
	}

	for format in [NAIVE_T, NAIVE_SPACE] {
		if let Ok(ts) = PrimitiveDateTime::parse(raw, format) {
			return Some(ts.assume_utc());
		}
	}

	Date::parse(raw, DAY).ok().map(|date| date.midnight().assume_utc())
}
