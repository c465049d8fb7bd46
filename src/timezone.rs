//! Resolution of canonical timezone names to UTC offsets.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Look up the current UTC offset for a canonical timezone name, e.g.
/// "Pacific/Auckland".
///
/// The offset reflects daylight saving at the time of the call. Returns
/// `None` when the name is not in the bundled timezone database.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}
