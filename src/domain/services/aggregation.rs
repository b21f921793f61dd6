use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

pub type MonthlyCounts = [i64; 12];

/// `[year-01-01T00:00, (year+1)-01-01T00:00)` in `tz`, as UTC instants.
///
/// Returns `None` for years chrono cannot represent.
pub fn year_range(year: i32, tz: Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = local_new_year(year, tz)?;
    let end = local_new_year(year.checked_add(1)?, tz)?;
    Some((start, end))
}

fn local_new_year(year: i32, tz: Tz) -> Option<DateTime<Utc>> {
    let midnight = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?;
    // New Year's midnight is never inside a DST gap in practice; take the
    // earliest mapping if it is ambiguous.
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Counts rows per calendar month (0 = January) of the selected timestamp in `tz`.
///
/// Rows are expected to be pre-filtered with [`year_range`] on the same field
/// the selector reads.
pub fn monthly_bucket_count<T, F>(rows: &[T], date_selector: F, tz: Tz) -> MonthlyCounts
where
    F: Fn(&T) -> DateTime<Utc>,
{
    let mut buckets = [0i64; 12];
    for row in rows {
        let month = date_selector(row).with_timezone(&tz).month0() as usize;
        buckets[month] += 1;
    }
    buckets
}
