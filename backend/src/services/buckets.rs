//! Bucket boundaries.
//!
//! A bucket is the half-open interval `[start, next_start)`. Starts are
//! aligned to the top of the hour or to midnight in the configured
//! [`BucketZone`], then carried as UTC instants.

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike, Utc};

use crate::models::{BucketZone, Granularity, TimeRange};

/// Granularity-aligned floor of `at`.
pub fn bucket_start(at: DateTime<Utc>, granularity: Granularity, zone: BucketZone) -> DateTime<Utc> {
    match zone {
        BucketZone::Local => floor_in(&Local, at, granularity),
        BucketZone::Utc => floor_in(&Utc, at, granularity),
        BucketZone::Fixed(offset) => floor_in(&offset, at, granularity),
    }
}

/// Start of the bucket following the one starting at `start`.
pub fn next_bucket_start(
    start: DateTime<Utc>,
    granularity: Granularity,
    zone: BucketZone,
) -> DateTime<Utc> {
    match zone {
        BucketZone::Local => step_in(&Local, start, granularity),
        BucketZone::Utc => step_in(&Utc, start, granularity),
        BucketZone::Fixed(offset) => step_in(&offset, start, granularity),
    }
}

/// Contiguous bucket starts covering `range`.
///
/// The first start is the floor of `range.from`; generation stops at the
/// first start past `range.to`, so the last start is `<= range.to`.
pub fn generate_buckets(
    range: &TimeRange,
    granularity: Granularity,
    zone: BucketZone,
) -> Vec<DateTime<Utc>> {
    let step_secs = granularity.nominal_step().num_seconds();
    let estimate = (range.duration().num_seconds() / step_secs).max(0) as usize + 2;
    let mut buckets = Vec::with_capacity(estimate);

    let mut cursor = bucket_start(range.from, granularity, zone);
    while cursor <= range.to {
        buckets.push(cursor);
        cursor = next_bucket_start(cursor, granularity, zone);
    }

    log::debug!(
        "Generated {} {} buckets for [{}, {}]",
        buckets.len(),
        granularity,
        range.from,
        range.to
    );
    buckets
}

fn floor_in<Tz: TimeZone>(tz: &Tz, at: DateTime<Utc>, granularity: Granularity) -> DateTime<Utc> {
    let local = at.with_timezone(tz).naive_local();
    match granularity {
        // Subtract the sub-hour part directly so repeated wall-clock hours stay distinct.
        Granularity::Hour => {
            at - Duration::minutes(local.minute() as i64)
                - Duration::seconds(local.second() as i64)
                - Duration::nanoseconds(local.nanosecond() as i64)
        }
        Granularity::Day => resolve_local(tz, local.date().and_time(NaiveTime::MIN)),
    }
}

fn step_in<Tz: TimeZone>(tz: &Tz, start: DateTime<Utc>, granularity: Granularity) -> DateTime<Utc> {
    let hour_later = start + Duration::hours(1);
    match granularity {
        Granularity::Hour => hour_later,
        Granularity::Day => {
            let date = start.with_timezone(tz).naive_local().date();
            match date.succ_opt() {
                Some(next) => resolve_local(tz, next.and_time(NaiveTime::MIN)).max(hour_later),
                None => start + Duration::days(1),
            }
        }
    }
}

/// Map a wall-clock time in `tz` to an instant.
///
/// Ambiguous times take the earliest instant. Times skipped by a DST jump use
/// the offset in force after the jump.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(t) => t.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let offset = tz.offset_from_utc_datetime(&naive).fix();
            Utc.from_utc_datetime(&(naive - Duration::seconds(offset.local_minus_utc() as i64)))
        }
    }
}
