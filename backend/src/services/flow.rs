//! Per-bucket inflow/outflow aggregation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::buckets::bucket_start;
use crate::models::{BucketZone, Granularity, NormalizedMovement, TimeRange};

/// Summed flow of one bucket. Both sides are non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BucketFlow {
    pub inflow: f64,
    pub outflow: f64,
}

impl BucketFlow {
    pub fn net(&self) -> f64 {
        self.inflow - self.outflow
    }

    fn add_delta(&mut self, delta: f64) {
        if delta >= 0.0 {
            self.inflow += delta;
        } else {
            self.outflow += delta.abs();
        }
    }
}

/// Non-negative finite value, else 0.
pub fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Sum in-window deltas into their buckets.
///
/// Only movements with `range.from <= at <= range.to` contribute. The output
/// has one entry per element of `buckets`, in the same order; buckets without
/// movements are zero.
pub fn aggregate_flows(
    movements: &[NormalizedMovement],
    range: &TimeRange,
    buckets: &[DateTime<Utc>],
    granularity: Granularity,
    zone: BucketZone,
) -> Vec<BucketFlow> {
    let mut sums: BTreeMap<DateTime<Utc>, BucketFlow> = BTreeMap::new();
    for movement in movements.iter().filter(|m| range.contains(m.at)) {
        sums.entry(bucket_start(movement.at, granularity, zone))
            .or_default()
            .add_delta(movement.delta);
    }

    buckets
        .iter()
        .map(|start| {
            let flow = sums.get(start).copied().unwrap_or_default();
            BucketFlow {
                inflow: clamp_non_negative(flow.inflow),
                outflow: clamp_non_negative(flow.outflow),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::buckets::generate_buckets;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 15, 9, 41, 27).unwrap()
    }

    fn movement(at: DateTime<Utc>, delta: f64) -> NormalizedMovement {
        NormalizedMovement { at, delta }
    }

    fn aggregate(movements: &[NormalizedMovement], range: &TimeRange) -> Vec<BucketFlow> {
        let buckets = generate_buckets(range, Granularity::Day, BucketZone::Utc);
        aggregate_flows(movements, range, &buckets, Granularity::Day, BucketZone::Utc)
    }

    #[test]
    fn test_empty_buckets_are_zero_filled() {
        let range = TimeRange::new(now() - Duration::days(7), now());
        let flows = aggregate(&[], &range);
        assert_eq!(flows.len(), 8);
        assert!(flows.iter().all(|f| *f == BucketFlow::default()));
    }

    #[test]
    fn test_same_bucket_deltas_are_summed_per_side() {
        let range = TimeRange::new(now() - Duration::days(7), now());
        let day = now() - Duration::days(2);
        let flows = aggregate(
            &[
                movement(day, 4.0),
                movement(day + Duration::minutes(5), -1.5),
                movement(day + Duration::minutes(9), 2.0),
                movement(day + Duration::minutes(30), -0.5),
            ],
            &range,
        );

        assert_eq!(flows[5], BucketFlow { inflow: 6.0, outflow: 2.0 });
        assert_eq!(flows[5].net(), 4.0);
    }

    #[test]
    fn test_out_of_window_movements_are_ignored() {
        let range = TimeRange::new(now() - Duration::days(7), now());
        // Same calendar day as the first bucket, but before `from`.
        let flows = aggregate(
            &[
                movement(range.from - Duration::minutes(1), 10.0),
                movement(now() + Duration::seconds(1), -3.0),
            ],
            &range,
        );
        assert!(flows.iter().all(|f| *f == BucketFlow::default()));
    }

    #[test]
    fn test_window_edges_are_inclusive() {
        let range = TimeRange::new(now() - Duration::days(7), now());
        let flows = aggregate(&[movement(range.from, 1.0), movement(now(), -2.0)], &range);
        assert_eq!(flows[0].inflow, 1.0);
        assert_eq!(flows[7].outflow, 2.0);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(clamp_non_negative(3.5), 3.5);
        assert_eq!(clamp_non_negative(-1.0), 0.0);
        assert_eq!(clamp_non_negative(f64::INFINITY), 0.0);
        assert_eq!(clamp_non_negative(f64::NAN), 0.0);
    }
}
