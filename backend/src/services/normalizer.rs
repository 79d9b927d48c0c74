//! Movement normalization.
//!
//! Turns raw records into signed deltas ordered by time. Malformed quantities
//! never reject a record: they contribute a zero delta.

use crate::models::{NormalizedMovement, RawMovement};

/// Magnitude of a recorded quantity; missing or non-finite values become 0.
pub fn sanitize_quantity(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.abs(),
        Some(v) => {
            log::warn!("Non-finite quantity {} treated as 0", v);
            0.0
        }
        None => 0.0,
    }
}

/// Signed change implied by a movement: negative for consumption.
pub fn signed_delta(movement: &RawMovement) -> f64 {
    let magnitude = sanitize_quantity(movement.quantity_change);
    if movement.kind.is_consumption() {
        -magnitude
    } else {
        magnitude
    }
}

/// Borrow `movements` in chronological order.
///
/// The sort is stable: records sharing a timestamp keep their input order.
pub fn chronological(movements: &[RawMovement]) -> Vec<&RawMovement> {
    let mut ordered: Vec<&RawMovement> = movements.iter().collect();
    ordered.sort_by_key(|m| m.at);
    ordered
}

/// Convert raw movements into signed deltas sorted ascending by time.
pub fn normalize_movements(movements: &[RawMovement]) -> Vec<NormalizedMovement> {
    chronological(movements)
        .into_iter()
        .map(|m| NormalizedMovement {
            at: m.at,
            delta: signed_delta(m),
        })
        .collect()
}
