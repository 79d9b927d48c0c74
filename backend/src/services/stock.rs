//! Running stock level.

use super::flow::BucketFlow;

/// Left fold of `opening + inflow - outflow` over `flows`.
///
/// Element `i` is the stock at the end of bucket `i`.
pub fn integrate_stock(opening: f64, flows: &[BucketFlow]) -> Vec<f64> {
    flows
        .iter()
        .scan(opening, |stock, flow| {
            *stock = *stock + flow.inflow - flow.outflow;
            Some(*stock)
        })
        .collect()
}
