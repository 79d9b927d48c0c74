#[cfg(test)]
mod tests {
    use crate::models::{
        BucketZone, Granularity, OpeningStockSource, RawMovement, WindowPreset,
    };
    use crate::services::flow_series::{compute_flow_series, FlowSeriesOptions};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 15, 9, 41, 27).unwrap()
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, d, 0, 0, 0).unwrap()
    }

    fn options(preset: WindowPreset) -> FlowSeriesOptions {
        FlowSeriesOptions::new(preset)
            .with_now(now())
            .with_zone(BucketZone::Utc)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
    }

    #[test]
    fn test_empty_history_week() {
        let result = compute_flow_series(&[], &options(WindowPreset::Week));

        assert_eq!(result.granularity, Granularity::Day);
        assert_eq!(result.range.from, now() - Duration::days(7));
        assert_eq!(result.range.to, now());
        assert_eq!(result.points.len(), 8);
        assert_eq!(result.points[0].t, day(8));
        assert_eq!(result.points[7].t, day(15));
        for point in &result.points {
            assert_eq!(point.inflow, 0.0);
            assert_eq!(point.outflow, 0.0);
            assert_eq!(point.stock, 0.0);
        }
        assert_eq!(result.flow_domain, [-1.0, 1.0]);
        assert_close(result.stock_domain[0], -0.05);
        assert_close(result.stock_domain[1], 1.05);
        assert_eq!(result.opening_stock_source, OpeningStockSource::NoHistory);
    }

    #[test]
    fn test_single_replenishment_back_computes_opening() {
        let movements = vec![
            RawMovement::replenishment(now() - Duration::days(3), 10.0).with_quantity_after(10.0),
        ];
        let result = compute_flow_series(
            &movements,
            &options(WindowPreset::Week).with_granularity(Granularity::Day),
        );

        assert_eq!(result.opening_stock, 0.0);
        assert_eq!(
            result.opening_stock_source,
            OpeningStockSource::BackComputedFromFirstInWindow
        );

        let target = result.points.iter().position(|p| p.t == day(12)).unwrap();
        assert_eq!(result.points[target].inflow, 10.0);
        assert_eq!(result.points[target].outflow, 0.0);
        assert_eq!(result.points[target].stock, 10.0);
        assert!(result.points[..target].iter().all(|p| p.stock == 0.0));
        assert!(result.points[target + 1..].iter().all(|p| p.stock == 10.0));
        assert_close(result.flow_domain[1], 12.0);
    }

    #[test]
    fn test_history_before_window_sets_opening() {
        let movements = vec![
            RawMovement::consumption(now() - Duration::days(2), 5.0).with_quantity_after(15.0),
            RawMovement::replenishment(now() - Duration::days(10), 20.0).with_quantity_after(20.0),
        ];
        let result = compute_flow_series(&movements, &options(WindowPreset::Week));

        assert_eq!(result.opening_stock, 20.0);
        assert_eq!(
            result.opening_stock_source,
            OpeningStockSource::LastBeforeWindowQuantityAfter
        );

        let target = result.points.iter().position(|p| p.t == day(13)).unwrap();
        assert_eq!(result.points[target].outflow, 5.0);
        assert_eq!(result.points[target].stock, 15.0);
        assert!(result.points[..target].iter().all(|p| p.stock == 20.0));
        assert_eq!(result.closing_stock(), 15.0);
        assert_close(result.stock_domain[0], 14.75);
        assert_close(result.stock_domain[1], 20.25);
    }

    #[test]
    fn test_same_hour_movements_share_a_bucket() {
        let hour = Utc.with_ymd_and_hms(2024, 4, 15, 4, 0, 0).unwrap();
        let movements = vec![
            RawMovement::consumption(hour + Duration::minutes(50), 2.0),
            RawMovement::replenishment(hour + Duration::minutes(10), 3.0).with_quantity_before(10.0),
        ];
        let result = compute_flow_series(&movements, &options(WindowPreset::Day));

        assert_eq!(result.granularity, Granularity::Hour);
        assert_eq!(result.points.len(), 25);
        let target = result.points.iter().position(|p| p.t == hour).unwrap();
        let point = result.points[target];
        assert_eq!(point.inflow, 3.0);
        assert_eq!(point.outflow, 2.0);
        assert_eq!(point.stock - result.points[target - 1].stock, 1.0);
        assert_eq!(point.stock, 11.0);
        assert_eq!(result.total_inflow(), 3.0);
        assert_eq!(result.total_outflow(), 2.0);
    }

    #[test]
    fn test_opening_override_skips_reconstruction() {
        let movements = vec![
            RawMovement::replenishment(now() - Duration::days(10), 20.0).with_quantity_after(20.0),
        ];
        let result = compute_flow_series(
            &movements,
            &options(WindowPreset::Week).with_opening_stock(42.0),
        );

        assert_eq!(result.opening_stock, 42.0);
        assert_eq!(result.opening_stock_source, OpeningStockSource::Override);
        assert!(result.points.iter().all(|p| p.stock == 42.0));
    }

    #[test]
    fn test_non_finite_options_fall_back_to_defaults() {
        let movements = vec![
            RawMovement::replenishment(now() - Duration::days(10), 20.0).with_quantity_after(20.0),
        ];
        let result = compute_flow_series(
            &movements,
            &options(WindowPreset::Week)
                .with_opening_stock(f64::NAN)
                .with_flow_padding_multiplier(f64::INFINITY)
                .with_min_abs_flow_domain(f64::NAN),
        );

        assert_eq!(result.opening_stock, 20.0);
        assert_eq!(result.flow_domain, [-1.0, 1.0]);
    }

    #[test]
    fn test_custom_domain_options() {
        let movements = vec![RawMovement::consumption(now() - Duration::hours(1), 4.0)];
        let result = compute_flow_series(
            &movements,
            &options(WindowPreset::Week)
                .with_flow_padding_multiplier(1.5)
                .with_min_abs_flow_domain(0.5),
        );
        assert_eq!(result.flow_domain, [-6.0, 6.0]);
    }

    #[test]
    fn test_granularity_override() {
        let result = compute_flow_series(
            &[],
            &options(WindowPreset::Week).with_granularity(Granularity::Hour),
        );
        assert_eq!(result.granularity, Granularity::Hour);
        assert_eq!(result.points.len(), 7 * 24 + 1);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let movements = vec![
            RawMovement::replenishment(now() - Duration::days(40), 12.0).with_quantity_after(12.0),
            RawMovement::consumption(now() - Duration::days(20), 2.0),
            RawMovement::consumption(now() - Duration::days(20), 1.0),
        ];
        let opts = options(WindowPreset::Quarter);
        assert_eq!(
            compute_flow_series(&movements, &opts),
            compute_flow_series(&movements, &opts)
        );
    }

    #[test]
    fn test_options_deserialize_leniently() {
        let json = r#"{
            "now": "2024-04-15T09:41:27Z",
            "preset": "fortnight",
            "granularity": "minutely",
            "opening_stock": 5,
            "bucket_zone": "utc"
        }"#;
        let opts: FlowSeriesOptions = serde_json::from_str(json).unwrap();

        assert_eq!(opts.now, Some(now()));
        assert_eq!(opts.preset, WindowPreset::Week);
        assert_eq!(opts.granularity, None);
        assert_eq!(opts.opening_stock_override, Some(5.0));
        assert_eq!(opts.zone, Some(BucketZone::Utc));
    }

    #[test]
    fn test_options_reject_bad_timestamp() {
        let json = r#"{"now": "yesterday"}"#;
        assert!(serde_json::from_str::<FlowSeriesOptions>(json).is_err());
    }

    #[test]
    fn test_options_fill_from_base() {
        let base = FlowSeriesOptions::default()
            .with_flow_padding_multiplier(2.0)
            .with_zone(BucketZone::Utc);
        let merged = FlowSeriesOptions::new(WindowPreset::Month)
            .with_zone(BucketZone::Local)
            .or(&base);

        assert_eq!(merged.preset, WindowPreset::Month);
        assert_eq!(merged.flow_padding_multiplier, Some(2.0));
        assert_eq!(merged.zone, Some(BucketZone::Local));
    }
}
