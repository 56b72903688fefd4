//! Feature building properties
//!
//! Ratio definitions, zero-view convention and passthrough round trip.

#[cfg(test)]
mod builder_tests {
    use crate::logic::error::ModelError;
    use crate::logic::features::{build, Category, Country, Device, RawInput};

    const EPS: f64 = 1e-9;

    fn scenario_one() -> RawInput {
        RawInput {
            views: 10_000,
            likes: 500,
            comments: 50,
            subscribers: 50_000,
            watch_time_minutes: 3000.0,
            video_length_minutes: 10.0,
            category: Category::Music,
            device: Device::Mobile,
            country: Country::US,
        }
    }

    #[test]
    fn test_scenario_one_ratios() {
        let record = build(&scenario_one()).unwrap();
        assert!((record.engagement_rate - 0.055).abs() < EPS);
        assert!((record.watch_time_per_min - 300.0).abs() < EPS);
    }

    #[test]
    fn test_engagement_rate_matches_definition() {
        let cases = [(1u64, 0u64, 0u64), (3, 1, 1), (7, 100, 3), (1_000_000, 12_345, 678), (9, 9, 9)];

        for (views, likes, comments) in cases {
            let raw = RawInput { views, likes, comments, ..scenario_one() };
            let record = build(&raw).unwrap();
            let expected = (likes + comments) as f64 / views as f64;
            assert!(
                (record.engagement_rate - expected).abs() < EPS,
                "views={} likes={} comments={}",
                views, likes, comments
            );
        }
    }

    #[test]
    fn test_zero_views_yield_zero_engagement() {
        let raw = RawInput { views: 0, likes: 10, comments: 5, ..scenario_one() };
        let record = build(&raw).unwrap();
        assert_eq!(record.engagement_rate, 0.0);
        assert!(record.engagement_rate.is_finite());
    }

    #[test]
    fn test_watch_time_per_min_matches_definition() {
        for (watch, length) in [(0.0, 0.1), (3000.0, 10.0), (1.5, 0.5), (123.456, 7.89)] {
            let raw = RawInput { watch_time_minutes: watch, video_length_minutes: length, ..scenario_one() };
            let record = build(&raw).unwrap();
            assert!((record.watch_time_per_min - watch / length).abs() < EPS);
        }
    }

    #[test]
    fn test_zero_length_is_domain_error() {
        let raw = RawInput { video_length_minutes: 0.0, ..scenario_one() };
        assert!(matches!(build(&raw), Err(ModelError::DomainInput(_))));
    }

    #[test]
    fn test_passthrough_round_trip() {
        let raw = scenario_one();
        let numeric = build(&raw).unwrap().raw_numeric();

        assert_eq!(numeric.views, raw.views);
        assert_eq!(numeric.likes, raw.likes);
        assert_eq!(numeric.comments, raw.comments);
        assert_eq!(numeric.subscribers, raw.subscribers);
        assert_eq!(numeric.watch_time_minutes, raw.watch_time_minutes);
        assert_eq!(numeric.video_length_minutes, raw.video_length_minutes);
    }

    #[test]
    fn test_categoricals_pass_through_unencoded() {
        let raw = RawInput { category: Category::Tech, device: Device::TV, country: Country::DE, ..scenario_one() };
        let record = build(&raw).unwrap();
        assert_eq!(record.category, Category::Tech);
        assert_eq!(record.device, Device::TV);
        assert_eq!(record.country, Country::DE);
    }

    #[test]
    fn test_build_is_deterministic() {
        let raw = scenario_one();
        assert_eq!(build(&raw).unwrap(), build(&raw).unwrap());
    }
}
