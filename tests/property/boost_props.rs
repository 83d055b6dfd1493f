//! Ranking booster properties.

use affinity::{boost, rerank, ItemId, RerankOptions, SearchHit};
use chrono::Duration;
use proptest::prelude::*;

use crate::common::fixed_now;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: the boosted score is always in [0, 1].
    #[test]
    fn prop_boost_in_unit_range(base in 0.0f64..=1.0, stars in any::<u64>(), age in 0i64..5000) {
        let score = boost(base, stars, fixed_now() - Duration::days(age), fixed_now());
        prop_assert!((0.0..=1.0).contains(&score));
    }

    /// Property: zero relevance stays zero.
    #[test]
    fn prop_zero_base_stays_zero(stars in any::<u64>(), age in 0i64..5000) {
        prop_assert_eq!(boost(0.0, stars, fixed_now() - Duration::days(age), fixed_now()), 0.0);
    }

    /// Property: no stars and a long-stale update never raise the score.
    #[test]
    fn prop_stale_never_gains(base in 0.0f64..=1.0, age in 365i64..10_000) {
        prop_assert!(boost(base, 0, fixed_now() - Duration::days(age), fixed_now()) <= base);
    }

    /// Property: fresh and popular never lowers the score.
    #[test]
    fn prop_fresh_popular_never_loses(base in 0.001f64..=1.0, stars in 1_000u64..u64::MAX) {
        prop_assert!(boost(base, stars, fixed_now(), fixed_now()) >= base);
    }

    /// Property: more stars never hurt, older never helps.
    #[test]
    fn prop_boost_monotone(
        base in 0.0f64..=1.0,
        s1 in 0u64..1_000_000, s2 in 0u64..1_000_000,
        d1 in 0i64..800, d2 in 0i64..800,
    ) {
        let now = fixed_now();
        let (lo_s, hi_s) = (s1.min(s2), s1.max(s2));
        let (new_d, old_d) = (d1.min(d2), d1.max(d2));
        prop_assert!(boost(base, lo_s, now, now) <= boost(base, hi_s, now, now));
        prop_assert!(
            boost(base, 10, now - Duration::days(old_d), now)
                <= boost(base, 10, now - Duration::days(new_d), now)
        );
    }

    /// Property: rerank output is ranked 1..n, sorted, and tops out at 1.0.
    #[test]
    fn prop_rerank_well_formed(
        hits in prop::collection::vec((0.0f64..=1.0, 0u64..10_000, 0i64..900), 0..40),
    ) {
        let now = fixed_now();
        let hits: Vec<SearchHit> = hits
            .into_iter()
            .enumerate()
            .map(|(i, (base_score, stars, age))| SearchHit {
                id: ItemId::from(format!("h{}", i)),
                base_score,
                stars,
                updated_at: now - Duration::days(age),
            })
            .collect();
        let count = hits.len();
        let ranked = rerank(hits, &RerankOptions::default(), now).unwrap();
        prop_assert_eq!(ranked.len(), count);
        for (i, hit) in ranked.iter().enumerate() {
            prop_assert_eq!(hit.rank, i + 1);
            prop_assert!((0.0..=1.0).contains(&hit.score));
        }
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        if let Some(first) = ranked.first() {
            prop_assert!(first.score == 0.0 || (first.score - 1.0).abs() < 1e-12);
        }
    }
}
