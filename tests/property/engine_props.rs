//! Engine-level properties over random catalogs.

use affinity::{CancellationToken, RelatedOptions, RelatednessEngine, VecSource};
use proptest::prelude::*;

use crate::common::{assert_well_formed, permissive_options, related_with};
use crate::strategies::{catalog_strategy, item_strategy};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: output is bounded, sorted, above threshold, id-unique.
    #[test]
    fn prop_output_well_formed(
        target in item_strategy("target".to_string()),
        catalog in catalog_strategy(60),
        max_results in 1usize..10,
    ) {
        let options = RelatedOptions { max_results, ..Default::default() };
        let results = related_with(options.clone(), &target, catalog);
        assert_well_formed(&results, &options);
    }

    /// Property: the same catalog gives the same answer, every time.
    #[test]
    fn prop_idempotent(target in item_strategy("target".to_string()), catalog in catalog_strategy(40)) {
        let first = related_with(RelatedOptions::default(), &target, catalog.clone());
        let second = related_with(RelatedOptions::default(), &target, catalog);
        prop_assert_eq!(first, second);
    }

    /// Property: batching is invisible in the result.
    #[test]
    fn prop_batch_size_invariant(
        target in item_strategy("target".to_string()),
        catalog in catalog_strategy(50),
        batch_size in 1usize..17,
    ) {
        let batched = related_with(
            RelatedOptions { batch_size, ..permissive_options() },
            &target,
            catalog.clone(),
        );
        let single = related_with(permissive_options(), &target, catalog);
        prop_assert_eq!(batched, single);
    }

    /// Property: the target never appears in its own results, even when
    /// the source leaks it.
    #[test]
    fn prop_target_excluded(target in item_strategy("c0".to_string()), mut catalog in catalog_strategy(20)) {
        catalog.push(target.clone());
        let engine = RelatednessEngine::new(permissive_options()).unwrap();
        let mut source = VecSource::new(catalog);
        let results = engine.find_related(&target, &mut source, &CancellationToken::new()).unwrap();
        prop_assert!(results.iter().all(|r| r.id != target.id));
    }
}
