//! Property: hybrid scores stay within the weight budget after
//! independent min-max normalization.

use proptest::prelude::*;

use super::common::build_sample_reader;
use spanread::types::{HybridOptions, RankMode, SearchOptions};

fn weight_pair_strategy() -> impl Strategy<Value = (f64, f64)> {
    (0.0f64..=1.0, 0.0f64..=1.0).prop_filter("weights must not exceed 1", |(a, b)| a + b <= 1.0)
}

proptest! {
    #[test]
    fn hybrid_scores_never_exceed_the_weight_budget((weight_lexical, weight_semantic) in weight_pair_strategy()) {
        let (mut reader, _guard) = build_sample_reader();
        let hybrid = HybridOptions { weight_lexical, weight_semantic, normalize: true };
        let options = SearchOptions { rank: RankMode::Hybrid, hybrid: Some(hybrid), ..SearchOptions::default() };

        let results = reader.search("section two", &options).unwrap();
        for result in &results {
            prop_assert!(result.score >= -1e-9);
            prop_assert!(result.score <= weight_lexical + weight_semantic + 1e-9);
        }
    }
}
