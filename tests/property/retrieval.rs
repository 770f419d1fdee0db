//! Properties: retrieval packs never share an id, and the accumulated
//! character budget never exceeds `maxTokens` when provided.

use proptest::prelude::*;

use super::common::build_sample_reader;
use spanread::types::{ExpandMode, RetrievalOptions};

fn options_strategy() -> impl Strategy<Value = RetrievalOptions> {
    (1usize..=9, 0usize..=4, prop::bool::ANY, 20usize..=400).prop_map(|(limit, neighbors, use_sections, max_tokens)| {
        RetrievalOptions {
            limit,
            per_hit_neighbors: neighbors,
            expand: if use_sections { ExpandMode::Section } else { ExpandMode::Neighbors },
            max_tokens: Some(max_tokens),
            ..RetrievalOptions::default()
        }
    })
}

proptest! {
    #[test]
    fn packs_have_unique_ids_and_respect_the_budget(options in options_strategy()) {
        let (mut reader, _guard) = build_sample_reader();
        let packs = reader.retrieve("section", &options).unwrap();

        let mut seen = std::collections::HashSet::new();
        for pack in &packs {
            prop_assert!(seen.insert(pack.id.clone()), "duplicate pack id {}", pack.id);
        }

        if let Some(max_tokens) = options.max_tokens {
            let total: usize = packs.iter().map(|p| p.meta.char_count).sum();
            prop_assert!(total <= max_tokens);
        }
    }
}
