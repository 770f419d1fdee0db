//! Property: a text's embedding has cosine similarity 1 with itself.

use proptest::prelude::*;
use spanread::embedding;

fn text_with_tokens_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,10}", 1..15).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn embedding_is_self_similar(text in text_with_tokens_strategy()) {
        let vector = embedding::embed_text(&text);
        let similarity = embedding::cosine_similarity(&vector, &vector).unwrap();
        prop_assert!((similarity - 1.0).abs() < 1e-9);
    }
}

#[test]
fn mismatched_dimensions_are_rejected() {
    let a = vec![1.0, 0.0];
    let b = vec![1.0, 0.0, 0.0];
    assert!(embedding::cosine_similarity(&a, &b).is_err());
}
