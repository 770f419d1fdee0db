//! Property: `tokenize` is idempotent when re-applied to its own output.

use proptest::prelude::*;
use spanread::tokenizer::tokenize;

proptest! {
    #[test]
    fn tokenize_is_idempotent(text in "[ -~]{0,120}") {
        let tokens = tokenize(&text);
        let rejoined = tokens.join(" ");
        prop_assert_eq!(tokenize(&rejoined), tokens);
    }
}
