//! Property: `documentFrequency(t)` matches a direct recount over the corpus.

use proptest::prelude::*;
use spanread::contracts::check_document_frequency;
use spanread::lexical::LexicalIndex;
use spanread::tokenizer::tokenize;
use spanread::types::Span;

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{2,8}").unwrap()
}

fn span_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..12).prop_map(|words| words.join(" "))
}

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(span_text_strategy(), 1..20)
}

fn spans_from_texts(texts: &[String]) -> Vec<Span> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| Span {
            id: format!("span:{:06}", i + 1),
            text: text.clone(),
            order: i,
            heading_path: Vec::new(),
            embedding: None,
        })
        .collect()
}

proptest! {
    #[test]
    fn document_frequency_matches_brute_force_count(texts in corpus_strategy()) {
        let spans = spans_from_texts(&texts);
        let index = LexicalIndex::build(&spans);

        let mut vocabulary = std::collections::HashSet::new();
        for text in &texts {
            for token in tokenize(text) {
                vocabulary.insert(token);
            }
        }

        for token in &vocabulary {
            let expected = texts.iter().filter(|text| tokenize(text).contains(token)).count();
            let claimed = index.document_frequency(token);
            prop_assert_eq!(claimed, expected);
            check_document_frequency(token, claimed, &spans);
        }
    }
}
