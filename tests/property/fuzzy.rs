//! Property: every generated neighbor is at Levenshtein distance exactly 1.

use proptest::prelude::*;
use spanread::fuzzy::generate_one_edit_neighborhood;

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for i in 1..=a.len() {
        let mut prev = row[0];
        row[0] = i;
        for j in 1..=b.len() {
            let temp = row[j];
            row[j] = if a[i - 1] == b[j - 1] { prev } else { 1 + prev.min(row[j]).min(row[j - 1]) };
            prev = temp;
        }
    }
    row[b.len()]
}

proptest! {
    #[test]
    fn every_neighbor_is_distance_one(token in "[a-z0-9]{1,8}") {
        for candidate in generate_one_edit_neighborhood(&token) {
            prop_assert_eq!(levenshtein(&token, &candidate), 1);
        }
    }
}
