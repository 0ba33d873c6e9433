//! Property-based tests: entries assembled from pieces whose readings the
//! test cache declares must solve, every solution must rebuild the entry it
//! came from, and a guess with one outcome must not hide declared
//! ambiguity.

use proptest::prelude::*;

use crate::solution::{SolutionBuilder, SolutionPart};
use crate::unicode::{contains_kanji, katakana_to_hiragana};

use super::*;

const PIECES: &[(&str, &str)] = &[
    ("学", "がく"),
    ("校", "こう"),
    ("人", "じん"),
    ("子", "こ"),
    ("好", "すき"),
    ("の", "の"),
    ("に", "に"),
    ("カ", "か"),
];

fn arb_pieces() -> impl Strategy<Value = Vec<(&'static str, &'static str)>> {
    prop::collection::vec(prop::sample::select(PIECES.to_vec()), 1..6)
}

/// 好嫌 groups joined by kana, with 張る read はる hanging off the last 嫌.
/// Each group splits two ways from declared data; 張 has no data and no
/// anchor before it, so it is guessed, but only は leaves る to match.
fn overlapping_entry(joints: &[&str]) -> (Entry, usize) {
    let mut kanji = String::from("好嫌");
    let mut reading = String::from("すききら");
    for joint in joints {
        kanji.push_str(joint);
        kanji.push_str("好嫌");
        reading.push_str(joint);
        reading.push_str("すききら");
    }
    kanji.push_str("張る");
    reading.push_str("はる");
    let splits = 1 << (joints.len() + 1);
    (Entry::vocab(&kanji, &reading).unwrap(), splits)
}

fn assemble(pieces: &[(&str, &str)]) -> (Entry, Vec<SolutionPart>) {
    let kanji: String = pieces.iter().map(|(k, _)| *k).collect();
    let reading: String = pieces.iter().map(|(_, r)| *r).collect();
    let parts = pieces
        .iter()
        .map(|(k, r)| SolutionPart::annotated(*k, *r))
        .collect();
    (Entry::vocab(&kanji, &reading).unwrap(), parts)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn solutions_rebuild_entry(pieces in arb_pieces()) {
        let solver = test_solver();
        let (entry, _) = assemble(&pieces);
        for solution in solver.solve(&entry) {
            let base: String = solution.parts().iter().map(|p| p.base_text.as_str()).collect();
            prop_assert_eq!(base, entry.kanji_form_text());
            let reading: String = solution.parts().iter().map(SolutionPart::reading).collect();
            prop_assert_eq!(katakana_to_hiragana(&reading), entry.normalized_reading_text());
            for part in solution.parts() {
                if contains_kanji(&part.base_text) {
                    prop_assert!(part.furigana.as_deref().is_some_and(|f| !f.trim().is_empty()));
                }
            }
        }
    }

    #[test]
    fn declared_segmentation_is_found(pieces in arb_pieces()) {
        let solver = test_solver();
        let (entry, parts) = assemble(&pieces);
        let expected = SolutionBuilder::new().extended(&parts).build(&entry).unwrap();
        let found: Vec<String> = solver.solve(&entry).map(|s| s.to_string()).collect();
        prop_assert!(
            found.contains(&expected.to_string()),
            "{} not in {:?}",
            expected,
            found
        );
    }

    #[test]
    fn declared_ambiguity_survives_unique_guess(
        joints in prop::collection::vec(prop::sample::select(vec!["の", "に", "と"]), 0..3)
    ) {
        let solver = Solver::new(overlapping_cache());
        let (entry, splits) = overlapping_entry(&joints);
        let found: Vec<String> = solver.solve(&entry).map(|s| s.to_string()).collect();
        prop_assert_eq!(found.len(), splits, "{:?}", found);
        let mut distinct = found.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(distinct.len(), splits);
        prop_assert!(found.iter().all(|s| s.ends_with("[張|は]る")));
    }

    #[test]
    fn solving_is_idempotent(pieces in arb_pieces()) {
        let solver = test_solver();
        let (entry, _) = assemble(&pieces);
        let first: Vec<String> = solver.solve(&entry).map(|s| s.to_string()).collect();
        let second: Vec<String> = solver.solve(&entry).map(|s| s.to_string()).collect();
        prop_assert_eq!(first, second);
    }
}
