use std::sync::Arc;

use super::*;

fn empty_solver() -> Solver {
    Solver::new(Arc::new(ResourceCache::empty()))
}

#[test]
fn test_special_expression_and_sokuon() {
    let cache = ResourceCache::build(
        [JapaneseCharacter::vocab('一', &["ひと-", "いち", "いつ"]).unwrap()],
        [Compound::new("ヶ", &["ヶ", "か", "が"])],
    )
    .unwrap();
    let solver = Solver::new(Arc::new(cache));
    assert_eq!(
        solve(&solver, "一ヶ月", "いっかげつ"),
        vec!["[一|いっ][ヶ|か][月|げつ]"]
    );
    assert_eq!(
        solve(&test_solver(), "一ヶ月", "いっかげつ"),
        vec!["[一|いっ][ヶ|か][月|げつ]"]
    );
}

#[test]
fn test_no_data_anchored_by_okurigana() {
    let solver = empty_solver();
    assert_eq!(solve(&solver, "頑張る", "がんばる"), vec!["[頑|がん][張|ば]る"]);
}

#[test]
fn test_declared_ambiguity_surfaces_every_split() {
    let solver = test_solver();
    assert_eq!(
        solve(&solver, "好嫌", "すききら"),
        vec!["[好|すき][嫌|きら]", "[好|す][嫌|ききら]"]
    );
}

#[test]
fn test_single_guess_keeps_declared_ambiguity() {
    let solver = Solver::new(overlapping_cache());
    assert_eq!(
        solve(&solver, "好嫌張る", "すききらはる"),
        vec!["[好|すき][嫌|きら][張|は]る", "[好|す][嫌|ききら][張|は]る"]
    );
}

#[test]
fn test_ambiguous_guess_dropped_beside_declared_ambiguity() {
    let solver = Solver::new(overlapping_cache());
    assert!(solve(&solver, "好嫌の可能", "すききらのかのう").is_empty());
}

#[test]
fn test_ambiguous_guess_yields_nothing() {
    let solver = empty_solver();
    assert!(solve(&solver, "可能", "かのう").is_empty());
}

#[test]
fn test_ambiguous_guess_kept_when_allowed() {
    let solver = solver_with(Arc::new(ResourceCache::empty()), |s| {
        s.solver.reject_guessed_ambiguity = false;
    });
    assert_eq!(
        solve(&solver, "可能", "かのう"),
        vec!["[可|か][能|のう]", "[可|かの][能|う]"]
    );
}

#[test]
fn test_repeated_kanji_split_evenly() {
    let solver = empty_solver();
    assert_eq!(solve(&solver, "唖々", "ああ"), vec!["[唖|あ][々|あ]"]);
}

#[test]
fn test_iteration_mark_takes_rendaku() {
    let solver = test_solver();
    assert_eq!(solve(&solver, "人々", "ひとびと"), vec!["[人|ひと][々|びと]"]);
}

#[test]
fn test_verb_with_small_tsu() {
    let solver = test_solver();
    assert_eq!(solve(&solver, "引っ張る", "ひっぱる"), vec!["[引|ひ]っ[張|ぱ]る"]);
}

#[test]
fn test_on_reading_gemination() {
    let solver = test_solver();
    assert_eq!(solve(&solver, "学校", "がっこう"), vec!["[学|がっ][校|こう]"]);
}

#[test]
fn test_multi_rune_compound() {
    let solver = test_solver();
    assert_eq!(solve(&solver, "今日は", "きょうは"), vec!["[今日|きょう]は"]);
    assert_eq!(solve(&solver, "今日は", "こんにちは"), vec!["[今日|こんにち]は"]);
}

#[test]
fn test_katakana_reading_keeps_raw_furigana() {
    let solver = test_solver();
    assert_eq!(solve(&solver, "今日は", "コンニチハ"), vec!["[今日|コンニチ]は"]);
}

#[test]
fn test_name_readings_need_name_entry() {
    let solver = solver_with(test_cache(), |s| s.solver.fallback = false);
    let vocab = Entry::vocab("和子", "かずこ").unwrap();
    assert_eq!(solver.solve(&vocab).count(), 0);

    let name = Entry::name("和子", "かずこ").unwrap();
    let solutions: Vec<String> = solver.solve(&name).map(|s| s.to_string()).collect();
    assert_eq!(solutions, vec!["[和|かず][子|こ]"]);
}

#[test]
fn test_kana_only_entry() {
    let solver = empty_solver();
    assert_eq!(solve(&solver, "ひらがな", "ひらがな"), vec!["ひらがな"]);
    assert!(solve(&solver, "ひらがな", "ひらかな").is_empty());
}

#[test]
fn test_fallback_disabled() {
    let solver = solver_with(Arc::new(ResourceCache::empty()), |s| s.solver.fallback = false);
    assert!(solve(&solver, "頑張る", "がんばる").is_empty());
}

#[test]
fn test_beam_overflow_gives_up() {
    let solver = solver_with(Arc::new(ResourceCache::empty()), |s| {
        s.solver.max_beam_width = 2;
        s.solver.reject_guessed_ambiguity = false;
    });
    assert!(solve(&solver, "可能", "かのう").is_empty());
}

#[test]
fn test_solve_is_restartable() {
    let solver = test_solver();
    let entry = Entry::vocab("好嫌", "すききら").unwrap();
    let first: Vec<_> = solver.solve(&entry).collect();
    let second: Vec<_> = solver.solve(&entry).collect();
    assert_eq!(first, second);
    assert_eq!(first[0].entry(), &entry);
}

#[test]
fn test_solutions_are_lazy() {
    let solver = test_solver();
    let entry = Entry::vocab("好嫌", "すききら").unwrap();
    let mut solutions = solver.solve(&entry);
    let first = solutions.next().unwrap();
    assert_eq!(first.to_string(), "[好|すき][嫌|きら]");
    assert_eq!(solutions.count(), 1);
}

#[test]
fn test_unmatched_reading_yields_nothing() {
    let solver = test_solver();
    assert!(solve(&solver, "学校", "がっこうう").is_empty());
}
