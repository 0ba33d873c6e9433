mod properties;
mod scenarios;

use std::sync::Arc;

use crate::character::{Compound, JapaneseCharacter};
use crate::entry::Entry;
use crate::resource::ResourceCache;
use crate::settings::{settings, Settings};

use super::Solver;

/// Small hand-written resource set shared by the solver tests.
pub(super) fn test_cache() -> Arc<ResourceCache> {
    let characters = vec![
        JapaneseCharacter::vocab('一', &["ひと-", "いち", "いつ"]).unwrap(),
        JapaneseCharacter::vocab('人', &["ひと", "-びと", "ジン", "ニン"]).unwrap(),
        JapaneseCharacter::vocab('好', &["すき", "す"]).unwrap(),
        JapaneseCharacter::vocab('嫌', &["きら", "ききら"]).unwrap(),
        JapaneseCharacter::vocab('引', &["ひ.く", "イン"]).unwrap(),
        JapaneseCharacter::vocab('張', &["は.る", "チョウ"]).unwrap(),
        JapaneseCharacter::vocab('学', &["まな.ぶ", "ガク"]).unwrap(),
        JapaneseCharacter::vocab('校', &["コウ"]).unwrap(),
        JapaneseCharacter::vocab('和', &["ワ", "やわ.らぐ"]).unwrap(),
        JapaneseCharacter::name('和', &["かず"]).unwrap(),
        JapaneseCharacter::vocab('子', &["こ", "シ"]).unwrap(),
    ];
    let compounds = vec![
        Compound::new("ヶ", &["ヶ", "か", "が"]),
        Compound::new("今日", &["きょう", "こんにち"]),
    ];
    Arc::new(ResourceCache::build(characters, compounds).unwrap())
}

/// Only 好 and 嫌, whose readings overlap: 好嫌 / すききら splits two ways.
pub(super) fn overlapping_cache() -> Arc<ResourceCache> {
    let characters = vec![
        JapaneseCharacter::vocab('好', &["すき", "す"]).unwrap(),
        JapaneseCharacter::vocab('嫌', &["きら", "ききら"]).unwrap(),
    ];
    Arc::new(ResourceCache::build(characters, Vec::new()).unwrap())
}

pub(super) fn test_solver() -> Solver {
    Solver::new(test_cache())
}

pub(super) fn solver_with(cache: Arc<ResourceCache>, edit: impl FnOnce(&mut Settings)) -> Solver {
    let mut s = settings().clone();
    edit(&mut s);
    Solver::with_settings(cache, s)
}

/// Solutions in fixture notation, in output order.
pub(super) fn solve(solver: &Solver, kanji: &str, reading: &str) -> Vec<String> {
    let entry = Entry::vocab(kanji, reading).unwrap();
    solver.solve(&entry).map(|s| s.to_string()).collect()
}
