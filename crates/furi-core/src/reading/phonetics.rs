//! Sound-change tables: rendaku voicing, sokuon gemination and godan
//! continuative (masu-stem) endings. All tables are keyed on hiragana.

/// Voiced forms of a hiragana, in preference order. Empty when the kana
/// has no rendaku form.
pub fn voiced(c: char) -> &'static [char] {
    match c {
        'か' => &['が'],
        'き' => &['ぎ'],
        'く' => &['ぐ'],
        'け' => &['げ'],
        'こ' => &['ご'],
        'さ' => &['ざ'],
        'し' => &['じ'],
        'す' => &['ず'],
        'せ' => &['ぜ'],
        'そ' => &['ぞ'],
        'た' => &['だ'],
        'ち' => &['ぢ', 'じ'],
        'つ' => &['づ', 'ず'],
        'て' => &['で'],
        'と' => &['ど'],
        'は' => &['ば', 'ぱ'],
        'ひ' => &['び', 'ぴ'],
        'ふ' => &['ぶ', 'ぷ'],
        'へ' => &['べ', 'ぺ'],
        'ほ' => &['ぼ', 'ぽ'],
        _ => &[],
    }
}

/// Every rendaku variant of `reading` (first mora voiced).
pub fn rendaku_variants(reading: &str) -> Vec<String> {
    let mut chars = reading.chars();
    let Some(first) = chars.next() else {
        return Vec::new();
    };
    let rest = chars.as_str();
    voiced(first)
        .iter()
        .map(|v| {
            let mut s = String::with_capacity(reading.len());
            s.push(*v);
            s.push_str(rest);
            s
        })
        .collect()
}

/// Final morae that geminate into っ before another reading (学 がく→がっ).
fn geminates(c: char) -> bool {
    matches!(c, 'く' | 'き' | 'ち' | 'つ')
}

/// The sokuon form of a reading, if its final mora can geminate.
/// Single-mora readings never geminate.
pub fn sokuon_form(reading: &str) -> Option<String> {
    let last = reading.chars().last()?;
    if reading.chars().count() < 2 || !geminates(last) {
        return None;
    }
    let mut s = reading[..reading.len() - last.len_utf8()].to_string();
    s.push('っ');
    Some(s)
}

/// Godan dictionary-form ending → continuative ending (書く → 書き).
pub fn masu_ending(c: char) -> Option<char> {
    Some(match c {
        'う' => 'い',
        'く' => 'き',
        'ぐ' => 'ぎ',
        'す' => 'し',
        'つ' => 'ち',
        'ぬ' => 'に',
        'ぶ' => 'び',
        'む' => 'み',
        'る' => 'り',
        _ => return None,
    })
}

/// Rewrite an okurigana to its continuative form by replacing the final
/// verb ending. `None` if the okurigana does not end in a godan ending.
pub fn masu_form(okurigana: &str) -> Option<String> {
    let last = okurigana.chars().last()?;
    let ending = masu_ending(last)?;
    let mut s = okurigana[..okurigana.len() - last.len_utf8()].to_string();
    s.push(ending);
    Some(s)
}
