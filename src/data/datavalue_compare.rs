use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two finite numbers; NaN never reaches here but compares equal
pub fn compare_numbers(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Letters of `text` with accents stripped and case folded
fn base_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Case-folded canonical decomposition, accents kept
fn accented_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd().flat_map(char::to_lowercase)
}

/// Locale-aware text comparison in the spirit of a root collation
///
/// Levels, strongest first: base letters (accents and case ignored, so `árbol`
/// sorts among the a's and `ñandú` between n and o), then accents with the
/// unaccented form first, then case with lowercase first. Code point order
/// breaks any remaining tie so the result stays total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
        .then_with(|| case_compare(a, b))
        .then_with(|| a.cmp(b))
}

fn case_compare(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.nfd().zip(b.nfd()) {
        if ca == cb {
            continue;
        }
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
