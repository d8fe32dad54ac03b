//! Normalization of branch names to the ASCII codes used as rule keys.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::vietnamese::Branch;

/// Lowercase spellings accepted for each branch code, besides the code
/// itself and the standard name.
const ALIASES: &[(&str, &str)] = &[
    ("tí", "ti"),
    ("mẹo", "mao"),
    ("meo", "mao"),
    ("tị", "ty"),
];

static BRANCH_CODES: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for i in 0..12 {
        let branch = Branch::from_index(i);
        map.insert(branch.code().to_owned(), branch.code());
        map.insert(branch.name().to_lowercase(), branch.code());
    }
    for &(alias, code) in ALIASES {
        map.insert(alias.to_owned(), code);
    }
    map
});

/// Maps a branch name (any case, surrounding whitespace ignored) to its
/// ASCII code.
///
/// Unknown input is returned as given, so that a lookup with it fails
/// further down instead of here.
///
/// # Example
///
/// ```
/// use amlich::rules::normalize_branch;
///
/// assert_eq!("dan", normalize_branch("Dần"));
/// assert_eq!("mao", normalize_branch(" MÃO "));
/// assert_eq!("mao", normalize_branch("mao"));
/// assert_eq!("rồng", normalize_branch("rồng"));
/// ```
pub fn normalize_branch(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    match BRANCH_CODES.get(&key) {
        Some(code) => (*code).to_owned(),
        None => raw.to_owned(),
    }
}

/// Branch part of a full Can-Chi label, i.e. its last word.
///
/// A bare branch name is returned as is.
///
/// # Example
///
/// ```
/// use amlich::rules::branch_of;
///
/// assert_eq!("Tỵ", branch_of("Ất Tỵ"));
/// assert_eq!("ngo", branch_of("ngo"));
/// ```
pub fn branch_of(label: &str) -> &str {
    label.split_whitespace().next_back().unwrap_or(label)
}
