// Keytest Keysym Tables
// Shifted-symbol tables and identifier case helpers used by the descriptor builder

use regex::Regex;
use std::sync::OnceLock;

/// Prefix shared by keysyms whose case pairs are spelled under the same prefix
/// (`Cyrillic_a` / `Cyrillic_A`).
pub const SCRIPT_CASE_PREFIX: &str = "Cyrillic_";

/// Prefix of dead / combining keysyms (`dead_acute`, `dead_circumflex`, ...)
pub const DEAD_KEY_PREFIX: &str = "dead_";

/// Shifted symbol keysym produced by a digit key on a US QWERTY board.
///
/// # Examples
/// ```
/// use keytest_core::keysym::shifted_digit;
/// assert_eq!(shifted_digit('1'), Some("exclam"));
/// assert_eq!(shifted_digit('a'), None);
/// ```
pub fn shifted_digit(digit: char) -> Option<&'static str> {
    match digit {
        '1' => Some("exclam"),
        '2' => Some("at"),
        '3' => Some("numbersign"),
        '4' => Some("dollar"),
        '5' => Some("percent"),
        '6' => Some("asciicircum"),
        '7' => Some("ampersand"),
        '8' => Some("asterisk"),
        '9' => Some("parenleft"),
        '0' => Some("parenright"),
        _ => None,
    }
}

/// Base and shifted keysyms of a punctuation key on a US QWERTY board.
///
/// Returns an empty slice for characters outside the table.
pub fn shifted_punctuation(symbol: char) -> &'static [&'static str] {
    match symbol {
        '`' => &["grave", "asciitilde"],
        '-' => &["minus", "underscore"],
        '=' => &["equal", "plus"],
        '[' => &["bracketleft", "braceleft"],
        ']' => &["bracketright", "braceright"],
        '\\' => &["backslash", "bar"],
        ';' => &["semicolon", "colon"],
        '\'' => &["apostrophe", "quotedbl"],
        ',' => &["comma", "less"],
        '.' => &["period", "greater"],
        '/' => &["slash", "question"],
        _ => &[],
    }
}

/// Check if a keysym names a dead / combining key
pub fn is_dead_key(keysym: &str) -> bool {
    keysym.starts_with(DEAD_KEY_PREFIX)
}

/// Opposite-case sibling of a script-prefixed single-letter keysym.
///
/// `Cyrillic_a` -> `Cyrillic_A`, `Cyrillic_A` -> `Cyrillic_a`. Multi-letter
/// suffixes (`Cyrillic_shorti`) and caseless letters yield `None`.
pub fn script_case_sibling(keysym: &str) -> Option<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(&format!(r"^{}(\p{{Alphabetic}})$", regex::escape(SCRIPT_CASE_PREFIX)))
            .expect("script case pattern is a valid regex")
    });

    let letter = pattern.captures(keysym)?.get(1)?.as_str().chars().next()?;
    let sibling: String = if letter.is_lowercase() {
        letter.to_uppercase().collect()
    } else if letter.is_uppercase() {
        letter.to_lowercase().collect()
    } else {
        return None;
    };

    Some(format!("{}{}", SCRIPT_CASE_PREFIX, sibling))
}

/// Case-fold an identifier for index lookups
pub fn fold(identifier: &str) -> String {
    identifier.to_lowercase()
}

/// Single character of a string, if it has exactly one
pub(crate) fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
