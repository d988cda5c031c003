// Keytest Key Descriptors
// One physical key's on-screen representation and its identifier expansion

use indexmap::IndexSet;

use crate::keysym::{self, single_char};

/// Reserved label marking a non-interactive gap in layout data
pub const SPACER_LABEL: &str = "SPACER";

/// Errors raised while building a key descriptor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("key '{0}' has no identifiers")]
    NoIdentifiers(String),

    #[error("'SPACER' is reserved for gaps and cannot label a key")]
    ReservedLabel,
}

/// Width/height multipliers relative to a standard key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeySize {
    pub width: f32,
    pub height: f32,
}

impl Default for KeySize {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

/// A physical key as shown on screen.
///
/// `identifiers` holds every keysym a hardware event may report for this key.
/// It is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDescriptor {
    label: String,
    identifiers: IndexSet<String>,
    char_override: Option<String>,
    size: KeySize,
    small_font: bool,
}

impl KeyDescriptor {
    /// Build a descriptor, expanding the raw identifiers into the full set a
    /// key event may report (see [`expand_identifiers`]).
    ///
    /// # Examples
    /// ```
    /// use keytest_core::KeyDescriptor;
    /// let key = KeyDescriptor::build("Q", ["Q"]).unwrap();
    /// assert!(key.has_identifier("q"));
    /// assert!(key.has_identifier("Q"));
    /// ```
    pub fn build<I, S>(label: impl Into<String>, raw: I) -> Result<Self, DescriptorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let label = label.into();
        if label == SPACER_LABEL {
            return Err(DescriptorError::ReservedLabel);
        }
        let raw: Vec<S> = raw.into_iter().collect();
        if raw.is_empty() {
            return Err(DescriptorError::NoIdentifiers(label));
        }
        Ok(Self::expanded(label, &raw))
    }

    /// Infallible constructor for static layout data with a non-empty id list
    pub(crate) fn expanded<S: AsRef<str>>(label: impl Into<String>, raw: &[S]) -> Self {
        let label = label.into();
        debug_assert!(!raw.is_empty(), "key '{}' built without identifiers", label);
        let identifiers = expand_identifiers(&label, raw);
        Self {
            label,
            identifiers,
            char_override: None,
            size: KeySize::default(),
            small_font: false,
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.size.width = width;
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.size.height = height;
        self
    }

    /// Pin the literal character this key always represents
    pub fn with_char_override(mut self, literal: impl Into<String>) -> Self {
        self.char_override = Some(literal.into());
        self
    }

    pub fn with_small_font(mut self, small_font: bool) -> Self {
        self.small_font = small_font;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Identifiers in insertion order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.identifiers.iter().map(String::as_str)
    }

    pub fn identifier_count(&self) -> usize {
        self.identifiers.len()
    }

    /// Exact (case-sensitive) membership test
    pub fn has_identifier(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    pub fn char_override(&self) -> Option<&str> {
        self.char_override.as_deref()
    }

    pub fn size(&self) -> KeySize {
        self.size
    }

    pub fn small_font(&self) -> bool {
        self.small_font
    }
}

/// One slot of a layout row
#[derive(Debug, Clone, PartialEq)]
pub enum KeyCell {
    Key(KeyDescriptor),
    Spacer,
}

impl KeyCell {
    pub fn as_key(&self) -> Option<&KeyDescriptor> {
        match self {
            KeyCell::Key(key) => Some(key),
            KeyCell::Spacer => None,
        }
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self, KeyCell::Spacer)
    }
}

impl From<KeyDescriptor> for KeyCell {
    fn from(key: KeyDescriptor) -> Self {
        KeyCell::Key(key)
    }
}

/// Expand raw identifiers into every keysym a key event may report.
///
/// - every raw identifier is kept
/// - single alphabetic identifiers gain both case forms
/// - `Cyrillic_x` identifiers gain their sibling case form
/// - a single-character label (with no dead-key identifier) gains the US
///   QWERTY shifted symbol of a digit, or the shifted variants of a
///   punctuation character
///
/// Expansion only ever adds. Layouts whose shift level differs list their
/// identifiers explicitly.
pub fn expand_identifiers<S: AsRef<str>>(label: &str, raw: &[S]) -> IndexSet<String> {
    let mut identifiers = IndexSet::new();

    for identifier in raw.iter().map(AsRef::as_ref) {
        identifiers.insert(identifier.to_string());
        if let Some(c) = single_char(identifier).filter(|c| c.is_alphabetic()) {
            identifiers.insert(c.to_lowercase().collect());
            identifiers.insert(c.to_uppercase().collect());
        } else if let Some(sibling) = keysym::script_case_sibling(identifier) {
            identifiers.insert(sibling);
        }
    }

    let has_dead_key = raw.iter().any(|id| keysym::is_dead_key(id.as_ref()));
    if let Some(c) = single_char(label).filter(|_| !has_dead_key) {
        if c.is_ascii_digit() {
            if let Some(shifted) = keysym::shifted_digit(c) {
                identifiers.insert(shifted.to_string());
            }
        } else if !c.is_alphabetic() {
            for shifted in keysym::shifted_punctuation(c) {
                identifiers.insert((*shifted).to_string());
            }
        }
    }

    identifiers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(key: &KeyDescriptor) -> Vec<&str> {
        let mut out: Vec<&str> = key.identifiers().collect();
        out.sort_unstable();
        out
    }

    #[test]
    fn test_letter_gains_both_cases() {
        for letter in ['a', 'Z', 'é', 'Ñ'] {
            let raw = letter.to_string();
            let key = KeyDescriptor::build(raw.to_uppercase(), [raw.as_str()]).unwrap();
            let lower: String = letter.to_lowercase().collect();
            let upper: String = letter.to_uppercase().collect();
            assert!(key.has_identifier(&lower), "missing {}", lower);
            assert!(key.has_identifier(&upper), "missing {}", upper);
        }
    }

    #[test]
    fn test_digits_gain_shifted_symbol() {
        for digit in '0'..='9' {
            let label = digit.to_string();
            let key = KeyDescriptor::build(label.as_str(), [label.as_str()]).unwrap();
            let shifted = keysym::shifted_digit(digit).unwrap();
            assert!(key.has_identifier(shifted), "{} missing {}", digit, shifted);
        }
    }

    #[test]
    fn test_punctuation_gains_shifted_variants() {
        for symbol in ['`', '-', '=', '[', ']', '\\', ';', '\'', ',', '.', '/'] {
            let label = symbol.to_string();
            let key = KeyDescriptor::build(label.as_str(), [label.as_str()]).unwrap();
            for shifted in keysym::shifted_punctuation(symbol) {
                assert!(key.has_identifier(shifted), "{} missing {}", symbol, shifted);
            }
        }
    }

    #[test]
    fn test_dead_key_suppresses_label_expansion() {
        let key = KeyDescriptor::build("`", ["dead_grave"]).unwrap();
        assert_eq!(ids(&key), vec!["dead_grave"]);
    }

    #[test]
    fn test_explicit_identifiers_are_kept() {
        // AZERTY '&' key reports 1 unshifted; nothing may be dropped
        let key = KeyDescriptor::build("&", ["ampersand", "1"]).unwrap();
        assert!(key.has_identifier("ampersand"));
        assert!(key.has_identifier("1"));
        assert_eq!(key.identifier_count(), 2);
    }

    #[test]
    fn test_cyrillic_sibling_case() {
        let key = KeyDescriptor::build("А", ["Cyrillic_a"]).unwrap();
        assert!(key.has_identifier("Cyrillic_a"));
        assert!(key.has_identifier("Cyrillic_A"));
        // Label is a single alphabetic char, so no punctuation expansion
        assert_eq!(key.identifier_count(), 2);
    }

    #[test]
    fn test_multi_char_label_not_expanded() {
        let key = KeyDescriptor::build("Shift", ["Shift_L"]).unwrap();
        assert_eq!(ids(&key), vec!["Shift_L"]);
    }

    #[test]
    fn test_empty_identifiers_rejected() {
        let err = KeyDescriptor::build("Q", Vec::<String>::new()).unwrap_err();
        assert_eq!(err, DescriptorError::NoIdentifiers("Q".to_string()));
    }

    #[test]
    fn test_spacer_label_rejected() {
        let err = KeyDescriptor::build(SPACER_LABEL, ["space"]).unwrap_err();
        assert_eq!(err, DescriptorError::ReservedLabel);
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let first = expand_identifiers("2", &["2", "quotedbl", "at"]);
        let second = expand_identifiers("2", &["2", "quotedbl", "at"]);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_builder_options() {
        let key = KeyDescriptor::build(" + ", ["KP_Add"])
            .unwrap()
            .with_width(1.1)
            .with_height(2.0)
            .with_char_override("+")
            .with_small_font(true);
        assert_eq!(key.size(), KeySize { width: 1.1, height: 2.0 });
        assert_eq!(key.char_override(), Some("+"));
        assert!(key.small_font());
    }
}
