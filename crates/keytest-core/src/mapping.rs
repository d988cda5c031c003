// Keytest Key Mapping Index
// Case-folded identifier and character-override lookups for one layout

use std::collections::HashMap;
use std::fmt;

use smallvec::SmallVec;

use crate::keysym::fold;
use crate::layout::Layout;

/// Handle of a rendered key: its position in layout traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(usize);

impl KeyId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Most identifiers map to one key; shared ones (Shift in two places, a
/// digit on the main row and the numpad) to a handful.
pub type KeyBucket = SmallVec<[KeyId; 2]>;

/// Lookup tables derived from a layout, rebuilt whenever the layout changes
#[derive(Debug, Clone, Default)]
pub struct KeyMappingIndex {
    by_identifier: HashMap<String, KeyBucket>,
    by_char_override: HashMap<String, KeyBucket>,
}

impl KeyMappingIndex {
    /// Index every non-spacer key of `layout`
    pub fn build(layout: &Layout) -> Self {
        let mut index = Self::default();

        for (position, key) in layout.keys().enumerate() {
            let id = KeyId(position);
            for identifier in key.identifiers() {
                push_unique(index.by_identifier.entry(fold(identifier)).or_default(), id);
            }
            if let Some(literal) = key.char_override() {
                push_unique(
                    index.by_char_override.entry(literal.to_string()).or_default(),
                    id,
                );
                // The literal also resolves like any other identifier
                push_unique(index.by_identifier.entry(fold(literal)).or_default(), id);
            }
        }

        index
    }

    /// Keys holding a case-folded identifier
    pub fn lookup(&self, folded: &str) -> &[KeyId] {
        self.by_identifier
            .get(folded)
            .map(|bucket| bucket.as_slice())
            .unwrap_or(&[])
    }

    /// Keys whose override literal equals `literal` exactly
    pub fn by_char_override(&self, literal: &str) -> &[KeyId] {
        self.by_char_override
            .get(literal)
            .map(|bucket| bucket.as_slice())
            .unwrap_or(&[])
    }

    /// Number of distinct folded identifiers
    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }
}

fn push_unique(bucket: &mut KeyBucket, id: KeyId) {
    if !bucket.contains(&id) {
        bucket.push(id);
    }
}
