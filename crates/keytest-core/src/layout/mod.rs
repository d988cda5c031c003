// Keytest Layout Model
// Named keyboard layouts made of ordered key groups

pub mod builtin;
pub mod catalog;

pub use catalog::LayoutCatalog;

use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::descriptor::{KeyCell, KeyDescriptor};

/// One row of key-or-spacer cells
pub type Row = Vec<KeyCell>;

/// Physical block of a keyboard
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum GroupKind {
    /// Escape plus F1-F12
    Function,
    /// Print Screen, Scroll Lock, Pause
    Edit,
    /// Insert/Delete, Home/End, Page Up/Down
    Navigation,
    Arrows,
    Numpad,
    /// Alphanumeric block including the bottom modifier row
    Main,
}

/// An ordered sequence of rows for one block
#[derive(Debug, Clone, PartialEq)]
pub struct KeyGroup {
    kind: GroupKind,
    rows: Vec<Row>,
}

impl KeyGroup {
    pub fn new(kind: GroupKind, rows: Vec<Row>) -> Self {
        Self { kind, rows }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Non-spacer keys in row order
    pub fn keys(&self) -> impl Iterator<Item = &KeyDescriptor> {
        self.rows.iter().flatten().filter_map(KeyCell::as_key)
    }
}

/// A named keyboard layout.
///
/// Key traversal order (groups, then rows, then cells, spacers skipped) is what
/// [`crate::KeyId`] indexes into.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    name: String,
    groups: Vec<KeyGroup>,
}

impl Layout {
    pub fn new(name: impl Into<String>, groups: Vec<KeyGroup>) -> Self {
        Self {
            name: name.into(),
            groups,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn groups(&self) -> &[KeyGroup] {
        &self.groups
    }

    pub fn group(&self, kind: GroupKind) -> Option<&KeyGroup> {
        self.groups.iter().find(|group| group.kind == kind)
    }

    /// All keys in traversal order
    pub fn keys(&self) -> impl Iterator<Item = &KeyDescriptor> {
        self.groups.iter().flat_map(KeyGroup::keys)
    }

    pub fn key_count(&self) -> usize {
        self.keys().count()
    }

    /// Copy of this layout under a new name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: self.groups.clone(),
        }
    }

    /// Replace the group of the same kind, or append it if absent
    pub fn with_group(mut self, group: KeyGroup) -> Self {
        match self.groups.iter_mut().find(|g| g.kind == group.kind) {
            Some(existing) => *existing = group,
            None => self.groups.push(group),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn key(label: &str) -> KeyCell {
        KeyDescriptor::build(label, [label]).unwrap().into()
    }

    #[test]
    fn test_group_kind_names() {
        assert_eq!(GroupKind::Navigation.to_string(), "navigation");
        assert_eq!(GroupKind::from_str("numpad").unwrap(), GroupKind::Numpad);
        assert!(GroupKind::from_str("thumbs").is_err());
    }

    #[test]
    fn test_keys_skip_spacers() {
        let group = KeyGroup::new(
            GroupKind::Arrows,
            vec![
                vec![KeyCell::Spacer, key("Up"), KeyCell::Spacer],
                vec![key("Left"), key("Down"), key("Right")],
            ],
        );
        let labels: Vec<&str> = group.keys().map(KeyDescriptor::label).collect();
        assert_eq!(labels, vec!["Up", "Left", "Down", "Right"]);
    }

    #[test]
    fn test_with_group_replaces_same_kind() {
        let layout = Layout::new(
            "Test",
            vec![
                KeyGroup::new(GroupKind::Function, vec![vec![key("F1")]]),
                KeyGroup::new(GroupKind::Main, vec![vec![key("Q")]]),
            ],
        );
        let layout = layout.with_group(KeyGroup::new(GroupKind::Main, vec![vec![key("A"), key("B")]]));

        assert_eq!(layout.groups().len(), 2);
        assert_eq!(layout.key_count(), 3);
        let main = layout.group(GroupKind::Main).unwrap();
        assert_eq!(main.keys().next().unwrap().label(), "A");
    }

    #[test]
    fn test_with_group_appends_missing_kind() {
        let layout = Layout::new("Test", vec![KeyGroup::new(GroupKind::Main, vec![vec![key("Q")]])])
            .with_group(KeyGroup::new(GroupKind::Edit, vec![vec![key("Pause")]]));
        assert!(layout.group(GroupKind::Edit).is_some());
        assert_eq!(layout.groups()[1].kind(), GroupKind::Edit);
    }
}
