// Keytest Key-Mapping Engine
// Resolves key events to on-screen keys and drives their highlight state

use std::collections::HashSet;

use smallvec::SmallVec;

use crate::descriptor::KeyDescriptor;
use crate::keysym::fold;
use crate::layout::{Layout, LayoutCatalog};
use crate::mapping::{KeyId, KeyMappingIndex};
use crate::modifier::{Modifier, ModifierKind, ModifierState};

/// Background of a rendered key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFill {
    Idle,
    Pressed,
    ActiveModifier,
}

/// Border style of a rendered key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relief {
    Flat,
    Sunken,
}

/// Rendering state of one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyVisual {
    pub fill: KeyFill,
    pub relief: Relief,
}

impl KeyVisual {
    pub const IDLE: Self = Self::new(KeyFill::Idle, Relief::Flat);
    pub const PRESSED: Self = Self::new(KeyFill::Pressed, Relief::Sunken);
    /// Toggle modifier that is on
    pub const ACTIVE: Self = Self::new(KeyFill::ActiveModifier, Relief::Flat);
    /// Momentary modifier being held
    pub const HELD: Self = Self::new(KeyFill::ActiveModifier, Relief::Sunken);

    pub const fn new(fill: KeyFill, relief: Relief) -> Self {
        Self { fill, relief }
    }
}

impl Default for KeyVisual {
    fn default() -> Self {
        Self::IDLE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("unknown layout: {0}")]
    UnknownLayout(String),
}

/// Modifiers a key reports, most keys report none
type Bindings = SmallVec<[Modifier; 2]>;

/// One layout session: the key index, modifier state, held keysyms and the
/// visual of every key.
///
/// All of it is rebuilt together when the layout changes, so nothing from a
/// previous layout survives a switch.
#[derive(Debug, Clone)]
pub struct Engine {
    layout: Layout,
    keys: Vec<KeyDescriptor>,
    bindings: Vec<Bindings>,
    index: KeyMappingIndex,
    modifiers: ModifierState,
    pressed: HashSet<String>,
    visuals: Vec<KeyVisual>,
}

impl Engine {
    /// Fresh session for `layout`
    pub fn new(layout: &Layout) -> Self {
        let keys: Vec<KeyDescriptor> = layout.keys().cloned().collect();
        let bindings = keys
            .iter()
            .map(|key| key.identifiers().filter_map(Modifier::from_keysym).collect())
            .collect();
        let index = KeyMappingIndex::build(layout);

        log::debug!(
            "Built key index for layout '{}': {} keys, {} identifiers",
            layout.name(),
            keys.len(),
            index.len()
        );

        let mut engine = Self {
            layout: layout.clone(),
            visuals: vec![KeyVisual::IDLE; keys.len()],
            keys,
            bindings,
            index,
            modifiers: ModifierState::default(),
            pressed: HashSet::new(),
        };
        engine.refresh_modifier_visuals();
        engine
    }

    /// Session for the catalog layout called `name`
    pub fn from_catalog(catalog: &LayoutCatalog, name: &str) -> Result<Self, EngineError> {
        catalog
            .get(name)
            .map(Self::new)
            .ok_or_else(|| EngineError::UnknownLayout(name.to_string()))
    }

    /// Replace the whole session with one for `name`.
    ///
    /// On an unknown name nothing changes.
    pub fn load_layout(&mut self, catalog: &LayoutCatalog, name: &str) -> Result<(), EngineError> {
        match Self::from_catalog(catalog, name) {
            Ok(engine) => {
                *self = engine;
                Ok(())
            }
            Err(e) => {
                log::warn!("Keeping layout '{}': {}", self.layout.name(), e);
                Err(e)
            }
        }
    }

    /// Keys an event refers to, in ascending id order.
    ///
    /// A non-empty `text` matching some key's character override selects those
    /// keys only. Otherwise the keysym (as given, lowercased, uppercased) and
    /// the text are looked up case-insensitively.
    pub fn resolve(&self, keysym: &str, text: &str) -> Vec<KeyId> {
        if !text.is_empty() {
            let overridden = self.index.by_char_override(text);
            if !overridden.is_empty() {
                let mut ids = overridden.to_vec();
                ids.sort_unstable();
                return ids;
            }
        }

        let mut candidates: SmallVec<[String; 4]> = SmallVec::new();
        for candidate in [keysym.to_string(), keysym.to_lowercase(), keysym.to_uppercase()] {
            let folded = fold(&candidate);
            if !candidates.contains(&folded) {
                candidates.push(folded);
            }
        }
        if !text.is_empty() {
            let folded = fold(text);
            if !candidates.contains(&folded) {
                candidates.push(folded);
            }
        }

        let mut ids: Vec<KeyId> = candidates
            .iter()
            .flat_map(|candidate| self.index.lookup(candidate).iter().copied())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Apply a key press; returns the keys it resolved to
    pub fn press(&mut self, keysym: &str, text: &str) -> Vec<KeyId> {
        self.pressed.insert(keysym.to_string());

        let modifier = Modifier::from_keysym(keysym);
        if let Some(m) = modifier {
            match m.kind() {
                ModifierKind::Toggle => {
                    self.modifiers.toggle(m);
                }
                ModifierKind::Momentary => self.modifiers.set(m, true),
            }
        }
        self.refresh_modifier_visuals();

        let targets = self.resolve(keysym, text);
        for &id in &targets {
            // Toggle keys follow their flag, not the transient press
            let toggled_here = modifier
                .filter(|m| m.is_toggle())
                .is_some_and(|m| self.is_bound(id, m));
            if toggled_here {
                continue;
            }
            let visual = self.modifier_visual(id).unwrap_or(KeyVisual::PRESSED);
            self.set_visual(id, visual);
        }
        targets
    }

    /// Apply a key release; returns the keys it resolved to
    pub fn release(&mut self, keysym: &str, text: &str) -> Vec<KeyId> {
        // Shift may come up first, so `A` can be released as `a`
        if !self.pressed.remove(keysym) {
            let folded = fold(keysym);
            self.pressed.retain(|held| fold(held) != folded);
        }

        if let Some(m) = Modifier::from_keysym(keysym).filter(|m| !m.is_toggle()) {
            self.modifiers.set(m, false);
        }
        self.refresh_modifier_visuals();

        let targets = self.resolve(keysym, text);
        for &id in &targets {
            let visual = self.modifier_visual(id).unwrap_or(KeyVisual::IDLE);
            self.set_visual(id, visual);
        }
        targets
    }

    /// Bring every modifier-bound key in line with the modifier state
    fn refresh_modifier_visuals(&mut self) {
        for position in 0..self.keys.len() {
            let id = KeyId::new(position);
            if self.bindings[position].is_empty() {
                continue;
            }
            if let Some(visual) = self.modifier_visual(id) {
                self.set_visual(id, visual);
                continue;
            }
            // A momentary name still physically down keeps its last visual
            let still_down = self.bindings[position]
                .iter()
                .any(|m| !m.is_toggle() && self.pressed.contains(m.keysym()));
            if !still_down {
                self.set_visual(id, KeyVisual::IDLE);
            }
        }
    }

    /// Visual imposed by the key's active modifiers, if any
    fn modifier_visual(&self, id: KeyId) -> Option<KeyVisual> {
        let bindings = self.bindings.get(id.index())?;
        let active = |kind: ModifierKind| {
            bindings
                .iter()
                .any(|m| m.kind() == kind && self.modifiers.is_active(*m))
        };

        if active(ModifierKind::Momentary) {
            Some(KeyVisual::HELD)
        } else if active(ModifierKind::Toggle) {
            Some(KeyVisual::ACTIVE)
        } else {
            None
        }
    }

    fn is_bound(&self, id: KeyId, modifier: Modifier) -> bool {
        self.bindings
            .get(id.index())
            .is_some_and(|bindings| bindings.contains(&modifier))
    }

    /// Stale ids (from a previous layout) are ignored
    fn set_visual(&mut self, id: KeyId, visual: KeyVisual) -> bool {
        match self.visuals.get_mut(id.index()) {
            Some(slot) => {
                *slot = visual;
                true
            }
            None => {
                log::debug!("Skipping visual update for stale key {}", id);
                false
            }
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Keys in id order
    pub fn keys(&self) -> &[KeyDescriptor] {
        &self.keys
    }

    pub fn key(&self, id: KeyId) -> Option<&KeyDescriptor> {
        self.keys.get(id.index())
    }

    pub fn visual(&self, id: KeyId) -> Option<KeyVisual> {
        self.visuals.get(id.index()).copied()
    }

    /// Visuals in id order
    pub fn visuals(&self) -> &[KeyVisual] {
        &self.visuals
    }

    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    pub fn index(&self) -> &KeyMappingIndex {
        &self.index
    }

    pub fn is_pressed(&self, keysym: &str) -> bool {
        self.pressed.contains(keysym)
    }

    /// Held keysyms, sorted
    pub fn pressed(&self) -> Vec<&str> {
        let mut keysyms: Vec<&str> = self.pressed.iter().map(String::as_str).collect();
        keysyms.sort_unstable();
        keysyms
    }

    /// Keys carrying `label`, in id order
    pub fn find_by_label(&self, label: &str) -> Vec<KeyId> {
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, key)| key.label() == label)
            .map(|(position, _)| KeyId::new(position))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::builtin::DEFAULT_LAYOUT;

    fn qwerty() -> Engine {
        Engine::from_catalog(&LayoutCatalog::builtin(), DEFAULT_LAYOUT).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let engine = qwerty();
        assert!(engine.modifiers().is_active(Modifier::NumLock));
        assert!(engine.pressed().is_empty());

        let num_lock = engine.find_by_label("Num Lk")[0];
        assert_eq!(engine.visual(num_lock), Some(KeyVisual::ACTIVE));
        let q = engine.find_by_label("Q")[0];
        assert_eq!(engine.visual(q), Some(KeyVisual::IDLE));
    }

    #[test]
    fn test_resolve_letter_either_case() {
        let engine = qwerty();
        let a = engine.find_by_label("A");
        assert_eq!(engine.resolve("a", "a"), a);
        assert_eq!(engine.resolve("A", "A"), a);
    }

    #[test]
    fn test_resolve_unknown_is_empty() {
        let engine = qwerty();
        assert!(engine.resolve("XF86AudioMute", "").is_empty());
    }

    #[test]
    fn test_resolve_char_override_is_authoritative() {
        let engine = qwerty();
        // KP_Divide with "/" selects only the numpad key, not the main-row slash
        let divide = engine.find_by_label(" / ");
        assert_eq!(engine.resolve("KP_Divide", "/"), divide);
        assert_eq!(engine.resolve("slash", "/"), divide);
    }

    #[test]
    fn test_resolve_without_text_uses_keysym() {
        let engine = qwerty();
        let slash = engine.find_by_label("/");
        assert_eq!(engine.resolve("slash", ""), slash);
    }

    #[test]
    fn test_press_release_plain_key() {
        let mut engine = qwerty();
        let q = engine.find_by_label("Q")[0];
        engine.press("q", "q");
        assert_eq!(engine.visual(q), Some(KeyVisual::PRESSED));
        assert!(engine.is_pressed("q"));
        engine.release("q", "q");
        assert_eq!(engine.visual(q), Some(KeyVisual::IDLE));
        assert!(!engine.is_pressed("q"));
    }

    #[test]
    fn test_release_matches_other_case() {
        let mut engine = qwerty();
        let a = engine.find_by_label("A")[0];
        engine.press("Shift_L", "");
        engine.press("A", "A");
        engine.release("Shift_L", "");
        engine.release("a", "a");

        assert!(engine.pressed().is_empty());
        assert_eq!(engine.visual(a), Some(KeyVisual::IDLE));
    }

    #[test]
    fn test_toggle_press_twice() {
        let mut engine = qwerty();
        let caps = engine.find_by_label("Caps Lock")[0];

        engine.press("Caps_Lock", "");
        assert!(engine.modifiers().is_active(Modifier::CapsLock));
        assert_eq!(engine.visual(caps), Some(KeyVisual::ACTIVE));
        engine.release("Caps_Lock", "");
        assert_eq!(engine.visual(caps), Some(KeyVisual::ACTIVE));

        engine.press("Caps_Lock", "");
        assert!(!engine.modifiers().is_active(Modifier::CapsLock));
        assert_eq!(engine.visual(caps), Some(KeyVisual::IDLE));
        engine.release("Caps_Lock", "");
        assert_eq!(engine.visual(caps), Some(KeyVisual::IDLE));
    }

    #[test]
    fn test_num_lock_starts_on_and_toggles_off() {
        let mut engine = qwerty();
        let num_lock = engine.find_by_label("Num Lk")[0];
        engine.press("Num_Lock", "");
        assert!(!engine.modifiers().is_active(Modifier::NumLock));
        assert_eq!(engine.visual(num_lock), Some(KeyVisual::IDLE));
    }

    #[test]
    fn test_momentary_hold_and_release() {
        let mut engine = qwerty();
        let ctrl = engine.find_by_label("Ctrl");
        assert_eq!(ctrl.len(), 2);

        engine.press("Control_L", "");
        assert_eq!(engine.visual(ctrl[0]), Some(KeyVisual::HELD));
        assert_eq!(engine.visual(ctrl[1]), Some(KeyVisual::IDLE));

        engine.release("Control_L", "");
        assert!(!engine.modifiers().is_active(Modifier::ControlL));
        assert_eq!(engine.visual(ctrl[0]), Some(KeyVisual::IDLE));
    }

    #[test]
    fn test_momentary_cycle_leaves_toggles_alone() {
        let mut engine = qwerty();
        let caps = engine.find_by_label("Caps Lock")[0];
        let num_lock = engine.find_by_label("Num Lk")[0];

        engine.press("Caps_Lock", "");
        engine.release("Caps_Lock", "");
        let before = *engine.modifiers();

        engine.press("Shift_L", "");
        assert!(engine.modifiers().is_active(Modifier::ShiftL));
        engine.release("Shift_L", "");

        assert_eq!(*engine.modifiers(), before);
        assert!(engine.modifiers().is_active(Modifier::CapsLock));
        assert!(engine.modifiers().is_active(Modifier::NumLock));
        assert_eq!(engine.visual(caps), Some(KeyVisual::ACTIVE));
        assert_eq!(engine.visual(num_lock), Some(KeyVisual::ACTIVE));
    }

    #[test]
    fn test_modifier_visual_beats_press() {
        let mut engine = qwerty();
        // AltGr reports both Alt_R and ISO_Level3_Shift
        let altgr = engine.find_by_label("AltGr")[0];
        engine.press("Alt_R", "");
        engine.press("ISO_Level3_Shift", "");
        assert_eq!(engine.visual(altgr), Some(KeyVisual::HELD));
        engine.release("ISO_Level3_Shift", "");
        // Alt_R is still held
        assert_eq!(engine.visual(altgr), Some(KeyVisual::HELD));
        engine.release("Alt_R", "");
        assert_eq!(engine.visual(altgr), Some(KeyVisual::IDLE));
    }

    #[test]
    fn test_load_layout_resets_session() {
        let catalog = LayoutCatalog::builtin();
        let mut engine = Engine::from_catalog(&catalog, DEFAULT_LAYOUT).unwrap();
        engine.press("Shift_L", "");
        engine.press("Caps_Lock", "");

        engine.load_layout(&catalog, "Dvorak_US_Full").unwrap();
        assert_eq!(engine.layout().name(), "Dvorak_US_Full");
        assert!(engine.pressed().is_empty());
        assert_eq!(engine.modifiers(), &ModifierState::default());
        assert!(engine
            .visuals()
            .iter()
            .zip(engine.keys())
            .all(|(visual, key)| *visual == KeyVisual::IDLE || key.has_identifier("Num_Lock")));
    }

    #[test]
    fn test_load_unknown_layout_keeps_state() {
        let catalog = LayoutCatalog::builtin();
        let mut engine = Engine::from_catalog(&catalog, DEFAULT_LAYOUT).unwrap();
        engine.press("Shift_L", "");
        let before = engine.clone();

        let err = engine.load_layout(&catalog, "Nope").unwrap_err();
        assert_eq!(err, EngineError::UnknownLayout("Nope".to_string()));
        assert_eq!(engine.layout(), before.layout());
        assert_eq!(engine.visuals(), before.visuals());
        assert_eq!(engine.modifiers(), before.modifiers());
        assert_eq!(engine.pressed(), before.pressed());
    }

    #[test]
    fn test_stale_id_is_ignored() {
        let mut engine = qwerty();
        let stale = KeyId::new(engine.keys().len() + 10);
        assert!(!engine.set_visual(stale, KeyVisual::PRESSED));
        assert_eq!(engine.visual(stale), None);
    }
}
