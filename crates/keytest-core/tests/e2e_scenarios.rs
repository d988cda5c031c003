// Keytest End-to-End Test Scenarios
//
// These tests drive the engine and display modes the way the terminal front-end
// does, without a terminal.
//
// Run with: cargo test -p keytest-core --test e2e_scenarios

mod e2e_tests {
    use std::rc::Rc;

    use keytest_core::{
        DisplayMode, Engine, GroupKind, KeyCell, KeyDescriptor, KeyEvent, KeyGroup, KeyId, KeyVisual,
        Layout, LayoutCatalog, LogMode, Modifier, VisualMode, DEFAULT_LAYOUT,
    };

    // =========================================================================
    // Test Helpers
    // =========================================================================

    fn qwerty() -> Engine {
        Engine::from_catalog(&LayoutCatalog::builtin(), DEFAULT_LAYOUT).unwrap()
    }

    /// The single key carrying `label` inside `kind`
    fn key_in(engine: &Engine, kind: GroupKind, label: &str) -> KeyId {
        let mut offset = 0;
        for group in engine.layout().groups() {
            if group.kind() == kind {
                let position = group
                    .keys()
                    .position(|key| key.label() == label)
                    .unwrap_or_else(|| panic!("no '{}' in {}", label, kind));
                return KeyId::new(offset + position);
            }
            offset += group.keys().count();
        }
        panic!("layout has no {} group", kind);
    }

    fn visual(engine: &Engine, id: KeyId) -> KeyVisual {
        engine.visual(id).unwrap()
    }

    fn key(label: &str, ids: &[&str]) -> KeyCell {
        KeyDescriptor::build(label, ids).unwrap().into()
    }

    // =========================================================================
    // Core scenarios
    // =========================================================================

    #[test]
    fn test_scenario_plain_letter() {
        let mut engine = qwerty();
        let a = key_in(&engine, GroupKind::Main, "A");

        assert_eq!(engine.press("a", "a"), vec![a]);
        assert_eq!(visual(&engine, a), KeyVisual::PRESSED);

        engine.release("a", "a");
        assert_eq!(visual(&engine, a), KeyVisual::IDLE);
    }

    #[test]
    fn test_scenario_shift_held_while_typing() {
        let mut engine = qwerty();
        let shift_l = key_in(&engine, GroupKind::Main, "Shift");
        let a = key_in(&engine, GroupKind::Main, "A");

        engine.press("Shift_L", "");
        assert!(engine.modifiers().is_active(Modifier::ShiftL));
        assert_eq!(visual(&engine, shift_l), KeyVisual::HELD);

        engine.press("A", "A");
        assert_eq!(visual(&engine, a), KeyVisual::PRESSED);
        assert_eq!(visual(&engine, shift_l), KeyVisual::HELD);

        engine.release("A", "A");
        assert_eq!(visual(&engine, a), KeyVisual::IDLE);
        assert_eq!(visual(&engine, shift_l), KeyVisual::HELD);

        engine.release("Shift_L", "");
        assert!(!engine.modifiers().is_active(Modifier::ShiftL));
        assert_eq!(visual(&engine, shift_l), KeyVisual::IDLE);
    }

    #[test]
    fn test_scenario_caps_lock_toggles() {
        let mut engine = qwerty();
        let caps = key_in(&engine, GroupKind::Main, "Caps Lock");

        engine.press("Caps_Lock", "");
        assert!(engine.modifiers().is_active(Modifier::CapsLock));
        assert_eq!(visual(&engine, caps), KeyVisual::ACTIVE);
        engine.release("Caps_Lock", "");

        engine.press("Caps_Lock", "");
        assert!(!engine.modifiers().is_active(Modifier::CapsLock));
        assert_eq!(visual(&engine, caps), KeyVisual::IDLE);
        engine.release("Caps_Lock", "");
        assert_eq!(visual(&engine, caps), KeyVisual::IDLE);
    }

    #[test]
    fn test_scenario_numpad_char_override() {
        // Numpad 7 pins "7"; an unrelated key also claims KP_7
        let layout = Layout::new(
            "Pad",
            vec![
                KeyGroup::new(
                    GroupKind::Main,
                    vec![vec![key("Seven?", &["KP_7"]), key("7", &["7", "ampersand"])]],
                ),
                KeyGroup::new(
                    GroupKind::Numpad,
                    vec![vec![KeyDescriptor::build("7", ["KP_7", "KP_Home"])
                        .unwrap()
                        .with_char_override("7")
                        .into()]],
                ),
            ],
        );
        let mut engine = Engine::new(&layout);
        let pad_seven = key_in(&engine, GroupKind::Numpad, "7");
        let impostor = key_in(&engine, GroupKind::Main, "Seven?");
        let main_seven = key_in(&engine, GroupKind::Main, "7");

        assert_eq!(engine.press("KP_7", "7"), vec![pad_seven]);
        assert_eq!(visual(&engine, pad_seven), KeyVisual::PRESSED);
        assert_eq!(visual(&engine, impostor), KeyVisual::IDLE);
        assert_eq!(visual(&engine, main_seven), KeyVisual::IDLE);

        // Without text the keysym decides
        assert_eq!(engine.resolve("KP_7", ""), vec![impostor, pad_seven]);
    }

    #[test]
    fn test_builtin_numpad_digit_without_override() {
        let engine = qwerty();
        let pad_seven = key_in(&engine, GroupKind::Numpad, "7");
        let main_seven = key_in(&engine, GroupKind::Main, "7");

        // Built-in numpad digits pin no character: the keysym and the text
        // both resolve, so numpad and main-row 7 light together
        let mut expected = vec![pad_seven, main_seven];
        expected.sort();
        assert_eq!(engine.resolve("KP_7", "7"), expected);
        assert_eq!(engine.resolve("KP_Home", ""), vec![pad_seven]);
    }

    // =========================================================================
    // Modifier edge cases
    // =========================================================================

    #[test]
    fn test_toggle_twice_returns_to_start() {
        let mut engine = qwerty();
        let before = *engine.modifiers();
        for _ in 0..2 {
            engine.press("Num_Lock", "");
            engine.release("Num_Lock", "");
        }
        assert_eq!(engine.modifiers(), &before);
        let num_lock = key_in(&engine, GroupKind::Numpad, "Num Lk");
        assert_eq!(visual(&engine, num_lock), KeyVisual::ACTIVE);
    }

    #[test]
    fn test_release_does_not_touch_toggle() {
        let mut engine = qwerty();
        engine.release("Num_Lock", "");
        assert!(engine.modifiers().is_active(Modifier::NumLock));
    }

    #[test]
    fn test_shared_modifier_name_clears_on_either_release() {
        // Two physical keys both reporting Shift_L
        let layout = Layout::new(
            "Twins",
            vec![KeyGroup::new(
                GroupKind::Main,
                vec![vec![key("Shift", &["Shift_L"]), key("Shift", &["Shift_L"])]],
            )],
        );
        let mut engine = Engine::new(&layout);
        let (left, right) = (KeyId::new(0), KeyId::new(1));

        engine.press("Shift_L", "");
        engine.press("Shift_L", "");
        assert_eq!(visual(&engine, left), KeyVisual::HELD);
        assert_eq!(visual(&engine, right), KeyVisual::HELD);

        // One boolean per name: the first release clears it for both keys
        engine.release("Shift_L", "");
        assert!(!engine.modifiers().is_active(Modifier::ShiftL));
        assert_eq!(visual(&engine, left), KeyVisual::IDLE);
        assert_eq!(visual(&engine, right), KeyVisual::IDLE);
    }

    #[test]
    fn test_key_bound_to_modifier_and_text() {
        // A held modifier keeps its visual even when the key also resolves
        // through ordinary identifiers
        let layout = Layout::new(
            "Combo",
            vec![KeyGroup::new(
                GroupKind::Main,
                vec![vec![key("Fn", &["Super_L", "F13"])]],
            )],
        );
        let mut engine = Engine::new(&layout);
        let id = KeyId::new(0);

        engine.press("Super_L", "");
        engine.press("F13", "");
        assert_eq!(visual(&engine, id), KeyVisual::HELD);
        engine.release("F13", "");
        assert_eq!(visual(&engine, id), KeyVisual::HELD);
        engine.release("Super_L", "");
        assert_eq!(visual(&engine, id), KeyVisual::IDLE);
    }

    #[test]
    fn test_unmapped_event_is_noop() {
        let mut engine = qwerty();
        let before = engine.visuals().to_vec();
        assert!(engine.press("XF86AudioPlay", "").is_empty());
        assert_eq!(engine.visuals(), before.as_slice());
        assert!(engine.is_pressed("XF86AudioPlay"));
    }

    // =========================================================================
    // Layout switching
    // =========================================================================

    #[test]
    fn test_rebuild_leaves_no_stale_entries() {
        let catalog = LayoutCatalog::builtin();
        let mut engine = Engine::from_catalog(&catalog, DEFAULT_LAYOUT).unwrap();
        // QWERTY's Backspace does not answer to Delete; Colemak's does
        let nav_delete = key_in(&engine, GroupKind::Navigation, "Del");
        assert_eq!(engine.resolve("Delete", ""), vec![nav_delete]);

        engine.load_layout(&catalog, "Colemak_US_Full").unwrap();
        let backspace = key_in(&engine, GroupKind::Main, "Backspace");
        let nav_delete = key_in(&engine, GroupKind::Navigation, "Del");
        let mut expected = vec![backspace, nav_delete];
        expected.sort();
        assert_eq!(engine.resolve("Delete", ""), expected);

        engine.load_layout(&catalog, DEFAULT_LAYOUT).unwrap();
        let nav_delete = key_in(&engine, GroupKind::Navigation, "Del");
        assert_eq!(engine.resolve("Delete", ""), vec![nav_delete]);
    }

    #[test]
    fn test_cyrillic_layout_ignores_latin() {
        let catalog = LayoutCatalog::builtin();
        let mut engine = Engine::from_catalog(&catalog, "JCUKEN_RU_Full").unwrap();
        assert!(engine.resolve("q", "q").is_empty());

        let shorti = key_in(&engine, GroupKind::Main, "Й");
        assert_eq!(engine.press("Cyrillic_shorti", "й"), vec![shorti]);
        let a = key_in(&engine, GroupKind::Main, "А");
        assert_eq!(engine.resolve("Cyrillic_A", "А"), vec![a]);
    }

    #[test]
    fn test_every_builtin_layout_builds() {
        let catalog = LayoutCatalog::builtin();
        for name in catalog.names() {
            let engine = Engine::from_catalog(&catalog, name).unwrap();
            assert_eq!(engine.keys().len(), engine.layout().key_count());
            assert!(engine.keys().iter().all(|key| key.identifier_count() > 0));
            assert!(!engine.resolve("space", " ").is_empty(), "{} has no space bar", name);
        }
    }

    // =========================================================================
    // Mode switching
    // =========================================================================

    #[test]
    fn test_mode_switch_round_trip() {
        let catalog = Rc::new(LayoutCatalog::builtin());
        let mut visual_mode = VisualMode::new(Rc::clone(&catalog), DEFAULT_LAYOUT).unwrap();
        let mut log_mode = LogMode::new(10);

        visual_mode.activate();
        visual_mode.on_key_press(&KeyEvent::new("Caps_Lock", ""));

        // Switch to the log: deactivate, then activate
        visual_mode.deactivate();
        log_mode.activate();
        visual_mode.on_key_release(&KeyEvent::new("Caps_Lock", ""));
        log_mode.on_key_release(&KeyEvent::new("Caps_Lock", ""));
        assert_eq!(log_mode.len(), 1);

        // And back: the visual session starts fresh
        log_mode.deactivate();
        visual_mode.activate();
        let engine = visual_mode.engine().unwrap();
        assert!(!engine.modifiers().is_active(Modifier::CapsLock));
        assert!(engine.pressed().is_empty());
    }
}
