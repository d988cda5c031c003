// Keytest Terminal Input
// Translation of crossterm key events into keysym-named key events

use crossterm::event::{
    KeyCode, KeyEvent as TermKeyEvent, KeyEventState, KeyModifiers, ModifierKeyCode,
};

use keytest_core::event::mask;
use keytest_core::KeyEvent;

/// Translate a terminal key event.
///
/// Returns `None` for keys without a keysym name (media keys, `Null`).
pub fn translate(key: &TermKeyEvent) -> Option<KeyEvent> {
    let keypad = key.state.contains(KeyEventState::KEYPAD);
    let (keysym, text) = match key.code {
        KeyCode::Char(c) => char_keysym(c, key.modifiers, keypad)?,
        KeyCode::Modifier(modifier) => (modifier_keysym(modifier).to_string(), String::new()),
        code => (named_keysym(code, keypad)?, String::new()),
    };

    Some(KeyEvent::new(keysym, text).with_state(state_mask(key.modifiers, key.state)))
}

/// X11-style modifier mask for the event
pub fn state_mask(modifiers: KeyModifiers, state: KeyEventState) -> u32 {
    let mut bits = 0;
    if modifiers.contains(KeyModifiers::SHIFT) {
        bits |= mask::SHIFT;
    }
    if state.contains(KeyEventState::CAPS_LOCK) {
        bits |= mask::LOCK;
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        bits |= mask::CONTROL;
    }
    if modifiers.contains(KeyModifiers::ALT) {
        bits |= mask::MOD1;
    }
    if state.contains(KeyEventState::NUM_LOCK) {
        bits |= mask::MOD2;
    }
    if modifiers.contains(KeyModifiers::SUPER) {
        bits |= mask::MOD4;
    }
    bits
}

fn char_keysym(c: char, modifiers: KeyModifiers, keypad: bool) -> Option<(String, String)> {
    // Some terminals report the unshifted letter alongside SHIFT
    let c = if modifiers.contains(KeyModifiers::SHIFT) && c.is_lowercase() {
        c.to_uppercase().next().unwrap_or(c)
    } else {
        c
    };
    let text = if modifiers.contains(KeyModifiers::CONTROL) {
        String::new()
    } else {
        c.to_string()
    };

    if keypad {
        if let Some(name) = keypad_char_keysym(c) {
            return Some((name, text));
        }
    }

    let keysym = match c {
        ' ' => "space".to_string(),
        c if c.is_ascii_alphanumeric() => c.to_string(),
        c if c.is_ascii_punctuation() => punctuation_keysym(c)?.to_string(),
        c if c.is_control() => return None,
        c => letter_keysym(c).unwrap_or_else(|| c.to_string()),
    };
    Some((keysym, text))
}

fn keypad_char_keysym(c: char) -> Option<String> {
    let name = match c {
        '0'..='9' => return Some(format!("KP_{}", c)),
        '.' => "KP_Decimal",
        ',' => "KP_Separator",
        '/' => "KP_Divide",
        '*' => "KP_Multiply",
        '-' => "KP_Subtract",
        '+' => "KP_Add",
        '=' => "KP_Equal",
        _ => return None,
    };
    Some(name.to_string())
}

fn punctuation_keysym(c: char) -> Option<&'static str> {
    let name = match c {
        '!' => "exclam",
        '"' => "quotedbl",
        '#' => "numbersign",
        '$' => "dollar",
        '%' => "percent",
        '&' => "ampersand",
        '\'' => "apostrophe",
        '(' => "parenleft",
        ')' => "parenright",
        '*' => "asterisk",
        '+' => "plus",
        ',' => "comma",
        '-' => "minus",
        '.' => "period",
        '/' => "slash",
        ':' => "colon",
        ';' => "semicolon",
        '<' => "less",
        '=' => "equal",
        '>' => "greater",
        '?' => "question",
        '@' => "at",
        '[' => "bracketleft",
        '\\' => "backslash",
        ']' => "bracketright",
        '^' => "asciicircum",
        '_' => "underscore",
        '`' => "grave",
        '{' => "braceleft",
        '|' => "bar",
        '}' => "braceright",
        '~' => "asciitilde",
        _ => return None,
    };
    Some(name)
}

/// Keysym for non-ASCII characters found on the built-in layouts
fn letter_keysym(c: char) -> Option<String> {
    if let Some(name) = cyrillic_name(c) {
        return Some(format!("Cyrillic_{}", name));
    }

    let lower = c.to_lowercase().next()?;
    let name = match lower {
        'ä' => "adiaeresis",
        'ö' => "odiaeresis",
        'ü' => "udiaeresis",
        'å' => "aring",
        'à' => "agrave",
        'è' => "egrave",
        'é' => "eacute",
        'ù' => "ugrave",
        'ç' => "ccedilla",
        'ñ' => "ntilde",
        'ß' => "ssharp",
        'µ' => "mu",
        '§' => "section",
        '°' => "degree",
        '£' => "sterling",
        '¤' => "currency",
        '²' => "twosuperior",
        '³' => "threesuperior",
        '¨' => "diaeresis",
        '´' => "acute",
        '¿' => "questiondown",
        '¡' => "exclamdown",
        '±' => "plusminus",
        '·' => "periodcentered",
        '¶' => "paragraph",
        'ª' => "ordfeminine",
        'º' => "masculine",
        '¬' => "notsign",
        '€' => "EuroSign",
        '№' => "numerosign",
        _ => return None,
    };

    if c.is_uppercase() {
        let mut chars = name.chars();
        let first = chars.next()?;
        Some(first.to_uppercase().chain(chars).collect())
    } else {
        Some(name.to_string())
    }
}

/// Cyrillic keysym suffix; upper-case letters get an upper-case suffix
fn cyrillic_name(c: char) -> Option<String> {
    let lower = c.to_lowercase().next()?;
    let name = match lower {
        'а' => "a",
        'б' => "be",
        'в' => "ve",
        'г' => "ghe",
        'д' => "de",
        'е' => "ie",
        'ё' => "io",
        'ж' => "zhe",
        'з' => "ze",
        'и' => "i",
        'й' => "shorti",
        'к' => "ka",
        'л' => "el",
        'м' => "em",
        'н' => "en",
        'о' => "o",
        'п' => "pe",
        'р' => "er",
        'с' => "es",
        'т' => "te",
        'у' => "u",
        'ф' => "ef",
        'х' => "ha",
        'ц' => "tse",
        'ч' => "che",
        'ш' => "sha",
        'щ' => "shcha",
        'ъ' => "hardsign",
        'ы' => "yeru",
        'ь' => "softsign",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };

    if c.is_uppercase() {
        Some(name.to_uppercase())
    } else {
        Some(name.to_string())
    }
}

fn modifier_keysym(modifier: ModifierKeyCode) -> &'static str {
    match modifier {
        ModifierKeyCode::LeftShift => "Shift_L",
        ModifierKeyCode::RightShift => "Shift_R",
        ModifierKeyCode::LeftControl => "Control_L",
        ModifierKeyCode::RightControl => "Control_R",
        ModifierKeyCode::LeftAlt => "Alt_L",
        ModifierKeyCode::RightAlt => "Alt_R",
        ModifierKeyCode::LeftSuper => "Super_L",
        ModifierKeyCode::RightSuper => "Super_R",
        ModifierKeyCode::LeftMeta => "Meta_L",
        ModifierKeyCode::RightMeta => "Meta_R",
        ModifierKeyCode::LeftHyper => "Hyper_L",
        ModifierKeyCode::RightHyper => "Hyper_R",
        ModifierKeyCode::IsoLevel3Shift => "ISO_Level3_Shift",
        ModifierKeyCode::IsoLevel5Shift => "ISO_Level5_Shift",
    }
}

fn named_keysym(code: KeyCode, keypad: bool) -> Option<String> {
    let name = match (code, keypad) {
        (KeyCode::F(n), _) => return Some(format!("F{}", n)),
        (KeyCode::Enter, true) => "KP_Enter",
        (KeyCode::Enter, false) => "Return",
        (KeyCode::Backspace, _) => "BackSpace",
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => "Tab",
        (KeyCode::Esc, _) => "Escape",
        (KeyCode::Delete, true) => "KP_Delete",
        (KeyCode::Delete, false) => "Delete",
        (KeyCode::Insert, true) => "KP_Insert",
        (KeyCode::Insert, false) => "Insert",
        (KeyCode::Home, true) => "KP_Home",
        (KeyCode::Home, false) => "Home",
        (KeyCode::End, true) => "KP_End",
        (KeyCode::End, false) => "End",
        (KeyCode::PageUp, true) => "KP_Prior",
        (KeyCode::PageUp, false) => "Prior",
        (KeyCode::PageDown, true) => "KP_Next",
        (KeyCode::PageDown, false) => "Next",
        (KeyCode::Left, true) => "KP_Left",
        (KeyCode::Left, false) => "Left",
        (KeyCode::Right, true) => "KP_Right",
        (KeyCode::Right, false) => "Right",
        (KeyCode::Up, true) => "KP_Up",
        (KeyCode::Up, false) => "Up",
        (KeyCode::Down, true) => "KP_Down",
        (KeyCode::Down, false) => "Down",
        (KeyCode::KeypadBegin, _) => "KP_Begin",
        (KeyCode::CapsLock, _) => "Caps_Lock",
        (KeyCode::NumLock, _) => "Num_Lock",
        (KeyCode::ScrollLock, _) => "Scroll_Lock",
        (KeyCode::PrintScreen, _) => "Print",
        (KeyCode::Pause, _) => "Pause",
        (KeyCode::Menu, _) => "Menu",
        _ => return None,
    };
    Some(name.to_string())
}
