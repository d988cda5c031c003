// Keytest Built-in Layouts
// Declarative key data for the layouts shipped with keytest

use crate::descriptor::{KeyCell, KeyDescriptor};

use super::{GroupKind, KeyGroup, Layout, Row};

/// Layout selected when nothing else is configured
pub const DEFAULT_LAYOUT: &str = "QWERTY_Full_US";

/// Decimal key of the numeric pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumpadDecimal {
    Dot,
    Comma,
}

fn key(label: &str, ids: &[&str]) -> KeyCell {
    KeyDescriptor::expanded(label, ids).into()
}

fn wide(label: &str, ids: &[&str], width: f32) -> KeyCell {
    KeyDescriptor::expanded(label, ids).with_width(width).into()
}

fn small(label: &str, ids: &[&str], width: f32) -> KeyCell {
    KeyDescriptor::expanded(label, ids)
        .with_width(width)
        .with_small_font(true)
        .into()
}

fn spacer() -> KeyCell {
    KeyCell::Spacer
}

/// One key per letter, each identified by the letter itself
fn letters(text: &str) -> Vec<KeyCell> {
    text.chars()
        .map(|c| {
            let label = c.to_string();
            KeyDescriptor::expanded(label.as_str(), &[label.as_str()]).into()
        })
        .collect()
}

fn row(parts: Vec<Vec<KeyCell>>) -> Row {
    parts.concat()
}

fn function_group() -> KeyGroup {
    let mut cells = vec![wide("Esc", &["Escape"], 1.4), spacer()];
    for (index, n) in (1..=12).enumerate() {
        if index > 0 && index % 4 == 0 {
            cells.push(spacer());
        }
        let name = format!("F{}", n);
        cells.push(key(&name, &[name.as_str()]));
    }
    KeyGroup::new(GroupKind::Function, vec![cells])
}

fn edit_group() -> KeyGroup {
    KeyGroup::new(
        GroupKind::Edit,
        vec![vec![
            small("PrtSc", &["Print", "Snapshot"], 1.1),
            small("ScrLk", &["Scroll_Lock"], 1.1),
            small("Pause", &["Pause"], 1.1),
        ]],
    )
}

fn navigation_group() -> KeyGroup {
    KeyGroup::new(
        GroupKind::Navigation,
        vec![
            vec![
                small("Ins", &["Insert"], 1.1),
                small("Home", &["Home"], 1.1),
                small("PgUp", &["Prior", "Page_Up"], 1.1),
            ],
            vec![
                small("Del", &["Delete"], 1.1),
                small("End", &["End"], 1.1),
                small("PgDn", &["Next", "Page_Down"], 1.1),
            ],
        ],
    )
}

fn arrows_group() -> KeyGroup {
    KeyGroup::new(
        GroupKind::Arrows,
        vec![
            vec![spacer(), wide("↑", &["Up"], 1.1), spacer()],
            vec![
                wide("←", &["Left"], 1.1),
                wide("↓", &["Down"], 1.1),
                wide("→", &["Right"], 1.1),
            ],
        ],
    )
}

fn numpad_group(decimal: NumpadDecimal) -> KeyGroup {
    // Operator keys only pin their character on the dot-decimal pad
    let operator = |label: &str, id: &str, literal: &str| -> KeyDescriptor {
        let key = KeyDescriptor::expanded(label, &[id]).with_width(1.1);
        match decimal {
            NumpadDecimal::Dot => key.with_char_override(literal),
            NumpadDecimal::Comma => key,
        }
    };
    let pad = |label: &str, ids: &[&str]| wide(label, ids, 1.1);

    let decimal_key = match decimal {
        NumpadDecimal::Dot => KeyDescriptor::expanded(".", &["KP_Decimal", "KP_Delete"]).with_char_override("."),
        NumpadDecimal::Comma => KeyDescriptor::expanded(",", &["KP_Separator", "KP_Delete"]).with_char_override(","),
    };

    KeyGroup::new(
        GroupKind::Numpad,
        vec![
            vec![
                small("Num Lk", &["Num_Lock"], 1.1),
                operator(" / ", "KP_Divide", "/").into(),
                operator(" * ", "KP_Multiply", "*").into(),
                operator(" - ", "KP_Subtract", "-").into(),
            ],
            vec![
                pad("7", &["KP_7", "KP_Home"]),
                pad("8", &["KP_8", "KP_Up"]),
                pad("9", &["KP_9", "KP_Prior"]),
                operator(" + ", "KP_Add", "+").with_height(2.0).into(),
            ],
            vec![
                pad("4", &["KP_4", "KP_Left"]),
                pad("5", &["KP_5", "KP_Begin"]),
                pad("6", &["KP_6", "KP_Right"]),
            ],
            vec![
                pad("1", &["KP_1", "KP_End"]),
                pad("2", &["KP_2", "KP_Down"]),
                pad("3", &["KP_3", "KP_Next"]),
                KeyDescriptor::expanded("Enter", &["KP_Enter"])
                    .with_width(1.1)
                    .with_height(2.0)
                    .with_small_font(true)
                    .into(),
            ],
            vec![
                wide("0", &["KP_0", "KP_Insert"], 2.3),
                decimal_key.with_width(1.1).into(),
            ],
        ],
    )
}

fn standard_bottom_row() -> Row {
    vec![
        small("Ctrl", &["Control_L"], 1.4),
        small("Win", &["Super_L", "Meta_L"], 1.1),
        small("Alt", &["Alt_L"], 1.1),
        wide("Space", &["space"], 6.0),
        small("AltGr", &["Alt_R", "ISO_Level3_Shift"], 1.1),
        small("Win", &["Super_R", "Meta_R"], 1.1),
        small("Menu", &["Menu", "App"], 1.1),
        small("Ctrl", &["Control_R"], 1.4),
    ]
}

/// Number row shared by the US-derived layouts, up to (not including) the
/// last two punctuation keys
fn us_number_row() -> Vec<KeyCell> {
    vec![
        key("`", &["grave", "asciitilde"]),
        key("1", &["1", "exclam"]),
        key("2", &["2", "at"]),
        key("3", &["3", "numbersign"]),
        key("4", &["4", "dollar"]),
        key("5", &["5", "percent"]),
        key("6", &["6", "asciicircum"]),
        key("7", &["7", "ampersand"]),
        key("8", &["8", "asterisk"]),
        key("9", &["9", "parenleft"]),
        key("0", &["0", "parenright"]),
    ]
}

fn minus_equal() -> Vec<KeyCell> {
    vec![
        key("-", &["minus", "underscore"]),
        key("=", &["equal", "plus"]),
    ]
}

fn brackets() -> Vec<KeyCell> {
    vec![
        key("[", &["bracketleft", "braceleft"]),
        key("]", &["bracketright", "braceright"]),
    ]
}

fn semicolon() -> KeyCell {
    key(";", &["semicolon", "colon"])
}

fn apostrophe() -> KeyCell {
    key("'", &["apostrophe", "quotedbl"])
}

fn us_lower_punctuation() -> Vec<KeyCell> {
    vec![
        key(",", &["comma", "less"]),
        key(".", &["period", "greater"]),
        key("/", &["slash", "question"]),
    ]
}

fn backslash() -> KeyCell {
    wide("\\", &["backslash", "bar"], 1.5)
}

fn tab() -> KeyCell {
    small("Tab", &["Tab"], 1.5)
}

fn caps_lock(width: f32) -> KeyCell {
    small("Caps Lock", &["Caps_Lock"], width)
}

fn enter(width: f32) -> KeyCell {
    small("Enter", &["Return"], width)
}

fn shift_left(width: f32) -> KeyCell {
    small("Shift", &["Shift_L"], width)
}

fn shift_right() -> KeyCell {
    small("Shift", &["Shift_R"], 2.7)
}

fn backspace(ids: &[&str], width: f32) -> KeyCell {
    small("Backspace", ids, width)
}

fn assemble(name: &str, main: Vec<Row>, decimal: NumpadDecimal) -> Layout {
    Layout::new(
        name,
        vec![
            function_group(),
            KeyGroup::new(GroupKind::Main, main),
            edit_group(),
            navigation_group(),
            arrows_group(),
            numpad_group(decimal),
        ],
    )
}

fn qwerty_us() -> Layout {
    assemble(
        DEFAULT_LAYOUT,
        vec![
            row(vec![us_number_row(), minus_equal(), vec![backspace(&["BackSpace"], 2.0)]]),
            row(vec![vec![tab()], letters("QWERTYUIOP"), brackets(), vec![backslash()]]),
            row(vec![
                vec![caps_lock(1.8)],
                letters("ASDFGHJKL"),
                vec![semicolon(), apostrophe(), enter(2.2)],
            ]),
            row(vec![
                vec![shift_left(2.3)],
                letters("ZXCVBNM"),
                us_lower_punctuation(),
                vec![shift_right()],
            ]),
            standard_bottom_row(),
        ],
        NumpadDecimal::Dot,
    )
}

fn spanish_es() -> Layout {
    assemble(
        "Spanish_ES_Full",
        vec![
            vec![
                key("º", &["masculine", "ordfeminine", "backslash"]),
                key("1", &["1", "exclam", "bar"]),
                key("2", &["2", "quotedbl", "at"]),
                key("3", &["3", "periodcentered", "numbersign", "sterling"]),
                key("4", &["4", "dollar", "asciitilde"]),
                key("5", &["5", "percent", "EuroSign"]),
                key("6", &["6", "ampersand", "notsign"]),
                key("7", &["7", "slash"]),
                key("8", &["8", "parenleft"]),
                key("9", &["9", "parenright"]),
                key("0", &["0", "equal"]),
                key("'", &["apostrophe", "question"]),
                key("¡", &["exclamdown", "questiondown"]),
                backspace(&["BackSpace"], 1.8),
            ],
            row(vec![
                vec![tab()],
                letters("QW"),
                vec![key("E", &["E", "e", "EuroSign"])],
                letters("RTYUIOP"),
                vec![
                    key("`", &["grave", "dead_grave", "asciicircum", "dead_circumflex", "bracketleft"]),
                    key("+", &["plus", "asterisk", "bracketright", "dead_tilde"]),
                    wide("Ç", &["ccedilla", "Ccedilla", "braceright"], 1.2),
                ],
            ]),
            row(vec![
                vec![caps_lock(1.7)],
                letters("ASDFGHJKL"),
                vec![
                    key("Ñ", &["ntilde", "Ntilde"]),
                    key("´", &["acute", "dead_acute", "diaeresis", "dead_diaeresis", "braceleft"]),
                    enter(2.3),
                ],
            ]),
            row(vec![
                vec![shift_left(1.2), key("<", &["less", "greater", "bar"])],
                letters("ZXCVBNM"),
                vec![
                    key(",", &["comma", "semicolon"]),
                    key(".", &["period", "colon"]),
                    key("-", &["minus", "underscore"]),
                    shift_right(),
                ],
            ]),
            standard_bottom_row(),
        ],
        NumpadDecimal::Comma,
    )
}

fn german_de() -> Layout {
    assemble(
        "German_DE_Full",
        vec![
            vec![
                key("^", &["asciicircum", "degree", "dead_circumflex"]),
                key("1", &["1", "exclam"]),
                key("2", &["2", "quotedbl", "twosuperior"]),
                key("3", &["3", "section", "threesuperior"]),
                key("4", &["4", "dollar"]),
                key("5", &["5", "percent"]),
                key("6", &["6", "ampersand"]),
                key("7", &["7", "slash", "braceleft"]),
                key("8", &["8", "parenleft", "bracketleft"]),
                key("9", &["9", "parenright", "bracketright"]),
                key("0", &["0", "equal", "braceright"]),
                key("ß", &["ssharp", "question", "backslash"]),
                key("´", &["acute", "grave", "dead_acute", "dead_grave"]),
                backspace(&["BackSpace"], 1.8),
            ],
            row(vec![
                vec![tab(), key("Q", &["Q", "q", "at"])],
                letters("W"),
                vec![key("E", &["E", "e", "EuroSign"])],
                letters("RTZUIOP"),
                vec![
                    key("Ü", &["udiaeresis", "Udiaeresis"]),
                    key("+", &["plus", "asterisk", "asciitilde"]),
                    wide("#", &["numbersign", "apostrophe"], 1.2),
                ],
            ]),
            row(vec![
                vec![caps_lock(1.7)],
                letters("ASDFGHJKL"),
                vec![
                    key("Ö", &["odiaeresis", "Odiaeresis"]),
                    key("Ä", &["adiaeresis", "Adiaeresis"]),
                    enter(2.3),
                ],
            ]),
            row(vec![
                vec![shift_left(1.2), key("<", &["less", "greater", "bar", "rightarrow"])],
                letters("YXCVBN"),
                vec![
                    key("M", &["M", "m", "mu"]),
                    key(",", &["comma", "semicolon"]),
                    key(".", &["period", "colon"]),
                    key("-", &["minus", "underscore"]),
                    shift_right(),
                ],
            ]),
            standard_bottom_row(),
        ],
        NumpadDecimal::Comma,
    )
}

fn azerty_fr() -> Layout {
    assemble(
        "AZERTY_FR_Full",
        vec![
            vec![
                key("²", &["twosuperior", "asciitilde"]),
                key("&", &["ampersand", "1"]),
                key("é", &["eacute", "Eacute", "2", "at"]),
                key("\"", &["quotedbl", "3", "numbersign"]),
                key("'", &["apostrophe", "4", "braceleft"]),
                key("(", &["parenleft", "5", "bracketleft"]),
                key("-", &["minus", "6", "bar"]),
                key("è", &["egrave", "Egrave", "7", "grave"]),
                key("_", &["underscore", "8", "backslash"]),
                key("ç", &["ccedilla", "Ccedilla", "9", "asciicircum"]),
                key("à", &["agrave", "Agrave", "0", "braceright"]),
                key(")", &["parenright", "degree", "bracketright"]),
                key("=", &["equal", "plus", "plusminus"]),
                backspace(&["BackSpace"], 1.8),
            ],
            row(vec![
                vec![tab()],
                letters("AZ"),
                vec![key("E", &["E", "e", "EuroSign"])],
                letters("RTYUIOP"),
                vec![
                    key("^", &["dead_circumflex", "diaeresis", "dead_diaeresis", "¨"]),
                    key("$", &["dollar", "sterling", "currency"]),
                    wide("*", &["asterisk", "mu", "section"], 1.2),
                ],
            ]),
            row(vec![
                vec![caps_lock(1.7)],
                letters("QSDFGHJKLM"),
                vec![key("ù", &["ugrave", "Ugrave", "percent"]), enter(2.3)],
            ]),
            row(vec![
                vec![shift_left(1.2), key("<", &["less", "greater"])],
                letters("WXCVBN"),
                vec![
                    key("?", &["question", "comma"]),
                    key(".", &["period", "semicolon"]),
                    key("/", &["slash", "colon"]),
                    key("§", &["section", "exclam"]),
                    shift_right(),
                ],
            ]),
            standard_bottom_row(),
        ],
        NumpadDecimal::Dot,
    )
}

fn dvorak_us() -> Layout {
    assemble(
        "Dvorak_US_Full",
        vec![
            row(vec![us_number_row(), brackets(), vec![backspace(&["BackSpace"], 2.0)]]),
            row(vec![
                vec![tab(), apostrophe()],
                vec![key(",", &["comma", "less"]), key(".", &["period", "greater"])],
                letters("PYFGCRL"),
                vec![
                    key("/", &["slash", "question"]),
                    key("=", &["equal", "plus"]),
                    backslash(),
                ],
            ]),
            row(vec![
                vec![caps_lock(1.8)],
                letters("AOEUIDHTNS"),
                vec![key("-", &["minus", "underscore"]), enter(2.2)],
            ]),
            row(vec![
                vec![shift_left(2.3), semicolon()],
                letters("QJKXBMWVZ"),
                vec![shift_right()],
            ]),
            standard_bottom_row(),
        ],
        NumpadDecimal::Dot,
    )
}

/// Colemak and its DH variant differ only in their letter rows
fn colemak_family(name: &str, top: &str, home: &str, bottom: &str) -> Layout {
    assemble(
        name,
        vec![
            row(vec![
                us_number_row(),
                minus_equal(),
                vec![backspace(&["BackSpace", "Delete"], 2.0)],
            ]),
            row(vec![
                vec![tab()],
                letters(top),
                vec![semicolon()],
                brackets(),
                vec![backslash()],
            ]),
            row(vec![vec![caps_lock(1.8)], letters(home), vec![apostrophe(), enter(2.2)]]),
            row(vec![
                vec![shift_left(2.3)],
                letters(bottom),
                us_lower_punctuation(),
                vec![shift_right()],
            ]),
            standard_bottom_row(),
        ],
        NumpadDecimal::Dot,
    )
}

fn jcuken_ru() -> Layout {
    let cyrillic = |label: &str, suffix: &str| {
        let id = format!("Cyrillic_{}", suffix);
        key(label, &[id.as_str()])
    };

    assemble(
        "JCUKEN_RU_Full",
        vec![
            vec![
                key("Ё", &["Cyrillic_io", "grave", "asciitilde"]),
                key("1", &["1", "exclam"]),
                key("2", &["2", "quotedbl"]),
                key("3", &["3", "numerosign"]),
                key("4", &["4", "semicolon"]),
                key("5", &["5", "percent"]),
                key("6", &["6", "colon"]),
                key("7", &["7", "question"]),
                key("8", &["8", "asterisk"]),
                key("9", &["9", "parenleft"]),
                key("0", &["0", "parenright"]),
                key("-", &["minus", "underscore"]),
                key("=", &["equal", "plus"]),
                backspace(&["BackSpace"], 2.0),
            ],
            vec![
                tab(),
                cyrillic("Й", "shorti"),
                cyrillic("Ц", "tse"),
                cyrillic("У", "u"),
                cyrillic("К", "ka"),
                cyrillic("Е", "ie"),
                cyrillic("Н", "en"),
                cyrillic("Г", "ghe"),
                cyrillic("Ш", "sha"),
                cyrillic("Щ", "shcha"),
                cyrillic("З", "ze"),
                cyrillic("Х", "ha"),
                cyrillic("Ъ", "hardsign"),
                wide("\\", &["backslash", "slash"], 1.5),
            ],
            vec![
                caps_lock(1.8),
                cyrillic("Ф", "ef"),
                cyrillic("Ы", "yeru"),
                cyrillic("В", "ve"),
                cyrillic("А", "a"),
                cyrillic("П", "pe"),
                cyrillic("Р", "er"),
                cyrillic("О", "o"),
                cyrillic("Л", "el"),
                cyrillic("Д", "de"),
                cyrillic("Ж", "zhe"),
                cyrillic("Э", "e"),
                enter(2.2),
            ],
            vec![
                shift_left(2.3),
                cyrillic("Я", "ya"),
                cyrillic("Ч", "che"),
                cyrillic("С", "es"),
                cyrillic("М", "em"),
                cyrillic("И", "i"),
                cyrillic("Т", "te"),
                cyrillic("Ь", "softsign"),
                cyrillic("Б", "be"),
                cyrillic("Ю", "yu"),
                key(".", &["period", "comma"]),
                shift_right(),
            ],
            standard_bottom_row(),
        ],
        NumpadDecimal::Dot,
    )
}

fn workman_us() -> Layout {
    assemble(
        "Workman_US_Full",
        vec![
            row(vec![us_number_row(), minus_equal(), vec![backspace(&["BackSpace"], 2.0)]]),
            row(vec![
                vec![tab()],
                letters("QDRWBJFUP"),
                vec![semicolon()],
                brackets(),
                vec![backslash()],
            ]),
            row(vec![
                vec![caps_lock(1.8)],
                letters("ASHTGYNEOI"),
                vec![apostrophe(), enter(2.2)],
            ]),
            row(vec![
                vec![shift_left(2.3)],
                letters("ZXMCVKL"),
                us_lower_punctuation(),
                vec![shift_right()],
            ]),
            standard_bottom_row(),
        ],
        NumpadDecimal::Dot,
    )
}

/// Maltron letters mapped logically onto standard rows; the thumb letters E
/// and U sit beside a short space bar
fn maltron_logical() -> Layout {
    let literal = |text: &str| key(text, &[text]);

    assemble(
        "Maltron_Logical_Full",
        vec![
            row(vec![
                vec![key("Esc", &["Escape"])],
                letters("1234567890"),
                vec![literal("-"), literal("="), wide("Bksp", &["BackSpace"], 2.0)],
            ]),
            row(vec![
                vec![wide("Tab", &["Tab"], 1.5)],
                letters("QPYCBJLMFVZ"),
                vec![literal("]"), wide("\\", &["\\"], 1.5)],
            ]),
            row(vec![
                vec![wide("Caps", &["Caps_Lock"], 1.8)],
                letters("ANISFGDTHOR"),
                vec![wide("Enter", &["Return"], 2.2)],
            ]),
            row(vec![
                vec![wide("Shift", &["Shift_L"], 2.3), literal("."), literal(","), literal(";")],
                letters("KXW"),
                vec![
                    literal("/"),
                    literal("["),
                    literal("\""),
                    wide("Shift", &["Shift_R"], 2.7),
                ],
            ]),
            vec![
                wide("Ctrl", &["Control_L"], 1.4),
                wide("Win", &["Super_L"], 1.1),
                wide("Alt", &["Alt_L"], 1.1),
                wide("E", &["E"], 2.0),
                wide("Space", &["space"], 2.0),
                wide("U", &["U"], 2.0),
                wide("AltGr", &["Alt_R"], 1.1),
                wide("Win", &["Super_R"], 1.1),
                wide("Menu", &["App"], 1.1),
                wide("Ctrl", &["Control_R"], 1.4),
            ],
        ],
        NumpadDecimal::Dot,
    )
}

fn svorak_se() -> Layout {
    assemble(
        "Svorak_SE_Full",
        vec![
            vec![
                key("§", &["section", "paragraph"]),
                key("1", &["1", "exclam"]),
                key("2", &["2", "quotedbl", "at"]),
                key("3", &["3", "numbersign", "sterling"]),
                key("4", &["4", "currency", "dollar"]),
                key("5", &["5", "percent"]),
                key("6", &["6", "ampersand"]),
                key("7", &["7", "slash", "braceleft"]),
                key("8", &["8", "parenleft", "bracketleft"]),
                key("9", &["9", "parenright", "bracketright"]),
                key("0", &["0", "equal", "braceright"]),
                key("+", &["plus", "question", "backslash"]),
                key("´", &["acute", "grave", "dead_acute", "dead_grave"]),
                backspace(&["BackSpace"], 1.8),
            ],
            row(vec![
                vec![
                    tab(),
                    key(".", &["period", "colon"]),
                    key(",", &["comma", "semicolon"]),
                ],
                letters("KXBMWVZ"),
                vec![
                    key("Å", &["aring", "Aring"]),
                    key("¨", &["diaeresis", "asciicircum", "dead_diaeresis", "dead_circumflex"]),
                    key("'", &["apostrophe", "asterisk"]),
                    KeyDescriptor::expanded("Return", &["Return"])
                        .with_width(1.2)
                        .with_height(2.0)
                        .with_small_font(true)
                        .into(),
                ],
            ]),
            row(vec![
                vec![caps_lock(1.7)],
                letters("AOEUIDHTNS"),
                vec![key("Ö", &["odiaeresis", "Odiaeresis"])],
            ]),
            row(vec![
                vec![shift_left(1.2), key("<", &["less", "greater", "bar"])],
                letters("QJGPRLCYF"),
                vec![key("Ä", &["adiaeresis", "Adiaeresis"]), shift_right()],
            ]),
            standard_bottom_row(),
        ],
        NumpadDecimal::Comma,
    )
}

/// Every built-in layout, in catalog order
pub fn layouts() -> Vec<Layout> {
    vec![
        qwerty_us(),
        spanish_es(),
        german_de(),
        azerty_fr(),
        dvorak_us(),
        colemak_family("Colemak_US_Full", "QWFPGJLUY", "ARSTDHNEIO", "ZXCVBKM"),
        colemak_family("Colemak_DH_US_Full", "QWFPBJLUY", "ARSTGMNEIO", "XCDVZKH"),
        jcuken_ru(),
        workman_us(),
        maltron_logical(),
        svorak_se(),
    ]
}
