// Keytest Core Library
// Layout data, key mapping and highlight engine for the keyboard tester

pub mod config;
pub mod descriptor;
pub mod engine;
pub mod event;
pub mod keysym;
pub mod layout;
pub mod mapping;
pub mod mode;
pub mod modifier;
pub mod settings;

pub use config::{load_layout_file, merge_layout_file, parse_layouts, LayoutFileError};
pub use descriptor::{expand_identifiers, DescriptorError, KeyCell, KeyDescriptor, KeySize, SPACER_LABEL};
pub use engine::{Engine, EngineError, KeyFill, KeyVisual, Relief};
pub use event::{KeyAction, KeyEvent};
pub use layout::builtin::DEFAULT_LAYOUT;
pub use layout::{GroupKind, KeyGroup, Layout, LayoutCatalog, Row};
pub use mapping::{KeyId, KeyMappingIndex};
pub use mode::{format_event, DisplayMode, LogMode, ModeKind, VisualMode};
pub use modifier::{Modifier, ModifierKind, ModifierState};
pub use settings::{Settings, SettingsError};
