// Keytest Config API
// Layout definitions loaded from TOML files

pub mod layout_file;

pub use layout_file::{load_layout_file, merge_layout_file, parse_layouts, LayoutFileError};
