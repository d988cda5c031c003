// Keytest Layout Files - TOML with Serde
// User-defined layouts loaded from TOML and merged into a catalog

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::descriptor::{DescriptorError, KeyCell, KeyDescriptor, SPACER_LABEL};
use crate::layout::{GroupKind, KeyGroup, Layout, LayoutCatalog, Row};

/// Largest key width or height accepted from a file, in key units
pub const MAX_KEY_SIZE: f32 = 64.0;

/// Layout file errors
#[derive(Debug, thiserror::Error)]
pub enum LayoutFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("layout '{layout}': unknown base layout '{base}'")]
    UnknownBase { layout: String, base: String },

    #[error("layout '{layout}': unknown group kind '{kind}'")]
    UnknownGroupKind { layout: String, kind: String },

    #[error("layout '{layout}': unknown row marker '{marker}' (only \"SPACER\" is allowed)")]
    UnknownMarker { layout: String, marker: String },

    #[error("layout '{layout}': key '{label}' has an invalid size")]
    InvalidSize { layout: String, label: String },

    #[error("layout '{layout}': {source}")]
    Descriptor {
        layout: String,
        #[source]
        source: DescriptorError,
    },

    #[error("layout '{0}' is already defined")]
    DuplicateName(String),

    #[error("layout '{0}' has no keys")]
    EmptyLayout(String),
}

/// Root TOML table of a layout file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutFileToml {
    #[serde(default)]
    layout: Vec<LayoutToml>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutToml {
    name: String,

    /// Catalog layout (or earlier layout in the same file) to start from
    #[serde(default)]
    base: Option<String>,

    #[serde(default, rename = "group")]
    groups: Vec<GroupToml>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupToml {
    kind: String,
    rows: Vec<Vec<CellToml>>,
}

/// A row cell: the spacer marker string or a key table
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CellToml {
    Marker(String),
    Key(KeyToml),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeyToml {
    label: String,
    ids: IdsToml,
    #[serde(default)]
    width: Option<f32>,
    #[serde(default)]
    height: Option<f32>,
    #[serde(default, rename = "char")]
    char_override: Option<String>,
    #[serde(default)]
    small_font: bool,
}

/// Identifiers as a single string or a list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IdsToml {
    One(String),
    Many(Vec<String>),
}

impl IdsToml {
    fn into_vec(self) -> Vec<String> {
        match self {
            IdsToml::One(id) => vec![id],
            IdsToml::Many(ids) => ids,
        }
    }
}

/// Parse the layouts defined in `content`.
///
/// `base` names are looked up among the layouts defined earlier in the same
/// content first, then in `catalog`. Names must not clash with either.
pub fn parse_layouts(content: &str, catalog: &LayoutCatalog) -> Result<Vec<Layout>, LayoutFileError> {
    let file: LayoutFileToml =
        toml::from_str(content).map_err(|e| LayoutFileError::TomlParse(e.to_string()))?;

    let mut layouts: Vec<Layout> = Vec::with_capacity(file.layout.len());
    for entry in file.layout {
        let name = entry.name.clone();
        if catalog.contains(&name) || layouts.iter().any(|l| l.name() == name) {
            return Err(LayoutFileError::DuplicateName(name));
        }
        let layout = entry.to_layout(catalog, &layouts)?;
        layouts.push(layout);
    }
    Ok(layouts)
}

/// Read and parse a layout file
pub fn load_layout_file<P: AsRef<Path>>(
    path: P,
    catalog: &LayoutCatalog,
) -> Result<Vec<Layout>, LayoutFileError> {
    let content = fs::read_to_string(&path)?;
    parse_layouts(&content, catalog)
}

/// Add every layout of a file to `catalog`, returning their names.
///
/// Either all layouts of the file are added or none.
pub fn merge_layout_file<P: AsRef<Path>>(
    catalog: &mut LayoutCatalog,
    path: P,
) -> Result<Vec<String>, LayoutFileError> {
    let layouts = load_layout_file(&path, catalog)?;
    let names: Vec<String> = layouts.iter().map(|l| l.name().to_string()).collect();
    for layout in layouts {
        catalog.insert(layout);
    }
    log::info!(
        "Loaded {} layout(s) from {}: {}",
        names.len(),
        path.as_ref().display(),
        names.join(", ")
    );
    Ok(names)
}

impl LayoutToml {
    fn to_layout(&self, catalog: &LayoutCatalog, earlier: &[Layout]) -> Result<Layout, LayoutFileError> {
        let mut layout = match &self.base {
            Some(base) => earlier
                .iter()
                .find(|l| l.name() == base)
                .or_else(|| catalog.get(base))
                .map(|l| l.renamed(self.name.as_str()))
                .ok_or_else(|| LayoutFileError::UnknownBase {
                    layout: self.name.clone(),
                    base: base.clone(),
                })?,
            None => Layout::new(self.name.as_str(), Vec::new()),
        };

        for group in &self.groups {
            layout = layout.with_group(group.to_group(&self.name)?);
        }

        if layout.key_count() == 0 {
            return Err(LayoutFileError::EmptyLayout(self.name.clone()));
        }
        Ok(layout)
    }
}

impl GroupToml {
    fn to_group(&self, layout: &str) -> Result<KeyGroup, LayoutFileError> {
        let kind = GroupKind::from_str(&self.kind).map_err(|_| LayoutFileError::UnknownGroupKind {
            layout: layout.to_string(),
            kind: self.kind.clone(),
        })?;

        let rows = self
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_cell(layout)).collect::<Result<Row, _>>())
            .collect::<Result<Vec<Row>, _>>()?;

        Ok(KeyGroup::new(kind, rows))
    }
}

impl CellToml {
    fn to_cell(&self, layout: &str) -> Result<KeyCell, LayoutFileError> {
        match self {
            CellToml::Marker(marker) if marker == SPACER_LABEL => Ok(KeyCell::Spacer),
            CellToml::Marker(marker) => Err(LayoutFileError::UnknownMarker {
                layout: layout.to_string(),
                marker: marker.clone(),
            }),
            CellToml::Key(key) => key.to_descriptor(layout).map(KeyCell::Key),
        }
    }
}

impl KeyToml {
    fn to_descriptor(&self, layout: &str) -> Result<KeyDescriptor, LayoutFileError> {
        let valid = |size: f32| size.is_finite() && size > 0.0 && size <= MAX_KEY_SIZE;
        if !self.width.map_or(true, valid) || !self.height.map_or(true, valid) {
            return Err(LayoutFileError::InvalidSize {
                layout: layout.to_string(),
                label: self.label.clone(),
            });
        }

        let mut key = KeyDescriptor::build(self.label.as_str(), self.ids.clone().into_vec())
            .map_err(|source| LayoutFileError::Descriptor {
                layout: layout.to_string(),
                source,
            })?
            .with_small_font(self.small_font);
        if let Some(width) = self.width {
            key = key.with_width(width);
        }
        if let Some(height) = self.height {
            key = key.with_height(height);
        }
        if let Some(literal) = &self.char_override {
            key = key.with_char_override(literal.as_str());
        }
        Ok(key)
    }
}
