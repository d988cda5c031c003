use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use keytest_core::{Engine, GroupKind, KeyCell, KeyGroup, KeyId, KeyVisual, Layout as KeyLayout};

use crate::tui::theme::theme;

/// Space between key blocks, in key units
const BLOCK_GAP: f32 = 0.5;
/// Terminal columns per key unit are kept within this range
const MIN_UNIT_COLS: f32 = 3.0;
const MAX_UNIT_COLS: f32 = 8.0;
/// Rows per key unit; three rows leave room for a border
const MAX_UNIT_ROWS: f32 = 3.0;

/// A key placed on the keyboard, in key units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedKey {
    pub id: KeyId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Key placement for a whole layout, in key units
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyboardGeometry {
    pub keys: Vec<PlacedKey>,
    pub width: f32,
    pub height: f32,
}

impl KeyboardGeometry {
    pub fn key(&self, id: KeyId) -> Option<&PlacedKey> {
        self.keys.iter().find(|key| key.id == id)
    }
}

/// Placement of one group relative to its own origin
#[derive(Debug, Clone, Default)]
struct GroupPlacement {
    keys: Vec<PlacedKey>,
    width: f32,
    height: f32,
}

impl GroupPlacement {
    fn shifted(mut self, dx: f32, dy: f32) -> Self {
        for key in &mut self.keys {
            key.x += dx;
            key.y += dy;
        }
        self
    }
}

/// Lay out `group`, numbering its keys from `first_id`.
///
/// Rows are one unit tall and left-aligned. Keys taller than one unit reserve
/// their columns in the rows below. A spacer is as wide as its neighbouring key.
fn place_group(group: &KeyGroup, first_id: usize) -> GroupPlacement {
    let mut placed = GroupPlacement::default();
    // (start, end, last row index) of tall keys
    let mut reserved: Vec<(f32, f32, usize)> = Vec::new();
    let mut next_id = first_id;

    let row_count = group.rows().len();
    for (row_index, row) in group.rows().iter().enumerate() {
        let mut x = 0.0_f32;
        for (cell_index, cell) in row.iter().enumerate() {
            // Skip columns held by a tall key from an earlier row
            while let Some(&(_, end, _)) = reserved
                .iter()
                .find(|(start, end, last)| *last >= row_index && x >= *start - 0.05 && x < *end)
            {
                x = end;
            }

            match cell {
                KeyCell::Key(key) => {
                    let size = key.size();
                    // A tall key never reaches past the group's last row
                    let height = size.height.min((row_count - row_index) as f32);
                    placed.keys.push(PlacedKey {
                        id: KeyId::new(next_id),
                        x,
                        y: row_index as f32,
                        width: size.width,
                        height,
                    });
                    next_id += 1;
                    if height > 1.0 {
                        let span = height.ceil() as usize;
                        let last = row_index.saturating_add(span - 1).min(row_count - 1);
                        reserved.push((x, x + size.width, last));
                    }
                    x += size.width;
                    placed.height = placed.height.max(row_index as f32 + height);
                }
                KeyCell::Spacer => x += spacer_width(row, cell_index),
            }
            placed.width = placed.width.max(x);
        }
        placed.height = placed.height.max(row_index as f32 + 1.0);
    }
    placed
}

fn spacer_width(row: &[KeyCell], index: usize) -> f32 {
    row[index + 1..]
        .iter()
        .chain(row[..index].iter().rev())
        .find_map(KeyCell::as_key)
        .map_or(1.0, |key| key.size().width)
}

/// Arrange every group of `layout`.
///
/// The function row and the edit block sit on top. Below them come the main
/// block, the navigation cluster with the arrows at its bottom, and the numpad.
pub fn arrange(layout: &KeyLayout) -> KeyboardGeometry {
    let mut blocks: Vec<(GroupKind, GroupPlacement)> = Vec::new();
    let mut first_id = 0;
    for group in layout.groups() {
        let block = place_group(group, first_id);
        first_id += group.keys().count();
        blocks.push((group.kind(), block));
    }

    let size = |kind: GroupKind| -> (f32, f32) {
        blocks
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or((0.0, 0.0), |(_, b)| (b.width, b.height))
    };
    let gap_after = |width: f32| if width > 0.0 { width + BLOCK_GAP } else { 0.0 };

    let (function_w, function_h) = size(GroupKind::Function);
    let (main_w, main_h) = size(GroupKind::Main);
    let (nav_w, nav_h) = size(GroupKind::Navigation);
    let (arrows_w, arrows_h) = size(GroupKind::Arrows);
    let (edit_h, numpad_h) = (size(GroupKind::Edit).1, size(GroupKind::Numpad).1);

    let top_h = function_h.max(edit_h);
    let body_y = if top_h > 0.0 { top_h + BLOCK_GAP } else { 0.0 };
    let cluster_x = gap_after(main_w.max(function_w));
    let cluster_w = nav_w.max(arrows_w);
    let numpad_x = cluster_x + gap_after(cluster_w);
    let body_h = main_h.max(numpad_h).max(nav_h + arrows_h);

    let mut geometry = KeyboardGeometry::default();
    for (kind, block) in blocks {
        let (x, y) = match kind {
            GroupKind::Function => (0.0, 0.0),
            GroupKind::Edit => (cluster_x, 0.0),
            GroupKind::Main => (0.0, body_y),
            GroupKind::Navigation => (cluster_x, body_y),
            GroupKind::Arrows => (cluster_x, body_y + (body_h - arrows_h).max(nav_h)),
            GroupKind::Numpad => (numpad_x, body_y),
        };
        let block = block.shifted(x, y);
        geometry.width = geometry.width.max(x + block.width);
        geometry.height = geometry.height.max(y + block.height);
        geometry.keys.extend(block.keys);
    }
    geometry
}

/// Terminal cells for one key unit that fit `geometry` into `area`
pub fn unit_cells(geometry: &KeyboardGeometry, area: Rect) -> (f32, f32) {
    if geometry.width <= 0.0 || geometry.height <= 0.0 {
        return (MIN_UNIT_COLS, 1.0);
    }
    let cols = (f32::from(area.width) / geometry.width)
        .floor()
        .clamp(MIN_UNIT_COLS, MAX_UNIT_COLS);
    let rows = (f32::from(area.height) / geometry.height)
        .floor()
        .clamp(1.0, MAX_UNIT_ROWS);
    (cols, rows)
}

/// Cell rectangle of a placed key, clipped to `area`
pub fn key_rect(key: &PlacedKey, unit: (f32, f32), area: Rect) -> Option<Rect> {
    let (cols, rows) = unit;
    let left = (key.x * cols).round() as u16;
    let right = ((key.x + key.width) * cols).round() as u16;
    let top = (key.y * rows).round() as u16;
    let bottom = ((key.y + key.height) * rows).round() as u16;

    // One column between neighbours
    let width = right.saturating_sub(left).saturating_sub(1);
    let height = bottom.saturating_sub(top);
    if width == 0 || height == 0 {
        return None;
    }

    let rect = Rect::new(
        area.x.saturating_add(left),
        area.y.saturating_add(top),
        width,
        height,
    )
    .intersection(area);
    (!rect.is_empty()).then_some(rect)
}

pub fn render(frame: &mut Frame, engine: &Engine, area: Rect) {
    let t = theme();
    let geometry = arrange(engine.layout());
    let unit = unit_cells(&geometry, area);

    // Center the keyboard in the panel
    let used_w = ((geometry.width * unit.0).round() as u16).min(area.width);
    let used_h = ((geometry.height * unit.1).round() as u16).min(area.height);
    let origin = Rect::new(
        area.x + (area.width - used_w) / 2,
        area.y + (area.height - used_h) / 2,
        used_w,
        used_h,
    );

    for placed in &geometry.keys {
        let (Some(key), Some(rect)) = (engine.key(placed.id), key_rect(placed, unit, origin)) else {
            continue;
        };
        let visual = engine.visual(placed.id).unwrap_or(KeyVisual::IDLE);
        let label = fit_label(key.label(), rect.width, rect.height >= 3);

        let mut paragraph = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(t.key_label(visual, key.small_font()));
        if rect.height >= 3 {
            let (border_type, border_style) = t.key_border(visual);
            paragraph = paragraph.block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(border_style)
                    .style(t.key(visual)),
            );
        }
        frame.render_widget(paragraph, rect);
    }
}

/// Trim a caption to the inner width of its key
fn fit_label(label: &str, width: u16, bordered: bool) -> String {
    let inner = if bordered { width.saturating_sub(2) } else { width } as usize;
    label.trim().chars().take(inner).collect()
}
