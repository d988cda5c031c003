// Keytest Visual Mode
// On-screen keyboard driven by the key-mapping engine

use std::rc::Rc;

use super::{DisplayMode, ModeKind};
use crate::engine::{Engine, EngineError};
use crate::event::KeyEvent;
use crate::layout::LayoutCatalog;

/// Renders the selected layout and highlights keys as events arrive.
///
/// The engine session exists only while the mode is active.
#[derive(Debug)]
pub struct VisualMode {
    catalog: Rc<LayoutCatalog>,
    layout_name: String,
    engine: Option<Engine>,
    status: String,
}

impl VisualMode {
    /// Mode showing `layout`, which must exist in `catalog`
    pub fn new(catalog: Rc<LayoutCatalog>, layout: &str) -> Result<Self, EngineError> {
        if !catalog.contains(layout) {
            return Err(EngineError::UnknownLayout(layout.to_string()));
        }
        Ok(Self {
            catalog,
            layout_name: layout.to_string(),
            engine: None,
            status: String::new(),
        })
    }

    pub fn layout_name(&self) -> &str {
        &self.layout_name
    }

    pub fn catalog(&self) -> &LayoutCatalog {
        &self.catalog
    }

    /// Live session, `None` while deactivated
    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    /// Switch layouts, rebuilding the session if active.
    ///
    /// An unknown name is reported in the status line and changes nothing else.
    pub fn select_layout(&mut self, name: &str) -> Result<(), EngineError> {
        if let Some(engine) = self.engine.as_mut() {
            if let Err(e) = engine.load_layout(&self.catalog, name) {
                self.status = format!("Error: {}", e);
                return Err(e);
            }
        } else if !self.catalog.contains(name) {
            let e = EngineError::UnknownLayout(name.to_string());
            log::warn!("Keeping layout '{}': {}", self.layout_name, e);
            self.status = format!("Error: {}", e);
            return Err(e);
        }

        self.layout_name = name.to_string();
        self.status = format!("Layout: {}", name);
        Ok(())
    }

    /// Select the layout after the current one in catalog order
    pub fn next_layout(&mut self) -> Result<(), EngineError> {
        let next = self
            .catalog
            .next_after(&self.layout_name)
            .map(|layout| layout.name().to_string())
            .ok_or_else(|| EngineError::UnknownLayout(self.layout_name.clone()))?;
        self.select_layout(&next)
    }

    /// Select the layout before the current one in catalog order
    pub fn previous_layout(&mut self) -> Result<(), EngineError> {
        let previous = self
            .catalog
            .previous_before(&self.layout_name)
            .map(|layout| layout.name().to_string())
            .ok_or_else(|| EngineError::UnknownLayout(self.layout_name.clone()))?;
        self.select_layout(&previous)
    }
}

impl DisplayMode for VisualMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Visual
    }

    fn activate(&mut self) {
        match Engine::from_catalog(&self.catalog, &self.layout_name) {
            Ok(engine) => {
                self.engine = Some(engine);
                self.status = format!("{} active.", self.kind().title());
            }
            Err(e) => {
                log::warn!("Cannot activate visual mode: {}", e);
                self.status = format!("Error: {}", e);
            }
        }
    }

    fn deactivate(&mut self) {
        self.engine = None;
    }

    fn is_active(&self) -> bool {
        self.engine.is_some()
    }

    fn on_key_press(&mut self, event: &KeyEvent) {
        let Some(engine) = self.engine.as_mut() else {
            log::debug!("Visual mode inactive, skipping press of '{}'", event.keysym);
            return;
        };
        engine.press(&event.keysym, &event.text);
        self.status = format!("Press: {} (char: '{}')", event.keysym, event.text);
    }

    fn on_key_release(&mut self, event: &KeyEvent) {
        let Some(engine) = self.engine.as_mut() else {
            log::debug!("Visual mode inactive, skipping release of '{}'", event.keysym);
            return;
        };
        engine.release(&event.keysym, &event.text);
        self.status = format!("Release: {}", event.keysym);
    }

    fn status(&self) -> &str {
        &self.status
    }
}
