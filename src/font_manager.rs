//! Font registry keyed by string handle.
//!
//! Applications typically parse each font once at startup and refer to it
//! by name afterwards (e.g. `"default16px"`, `"title"`). The manager only
//! resolves names: descriptors are shared through [`Arc`] and never copied,
//! and whoever parsed a font stays in charge of the buffer it borrows from.

use std::collections::HashMap;
use std::sync::Arc;

use crate::fonts::UFont;

/// Registry of loaded fonts.
#[derive(Debug, Clone, Default)]
pub struct FontManager<'a> {
    /// Registered fonts (handle -> font)
    fonts: HashMap<String, Arc<UFont<'a>>>,
}

impl<'a> FontManager<'a> {
    /// Create an empty font manager.
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
        }
    }

    /// Register `font` under `handle`.
    ///
    /// An existing registration for the same handle is replaced and returned.
    pub fn register(
        &mut self,
        handle: impl Into<String>,
        font: Arc<UFont<'a>>,
    ) -> Option<Arc<UFont<'a>>> {
        let handle = handle.into();
        log::debug!(
            "Registering font {:?} ({} glyphs)",
            handle,
            font.glyph_count()
        );
        let previous = self.fonts.insert(handle, font);
        if previous.is_some() {
            log::debug!("Replaced previously registered font");
        }
        previous
    }

    /// Look up a font by exact handle.
    pub fn find_by_handle(&self, handle: &str) -> Option<Arc<UFont<'a>>> {
        self.fonts.get(handle).cloned()
    }

    /// Borrow a font by exact handle without touching its reference count.
    pub fn get(&self, handle: &str) -> Option<&UFont<'a>> {
        self.fonts.get(handle).map(Arc::as_ref)
    }

    /// Check whether `handle` is registered.
    pub fn contains(&self, handle: &str) -> bool {
        self.fonts.contains_key(handle)
    }

    /// Registered handles, in no particular order.
    pub fn handles(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// True if no fonts are registered.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}
