//! Font registry
//!
//! Loads the primary/fallback/system fonts once at construction and
//! answers glyph coverage queries for the rest of the process lifetime.
//! The registry is immutable after construction and safe to share
//! read-only across concurrent renders.

use fontdue::{Font, FontSettings};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use super::discovery;
use crate::config::FontConfig;
use crate::constants::{SELF_TEST_CHAR, SELF_TEST_SIZE};

/// Slot of the fallback chain a font occupies. Order here is not
/// selection precedence; precedence lives in the resolver rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSlot {
    /// Decorative/calligraphic main font
    Primary,
    /// Kai-style fallback with broad hanzi coverage
    Fallback,
    /// Last-resort sentinel, always present in the chain
    System,
}

/// Load lifecycle of a font resource.
///
/// Unloaded -> Loading -> {Available, Unavailable}. Available can move
/// to Unavailable only through the startup self-test; nothing changes
/// after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Available,
    Unavailable,
}

/// One loadable font plus every name it answers to.
///
/// Font-file metadata is inconsistent across platforms: the same file may
/// be requested by postscript name, family name, or a localized name.
/// All aliases registered here resolve to this single resource.
pub struct FontResource {
    names: Vec<String>,
    path: Option<PathBuf>,
    font: Option<Font>,
    state: LoadState,
}

impl FontResource {
    /// Resource that never loaded (no specifiers matched anything).
    fn unavailable(names: Vec<String>) -> Self {
        Self {
            names,
            path: None,
            font: None,
            state: LoadState::Unavailable,
        }
    }

    /// Try each specifier in order until one resolves and parses.
    /// Fails softly: a missing or unparsable file marks the resource
    /// unavailable, it never raises.
    fn load(specifiers: &[String], assets_dir: &Path, label: &str) -> Self {
        let names: Vec<String> = specifiers.to_vec();
        let mut resource = Self {
            names,
            path: None,
            font: None,
            state: LoadState::Loading,
        };

        for spec in specifiers {
            let data = match discovery::resolve_font(spec, assets_dir) {
                Some(data) => data,
                None => continue,
            };
            match Font::from_bytes(data, FontSettings::default()) {
                Ok(font) => {
                    info!("{} font ready: \"{}\"", label, spec);
                    resource.path = Some(PathBuf::from(spec));
                    resource.font = Some(font);
                    resource.state = LoadState::Available;
                    return resource;
                }
                Err(e) => {
                    warn!("Failed to parse {} font \"{}\": {}", label, spec, e);
                }
            }
        }

        warn!("{} font unavailable (tried {} specifiers)", label, specifiers.len());
        resource.state = LoadState::Unavailable;
        resource
    }

    /// Wrap already-parsed font data (system tier).
    fn from_font(names: Vec<String>, font: Option<Font>) -> Self {
        let state = if font.is_some() {
            LoadState::Available
        } else {
            LoadState::Unavailable
        };
        Self {
            names,
            path: None,
            font,
            state,
        }
    }

    pub fn is_available(&self) -> bool {
        self.state == LoadState::Available
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Lookup keys this resource is registered under.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Specifier that resolved, if the font loaded from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn font(&self) -> Option<&Font> {
        if self.is_available() {
            self.font.as_ref()
        } else {
            None
        }
    }
}

/// The process-wide font chain: primary, fallback, system sentinel.
///
/// Constructed once; all render calls borrow it immutably. No hidden
/// global state: tests build isolated registries from their own config.
pub struct FontRegistry {
    primary: FontResource,
    fallback: FontResource,
    system: FontResource,
}

impl FontRegistry {
    /// Load all font slots. Never fails: every slot degrades
    /// independently and the system sentinel keeps rendering possible
    /// with zero usable font files.
    pub fn new(cfg: &FontConfig) -> Self {
        let assets_dir = Path::new(&cfg.assets_dir);

        let primary = FontResource::load(&cfg.primary, assets_dir, "primary");
        let mut fallback = FontResource::load(&cfg.fallback, assets_dir, "fallback");

        // A font that parses can still fail to rasterize (corrupt glyph
        // outlines, missing tables). Probe the fallback once and demote
        // it for the process lifetime if the probe produces no pixels.
        if fallback.is_available() && !self_test(&fallback) {
            error!(
                "Fallback font failed render self-test on '{}'; demoting to unavailable",
                SELF_TEST_CHAR
            );
            fallback.state = LoadState::Unavailable;
            fallback.font = None;
        }

        let system = FontResource::from_font(
            vec!["system-default".to_string()],
            discovery::load_system_cjk_font()
                .and_then(|data| match Font::from_bytes(data, FontSettings::default()) {
                    Ok(font) => Some(font),
                    Err(e) => {
                        warn!("Failed to parse system font: {}", e);
                        None
                    }
                }),
        );

        if !primary.is_available() && !fallback.is_available() {
            warn!("No configured fonts available; rendering quality degraded to system tier");
        }

        Self {
            primary,
            fallback,
            system,
        }
    }

    /// Registry with every slot unavailable. Rendering still works via
    /// placeholder glyphs; used by tests and as an explicit offline mode.
    pub fn empty() -> Self {
        Self {
            primary: FontResource::unavailable(vec!["primary".to_string()]),
            fallback: FontResource::unavailable(vec!["fallback".to_string()]),
            system: FontResource::unavailable(vec!["system-default".to_string()]),
        }
    }

    pub fn resource(&self, slot: FontSlot) -> &FontResource {
        match slot {
            FontSlot::Primary => &self.primary,
            FontSlot::Fallback => &self.fallback,
            FontSlot::System => &self.system,
        }
    }

    pub fn is_available(&self, slot: FontSlot) -> bool {
        self.resource(slot).is_available()
    }

    /// Font for a slot, None when the slot is unavailable. A None for
    /// the system slot means the placeholder renderer takes over.
    pub fn font(&self, slot: FontSlot) -> Option<&Font> {
        self.resource(slot).font()
    }

    /// Does this slot's font contain a visible glyph for the character?
    ///
    /// Returns false, never an error, when the slot is unavailable or
    /// the lookup cannot be answered: "no glyph" and "can't tell" both
    /// route the character down the fallback chain.
    pub fn has_glyph(&self, slot: FontSlot, ch: char) -> bool {
        match self.font(slot) {
            Some(font) => font.lookup_glyph_index(ch) != 0,
            None => false,
        }
    }

    /// Resolve any registered alias to its slot.
    pub fn slot_by_name(&self, name: &str) -> Option<FontSlot> {
        for slot in [FontSlot::Primary, FontSlot::Fallback, FontSlot::System] {
            if self
                .resource(slot)
                .names()
                .iter()
                .any(|n| n.eq_ignore_ascii_case(name))
            {
                return Some(slot);
            }
        }
        None
    }
}

/// Rasterize the probe character into a scratch bitmap and check that at
/// least one non-background pixel came out.
fn self_test(resource: &FontResource) -> bool {
    let font = match resource.font.as_ref() {
        Some(font) => font,
        None => return false,
    };
    if font.lookup_glyph_index(SELF_TEST_CHAR) == 0 {
        debug!("Self-test: fallback font has no glyph for '{}'", SELF_TEST_CHAR);
        return false;
    }
    let (metrics, bitmap) = font.rasterize(SELF_TEST_CHAR, SELF_TEST_SIZE);
    if metrics.width == 0 || metrics.height == 0 {
        return false;
    }
    bitmap.iter().any(|&coverage| coverage > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_has_no_glyphs() {
        let registry = FontRegistry::empty();
        for slot in [FontSlot::Primary, FontSlot::Fallback, FontSlot::System] {
            assert!(!registry.is_available(slot));
            assert!(!registry.has_glyph(slot, '中'));
            assert!(registry.font(slot).is_none());
        }
    }

    #[test]
    fn test_missing_files_mark_unavailable_without_error() {
        let cfg = FontConfig {
            assets_dir: "/nonexistent".to_string(),
            primary: vec!["NoSuchFont-Regular.ttf".to_string()],
            fallback: vec!["/also/no/such/font.ttf".to_string()],
        };
        // Must not panic or error; slots degrade softly. The system
        // slot may or may not find a font depending on the host.
        let registry = FontRegistry::new(&cfg);
        assert!(!registry.is_available(FontSlot::Primary));
        assert!(!registry.is_available(FontSlot::Fallback));
    }

    #[test]
    fn test_alias_lookup_resolves_every_name() {
        let registry = FontRegistry::empty();
        assert_eq!(registry.slot_by_name("primary"), Some(FontSlot::Primary));
        assert_eq!(registry.slot_by_name("PRIMARY"), Some(FontSlot::Primary));
        assert_eq!(
            registry.slot_by_name("system-default"),
            Some(FontSlot::System)
        );
        assert_eq!(registry.slot_by_name("unregistered"), None);
    }
}
