//! Font loading and fallback resolution
//!
//! Handles:
//! - TTF/OTF font loading (fontdue)
//! - Multi-name font registration (postscript/family/localized aliases)
//! - Glyph coverage queries
//! - Per-character fallback precedence
//! - Fallback-font startup self-test

pub mod discovery;
pub mod registry;
pub mod resolver;

pub use registry::{FontRegistry, FontResource, FontSlot, LoadState};
pub use resolver::{resolve, CoverageState, FontChoice, SlotProbe, RESOLUTION_RULES};
