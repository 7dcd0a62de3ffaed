//! Per-character font fallback resolution
//!
//! The precedence is a rule table evaluated top-to-bottom, not a nested
//! conditional, so each tier is independently testable:
//!
//! 1. Primary, if available and it has the glyph
//! 2. Fallback, if available and it has the glyph
//! 3. Fallback anyway, if available (uncovered, better than nothing)
//! 4. Primary anyway, if available (uncovered)
//! 5. System default, always
//!
//! The fallback font is trusted more than the primary when coverage is
//! uncertain: tier 3 outranks tier 4. Resolution never fails.

use log::{debug, warn};

use super::registry::{FontRegistry, FontSlot};

/// Availability and glyph coverage of one slot for one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotProbe {
    pub available: bool,
    pub has_glyph: bool,
}

/// Everything the rule table needs to pick a font for one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageState {
    pub primary: SlotProbe,
    pub fallback: SlotProbe,
}

impl CoverageState {
    /// Probe the registry for one character.
    pub fn probe(registry: &FontRegistry, ch: char) -> Self {
        Self {
            primary: SlotProbe {
                available: registry.is_available(FontSlot::Primary),
                has_glyph: registry.has_glyph(FontSlot::Primary, ch),
            },
            fallback: SlotProbe {
                available: registry.is_available(FontSlot::Fallback),
                has_glyph: registry.has_glyph(FontSlot::Fallback, ch),
            },
        }
    }
}

/// Outcome of resolution: which slot to draw with, and whether the glyph
/// is confirmed present there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontChoice {
    pub slot: FontSlot,
    pub covered: bool,
}

/// One row of the precedence table.
pub struct ResolutionRule {
    /// Label used in logs
    pub name: &'static str,
    pub choice: FontChoice,
    pub matches: fn(CoverageState) -> bool,
}

/// The five-tier precedence, in selection order.
pub static RESOLUTION_RULES: [ResolutionRule; 5] = [
    ResolutionRule {
        name: "primary",
        choice: FontChoice {
            slot: FontSlot::Primary,
            covered: true,
        },
        matches: |s| s.primary.available && s.primary.has_glyph,
    },
    ResolutionRule {
        name: "fallback",
        choice: FontChoice {
            slot: FontSlot::Fallback,
            covered: true,
        },
        matches: |s| s.fallback.available && s.fallback.has_glyph,
    },
    ResolutionRule {
        name: "fallback-uncovered",
        choice: FontChoice {
            slot: FontSlot::Fallback,
            covered: false,
        },
        matches: |s| s.fallback.available,
    },
    ResolutionRule {
        name: "primary-uncovered",
        choice: FontChoice {
            slot: FontSlot::Primary,
            covered: false,
        },
        matches: |s| s.primary.available,
    },
    ResolutionRule {
        name: "system-default",
        choice: FontChoice {
            slot: FontSlot::System,
            covered: false,
        },
        matches: |_| true,
    },
];

/// Pick the font for one coverage state. Pure: same state, same choice.
pub fn resolve(state: CoverageState) -> &'static ResolutionRule {
    for rule in &RESOLUTION_RULES {
        if (rule.matches)(state) {
            return rule;
        }
    }
    // The last rule matches everything; this arm exists only to satisfy
    // the compiler.
    &RESOLUTION_RULES[RESOLUTION_RULES.len() - 1]
}

/// Resolve one character against the registry, logging the decision the
/// way each tier requires.
pub fn resolve_for_char(registry: &FontRegistry, ch: char) -> FontChoice {
    let state = CoverageState::probe(registry, ch);
    let rule = resolve(state);

    match rule.name {
        "primary" => {}
        "fallback" => {
            debug!(
                "Primary font lacks U+{:04X} '{}', using fallback",
                ch as u32, ch
            );
        }
        _ => {
            warn!(
                "No confirmed glyph for U+{:04X} '{}', using {} tier",
                ch as u32, ch, rule.name
            );
        }
    }

    rule.choice
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(available: bool, has_glyph: bool) -> SlotProbe {
        SlotProbe {
            available,
            has_glyph,
        }
    }

    #[test]
    fn test_primary_wins_when_covered() {
        let state = CoverageState {
            primary: probe(true, true),
            fallback: probe(true, true),
        };
        let rule = resolve(state);
        assert_eq!(rule.name, "primary");
        assert_eq!(rule.choice.slot, FontSlot::Primary);
        assert!(rule.choice.covered);
    }

    #[test]
    fn test_fallback_precedence_law() {
        // Glyph present in fallback, absent from primary: the choice is
        // always the fallback, never primary, never system-default,
        // whatever the primary's availability.
        for primary_available in [true, false] {
            let state = CoverageState {
                primary: probe(primary_available, false),
                fallback: probe(true, true),
            };
            let rule = resolve(state);
            assert_eq!(rule.choice.slot, FontSlot::Fallback);
            assert!(rule.choice.covered);
        }
    }

    #[test]
    fn test_uncovered_fallback_outranks_uncovered_primary() {
        // Neither font has the glyph but both are loaded: the fallback
        // is trusted more.
        let state = CoverageState {
            primary: probe(true, false),
            fallback: probe(true, false),
        };
        let rule = resolve(state);
        assert_eq!(rule.name, "fallback-uncovered");
        assert_eq!(rule.choice.slot, FontSlot::Fallback);
        assert!(!rule.choice.covered);
    }

    #[test]
    fn test_primary_anyway_without_fallback() {
        let state = CoverageState {
            primary: probe(true, false),
            fallback: probe(false, false),
        };
        let rule = resolve(state);
        assert_eq!(rule.name, "primary-uncovered");
        assert_eq!(rule.choice.slot, FontSlot::Primary);
    }

    #[test]
    fn test_system_default_is_last_resort() {
        let state = CoverageState {
            primary: probe(false, false),
            fallback: probe(false, false),
        };
        let rule = resolve(state);
        assert_eq!(rule.name, "system-default");
        assert_eq!(rule.choice.slot, FontSlot::System);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        // Same state always selects the same tier.
        let state = CoverageState {
            primary: probe(true, false),
            fallback: probe(true, true),
        };
        let first = resolve(state).choice;
        for _ in 0..8 {
            assert_eq!(resolve(state).choice, first);
        }
    }

    #[test]
    fn test_every_state_yields_a_choice() {
        // Resolution never fails: all 16 probe combinations match a rule.
        for bits in 0..16u8 {
            let state = CoverageState {
                primary: probe(bits & 1 != 0, bits & 2 != 0),
                fallback: probe(bits & 4 != 0, bits & 8 != 0),
            };
            let _ = resolve(state);
        }
    }
}
