//! The process-wide variant registry.
//!
//! Network protocols and saved games refer to variants by name. The
//! registry maps names (and their aliases, case-insensitively) to a
//! [`VariantInfo`] capability bundle. Lookup of an unknown name is
//! recoverable: [`Registry::resolve`] falls back to the default variant and
//! reports the substitution to the caller.
//!
//! The global registry is populated exactly once. Hosts that want a custom
//! variant set call [`initialize`] before the first lookup; otherwise the
//! built-in set is installed on first use.

use std::sync::OnceLock;

use crate::variant::{Variant, VariantPosition};

bitflags::bitflags! {
    /// Capabilities a client needs to know about before play starts.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
    pub struct VariantFlags: u8 {
        /// Captured pieces go to a pool and can be dropped.
        const POOL = 1;
        /// One-click destination moves make sense (no mandatory
        /// origin-square selection).
        const SIMPLE_MOVES = 1 << 1;
        /// Moves can carry a promotion choice the UI must ask for.
        const PROMOTION_CHOICE = 1 << 2;
    }
}

/// What the registry knows about one variant.
#[derive(Clone, Debug)]
pub struct VariantInfo {
    pub variant: Variant,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub flags: VariantFlags,
}

impl VariantInfo {
    /// The variant's standard starting position.
    pub fn position(&self) -> VariantPosition {
        VariantPosition::new(self.variant)
    }

    fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    }
}

/// How a name was resolved.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Resolution {
    Exact,
    /// The name was unknown and the default variant was substituted.
    Fallback,
}

/// A variant name to [`VariantInfo`] map.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: Vec<VariantInfo>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// The built-in variant set.
    pub fn with_defaults() -> Registry {
        let mut registry = Registry::new();
        registry.register(VariantInfo {
            variant: Variant::Chess,
            name: "chess",
            aliases: &["standard", "normal"],
            flags: VariantFlags::SIMPLE_MOVES | VariantFlags::PROMOTION_CHOICE,
        });
        registry.register(VariantInfo {
            variant: Variant::MiniChess,
            name: "minichess",
            aliases: &["gardner"],
            flags: VariantFlags::SIMPLE_MOVES | VariantFlags::PROMOTION_CHOICE,
        });
        registry.register(VariantInfo {
            variant: Variant::Crazyhouse,
            name: "crazyhouse",
            aliases: &["zh"],
            flags: VariantFlags::POOL
                | VariantFlags::SIMPLE_MOVES
                | VariantFlags::PROMOTION_CHOICE,
        });
        registry.register(VariantInfo {
            variant: Variant::Shogi,
            name: "shogi",
            aliases: &[],
            flags: VariantFlags::POOL | VariantFlags::PROMOTION_CHOICE,
        });
        registry.register(VariantInfo {
            variant: Variant::MiniShogi,
            name: "minishogi",
            aliases: &[],
            flags: VariantFlags::POOL | VariantFlags::PROMOTION_CHOICE,
        });
        registry.register(VariantInfo {
            variant: Variant::Dummy,
            name: "dummy",
            aliases: &["editor"],
            flags: VariantFlags::POOL | VariantFlags::SIMPLE_MOVES,
        });
        registry
    }

    /// Adds or replaces an entry. The last registration of a name wins.
    pub fn register(&mut self, info: VariantInfo) {
        self.entries.retain(|entry| !entry.matches(info.name));
        self.entries.push(info);
    }

    /// Looks a name up, case-insensitively, by primary name or alias.
    pub fn lookup(&self, name: &str) -> Option<&VariantInfo> {
        self.entries.iter().find(|entry| entry.matches(name))
    }

    /// The variant substituted for unknown names.
    pub fn default_variant(&self) -> Option<&VariantInfo> {
        self.lookup(Variant::Chess.name()).or(self.entries.first())
    }

    /// Resolves a name, falling back to the default variant when unknown.
    ///
    /// Returns `None` only for an empty registry.
    pub fn resolve(&self, name: &str) -> Option<(&VariantInfo, Resolution)> {
        match self.lookup(name) {
            Some(info) => Some((info, Resolution::Exact)),
            None => {
                let info = self.default_variant()?;
                tracing::warn!(
                    name,
                    fallback = info.name,
                    "unknown variant, substituting the default"
                );
                Some((info, Resolution::Fallback))
            }
        }
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Installs a custom registry as the process-wide one.
///
/// Must run before the first [`registry`] call; returns `false` if the
/// global registry was already populated, leaving it untouched.
pub fn initialize(registry: Registry) -> bool {
    REGISTRY.set(registry).is_ok()
}

/// The process-wide registry, populating it with the built-in variant set
/// on first use.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::with_defaults)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = Registry::with_defaults();
        for name in ["chess", "CHESS", "Standard"] {
            let info = registry.lookup(name).expect("registered variant");
            assert_eq!(info.variant, Variant::Chess);
        }
        assert_eq!(
            registry.lookup("zh").expect("registered alias").variant,
            Variant::Crazyhouse
        );
        assert!(registry.lookup("wildebeest").is_none());
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        let registry = Registry::with_defaults();
        let (info, resolution) = registry.resolve("wildebeest").expect("non-empty registry");
        assert_eq!(info.variant, Variant::Chess);
        assert_eq!(resolution, Resolution::Fallback);

        let (info, resolution) = registry.resolve("Shogi").expect("non-empty registry");
        assert_eq!(info.variant, Variant::Shogi);
        assert_eq!(resolution, Resolution::Exact);
    }

    #[test]
    fn test_flags() {
        let registry = Registry::with_defaults();
        let zh = registry.lookup("crazyhouse").expect("registered variant");
        assert!(zh.flags.contains(VariantFlags::POOL));
        let chess = registry.lookup("chess").expect("registered variant");
        assert!(!chess.flags.contains(VariantFlags::POOL));
        assert!(chess.flags.contains(VariantFlags::PROMOTION_CHOICE));
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = Registry::with_defaults();
        registry.register(VariantInfo {
            variant: Variant::Dummy,
            name: "chess",
            aliases: &[],
            flags: VariantFlags::empty(),
        });
        assert_eq!(
            registry.lookup("chess").expect("registered variant").variant,
            Variant::Dummy
        );
    }
}
