//! Namespace registry.
//!
//! Static lookup of every namespace descriptor, by remote name or by CLI
//! name. The CLI uses it to resolve `statkit namespaces <name>` and to warn
//! about unknown methods before sending them.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::descriptor::NamespaceDescriptor;

// ============================================================================
// Static Registry
// ============================================================================

/// Every namespace, in the order `namespaces` lists them.
static DESCRIPTORS: &[NamespaceDescriptor] = &[
    // Reports
    crate::visits_summary::DESCRIPTOR,
    crate::actions::DESCRIPTOR,
    crate::referrers::DESCRIPTOR,
    crate::events::DESCRIPTOR,
    crate::goals::DESCRIPTOR,
    crate::live::DESCRIPTOR,
    // Configuration
    crate::sites_manager::DESCRIPTOR,
    crate::users_manager::DESCRIPTOR,
    crate::custom_dimensions::DESCRIPTOR,
    crate::annotations::DESCRIPTOR,
    crate::tag_manager::DESCRIPTOR,
    // Metadata
    crate::api::DESCRIPTOR,
];

/// CLI name and alias to descriptor index.
static CLI_NAME_MAP: OnceLock<HashMap<&'static str, usize>> = OnceLock::new();

fn build_cli_name_map(descriptors: &'static [NamespaceDescriptor]) -> HashMap<&'static str, usize> {
    let mut map = HashMap::new();

    for (index, desc) in descriptors.iter().enumerate() {
        map.insert(desc.cli_name, index);

        for alias in desc.aliases {
            map.insert(*alias, index);
        }
    }

    map
}

// ============================================================================
// Namespace Registry
// ============================================================================

/// Global registry of namespace descriptors.
pub struct NamespaceRegistry;

impl NamespaceRegistry {
    /// Returns all descriptors.
    pub fn all() -> &'static [NamespaceDescriptor] {
        DESCRIPTORS
    }

    /// Looks up a namespace by remote name, ignoring case.
    pub fn get(name: &str) -> Option<&'static NamespaceDescriptor> {
        Self::all().iter().find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Looks up a namespace by CLI name or alias.
    pub fn get_by_cli_name(name: &str) -> Option<&'static NamespaceDescriptor> {
        let index = CLI_NAME_MAP
            .get_or_init(|| build_cli_name_map(DESCRIPTORS))
            .get(name)?;
        Self::all().get(*index)
    }

    /// Looks up a namespace by CLI name first, then by remote name.
    pub fn lookup(name: &str) -> Option<&'static NamespaceDescriptor> {
        Self::get_by_cli_name(name).or_else(|| Self::get(name))
    }

    /// Returns true if `qualified` (`Namespace.method`) names a known method.
    pub fn knows_method(qualified: &str) -> bool {
        let Some((namespace, method)) = qualified.split_once('.') else {
            return false;
        };

        Self::all()
            .iter()
            .any(|d| d.name == namespace && d.has_method(method))
    }

    /// Returns the number of registered namespaces.
    pub fn count() -> usize {
        Self::all().len()
    }
}

// ============================================================================
// Tests
// ============================================================================
