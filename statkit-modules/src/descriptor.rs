//! Namespace descriptors.

use std::fmt;

/// Static description of one remote API namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceDescriptor {
    /// Remote namespace name (e.g. `SitesManager`).
    pub name: &'static str,
    /// Primary CLI name.
    pub cli_name: &'static str,
    /// Alternative CLI names.
    pub aliases: &'static [&'static str],
    /// One-line summary.
    pub summary: &'static str,
    /// Remote method names, unqualified (e.g. `getSiteFromId`).
    pub methods: &'static [&'static str],
}

impl NamespaceDescriptor {
    /// Qualifies a method name with this namespace.
    pub fn qualified(&self, method: &str) -> String {
        format!("{}.{}", self.name, method)
    }

    /// Returns true if the namespace exposes `method` (unqualified).
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains(&method)
    }

    /// Iterates over fully qualified method names.
    pub fn qualified_methods(&self) -> impl Iterator<Item = String> + '_ {
        self.methods.iter().map(|m| self.qualified(m))
    }

    /// Returns true if `name` is the CLI name or one of the aliases.
    pub fn matches_cli_name(&self, name: &str) -> bool {
        self.cli_name == name || self.aliases.contains(&name)
    }
}

impl fmt::Display for NamespaceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: NamespaceDescriptor = NamespaceDescriptor {
        name: "Goals",
        cli_name: "goals",
        aliases: &["conversions"],
        summary: "Goal management",
        methods: &["getGoals", "addGoal"],
    };

    #[test]
    fn test_qualified() {
        assert_eq!(SAMPLE.qualified("getGoals"), "Goals.getGoals");
        assert_eq!(
            SAMPLE.qualified_methods().collect::<Vec<_>>(),
            vec!["Goals.getGoals", "Goals.addGoal"]
        );
    }

    #[test]
    fn test_cli_name_matching() {
        assert!(SAMPLE.matches_cli_name("goals"));
        assert!(SAMPLE.matches_cli_name("conversions"));
        assert!(!SAMPLE.matches_cli_name("Goals"));
        assert!(SAMPLE.has_method("addGoal"));
        assert!(!SAMPLE.has_method("deleteEverything"));
    }
}
