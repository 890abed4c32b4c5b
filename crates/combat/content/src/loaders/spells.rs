//! Spell definition loader.
//!
//! Loads spell definitions from RON files and builds them into a lookup
//! registry.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::loaders::{LoadResult, read_file};
use crate::spell::{Spell, SpellDefinition};

/// Loader for spell definitions from RON files.
///
/// A file holds a list of [`SpellDefinition`]s.
pub struct SpellLoader;

impl SpellLoader {
    /// Load spell definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<SpellDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse spell definitions from RON text. `source` names the text in
    /// errors.
    pub fn parse(content: &str, source: &str) -> LoadResult<Vec<SpellDefinition>> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spells from {}: {}", source, e))
    }
}

/// Registry of built spells, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct SpellRegistry {
    spells: HashMap<String, Arc<Spell>>,
}

impl SpellRegistry {
    /// Loads the spells embedded in the crate.
    pub fn builtin() -> LoadResult<Self> {
        let mut registry = Self::default();

        // Damage, drain and field-rune spells
        let attack = include_str!("../../data/spells/attack.ron");
        registry.extend(SpellLoader::parse(attack, "attack.ron")?)?;

        // Healing, utility and wall spells
        let support = include_str!("../../data/spells/support.ron");
        registry.extend(SpellLoader::parse(support, "support.ron")?)?;

        tracing::debug!(spells = registry.len(), "loaded builtin spells");
        Ok(registry)
    }

    /// Loads every `.ron` file in `dir`, in file name order.
    pub fn load_dir(dir: &Path) -> LoadResult<Self> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| anyhow::anyhow!("Failed to list {}: {}", dir.display(), e))?
                .path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut registry = Self::default();
        for path in &paths {
            registry.extend(SpellLoader::load(path)?)?;
        }

        tracing::debug!(
            dir = %dir.display(),
            files = paths.len(),
            spells = registry.len(),
            "loaded spell directory"
        );
        Ok(registry)
    }

    /// Builds and registers `definitions`.
    ///
    /// Fails on the first invalid area or duplicate name; spells registered
    /// before the failure stay registered.
    pub fn extend(
        &mut self,
        definitions: impl IntoIterator<Item = SpellDefinition>,
    ) -> LoadResult<()> {
        for definition in definitions {
            let name = definition.name.to_lowercase();
            if self.spells.contains_key(&name) {
                anyhow::bail!("Duplicate spell name: {}", name);
            }
            let spell = Spell::build(definition)
                .map_err(|e| anyhow::anyhow!("Invalid area for spell {}: {}", name, e))?;
            self.spells.insert(name, Arc::new(spell));
        }
        Ok(())
    }

    /// Gets a spell by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<Arc<Spell>> {
        self.spells.get(&name.to_lowercase()).cloned()
    }

    /// Returns an iterator over all registered spell names.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.spells.keys().map(String::as_str)
    }

    /// Returns the number of registered spells.
    pub fn len(&self) -> usize {
        self.spells.len()
    }

    /// Returns true if no spells are registered.
    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{CombatType, FieldKind, HazardItem, TargetingMode};

    #[test]
    fn test_load_builtin_spells() {
        let registry = SpellRegistry::builtin().expect("Failed to load builtin spells");

        assert_eq!(registry.len(), 15);

        let fireball = registry.get("fireball").expect("fireball");
        assert_eq!(fireball.combat().params().combat_type, CombatType::Fire);
        assert!(!fireball.is_area());

        let wave = registry.get("Energy Wave").expect("case-insensitive lookup");
        assert!(wave.is_area());

        let wall = registry.get("magic wall").expect("magic wall");
        assert!(matches!(
            wall.combat().params().hazard,
            Some(HazardItem::Field(field)) if field.kind == FieldKind::MagicWall
        ));

        let chameleon = registry.get("chameleon").expect("chameleon");
        assert_eq!(
            chameleon.combat().params().targeting,
            TargetingMode::CasterOrTopmost
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let spells = r#"[
            (name: "spark", params: (combat_type: energy)),
            (name: "Spark", params: (combat_type: fire)),
        ]"#;
        let definitions = SpellLoader::parse(spells, "inline").unwrap();

        let mut registry = SpellRegistry::default();
        let err = registry.extend(definitions).unwrap_err();
        assert!(err.to_string().contains("Duplicate spell name"));
        assert_eq!(registry.len(), 1);
    }
}
