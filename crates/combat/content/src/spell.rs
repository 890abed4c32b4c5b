//! Spell definitions and their built form.

use std::sync::Arc;

use combat_core::{AreaDefinition, AreaError, Combat, CombatParams, FormulaDescriptor};

/// One spell as written in a content file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    /// Unique, lower-case name used for lookups.
    pub name: String,
    pub params: CombatParams,
    #[cfg_attr(feature = "serde", serde(default))]
    pub formula: Option<FormulaDescriptor>,
    /// Without an area the spell hits only its target cell or entity.
    #[cfg_attr(feature = "serde", serde(default))]
    pub area: Option<AreaDefinition>,
}

impl SpellDefinition {
    pub fn new(name: impl Into<String>, params: CombatParams) -> Self {
        Self {
            name: name.into(),
            params,
            formula: None,
            area: None,
        }
    }

    pub fn with_formula(mut self, formula: FormulaDescriptor) -> Self {
        self.formula = Some(formula);
        self
    }

    pub fn with_area(mut self, area: AreaDefinition) -> Self {
        self.area = Some(area);
        self
    }
}

/// A built spell: immutable and cheap to clone.
///
/// The directional area set is computed once here and shared by every cast.
#[derive(Clone, Debug)]
pub struct Spell {
    name: Arc<str>,
    combat: Combat,
}

impl Spell {
    /// Builds the spell, expanding its area into all directions.
    pub fn build(definition: SpellDefinition) -> Result<Self, AreaError> {
        let SpellDefinition {
            name,
            params,
            formula,
            area,
        } = definition;

        let mut combat = Combat::new(params);
        if let Some(formula) = formula {
            combat = combat.with_formula(formula);
        }
        if let Some(area) = area {
            combat = combat.with_area(Arc::new(area.build()?));
        }

        Ok(Self {
            name: name.into(),
            combat,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn combat(&self) -> &Combat {
        &self.combat
    }

    pub fn is_area(&self) -> bool {
        self.combat.area().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{AreaTemplate, CombatType};

    #[test]
    fn build_expands_the_area() {
        let definition = SpellDefinition::new("fire wave", CombatParams::new(CombatType::Fire))
            .with_formula(FormulaDescriptor::FlatRange { min: -20.0, max: -10.0 })
            .with_area(AreaDefinition::new(AreaTemplate::Wave {
                length: 5,
                spread: 3,
            }));

        let spell = Spell::build(definition).expect("valid spell");
        assert_eq!(spell.name(), "fire wave");
        assert!(spell.is_area());
        assert!(spell.combat().formula().is_some());
    }

    #[test]
    fn invalid_area_is_rejected() {
        let definition = SpellDefinition::new("broken", CombatParams::new(CombatType::Fire))
            .with_area(AreaDefinition::new(AreaTemplate::Matrix {
                rows: 2,
                cells: vec![1, 1, 1, 1],
            }));

        assert_eq!(Spell::build(definition).err(), Some(AreaError::MissingAnchor));
    }
}
