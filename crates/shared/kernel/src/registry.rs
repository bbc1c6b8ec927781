use crate::unit::RegistrationUnit;
use fxhash::FxHashSet;
use std::borrow::Cow;
use tracing::debug;

#[tnode_derive::tnode_error]
pub enum RegistryError {
    #[error("Invalid unit{}: {message}", format_context(.context))]
    InvalidUnit { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unit '{name}' is registered twice{}", format_context(.context))]
    DuplicateUnit { name: String, context: Option<Cow<'static, str>> },

    #[error("Unit '{unit}' depends on '{tag}', which no unit carries{}", format_context(.context))]
    UnknownDependency { unit: String, tag: String, context: Option<Cow<'static, str>> },

    #[error("Dependency cycle{}: {path}", format_context(.context))]
    DependencyCycle { path: String, context: Option<Cow<'static, str>> },

    #[error("No unit carries tag '{tag}'{}", format_context(.context))]
    UnknownTag { tag: String, context: Option<Cow<'static, str>> },
}

/// Validated, immutable set of deployment units, sorted by name.
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    units: Vec<RegistrationUnit>,
}

impl UnitRegistry {
    #[must_use]
    pub fn builder() -> UnitRegistryBuilder {
        UnitRegistryBuilder::default()
    }

    #[must_use]
    pub fn units(&self) -> &[RegistrationUnit] {
        &self.units
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegistrationUnit> {
        self.units.iter().find(|u| u.name() == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Every tag carried by some unit, sorted and de-duplicated.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> =
            self.units.iter().flat_map(|u| u.tags().iter().map(String::as_str)).collect();
        tags.sort_unstable();
        tags.dedup();
        tags
    }

    fn carrying<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a RegistrationUnit> + 'a {
        self.units.iter().filter(move |u| u.has_tag(tag))
    }

    /// Execution order for `tags`; an empty slice selects every unit.
    ///
    /// Units are visited by name; each unit's dependencies come before it and no
    /// unit appears twice.
    ///
    /// # Errors
    /// [`RegistryError::UnknownTag`] when a requested tag is carried by no unit.
    pub fn plan(&self, tags: &[&str]) -> Result<Vec<&RegistrationUnit>, RegistryError> {
        if let Some(tag) = tags.iter().find(|tag| self.carrying(tag).next().is_none()) {
            return Err(RegistryError::UnknownTag { tag: (*tag).to_owned(), context: None });
        }

        let mut seen = FxHashSet::default();
        let mut order = Vec::with_capacity(self.units.len());
        for unit in &self.units {
            if tags.is_empty() || tags.iter().any(|tag| unit.has_tag(tag)) {
                self.visit(unit, &mut seen, &mut order);
            }
        }

        debug!(requested = ?tags, planned = order.len(), "Plan computed");
        Ok(order)
    }

    fn visit<'a>(
        &'a self,
        unit: &'a RegistrationUnit,
        seen: &mut FxHashSet<&'a str>,
        order: &mut Vec<&'a RegistrationUnit>,
    ) {
        if !seen.insert(unit.name()) {
            return;
        }
        for tag in unit.dependencies() {
            for dependency in self.carrying(tag) {
                self.visit(dependency, seen, order);
            }
        }
        order.push(unit);
    }
}

#[derive(Debug, Default)]
pub struct UnitRegistryBuilder {
    units: Vec<RegistrationUnit>,
}

impl UnitRegistryBuilder {
    #[must_use]
    pub fn register(mut self, unit: RegistrationUnit) -> Self {
        self.units.push(unit);
        self
    }

    #[must_use]
    pub fn register_all(mut self, units: impl IntoIterator<Item = RegistrationUnit>) -> Self {
        self.units.extend(units);
        self
    }

    /// Validates names and the dependency graph.
    ///
    /// # Errors
    /// - [`RegistryError::InvalidUnit`] for an empty name.
    /// - [`RegistryError::DuplicateUnit`] when two units share a name.
    /// - [`RegistryError::UnknownDependency`] when a dependency tag has no carrier.
    /// - [`RegistryError::DependencyCycle`] when units transitively depend on themselves.
    pub fn build(self) -> Result<UnitRegistry, RegistryError> {
        let mut units = self.units;
        units.sort_by(|a, b| a.name().cmp(b.name()));

        if units.iter().any(|u| u.name().trim().is_empty()) {
            return Err(RegistryError::InvalidUnit { message: "empty unit name".into(), context: None });
        }
        if let Some(pair) = units.windows(2).find(|pair| pair[0].name() == pair[1].name()) {
            return Err(RegistryError::DuplicateUnit { name: pair[0].name().to_owned(), context: None });
        }

        let registry = UnitRegistry { units };
        for unit in &registry.units {
            if let Some(tag) = unit.dependencies().iter().find(|tag| registry.carrying(tag).next().is_none()) {
                return Err(RegistryError::UnknownDependency {
                    unit: unit.name().to_owned(),
                    tag: tag.clone(),
                    context: None,
                });
            }
        }

        let mut done = FxHashSet::default();
        for unit in &registry.units {
            let mut path = Vec::new();
            find_cycle(&registry, unit, &mut path, &mut done)?;
        }

        Ok(registry)
    }
}

fn find_cycle<'a>(
    registry: &'a UnitRegistry,
    unit: &'a RegistrationUnit,
    path: &mut Vec<&'a str>,
    done: &mut FxHashSet<&'a str>,
) -> Result<(), RegistryError> {
    if done.contains(unit.name()) {
        return Ok(());
    }
    if let Some(start) = path.iter().position(|name| *name == unit.name()) {
        let mut cycle = path[start..].to_vec();
        cycle.push(unit.name());
        return Err(RegistryError::DependencyCycle { path: cycle.join(" -> "), context: None });
    }

    path.push(unit.name());
    for tag in unit.dependencies() {
        for dependency in registry.carrying(tag) {
            find_cycle(registry, dependency, path, done)?;
        }
    }
    path.pop();
    done.insert(unit.name());
    Ok(())
}
