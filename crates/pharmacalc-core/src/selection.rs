use crate::error::PharmacalcError;
use crate::model::TagCategory;
use crate::registry::schema::RegistryDef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The tags currently chosen in each category.
///
/// This is the only input to [`crate::assess::evaluate`]; it is never
/// persisted and an assessment is recomputed from it every time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    #[serde(default)]
    pub drug_groups: BTreeSet<String>,
    #[serde(default)]
    pub excipients: BTreeSet<String>,
    #[serde(default)]
    pub factors: BTreeSet<String>,
}

impl SelectionState {
    pub fn set(&self, category: TagCategory) -> &BTreeSet<String> {
        match category {
            TagCategory::DrugFunctionalGroup => &self.drug_groups,
            TagCategory::ExcipientClass => &self.excipients,
            TagCategory::EnvironmentalFactor => &self.factors,
        }
    }

    fn set_mut(&mut self, category: TagCategory) -> &mut BTreeSet<String> {
        match category {
            TagCategory::DrugFunctionalGroup => &mut self.drug_groups,
            TagCategory::ExcipientClass => &mut self.excipients,
            TagCategory::EnvironmentalFactor => &mut self.factors,
        }
    }

    /// True if `id` is selected in any category.
    pub fn contains(&self, id: &str) -> bool {
        TagCategory::ALL.iter().any(|c| self.set(*c).contains(id))
    }

    /// No drug group and no excipient selected. Factors alone do not count.
    pub fn has_no_intrinsic_tags(&self) -> bool {
        self.drug_groups.is_empty() && self.excipients.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.has_no_intrinsic_tags() && self.factors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.drug_groups.len() + self.excipients.len() + self.factors.len()
    }
}

/// Tracks a user's selection against a registry.
pub struct SelectionManager<'a> {
    registry: &'a RegistryDef,
    state: SelectionState,
}

impl<'a> SelectionManager<'a> {
    pub fn new(registry: &'a RegistryDef) -> Self {
        Self {
            registry,
            state: SelectionState::default(),
        }
    }

    /// Add `id` to the category's selection if absent, remove it if present.
    ///
    /// Returns whether the tag is selected afterwards. Fails with
    /// `InvalidTag`, leaving the state untouched, when the registry has no
    /// such tag in that category.
    pub fn toggle(&mut self, category: TagCategory, id: &str) -> Result<bool, PharmacalcError> {
        self.registry.tag_in_category(category, id)?;

        let set = self.state.set_mut(category);
        if set.remove(id) {
            tracing::debug!(%category, id, "deselected tag");
            Ok(false)
        } else {
            set.insert(id.to_string());
            tracing::debug!(%category, id, "selected tag");
            Ok(true)
        }
    }

    /// Select `id` unless it is already selected.
    pub fn select(&mut self, category: TagCategory, id: &str) -> Result<(), PharmacalcError> {
        if !self.state.set(category).contains(id) {
            self.toggle(category, id)?;
        } else {
            self.registry.tag_in_category(category, id)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.state = SelectionState::default();
    }

    pub fn snapshot(&self) -> SelectionState {
        self.state.clone()
    }
}
