pub mod assess;
pub mod error;
pub mod formulas;
pub mod model;
pub mod registry;
pub mod selection;

use assess::AssessmentResult;
use error::PharmacalcError;
use model::TagCategory;
use registry::schema::RegistryDef;
use selection::{SelectionManager, SelectionState};

/// Build a selection from tag ids, validating each against the registry.
///
/// Ids repeated within a category are selected once.
pub fn build_selection<S: AsRef<str>>(
    registry: &RegistryDef,
    drug_groups: &[S],
    excipients: &[S],
    factors: &[S],
) -> Result<SelectionState, PharmacalcError> {
    let mut manager = SelectionManager::new(registry);
    let groups = [
        (TagCategory::DrugFunctionalGroup, drug_groups),
        (TagCategory::ExcipientClass, excipients),
        (TagCategory::EnvironmentalFactor, factors),
    ];
    for (category, ids) in groups {
        for id in ids {
            manager.select(category, id.as_ref().trim())?;
        }
    }
    Ok(manager.snapshot())
}

/// Main API entry point: assess drug groups, excipients and environmental
/// factors given by id against a registry.
pub fn assess_tags<S: AsRef<str>>(
    registry: &RegistryDef,
    drug_groups: &[S],
    excipients: &[S],
    factors: &[S],
) -> Result<AssessmentResult, PharmacalcError> {
    let selection = build_selection(registry, drug_groups, excipients, factors)?;
    assess::evaluate(&selection, registry)
}
