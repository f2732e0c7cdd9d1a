use pharmacalc_core::error::PharmacalcError;
use pharmacalc_core::selection::SelectionState;
use std::path::PathBuf;

use crate::output;

/// Tag ids given on the command line, one list per category.
pub struct TagArgs {
    pub drug_groups: Vec<String>,
    pub excipients: Vec<String>,
    pub factors: Vec<String>,
}

pub fn run(
    mut tags: TagArgs,
    input_file: Option<PathBuf>,
    registry_file: Option<PathBuf>,
    output_format: &str,
    verbose: bool,
) -> Result<(), PharmacalcError> {
    let registry = super::resolve_registry(registry_file.as_deref())?;

    // A selection file is merged with any ids given as flags
    if let Some(path) = input_file {
        let json = std::fs::read_to_string(&path)?;
        let from_file: SelectionState = serde_json::from_str(&json)?;
        tags.drug_groups.extend(from_file.drug_groups);
        tags.excipients.extend(from_file.excipients);
        tags.factors.extend(from_file.factors);
    }

    let selection = pharmacalc_core::build_selection(
        &registry,
        &tags.drug_groups,
        &tags.excipients,
        &tags.factors,
    )?;
    let result = pharmacalc_core::assess::evaluate(&selection, &registry)?;

    match output_format {
        "json" => output::json::print(&result)?,
        "table" => output::table::print_assessment(&result, &registry, verbose),
        other => {
            return Err(PharmacalcError::invalid_input(
                "output",
                other,
                "expected 'table' or 'json'",
            ))
        }
    }

    Ok(())
}
