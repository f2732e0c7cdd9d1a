pub mod assess;
pub mod calc;
pub mod registry;
pub mod tags;

use pharmacalc_core::error::PharmacalcError;
use pharmacalc_core::registry::builtin;
use pharmacalc_core::registry::schema::RegistryDef;
use std::borrow::Cow;
use std::path::Path;

/// The registry named by `--registry`, or the built-in one.
pub(crate) fn resolve_registry(
    file: Option<&Path>,
) -> Result<Cow<'static, RegistryDef>, PharmacalcError> {
    match file {
        Some(path) => {
            let registry = pharmacalc_core::registry::load_registry(path)?;
            tracing::debug!(path = %path.display(), name = %registry.name, "loaded custom registry");
            Ok(Cow::Owned(registry))
        }
        None => Ok(Cow::Borrowed(builtin::default_registry())),
    }
}
