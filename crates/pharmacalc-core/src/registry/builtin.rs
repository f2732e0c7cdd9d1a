use crate::error::PharmacalcError;
use crate::registry::schema::RegistryDef;
use std::sync::LazyLock;

const COMPATIBILITY_JSON: &str = include_str!("../../../../rules/compatibility.json");

static DEFAULT_REGISTRY: LazyLock<RegistryDef> = LazyLock::new(|| {
    let registry: RegistryDef =
        serde_json::from_str(COMPATIBILITY_JSON).expect("embedded compatibility.json is valid");
    super::validate_registry(&registry).expect("embedded compatibility.json is well-formed");
    registry
});

/// Available predefined registries.
pub const PRESETS: &[&str] = &["default"];

/// The built-in drug-excipient compatibility registry.
pub fn default_registry() -> &'static RegistryDef {
    &DEFAULT_REGISTRY
}

/// Load a predefined registry by name.
pub fn load_preset(name: &str) -> Result<RegistryDef, PharmacalcError> {
    match name {
        "default" => Ok(default_registry().clone()),
        _ => Err(PharmacalcError::RegistryInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
