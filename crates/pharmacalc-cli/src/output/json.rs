use pharmacalc_core::error::PharmacalcError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), PharmacalcError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
