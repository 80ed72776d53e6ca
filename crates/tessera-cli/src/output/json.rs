use serde::Serialize;
use tessera_core::error::TesseraError;

pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, TesseraError> {
    Ok(serde_json::to_string_pretty(value)?)
}
