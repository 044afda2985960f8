use crate::error::FolioError;
use crate::patterns::schema::PatternSetDef;
use crate::patterns::PatternRegistry;

const TORMENTA20_JSON: &str = include_str!("../../../../patterns/tormenta20.json");

/// Available predefined pattern sets.
pub const PRESETS: &[&str] = &["tormenta20"];

/// Load a predefined pattern set definition by name.
pub fn load_preset_def(name: &str) -> Result<PatternSetDef, FolioError> {
    match name {
        "tormenta20" => Ok(serde_json::from_str(TORMENTA20_JSON)?),
        _ => Err(FolioError::PatternInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// Load and compile a predefined pattern set.
pub fn load_preset(name: &str) -> Result<PatternRegistry, FolioError> {
    PatternRegistry::compile(&load_preset_def(name)?)
}
