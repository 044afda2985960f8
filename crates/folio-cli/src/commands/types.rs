use folio_core::entity::ENTITY_TYPES;
use folio_core::error::FolioError;
use folio_core::prompts::builtin::builtin_prompts;
use std::path::Path;

use super::load_registry;

pub fn run(patterns: Option<&Path>) -> Result<(), FolioError> {
    let registry = load_registry(patterns)?;
    let prompts = builtin_prompts();

    println!("Pattern set: {}\n", registry.name());
    println!("  {:<26} {:<9} PROMPT", "TYPE", "PATTERN");

    let mut listed: Vec<&str> = ENTITY_TYPES.to_vec();
    for t in registry.entity_types() {
        if !listed.contains(&t) {
            listed.push(t);
        }
    }

    for t in listed {
        let pattern = if registry.contains(t) {
            "yes"
        } else {
            "fallback"
        };
        let prompt = match prompts.resolve(t) {
            Ok(key) if key == t => "yes".to_string(),
            Ok(key) => format!("-> {}", key),
            Err(_) => "none".to_string(),
        };
        println!("  {:<26} {:<9} {}", t, pattern, prompt);
    }

    println!(
        "\nEnglish names are accepted too (races, spells, creatures, ...). Unmatched types use the '{}' pattern.",
        registry.fallback_type()
    );
    Ok(())
}
