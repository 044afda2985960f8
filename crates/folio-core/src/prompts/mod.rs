pub mod builtin;

use crate::entity::canonical_type;
use crate::error::FolioError;
use indexmap::IndexMap;

const EXAMPLE_SEPARATOR: &str = "\n\nEXEMPLO DE SAÍDA:\n";

/// A ready-to-send prompt pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub system: String,
    pub user: String,
}

#[derive(Debug, Clone)]
struct Template {
    instruction: String,
    example: Option<String>,
}

/// Instruction templates keyed by entity type.
#[derive(Debug, Clone)]
pub struct PromptBook {
    system: String,
    templates: IndexMap<String, Template>,
    fallbacks: IndexMap<String, String>,
}

impl PromptBook {
    pub fn new(system: &str) -> Self {
        PromptBook {
            system: system.trim_end().to_string(),
            templates: IndexMap::new(),
            fallbacks: IndexMap::new(),
        }
    }

    pub fn add_template(&mut self, entity_type: &str, instruction: &str, example: Option<&str>) {
        self.templates.insert(
            entity_type.to_string(),
            Template {
                instruction: instruction.to_string(),
                example: example
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .map(str::to_string),
            },
        );
    }

    /// Make `alias` use the template of `target`.
    pub fn add_fallback(&mut self, alias: &str, target: &str) {
        self.fallbacks.insert(alias.to_string(), target.to_string());
    }

    /// Types with their own template, in registration order.
    pub fn entity_types(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    /// Name of the template used for `entity_type`.
    ///
    /// The fallback table is consulted first, so `poderes_tormenta` resolves
    /// to `poderes`.
    pub fn resolve(&self, entity_type: &str) -> Result<&str, FolioError> {
        let tag = canonical_type(entity_type);
        let target = self.fallbacks.get(&tag).unwrap_or(&tag);
        self.templates
            .get_key_value(target)
            .map(|(key, _)| key.as_str())
            .ok_or_else(|| FolioError::UnknownEntityType {
                requested: entity_type.to_string(),
                known: self.templates.keys().cloned().collect(),
            })
    }

    /// Build the prompt for one entity's text.
    pub fn build(&self, entity_type: &str, content: &str) -> Result<PromptRequest, FolioError> {
        let key = self.resolve(entity_type)?;
        let template = &self.templates[key];

        let mut user = String::with_capacity(template.instruction.len() + content.len());
        user.push_str(&template.instruction);
        user.push_str(content);
        if let Some(example) = &template.example {
            user.push_str(EXAMPLE_SEPARATOR);
            user.push_str(example);
        }

        Ok(PromptRequest {
            system: self.system.clone(),
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> PromptBook {
        let mut book = PromptBook::new("Regras gerais.\n");
        book.add_template("racas", "RAÇA:\n", Some("{\"id\": \"hynne\"}\n"));
        book.add_template("poderes", "PODER:\n", None);
        book.add_fallback("poderes_tormenta", "poderes");
        book
    }

    #[test]
    fn test_build_with_example() {
        let req = book().build("racas", "Anão\nConstituição +2").unwrap();
        assert_eq!(req.system, "Regras gerais.");
        assert_eq!(
            req.user,
            "RAÇA:\nAnão\nConstituição +2\n\nEXEMPLO DE SAÍDA:\n{\"id\": \"hynne\"}"
        );
    }

    #[test]
    fn test_build_without_example() {
        let req = book().build("poderes", "Ataque Poderoso").unwrap();
        assert_eq!(req.user, "PODER:\nAtaque Poderoso");
    }

    #[test]
    fn test_fallback_and_alias() {
        let b = book();
        assert_eq!(b.resolve("poderes_tormenta").unwrap(), "poderes");
        assert_eq!(b.resolve("races").unwrap(), "racas");
        assert_eq!(b.resolve("powers").unwrap(), "poderes");
    }

    #[test]
    fn test_unknown_type_lists_known() {
        match book().build("generico", "x") {
            Err(FolioError::UnknownEntityType { requested, known }) => {
                assert_eq!(requested, "generico");
                assert_eq!(known, vec!["racas", "poderes"]);
            }
            other => panic!("expected UnknownEntityType, got {other:?}"),
        }
    }

    #[test]
    fn test_builtin_book_power_subtypes() {
        let b = builtin::builtin_prompts();
        for t in ["poderes_combate", "poderes_destino", "poderes_magia", "poderes_concedidos"] {
            assert_eq!(b.resolve(t).unwrap(), "poderes");
        }
        let req = b.build("racas", "Hynne\nDestreza +2").unwrap();
        assert!(req.user.contains("Hynne\nDestreza +2\n\nEXEMPLO DE SAÍDA:\n{"));
        assert!(req.system.contains("snake_case"));
    }
}
