use crate::prompts::PromptBook;

const SYSTEM: &str = include_str!("../../../../prompts/system.txt");

/// `(entity type, instruction template, worked example)`.
const TEMPLATES: &[(&str, &str, Option<&str>)] = &[
    ("racas", include_str!("../../../../prompts/racas.txt"), Some(include_str!("../../../../prompts/racas.example.json"))),
    ("classes", include_str!("../../../../prompts/classes.txt"), None),
    ("origens", include_str!("../../../../prompts/origens.txt"), None),
    ("divindades", include_str!("../../../../prompts/divindades.txt"), None),
    ("pericias", include_str!("../../../../prompts/pericias.txt"), None),
    ("magias", include_str!("../../../../prompts/magias.txt"), None),
    ("poderes", include_str!("../../../../prompts/poderes.txt"), None),
    ("armas", include_str!("../../../../prompts/armas.txt"), None),
    ("armaduras", include_str!("../../../../prompts/armaduras.txt"), None),
    ("itens_gerais", include_str!("../../../../prompts/itens_gerais.txt"), None),
    ("itens_superiores", include_str!("../../../../prompts/itens_superiores.txt"), None),
    ("criaturas", include_str!("../../../../prompts/criaturas.txt"), None),
    ("perigos", include_str!("../../../../prompts/perigos.txt"), None),
    ("tesouros", include_str!("../../../../prompts/tesouros.txt"), None),
    ("itens_magicos_armas", include_str!("../../../../prompts/itens_magicos_armas.txt"), None),
    ("itens_magicos_armaduras", include_str!("../../../../prompts/itens_magicos_armaduras.txt"), None),
    ("pocoes_pergaminhos", include_str!("../../../../prompts/pocoes_pergaminhos.txt"), None),
    ("acessorios", include_str!("../../../../prompts/acessorios.txt"), None),
    ("artefatos", include_str!("../../../../prompts/artefatos.txt"), None),
    ("condicoes", include_str!("../../../../prompts/condicoes.txt"), None),
];

/// Prompt types that share another type's template.
const FALLBACKS: &[(&str, &str)] = &[
    ("poderes_combate", "poderes"),
    ("poderes_destino", "poderes"),
    ("poderes_magia", "poderes"),
    ("poderes_concedidos", "poderes"),
    ("poderes_tormenta", "poderes"),
];

/// The prompt book shipped with the crate.
pub fn builtin_prompts() -> PromptBook {
    let mut book = PromptBook::new(SYSTEM);
    for (entity_type, template, example) in TEMPLATES {
        book.add_template(entity_type, template, *example);
    }
    for (alias, target) in FALLBACKS {
        book.add_fallback(alias, target);
    }
    book
}
