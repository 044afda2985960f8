//! Entity-type tags.
//!
//! Tags are the rulebook's own Portuguese names (`racas`, `magias`, ...).
//! English names are accepted as aliases and resolve to the same tag.

/// Tags with a dedicated prompt, in book order.
pub const ENTITY_TYPES: &[&str] = &[
    "racas",
    "classes",
    "origens",
    "divindades",
    "pericias",
    "magias",
    "poderes",
    "armas",
    "armaduras",
    "itens_gerais",
    "itens_superiores",
    "criaturas",
    "perigos",
    "tesouros",
    "itens_magicos_armas",
    "itens_magicos_armaduras",
    "pocoes_pergaminhos",
    "acessorios",
    "artefatos",
    "condicoes",
];

const ALIASES: &[(&str, &str)] = &[
    ("races", "racas"),
    ("origins", "origens"),
    ("deities", "divindades"),
    ("skills", "pericias"),
    ("spells", "magias"),
    ("powers", "poderes"),
    ("weapons", "armas"),
    ("armor", "armaduras"),
    ("general_items", "itens_gerais"),
    ("superior_items", "itens_superiores"),
    ("creatures", "criaturas"),
    ("hazards", "perigos"),
    ("treasures", "tesouros"),
    ("magic_weapons", "itens_magicos_armas"),
    ("magic_armor", "itens_magicos_armaduras"),
    ("potions_scrolls", "pocoes_pergaminhos"),
    ("accessories", "acessorios"),
    ("artifacts", "artefatos"),
    ("conditions", "condicoes"),
];

/// Resolve a user-supplied tag to its canonical form.
///
/// Case and surrounding whitespace are ignored. Unknown tags are returned
/// lowercased so callers can still report them.
pub fn canonical_type(tag: &str) -> String {
    let tag = tag.trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == tag)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(tag)
}

/// Fields a record must carry beyond `id` and `name`.
pub fn required_fields(entity_type: &str) -> &'static [&'static str] {
    match canonical_type(entity_type).as_str() {
        "racas" => &["attributes", "abilities"],
        "classes" => &["hit_points", "skills"],
        "origens" => &["benefits"],
        "divindades" => &["channel_energy", "granted_powers"],
        "pericias" => &["key_attribute", "uses"],
        "magias" => &["type", "circle"],
        _ => &[],
    }
}
