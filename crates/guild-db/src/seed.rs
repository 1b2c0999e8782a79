//! Catalog seed data and the upstream spell dump importer

use std::path::Path;

use serde_json::{json, Value};
use tracing::{info, warn};

use guild_core::entities::{Item, ItemCategory, Spell};
use guild_core::error::DomainError;
use guild_core::traits::{ItemRepository, RepoResult, SpellRepository};

const SEED_ITEMS: &[(&str, &str, ItemCategory)] = &[
    ("T4_MAIN_AXE", "Hacha de Batalla de Adepto", ItemCategory::Weapon),
    ("T6_MAIN_CURSEDSTAFF", "Bastón Maldito de Gran Maestro", ItemCategory::Weapon),
    ("T4_HEAD_PLATE_SET1", "Casco de Soldado de Adepto", ItemCategory::Helmet),
    ("T7_HEAD_LEATHER_SET2", "Capucha de Acechador de Anciano", ItemCategory::Helmet),
    ("T5_ARMOR_CLOTH_SET1", "Túnica de Mago de Experto", ItemCategory::Chest),
    ("T8_ARMOR_PLATE_SET3", "Armadura de Demonio de Anciano", ItemCategory::Chest),
    ("T4_SHOES_LEATHER_SET1", "Zapatos de Mercenario de Adepto", ItemCategory::Boots),
    ("T4_OFF_SHIELD", "Escudo de Adepto", ItemCategory::Offhand),
    ("T4_CAPE_THETFORD", "Capa de Thetford de Adepto", ItemCategory::Cape),
    ("T6_POTION_HEAL", "Poción de Curación de Gran Maestro", ItemCategory::Potion),
    ("T7_MEAL_STEW", "Estofado de Ternera de Anciano", ItemCategory::Food),
];

/// (unique name, ui sprite)
const SEED_SPELLS: &[(&str, &str)] = &[
    ("AXE_CLEAVE", "AXE_CLEAVE"),
    ("AXE_RENDINGSTRIKE", "AXE_RENDINGSTRIKE"),
    ("AXE_BLEEDINGSTRIKE", "AXE_BLEEDINGSTRIKE"),
    ("AXE_WHIRLWIND", "AXE_WHIRLWIND"),
    ("AXE_ADRENALINEBOOST", "AXE_ADRENALINEBOOST"),
    ("AXE_INTERRUPTSTRIKE", "AXE_INTERRUPTSTRIKE"),
    ("AXE_BLOODLUST", "AXE_BLOODLUST"),
    ("PASSIVE_BLOODTHIRST", "PASSIVE_BLOODTHIRST"),
    ("CURSEDSTAFF_CURSE", "CURSEDSTAFF_CURSE"),
    ("CURSEDSTAFF_LIFECURSE", "CURSEDSTAFF_LIFECURSE"),
    ("CURSEDSTAFF_DEMONICFIRE", "CURSEDSTAFF_DEMONICFIRE"),
];

/// Raw spell-slot documents in the shape the game data export uses
fn seed_spell_slots(item_id: &str) -> Option<Value> {
    match item_id {
        "T4_MAIN_AXE" => Some(json!({
            "slot": [
                { "spell": { "@uniquename": "AXE_CLEAVE" } },
                { "spell": { "@uniquename": "AXE_RENDINGSTRIKE" } },
                { "@uniquename": "AXE_BLEEDINGSTRIKE" },
                { "spell": { "@uniquename": "AXE_WHIRLWIND" } },
                { "spell": { "@uniquename": "AXE_ADRENALINEBOOST" } },
                { "spell": { "@uniquename": "AXE_INTERRUPTSTRIKE" } },
                { "spell": { "@uniquename": "AXE_BLOODLUST" } },
                { "spell": { "@uniquename": "PASSIVE_BLOODTHIRST" } }
            ]
        })),
        "T6_MAIN_CURSEDSTAFF" => Some(json!({
            "slot": [
                { "spell": { "@uniquename": "CURSEDSTAFF_CURSE" } },
                { "spell": { "@uniquename": "CURSEDSTAFF_LIFECURSE" } },
                { "spell": { "@uniquename": "CURSEDSTAFF_DEMONICFIRE" } }
            ]
        })),
        _ => None,
    }
}

/// Items of the built-in catalog
pub fn seed_items() -> Vec<Item> {
    SEED_ITEMS
        .iter()
        .map(|&(id, name, category)| {
            let item = Item::new(id, name, category);
            match seed_spell_slots(id) {
                Some(slots) => item.with_spell_slots(slots),
                None => item,
            }
        })
        .collect()
}

/// Spells referenced by the built-in catalog
pub fn seed_spells() -> Vec<Spell> {
    SEED_SPELLS
        .iter()
        .map(|&(id, sprite)| Spell::from_upstream(id, sprite))
        .collect()
}

/// Upsert the built-in catalog into the given stores
pub async fn seed_catalog(
    items: &dyn ItemRepository,
    spells: &dyn SpellRepository,
) -> RepoResult<(usize, usize)> {
    let seed_items = seed_items();
    for item in &seed_items {
        items.upsert(item).await?;
    }
    let seed_spells = seed_spells();
    for spell in &seed_spells {
        spells.upsert(spell).await?;
    }
    info!(
        items = seed_items.len(),
        spells = seed_spells.len(),
        "Catalog seeded"
    );
    Ok((seed_items.len(), seed_spells.len()))
}

/// Extract spells from the game's `spells.json` export
///
/// Entries live under `activespell` and `passivespell`, either below a
/// top-level `spells` key or directly on the root. Entries lacking a unique
/// name or sprite are skipped.
pub fn parse_spell_dump(dump: &Value) -> Vec<Spell> {
    let container = dump.get("spells").unwrap_or(dump);

    ["activespell", "passivespell"]
        .iter()
        .filter_map(|section| match container.get(*section) {
            Some(Value::Array(entries)) => Some(entries),
            Some(_) => {
                warn!(section, "Spell section is not an array, skipping");
                None
            }
            None => None,
        })
        .flatten()
        .filter_map(|entry| {
            let unique_name = entry.get("@uniquename")?.as_str()?;
            let sprite = entry.get("@uisprite")?.as_str()?;
            if unique_name.is_empty() || sprite.is_empty() {
                return None;
            }
            Some(Spell::from_upstream(unique_name, sprite))
        })
        .collect()
}

/// Read a spell dump file and upsert every spell it contains
pub async fn import_spell_file(path: &Path, spells: &dyn SpellRepository) -> RepoResult<usize> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        DomainError::InternalError(format!("Failed to read {}: {e}", path.display()))
    })?;
    let dump: Value = serde_json::from_str(&raw).map_err(|e| {
        DomainError::ValidationError(format!("Invalid spell dump {}: {e}", path.display()))
    })?;

    let parsed = parse_spell_dump(&dump);
    for spell in &parsed {
        spells.upsert(spell).await?;
    }
    info!(path = %path.display(), spells = parsed.len(), "Spell dump imported");
    Ok(parsed.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use guild_core::aggregation::SpellSlots;

    #[test]
    fn test_seed_items_cover_every_category() {
        let items = seed_items();
        assert_eq!(items.len(), 11);
        for category in ItemCategory::ALL {
            assert!(items.iter().any(|i| i.category == category), "{category}");
        }
    }

    #[test]
    fn test_seed_spell_slots_resolve_to_seed_spells() {
        let spells = seed_spells();
        for item in seed_items() {
            let ids = SpellSlots::parse(item.spell_slots.as_ref()).spell_ids();
            for id in ids {
                assert!(spells.iter().any(|s| s.id == id), "{id} missing");
            }
        }
    }

    #[test]
    fn test_parse_spell_dump_nested_container() {
        let dump = json!({
            "spells": {
                "activespell": [
                    { "@uniquename": "FIREBALL", "@uisprite": "FIREBALL_ICON" },
                    { "@uniquename": "NO_SPRITE" }
                ],
                "passivespell": [
                    { "@uniquename": "TOUGH", "@uisprite": "TOUGH_ICON" }
                ]
            }
        });
        let spells = parse_spell_dump(&dump);
        assert_eq!(spells.len(), 2);
        assert_eq!(spells[0].id, "FIREBALL");
        assert_eq!(spells[0].name, "FIREBALL");
        assert_eq!(
            spells[0].icon_url,
            "https://render.albiononline.com/v1/spell/FIREBALL_ICON"
        );
    }

    #[test]
    fn test_parse_spell_dump_root_container() {
        let dump = json!({
            "activespell": [{ "@uniquename": "A", "@uisprite": "A" }],
            "passivespell": { "@uniquename": "B", "@uisprite": "B" }
        });
        let spells = parse_spell_dump(&dump);
        assert_eq!(spells.len(), 1);
        assert_eq!(spells[0].id, "A");
    }
}
