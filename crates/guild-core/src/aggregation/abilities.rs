//! Spell-slot parsing and positional ability grouping
//!
//! Upstream game data describes the spells an item grants as either a single
//! slot object or a list of them, optionally wrapped in `{"slot": ...}`. Each
//! slot names its spell under `spell."@uniquename"` or directly under
//! `"@uniquename"`. The raw value is parsed once into [`SpellSlots`] and every
//! later step works on that normalized shape.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use crate::entities::Spell;

const UNIQUE_NAME_KEY: &str = "@uniquename";

/// Number of spells in the Q group
const Q_SLOTS: usize = 3;
/// Number of spells in the W group
const W_SLOTS: usize = 3;
/// Position of the single E spell
const E_POSITION: usize = Q_SLOTS + W_SLOTS;

/// One upstream spell slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpellSlot {
    nested: Option<String>,
    direct: Option<String>,
}

impl SpellSlot {
    pub fn new(nested: Option<String>, direct: Option<String>) -> Self {
        Self { nested, direct }
    }

    /// Parse a slot object; non-objects are not slots
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let nested = object
            .get("spell")
            .and_then(|spell| spell.get(UNIQUE_NAME_KEY))
            .and_then(non_empty_str);
        let direct = object.get(UNIQUE_NAME_KEY).and_then(non_empty_str);
        Some(Self { nested, direct })
    }

    /// Spell id of this slot, preferring the nested reference
    pub fn spell_id(&self) -> Option<&str> {
        self.nested.as_deref().or(self.direct.as_deref())
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Normalized spell-slot payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SpellSlots {
    #[default]
    Empty,
    Single(SpellSlot),
    List(Vec<SpellSlot>),
}

impl SpellSlots {
    /// Parse raw item data; anything unrecognized yields `Empty`
    pub fn parse(raw: Option<&Value>) -> Self {
        let Some(raw) = raw else {
            return Self::Empty;
        };
        let slots = raw.get("slot").unwrap_or(raw);
        match slots {
            Value::Array(values) => Self::List(values.iter().filter_map(SpellSlot::from_value).collect()),
            Value::Object(_) => SpellSlot::from_value(slots).map_or(Self::Empty, Self::Single),
            _ => Self::Empty,
        }
    }

    /// View as a list, a single slot being a list of one
    pub fn as_slice(&self) -> &[SpellSlot] {
        match self {
            Self::Empty => &[],
            Self::Single(slot) => std::slice::from_ref(slot),
            Self::List(slots) => slots,
        }
    }

    /// Distinct spell ids in first-seen order
    pub fn spell_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for id in self.as_slice().iter().filter_map(SpellSlot::spell_id) {
            if seen.insert(id) {
                ordered.push(id.to_string());
            }
        }
        ordered
    }
}

/// Spells of an item grouped by ability key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbilityGroups {
    pub q: Vec<Spell>,
    pub w: Vec<Spell>,
    pub e: Vec<Spell>,
    pub passive: Vec<Spell>,
}

impl AbilityGroups {
    pub fn is_empty(&self) -> bool {
        self.q.is_empty() && self.w.is_empty() && self.e.is_empty() && self.passive.is_empty()
    }

    pub fn len(&self) -> usize {
        self.q.len() + self.w.len() + self.e.len() + self.passive.len()
    }
}

// An item without resolvable spells serializes as `{}` rather than four
// empty arrays; clients test for the presence of the keys.
impl Serialize for AbilityGroups {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_empty() {
            return serializer.serialize_map(Some(0))?.end();
        }
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("Q", &self.q)?;
        map.serialize_entry("W", &self.w)?;
        map.serialize_entry("E", &self.e)?;
        map.serialize_entry("Passive", &self.passive)?;
        map.end()
    }
}

/// Group fetched spells by the position of their id in `ordered_ids`
///
/// Ids without a matching spell are dropped before positions are assigned,
/// so the first three resolved spells always land in Q.
pub fn group_abilities(ordered_ids: &[String], spells: Vec<Spell>) -> AbilityGroups {
    let mut by_id: HashMap<String, Spell> =
        spells.into_iter().map(|spell| (spell.id.clone(), spell)).collect();

    let mut groups = AbilityGroups::default();
    let resolved = ordered_ids.iter().filter_map(|id| by_id.remove(id));
    for (position, spell) in resolved.enumerate() {
        match position {
            p if p < Q_SLOTS => groups.q.push(spell),
            p if p < E_POSITION => groups.w.push(spell),
            E_POSITION => groups.e.push(spell),
            _ => groups.passive.push(spell),
        }
    }
    groups
}
