//! The monster sheet and the pure mutations applied to it.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// A named ability, special attack or spell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub desc: String,
}

impl Entry {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: String::new(),
            desc: String::new(),
        }
    }

    pub fn is_displayed(&self) -> bool {
        !self.name.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum EntryList {
    Abilities,
    SpecialAttacks,
    Spells,
}

impl EntryList {
    pub const ALL: [EntryList; 3] = [
        EntryList::Abilities,
        EntryList::SpecialAttacks,
        EntryList::Spells,
    ];
}

/// Scalar fields editable from the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    Name,
    SizeType,
    Hp,
    Defense,
    Speed,
    Damage,
    Body,
    Mind,
    Magic,
}

impl RecordField {
    pub const ALL: [RecordField; 9] = [
        RecordField::Name,
        RecordField::SizeType,
        RecordField::Hp,
        RecordField::Defense,
        RecordField::Speed,
        RecordField::Damage,
        RecordField::Body,
        RecordField::Mind,
        RecordField::Magic,
    ];

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            RecordField::Hp
                | RecordField::Defense
                | RecordField::Speed
                | RecordField::Body
                | RecordField::Mind
                | RecordField::Magic
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MonsterRecord {
    pub name: String,
    pub size_type: String,
    #[serde(with = "stat")]
    #[schemars(with = "Option<i64>")]
    pub hp: Option<i64>,
    #[serde(with = "stat")]
    #[schemars(with = "Option<i64>")]
    pub defense: Option<i64>,
    #[serde(with = "stat")]
    #[schemars(with = "Option<i64>")]
    pub speed: Option<i64>,
    pub damage: String,
    #[serde(with = "stat")]
    #[schemars(with = "Option<i64>")]
    pub body: Option<i64>,
    #[serde(with = "stat")]
    #[schemars(with = "Option<i64>")]
    pub mind: Option<i64>,
    #[serde(with = "stat")]
    #[schemars(with = "Option<i64>")]
    pub magic: Option<i64>,
    pub abilities: Vec<Entry>,
    pub special_attacks: Vec<Entry>,
    pub spells: Vec<Entry>,
    pub has_abilities: bool,
    pub has_special_attacks: bool,
    pub has_spells: bool,
}

impl MonsterRecord {
    pub fn apply(&mut self, patch: MonsterPatch) {
        let MonsterPatch {
            name,
            size_type,
            hp,
            defense,
            speed,
            damage,
            body,
            mind,
            magic,
            has_abilities,
            has_special_attacks,
            has_spells,
        } = patch;

        if let Some(value) = name {
            self.name = value;
        }
        if let Some(value) = size_type {
            self.size_type = value;
        }
        if let Some(value) = damage {
            self.damage = value;
        }
        for (slot, value) in [
            (&mut self.hp, hp),
            (&mut self.defense, defense),
            (&mut self.speed, speed),
            (&mut self.body, body),
            (&mut self.mind, mind),
            (&mut self.magic, magic),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
        for (slot, value) in [
            (&mut self.has_abilities, has_abilities),
            (&mut self.has_special_attacks, has_special_attacks),
            (&mut self.has_spells, has_spells),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }

    /// Raw text of a field as the form shows it; empty numbers are empty strings.
    pub fn field_text(&self, field: RecordField) -> String {
        match field {
            RecordField::Name => self.name.clone(),
            RecordField::SizeType => self.size_type.clone(),
            RecordField::Damage => self.damage.clone(),
            numeric => self
                .stat(numeric)
                .map(|value| value.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn stat(&self, field: RecordField) -> Option<i64> {
        match field {
            RecordField::Hp => self.hp,
            RecordField::Defense => self.defense,
            RecordField::Speed => self.speed,
            RecordField::Body => self.body,
            RecordField::Mind => self.mind,
            RecordField::Magic => self.magic,
            RecordField::Name | RecordField::SizeType | RecordField::Damage => None,
        }
    }

    pub fn entries(&self, list: EntryList) -> &[Entry] {
        match list {
            EntryList::Abilities => &self.abilities,
            EntryList::SpecialAttacks => &self.special_attacks,
            EntryList::Spells => &self.spells,
        }
    }

    pub fn entries_mut(&mut self, list: EntryList) -> &mut Vec<Entry> {
        match list {
            EntryList::Abilities => &mut self.abilities,
            EntryList::SpecialAttacks => &mut self.special_attacks,
            EntryList::Spells => &mut self.spells,
        }
    }

    pub fn add_entry(&mut self, list: EntryList) -> String {
        let entry = Entry::new();
        let id = entry.id.clone();
        self.entries_mut(list).push(entry);
        id
    }

    /// Returns false when no entry has `id`.
    pub fn update_entry(&mut self, list: EntryList, id: &str, patch: EntryPatch) -> bool {
        let Some(entry) = self.entries_mut(list).iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if let Some(name) = patch.name {
            entry.name = name;
        }
        if let Some(desc) = patch.desc {
            entry.desc = desc;
        }
        true
    }

    pub fn remove_entry(&mut self, list: EntryList, id: &str) -> bool {
        let entries = self.entries_mut(list);
        let before = entries.len();
        entries.retain(|e| e.id != id);
        entries.len() != before
    }

    pub fn section_enabled(&self, list: EntryList) -> bool {
        match list {
            EntryList::Abilities => self.has_abilities,
            EntryList::SpecialAttacks => self.has_special_attacks,
            EntryList::Spells => self.has_spells,
        }
    }

    pub fn set_section_enabled(&mut self, list: EntryList, enabled: bool) {
        match list {
            EntryList::Abilities => self.has_abilities = enabled,
            EntryList::SpecialAttacks => self.has_special_attacks = enabled,
            EntryList::Spells => self.has_spells = enabled,
        }
    }

    /// A section reaches the card only when enabled and non-empty.
    pub fn is_section_shown(&self, list: EntryList) -> bool {
        self.section_enabled(list) && !self.entries(list).is_empty()
    }
}

/// Partial update of the scalar fields. Numeric fields use a nested option
/// so a patch can clear them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MonsterPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    #[schemars(with = "Option<i64>")]
    pub hp: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    #[schemars(with = "Option<i64>")]
    pub defense: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    #[schemars(with = "Option<i64>")]
    pub speed: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    #[schemars(with = "Option<i64>")]
    pub body: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    #[schemars(with = "Option<i64>")]
    pub mind: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    #[schemars(with = "Option<i64>")]
    pub magic: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_abilities: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_special_attacks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_spells: Option<bool>,
}

impl MonsterPatch {
    pub fn name(value: impl Into<String>) -> Self {
        Self {
            name: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn section(list: EntryList, enabled: bool) -> Self {
        let mut patch = Self::default();
        match list {
            EntryList::Abilities => patch.has_abilities = Some(enabled),
            EntryList::SpecialAttacks => patch.has_special_attacks = Some(enabled),
            EntryList::Spells => patch.has_spells = Some(enabled),
        }
        patch
    }

    /// Builds a patch from form text. Numeric fields take an integer or
    /// nothing; any other text yields `None` and the edit is dropped.
    pub fn from_text(field: RecordField, text: &str) -> Option<Self> {
        let mut patch = Self::default();
        if field.is_numeric() {
            let value = parse_stat(text)?;
            let slot = match field {
                RecordField::Hp => &mut patch.hp,
                RecordField::Defense => &mut patch.defense,
                RecordField::Speed => &mut patch.speed,
                RecordField::Body => &mut patch.body,
                RecordField::Mind => &mut patch.mind,
                _ => &mut patch.magic,
            };
            *slot = Some(value);
            return Some(patch);
        }
        let text = text.to_string();
        match field {
            RecordField::Name => patch.name = Some(text),
            RecordField::SizeType => patch.size_type = Some(text),
            _ => patch.damage = Some(text),
        }
        Some(patch)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl EntryPatch {
    pub fn name(value: impl Into<String>) -> Self {
        Self {
            name: Some(value.into()),
            desc: None,
        }
    }

    pub fn desc(value: impl Into<String>) -> Self {
        Self {
            name: None,
            desc: Some(value.into()),
        }
    }
}

/// A sign typed ahead of the digits; not a value yet.
pub fn is_partial_stat(text: &str) -> bool {
    matches!(text.trim(), "-" | "+")
}

/// `Some(None)` for blank input, `None` when the text is not a number.
pub fn parse_stat(text: &str) -> Option<Option<i64>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(None);
    }
    trimmed.parse::<i64>().ok().map(Some)
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Snapshot encoding of numeric-or-empty fields: a number, or `""` when empty.
mod stat {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_i64(*value),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|f| f.trunc() as i64))
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("unsupported number {number}"))),
            Value::String(text) => super::parse_stat(&text)
                .ok_or_else(|| D::Error::custom(format!("expected a number, got {text:?}"))),
            other => Err(D::Error::custom(format!("expected a number, got {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn snapshot_uses_camel_case_and_empty_strings() {
        let record = MonsterRecord {
            name: "Xaracol".into(),
            hp: Some(12),
            has_abilities: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["name"], "Xaracol");
        assert_eq!(json["hp"], 12);
        assert_eq!(json["defense"], "");
        assert_eq!(json["sizeType"], "");
        assert_eq!(json["hasAbilities"], true);
        assert!(json["specialAttacks"].is_array());
    }

    #[test]
    fn snapshot_accepts_numbers_strings_and_missing_fields() {
        let record: MonsterRecord = serde_json::from_str(
            r#"{"name":"Goblin","hp":"7","defense":"","speed":30,"body":2.0}"#,
        )
        .expect("parse");
        assert_eq!(record.name, "Goblin");
        assert_eq!(record.hp, Some(7));
        assert_eq!(record.defense, None);
        assert_eq!(record.speed, Some(30));
        assert_eq!(record.body, Some(2));
        assert_eq!(record.mind, None);
        assert!(record.abilities.is_empty());
    }

    #[test]
    fn snapshot_rejects_garbage_numbers() {
        let parsed = serde_json::from_str::<MonsterRecord>(r#"{"hp":"lots"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn entry_mutations_round_trip() {
        let mut record = MonsterRecord::default();
        let id = record.add_entry(EntryList::Spells);
        assert_eq!(record.spells.len(), 1);
        assert_eq!(record.spells[0].name, "");

        assert!(record.update_entry(EntryList::Spells, &id, EntryPatch::name("Fireball")));
        assert_eq!(record.spells[0].name, "Fireball");
        assert!(!record.update_entry(EntryList::Spells, "missing", EntryPatch::desc("x")));
        assert!(!record.update_entry(EntryList::Abilities, &id, EntryPatch::desc("x")));

        assert!(record.remove_entry(EntryList::Spells, &id));
        assert!(!record.remove_entry(EntryList::Spells, &id));
        assert_eq!(record, MonsterRecord::default());
    }

    #[test]
    fn entry_ids_are_unique() {
        let mut record = MonsterRecord::default();
        let a = record.add_entry(EntryList::Abilities);
        let b = record.add_entry(EntryList::Abilities);
        assert_ne!(a, b);
    }

    #[test]
    fn patch_from_text_parses_numbers() {
        let patch = MonsterPatch::from_text(RecordField::Hp, " 15 ").expect("patch");
        assert_eq!(patch.hp, Some(Some(15)));
        let cleared = MonsterPatch::from_text(RecordField::Mind, "").expect("patch");
        assert_eq!(cleared.mind, Some(None));
        assert_eq!(MonsterPatch::from_text(RecordField::Speed, "fast"), None);
        assert_eq!(MonsterPatch::from_text(RecordField::Speed, "-"), None);
        assert!(is_partial_stat(" - "));
        assert!(!is_partial_stat("-4"));

        let mut record = MonsterRecord {
            mind: Some(3),
            ..Default::default()
        };
        record.apply(patch);
        record.apply(cleared);
        record.apply(MonsterPatch::from_text(RecordField::Damage, "2d6").expect("patch"));
        assert_eq!(record.hp, Some(15));
        assert_eq!(record.mind, None);
        assert_eq!(record.damage, "2d6");
        assert_eq!(record.field_text(RecordField::Hp), "15");
        assert_eq!(record.field_text(RecordField::Mind), "");
    }

    #[test]
    fn patch_keeps_cleared_numbers_through_json() {
        let patch = MonsterPatch {
            hp: Some(None),
            ..Default::default()
        };
        let json = serde_json::to_string(&patch).expect("serialize");
        assert_eq!(json, r#"{"hp":null}"#);
        let back: MonsterPatch = serde_json::from_str(&json).expect("parse");
        assert_eq!(back, patch);
    }

    #[test]
    fn section_is_shown_only_when_enabled_and_filled() {
        let mut record = MonsterRecord::default();
        record.add_entry(EntryList::Abilities);
        assert!(!record.is_section_shown(EntryList::Abilities));
        record.apply(MonsterPatch::section(EntryList::Abilities, true));
        assert!(record.is_section_shown(EntryList::Abilities));
        record.set_section_enabled(EntryList::Spells, true);
        assert!(!record.is_section_shown(EntryList::Spells));
    }
}
