//! Form layout: which rows exist for a given sheet and what each one edits.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;
use crate::monster::{Entry, EntryList, MonsterRecord, RecordField};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum FormField {
    Record(RecordField),
    SectionToggle(EntryList),
    EntryName(EntryList, usize),
    EntryDesc(EntryList, usize),
    AddEntry(EntryList),
}

impl Default for FormField {
    fn default() -> Self {
        FormField::Record(RecordField::Name)
    }
}

impl FormField {
    pub fn is_text(self) -> bool {
        matches!(
            self,
            FormField::Record(_) | FormField::EntryName(..) | FormField::EntryDesc(..)
        )
    }

    pub fn entry(self) -> Option<(EntryList, usize)> {
        match self {
            FormField::EntryName(list, index) | FormField::EntryDesc(list, index) => {
                Some((list, index))
            }
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    BasicInfo,
    Stats,
    Attributes,
    Entries(EntryList),
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::BasicInfo,
        Panel::Stats,
        Panel::Attributes,
        Panel::Entries(EntryList::Abilities),
        Panel::Entries(EntryList::SpecialAttacks),
        Panel::Entries(EntryList::Spells),
    ];

    pub fn title(self, dict: &Dictionary) -> &'static str {
        match self {
            Panel::BasicInfo => dict.basic_info,
            Panel::Stats => dict.stats,
            Panel::Attributes => dict.attributes,
            Panel::Entries(list) => dict.section_title(list),
        }
    }

    pub fn fields(self, record: &MonsterRecord) -> Vec<FormField> {
        let scalars = |fields: &[RecordField]| -> Vec<FormField> {
            fields.iter().map(|f| FormField::Record(*f)).collect()
        };
        match self {
            Panel::BasicInfo => scalars(&[RecordField::Name, RecordField::SizeType]),
            Panel::Stats => scalars(&[
                RecordField::Hp,
                RecordField::Defense,
                RecordField::Speed,
                RecordField::Damage,
            ]),
            Panel::Attributes => {
                scalars(&[RecordField::Body, RecordField::Mind, RecordField::Magic])
            }
            Panel::Entries(list) => {
                let mut fields = vec![FormField::SectionToggle(list)];
                if record.section_enabled(list) {
                    for index in 0..record.entries(list).len() {
                        fields.push(FormField::EntryName(list, index));
                        fields.push(FormField::EntryDesc(list, index));
                    }
                    fields.push(FormField::AddEntry(list));
                }
                fields
            }
        }
    }

    pub fn rows(self, record: &MonsterRecord, dict: &Dictionary) -> Vec<FormRow> {
        self.fields(record)
            .into_iter()
            .map(|field| FormRow::new(field, record, dict))
            .collect()
    }
}

/// Focus order of the whole form.
pub fn form_fields(record: &MonsterRecord) -> Vec<FormField> {
    Panel::ALL
        .into_iter()
        .flat_map(|panel| panel.fields(record))
        .collect()
}

/// Moves a focus that no longer exists onto the nearest surviving row.
pub fn normalize_focus(record: &MonsterRecord, focus: FormField) -> FormField {
    let fields = form_fields(record);
    if fields.contains(&focus) {
        return focus;
    }
    match focus {
        FormField::EntryName(list, index) | FormField::EntryDesc(list, index) => {
            let len = record.entries(list).len();
            if !record.section_enabled(list) {
                FormField::SectionToggle(list)
            } else if len == 0 {
                FormField::AddEntry(list)
            } else {
                FormField::EntryName(list, index.min(len - 1))
            }
        }
        FormField::AddEntry(list) => FormField::SectionToggle(list),
        other => fields.first().copied().unwrap_or(other),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowKind {
    Text,
    Number,
    Toggle(bool),
    Button,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormRow {
    pub field: FormField,
    pub label: String,
    pub value: String,
    pub placeholder: &'static str,
    pub kind: RowKind,
}

impl FormRow {
    pub fn new(field: FormField, record: &MonsterRecord, dict: &Dictionary) -> Self {
        match field {
            FormField::Record(scalar) => {
                let label = dict.field_label(scalar);
                Self {
                    field,
                    label: label.to_string(),
                    value: record.field_text(scalar),
                    placeholder: label,
                    kind: if scalar.is_numeric() {
                        RowKind::Number
                    } else {
                        RowKind::Text
                    },
                }
            }
            FormField::SectionToggle(list) => Self {
                field,
                label: dict.section_toggle(list).to_string(),
                value: String::new(),
                placeholder: "",
                kind: RowKind::Toggle(record.section_enabled(list)),
            },
            FormField::EntryName(list, index) => Self {
                field,
                label: format!("{} {}", index + 1, dict.entry_name(list)),
                value: entry_text(record, list, index, |e| &e.name),
                placeholder: dict.entry_name(list),
                kind: RowKind::Text,
            },
            FormField::EntryDesc(list, index) => Self {
                field,
                label: format!("  {}", dict.entry_desc(list)),
                value: entry_text(record, list, index, |e| &e.desc),
                placeholder: dict.entry_desc(list),
                kind: RowKind::Text,
            },
            FormField::AddEntry(list) => Self {
                field,
                label: format!("+ {}", dict.add_entry(list)),
                value: String::new(),
                placeholder: "",
                kind: RowKind::Button,
            },
        }
    }
}

fn entry_text(
    record: &MonsterRecord,
    list: EntryList,
    index: usize,
    pick: impl Fn(&Entry) -> &String,
) -> String {
    record
        .entries(list)
        .get(index)
        .map(|entry| pick(entry).clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Language;

    #[test]
    fn disabled_sections_hide_their_entries() {
        let mut record = MonsterRecord::default();
        record.add_entry(EntryList::Abilities);
        let fields = form_fields(&record);
        assert_eq!(fields.len(), 9 + 3);
        assert!(!fields.contains(&FormField::EntryName(EntryList::Abilities, 0)));

        record.has_abilities = true;
        let fields = form_fields(&record);
        assert!(fields.contains(&FormField::EntryName(EntryList::Abilities, 0)));
        assert!(fields.contains(&FormField::AddEntry(EntryList::Abilities)));
    }

    #[test]
    fn focus_falls_back_after_removal() {
        let mut record = MonsterRecord {
            has_spells: true,
            ..Default::default()
        };
        record.add_entry(EntryList::Spells);
        record.add_entry(EntryList::Spells);
        let focus = FormField::EntryDesc(EntryList::Spells, 1);
        assert_eq!(normalize_focus(&record, focus), focus);

        record.spells.pop();
        assert_eq!(
            normalize_focus(&record, focus),
            FormField::EntryName(EntryList::Spells, 0)
        );
        record.spells.clear();
        assert_eq!(
            normalize_focus(&record, focus),
            FormField::AddEntry(EntryList::Spells)
        );
        record.has_spells = false;
        assert_eq!(
            normalize_focus(&record, focus),
            FormField::SectionToggle(EntryList::Spells)
        );
    }

    #[test]
    fn rows_carry_labels_and_values() {
        let record = MonsterRecord {
            hp: Some(9),
            ..Default::default()
        };
        let rows = Panel::Stats.rows(&record, Language::En.dictionary());
        assert_eq!(rows[0].label, "HP");
        assert_eq!(rows[0].value, "9");
        assert_eq!(rows[0].kind, RowKind::Number);
        assert_eq!(rows[3].kind, RowKind::Text);

        let rows = Panel::Entries(EntryList::Spells).rows(&record, Language::PtBr.dictionary());
        assert_eq!(rows[0].label, "Tem magias");
        assert_eq!(rows[0].kind, RowKind::Toggle(false));
    }
}
