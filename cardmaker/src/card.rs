//! Turns a monster sheet into the card's content blocks.

use cardlayout::prelude::{Block, CardContent, Column, Rgb, Span, TextBlock, TextStyle};

use crate::dictionary::Dictionary;
use crate::monster::{Entry, EntryList, MonsterRecord, RecordField};

pub const ACCENT: Rgb = Rgb::hex(0xb33a1a);
pub const MUTED: Rgb = Rgb::hex(0x666666);

pub const FALLBACK_NAME: &str = "Monster Name";
pub const FALLBACK_SIZE_TYPE: &str = "Size / Type";
pub const FALLBACK_STAT: &str = "10";
pub const FALLBACK_DAMAGE: &str = "1d6";

const SEPARATOR_SMALL: f32 = 6.0;
const SEPARATOR: f32 = 10.0;
const SEPARATOR_LARGE: f32 = 14.0;
const SEPARATOR_MARGIN_TOP: f32 = 6.0;
const SEPARATOR_MARGIN_BOTTOM: f32 = 4.0;

fn title_style() -> TextStyle {
    TextStyle::new(22.5).bold()
}

fn subtitle_style() -> TextStyle {
    TextStyle::new(11.7).italic().color(MUTED)
}

fn stat_label_style() -> TextStyle {
    TextStyle::new(11.7).bold().color(ACCENT)
}

fn stat_value_style() -> TextStyle {
    TextStyle::new(11.7)
}

fn attribute_label_style() -> TextStyle {
    TextStyle::new(12.7).bold().color(ACCENT).letter_spacing(1.0)
}

fn attribute_value_style() -> TextStyle {
    TextStyle::new(14.9)
}

fn header_style() -> TextStyle {
    TextStyle::new(10.0).bold().color(ACCENT).letter_spacing(0.5)
}

fn entry_name_style() -> TextStyle {
    TextStyle::new(10.0).bold().italic()
}

fn entry_desc_style() -> TextStyle {
    TextStyle::new(10.0).color(MUTED)
}

fn separator(height: f32) -> Block {
    Block::separator(height, SEPARATOR_MARGIN_TOP, SEPARATOR_MARGIN_BOTTOM)
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Card text for a stat; empty and zero numbers fall back to the default value.
pub fn stat_text(record: &MonsterRecord, field: RecordField) -> String {
    if field == RecordField::Damage {
        return or_fallback(&record.damage, FALLBACK_DAMAGE).to_string();
    }
    record
        .stat(field)
        .filter(|value| *value != 0)
        .map(|value| value.to_string())
        .unwrap_or_else(|| FALLBACK_STAT.to_string())
}

pub fn compose_card(record: &MonsterRecord, dict: &Dictionary) -> CardContent {
    let mut content = CardContent::new();

    content
        .text(
            TextBlock::new(vec![Span::new(
                or_fallback(&record.name, FALLBACK_NAME),
                title_style(),
            )])
            .centered()
            .margins(0.0, 2.0),
        )
        .text(
            TextBlock::new(vec![Span::new(
                or_fallback(&record.size_type, FALLBACK_SIZE_TYPE),
                subtitle_style(),
            )])
            .centered(),
        )
        .push(separator(SEPARATOR_SMALL));

    for field in [
        RecordField::Hp,
        RecordField::Defense,
        RecordField::Speed,
        RecordField::Damage,
    ] {
        content.text(
            TextBlock::new(vec![
                Span::new(format!("{}:", dict.field_label(field)), stat_label_style()),
                Span::new(format!(" {}", stat_text(record, field)), stat_value_style()),
            ])
            .margins(0.0, 2.0),
        );
    }

    content.push(separator(SEPARATOR));

    let columns = [RecordField::Body, RecordField::Mind, RecordField::Magic]
        .into_iter()
        .map(|field| Column {
            lines: vec![
                Span::new(
                    dict.field_label(field).to_uppercase(),
                    attribute_label_style(),
                ),
                Span::new(stat_text(record, field), attribute_value_style()),
            ],
        })
        .collect();
    content.push(Block::Columns {
        columns,
        margin_top: 0.0,
        margin_bottom: 0.0,
    });

    let shown: Vec<EntryList> = EntryList::ALL
        .into_iter()
        .filter(|list| record.is_section_shown(*list))
        .collect();
    if !shown.is_empty() {
        content.push(separator(SEPARATOR));
    }

    for (index, list) in shown.into_iter().enumerate() {
        if index > 0 {
            content.push(separator(SEPARATOR_LARGE));
        }
        content.text(
            TextBlock::new(vec![Span::new(
                dict.card_header(list).to_uppercase(),
                header_style(),
            )])
            .margins(0.0, 4.0),
        );
        for entry in record.entries(list).iter().filter(|e| e.is_displayed()) {
            content.text(entry_block(entry));
        }
    }

    content
}

fn entry_block(entry: &Entry) -> TextBlock {
    let mut spans = vec![Span::new(format!("{}.", entry.name), entry_name_style())];
    if !entry.desc.is_empty() {
        spans.push(Span::new(format!(" {}", entry.desc), entry_desc_style()));
    }
    TextBlock::new(spans).margins(0.0, 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Language;
    use crate::monster::{EntryPatch, MonsterPatch};
    use cardlayout::prelude::{fit_card, layout_content, FitConfig, FixedAdvance};
    use pretty_assertions::assert_eq;

    fn texts(record: &MonsterRecord, language: Language) -> Vec<String> {
        let content = compose_card(record, language.dictionary());
        layout_content(&content, 1000.0, &FixedAdvance::default()).line_texts()
    }

    #[test]
    fn empty_record_shows_placeholders() {
        let lines = texts(&MonsterRecord::default(), Language::En);
        assert_eq!(
            lines,
            vec![
                "Monster Name",
                "Size / Type",
                "HP: 10",
                "Defense: 10",
                "Speed: 10",
                "Damage: 1d6",
                "BODYMINDMAGIC",
                "101010",
            ]
        );
    }

    #[test]
    fn name_is_the_title() {
        let mut record = MonsterRecord::default();
        record.apply(MonsterPatch::name("Xaracol"));
        assert_eq!(texts(&record, Language::En)[0], "Xaracol");
    }

    #[test]
    fn labels_follow_the_language() {
        let lines = texts(&MonsterRecord::default(), Language::PtBr);
        assert!(lines.contains(&"PV: 10".to_string()));
        assert!(lines.contains(&"Dano: 1d6".to_string()));
        assert!(lines.contains(&"CORPOMENTEMAGIA".to_string()));
    }

    #[test]
    fn zero_stats_show_the_default() {
        let record = MonsterRecord {
            hp: Some(0),
            mind: Some(0),
            defense: Some(-2),
            ..Default::default()
        };
        let lines = texts(&record, Language::En);
        assert!(lines.contains(&"HP: 10".to_string()));
        assert!(lines.contains(&"Defense: -2".to_string()));
        assert_eq!(stat_text(&record, RecordField::Mind), "10");
    }

    #[test]
    fn bite_example_fits_one_segment() {
        let mut record = MonsterRecord {
            has_abilities: true,
            ..Default::default()
        };
        let id = record.add_entry(EntryList::Abilities);
        record.update_entry(
            EntryList::Abilities,
            &id,
            EntryPatch {
                name: Some("Bite".into()),
                desc: Some("1d4".into()),
            },
        );

        let content = compose_card(&record, Language::En.dictionary());
        let lines = layout_content(&content, 1000.0, &FixedAdvance::default()).line_texts();
        assert_eq!(lines.iter().filter(|l| *l == "ABILITIES").count(), 1);
        assert_eq!(lines.last().map(String::as_str), Some("Bite. 1d4"));

        let card = fit_card(&content, &FixedAdvance::default(), &FitConfig::default())
            .expect("fit");
        assert_eq!(card.middle_count(), 1);
    }

    #[test]
    fn disabled_sections_do_not_change_the_card() {
        let base = MonsterRecord::default();
        let mut filled = base.clone();
        for list in EntryList::ALL {
            let id = filled.add_entry(list);
            filled.update_entry(list, &id, EntryPatch::name("Hidden"));
        }
        assert_eq!(
            compose_card(&base, Language::En.dictionary()),
            compose_card(&filled, Language::En.dictionary())
        );
    }

    #[test]
    fn blank_entries_are_skipped() {
        let mut record = MonsterRecord {
            has_spells: true,
            ..Default::default()
        };
        record.add_entry(EntryList::Spells);
        let id = record.add_entry(EntryList::Spells);
        record.update_entry(EntryList::Spells, &id, EntryPatch::name("Light"));

        let lines = texts(&record, Language::En);
        assert_eq!(lines.iter().filter(|l| l.starts_with("Light")).count(), 1);
        assert_eq!(lines.last().map(String::as_str), Some("Light."));
    }

    #[test]
    fn separators_follow_shown_sections() {
        let dict = Language::En.dictionary();
        let base = compose_card(&MonsterRecord::default(), dict).separator_count();
        assert_eq!(base, 2);

        let mut record = MonsterRecord {
            has_abilities: true,
            has_spells: true,
            ..Default::default()
        };
        record.add_entry(EntryList::Abilities);
        record.add_entry(EntryList::Spells);
        // one before the first section, one large between the two
        assert_eq!(compose_card(&record, dict).separator_count(), base + 2);

        record.set_section_enabled(EntryList::Abilities, false);
        assert_eq!(compose_card(&record, dict).separator_count(), base + 1);
    }
}
