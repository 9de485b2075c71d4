//! Display strings for every supported language.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::monster::{EntryList, RecordField};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
    clap::ValueEnum,
)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    #[value(name = "en")]
    En,
    #[serde(rename = "pt-BR")]
    #[value(name = "pt-BR", alias = "pt")]
    PtBr,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::PtBr];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::PtBr => "pt-BR",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::PtBr => "Português",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Language::En => Language::PtBr,
            Language::PtBr => Language::En,
        }
    }

    pub fn dictionary(self) -> &'static Dictionary {
        match self {
            Language::En => &EN,
            Language::PtBr => &PT_BR,
        }
    }
}

#[derive(Debug)]
pub struct CardHeaders {
    pub abilities: &'static str,
    pub special_attacks: &'static str,
    pub spells: &'static str,
}

#[derive(Debug)]
pub struct Dictionary {
    pub title: &'static str,
    pub preview: &'static str,
    pub form: &'static str,
    pub name: &'static str,
    pub size_type: &'static str,
    pub hp: &'static str,
    pub defense: &'static str,
    pub speed: &'static str,
    pub damage: &'static str,
    pub body: &'static str,
    pub mind: &'static str,
    pub magic: &'static str,
    pub has_abilities: &'static str,
    pub has_special_attacks: &'static str,
    pub has_spells: &'static str,
    pub language: &'static str,
    pub export_png: &'static str,
    pub copy_png: &'static str,
    pub reset: &'static str,
    pub stats: &'static str,
    pub attributes: &'static str,
    pub basic_info: &'static str,
    pub ability_name: &'static str,
    pub ability_desc: &'static str,
    pub special_attack_name: &'static str,
    pub special_attack_desc: &'static str,
    pub spell_name: &'static str,
    pub spell_desc: &'static str,
    pub add_ability: &'static str,
    pub add_special_attack: &'static str,
    pub add_spell: &'static str,
    pub abilities: &'static str,
    pub special_attacks: &'static str,
    pub spells: &'static str,
    pub card_headers: CardHeaders,
    pub remove: &'static str,
    pub quit: &'static str,
    pub scroll: &'static str,
    pub exported: &'static str,
    pub nothing_to_export: &'static str,
    pub copied: &'static str,
    pub clipboard_unavailable: &'static str,
    pub failed: &'static str,
    pub reset_done: &'static str,
    pub working: &'static str,
}

impl Dictionary {
    pub fn field_label(&self, field: RecordField) -> &'static str {
        match field {
            RecordField::Name => self.name,
            RecordField::SizeType => self.size_type,
            RecordField::Hp => self.hp,
            RecordField::Defense => self.defense,
            RecordField::Speed => self.speed,
            RecordField::Damage => self.damage,
            RecordField::Body => self.body,
            RecordField::Mind => self.mind,
            RecordField::Magic => self.magic,
        }
    }

    pub fn section_title(&self, list: EntryList) -> &'static str {
        match list {
            EntryList::Abilities => self.abilities,
            EntryList::SpecialAttacks => self.special_attacks,
            EntryList::Spells => self.spells,
        }
    }

    pub fn card_header(&self, list: EntryList) -> &'static str {
        match list {
            EntryList::Abilities => self.card_headers.abilities,
            EntryList::SpecialAttacks => self.card_headers.special_attacks,
            EntryList::Spells => self.card_headers.spells,
        }
    }

    pub fn section_toggle(&self, list: EntryList) -> &'static str {
        match list {
            EntryList::Abilities => self.has_abilities,
            EntryList::SpecialAttacks => self.has_special_attacks,
            EntryList::Spells => self.has_spells,
        }
    }

    pub fn entry_name(&self, list: EntryList) -> &'static str {
        match list {
            EntryList::Abilities => self.ability_name,
            EntryList::SpecialAttacks => self.special_attack_name,
            EntryList::Spells => self.spell_name,
        }
    }

    pub fn entry_desc(&self, list: EntryList) -> &'static str {
        match list {
            EntryList::Abilities => self.ability_desc,
            EntryList::SpecialAttacks => self.special_attack_desc,
            EntryList::Spells => self.spell_desc,
        }
    }

    pub fn add_entry(&self, list: EntryList) -> &'static str {
        match list {
            EntryList::Abilities => self.add_ability,
            EntryList::SpecialAttacks => self.add_special_attack,
            EntryList::Spells => self.add_spell,
        }
    }
}

pub static EN: Dictionary = Dictionary {
    title: "Monster Card Maker",
    preview: "Preview",
    form: "Monster Data",
    name: "Name",
    size_type: "Size / Type",
    hp: "HP",
    defense: "Defense",
    speed: "Speed",
    damage: "Damage",
    body: "Body",
    mind: "Mind",
    magic: "Magic",
    has_abilities: "Has abilities",
    has_special_attacks: "Has special attacks",
    has_spells: "Has spells",
    language: "Language",
    export_png: "Export PNG",
    copy_png: "Copy PNG",
    reset: "Reset",
    stats: "Stats",
    attributes: "Attributes",
    basic_info: "Basic Info",
    ability_name: "Ability name",
    ability_desc: "Ability description",
    special_attack_name: "Special attack name",
    special_attack_desc: "Special attack description",
    spell_name: "Spell name",
    spell_desc: "Description",
    add_ability: "Add ability",
    add_special_attack: "Add special attack",
    add_spell: "Add spell",
    abilities: "Abilities",
    special_attacks: "Special Attacks",
    spells: "Spells",
    card_headers: CardHeaders {
        abilities: "Abilities",
        special_attacks: "Special Attacks",
        spells: "Spells",
    },
    remove: "remove",
    quit: "quit",
    scroll: "scroll",
    exported: "Saved",
    nothing_to_export: "Nothing to export",
    copied: "Copied to clipboard",
    clipboard_unavailable: "Clipboard unavailable",
    failed: "Failed",
    reset_done: "Form cleared",
    working: "Rendering…",
};

pub static PT_BR: Dictionary = Dictionary {
    title: "Criador de Cartas de Monstro",
    preview: "Pré-visualização",
    form: "Dados do Monstro",
    name: "Nome",
    size_type: "Porte / Tipo",
    hp: "PV",
    defense: "Defesa",
    speed: "Velocidade",
    damage: "Dano",
    body: "Corpo",
    mind: "Mente",
    magic: "Magia",
    has_abilities: "Tem habilidades",
    has_special_attacks: "Tem ataques especiais",
    has_spells: "Tem magias",
    language: "Idioma",
    export_png: "Exportar PNG",
    copy_png: "Copiar PNG",
    reset: "Resetar",
    stats: "Atributos",
    attributes: "Características",
    basic_info: "Informações Básicas",
    ability_name: "Nome da habilidade",
    ability_desc: "Descrição da habilidade",
    special_attack_name: "Nome do ataque especial",
    special_attack_desc: "Descrição do ataque especial",
    spell_name: "Nome da magia",
    spell_desc: "Descrição",
    add_ability: "Adicionar habilidade",
    add_special_attack: "Adicionar ataque especial",
    add_spell: "Adicionar magia",
    abilities: "Habilidades",
    special_attacks: "Ataques Especiais",
    spells: "Magias",
    card_headers: CardHeaders {
        abilities: "Habilidades",
        special_attacks: "Ataques Especiais",
        spells: "Magias",
    },
    remove: "remover",
    quit: "sair",
    scroll: "rolar",
    exported: "Salvo",
    nothing_to_export: "Nada para exportar",
    copied: "Copiado para a área de transferência",
    clipboard_unavailable: "Área de transferência indisponível",
    failed: "Falhou",
    reset_done: "Formulário limpo",
    working: "Renderizando…",
};
