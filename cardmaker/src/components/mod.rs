pub mod card_maker;
pub mod card_preview;
pub mod monster_form;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use card_maker::{CardMaker, CardMakerProps};
pub use card_preview::{CardPreview, CardPreviewProps};
pub use monster_form::{MonsterForm, MonsterFormProps};
