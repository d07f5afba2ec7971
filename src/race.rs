use serde::{Deserialize, Serialize};

/// Раса игрока или специальное значение выбора
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RaceType {
    Human,
    Undead,
    Heretic,
    Dwarf,
    Neutral,
    Elf,
    /// Раса будет выбрана случайно перед генерацией
    Random,
}

/// Расы, доступные для случайного выбора
pub const PLAYABLE_RACES: [RaceType; 5] = [
    RaceType::Human,
    RaceType::Undead,
    RaceType::Heretic,
    RaceType::Dwarf,
    RaceType::Elf,
];

impl RaceType {
    #[must_use]
    pub fn is_playable(self) -> bool {
        !matches!(self, RaceType::Neutral | RaceType::Random)
    }
}
