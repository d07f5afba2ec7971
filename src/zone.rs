use serde::{Deserialize, Serialize};

use crate::race::RaceType;

/// Идентификатор зоны внутри шаблона
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateZoneId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ZoneType {
    /// Стартовая зона игрока
    PlayerStart,
    /// Стартовая зона компьютерного игрока
    AiStart,
    #[default]
    Treasure,
    Junction,
    Water,
}

/// Параметры зоны. Содержимое зоны заполняет внешний генератор.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneOptions {
    pub id: TemplateZoneId,
    #[serde(default, rename = "type")]
    pub zone_type: ZoneType,
    /// Владелец стартовой зоны
    #[serde(default)]
    pub owner: Option<RaceType>,
    #[serde(default = "default_zone_size")]
    pub size: u32,
}

fn default_zone_size() -> u32 {
    1
}

impl ZoneOptions {
    #[must_use]
    pub fn new(id: TemplateZoneId, zone_type: ZoneType) -> Self {
        Self {
            id,
            zone_type,
            owner: None,
            size: 1,
        }
    }
}

/// Связь между двумя зонами. Зоны указываются по идентификатору.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConnection {
    pub zone_from: TemplateZoneId,
    pub zone_to: TemplateZoneId,
    /// Сила охраны прохода (0 = без охраны)
    #[serde(default)]
    pub guard_strength: u32,
}

impl ZoneConnection {
    #[must_use]
    pub fn new(zone_from: TemplateZoneId, zone_to: TemplateZoneId) -> Self {
        Self {
            zone_from,
            zone_to,
            guard_strength: 0,
        }
    }
}
