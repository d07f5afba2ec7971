// src/id.rs
//! Идентификаторы объектов игры
//!
//! Каноническая строка идентификатора всегда занимает 10 символов:
//! `S143SV0000`: категория, индекс категории (3 hex), тип (2 буквы), индекс типа (4 hex).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TemplateError;

/// Длина канонической строки идентификатора
pub const ID_STRING_LEN: usize = 10;

/// Наибольший индекс категории, который помещается в три hex-цифры
pub const MAX_CATEGORY_INDEX: u16 = 0xFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdCategory {
    Global,
    Campaign,
    Scenario,
    External,
}

impl IdCategory {
    fn code(self) -> char {
        match self {
            IdCategory::Global => 'G',
            IdCategory::Campaign => 'C',
            IdCategory::Scenario => 'S',
            IdCategory::External => 'E',
        }
    }

    fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'G' => Some(IdCategory::Global),
            'C' => Some(IdCategory::Campaign),
            'S' => Some(IdCategory::Scenario),
            'E' => Some(IdCategory::External),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdType {
    Unit,
    Item,
    Spell,
    ScenarioVariable,
}

impl IdType {
    fn code(self) -> &'static str {
        match self {
            IdType::Unit => "UU",
            IdType::Item => "IG",
            IdType::Spell => "SS",
            IdType::ScenarioVariable => "SV",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "UU" => Some(IdType::Unit),
            "IG" => Some(IdType::Item),
            "SS" => Some(IdType::Spell),
            "SV" => Some(IdType::ScenarioVariable),
            _ => None,
        }
    }
}

/// Непрозрачный, упорядоченный идентификатор юнита, предмета, заклинания или объекта сценария
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MidgardId {
    pub category: IdCategory,
    pub category_index: u16,
    pub id_type: IdType,
    pub type_index: u16,
}

impl MidgardId {
    /// Создаёт идентификатор. `category_index` больше `MAX_CATEGORY_INDEX` урезается до него,
    /// для проверки диапазона используйте `try_new`.
    #[must_use]
    pub fn new(category: IdCategory, category_index: u16, id_type: IdType, type_index: u16) -> Self {
        Self {
            category,
            category_index: category_index.min(MAX_CATEGORY_INDEX),
            id_type,
            type_index,
        }
    }

    /// Создаёт идентификатор, если индекс категории помещается в три hex-цифры
    pub fn try_new(
        category: IdCategory,
        category_index: u16,
        id_type: IdType,
        type_index: u16,
    ) -> Result<Self, TemplateError> {
        if category_index > MAX_CATEGORY_INDEX {
            return Err(TemplateError::InvalidId(format!(
                "category index {category_index:#X} exceeds {MAX_CATEGORY_INDEX:#X}"
            )));
        }
        Ok(Self::new(category, category_index, id_type, type_index))
    }
}

impl fmt::Display for MidgardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:03X}{}{:04X}",
            self.category.code(),
            self.category_index,
            self.id_type.code(),
            self.type_index
        )
    }
}

impl FromStr for MidgardId {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TemplateError::InvalidId(s.to_string());

        if s.len() != ID_STRING_LEN || !s.is_ascii() {
            return Err(invalid());
        }

        let category = s
            .chars()
            .next()
            .and_then(IdCategory::from_code)
            .ok_or_else(invalid)?;
        let category_index = parse_hex(&s[1..4]).ok_or_else(invalid)?;
        let id_type = IdType::from_code(&s[4..6]).ok_or_else(invalid)?;
        let type_index = parse_hex(&s[6..]).ok_or_else(invalid)?;

        Ok(Self::new(category, category_index, id_type, type_index))
    }
}

// from_str_radix принимает ведущий '+', поэтому цифры проверяем сами
fn parse_hex(digits: &str) -> Option<u16> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

impl Serialize for MidgardId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MidgardId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
