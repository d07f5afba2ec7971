// src/settings.rs
//! Настройки шаблона сценария
//!
//! Всё, кроме названия и описания, игрок может изменить перед генерацией:
//! - Размер карты и число игроков
//! - Расы игроков (в том числе `Random`)
//! - Стартовые ресурсы, дороги, леса
//! - Пользовательские параметры шаблона
//! - Запрещённые юниты, предметы и заклинания

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TemplateError};
use crate::id::MidgardId;
use crate::race::{PLAYABLE_RACES, RaceType};
use crate::random::{RandomGenerator, random_element};

/// Один настраиваемый игроком параметр шаблона
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCustomParameter")]
pub struct TemplateCustomParameter {
    pub name: String,
    /// Единица измерения для отображения
    pub unit: String,
    /// Подписи дискретных значений (пусто для чисто числового диапазона)
    pub values: Vec<String>,
    pub value_min: i32,
    pub value_max: i32,
    pub value_step: i32,
    pub value_default: i32,
    pub value: i32,
}

impl TemplateCustomParameter {
    /// Создаёт параметр с диапазоном `0..=values.len()` и шагом 1
    #[must_use]
    pub fn new(name: impl Into<String>, unit: impl Into<String>, values: Vec<String>) -> Self {
        RawCustomParameter {
            name: name.into(),
            unit: unit.into(),
            values,
            ..RawCustomParameter::default()
        }
        .into()
    }

    /// Изменение значения игроком.
    ///
    /// Значение ограничивается диапазоном параметра и округляется вниз до `value_min + k * value_step`.
    pub fn set_value(&mut self, value: i32) {
        let clamped = value.clamp(self.value_min, self.value_max.max(self.value_min));
        self.value = if self.value_step > 1 {
            let offset = clamped - self.value_min;
            self.value_min + offset - offset % self.value_step
        } else {
            clamped
        };
    }

    /// Подпись текущего значения, если у параметра есть дискретные подписи
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        let index = usize::try_from(self.value - self.value_min).ok()?;
        self.values.get(index).map(String::as_str)
    }

    fn is_in_range(&self) -> bool {
        self.value_min <= self.value && self.value <= self.value_max
    }
}

// Значения по умолчанию зависят друг от друга, поэтому разбираем через Option
#[derive(Debug, Default, Deserialize)]
struct RawCustomParameter {
    #[serde(default)]
    name: String,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    values: Vec<String>,
    value_min: Option<i32>,
    value_max: Option<i32>,
    value_step: Option<i32>,
    value_default: Option<i32>,
    value: Option<i32>,
}

impl From<RawCustomParameter> for TemplateCustomParameter {
    fn from(raw: RawCustomParameter) -> Self {
        let value_min = raw.value_min.unwrap_or(0);
        let value_max = raw
            .value_max
            .unwrap_or_else(|| i32::try_from(raw.values.len()).unwrap_or(i32::MAX));
        let value_default = raw.value_default.unwrap_or(value_min);

        Self {
            name: raw.name,
            unit: raw.unit,
            values: raw.values,
            value_min,
            value_max,
            value_step: raw.value_step.unwrap_or(1),
            value_default,
            value: raw.value.unwrap_or(value_default),
        }
    }
}

/// Конфигурация одного запуска генерации
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapTemplateSettings {
    #[serde(default)]
    pub forbidden_units: BTreeSet<MidgardId>,
    #[serde(default)]
    pub forbidden_items: BTreeSet<MidgardId>,
    #[serde(default)]
    pub forbidden_spells: BTreeSet<MidgardId>,

    /// Расы, выбранные игроками до генерации, по одной на слот
    #[serde(default)]
    pub races: Vec<RaceType>,

    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,

    #[serde(default = "default_max_players")]
    pub max_players: usize,

    #[serde(default = "default_size")]
    pub size_min: i32,
    #[serde(default = "default_size")]
    pub size_max: i32,
    #[serde(default = "default_size")]
    pub size: i32,

    /// Доля клеток с дорогами, в процентах
    #[serde(default = "default_roads")]
    pub roads: i32,

    #[serde(default)]
    pub starting_gold: i32,
    #[serde(default)]
    pub starting_native_mana: i32,

    /// Доля неиспользованных клеток, превращаемых в лес после расстановки, в процентах
    #[serde(default)]
    pub forest: i32,

    /// Число попыток генерации
    #[serde(default)]
    pub iterations: u32,

    #[serde(default)]
    pub parameters: Vec<TemplateCustomParameter>,
    #[serde(default)]
    pub parameters_values: Vec<i32>,
}

fn default_max_players() -> usize {
    1
}
fn default_size() -> i32 {
    48
}
fn default_roads() -> i32 {
    100
}

impl Default for MapTemplateSettings {
    fn default() -> Self {
        Self {
            forbidden_units: BTreeSet::new(),
            forbidden_items: BTreeSet::new(),
            forbidden_spells: BTreeSet::new(),
            races: Vec::new(),
            name: String::new(),
            description: String::new(),
            max_players: 1,
            size_min: 48,
            size_max: 48,
            size: 48,
            roads: 100,
            starting_gold: 0,
            starting_native_mana: 0,
            forest: 0,
            iterations: 0,
            parameters: Vec::new(),
            parameters_values: Vec::new(),
        }
    }
}

impl MapTemplateSettings {
    /// Заменяет случайные расы настоящими.
    ///
    /// Сначала полностью собирает расы, уже выбранные игроками, и только потом
    /// назначает случайные: назначенная раса не должна считаться "занятой" в том же проходе.
    /// Уже выбранные расы не изменяются.
    ///
    /// # Ошибки
    /// `ResolutionExhausted`, если случайных слотов больше, чем свободных играбельных рас.
    /// В этом случае `races` остаётся без изменений.
    pub fn replace_random_races<R>(&mut self, rand: &mut R) -> Result<()>
    where
        R: RandomGenerator + ?Sized,
    {
        let mut available: BTreeSet<RaceType> = PLAYABLE_RACES.into_iter().collect();

        // Игрок уже выбрал эти расы, повторно выбирать их нельзя
        for race in &self.races {
            if race.is_playable() {
                available.remove(race);
            }
        }

        let random_slots = self
            .races
            .iter()
            .filter(|&&race| race == RaceType::Random)
            .count();
        if random_slots > available.len() {
            return Err(TemplateError::ResolutionExhausted {
                random_slots,
                available: available.len(),
            });
        }

        for (slot, race) in self.races.iter_mut().enumerate() {
            if *race != RaceType::Random {
                continue;
            }

            let chosen = *random_element(&available, &mut *rand).ok_or(
                TemplateError::ResolutionExhausted {
                    random_slots,
                    available: 0,
                },
            )?;
            available.remove(&chosen);
            *race = chosen;
            debug!(slot, race = ?chosen, "random race resolved");
        }

        Ok(())
    }

    /// Проверяет диапазоны настроек, заданных игроком
    pub fn validate(&self) -> Result<()> {
        if !(self.size_min <= self.size && self.size <= self.size_max) {
            return Err(TemplateError::InvalidSettings(format!(
                "size {} is outside of [{}, {}]",
                self.size, self.size_min, self.size_max
            )));
        }

        for (field, value) in [("roads", self.roads), ("forest", self.forest)] {
            if !(0..=100).contains(&value) {
                return Err(TemplateError::InvalidSettings(format!(
                    "{field} must be a percentage, got {value}"
                )));
            }
        }

        if self.races.len() > self.max_players {
            return Err(TemplateError::InvalidSettings(format!(
                "{} races given for at most {} players",
                self.races.len(),
                self.max_players
            )));
        }

        let mut claimed = BTreeSet::new();
        if let Some(race) = self
            .races
            .iter()
            .filter(|race| race.is_playable())
            .find(|&&race| !claimed.insert(race))
        {
            return Err(TemplateError::InvalidSettings(format!(
                "race {race:?} is chosen by more than one player"
            )));
        }

        if let Some(parameter) = self.parameters.iter().find(|p| !p.is_in_range()) {
            return Err(TemplateError::InvalidSettings(format!(
                "parameter '{}' value {} is outside of [{}, {}]",
                parameter.name, parameter.value, parameter.value_min, parameter.value_max
            )));
        }

        Ok(())
    }

    /// Заполняет `parameters_values` текущими значениями параметров, в том же порядке
    pub fn resolve_parameter_values(&mut self) {
        self.parameters_values = self.parameters.iter().map(|p| p.value).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    /// Считает обращения к генератору и всегда выбирает первый элемент
    struct CountingRandom {
        draws: usize,
    }

    impl RandomGenerator for CountingRandom {
        fn pick_index(&mut self, _len: usize) -> usize {
            self.draws += 1;
            0
        }
    }

    fn settings_with(races: Vec<RaceType>) -> MapTemplateSettings {
        MapTemplateSettings {
            max_players: races.len(),
            races,
            ..MapTemplateSettings::default()
        }
    }

    fn assert_playable_unique(races: &[RaceType]) {
        let playable: Vec<_> = races.iter().filter(|r| r.is_playable()).collect();
        let unique: BTreeSet<_> = playable.iter().collect();
        assert_eq!(playable.len(), unique.len(), "duplicate race in {races:?}");
    }

    #[test]
    fn random_slots_get_unique_races() {
        for seed in 0..50 {
            let mut settings = settings_with(vec![
                RaceType::Random,
                RaceType::Elf,
                RaceType::Random,
                RaceType::Neutral,
                RaceType::Random,
            ]);
            settings
                .replace_random_races(&mut SeededRandom::new(seed))
                .unwrap();

            assert_eq!(settings.races[1], RaceType::Elf);
            assert_eq!(settings.races[3], RaceType::Neutral);
            assert!(!settings.races.contains(&RaceType::Random));
            for slot in [0, 2, 4] {
                assert_ne!(settings.races[slot], RaceType::Elf);
                assert!(settings.races[slot].is_playable());
            }
            assert_playable_unique(&settings.races);
        }
    }

    #[test]
    fn all_random_uses_whole_universe() {
        let mut settings = settings_with(vec![RaceType::Random; 5]);
        settings
            .replace_random_races(&mut SeededRandom::new(3))
            .unwrap();

        let resolved: BTreeSet<_> = settings.races.iter().copied().collect();
        let universe: BTreeSet<_> = PLAYABLE_RACES.into_iter().collect();
        assert_eq!(resolved, universe);
    }

    #[test]
    fn claimed_races_are_scanned_before_substitution() {
        // Первый элемент набора Human, но он занят последним слотом
        let mut settings = settings_with(vec![RaceType::Random, RaceType::Human]);
        let mut rand = CountingRandom { draws: 0 };
        settings.replace_random_races(&mut rand).unwrap();

        assert_eq!(settings.races, vec![RaceType::Undead, RaceType::Human]);
        assert_eq!(rand.draws, 1);
    }

    #[test]
    fn too_many_random_slots_fail() {
        let races = vec![
            RaceType::Dwarf,
            RaceType::Random,
            RaceType::Random,
            RaceType::Random,
            RaceType::Random,
            RaceType::Random,
        ];
        let mut settings = settings_with(races.clone());
        let mut rand = CountingRandom { draws: 0 };

        let err = settings.replace_random_races(&mut rand).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::ResolutionExhausted {
                random_slots: 5,
                available: 4
            }
        ));
        assert_eq!(settings.races, races);
        assert_eq!(rand.draws, 0);
    }

    #[test]
    fn no_random_slots_means_no_draws() {
        let races = vec![RaceType::Heretic, RaceType::Neutral, RaceType::Undead];
        let mut settings = settings_with(races.clone());
        let mut rand = CountingRandom { draws: 0 };

        settings.replace_random_races(&mut rand).unwrap();
        assert_eq!(settings.races, races);
        assert_eq!(rand.draws, 0);
    }

    #[test]
    fn parameter_defaults_follow_values() {
        let parameter = TemplateCustomParameter::new(
            "Gold mines",
            "",
            vec!["Few".into(), "Normal".into(), "Many".into()],
        );
        assert_eq!(parameter.value_min, 0);
        assert_eq!(parameter.value_max, 3);
        assert_eq!(parameter.value_step, 1);
        assert_eq!(parameter.value, 0);
        assert_eq!(parameter.label(), Some("Few"));
    }

    #[test]
    fn parameter_edit_is_clamped() {
        let mut parameter = TemplateCustomParameter::new("Guards", "%", Vec::new());
        parameter.value_max = 200;
        parameter.set_value(250);
        assert_eq!(parameter.value, 200);
        parameter.set_value(-1);
        assert_eq!(parameter.value, 0);
        assert_eq!(parameter.label(), None);
    }

    #[test]
    fn validate_reports_bad_ranges() {
        let mut settings = MapTemplateSettings::default();
        assert!(settings.validate().is_ok());

        settings.size = 72;
        assert!(matches!(
            settings.validate(),
            Err(TemplateError::InvalidSettings(_))
        ));

        settings.size = 48;
        settings.forest = 101;
        assert!(settings.validate().is_err());

        settings.forest = 10;
        settings.races = vec![RaceType::Elf, RaceType::Dwarf];
        assert!(settings.validate().is_err());

        settings.max_players = 2;
        let mut parameter = TemplateCustomParameter::new("Towns", "", Vec::new());
        parameter.value = 4;
        settings.parameters.push(parameter);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_rejects_repeated_fixed_race() {
        let mut settings = settings_with(vec![RaceType::Elf, RaceType::Elf, RaceType::Random]);
        assert!(matches!(
            settings.validate(),
            Err(TemplateError::InvalidSettings(_))
        ));

        settings.races = vec![RaceType::Neutral, RaceType::Neutral, RaceType::Random];
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn parameter_edit_snaps_to_step() {
        let mut parameter = TemplateCustomParameter::new("Guards", "%", Vec::new());
        parameter.value_min = 50;
        parameter.value_max = 200;
        parameter.value_step = 25;

        parameter.set_value(110);
        assert_eq!(parameter.value, 100);
        parameter.set_value(125);
        assert_eq!(parameter.value, 125);
        parameter.set_value(199);
        assert_eq!(parameter.value, 175);
        parameter.set_value(10);
        assert_eq!(parameter.value, 50);
    }

    #[test]
    fn parameter_values_are_resolved_in_order() {
        let mut settings = MapTemplateSettings::default();
        let mut first = TemplateCustomParameter::new("a", "", Vec::new());
        first.value_max = 10;
        first.set_value(7);
        let second = TemplateCustomParameter::new("b", "", vec!["x".into(), "y".into()]);
        settings.parameters = vec![first, second];

        settings.resolve_parameter_values();
        assert_eq!(settings.parameters_values, vec![7, 0]);
    }
}
