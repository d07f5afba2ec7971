// src/template.rs
//! Шаблон случайного сценария: настройки игрока и содержимое для генератора карты

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::contents::MapTemplateContents;
use crate::error::Result;
use crate::id::MidgardId;
use crate::random::RandomGenerator;
use crate::scenario::ScenarioVariables;
use crate::settings::MapTemplateSettings;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapTemplate {
    #[serde(default)]
    pub settings: MapTemplateSettings,
    #[serde(default)]
    pub contents: MapTemplateContents,
}

impl MapTemplate {
    /// Загружает шаблон из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// [settings]
    /// name = "Duel"
    /// max_players = 2
    /// races = ["Random", "Elf"]
    ///
    /// [[contents.scenario_variables]]
    /// name = "WINNER"
    /// value = 0
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Готовит настройки к генерации: проверка, выбор случайных рас, значения параметров.
    ///
    /// Вызывается один раз перед передачей шаблона генератору.
    pub fn prepare<R>(&mut self, rand: &mut R) -> Result<()>
    where
        R: RandomGenerator + ?Sized,
    {
        self.settings.validate()?;
        self.settings.replace_random_races(rand)?;
        self.settings.resolve_parameter_values();

        info!(
            template = %self.settings.name,
            races = ?self.settings.races,
            zones = self.contents.zones.len(),
            "template prepared"
        );
        Ok(())
    }

    #[must_use]
    pub fn scenario_variables(&self, object_id: MidgardId) -> ScenarioVariables {
        ScenarioVariables::from_template(object_id, &self.contents.scenario_variables)
    }
}
