// src/scenario/variables.rs
//! Переменные сценария, доступные скриптам
//!
//! Формат записи:
//! - число переменных под ключом, равным строке идентификатора объекта
//! - для каждой переменной по порядку: `ID` (индекс), `NAME`, `VALUE` (битовый образ i32 как u32)

use crate::contents::{MapTemplateScenarioVariables, ScenarioVariable};
use crate::error::{Result, TemplateError};
use crate::id::MidgardId;
use crate::serializer::{Record, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioVariables {
    pub object_id: MidgardId,
    /// Порядок добавления сохраняется: индекс записывается как `ID`
    pub variables: Vec<ScenarioVariable>,
}

impl ScenarioVariables {
    #[must_use]
    pub fn new(object_id: MidgardId) -> Self {
        Self {
            object_id,
            variables: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_template(object_id: MidgardId, template: &MapTemplateScenarioVariables) -> Self {
        Self {
            object_id,
            variables: template.scenario_variables.clone(),
        }
    }

    /// Добавляет переменную в конец списка. Имена на уникальность не проверяются.
    pub fn add(&mut self, name: impl Into<String>, value: i32) {
        self.variables.push(ScenarioVariable {
            name: name.into(),
            value,
        });
    }

    /// Записывает все переменные одной записью
    pub fn serialize<S>(&self, serializer: &mut S) -> Result<()>
    where
        S: Serializer + ?Sized,
    {
        // Индексы меньше количества, поэтому после этой проверки они тоже помещаются в u32
        let count = count_u32(self.variables.len())?;
        let id_string = self.object_id.to_string();

        serializer.enter_record()?;
        let written = self.write_fields(serializer, &id_string, count);
        let left = serializer.leave_record();
        written.and(left)
    }

    fn write_fields<S>(&self, serializer: &mut S, id_string: &str, count: u32) -> Result<()>
    where
        S: Serializer + ?Sized,
    {
        serializer.serialize_u32(id_string, count)?;

        for (index, variable) in (0..count).zip(&self.variables) {
            serializer.serialize_u32("ID", index)?;
            serializer.serialize_str("NAME", &variable.name)?;
            serializer.serialize_u32("VALUE", variable.value as u32)?;
        }
        Ok(())
    }

    /// Обратное чтение записи, созданной `serialize`
    pub fn from_record(object_id: MidgardId, record: &Record) -> Result<Self> {
        let mut reader = record.reader();
        let count = reader.read_u32(&object_id.to_string())?;

        let mut variables = Self::new(object_id);
        for expected in 0..count {
            let id = reader.read_u32("ID")?;
            if id != expected {
                return Err(TemplateError::Record(format!(
                    "variable index {id} out of order, expected {expected}"
                )));
            }
            let name = reader.read_str("NAME")?.to_string();
            let value = reader.read_u32("VALUE")? as i32;
            variables.add(name, value);
        }

        if !reader.is_done() {
            return Err(TemplateError::Record(format!(
                "unexpected fields after {count} variable(s)"
            )));
        }
        Ok(variables)
    }
}

fn count_u32(count: usize) -> Result<u32> {
    u32::try_from(count).map_err(|_| TemplateError::Record(format!("{count} does not fit in u32")))
}
