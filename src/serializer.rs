// src/serializer.rs
//! Запись объектов сценария в виде записей с именованными полями
//!
//! Кодирование записей (двоичный формат сценария) остаётся за внешним писателем;
//! здесь определён только контракт записи и простая реализация в памяти.

use serde::Serialize;

use crate::error::{Result, TemplateError};

/// Писатель записей: область записи ограничена `enter_record`/`leave_record`
pub trait Serializer {
    fn enter_record(&mut self) -> Result<()>;
    fn leave_record(&mut self) -> Result<()>;
    fn serialize_u32(&mut self, key: &str, value: u32) -> Result<()>;
    fn serialize_str(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    U32(u32),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

/// Упорядоченная группа полей одной записи
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    pub fields: Vec<Field>,
}

impl Record {
    /// Курсор для последовательного чтения полей
    #[must_use]
    pub fn reader(&self) -> RecordReader<'_> {
        RecordReader {
            fields: self.fields.iter(),
        }
    }
}

pub struct RecordReader<'a> {
    fields: std::slice::Iter<'a, Field>,
}

impl RecordReader<'_> {
    fn next_field(&mut self, key: &str) -> Result<&FieldValue> {
        match self.fields.next() {
            Some(field) if field.key == key => Ok(&field.value),
            Some(field) => Err(TemplateError::Record(format!(
                "expected field '{key}', found '{}'",
                field.key
            ))),
            None => Err(TemplateError::Record(format!("missing field '{key}'"))),
        }
    }

    pub fn read_u32(&mut self, key: &str) -> Result<u32> {
        match self.next_field(key)? {
            FieldValue::U32(value) => Ok(*value),
            FieldValue::Text(_) => Err(TemplateError::Record(format!(
                "field '{key}' is text, expected integer"
            ))),
        }
    }

    pub fn read_str(&mut self, key: &str) -> Result<&str> {
        match self.next_field(key)? {
            FieldValue::Text(value) => Ok(value),
            FieldValue::U32(_) => Err(TemplateError::Record(format!(
                "field '{key}' is integer, expected text"
            ))),
        }
    }

    /// Все поля прочитаны
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.fields.len() == 0
    }
}

/// Писатель, собирающий записи в память
#[derive(Debug, Default)]
pub struct RecordWriter {
    records: Vec<Record>,
    current: Option<Record>,
}

impl RecordWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    fn push(&mut self, key: &str, value: FieldValue) -> Result<()> {
        let record = self
            .current
            .as_mut()
            .ok_or_else(|| TemplateError::Record(format!("field '{key}' written outside of a record")))?;
        record.fields.push(Field {
            key: key.to_string(),
            value,
        });
        Ok(())
    }
}

impl Serializer for RecordWriter {
    fn enter_record(&mut self) -> Result<()> {
        if self.current.is_some() {
            return Err(TemplateError::Record("nested records are not supported".into()));
        }
        self.current = Some(Record::default());
        Ok(())
    }

    fn leave_record(&mut self) -> Result<()> {
        let record = self
            .current
            .take()
            .ok_or_else(|| TemplateError::Record("leave without enter".into()))?;
        self.records.push(record);
        Ok(())
    }

    fn serialize_u32(&mut self, key: &str, value: u32) -> Result<()> {
        self.push(key, FieldValue::U32(value))
    }

    fn serialize_str(&mut self, key: &str, value: &str) -> Result<()> {
        self.push(key, FieldValue::Text(value.to_string()))
    }
}
