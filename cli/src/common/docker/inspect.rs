//! # ImgRS Inspection Output Parsing
//!
//! File: cli/src/common/docker/inspect.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! `container inspect` prints a JSON array with one object per inspected
//! container. ImgRS inspects one container at a time and keeps the object as an
//! opaque `InspectionRecord`; callers pull out the specific field they need
//! through typed accessors that fail loudly instead of defaulting.
//!
use crate::core::error::{ImgrsError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Detailed inspection of one container: field name to arbitrary JSON value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InspectionRecord(Map<String, Value>);

impl InspectionRecord {
    /// Raw value of a top-level field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// String value of a top-level field.
    ///
    /// # Errors
    ///
    /// `ImgrsError::InspectField` if the field is missing or is not a JSON string.
    pub fn str_field(&self, field: &str) -> Result<&str> {
        match self.0.get(field) {
            Some(Value::String(value)) => Ok(value),
            Some(other) => Err(ImgrsError::InspectField {
                field: field.to_string(),
                reason: format!("is not a string (found {})", json_kind(other)),
            }
            .into()),
            None => Err(ImgrsError::InspectField {
                field: field.to_string(),
                reason: "is missing".to_string(),
            }
            .into()),
        }
    }

    /// Field names present in the record.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Parses `inspect` output and returns the first object of the array.
///
/// # Errors
///
/// `ImgrsError::Parse` if `text` is not a JSON array of objects, or the array is empty.
pub fn parse_inspection(text: &str) -> Result<InspectionRecord> {
    let objects: Vec<Map<String, Value>> = serde_json::from_str(text)
        .map_err(|e| ImgrsError::Parse(format!("inspect output is not a JSON array of objects: {}", e)))?;
    objects
        .into_iter()
        .next()
        .map(InspectionRecord)
        .ok_or_else(|| ImgrsError::Parse("inspect output is an empty array".to_string()).into())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
