//! Exercise documents as they are stored and served.
//!
//! # Design
//! `ExerciseFields` is the validated, user-editable part of a record and is
//! the only thing the store accepts on writes. `Exercise` adds the
//! store-assigned `id` and `revision`, which callers can read but never set.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Weight unit accepted for an exercise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kgs,
    Lbs,
}

impl Unit {
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Kgs => "kgs",
            Unit::Lbs => "lbs",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "kgs" => Some(Unit::Kgs),
            "lbs" => Some(Unit::Lbs),
            _ => None,
        }
    }
}

/// The full field set of an exercise, already validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseFields {
    pub name: String,
    pub reps: u64,
    pub weight: u64,
    pub unit: Unit,
    pub date: String,
}

/// A persisted exercise record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub reps: u64,
    pub weight: u64,
    pub unit: Unit,
    pub date: String,
    pub revision: u64,
}

impl Exercise {
    pub fn new(id: Uuid, fields: ExerciseFields, revision: u64) -> Self {
        Self {
            id,
            name: fields.name,
            reps: fields.reps,
            weight: fields.weight,
            unit: fields.unit,
            date: fields.date,
            revision,
        }
    }

    /// Overwrite every editable field, keeping `id` and `revision`.
    pub fn replace_fields(&mut self, fields: ExerciseFields) {
        self.name = fields.name;
        self.reps = fields.reps;
        self.weight = fields.weight;
        self.unit = fields.unit;
        self.date = fields.date;
    }

    pub fn fields(&self) -> ExerciseFields {
        ExerciseFields {
            name: self.name.clone(),
            reps: self.reps,
            weight: self.weight,
            unit: self.unit,
            date: self.date.clone(),
        }
    }
}
