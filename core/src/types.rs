//! Domain DTOs for the exercise API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! so the client core never links the server's store or HTTP stack.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Weight unit of an exercise.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
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
}

/// A single exercise record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub reps: u64,
    pub weight: u64,
    pub unit: Unit,
    pub date: String,
    /// Store revision marker. Opaque to clients.
    #[serde(default)]
    pub revision: u64,
}

/// Full field set sent on create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseInput {
    pub name: String,
    pub reps: u64,
    pub weight: u64,
    pub unit: Unit,
    pub date: String,
}

impl From<&Exercise> for ExerciseInput {
    fn from(exercise: &Exercise) -> Self {
        Self {
            name: exercise.name.clone(),
            reps: exercise.reps,
            weight: exercise.weight,
            unit: exercise.unit,
            date: exercise.date.clone(),
        }
    }
}
