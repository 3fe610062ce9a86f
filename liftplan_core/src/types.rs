//! Core domain types for the workout program designer.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise definitions (catalog entries)
//! - The program tree: programs, weeks, days and scheduled exercise entries
//! - Field-level edits applied to an entry

use crate::{Error, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Default number of sets for a newly scheduled exercise
pub const DEFAULT_SETS: u32 = 3;

/// Default number of reps for a newly scheduled exercise
pub const DEFAULT_REPS: u32 = 10;

// ============================================================================
// Catalog Types
// ============================================================================

/// A movement available in the exercise catalog (e.g., "Barbell Squat")
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseDefinition {
    pub id: u32,
    pub name: String,
    pub body_part: String,
    pub category: String,
}

// ============================================================================
// Program Tree Types
// ============================================================================

/// A scheduled occurrence of an exercise within a day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseEntry {
    /// Seconds since the epoch at insertion time
    pub id: f64,
    pub exercise_id: u32,
    /// Copy of the definition name taken when the entry was added
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(default)]
    pub notes: String,
}

impl ExerciseEntry {
    /// Schedule `definition` with the default prescription
    pub fn from_definition(definition: &ExerciseDefinition) -> Self {
        Self {
            id: timestamp_id(),
            exercise_id: definition.id,
            name: definition.name.clone(),
            sets: DEFAULT_SETS,
            reps: DEFAULT_REPS,
            notes: String::new(),
        }
    }
}

/// One training day within a week
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Day {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
}

impl Day {
    /// A day with the default "Day N" name and no exercises
    pub fn numbered(id: u32, number: usize) -> Self {
        Self {
            id,
            name: format!("Day {}", number),
            exercises: Vec::new(),
        }
    }
}

/// One week of a program
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Week {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub days: Vec<Day>,
}

impl Week {
    /// A week with the default "Week N" name holding a single "Day 1"
    pub fn numbered(id: u32, number: usize) -> Self {
        Self {
            id,
            name: format!("Week {}", number),
            days: vec![Day::numbered(1, 1)],
        }
    }

    /// Largest exercise count across the days of this week
    pub fn max_exercises(&self) -> usize {
        self.days
            .iter()
            .map(|d| d.exercises.len())
            .max()
            .unwrap_or(0)
    }
}

/// A complete multi-week workout program
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Program {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub weeks: Vec<Week>,
    /// Highest week number handed out by default naming
    #[serde(default)]
    pub week_sequence: u32,
}

impl Program {
    /// A fresh program: one "Week 1" containing one empty "Day 1"
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            weeks: vec![Week::numbered(1, 1)],
            week_sequence: 1,
        }
    }

    /// Total number of scheduled exercise entries across all weeks
    pub fn exercise_count(&self) -> usize {
        self.weeks
            .iter()
            .flat_map(|w| w.days.iter())
            .map(|d| d.exercises.len())
            .sum()
    }
}

// ============================================================================
// Edits
// ============================================================================

/// A single field-level edit to a scheduled exercise entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryUpdate {
    Sets(u32),
    Reps(u32),
    Notes(String),
}

// ============================================================================
// Helpers
// ============================================================================

/// Anything carrying a sibling-unique numeric id
pub trait Identified {
    fn id(&self) -> u32;
}

impl Identified for ExerciseDefinition {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Identified for Day {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Identified for Week {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Identified for Program {
    fn id(&self) -> u32 {
        self.id
    }
}

/// Next id for a sibling collection: `max(existing) + 1`, or 1 when empty
///
/// Ids read back from JSON may already sit at `u32::MAX`; that is an error,
/// never a wrap to 0.
pub fn next_id<T: Identified>(items: &[T]) -> Result<u32> {
    let max = items.iter().map(Identified::id).max().unwrap_or(0);
    max.checked_add(1)
        .ok_or_else(|| Error::InvalidValue("id space exhausted".into()))
}

/// Current time as fractional epoch seconds
fn timestamp_id() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
