//! Exercise catalog: the library of movements programs are built from.
//!
//! The catalog is loaded once per session from a CSV file. When the file is
//! missing a small built-in set of movements is used instead.

use crate::types::{next_id, ExerciseDefinition};
use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Filter value that matches every category or body part
pub const ALL: &str = "All";

/// Cached fallback catalog - built once and reused when no library file exists
static FALLBACK_CATALOG: Lazy<Vec<ExerciseDefinition>> = Lazy::new(build_fallback);

fn build_fallback() -> Vec<ExerciseDefinition> {
    [
        ("Barbell Squat", "Squat"),
        ("Bench Press", "Horizontal Push"),
        ("Deadlift", "Hinge"),
        ("Pull Ups", "Vertical Pull"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, body_part), id)| ExerciseDefinition {
        id,
        name: name.into(),
        body_part: body_part.into(),
        category: "Movement_Pattern".into(),
    })
    .collect()
}

/// A row of the exercise library file
#[derive(Debug, Deserialize)]
struct LibraryRow {
    #[serde(rename = "Exercise")]
    exercise: String,
    #[serde(rename = "Body_Part")]
    body_part: String,
    #[serde(rename = "Category")]
    category: String,
}

/// Criteria for narrowing the catalog down in a picker
#[derive(Clone, Debug)]
pub struct CatalogFilter {
    /// Case-insensitive substring of the exercise name; empty matches all
    pub search: String,
    pub category: String,
    pub body_part: String,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL.into(),
            body_part: ALL.into(),
        }
    }
}

impl CatalogFilter {
    fn matches(&self, exercise: &ExerciseDefinition, needle: &str) -> bool {
        (needle.is_empty() || exercise.name.to_lowercase().contains(needle))
            && (self.category == ALL || exercise.category == self.category)
            && (self.body_part == ALL || exercise.body_part == self.body_part)
    }
}

/// Ordered collection of exercise definitions
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExerciseCatalog {
    exercises: Vec<ExerciseDefinition>,
}

impl ExerciseCatalog {
    /// Build a catalog from already-identified definitions
    pub fn from_definitions(exercises: Vec<ExerciseDefinition>) -> Self {
        Self { exercises }
    }

    /// The built-in four-movement catalog
    pub fn fallback() -> Self {
        Self::from_definitions(FALLBACK_CATALOG.clone())
    }

    /// Load the catalog from a CSV library file
    ///
    /// Ids are assigned 1.. in row order. A missing file yields the fallback
    /// catalog; any other read or parse failure is returned.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(
                "Exercise library not found at {:?}, using built-in catalog",
                path
            );
            return Ok(Self::fallback());
        }

        let mut reader = csv::Reader::from_path(path)?;
        let mut exercises = Vec::new();
        for (row, id) in reader.deserialize::<LibraryRow>().zip(1..) {
            let row = row?;
            exercises.push(ExerciseDefinition {
                id,
                name: row.exercise,
                body_part: row.body_part,
                category: row.category,
            });
        }

        tracing::info!("Loaded {} exercises from {:?}", exercises.len(), path);
        Ok(Self { exercises })
    }

    /// Append a user-defined exercise
    ///
    /// All three fields are required; on failure the catalog is unchanged.
    pub fn add_custom(
        &mut self,
        name: &str,
        category: &str,
        body_part: &str,
    ) -> Result<&ExerciseDefinition> {
        for (field, value) in [("name", name), ("category", category), ("body part", body_part)] {
            if value.is_empty() {
                return Err(Error::Validation(format!(
                    "custom exercise {} must not be empty",
                    field
                )));
            }
        }

        let id = next_id(&self.exercises)?;
        self.exercises.push(ExerciseDefinition {
            id,
            name: name.into(),
            body_part: body_part.into(),
            category: category.into(),
        });
        tracing::debug!("Added custom exercise {} ({})", id, name);

        let index = self.exercises.len() - 1;
        Ok(&self.exercises[index])
    }

    /// Exercises matching `filter`, in catalog order
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&ExerciseDefinition> {
        let needle = filter.search.to_lowercase();
        self.exercises
            .iter()
            .filter(|e| filter.matches(e, &needle))
            .collect()
    }

    /// Sorted distinct categories present in the catalog
    pub fn distinct_categories(&self) -> BTreeSet<String> {
        self.exercises.iter().map(|e| e.category.clone()).collect()
    }

    /// Sorted distinct body parts present in the catalog
    pub fn distinct_body_parts(&self) -> BTreeSet<String> {
        self.exercises.iter().map(|e| e.body_part.clone()).collect()
    }

    pub fn get(&self, id: u32) -> Option<&ExerciseDefinition> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExerciseDefinition> {
        self.exercises.iter()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}
