//! Editing session: the catalog and program book a front end works against.
//!
//! One `Session` is created when a user starts editing and dropped when they
//! are done. Front ends hold it and pass it to every action handler.

use crate::catalog::ExerciseCatalog;
use crate::program::ProgramBook;
use crate::{Config, Error, Result};

/// State owned by a single editing session
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub catalog: ExerciseCatalog,
    pub programs: ProgramBook,
}

impl Session {
    /// Start a session over an already loaded catalog
    pub fn new(catalog: ExerciseCatalog) -> Self {
        Self {
            catalog,
            programs: ProgramBook::new(),
        }
    }

    /// Start a session, loading the catalog from the configured library file
    pub fn start(config: &Config) -> Result<Self> {
        let catalog = ExerciseCatalog::load(&config.catalog.path)?;
        tracing::debug!("Session started with {} exercises", catalog.len());
        Ok(Self::new(catalog))
    }

    /// Schedule the catalog exercise with `exercise_id` on a day
    pub fn add_exercise_by_id(
        &mut self,
        p: usize,
        w: usize,
        d: usize,
        exercise_id: u32,
    ) -> Result<usize> {
        let definition = self
            .catalog
            .get(exercise_id)
            .ok_or(Error::UnknownExercise(exercise_id))?;
        self.programs.add_exercise(p, w, d, definition)
    }
}
