//! The program book: every program being edited in a session.
//!
//! All mutators address the tree positionally (program, week, day, exercise
//! indices). Ids on the nodes are display and export metadata only. Every
//! index is bounds-checked and a failed operation leaves the book untouched.

use crate::error::Level;
use crate::types::{next_id, Day, EntryUpdate, ExerciseDefinition, ExerciseEntry, Program, Week};
use crate::{Error, Result};

/// Ordered program collection plus the currently selected program
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgramBook {
    programs: Vec<Program>,
    selected: Option<usize>,
}

fn check(level: Level, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfRange { level, index, len })
    }
}

fn require_name(what: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::Validation(format!("{} name must not be empty", what)));
    }
    Ok(())
}

impl ProgramBook {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------------

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_program(&self) -> Option<&Program> {
        self.selected.and_then(|i| self.programs.get(i))
    }

    pub fn program(&self, p: usize) -> Result<&Program> {
        check(Level::Program, p, self.programs.len())?;
        Ok(&self.programs[p])
    }

    /// Make `p` the current program
    pub fn select(&mut self, p: usize) -> Result<()> {
        check(Level::Program, p, self.programs.len())?;
        self.selected = Some(p);
        Ok(())
    }

    fn program_mut(&mut self, p: usize) -> Result<&mut Program> {
        let len = self.programs.len();
        self.programs
            .get_mut(p)
            .ok_or(Error::IndexOutOfRange { level: Level::Program, index: p, len })
    }

    fn week_mut(&mut self, p: usize, w: usize) -> Result<&mut Week> {
        let program = self.program_mut(p)?;
        let len = program.weeks.len();
        program
            .weeks
            .get_mut(w)
            .ok_or(Error::IndexOutOfRange { level: Level::Week, index: w, len })
    }

    fn day_mut(&mut self, p: usize, w: usize, d: usize) -> Result<&mut Day> {
        let week = self.week_mut(p, w)?;
        let len = week.days.len();
        week.days
            .get_mut(d)
            .ok_or(Error::IndexOutOfRange { level: Level::Day, index: d, len })
    }

    fn entry_mut(&mut self, p: usize, w: usize, d: usize, e: usize) -> Result<&mut ExerciseEntry> {
        let day = self.day_mut(p, w, d)?;
        let len = day.exercises.len();
        day.exercises
            .get_mut(e)
            .ok_or(Error::IndexOutOfRange { level: Level::Exercise, index: e, len })
    }

    // ------------------------------------------------------------------------
    // Programs
    // ------------------------------------------------------------------------

    /// Create a program with one "Week 1" / "Day 1" and select it
    pub fn create_program(&mut self, name: &str) -> Result<&Program> {
        require_name("program", name)?;

        let id = next_id(&self.programs)?;
        self.programs.push(Program::new(id, name));
        let index = self.programs.len() - 1;
        self.selected = Some(index);

        tracing::debug!("Created program {} '{}' at index {}", id, name, index);
        Ok(&self.programs[index])
    }

    /// Adopt an existing program (e.g. one read back from a JSON export)
    ///
    /// The program keeps its id unless a sibling already uses it, in which
    /// case it is given the next free id. The adopted program is selected.
    pub fn insert_program(&mut self, mut program: Program) -> Result<usize> {
        if self.programs.iter().any(|p| p.id == program.id) {
            program.id = next_id(&self.programs)?;
        }
        self.programs.push(program);
        let index = self.programs.len() - 1;
        self.selected = Some(index);
        Ok(index)
    }

    pub fn rename_program(&mut self, p: usize, name: &str) -> Result<()> {
        require_name("program", name)?;
        self.program_mut(p)?.name = name.into();
        Ok(())
    }

    /// Remove program `p`, keeping the selection pointed at the same program
    ///
    /// Removing the selected program clears the selection; removing one
    /// before it shifts the selection down by one.
    pub fn delete_program(&mut self, p: usize) -> Result<Program> {
        check(Level::Program, p, self.programs.len())?;
        let removed = self.programs.remove(p);

        self.selected = match self.selected {
            Some(s) if s == p => None,
            Some(s) if s > p => Some(s - 1),
            other => other,
        };

        tracing::debug!("Deleted program '{}' at index {}", removed.name, p);
        Ok(removed)
    }

    // ------------------------------------------------------------------------
    // Weeks
    // ------------------------------------------------------------------------

    /// Append a default week (with one "Day 1") and return its index
    pub fn add_week(&mut self, p: usize) -> Result<usize> {
        let program = self.program_mut(p)?;
        let number = program.weeks.len() + 1;
        let id = next_id(&program.weeks)?;
        program.weeks.push(Week::numbered(id, number));
        program.week_sequence = program.week_sequence.max(number as u32);

        tracing::debug!("Added week {} to program {}", id, p);
        Ok(program.weeks.len() - 1)
    }

    pub fn rename_week(&mut self, p: usize, w: usize, name: &str) -> Result<()> {
        self.week_mut(p, w)?.name = name.into();
        Ok(())
    }

    pub fn delete_week(&mut self, p: usize, w: usize) -> Result<Week> {
        let program = self.program_mut(p)?;
        check(Level::Week, w, program.weeks.len())?;
        Ok(program.weeks.remove(w))
    }

    /// Duplicate week `w` as an independent copy appended to the program
    ///
    /// The copy gets the next sibling id and the next label in the program's
    /// week sequence, whatever the source week is called.
    pub fn repeat_week(&mut self, p: usize, w: usize) -> Result<usize> {
        let program = self.program_mut(p)?;
        check(Level::Week, w, program.weeks.len())?;

        let number = program
            .week_sequence
            .max(program.weeks.len() as u32)
            .checked_add(1)
            .ok_or_else(|| Error::InvalidValue("week sequence exhausted".into()))?;
        let id = next_id(&program.weeks)?;
        let mut copy = program.weeks[w].clone();
        copy.id = id;
        copy.name = format!("Week {}", number);

        program.week_sequence = number;
        program.weeks.push(copy);

        tracing::debug!("Repeated week {} of program {} as week {}", w, p, number);
        Ok(program.weeks.len() - 1)
    }

    // ------------------------------------------------------------------------
    // Days
    // ------------------------------------------------------------------------

    /// Append an empty default day and return its index
    pub fn add_day(&mut self, p: usize, w: usize) -> Result<usize> {
        let week = self.week_mut(p, w)?;
        let id = next_id(&week.days)?;
        week.days.push(Day::numbered(id, week.days.len() + 1));
        Ok(week.days.len() - 1)
    }

    pub fn rename_day(&mut self, p: usize, w: usize, d: usize, name: &str) -> Result<()> {
        self.day_mut(p, w, d)?.name = name.into();
        Ok(())
    }

    pub fn delete_day(&mut self, p: usize, w: usize, d: usize) -> Result<Day> {
        let week = self.week_mut(p, w)?;
        check(Level::Day, d, week.days.len())?;
        Ok(week.days.remove(d))
    }

    // ------------------------------------------------------------------------
    // Exercises
    // ------------------------------------------------------------------------

    /// Schedule `definition` on a day with the default prescription
    pub fn add_exercise(
        &mut self,
        p: usize,
        w: usize,
        d: usize,
        definition: &ExerciseDefinition,
    ) -> Result<usize> {
        let day = self.day_mut(p, w, d)?;
        day.exercises.push(ExerciseEntry::from_definition(definition));

        tracing::debug!("Added '{}' to {}", definition.name, day.name);
        Ok(day.exercises.len() - 1)
    }

    /// Apply a field-level edit to one entry
    ///
    /// Sets and reps must be at least 1; smaller values are rejected.
    pub fn update_exercise(
        &mut self,
        p: usize,
        w: usize,
        d: usize,
        e: usize,
        update: EntryUpdate,
    ) -> Result<()> {
        let entry = self.entry_mut(p, w, d, e)?;
        match update {
            EntryUpdate::Sets(0) => {
                return Err(Error::InvalidValue("sets must be at least 1".into()))
            }
            EntryUpdate::Reps(0) => {
                return Err(Error::InvalidValue("reps must be at least 1".into()))
            }
            EntryUpdate::Sets(sets) => entry.sets = sets,
            EntryUpdate::Reps(reps) => entry.reps = reps,
            EntryUpdate::Notes(notes) => entry.notes = notes,
        }
        Ok(())
    }

    pub fn delete_exercise(&mut self, p: usize, w: usize, d: usize, e: usize) -> Result<ExerciseEntry> {
        let day = self.day_mut(p, w, d)?;
        check(Level::Exercise, e, day.exercises.len())?;
        Ok(day.exercises.remove(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExerciseCatalog;

    fn squat() -> ExerciseDefinition {
        ExerciseCatalog::fallback().get(1).unwrap().clone()
    }

    fn book_with(names: &[&str]) -> ProgramBook {
        let mut book = ProgramBook::new();
        for name in names {
            book.create_program(name).unwrap();
        }
        book
    }

    #[test]
    fn test_create_program_shape_and_selection() {
        let mut book = ProgramBook::new();
        let program = book.create_program("Hypertrophy").unwrap();

        assert_eq!(program.id, 1);
        assert_eq!(program.weeks.len(), 1);
        assert_eq!(program.weeks[0].name, "Week 1");
        assert_eq!(program.weeks[0].days.len(), 1);
        assert_eq!(program.weeks[0].days[0].name, "Day 1");
        assert!(program.weeks[0].days[0].exercises.is_empty());
        assert_eq!(book.selected(), Some(0));

        book.create_program("Peaking").unwrap();
        assert_eq!(book.selected(), Some(1));
        assert_eq!(book.program(1).unwrap().id, 2);
    }

    #[test]
    fn test_create_program_requires_name() {
        let mut book = ProgramBook::new();
        assert!(matches!(book.create_program(""), Err(Error::Validation(_))));
        assert!(book.is_empty());
        assert_eq!(book.selected(), None);
    }

    #[test]
    fn test_program_ids_follow_max_after_delete() {
        let mut book = book_with(&["A", "B", "C"]);
        book.delete_program(0).unwrap();
        let program = book.create_program("D").unwrap();
        assert_eq!(program.id, 4);
    }

    #[test]
    fn test_add_week_and_day_defaults() {
        let mut book = book_with(&["A"]);
        let w = book.add_week(0).unwrap();
        assert_eq!(w, 1);
        let d = book.add_day(0, 1).unwrap();
        assert_eq!(d, 1);

        let program = book.program(0).unwrap();
        let week = &program.weeks[1];
        assert_eq!(week.id, 2);
        assert_eq!(week.name, "Week 2");
        assert_eq!(week.days[0].name, "Day 1");
        assert_eq!(week.days[1].id, 2);
        assert_eq!(week.days[1].name, "Day 2");
        assert!(week.days[1].exercises.is_empty());
    }

    #[test]
    fn test_ids_use_max_plus_one_after_deletes() {
        let mut book = book_with(&["A"]);
        book.add_day(0, 0).unwrap();
        book.add_day(0, 0).unwrap();
        // Days have ids 1, 2, 3; remove the middle one
        book.delete_day(0, 0, 1).unwrap();
        book.add_day(0, 0).unwrap();

        let days = &book.program(0).unwrap().weeks[0].days;
        let ids: Vec<u32> = days.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        // Name reflects the count, not the id
        assert_eq!(days[2].name, "Day 3");
    }

    #[test]
    fn test_add_exercise_and_update_fields() {
        let mut book = book_with(&["A"]);
        let e = book.add_exercise(0, 0, 0, &squat()).unwrap();
        assert_eq!(e, 0);

        book.update_exercise(0, 0, 0, 0, EntryUpdate::Sets(5)).unwrap();
        book.update_exercise(0, 0, 0, 0, EntryUpdate::Reps(3)).unwrap();
        book.update_exercise(0, 0, 0, 0, EntryUpdate::Notes("RPE 8".into()))
            .unwrap();

        let entry = &book.program(0).unwrap().weeks[0].days[0].exercises[0];
        assert_eq!(entry.exercise_id, 1);
        assert_eq!(entry.name, "Barbell Squat");
        assert_eq!(entry.sets, 5);
        assert_eq!(entry.reps, 3);
        assert_eq!(entry.notes, "RPE 8");
    }

    #[test]
    fn test_update_rejects_zero_sets_and_reps() {
        let mut book = book_with(&["A"]);
        book.add_exercise(0, 0, 0, &squat()).unwrap();

        let result = book.update_exercise(0, 0, 0, 0, EntryUpdate::Sets(0));
        assert!(matches!(result, Err(Error::InvalidValue(_))));
        let result = book.update_exercise(0, 0, 0, 0, EntryUpdate::Reps(0));
        assert!(matches!(result, Err(Error::InvalidValue(_))));

        let entry = &book.program(0).unwrap().weeks[0].days[0].exercises[0];
        assert_eq!(entry.sets, 3);
        assert_eq!(entry.reps, 10);
    }

    #[test]
    fn test_out_of_range_indices_are_errors() {
        let mut book = book_with(&["A"]);
        let before = book.clone();

        assert!(matches!(
            book.add_week(3),
            Err(Error::IndexOutOfRange { level: Level::Program, index: 3, len: 1 })
        ));
        assert!(matches!(
            book.add_day(0, 1),
            Err(Error::IndexOutOfRange { level: Level::Week, .. })
        ));
        assert!(matches!(
            book.add_exercise(0, 0, 2, &squat()),
            Err(Error::IndexOutOfRange { level: Level::Day, .. })
        ));
        assert!(matches!(
            book.delete_exercise(0, 0, 0, 0),
            Err(Error::IndexOutOfRange { level: Level::Exercise, .. })
        ));
        assert!(book.rename_week(0, 9, "X").is_err());
        assert!(book.repeat_week(0, 1).is_err());
        assert!(book.delete_program(1).is_err());
        assert!(book.select(1).is_err());

        assert_eq!(book, before);
    }

    #[test]
    fn test_delete_selected_program_clears_selection() {
        let mut book = book_with(&["A", "B", "C"]);
        book.select(1).unwrap();
        book.delete_program(1).unwrap();
        assert_eq!(book.selected(), None);
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_delete_earlier_program_shifts_selection() {
        let mut book = book_with(&["A", "B", "C"]);
        assert_eq!(book.selected(), Some(2));
        book.delete_program(0).unwrap();
        assert_eq!(book.selected(), Some(1));
        assert_eq!(book.selected_program().unwrap().name, "C");
    }

    #[test]
    fn test_delete_later_program_keeps_selection_zero() {
        let mut book = book_with(&["A", "B"]);
        book.select(0).unwrap();
        book.delete_program(1).unwrap();
        assert_eq!(book.selected(), Some(0));
        assert_eq!(book.selected_program().unwrap().name, "A");
    }

    #[test]
    fn test_selection_one_shifts_to_zero() {
        let mut book = book_with(&["A", "B"]);
        book.select(1).unwrap();
        book.delete_program(0).unwrap();
        assert_eq!(book.selected(), Some(0));
        assert_eq!(book.selected_program().unwrap().name, "B");
    }

    #[test]
    fn test_rename_week_and_day_allow_empty() {
        let mut book = book_with(&["A"]);
        book.rename_week(0, 0, "Deload").unwrap();
        book.rename_day(0, 0, 0, "").unwrap();

        let week = &book.program(0).unwrap().weeks[0];
        assert_eq!(week.name, "Deload");
        assert_eq!(week.days[0].name, "");
    }

    #[test]
    fn test_rename_program_requires_name() {
        let mut book = book_with(&["A"]);
        assert!(matches!(book.rename_program(0, ""), Err(Error::Validation(_))));
        book.rename_program(0, "Base").unwrap();
        assert_eq!(book.program(0).unwrap().name, "Base");
    }

    #[test]
    fn test_repeat_week_names_next_in_sequence() {
        let mut book = book_with(&["A"]);
        book.add_week(0).unwrap();
        let w = book.repeat_week(0, 1).unwrap();

        let week = &book.program(0).unwrap().weeks[w];
        assert_eq!(w, 2);
        assert_eq!(week.name, "Week 3");
        assert_eq!(week.id, 3);
    }

    #[test]
    fn test_repeat_week_ignores_renamed_source() {
        let mut book = book_with(&["A"]);
        book.rename_week(0, 0, "Intro week").unwrap();
        book.repeat_week(0, 0).unwrap();
        book.repeat_week(0, 0).unwrap();

        let names: Vec<_> = book.program(0).unwrap().weeks.iter().map(|w| w.name.clone()).collect();
        assert_eq!(names, vec!["Intro week", "Week 2", "Week 3"]);
    }

    #[test]
    fn test_repeat_week_is_deep_copy() {
        let mut book = book_with(&["A"]);
        book.add_exercise(0, 0, 0, &squat()).unwrap();
        let w = book.repeat_week(0, 0).unwrap();

        book.update_exercise(0, w, 0, 0, EntryUpdate::Sets(8)).unwrap();
        book.add_day(0, w).unwrap();

        let program = book.program(0).unwrap();
        assert_eq!(program.weeks[0].days.len(), 1);
        assert_eq!(program.weeks[0].days[0].exercises[0].sets, 3);
        assert_eq!(program.weeks[w].days.len(), 2);
        assert_eq!(program.weeks[w].days[0].exercises[0].sets, 8);
    }

    #[test]
    fn test_delete_week_day_exercise_shift_indices() {
        let mut book = book_with(&["A"]);
        book.add_week(0).unwrap();
        book.add_week(0).unwrap();
        let removed = book.delete_week(0, 1).unwrap();
        assert_eq!(removed.name, "Week 2");
        assert_eq!(book.program(0).unwrap().weeks[1].name, "Week 3");

        let bench = ExerciseCatalog::fallback().get(2).unwrap().clone();
        book.add_exercise(0, 0, 0, &squat()).unwrap();
        book.add_exercise(0, 0, 0, &bench).unwrap();
        book.delete_exercise(0, 0, 0, 0).unwrap();
        let exercises = &book.program(0).unwrap().weeks[0].days[0].exercises;
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].name, "Bench Press");

        book.delete_day(0, 0, 0).unwrap();
        assert!(book.program(0).unwrap().weeks[0].days.is_empty());
    }

    #[test]
    fn test_insert_program_reassigns_colliding_id() {
        let mut book = book_with(&["A"]);
        let index = book.insert_program(Program::new(1, "Imported")).unwrap();
        assert_eq!(index, 1);
        assert_eq!(book.program(1).unwrap().id, 2);
        assert_eq!(book.selected(), Some(1));

        let index = book.insert_program(Program::new(9, "Other")).unwrap();
        assert_eq!(book.program(index).unwrap().id, 9);
    }

    fn imported(json: &str) -> ProgramBook {
        let mut book = ProgramBook::new();
        let program: Program = serde_json::from_str(json).unwrap();
        book.insert_program(program).unwrap();
        book
    }

    #[test]
    fn test_repeat_week_with_max_week_id_is_error() {
        let mut book = imported(
            r#"{"id": 1, "name": "Imported", "weeks": [
                {"id": 4294967295, "name": "Week 1", "days": []}
            ]}"#,
        );
        let before = book.clone();

        assert!(matches!(book.repeat_week(0, 0), Err(Error::InvalidValue(_))));
        assert!(matches!(book.add_week(0), Err(Error::InvalidValue(_))));
        assert_eq!(book, before);
    }

    #[test]
    fn test_repeat_week_with_max_sequence_is_error() {
        let mut book = imported(
            r#"{"id": 1, "name": "Imported", "week_sequence": 4294967295, "weeks": [
                {"id": 1, "name": "Week 1", "days": []}
            ]}"#,
        );
        let before = book.clone();

        assert!(matches!(book.repeat_week(0, 0), Err(Error::InvalidValue(_))));
        assert_eq!(book, before);
    }

    #[test]
    fn test_insert_program_with_max_id_collision_is_error() {
        let mut book = imported(r#"{"id": 4294967295, "name": "A", "weeks": []}"#);
        let result = book.insert_program(Program::new(u32::MAX, "B"));
        assert!(matches!(result, Err(Error::InvalidValue(_))));
        assert_eq!(book.len(), 1);
    }
}
