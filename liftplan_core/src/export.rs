//! Program export to JSON and to the spreadsheet CSV grid.
//!
//! The CSV layout places every day of a week side by side. Each day occupies
//! a blank lead cell plus seven data columns, with one blank spacer cell
//! between days:
//!
//! ```text
//! "Program"
//!
//!
//!
//! "Week 1"
//! ,"Day 1",,,,,,,,,"Day 2",,,,,,
//! ,"Exercise","Sets","Reps","Intensity","Load","Actual","Comments",,,"Exercise",...
//! ,"Squat","3","10","","","","",,,"","","","","","",""
//! ```
//!
//! Blank cells are written bare; every text cell is double-quoted. A `"`
//! inside a name or note is doubled (`""`) so the grid stays valid CSV.

use crate::{Program, Result, Week};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const COLUMN_HEADERS: [&str; 7] = [
    "Exercise",
    "Sets",
    "Reps",
    "Intensity",
    "Load",
    "Actual",
    "Comments",
];

/// Cells per day in the separator line between weeks
const SEPARATOR_CELLS_PER_DAY: usize = 9;

/// Supported export formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Serialize a program as pretty-printed JSON (2-space indentation)
///
/// Besides `id`, `name` and `weeks`, the object carries `week_sequence`, the
/// counter `repeat_week` labels from, so a reloaded program keeps numbering
/// where it left off.
pub fn to_json(program: &Program) -> Result<String> {
    Ok(serde_json::to_string_pretty(program)?)
}

/// Parse a program back from its JSON export
pub fn from_json(json: &str) -> Result<Program> {
    Ok(serde_json::from_str(json)?)
}

/// A single CSV cell
enum Cell<'a> {
    Blank,
    Text(&'a str),
    Owned(String),
}

impl Cell<'_> {
    fn render(&self, out: &mut String) {
        let text = match self {
            Cell::Blank => return,
            Cell::Text(s) => *s,
            Cell::Owned(s) => s.as_str(),
        };
        out.push('"');
        out.push_str(&text.replace('"', "\"\""));
        out.push('"');
    }
}

fn join(cells: &[Cell<'_>]) -> String {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        cell.render(&mut line);
    }
    line
}

/// Build one row of a week: `fill` supplies the seven data cells of a day
fn week_row<'a, F>(week: &'a Week, mut fill: F) -> String
where
    F: FnMut(usize) -> Vec<Cell<'a>>,
{
    let mut cells = Vec::new();
    for day_idx in 0..week.days.len() {
        cells.push(Cell::Blank);
        cells.extend(fill(day_idx));
        if day_idx + 1 < week.days.len() {
            cells.push(Cell::Blank);
        }
    }
    join(&cells)
}

fn push_week(lines: &mut Vec<String>, week: &Week) {
    lines.push(String::new());
    lines.push(String::new());
    lines.push(join(&[Cell::Text(&week.name)]));

    lines.push(week_row(week, move |d| {
        let mut cells = vec![Cell::Text(&week.days[d].name)];
        cells.extend((0..6).map(|_| Cell::Blank));
        cells
    }));

    lines.push(week_row(week, |_| {
        COLUMN_HEADERS.into_iter().map(Cell::Text).collect()
    }));

    for slot in 0..week.max_exercises() {
        lines.push(week_row(week, move |d| match week.days[d].exercises.get(slot) {
            Some(ex) => vec![
                Cell::Text(&ex.name),
                Cell::Owned(ex.sets.to_string()),
                Cell::Owned(ex.reps.to_string()),
                Cell::Text(""),
                Cell::Text(""),
                Cell::Text(""),
                Cell::Text(&ex.notes),
            ],
            None => (0..7).map(|_| Cell::Text("")).collect(),
        }));
    }

    lines.push(String::new());
    lines.push(String::new());
}

/// Render a program as the side-by-side CSV grid
///
/// Lines are joined with `\n`; there is no trailing newline.
pub fn to_csv(program: &Program) -> String {
    let mut lines = vec![join(&[Cell::Text(&program.name)]), String::new()];

    for (week_idx, week) in program.weeks.iter().enumerate() {
        push_week(&mut lines, week);

        if week_idx + 1 < program.weeks.len() {
            let separator: Vec<Cell<'_>> = (0..week.days.len() * SEPARATOR_CELLS_PER_DAY)
                .map(|_| Cell::Text(""))
                .collect();
            lines.push(join(&separator));
        }
    }

    lines.join("\n")
}

/// Render a program in the requested format
pub fn render(program: &Program, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => to_json(program),
        ExportFormat::Csv => Ok(to_csv(program)),
    }
}

/// Download file name for a program: spaces become underscores
pub fn export_file_name(program: &Program, format: ExportFormat) -> String {
    format!("{}.{}", program.name.replace(' ', "_"), format.extension())
}

/// Write a program export into `dir`, returning the written path
///
/// The file is written to a temp file in the same directory and renamed into
/// place, so readers never see a partial export.
pub fn write_export(program: &Program, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(program, format));
    write_atomic(&path, &render(program, format)?)?;

    tracing::info!("Exported '{}' to {:?}", program.name, path);
    Ok(path)
}

/// Overwrite a program file in place with its JSON form
///
/// Same temp-file-and-rename write as [`write_export`]: if anything fails the
/// previous file is left as it was.
pub fn save_program(program: &Program, path: &Path) -> Result<()> {
    write_atomic(path, &to_json(program)?)?;
    tracing::debug!("Saved '{}' to {:?}", program.name, path);
    Ok(())
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| crate::Error::Io(e.error))?;
    Ok(())
}
