use clap::{Parser, Subcommand, ValueEnum};
use liftplan_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "liftplan")]
#[command(about = "Workout program designer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override exercise library CSV
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List exercises in the library
    Catalog {
        /// Case-insensitive name search
        #[arg(long, default_value = "")]
        search: String,

        /// Exact category, or "All"
        #[arg(long, default_value = ALL)]
        category: String,

        /// Exact body part, or "All"
        #[arg(long, default_value = ALL)]
        body_part: String,

        /// Print the available categories and body parts instead
        #[arg(long)]
        options: bool,
    },

    /// Create a program and write it as JSON
    New {
        name: String,

        /// Number of weeks
        #[arg(long, default_value_t = 1)]
        weeks: usize,

        /// Days in each week
        #[arg(long, default_value_t = 1)]
        days: usize,

        /// Output directory (defaults to the configured export dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Add a library exercise to a day of a program file
    Add {
        file: PathBuf,

        /// Week position, starting at 1
        #[arg(long)]
        week: usize,

        /// Day position within the week, starting at 1
        #[arg(long)]
        day: usize,

        /// Library exercise id
        #[arg(long)]
        exercise: u32,

        #[arg(long)]
        sets: Option<u32>,

        #[arg(long)]
        reps: Option<u32>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Duplicate a week of a program file
    RepeatWeek {
        file: PathBuf,

        /// Week position, starting at 1
        #[arg(long)]
        week: usize,
    },

    /// Export a program file as CSV and/or JSON
    Export {
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = FormatArg::Both)]
        format: FormatArg,

        /// Output directory (defaults to the configured export dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
    Both,
}

impl FormatArg {
    fn formats(self) -> &'static [ExportFormat] {
        match self {
            FormatArg::Csv => &[ExportFormat::Csv],
            FormatArg::Json => &[ExportFormat::Json],
            FormatArg::Both => &[ExportFormat::Csv, ExportFormat::Json],
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    liftplan_core::logging::init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(catalog) = cli.catalog {
        config.catalog.path = catalog;
    }
    let mut session = Session::start(&config)?;

    match cli.command {
        Commands::Catalog {
            search,
            category,
            body_part,
            options,
        } => {
            let filter = CatalogFilter {
                search,
                category,
                body_part,
            };
            cmd_catalog(&session, &filter, options);
            Ok(())
        }
        Commands::New {
            name,
            weeks,
            days,
            out,
        } => {
            let out = out.unwrap_or_else(|| config.export.output_dir.clone());
            cmd_new(&mut session, &name, weeks, days, &out)
        }
        Commands::Add {
            file,
            week,
            day,
            exercise,
            sets,
            reps,
            notes,
        } => cmd_add(
            &mut session,
            &file,
            (week, day),
            exercise,
            sets,
            reps,
            notes,
        ),
        Commands::RepeatWeek { file, week } => cmd_repeat_week(&mut session, &file, week),
        Commands::Export { file, format, out } => {
            let out = out.unwrap_or_else(|| config.export.output_dir.clone());
            cmd_export(&mut session, &file, format, &out)
        }
    }
}

fn cmd_catalog(session: &Session, filter: &CatalogFilter, options: bool) {
    if options {
        println!("Categories:");
        for category in session.catalog.distinct_categories() {
            println!("  {}", category);
        }
        println!("Body parts:");
        for body_part in session.catalog.distinct_body_parts() {
            println!("  {}", body_part);
        }
        return;
    }

    let matches = session.catalog.filter(filter);
    if matches.is_empty() {
        println!("No exercises match.");
        return;
    }
    for exercise in matches {
        println!(
            "{:>4}  {} ({}) [{}]",
            exercise.id, exercise.name, exercise.body_part, exercise.category
        );
    }
}

fn cmd_new(session: &mut Session, name: &str, weeks: usize, days: usize, out: &Path) -> Result<()> {
    if weeks == 0 || days == 0 {
        return Err(Error::Validation(
            "a program needs at least one week and one day".into(),
        ));
    }

    session.programs.create_program(name)?;
    let p = session.programs.len() - 1;
    for _ in 1..weeks {
        session.programs.add_week(p)?;
    }
    for w in 0..weeks {
        for _ in 1..days {
            session.programs.add_day(p, w)?;
        }
    }

    let path = write_export(session.programs.program(p)?, ExportFormat::Json, out)?;
    println!("✓ Created '{}'", name);
    println!("  {}", path.display());
    Ok(())
}

fn cmd_add(
    session: &mut Session,
    file: &Path,
    (week, day): (usize, usize),
    exercise: u32,
    sets: Option<u32>,
    reps: Option<u32>,
    notes: Option<String>,
) -> Result<()> {
    let p = open_program(session, file)?;
    let (w, d) = (position(week)?, position(day)?);

    let e = session.add_exercise_by_id(p, w, d, exercise)?;
    let updates = sets
        .map(EntryUpdate::Sets)
        .into_iter()
        .chain(reps.map(EntryUpdate::Reps))
        .chain(notes.map(EntryUpdate::Notes));
    for update in updates {
        session.programs.update_exercise(p, w, d, e, update)?;
    }

    store_program(session, p, file)?;
    let program = session.programs.program(p)?;
    let entry = &program.weeks[w].days[d].exercises[e];
    println!(
        "✓ Added {} ({}x{}) to {} / {}",
        entry.name, entry.sets, entry.reps, program.weeks[w].name, program.weeks[w].days[d].name
    );
    Ok(())
}

fn cmd_repeat_week(session: &mut Session, file: &Path, week: usize) -> Result<()> {
    let p = open_program(session, file)?;
    let w = session.programs.repeat_week(p, position(week)?)?;

    store_program(session, p, file)?;
    println!(
        "✓ Added {}",
        session.programs.program(p)?.weeks[w].name
    );
    Ok(())
}

fn cmd_export(session: &mut Session, file: &Path, format: FormatArg, out: &Path) -> Result<()> {
    let p = open_program(session, file)?;
    let program = session.programs.program(p)?;
    for &format in format.formats() {
        let path = write_export(program, format, out)?;
        println!("✓ Wrote {}", path.display());
    }
    Ok(())
}

/// Read a program file into the session and return its index
fn open_program(session: &mut Session, file: &Path) -> Result<usize> {
    let contents = std::fs::read_to_string(file)?;
    let program = from_json(&contents)?;
    tracing::debug!("Opened '{}' from {:?}", program.name, file);
    session.programs.insert_program(program)
}

/// Write the edited program back over its file
fn store_program(session: &Session, p: usize, file: &Path) -> Result<()> {
    save_program(session.programs.program(p)?, file)
}

/// Convert a 1-based command-line position to an index
fn position(n: usize) -> Result<usize> {
    n.checked_sub(1)
        .ok_or_else(|| Error::Validation("positions start at 1".into()))
}
