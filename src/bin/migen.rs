//! migen CLI: generate Laravel migrations from `CREATE TABLE` statements.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

use migen::config::Config;
use migen::history::{MigrationRecord, NewRecord, RecordStore};
use migen::{MigrationGenerator, validate};

#[derive(Parser)]
#[command(name = "migen", version, about = "Generate Laravel migrations from SQL CREATE TABLE statements")]
struct Cli {
    /// Config file (default: ./migen.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root for saved migrations and the record history
    #[arg(long, global = true, env = "MIGEN_STORAGE_ROOT")]
    storage_root: Option<PathBuf>,

    /// Fail on column clauses that cannot be parsed instead of dropping them
    #[arg(long, global = true)]
    strict: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a migration and print it
    Generate {
        /// Migration name, e.g. create_users_table
        name: String,
        /// SQL file; reads stdin when omitted or "-"
        file: Option<PathBuf>,
        /// Keep the result in the record history
        #[arg(long)]
        record: bool,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Parse a CREATE TABLE statement and show the schema model
    Parse {
        file: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// List recorded migrations, newest first
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one recorded migration
    Show { id: u64 },
    /// Write a recorded migration to <storage_root>/migrations
    Save {
        id: u64,
        /// File base name; the timestamp prefix is added
        file_name: String,
    },
    /// Copy a recorded migration as a new unsaved record
    Duplicate { id: u64 },
    /// Delete a record and its saved file
    Delete { id: u64 },
    /// Write a recorded migration under its download file name
    Export {
        id: u64,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .compact()
        .init();
}

fn read_sql(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut sql = String::new();
            std::io::stdin()
                .read_to_string(&mut sql)
                .context("failed to read SQL from stdin")?;
            Ok(sql)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(root) = cli.storage_root {
        config.storage_root = root;
    }
    if cli.strict {
        config.strict = true;
    }
    let store = RecordStore::open(&config.storage_root);

    match cli.command {
        Commands::Generate {
            name,
            file,
            record,
            notes,
        } => generate(&config, &store, &name, file.as_deref(), record, notes),
        Commands::Parse { file, json } => parse(&config, file.as_deref(), json),
        Commands::List { page } => list(&store, page),
        Commands::Show { id } => {
            print_record(&store.get(id)?);
            Ok(())
        }
        Commands::Save { id, file_name } => {
            let record = store.save(id, &file_name)?;
            let path = record.migration_file_path.unwrap_or_default();
            println!(
                "{} {}",
                "✓ Saved:".green(),
                store.root().join(path).display()
            );
            Ok(())
        }
        Commands::Duplicate { id } => {
            let copy = store.duplicate(id)?;
            println!("{} #{} {}", "✓ Duplicated as".green(), copy.id, copy.name.cyan());
            Ok(())
        }
        Commands::Delete { id } => {
            let record = store.delete(id)?;
            println!("{} #{} {}", "✓ Deleted".green(), record.id, record.name);
            Ok(())
        }
        Commands::Export { id, out } => {
            let (file_name, content) = store.export(id)?;
            std::fs::create_dir_all(&out)?;
            let path = out.join(file_name);
            std::fs::write(&path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{} {}", "✓ Exported:".green(), path.display());
            Ok(())
        }
    }
}

fn generate(
    config: &Config,
    store: &RecordStore,
    name: &str,
    file: Option<&Path>,
    record: bool,
    notes: Option<String>,
) -> Result<()> {
    validate::migration_name(name)?;
    validate::notes(notes.as_deref())?;
    let sql = read_sql(file)?;
    validate::sql_schema(&sql, config.sql_limits())?;

    let generator = MigrationGenerator::new(config.parse_mode());
    let generated = generator
        .generate_detailed(name, &sql)
        .context("Error generating migration")?;

    print!("{}", generated.script);

    if record {
        let saved = store.create(NewRecord {
            notes,
            created_by: config.created_by.clone(),
            ..NewRecord::from_generated(name, generated)
        })?;
        eprintln!("{} #{}", "✓ Recorded as".green(), saved.id);
    }
    Ok(())
}

fn parse(config: &Config, file: Option<&Path>, json: bool) -> Result<()> {
    let sql = read_sql(file)?;
    let sanitized = migen::sanitize(&sql)?;
    let parser = migen::parser::SchemaParser::new(config.parse_mode());
    let table = parser.parse(sanitized.as_str())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("{} {}", "Table:".cyan().bold(), table.name.white().bold());
    for column in &table.columns {
        let mut flags = Vec::new();
        if column.primary {
            flags.push("primary");
        }
        if column.auto_increment {
            flags.push("auto_increment");
        }
        if column.unique {
            flags.push("unique");
        }
        if !column.nullable {
            flags.push("not null");
        }
        println!(
            "  {:<24} {:<20} {}",
            column.name.yellow(),
            column.descriptor.method.to_string(),
            flags.join(", ").dimmed()
        );
    }
    for index in &table.indexes {
        println!("  {} {:?} ({})", "index".blue(), index.kind, index.columns.join(", "));
    }
    for fk in &table.foreign_keys {
        println!(
            "  {} {} → {}.{}",
            "foreign".magenta(),
            fk.column,
            fk.references_table,
            fk.references_column
        );
    }
    Ok(())
}

fn list(store: &RecordStore, page: usize) -> Result<()> {
    let page = store.list(page)?;
    if page.data.is_empty() {
        println!("{}", "No migrations recorded.".dimmed());
        return Ok(());
    }

    for record in &page.data {
        println!(
            "  {:>4}  {:<40} {:<10} {}",
            record.id,
            record.name.cyan(),
            status_label(record),
            record.updated_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }
    println!();
    println!(
        "  Page {}/{} · {} total",
        page.current_page, page.last_page, page.total
    );
    Ok(())
}

fn status_label(record: &MigrationRecord) -> ColoredString {
    use migen::history::Status;
    match record.status {
        Status::Generated => record.status.as_str().yellow(),
        Status::Saved => record.status.as_str().green(),
        Status::Error => record.status.as_str().red(),
    }
}

fn print_record(record: &MigrationRecord) {
    println!("{} #{} {}", "Migration".cyan().bold(), record.id, record.name.bold());
    println!("  Status:  {}", status_label(record));
    if let Some(path) = &record.migration_file_path {
        println!("  File:    {}", path.yellow());
    }
    if let Some(by) = &record.created_by {
        println!("  Author:  {}", by.dimmed());
    }
    if let Some(notes) = &record.notes {
        println!("  Notes:   {notes}");
    }
    println!("  Created: {}", record.created_at.to_rfc3339());
    println!("  Updated: {}", record.updated_at.to_rfc3339());
    println!();
    println!("{}", "SQL:".bold());
    println!("{}", record.sql_schema);
    println!();
    println!("{}", "Migration:".bold());
    print!("{}", record.generated_migration);
}
