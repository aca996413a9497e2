//! Reminder recipient roster CLI.
//!
//! Loads a recipient list from a data directory, splits it into student and
//! instructor tables, and prints either the tables or the remind request for
//! the selected rows.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use roster::core::types::{Partition, SortKey};
use roster::exit_codes;
use roster::io::config::{CONFIG_FILE, RosterConfig, load_config, write_config};
use roster::io::source::{JsonFileSource, QueryParams};
use roster::io::status::LogReporter;
use roster::loader::RecipientLoader;
use roster::render::render_table;
use roster::table::{LoadOutcome, RecipientTable};
use serde_json::json;
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Review, sort and select reminder recipients"
)]
struct Cli {
    /// Config file (TOML). Missing file means defaults.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SourceArgs {
    /// Directory holding source responses as JSON files.
    #[arg(long)]
    data: PathBuf,

    /// Query parameter forwarded to the source (`key=value`, repeatable).
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Load recipients and print the student and instructor tables.
    Show {
        #[command(flatten)]
        source: SourceArgs,

        /// Toggle-sort the student table by this key (repeatable, applied in order).
        #[arg(long = "sort-students")]
        sort_students: Vec<SortKey>,

        /// Toggle-sort the instructor table by this key (repeatable, applied in order).
        #[arg(long = "sort-instructors")]
        sort_instructors: Vec<SortKey>,

        /// Print the tables as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Select recipients and print the remind request.
    Remind {
        #[command(flatten)]
        source: SourceArgs,

        /// Check every student.
        #[arg(long)]
        all_students: bool,

        /// Check every instructor.
        #[arg(long)]
        all_instructors: bool,

        /// Check rows with this email (repeatable).
        #[arg(long = "email")]
        emails: Vec<String>,

        /// Which tables contribute to the request.
        #[arg(long, value_enum, default_value_t = Scope::Both)]
        scope: Scope,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Scope {
    Students,
    Instructors,
    Both,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    roster::logging::init();
    let code = match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Show {
            source,
            sort_students,
            sort_instructors,
            json,
        } => {
            let cfg = load_config(&cli.config)?;
            cmd_show(&cfg, &source, &sort_students, &sort_instructors, json).await
        }
        Command::Remind {
            source,
            all_students,
            all_instructors,
            emails,
            scope,
        } => {
            let cfg = load_config(&cli.config)?;
            let selection = Selection {
                all_students,
                all_instructors,
                emails,
            };
            cmd_remind(&cfg, &source, &selection, scope).await
        }
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<i32> {
    if path.exists() && !force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    write_config(path, &RosterConfig::default())
        .with_context(|| format!("write {}", path.display()))?;
    println!("{}", path.display());
    Ok(exit_codes::OK)
}

async fn cmd_show(
    cfg: &RosterConfig,
    source: &SourceArgs,
    sort_students: &[SortKey],
    sort_instructors: &[SortKey],
    json: bool,
) -> Result<i32> {
    let Some(mut table) = load_table(cfg, source).await? else {
        return Ok(exit_codes::FETCH_FAILED);
    };
    for key in sort_students {
        table.sort(Partition::Students, *key);
    }
    for key in sort_instructors {
        table.sort(Partition::Instructors, *key);
    }

    if json {
        let view = json!({
            "students": table.students(),
            "instructors": table.instructors(),
        });
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_table(Partition::Students, table.students()));
        println!();
        print!("{}", render_table(Partition::Instructors, table.instructors()));
    }
    Ok(exit_codes::OK)
}

struct Selection {
    all_students: bool,
    all_instructors: bool,
    emails: Vec<String>,
}

async fn cmd_remind(
    cfg: &RosterConfig,
    source: &SourceArgs,
    selection: &Selection,
    scope: Scope,
) -> Result<i32> {
    let Some(mut table) = load_table(cfg, source).await? else {
        return Ok(exit_codes::FETCH_FAILED);
    };
    if selection.all_students {
        table.set_all(Partition::Students, true);
    }
    if selection.all_instructors {
        table.set_all(Partition::Instructors, true);
    }
    for email in &selection.emails {
        if table.set_selected_by_email(email, true) == 0 {
            warn!(email = %email, "no recipient with this email");
        }
    }

    let request = match scope {
        Scope::Students => table.collate_one(Partition::Students),
        Scope::Instructors => table.collate_one(Partition::Instructors),
        Scope::Both => table.collate_both(),
    };
    println!("{}", serde_json::to_string_pretty(&request)?);

    if request.users_to_remind.is_empty() {
        return Ok(exit_codes::NOTHING_SELECTED);
    }
    Ok(exit_codes::OK)
}

/// Load the configured table from `source`. `None` when the fetch failed
/// (already reported through the status reporter).
async fn load_table(cfg: &RosterConfig, source: &SourceArgs) -> Result<Option<RecipientTable>> {
    let mut table = RecipientTable::from_config(cfg).context("build recipient table")?;
    let source_dir = JsonFileSource::new(&source.data);
    let loader = RecipientLoader::from_config(source_dir, LogReporter, cfg);
    let params: QueryParams = source.params.iter().cloned().collect();
    match loader.load(&mut table, &params).await {
        LoadOutcome::Failed { .. } | LoadOutcome::Superseded => Ok(None),
        LoadOutcome::Applied { .. } => Ok(Some(table)),
    }
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
