//! `noteworks` terminal front-end.
//!
//! Startup order matters: tracing first, then the store (which applies
//! pragmas and runs pending migrations; a migration failure is fatal
//! here and nowhere else), then command dispatch.

mod notify;
mod when;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use noteworks_core::constants;
use noteworks_core::model::{NewNote, Note, NoteUpdate};
use noteworks_core::traits::{INoteStore, SystemClock};
use noteworks_core::AppConfig;
use noteworks_scheduler::ReminderScheduler;
use noteworks_storage::NoteStore;

use crate::notify::TerminalNotifier;

#[derive(Debug, Parser)]
#[command(name = "noteworks")]
#[command(about = "Personal notes with tags and reminders")]
struct Cli {
    /// Database file (default: the platform data directory).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Config file (default: config.toml next to the database).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a note.
    Add(AddArgs),
    /// List notes, most recently updated first.
    List(ListArgs),
    /// Show one note with its tags and reminders.
    Show { id: String },
    /// Change a note's title and/or body.
    Edit(EditArgs),
    /// Delete a note and everything attached to it.
    Delete { id: String },
    /// Case-insensitive substring search over titles and bodies.
    Search { query: String },
    /// Manage tags on a note.
    Tag {
        #[command(subcommand)]
        command: TagCommand,
    },
    /// Manage reminders on a note.
    Remind {
        #[command(subcommand)]
        command: RemindCommand,
    },
    /// Run the reminder scheduler in the foreground until Ctrl-C.
    Watch,
}

#[derive(Debug, Args)]
struct AddArgs {
    title: String,
    #[arg(long, default_value = "")]
    body: String,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only notes carrying this tag.
    #[arg(long)]
    tag: Option<String>,
}

#[derive(Debug, Args)]
struct EditArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    body: Option<String>,
}

#[derive(Debug, Subcommand)]
enum TagCommand {
    /// Attach a tag (idempotent).
    Add { id: String, tag: String },
    /// Detach a tag (no-op if absent).
    Rm { id: String, tag: String },
    /// List a note's tags.
    Ls { id: String },
}

#[derive(Debug, Subcommand)]
enum RemindCommand {
    /// Schedule a reminder. WHEN is RFC3339, "YYYY-MM-DD HH:MM", or +<n>[smhd].
    Add { id: String, when: String },
    /// Cancel a pending or delivered reminder by its id.
    Cancel { reminder_id: String },
    /// List a note's reminders.
    Ls { id: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db)?;
    let store = NoteStore::open(&db_path)
        .with_context(|| format!("open store at {}", db_path.display()))?;

    match cli.command {
        Command::Add(args) => run_add(&store, args),
        Command::List(args) => run_list(&store, args),
        Command::Show { id } => run_show(&store, &id),
        Command::Edit(args) => run_edit(&store, args),
        Command::Delete { id } => run_delete(&store, &id),
        Command::Search { query } => run_search(&store, &query),
        Command::Tag { command } => run_tag(&store, command),
        Command::Remind { command } => run_remind(&store, command),
        Command::Watch => {
            let config = load_config(cli.config, &db_path)?;
            run_watch(store, config)
        }
    }
}

/// Explicit path wins; otherwise the platform data directory, created
/// on first use; otherwise the working directory.
fn resolve_db_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path,
        None => match dirs::data_dir() {
            Some(data) => data
                .join(constants::APP_DIR_NAME)
                .join(constants::DB_FILE_NAME),
            None => PathBuf::from(constants::DB_FILE_NAME),
        },
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create data directory {}", parent.display()))?;
        }
    }
    Ok(path)
}

fn load_config(explicit: Option<PathBuf>, db_path: &std::path::Path) -> Result<AppConfig> {
    let path = match explicit {
        Some(path) => path,
        None => db_path
            .parent()
            .map(|dir| dir.join(constants::CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(constants::CONFIG_FILE_NAME)),
    };
    Ok(AppConfig::load(&path)?)
}

fn run_add(store: &NoteStore, args: AddArgs) -> Result<()> {
    let note = store.create_note(NewNote {
        title: args.title,
        body: args.body,
    })?;
    println!("created {}", note.id);
    Ok(())
}

fn run_list(store: &NoteStore, args: ListArgs) -> Result<()> {
    let notes = match args.tag {
        Some(tag) => store.notes_with_tag(&tag)?,
        None => store.list_notes()?,
    };
    if notes.is_empty() {
        println!("no notes");
        return Ok(());
    }
    for note in notes {
        print_note_line(&note);
    }
    Ok(())
}

fn run_show(store: &NoteStore, id: &str) -> Result<()> {
    let note = store
        .get_note(id)?
        .ok_or_else(|| anyhow!("note not found: {id}"))?;

    println!("{}", note.title);
    println!("  id:      {}", note.id);
    println!("  created: {}", note.created_at.to_rfc3339());
    println!("  updated: {}", note.updated_at.to_rfc3339());

    let tags = store.tags_for(&note.id)?;
    if !tags.is_empty() {
        println!("  tags:    {}", tags.join(", "));
    }
    for reminder in store.reminders_for(&note.id)? {
        let status = if reminder.delivered {
            "delivered"
        } else {
            "pending"
        };
        println!(
            "  reminder {} due {} [{status}]",
            reminder.id,
            reminder.due_at.to_rfc3339()
        );
    }
    if !note.body.is_empty() {
        println!();
        println!("{}", note.body);
    }
    Ok(())
}

fn run_edit(store: &NoteStore, args: EditArgs) -> Result<()> {
    if args.title.is_none() && args.body.is_none() {
        return Err(anyhow!("nothing to change; pass --title and/or --body"));
    }
    let note = store.update_note(
        &args.id,
        NoteUpdate {
            title: args.title,
            body: args.body,
        },
    )?;
    println!("updated {}", note.id);
    Ok(())
}

fn run_delete(store: &NoteStore, id: &str) -> Result<()> {
    store.delete_note(id)?;
    println!("deleted {id}");
    Ok(())
}

fn run_search(store: &NoteStore, query: &str) -> Result<()> {
    let notes = store.search_notes(query)?;
    if notes.is_empty() {
        println!("no matches");
        return Ok(());
    }
    for note in notes {
        print_note_line(&note);
    }
    Ok(())
}

fn run_tag(store: &NoteStore, command: TagCommand) -> Result<()> {
    match command {
        TagCommand::Add { id, tag } => {
            store.add_tag(&id, &tag)?;
            println!("tagged {id} with {tag}");
        }
        TagCommand::Rm { id, tag } => {
            store.remove_tag(&id, &tag)?;
            println!("untagged {tag} from {id}");
        }
        TagCommand::Ls { id } => {
            let tags = store.tags_for(&id)?;
            if tags.is_empty() {
                println!("no tags");
            } else {
                for tag in tags {
                    println!("{tag}");
                }
            }
        }
    }
    Ok(())
}

fn run_remind(store: &NoteStore, command: RemindCommand) -> Result<()> {
    match command {
        RemindCommand::Add { id, when } => {
            let due_at = when::parse_due(&when, chrono::Utc::now())?;
            let reminder = store.create_reminder(&id, due_at)?;
            println!(
                "reminder {} set for {}",
                reminder.id,
                reminder.due_at.to_rfc3339()
            );
        }
        RemindCommand::Cancel { reminder_id } => {
            store.cancel_reminder(&reminder_id)?;
            println!("cancelled {reminder_id}");
        }
        RemindCommand::Ls { id } => {
            let reminders = store.reminders_for(&id)?;
            if reminders.is_empty() {
                println!("no reminders");
                return Ok(());
            }
            for reminder in reminders {
                let status = if reminder.delivered {
                    "delivered"
                } else {
                    "pending"
                };
                println!(
                    "{} due {} [{status}]",
                    reminder.id,
                    reminder.due_at.to_rfc3339()
                );
            }
        }
    }
    Ok(())
}

/// Foreground scheduler loop. Ctrl-C cancels the token; the scheduler
/// finishes its current delivery and returns.
fn run_watch(store: NoteStore, config: AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;

    runtime.block_on(async move {
        let scheduler = ReminderScheduler::new(
            Arc::new(store),
            Arc::new(TerminalNotifier),
            Arc::new(SystemClock),
            config.scheduler,
        );

        let cancel = CancellationToken::new();
        let handle = {
            let cancel = cancel.clone();
            tokio::spawn(async move { scheduler.run(cancel).await })
        };

        tokio::signal::ctrl_c().await.context("listen for Ctrl-C")?;
        tracing::info!("shutting down");
        cancel.cancel();
        handle.await.context("scheduler task panicked")?;
        Ok(())
    })
}

fn print_note_line(note: &Note) {
    println!(
        "{}  {}  (updated {})",
        note.id,
        note.short_title(48),
        note.updated_at.to_rfc3339()
    );
}
