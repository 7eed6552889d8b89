//! `caplist` - CLI for capturelist
//!
//! This binary is a small presentation layer over the sample record store:
//! it lists entries, captures new ones through the sample form, and edits or
//! deletes existing ones.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;
use uuid::Uuid;

use capturelist::cli::{AddCommand, Cli, Command, ConfigCommand, OutputFormat, UpdateCommand};
use capturelist::sample::{DOG_NAME, FAVORITE_COLOR, PASSWORD_HINT};
use capturelist::{init_logging, CaptureForm, Config, ListStore, Listable, Loadable, SampleEntry};

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> CliResult {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = match cli.config.clone() {
        Some(path) => Config::load_from(Some(path))?,
        None => Config::load()?,
    };

    match cli.command {
        Command::List(cmd) => handle_list(&config, cmd.format).await,
        Command::Add(cmd) => handle_add(&config, cmd).await,
        Command::Update(cmd) => handle_update(&config, cmd).await,
        Command::Delete(cmd) => handle_delete(&config, cmd.id).await,
        Command::Clear(cmd) => handle_clear(&config, cmd.yes).await,
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Wait for the store to settle and return its entries.
async fn loaded_entries(store: &ListStore<SampleEntry>) -> CliResult<Vec<SampleEntry>> {
    match store.wait_settled().await? {
        Loadable::Loaded(entries) => Ok(entries),
        Loadable::Error(err) => Err(format!("{}: {err}", store.location().display()).into()),
        other => Err(format!("store did not settle (state: {other})").into()),
    }
}

async fn find_entry(store: &ListStore<SampleEntry>, id: Uuid) -> CliResult<Option<SampleEntry>> {
    let entries = loaded_entries(store).await?;
    Ok(entries.into_iter().find(|entry| entry.id == id))
}

async fn handle_list(config: &Config, format: OutputFormat) -> CliResult {
    let store = config.open_store::<SampleEntry>();
    let entries = loaded_entries(&store).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain => {
            if entries.is_empty() {
                println!("No entries.");
            }
            for entry in &entries {
                println!("{}  {}", entry.id, entry.object_description());
            }
        }
        OutputFormat::Table => {
            println!("{:<36}  {:<16}  {:<16}  {:<16}", "ID", "HINT", "COLOR", "DOG");
            for entry in &entries {
                println!(
                    "{:<36}  {:<16}  {:<16}  {:<16}",
                    entry.id, entry.password_hint, entry.favorite_color, entry.dog_name
                );
            }
        }
    }
    Ok(())
}

async fn handle_add(config: &Config, cmd: AddCommand) -> CliResult {
    let store = config.open_store::<SampleEntry>();
    // Refuse to overwrite a record we could not read.
    loaded_entries(&store).await?;

    let mut form = CaptureForm::for_store(&store);
    for (name, value) in [
        (PASSWORD_HINT, cmd.password_hint),
        (FAVORITE_COLOR, cmd.favorite_color),
        (DOG_NAME, cmd.dog_name),
    ] {
        if let Some(value) = value {
            form.set_text(name, value)?;
        }
    }

    if !form.is_valid() {
        let missing: Vec<&str> = form
            .invalid_fields()
            .into_iter()
            .map(|field| field.label_text.as_str())
            .collect();
        return Err(format!("{} is incomplete: {}", form.title(), missing.join(", ")).into());
    }

    form.submit();
    let entries = loaded_entries(&store).await?;
    if let Some(entry) = entries.first() {
        println!("Added {}  {}", entry.id, entry.object_description());
    }
    Ok(())
}

async fn handle_update(config: &Config, cmd: UpdateCommand) -> CliResult {
    let store = config.open_store::<SampleEntry>();
    let Some(mut entry) = find_entry(&store, cmd.id).await? else {
        println!("No entry with id {}", cmd.id);
        return Ok(());
    };

    if let Some(hint) = cmd.password_hint {
        entry.password_hint = hint;
    }
    if let Some(color) = cmd.favorite_color {
        entry.favorite_color = color;
    }
    if let Some(dog) = cmd.dog_name {
        entry.dog_name = dog;
    }
    if !entry.is_valid() {
        return Err("favorite color and dog's name must not be empty".into());
    }

    store.update(entry.clone());
    loaded_entries(&store).await?;
    println!("Updated {}  {}", entry.id, entry.object_description());
    Ok(())
}

async fn handle_delete(config: &Config, id: Uuid) -> CliResult {
    let store = config.open_store::<SampleEntry>();
    let Some(entry) = find_entry(&store, id).await? else {
        println!("No entry with id {id}");
        return Ok(());
    };

    store.delete(&entry);
    loaded_entries(&store).await?;
    println!("Deleted {id}");
    Ok(())
}

async fn handle_clear(config: &Config, yes: bool) -> CliResult {
    if !yes {
        println!("This will delete every entry.");
        println!("Use --yes to confirm.");
        return Ok(());
    }

    let store = config.open_store::<SampleEntry>();
    store.delete_all();
    loaded_entries(&store).await?;
    println!("Deleted all entries.");
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> CliResult {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Store]");
                println!("  Data directory:     {}", config.data_dir().display());
                println!("  Sample record:      {}", config.record_path::<SampleEntry>().display());
                println!("  Pretty JSON:        {}", config.store.pretty);
                println!("  Create directories: {}", config.store.create_dirs);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
