use std::fmt::Write as FmtWrite;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use formsmith::{
    DocumentFormat, FieldId, FieldStore, FieldType, FieldUpdate, FileBlobStore, FormState,
    OutputDestination, OutputOptions, STORAGE_KEY, StoreOptions, emit, persistence,
};

const DATA_DIR_NAME: &str = "formsmith";
const ID_PREVIEW_LEN: usize = 8;

#[derive(Debug, Parser)]
#[command(
    name = "formsmith",
    version,
    about = "Assemble typed forms, validate them field by field and preview the submission"
)]
struct Cli {
    /// Directory saved forms live in (defaults to the user data directory)
    #[arg(
        long = "store-dir",
        value_name = "PATH",
        env = "FORMSMITH_STORE_DIR",
        global = true
    )]
    store_dir: Option<PathBuf>,

    /// Storage key the form is saved under
    #[arg(long = "key", value_name = "KEY", default_value = STORAGE_KEY, global = true)]
    key: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Append a field (text, email or number) and print its id
    Add {
        #[arg(value_name = "TYPE")]
        field_type: FieldType,
        /// Label to use instead of the default "<Type> Field"
        #[arg(long)]
        label: Option<String>,
        /// Initial value; validated immediately
        #[arg(long)]
        value: Option<String>,
    },
    /// Change a field's label and/or value
    Set {
        /// Field id, a unique id prefix, or a position such as #2
        #[arg(value_name = "ID")]
        id: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        value: Option<String>,
    },
    /// Delete a field
    Remove {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Remove every field and forget the saved form
    Reset,
    /// Show every field with its validation status
    List,
    /// Print the submission payload of a valid form
    Preview {
        /// Payload format
        #[arg(long = "format", value_name = "FORMAT", default_value = "json")]
        format: DocumentFormat,

        /// Output destinations ("-" writes to stdout). Accepts multiple values per flag use.
        #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
        outputs: Vec<String>,

        /// Emit compact JSON/TOML rather than pretty formatting
        #[arg(long = "no-pretty")]
        no_pretty: bool,

        /// Overwrite output files even if they already exist
        #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
        force: bool,

        /// Print a human-readable report instead of a payload
        #[arg(long = "text", conflicts_with_all = ["outputs", "format"])]
        text: bool,

        /// Wrap width for --text
        #[arg(long = "width", value_name = "COLUMNS", default_value_t = 80)]
        width: usize,
    },
    /// Print the JSON Schema of the saved form blob
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();
    let cli = Cli::parse();

    if let Command::Schema = cli.command {
        let schema = persistence::snapshot_schema().map_err(|err| eyre!("{err:#}"))?;
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let store_dir = resolve_store_dir(cli.store_dir.clone())?;
    debug!(dir = %store_dir.display(), key = %cli.key, "opening form store");
    let options = StoreOptions::default().with_storage_key(cli.key.clone());
    let mut store = FieldStore::open(FileBlobStore::new(&store_dir), options);

    run(&mut store, cli.command)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_store_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    explicit
        .or_else(|| dirs::data_local_dir().map(|dir| dir.join(DATA_DIR_NAME)))
        .ok_or_else(|| eyre!("cannot determine a data directory; pass --store-dir"))
}

fn run(store: &mut FieldStore<FileBlobStore>, command: Command) -> Result<()> {
    match command {
        Command::Add {
            field_type,
            label,
            value,
        } => {
            let id = store.add_field(field_type);
            let update = build_update(label, value);
            if !update.is_empty() {
                store.update_field(&id, update);
            }
            println!("{id}");
            if let Some(error) = store.state().get(id.as_str()).and_then(|f| f.error.as_ref()) {
                eprintln!("warning: {error}");
            }
        }
        Command::Set { id, label, value } => {
            let update = build_update(label, value);
            if update.is_empty() {
                bail!("nothing to change; pass --label and/or --value");
            }
            let id = resolve_id(store.state(), &id)?;
            store.update_field(&id, update);
            if let Some(error) = store.state().get(id.as_str()).and_then(|f| f.error.as_ref()) {
                eprintln!("warning: {error}");
            }
        }
        Command::Remove { id } => {
            let id = resolve_id(store.state(), &id)?;
            store.remove_field(&id);
            forget_if_empty(store);
        }
        Command::Reset => {
            store.reset_form();
            store.clear_saved();
            println!("All fields have been removed from the form.");
        }
        Command::List => print!("{}", describe(store.state())),
        Command::Preview {
            format,
            outputs,
            no_pretty,
            force,
            text,
            width,
        } => {
            let preview = store.submission()?;
            if text {
                print!("{}", preview.render_text(width));
                return Ok(());
            }
            let options = OutputOptions::new(format)
                .with_pretty(!no_pretty)
                .with_overwrite(force)
                .with_destinations(parse_destinations(&outputs)?);
            emit(&preview.payload(), &options)
                .map_err(|err| eyre!("{err:#}"))
                .wrap_err("failed to write submission payload")?;
        }
        Command::Schema => unreachable!("handled before the store is opened"),
    }
    Ok(())
}

fn build_update(label: Option<String>, value: Option<String>) -> FieldUpdate {
    FieldUpdate { label, value }
}

// each invocation is a new session; an empty form must not rehydrate next time
fn forget_if_empty(store: &mut FieldStore<FileBlobStore>) {
    if store.state().is_empty() {
        store.clear_saved();
    }
}

fn parse_destinations(outputs: &[String]) -> Result<Vec<OutputDestination>> {
    if outputs.is_empty() {
        return Ok(vec![OutputDestination::Stdout]);
    }
    outputs
        .iter()
        .map(|raw| match raw.as_str() {
            "-" => Ok(OutputDestination::Stdout),
            other if other.trim().is_empty() => Err(eyre!("output destination cannot be empty")),
            other => Ok(OutputDestination::file(other)),
        })
        .collect()
}

/// Accepts a full id, a unique id prefix, or a one-based position like `#2`.
fn resolve_id(state: &FormState, raw: &str) -> Result<FieldId> {
    let raw = raw.trim();
    if let Some(position) = raw.strip_prefix('#') {
        let index: usize = position
            .parse()
            .wrap_err_with(|| format!("'{raw}' is not a field position"))?;
        return index
            .checked_sub(1)
            .and_then(|index| state.ids().nth(index))
            .cloned()
            .ok_or_else(|| eyre!("no field at position {raw} (form has {} fields)", state.len()));
    }
    if state.contains(raw) {
        return Ok(FieldId::from(raw));
    }
    let mut matches = state.ids().filter(|id| !raw.is_empty() && id.as_str().starts_with(raw));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id.clone()),
        (Some(_), Some(_)) => Err(eyre!("id prefix '{raw}' matches more than one field")),
        (None, _) => Err(eyre!("no field with id '{raw}'")),
    }
}

fn describe(state: &FormState) -> String {
    let mut body = String::new();
    if state.is_empty() {
        let _ = writeln!(
            body,
            "No fields yet. Add one with `formsmith add <text|email|number>`."
        );
        return body;
    }
    for (index, field) in state.iter().enumerate() {
        let short: String = field.id.as_str().chars().take(ID_PREVIEW_LEN).collect();
        let _ = writeln!(
            body,
            "#{:<3} {:<8} {:<6} {:<7} {}: {:?}",
            index + 1,
            short,
            field.field_type,
            field.status(),
            field.label,
            field.value
        );
        if let Some(error) = &field.error {
            let _ = writeln!(body, "     ! {error}");
        }
    }
    if state.is_form_valid() {
        let _ = writeln!(body, "Form is valid ({} fields).", state.len());
    } else {
        let _ = writeln!(
            body,
            "Form is not ready to submit ({} with errors).",
            state.error_count()
        );
    }
    body
}
