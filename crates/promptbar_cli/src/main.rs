//! Command-line host for the Promptbar panel.

mod host;
mod output;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use host::CliHost;
use output::{
    format_folder_list, format_folder_output, format_prompt_output, format_save_output,
    format_view_output,
};
use promptbar_core::{
    folder_ops::{ensure_folder_assignable, prompt_folders},
    prompt_ops::ensure_name_available,
    text::{normalize_display_name, normalize_optional_nonempty},
    AppError, Config, Folder, Prompt,
};
use promptbar_panel::{DataTransfer, DropTarget, Promptbar};
use serde_json::json;
use std::io::{self, Read};
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "promptbar", about = "Promptbar prompt library CLI", version)]
struct Cli {
    /// PocketBase URL (defaults to POCKETBASE_URL or the hosted instance)
    #[arg(short, long, global = true)]
    server: Option<String>,

    /// Directory holding local storage (defaults to PROMPTBAR_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Keep every change local and skip the remote store
    #[arg(long, global = true)]
    offline: bool,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Request timeout in seconds
    #[arg(short = 't', long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Default)]
struct PromptFields {
    #[arg(short, long)]
    name: Option<String>,
    #[arg(short, long)]
    description: Option<String>,
    #[arg(short, long, conflicts_with = "file")]
    content: Option<String>,
    /// Read content from a file (`-` for stdin)
    #[arg(short, long)]
    file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// List prompts grouped by folder
    List,
    /// Search prompt names, descriptions, and content
    Search { query: String },
    /// Create a prompt
    New {
        #[command(flatten)]
        fields: PromptFields,
        /// Folder to file the prompt under
        #[arg(long)]
        folder: Option<String>,
    },
    /// Edit a prompt
    Edit {
        id: String,
        #[command(flatten)]
        fields: PromptFields,
    },
    /// Delete a prompt
    Delete {
        /// Prompt ID
        id: String,
    },
    /// Move a prompt into a folder, or out of any folder when omitted
    Move {
        id: String,
        #[arg(long)]
        folder: Option<String>,
    },
    /// Manage prompt folders
    Folder {
        #[command(subcommand)]
        command: FolderCommands,
    },
    /// Toggle the persisted sidebar visibility
    Sidebar,
    /// Add remote prompts not yet known locally
    Pull,
    /// Overwrite the remote bulk record with the local prompts
    Push,
}

#[derive(Subcommand)]
enum FolderCommands {
    /// List prompt folders with their prompt counts
    List,
    /// Create a prompt folder
    New {
        /// Folder name (defaults to "New folder")
        name: Option<String>,
    },
    /// Rename a prompt folder
    Rename {
        /// Folder ID
        id: String,
        /// New folder name
        name: String,
    },
    /// Delete a folder and unfile its prompts
    Delete {
        /// Folder ID
        id: String,
    },
}

impl Commands {
    fn action_label(&self) -> &'static str {
        match self {
            Self::Completions { .. } => "Completions",
            Self::List => "List",
            Self::Search { .. } => "Search",
            Self::New { .. } => "New",
            Self::Edit { .. } => "Edit",
            Self::Delete { .. } => "Delete",
            Self::Move { .. } => "Move",
            Self::Folder { command } => match command {
                FolderCommands::List => "Folder list",
                FolderCommands::New { .. } => "Folder new",
                FolderCommands::Rename { .. } => "Folder rename",
                FolderCommands::Delete { .. } => "Folder delete",
            },
            Self::Sidebar => "Sidebar",
            Self::Pull => "Pull",
            Self::Push => "Push",
        }
    }
}

impl PromptFields {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.content.is_none()
            && self.file.is_none()
    }

    fn normalized_name(&self) -> Result<Option<String>, AppError> {
        self.name
            .as_deref()
            .map(|name| {
                normalize_display_name(name).ok_or_else(|| {
                    AppError::BadRequest("Prompt name cannot be empty".to_string())
                })
            })
            .transpose()
    }

    fn apply(self, prompt: Prompt) -> Result<Prompt, AppError> {
        let name = self
            .normalized_name()?
            .unwrap_or_else(|| prompt.name.clone());
        let content = match self.file {
            Some(path) => Some(read_content(&path)?),
            None => self.content,
        };
        Ok(Prompt {
            name,
            description: self.description.unwrap_or_else(|| prompt.description.clone()),
            content: content.unwrap_or_else(|| prompt.content.clone()),
            ..prompt
        })
    }
}

fn read_content(path: &str) -> Result<String, AppError> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    Ok(std::fs::read_to_string(path)?)
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Apply command-line overrides on top of the environment configuration.
fn resolve_config(
    mut config: Config,
    server: Option<String>,
    data_dir: Option<String>,
    offline: bool,
    timeout: Option<u64>,
) -> Config {
    if let Some(server) = normalize_optional_nonempty(server) {
        config.remote_url = server;
    }
    if let Some(data_dir) = normalize_optional_nonempty(data_dir) {
        config.data_dir = data_dir;
    }
    if offline {
        config.offline = true;
    }
    if let Some(timeout) = timeout {
        config.request_timeout_secs = timeout;
    }
    config
}

fn pool_timeout(config: &Config) -> Duration {
    Duration::from_secs(config.request_timeout_secs.saturating_add(5))
}

fn ensure_online(config: &Config) -> Result<(), AppError> {
    if config.offline {
        return Err(AppError::BadRequest(
            "remote sync is disabled in offline mode".to_string(),
        ));
    }
    Ok(())
}

fn find_folder(folders: &[Folder], id: &str) -> Result<Folder, AppError> {
    folders
        .iter()
        .find(|f| f.id == id)
        .cloned()
        .ok_or(AppError::NotFound)
}

/// Mount the panel and wait for the fallback pool; listing works without it.
fn load_fallback_pool(panel: &mut Promptbar, host: &CliHost, config: &Config) {
    if config.offline {
        return;
    }
    panel.mount(host.sync(), config.fetch_limit);
    match host.await_fallback_pool(pool_timeout(config)) {
        Ok(pool) => panel.set_fallback_pool(pool),
        Err(err) => warn!("continuing without remote prompts: {}", err),
    }
}

fn run_folder_command(
    command: FolderCommands,
    panel: &mut Promptbar,
    host: &mut CliHost,
    json: bool,
) -> Result<String, AppError> {
    match command {
        FolderCommands::List => {
            format_folder_list(&prompt_folders(host.folders()), host.prompts(), json)
        }
        FolderCommands::New { name } => {
            panel.handle_create_folder(host);
            host.check()?;
            let created = host.folders().last().cloned().ok_or(AppError::Internal)?;
            if let Some(name) = name {
                panel.handle_update_folder(&created.id, &name, host);
                host.check()?;
            }
            format_folder_output("Created", &find_folder(host.folders(), &created.id)?, json)
        }
        FolderCommands::Rename { id, name } => {
            panel.handle_update_folder(&id, &name, host);
            host.check()?;
            format_folder_output("Renamed", &find_folder(host.folders(), &id)?, json)
        }
        FolderCommands::Delete { id } => {
            let folder = find_folder(host.folders(), &id)?;
            panel.handle_delete_folder(&id, host);
            host.check()?;
            format_folder_output("Deleted", &folder, json)
        }
    }
}

fn execute(
    config: &Config,
    command: Commands,
    json: bool,
    panel: &mut Promptbar,
    host: &mut CliHost,
) -> Result<String, AppError> {
    let output = match command {
        Commands::Completions { .. } => unreachable!("completions handled before host setup"),
        Commands::List => {
            load_fallback_pool(panel, host, config);
            format_view_output(&panel.view(host.prompts(), host.folders()), json)?
        }
        Commands::Search { query } => {
            load_fallback_pool(panel, host, config);
            panel.set_search_term(query);
            format_view_output(&panel.view(host.prompts(), host.folders()), json)?
        }
        Commands::New { fields, folder } => {
            if let Some(folder_id) = &folder {
                ensure_folder_assignable(host.folders(), folder_id)?;
            }
            if let Some(name) = fields.normalized_name()? {
                ensure_name_available(host.prompts(), &name, None)?;
            }
            panel.handle_create_prompt(host);
            let created = host.prompts().last().cloned().ok_or(AppError::Internal)?;
            let mut prompt = fields.apply(created.clone())?;
            if folder.is_some() {
                prompt.folder_id = folder;
            }
            if prompt != created {
                panel.handle_update_prompt(prompt.clone(), host);
                host.check()?;
            }
            format_prompt_output("Created", &prompt, json)?
        }
        Commands::Edit { id, fields } => {
            if fields.is_empty() {
                return Err(AppError::BadRequest("nothing to change".to_string()));
            }
            let prompt = fields.apply(host.find_prompt(&id)?)?;
            panel.handle_update_prompt(prompt.clone(), host);
            host.check()?;
            format_prompt_output("Updated", &prompt, json)?
        }
        Commands::Delete { id } => {
            let prompt = host.find_prompt(&id)?;
            panel.handle_delete_prompt(&prompt, host);
            if json {
                serde_json::to_string_pretty(&json!({ "id": prompt.id, "deleted": true }))?
            } else {
                format!("Deleted: {} ({})", prompt.name, prompt.id)
            }
        }
        Commands::Move { id, folder } => {
            let prompt = host.find_prompt(&id)?;
            let target = match folder {
                Some(folder_id) => {
                    ensure_folder_assignable(host.folders(), &folder_id)?;
                    DropTarget::Folder(folder_id)
                }
                None => DropTarget::Unfiled,
            };
            let transfer = DataTransfer::for_prompt(&prompt)?;
            panel.drag_enter(&target);
            panel.handle_drop(&target, &transfer, host)?;
            host.check()?;
            format_prompt_output("Moved", &host.find_prompt(&id)?, json)?
        }
        Commands::Folder { command } => run_folder_command(command, panel, host, json)?,
        Commands::Sidebar => {
            panel.handle_toggle_sidebar(host);
            host.check()?;
            let visible = host.sidebar_visible();
            if json {
                serde_json::to_string_pretty(&json!({ "showPromptbar": visible }))?
            } else if visible {
                "Sidebar shown".to_string()
            } else {
                "Sidebar hidden".to_string()
            }
        }
        Commands::Pull => {
            ensure_online(config)?;
            panel.mount(host.sync(), config.fetch_limit);
            let pool = host.await_fallback_pool(pool_timeout(config))?;
            let fetched = pool.len();
            let added = host.adopt_remote(pool);
            if json {
                serde_json::to_string_pretty(&json!({ "fetched": fetched, "added": added }))?
            } else {
                format!("Pulled {} new prompts ({} fetched)", added, fetched)
            }
        }
        Commands::Push => {
            ensure_online(config)?;
            host.push();
            let reports = host.finish()?;
            let report = reports.last().ok_or(AppError::Internal)?;
            format_save_output(report, json)?
        }
    };
    Ok(output)
}

/// Run one command, then wait for every save it queued.
fn run(config: &Config, command: Commands, json: bool) -> Result<String, AppError> {
    let mut host = CliHost::open(config)?;
    let mut panel = Promptbar::new();
    let result = execute(config, command, json, &mut panel, &mut host);
    let finished = host.finish();
    let output = result?;
    finished?;
    Ok(output)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let Cli {
        server,
        data_dir,
        offline,
        json,
        timeout,
        command,
    } = Cli::parse();

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let config = resolve_config(Config::from_env(), server, data_dir, offline, timeout);
    let action = command.action_label();
    match run(&config, command, json) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(err) => {
            eprintln!("{} failed: {}", action, err);
            std::process::exit(1);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
