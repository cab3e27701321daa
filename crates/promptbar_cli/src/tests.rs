//! Unit tests for the `promptbar` CLI entrypoint module.

use super::host::CliHost;
use super::output::format_view_output;
use super::{execute, resolve_config, Cli, Commands, FolderCommands};
use clap::{CommandFactory, Parser};
use promptbar_core::models::prompt::RemotePromptRecord;
use promptbar_core::{AppError, Config, LocalStorage, MemoryRemote, Prompt};
use promptbar_panel::Promptbar;
use std::sync::Arc;
use tempfile::TempDir;

struct TestEnv {
    _dir: TempDir,
    config: Config,
    storage: LocalStorage,
    remote: Arc<MemoryRemote>,
    host: CliHost,
    panel: Promptbar,
}

impl TestEnv {
    fn new(offline: bool) -> Self {
        Self::with_remote(offline, MemoryRemote::new())
    }

    fn with_remote(offline: bool, remote: MemoryRemote) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let config = Config {
            data_dir: dir.path().to_string_lossy().to_string(),
            remote_url: "http://127.0.0.1:9".to_string(),
            bulk_record_id: "bulk".to_string(),
            fetch_limit: 200,
            request_timeout_secs: 1,
            offline,
        };
        let storage = LocalStorage::open(&config.local_storage_path()).expect("storage");
        let remote = Arc::new(remote);
        let host = CliHost::new(storage.clone(), Box::new(remote.clone()), "bulk".to_string())
            .expect("host");
        Self {
            _dir: dir,
            config,
            storage,
            remote,
            host,
            panel: Promptbar::new(),
        }
    }

    fn run(&mut self, args: &[&str]) -> Result<String, AppError> {
        let cli = Cli::try_parse_from(std::iter::once("promptbar").chain(args.iter().copied()))
            .expect("parse args");
        let output = execute(
            &self.config,
            cli.command,
            cli.json,
            &mut self.panel,
            &mut self.host,
        );
        self.host.finish().expect("pending saves");
        output
    }

    fn only_prompt(&self) -> Prompt {
        assert_eq!(self.host.prompts().len(), 1);
        self.host.prompts()[0].clone()
    }
}

#[test]
fn cli_parses_prompt_and_folder_subcommands() {
    let cli = Cli::try_parse_from([
        "promptbar", "--offline", "new", "-n", "Greeting", "-c", "Hello", "--folder", "F1",
    ])
    .expect("parse new");
    assert!(cli.offline);
    match cli.command {
        Commands::New { fields, folder } => {
            assert_eq!(fields.name.as_deref(), Some("Greeting"));
            assert_eq!(fields.content.as_deref(), Some("Hello"));
            assert_eq!(folder.as_deref(), Some("F1"));
        }
        _ => panic!("expected new command"),
    }

    let cli = Cli::try_parse_from(["promptbar", "folder", "rename", "F1", "Work", "--json"])
        .expect("parse folder rename");
    assert!(cli.json);
    assert!(matches!(
        cli.command,
        Commands::Folder {
            command: FolderCommands::Rename { .. }
        }
    ));
    assert_eq!(cli.command.action_label(), "Folder rename");
}

#[test]
fn connection_flags_are_accepted_after_the_subcommand() {
    let cli = Cli::try_parse_from(["promptbar", "list", "-t", "5", "--offline", "-s", "http://pb"])
        .expect("parse list");
    assert_eq!(cli.timeout, Some(5));
    assert!(cli.offline);
    assert_eq!(cli.server.as_deref(), Some("http://pb"));
}

#[test]
fn every_subcommand_has_help_text() {
    fn assert_documented(cmd: &clap::Command) {
        for sub in cmd.get_subcommands() {
            assert!(
                sub.get_about().is_some(),
                "{} {} has no description",
                cmd.get_name(),
                sub.get_name()
            );
            assert_documented(sub);
        }
    }
    assert_documented(&Cli::command());
}

#[test]
fn completions_cover_nested_folder_commands() {
    let mut cmd = Cli::command();
    let mut buffer = Vec::new();
    clap_complete::generate(clap_complete::Shell::Bash, &mut cmd, "promptbar", &mut buffer);
    let script = String::from_utf8(buffer).expect("utf8 script");
    assert!(script.contains("rename"), "{}", script);
    assert!(script.contains("--timeout"), "{}", script);
}

#[test]
fn cli_rejects_content_together_with_file() {
    let parsed = Cli::try_parse_from(["promptbar", "edit", "1", "-c", "x", "-f", "body.txt"]);
    assert!(parsed.is_err());
}

#[test]
fn resolve_config_applies_flag_overrides() {
    let base = Config {
        data_dir: "/tmp/base".to_string(),
        remote_url: "https://pocket.example".to_string(),
        bulk_record_id: "bulk".to_string(),
        fetch_limit: 200,
        request_timeout_secs: 30,
        offline: false,
    };

    let resolved = resolve_config(
        base.clone(),
        Some("http://localhost:8090".to_string()),
        Some("/tmp/override".to_string()),
        true,
        Some(5),
    );
    assert_eq!(resolved.remote_url, "http://localhost:8090");
    assert_eq!(resolved.data_dir, "/tmp/override");
    assert!(resolved.offline);
    assert_eq!(resolved.request_timeout_secs, 5);

    let untouched = resolve_config(base, Some("   ".to_string()), None, false, None);
    assert_eq!(untouched.remote_url, "https://pocket.example");
    assert_eq!(untouched.data_dir, "/tmp/base");
    assert!(!untouched.offline);
}

#[test]
fn new_prompt_is_listed_and_mirrored_locally() {
    let mut env = TestEnv::new(true);

    let created = env
        .run(&["new", "-n", "Greeting", "-c", "Hello there"])
        .expect("new");
    let prompt = env.only_prompt();
    assert_eq!(created, format!("Created: Greeting ({})", prompt.id));
    assert_eq!(prompt.content, "Hello there");

    let listed = env.run(&["list"]).expect("list");
    assert_eq!(listed, format!("Greeting ({})", prompt.id));
    assert_eq!(env.storage.load_prompts().expect("mirror"), vec![prompt]);
}

#[test]
fn new_without_fields_uses_untitled_name() {
    let mut env = TestEnv::new(true);
    env.run(&["new"]).expect("first");
    env.run(&["new"]).expect("second");

    let names: Vec<&str> = env.host.prompts().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Prompt 1", "Prompt 2"]);
}

#[test]
fn new_after_delete_reuses_the_free_untitled_name() {
    let mut env = TestEnv::new(true);
    for _ in 0..3 {
        env.run(&["new"]).expect("new");
    }
    let second = env.host.prompts()[1].id.clone();
    env.run(&["delete", second.as_str()]).expect("delete");

    let output = env.run(&["new"]).expect("new after delete");

    assert!(output.starts_with("Created: Prompt 2 ("), "{}", output);
    let mirrored = env.storage.load_prompts().expect("mirror");
    let names: Vec<&str> = mirrored.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Prompt 1", "Prompt 3", "Prompt 2"]);
}

#[test]
fn new_rejects_a_name_already_in_use() {
    let mut env = TestEnv::new(true);
    env.run(&["new", "-n", "Greeting"]).expect("first");

    let result = env.run(&["new", "-n", " Greeting ", "-c", "duplicate"]);

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(env.only_prompt().name, "Greeting");
    assert_eq!(env.storage.load_prompts().expect("mirror").len(), 1);
}

#[test]
fn edit_rejects_renaming_onto_another_prompt() {
    let mut env = TestEnv::new(true);
    env.run(&["new", "-n", "A"]).expect("A");
    env.run(&["new", "-n", "B", "-c", "keep me"]).expect("B");
    let b = env.host.prompts()[1].id.clone();

    let result = env.run(&["edit", b.as_str(), "-n", "A", "-c", "important"]);

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    let mirrored = env.storage.load_prompts().expect("mirror");
    assert_eq!(mirrored, env.host.prompts().to_vec());
    let fields: Vec<(&str, &str)> = mirrored
        .iter()
        .map(|p| (p.name.as_str(), p.content.as_str()))
        .collect();
    assert_eq!(fields, vec![("A", ""), ("B", "keep me")]);

    env.run(&["edit", b.as_str(), "-n", "B", "-c", "renamed to itself"])
        .expect("same name is allowed");
    assert_eq!(env.host.find_prompt(&b).expect("b").content, "renamed to itself");
}

#[test]
fn new_rejects_unknown_folder() {
    let mut env = TestEnv::new(true);
    let result = env.run(&["new", "--folder", "missing"]);
    assert!(matches!(result, Err(AppError::NotFound)));
    assert!(env.host.prompts().is_empty());
}

#[test]
fn edit_requires_changes_and_known_id() {
    let mut env = TestEnv::new(true);
    env.run(&["new"]).expect("new");
    let id = env.only_prompt().id;

    assert!(matches!(
        env.run(&["edit", id.as_str()]),
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        env.run(&["edit", "missing", "-n", "X"]),
        Err(AppError::NotFound)
    ));

    env.run(&["edit", id.as_str(), "-d", "Short summary"])
        .expect("edit");
    assert_eq!(env.only_prompt().description, "Short summary");
    assert_eq!(env.only_prompt().name, "Prompt 1");
}

#[test]
fn move_files_and_unfiles_prompt() {
    let mut env = TestEnv::new(true);
    env.run(&["folder", "new", "Work"]).expect("folder");
    env.run(&["new", "-n", "Draft"]).expect("new");
    let folder_id = env.host.folders()[0].id.clone();
    let id = env.only_prompt().id;

    env.run(&["move", id.as_str(), "--folder", folder_id.as_str()])
        .expect("move into folder");
    assert_eq!(env.only_prompt().folder_id.as_deref(), Some(folder_id.as_str()));

    let listed = env.run(&["list"]).expect("list");
    assert_eq!(
        listed,
        format!("Work/ ({})\n  Draft ({})", folder_id, id)
    );

    env.run(&["move", id.as_str()]).expect("unfile");
    assert!(env.only_prompt().is_unfiled());
    assert!(env.storage.load_prompts().expect("mirror")[0].is_unfiled());
}

#[test]
fn folder_delete_unfiles_its_prompts() {
    let mut env = TestEnv::new(true);
    env.run(&["folder", "new"]).expect("folder");
    let folder = env.host.folders()[0].clone();
    assert_eq!(folder.name, "New folder");
    env.run(&["new", "--folder", folder.id.as_str()])
        .expect("new in folder");

    let output = env
        .run(&["folder", "delete", folder.id.as_str()])
        .expect("delete folder");

    assert_eq!(output, format!("Deleted: New folder ({})", folder.id));
    assert!(env.host.folders().is_empty());
    assert!(env.only_prompt().is_unfiled());
    assert!(env.storage.load_folders().expect("folders").is_empty());
}

#[test]
fn folder_rename_rejects_blank_names() {
    let mut env = TestEnv::new(true);
    env.run(&["folder", "new"]).expect("folder");
    let id = env.host.folders()[0].id.clone();

    let result = env.run(&["folder", "rename", id.as_str(), "  "]);

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(env.host.folders()[0].name, "New folder");
}

#[test]
fn sidebar_toggle_is_persisted() {
    let mut env = TestEnv::new(true);

    assert_eq!(env.run(&["sidebar"]).expect("hide"), "Sidebar hidden");
    assert!(!env.storage.load_sidebar_visible().expect("flag"));
    assert_eq!(env.run(&["sidebar"]).expect("show"), "Sidebar shown");
    assert!(env.storage.load_sidebar_visible().expect("flag"));
}

#[test]
fn pull_adopts_remote_prompts_with_new_names() {
    let remote = MemoryRemote::with_records(vec![
        RemotePromptRecord {
            id: "r1".to_string(),
            name: "Prompt 1".to_string(),
            description: String::new(),
            content: "remote copy".to_string(),
            created: "2024-01-01 00:00:00.000Z".to_string(),
            updated: "2024-01-01 00:00:00.000Z".to_string(),
        },
        RemotePromptRecord {
            id: "r2".to_string(),
            name: "Translate".to_string(),
            description: String::new(),
            content: "translate this".to_string(),
            created: "2024-02-01 00:00:00.000Z".to_string(),
            updated: "2024-02-01 00:00:00.000Z".to_string(),
        },
    ]);
    let mut env = TestEnv::with_remote(false, remote);
    env.run(&["new"]).expect("new");

    let output = env.run(&["pull"]).expect("pull");

    assert_eq!(output, "Pulled 1 new prompts (2 fetched)");
    let names: Vec<&str> = env.host.prompts().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Prompt 1", "Translate"]);
    let payload = env.remote.latest_payload("bulk").expect("bulk write");
    let saved: Vec<Prompt> = serde_json::from_str(&payload).expect("decode");
    assert_eq!(saved.len(), 2);
}

#[test]
fn push_reports_save_and_is_refused_offline() {
    let mut online = TestEnv::new(false);
    online.run(&["new"]).expect("new");
    let output = online.run(&["push"]).expect("push");
    assert!(output.starts_with("Pushed 1 prompts (0 duplicates dropped"), "{}", output);

    let mut offline = TestEnv::new(true);
    assert!(matches!(
        offline.run(&["push"]),
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        offline.run(&["pull"]),
        Err(AppError::BadRequest(_))
    ));
}

#[test]
fn search_output_covers_matches_and_misses() {
    let mut env = TestEnv::new(true);
    env.run(&["new", "-n", "Summarize", "-c", "Condense the TEXT"])
        .expect("first");
    env.run(&["new", "-n", "Translate"]).expect("second");

    let hits = env.run(&["search", "text"]).expect("search");
    assert!(hits.starts_with("Summarize ("), "{}", hits);
    assert!(!hits.contains("Translate"));

    let mut panel = Promptbar::new();
    panel.set_search_term("zzz");
    let view = panel.view(env.host.prompts(), env.host.folders());
    assert_eq!(
        format_view_output(&view, false).expect("format"),
        "No prompts match 'zzz'."
    );
}

#[test]
fn empty_list_reports_no_prompts_and_json_shape() {
    let mut env = TestEnv::new(true);
    assert_eq!(env.run(&["list"]).expect("list"), "No prompts.");

    let raw = env.run(&["list", "--json"]).expect("json list");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(value["searchTerm"], "");
    assert!(value["folders"].as_array().expect("folders").is_empty());
    assert!(value["unfiled"].as_array().expect("unfiled").is_empty());
}
