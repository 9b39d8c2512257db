//! Command handlers: resolve the project, wire services, report outcomes.

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::services::{DocKind, Outcome};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_dir, global_config_path, local_config_path, Settings};
use crate::domain::DocNode;
use crate::infrastructure::{InfraError, ServiceContainer};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
    match &cli.command {
        Some(Commands::Generate { kind, project_name }) => {
            _generate(&project_dir, *kind, project_name.as_deref())
        }
        Some(Commands::Serve) => _serve(&project_dir),
        Some(Commands::Deploy) => _deploy(&project_dir),
        Some(Commands::Tree) => _tree(&project_dir),
        Some(Commands::Config { command }) => _config(&project_dir, command),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => {
            Cli::command()
                .print_help()
                .map_err(|e| InfraError::io("print help", e))?;
            Ok(())
        }
    }
}

fn resolve_project_dir(project_dir: Option<&Path>) -> CliResult<PathBuf> {
    match project_dir {
        Some(dir) if dir.is_dir() => Ok(dir.to_path_buf()),
        Some(dir) => Err(CliError::InvalidArgs(format!(
            "project directory does not exist: {}",
            dir.display()
        ))),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("resolve current directory", e).into()),
    }
}

fn container(project_dir: &Path) -> CliResult<ServiceContainer> {
    let settings = Settings::load(Some(project_dir))?;
    debug!("container: settings={:?}", settings);
    Ok(ServiceContainer::new(settings, project_dir)?)
}

#[instrument]
fn _generate(project_dir: &Path, kind: DocKind, project_name: Option<&str>) -> CliResult<()> {
    let container = container(project_dir)?;
    let outcomes = container.generator().execute(kind, project_name)?;

    output::header(&format!("generate {kind}"));
    for outcome in &outcomes {
        match outcome {
            Outcome::Written(path) => output::success_detail(&relative(project_dir, path)),
            Outcome::Removed(path) => output::removed(&relative(project_dir, path)),
            Outcome::Skipped { path, reason } => {
                output::skipped(&format!("{} ({})", relative(project_dir, path), reason))
            }
        }
    }
    Ok(())
}

#[instrument]
fn _serve(project_dir: &Path) -> CliResult<()> {
    let container = container(project_dir)?;
    container.site().serve()?;
    Ok(())
}

#[instrument]
fn _deploy(project_dir: &Path) -> CliResult<()> {
    let container = container(project_dir)?;
    container.site().deploy()?;
    output::success("Documentation deployed");
    Ok(())
}

#[instrument]
fn _tree(project_dir: &Path) -> CliResult<()> {
    let container = container(project_dir)?;
    let tree = container.api().build_tree()?;

    let leaves: Vec<_> = tree.nodes.iter().map(doc_tree).collect();
    output::info(&Tree::new(tree.root).with_leaves(leaves));
    Ok(())
}

fn doc_tree(node: &DocNode) -> Tree<String> {
    let label = match node.output_path.file_name() {
        Some(file) => format!("{} [{}] {}", node.name, node.kind, file.to_string_lossy()),
        None => format!("{} [{}]", node.name, node.kind),
    };
    Tree::new(label).with_leaves(node.children.iter().map(doc_tree))
}

#[instrument]
fn _config(project_dir: &Path, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("cannot determine global config directory"),
            }
            output::action("local", &local_config_path(project_dir).display());
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                let dir = global_config_dir().ok_or_else(|| ApplicationError::Config {
                    message: "cannot determine global config directory".into(),
                })?;
                std::fs::create_dir_all(&dir)
                    .map_err(|e| InfraError::io(format!("create {}", dir.display()), e))?;
                dir.join("docsmith.toml")
            } else {
                local_config_path(project_dir)
            };

            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("Created {}", path.display()));
        }
    }
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

fn relative(project_dir: &Path, path: &Path) -> String {
    path.strip_prefix(project_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
