use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, OrderArg};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::domain::{DecodeOutcome, FullBinaryTree, Key, RemoveOutcome};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let command = match &cli.command {
        Some(Commands::Completion { shell }) => return _completion(*shell),
        Some(Commands::Config) => return _config(container),
        Some(command) => command,
        None => return Err(CliError::Usage("no command given, see --help".to_string())),
    };

    let path = snapshot_path(cli, container)?;
    match command {
        Commands::Insert { keys } => _insert(container, &path, keys),
        Commands::Delete { keys } => _delete(container, &path, keys),
        Commands::Member { key } => _member(container, &path, *key),
        Commands::Get { key } => _get(container, &path, *key),
        Commands::Print { order } => _print(container, &path, *order),
        Commands::Show => _show(container, &path),
        Commands::Info => _info(container, &path),
        Commands::Dump { raw } => _dump(container, &path, *raw),
        Commands::Clear { purge } => _clear(container, &path, *purge),
        Commands::Completion { .. } | Commands::Config => Ok(()),
    }
}

fn snapshot_path(cli: &Cli, container: &ServiceContainer) -> CliResult<PathBuf> {
    let path = cli
        .file
        .clone()
        .unwrap_or_else(|| container.settings.tree_file.clone());
    if container.fs.is_dir(&path) {
        return Err(CliError::InvalidArgs(format!(
            "snapshot path is a directory: {}",
            path.display()
        )));
    }
    Ok(path)
}

/// Load the snapshot at `path`; a missing file is an empty tree.
fn open_tree(container: &ServiceContainer, path: &Path) -> CliResult<FullBinaryTree> {
    let mut tree = FullBinaryTree::new();
    match container.store.try_load(&mut tree, path) {
        Ok(DecodeOutcome::Complete { .. }) => {}
        Ok(outcome) => output::warning(&format!(
            "snapshot {} incomplete: {:?}",
            path.display(),
            outcome
        )),
        Err(ApplicationError::FileNotFound(_)) => {
            debug!("no snapshot at {}, starting empty", path.display())
        }
        Err(e) => return Err(e.into()),
    }
    Ok(tree)
}

#[instrument(skip(container))]
fn _insert(container: &ServiceContainer, path: &Path, keys: &[Key]) -> CliResult<()> {
    let mut tree = open_tree(container, path)?;
    for &key in keys {
        tree.insert(key);
    }
    container.store.try_save(&tree, path)?;
    output::action("inserted", &keys.iter().join(" "));
    Ok(())
}

#[instrument(skip(container))]
fn _delete(container: &ServiceContainer, path: &Path, keys: &[Key]) -> CliResult<()> {
    let mut tree = open_tree(container, path)?;
    for &key in keys {
        match tree.remove(key) {
            RemoveOutcome::Empty | RemoveOutcome::NotFound => {
                output::warning(&format!("key not found: {}", key))
            }
            RemoveOutcome::RootCleared | RemoveOutcome::Replaced { .. } => {
                output::action("deleted", &key)
            }
        }
    }
    container.store.try_save(&tree, path)?;
    Ok(())
}

#[instrument(skip(container))]
fn _member(container: &ServiceContainer, path: &Path, key: Key) -> CliResult<()> {
    let tree = open_tree(container, path)?;
    output::info(&tree.contains(key));
    Ok(())
}

#[instrument(skip(container))]
fn _get(container: &ServiceContainer, path: &Path, key: Key) -> CliResult<()> {
    let tree = open_tree(container, path)?;
    output::info(&tree.get(key));
    Ok(())
}

#[instrument(skip(container))]
fn _print(container: &ServiceContainer, path: &Path, order: OrderArg) -> CliResult<()> {
    let tree = open_tree(container, path)?;
    output::info(&tree.traversal_text(order.into()));
    Ok(())
}

#[instrument(skip(container))]
fn _show(container: &ServiceContainer, path: &Path) -> CliResult<()> {
    let tree = open_tree(container, path)?;
    print!("{}", tree);
    Ok(())
}

#[instrument(skip(container))]
fn _info(container: &ServiceContainer, path: &Path) -> CliResult<()> {
    let tree = open_tree(container, path)?;
    output::header(&path.display());
    output::detail(&format!("nodes: {}", tree.len()));
    output::detail(&format!("depth: {}", tree.depth()));
    output::detail(&format!("full:  {}", tree.is_full()));
    let partial = tree.partial_nodes();
    if !partial.is_empty() {
        output::detail(&format!("one child: {}", partial.iter().join(" ")));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _dump(container: &ServiceContainer, path: &Path, raw: bool) -> CliResult<()> {
    let tree = open_tree(container, path)?;
    let bytes = tree.to_bytes()?;
    if raw {
        io::stdout()
            .lock()
            .write_all(&bytes)
            .map_err(|e| InfraError::io("write snapshot to stdout", e))?;
    } else {
        output::info(&hex::encode(&bytes));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _clear(container: &ServiceContainer, path: &Path, purge: bool) -> CliResult<()> {
    if purge {
        if container.fs.exists(path) {
            container
                .fs
                .remove_file(path)
                .map_err(|e| InfraError::io(format!("remove {}", path.display()), e))?;
        }
    } else {
        let mut tree = open_tree(container, path)?;
        tree.clear();
        container.store.try_save(&tree, path)?;
    }
    output::action("cleared", &path.display());
    Ok(())
}

fn _config(container: &ServiceContainer) -> CliResult<()> {
    output::info(&container.settings.to_toml()?);
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
