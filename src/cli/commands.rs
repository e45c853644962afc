//! Command dispatch and handlers

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, IoResultExt};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{
    breadcrumbs_for, depth, leaf_fqns, node_count, status_class, status_filters,
    term_fqn_list, GlossaryTermNode, ListTermsParams,
};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::tree_traits::render_forest;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let config_dir = resolve_config_dir(cli.config_dir.as_deref())?;
    let settings = Settings::load(Some(&config_dir))?;
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::Tree { file, json }) => cmd_tree(&container, file.as_deref(), *json),
        Some(Commands::Roots {
            file,
            glossary,
            parent,
        }) => cmd_roots(&container, file.as_deref(), glossary, parent),
        Some(Commands::Search { query, file, json }) => {
            cmd_search(&container, query, file.as_deref(), *json)
        }
        Some(Commands::Expand {
            term_id,
            children,
            file,
            json,
        }) => cmd_expand(&container, term_id, children, file.as_deref(), *json),
        Some(Commands::Breadcrumbs { fqn, json }) => cmd_breadcrumbs(&container, fqn, *json),
        Some(Commands::Terms {
            file,
            query,
            page,
            page_size,
        }) => cmd_terms(&container, file.as_deref(), query, *page, *page_size),
        Some(Commands::Statuses) => cmd_statuses(),
        Some(Commands::Config { command }) => cmd_config(&container, command, &config_dir),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn resolve_config_dir(config_dir: Option<&Path>) -> CliResult<PathBuf> {
    match config_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| CliError::Infra(InfraError::io("get current directory", e))),
    }
}

/// Explicit file argument, else the configured data file.
fn resolve_data_file(container: &ServiceContainer, file: Option<&Path>) -> CliResult<PathBuf> {
    file.map(Path::to_path_buf)
        .or_else(|| container.settings.data_file.clone())
        .ok_or_else(|| {
            CliError::InvalidArgs(
                "no term file given and no data_file configured".to_string(),
            )
        })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Infra(InfraError::json("serialize output", e)))?;
    output::info(&rendered);
    Ok(())
}

fn print_forest(forest: &[GlossaryTermNode], json: bool) -> CliResult<()> {
    if json {
        return print_json(forest);
    }
    if forest.is_empty() {
        output::warning("no terms");
    } else {
        print!("{}", render_forest(forest));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: Option<&Path>, json: bool) -> CliResult<()> {
    let data_file = resolve_data_file(container, file)?;
    let forest = container.glossary_service(&data_file).load_forest()?;
    debug!(
        "tree: {} nodes, depth {}, {} leaves",
        node_count(&forest),
        depth(&forest),
        leaf_fqns(&forest).len()
    );
    print_forest(&forest, json)
}

#[instrument(skip(container))]
fn cmd_roots(
    container: &ServiceContainer,
    file: Option<&Path>,
    glossary: &Option<String>,
    parent: &Option<String>,
) -> CliResult<()> {
    let data_file = resolve_data_file(container, file)?;
    let params = ListTermsParams {
        glossary: glossary.clone(),
        parent: parent.clone(),
    };
    let terms = container.glossary_service(&data_file).root_terms(&params)?;
    debug!("roots: {} terms", terms.len());
    print_json(&terms)
}

#[instrument(skip(container))]
fn cmd_search(
    container: &ServiceContainer,
    query: &str,
    file: Option<&Path>,
    json: bool,
) -> CliResult<()> {
    let data_file = resolve_data_file(container, file)?;
    let forest = container.glossary_service(&data_file).search_forest(query)?;
    print_forest(&forest, json)
}

#[instrument(skip(container))]
fn cmd_expand(
    container: &ServiceContainer,
    term_id: &str,
    children_file: &Path,
    file: Option<&Path>,
    json: bool,
) -> CliResult<()> {
    let data_file = resolve_data_file(container, file)?;
    let service = container.glossary_service(&data_file);
    let forest = service.load_forest()?;

    let children = container
        .glossary_service(children_file)
        .fetch_glossary_terms()?;
    let outcome = service.expand(forest, &children, term_id);
    if !outcome.updated {
        output::warning(&format!("no term with id {}, forest unchanged", term_id));
    }
    print_forest(&outcome.forest, json)
}

#[instrument(skip(container))]
fn cmd_breadcrumbs(container: &ServiceContainer, fqn: &str, json: bool) -> CliResult<()> {
    let crumbs = breadcrumbs_for(fqn, &container.settings.routes())
        .map_err(ApplicationError::from)?;
    if json {
        return print_json(&crumbs);
    }
    for crumb in &crumbs {
        output::action(&crumb.name, &crumb.url);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_terms(
    container: &ServiceContainer,
    file: Option<&Path>,
    query: &str,
    page: usize,
    page_size: Option<usize>,
) -> CliResult<()> {
    let data_file = resolve_data_file(container, file)?;
    let page_size = page_size.unwrap_or(container.settings.page_size);
    let terms = container
        .glossary_service(&data_file)
        .search_terms(query, page, page_size)?;
    for fqn in term_fqn_list(&terms) {
        output::info(&fqn);
    }
    Ok(())
}

fn cmd_statuses() -> CliResult<()> {
    for filter in status_filters() {
        output::detail(&format!("{:<10} {:?}", filter.text, status_class(filter.value)));
    }
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    config_dir: &Path,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(config_dir)
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                container
                    .fs
                    .create_dir_all(parent)
                    .with_path_context("create config directory", parent)?;
            }
            container
                .fs
                .write(&path, &Settings::template())
                .with_path_context("write config", &path)?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", &"<unavailable>"),
            }
            output::action("local", &local_config_path(config_dir).display());
            Ok(())
        }
    }
}
