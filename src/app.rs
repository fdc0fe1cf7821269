use std::io::Write;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::api::{ApiOptions, CustomerApi, DEFAULT_API_URL};
use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::dialog::EditDialog;
use crate::output;
use crate::view::ViewState;

fn print_banner() {
    const BANNER: &str = r#"
          ___            __       __
    _____/ (_)__  ____  / /____  / /__
   / ___/ / / _ \/ __ \/ __/ _ \/ / _ \
  / /__/ / /  __/ / / / /_/  __/ /  __/
  \___/_/_/\___/_/ /_/\__/\___/_/\___/

       v0.2.1 - customers API terminal client
    "#;
    print!("{}", BANNER);
    println!();
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub api_url: String,
    pub timeout_seconds: usize,
    pub header: Option<String>,
    pub proxy: Option<String>,
    pub no_color: bool,
    pub verbose: u8,
}

pub fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;
    Ok(RunConfig {
        api_url: args
            .api_url
            .or(cfg.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        timeout_seconds: args.timeout.or(cfg.timeout).unwrap_or(10),
        header: args.header.or(cfg.header),
        proxy: args.proxy.or(cfg.proxy),
        no_color: args.no_color || cfg.no_color.unwrap_or(false),
        verbose: args.verbose,
    })
}

/// One line of session input, already split into an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Show,
    Next,
    Prev,
    Search(Option<String>),
    Delete(String),
    Edit(String),
    Refresh,
    Export(String),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Command::Show);
    }
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };
    match word.to_ascii_lowercase().as_str() {
        "n" | "next" => Ok(Command::Next),
        "p" | "prev" | "previous" => Ok(Command::Prev),
        "s" | "search" | "buscar" => Ok(Command::Search(if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        })),
        "d" | "del" | "delete" | "eliminar" => {
            if rest.is_empty() {
                Err("usage: delete <id>".to_string())
            } else {
                Ok(Command::Delete(rest.to_string()))
            }
        }
        "e" | "edit" | "editar" => {
            if rest.is_empty() {
                Err("usage: edit <id>".to_string())
            } else {
                Ok(Command::Edit(rest.to_string()))
            }
        }
        "r" | "refresh" | "reload" => Ok(Command::Refresh),
        "x" | "export" => {
            if rest.is_empty() {
                Err("usage: export <file>".to_string())
            } else {
                Ok(Command::Export(rest.to_string()))
            }
        }
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}', type 'help'")),
    }
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "clientele=warn",
        1 => "clientele=info",
        _ => "clientele=debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn flush_stdout() {
    let _ = std::io::stdout().flush();
}

fn prompt() {
    print!("{} ", "clientele>".bold().cyan());
    flush_stdout();
}

fn start_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message);
    pb
}

fn print_help() {
    println!("commands:");
    println!("  next | n             show the next page");
    println!("  prev | p             show the previous page");
    println!("  search <id> | s      look up one customer by id");
    println!("  search               clear the search and restore the list");
    println!("  delete <id> | d      delete a customer");
    println!("  edit <id> | e        edit a customer field by field");
    println!("  refresh | r          re-fetch the full list");
    println!("  export <file> | x    write the fetched list to a file (.json or .txt)");
    println!("  help | h             show this help");
    println!("  quit | q             exit");
}

async fn refresh(api: &CustomerApi, state: &mut ViewState) {
    let spinner = start_spinner("cargando clientes ::".to_string());
    let result = api.list().await;
    spinner.finish_and_clear();
    match result {
        Ok(records) => {
            debug!(count = records.len(), "customer list loaded");
            state.set_records(records);
        }
        Err(e) => {
            error!("list fetch failed: {e}");
            state.show_error(
                e.with_context("Error al cargar clientes"),
                "Error al cargar clientes.".to_string(),
            );
        }
    }
}

async fn search(api: &CustomerApi, state: &mut ViewState, id: &str) {
    let spinner = start_spinner(format!("buscando cliente {id} ::"));
    let result = api.get(id).await;
    spinner.finish_and_clear();
    match result {
        Ok(customer) => state.show_single(id, customer),
        Err(e) => {
            error!("search failed for id {id}: {e}");
            state.show_error(
                format!("Error: {}", e.with_context("Cliente no encontrado")),
                format!("Error: Cliente con ID {id} no encontrado."),
            );
        }
    }
}

async fn delete(api: &CustomerApi, state: &mut ViewState, id: &str) {
    let spinner = start_spinner(format!("eliminando cliente {id} ::"));
    let result = api.delete(id).await;
    spinner.finish_and_clear();
    match result {
        Ok(()) => {
            output::print_ok("Cliente eliminado exitosamente");
            refresh(api, state).await;
            output::print_view(&state.current_view());
        }
        Err(e) => {
            error!("delete failed for id {id}: {e}");
            output::print_err(&e.with_context("Error al eliminar cliente"));
        }
    }
}

async fn edit(
    api: &CustomerApi,
    state: &mut ViewState,
    lines: &mut Lines<BufReader<Stdin>>,
    id: &str,
) -> Result<(), String> {
    let spinner = start_spinner(format!("cargando cliente {id} ::"));
    let result = api.get(id).await;
    spinner.finish_and_clear();
    let customer = match result {
        Ok(customer) => customer,
        Err(e) => {
            error!("edit fetch failed for id {id}: {e}");
            output::print_err(&e.with_context("Error al obtener cliente"));
            return Ok(());
        }
    };

    let mut dialog = EditDialog::from_customer(&customer);
    if dialog.id.is_empty() {
        dialog.id = id.to_string();
    }
    // replaces any dialog already active: last edit action wins
    state.open_dialog(dialog);

    println!();
    println!("{}", "Editar Cliente".bold().white());
    println!("(enter keeps the current value, '-' clears it)");
    drive_dialog(api, state, lines).await
}

async fn drive_dialog(
    api: &CustomerApi,
    state: &mut ViewState,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<(), String> {
    let field_count = match state.dialog() {
        Some(dialog) => dialog.fields.len(),
        None => return Ok(()),
    };
    for index in 0..field_count {
        let (label, current) = match state.dialog() {
            Some(dialog) => (
                dialog.fields[index].label,
                dialog.fields[index].value.clone(),
            ),
            None => return Ok(()),
        };
        print!("{label} [{current}]: ");
        flush_stdout();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                state.close_dialog();
                return Ok(());
            }
            Err(e) => return Err(format!("failed to read input: {e}")),
        };
        if let Some(dialog) = state.dialog_mut() {
            dialog.apply_input(index, &line);
        }
    }

    loop {
        print!("Guardar cambios? [s/n]: ");
        flush_stdout();
        let answer = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                state.close_dialog();
                return Ok(());
            }
            Err(e) => return Err(format!("failed to read input: {e}")),
        };
        match answer.trim().to_ascii_lowercase().as_str() {
            "s" | "si" | "y" | "yes" => {
                let (id, payload) = match state.dialog() {
                    Some(dialog) => (dialog.id.clone(), dialog.update_payload()),
                    None => return Ok(()),
                };
                let spinner = start_spinner(format!("actualizando cliente {id} ::"));
                let result = api.update(&id, &payload).await;
                spinner.finish_and_clear();
                match result {
                    Ok(()) => {
                        state.close_dialog();
                        output::print_ok("Cliente actualizado exitosamente");
                        refresh(api, state).await;
                        output::print_view(&state.current_view());
                        return Ok(());
                    }
                    Err(e) => {
                        // dialog stays open so the save can be retried
                        error!("update failed for id {id}: {e}");
                        output::print_err(&e.with_context("Error al actualizar cliente"));
                    }
                }
            }
            "n" | "no" | "c" | "cancel" => {
                state.close_dialog();
                println!("edit cancelled");
                return Ok(());
            }
            _ => {}
        }
    }
}

async fn export(state: &ViewState, path: &str) {
    let format = output::infer_format_from_path(path).unwrap_or(output::ExportFormat::Text);
    let rendered = match format {
        output::ExportFormat::Text => output::render_text(state.records()),
        output::ExportFormat::Json => output::render_json(state.records()),
    };
    match tokio::fs::write(path, rendered).await {
        Ok(()) => println!(
            "{} {}",
            "results are saved in".bold().white(),
            path.bold().cyan()
        ),
        Err(e) => output::print_err(&format!("failed to write output file '{path}': {e}")),
    }
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    print_banner();

    output::format_kv_line("api", &run.api_url);
    output::format_kv_line("timeout", &format!("{}s", run.timeout_seconds));
    println!();

    let api = CustomerApi::new(&ApiOptions {
        base_url: run.api_url.clone(),
        timeout_seconds: run.timeout_seconds,
        header: run.header.clone(),
        proxy: run.proxy.clone(),
    })
    .map_err(|e| e.to_string())?;

    let mut state = ViewState::new();
    refresh(&api, &mut state).await;
    output::print_view(&state.current_view());
    println!("type 'help' for the command list");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read input: {e}")),
        };
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                output::print_err(&message);
                continue;
            }
        };
        match command {
            Command::Show => output::print_view(&state.current_view()),
            Command::Next => {
                if state.next_page() {
                    output::print_view(&state.current_view());
                }
            }
            Command::Prev => {
                if state.prev_page() {
                    output::print_view(&state.current_view());
                }
            }
            Command::Search(None) => {
                state.clear_search();
                output::print_view(&state.current_view());
            }
            Command::Search(Some(id)) => {
                search(&api, &mut state, &id).await;
                output::print_view(&state.current_view());
            }
            Command::Delete(id) => delete(&api, &mut state, &id).await,
            Command::Edit(id) => edit(&api, &mut state, &mut lines, &id).await?,
            Command::Refresh => {
                refresh(&api, &mut state).await;
                output::print_view(&state.current_view());
            }
            Command::Export(path) => export(&state, &path).await,
            Command::Help => print_help(),
            Command::Quit => break,
        }
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    if args.init_config {
        let path = match config::default_config_path() {
            Some(path) => path,
            None => return Err("could not resolve home directory".to_string()),
        };
        config::ensure_default_config_file(&path)?;
        println!("config written to {}", path.display());
        return Ok(());
    }

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    if run.no_color {
        colored::control::set_override(false);
    }
    init_tracing(run.verbose);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;
    rt.block_on(run_async(run))
}
