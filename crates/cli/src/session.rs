//! Interactive browsing session.
//!
//! Reads one command per line from stdin while recipe batches and photos are
//! generated in the background; results are applied to the controller as
//! they arrive.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chef_client::{ContentProvider, GeneratedImage};
use colored::Colorize;
use pipeline::CategoryFilter;
use server::{EventOutcome, InteractionController, ProviderTasks};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::render;

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Search(String),
    Category(CategoryFilter),
    Reset,
    List,
    Open(String),
    Close,
    Rate(u8),
    Photo,
    SavePhoto(PathBuf),
    Retry,
    State,
    Help,
    Quit,
}

/// Parse a line into a command; `Err` carries a hint for the user.
pub fn parse_command(line: &str) -> std::result::Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "search" | "buscar" => SessionCommand::Search(rest.to_string()),
        "category" | "categoria" => {
            let filter = rest
                .parse::<CategoryFilter>()
                .map_err(|_| "Categorías: all, primero, segundo, postre".to_string())?;
            SessionCommand::Category(filter)
        }
        "reset" => SessionCommand::Reset,
        "list" | "ls" => SessionCommand::List,
        "open" | "ver" => {
            if rest.is_empty() {
                return Err("Uso: open <id>".to_string());
            }
            SessionCommand::Open(rest.to_string())
        }
        "close" | "cerrar" => SessionCommand::Close,
        "rate" | "votar" => {
            let score = rest
                .parse::<u8>()
                .map_err(|_| "Uso: rate <1-5>".to_string())?;
            SessionCommand::Rate(score)
        }
        "photo" | "foto" => {
            if rest.is_empty() {
                SessionCommand::Photo
            } else {
                SessionCommand::SavePhoto(PathBuf::from(rest))
            }
        }
        "retry" | "reintentar" => SessionCommand::Retry,
        "state" => SessionCommand::State,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => return Err(format!("Comando desconocido: {} (prueba 'help')", other)),
    };
    Ok(Some(command))
}

fn print_help() {
    println!("{}", "Comandos:".bold());
    println!("  search <texto>        filtrar por título, resumen o ingrediente");
    println!("  category <c>          all | primero | segundo | postre");
    println!("  reset                 ver todas las recetas");
    println!("  list                  mostrar la carta filtrada");
    println!("  open <id> / close     abrir o cerrar una receta");
    println!("  rate <1-5>            valorar la receta abierta");
    println!("  photo [archivo]       generar foto IA (o guardar la foto actual)");
    println!("  retry                 volver a pedir las recetas");
    println!("  state                 estado de la vista en JSON");
    println!("  quit");
}

fn start_load(controller: &mut InteractionController, tasks: &ProviderTasks) {
    match controller.begin_load() {
        Some(ticket) => {
            println!("{}", "El Chef AI está creando el menú...".green());
            tasks.spawn_load(ticket);
        }
        None => println!("Ya se están cargando las recetas."),
    }
}

fn report(controller: &InteractionController, outcome: EventOutcome) {
    match outcome {
        EventOutcome::Loaded(0) => {
            println!("No se pudieron cargar las recetas en este momento.");
            println!("Escribe 'retry' para reintentar.");
        }
        EventOutcome::Loaded(_) => {
            render::print_list(controller.query(), &controller.visible());
        }
        EventOutcome::ImageApplied => {
            println!("{}", "Foto generada.".green());
        }
        EventOutcome::ImageMissing => {
            println!("No se pudo generar la foto.");
        }
        EventOutcome::ImageDiscarded => {
            debug!("Photo arrived after its view closed");
        }
    }
}

/// Write the selection's generated photo (a data URI) to `path`.
fn save_photo(controller: &InteractionController, path: &Path) -> Result<()> {
    let Some(uri) = controller
        .view()
        .selected
        .as_ref()
        .and_then(|r| r.image_url.as_deref())
        .filter(|u| u.starts_with("data:"))
    else {
        println!("Primero genera una foto con 'photo'.");
        return Ok(());
    };
    let image = GeneratedImage::from_data_uri(uri).context("Malformed image data")?;
    fs::write(path, &image.bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Foto guardada en {}", path.display());
    Ok(())
}

/// Handle one command; returns `false` to end the session.
fn handle(
    controller: &mut InteractionController,
    tasks: &ProviderTasks,
    command: SessionCommand,
) -> Result<bool> {
    match command {
        SessionCommand::Search(text) => {
            controller.set_search(text);
            render::print_list(controller.query(), &controller.visible());
        }
        SessionCommand::Category(filter) => {
            controller.set_category(filter);
            render::print_list(controller.query(), &controller.visible());
        }
        SessionCommand::Reset => {
            controller.reset_filters();
            render::print_list(controller.query(), &controller.visible());
        }
        SessionCommand::List => {
            if controller.store().is_loading() {
                println!("Cargando recetas...");
            } else {
                render::print_list(controller.query(), &controller.visible());
            }
        }
        SessionCommand::Open(id) => {
            if controller.open(&id).is_some() {
                render::print_view(controller.view(), controller.display_image().as_deref());
            } else {
                println!("No existe ninguna receta con id '{}'.", id);
            }
        }
        SessionCommand::Close => controller.close(),
        SessionCommand::Rate(score) => {
            if controller.rate(score) {
                render::print_view(controller.view(), controller.display_image().as_deref());
            } else {
                debug!("Vote ignored");
            }
        }
        SessionCommand::Photo => match controller.begin_image() {
            Some(ticket) => {
                println!("{}", "Generando foto...".magenta());
                tasks.spawn_image(ticket);
            }
            None => println!("Abre una receta (y espera a que termine la foto anterior)."),
        },
        SessionCommand::SavePhoto(path) => save_photo(controller, &path)?,
        SessionCommand::Retry => start_load(controller, tasks),
        SessionCommand::State => {
            println!("{}", serde_json::to_string_pretty(controller.view())?);
        }
        SessionCommand::Help => print_help(),
        SessionCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Run the interactive session until `quit` or end of input.
pub async fn run(
    mut controller: InteractionController,
    provider: Arc<dyn ContentProvider>,
) -> Result<()> {
    let (tasks, mut events) = ProviderTasks::new(provider);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_help();
    start_load(&mut controller, &tasks);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(Some(command)) => {
                        if !handle(&mut controller, &tasks, command)? {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(hint) => println!("{}", hint.yellow()),
                }
            }
            Some(event) = events.recv() => {
                let outcome = controller.apply(event);
                report(&controller, outcome);
            }
        }
    }
    Ok(())
}
