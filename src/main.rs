//! Line-oriented front end and entry point.
//!
//! Reads one command per line from stdin, translates it into a library
//! [`Event`], runs it through the [`Runtime`] and prints the redrawn screen.
//!
//! # Architecture
//!
//! ```text
//! stdin line → parse_command → Event → Runtime::dispatch → render → stdout
//!                                           │
//!                                   RemoteClient (cache)
//!                                           │
//!                                   LocalTransport (JSON)
//!                                           │
//!                                   ContactWorker → Storage
//! ```
//!
//! Everything runs on a single-threaded tokio runtime.
//!
//! # Commands
//!
//! - `/ <text>` or `search <text>`: Filter by name (`/` alone clears)
//! - `n`/`next`: Next page
//! - `p`/`prev`: Previous page
//! - `f <id>`: Toggle favorite
//! - `add <first> <last> <phone>..`: Create a contact
//! - `edit <id> <first> <last> <phone>..`: Replace a contact
//! - `del <id>`: Delete a contact
//! - `r`/`refresh`: Drop cached results and reload
//! - `q`/`quit`: Exit

#![allow(clippy::multiple_crate_versions)]

use phonebook::domain::{ContactId, NewContact};
use phonebook::infrastructure::get_config_path;
use phonebook::remote::{LocalTransport, RemoteClient};
use phonebook::ui::helpers::strip_ansi;
use phonebook::worker::ContactWorker;
use phonebook::{initialize, open_storage, Config, Event, Runtime};
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_COLUMNS: usize = 80;

#[tokio::main(flavor = "current_thread")]
async fn main() -> phonebook::Result<()> {
    let config_path = get_config_path();
    let config = Config::load(&config_path, std::env::vars())?;
    phonebook::observability::init_tracing(&config);

    let span = tracing::debug_span!("startup");
    let guard = span.entered();
    tracing::debug!(
        path = %config_path.display(),
        found = config_path.exists(),
        ?config,
        "configuration resolved"
    );

    let storage = open_storage(&config)?;
    let client = RemoteClient::new(LocalTransport::new(ContactWorker::new(storage)));
    let mut runtime = Runtime::new(client, initialize(&config));
    let plain = !config.color || std::env::var_os("NO_COLOR").is_some();
    let cols = terminal_columns();
    tracing::info!(page_size = config.page_size, plain, cols, "phonebook started");
    drop(guard);

    runtime.dispatch(Event::Load).await?;
    print_screen(&runtime, cols, plain);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(event) = parse_command(line) else {
            tracing::debug!(line, "unrecognized command");
            println!("unrecognized command: {line}");
            continue;
        };

        let render = runtime.dispatch(event).await?;
        if runtime.should_quit() {
            break;
        }
        if render {
            print_screen(&runtime, cols, plain);
        }
    }

    tracing::info!("phonebook exiting");
    Ok(())
}

fn print_screen<A: phonebook::remote::ContactApi>(runtime: &Runtime<A>, cols: usize, plain: bool) {
    let screen = phonebook::ui::render(runtime.state(), cols);
    if plain {
        print!("{}", strip_ansi(&screen));
    } else {
        print!("{screen}");
    }
}

fn terminal_columns() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse::<usize>().ok())
        .filter(|&c| c > 0)
        .unwrap_or(DEFAULT_COLUMNS)
}

/// Maps one input line to an event.
///
/// Returns `None` for unknown commands and malformed arguments.
fn parse_command(line: &str) -> Option<Event> {
    if let Some(text) = line.strip_prefix('/') {
        return Some(Event::SetSearch(text.trim().to_string()));
    }

    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let args: Vec<&str> = rest.split_whitespace().collect();

    match (command, args.as_slice()) {
        ("search", _) => Some(Event::SetSearch(rest.trim().to_string())),
        ("n" | "next", []) => Some(Event::NextPage),
        ("p" | "prev", []) => Some(Event::PrevPage),
        ("r" | "refresh", []) => Some(Event::Refresh),
        ("q" | "quit", []) => Some(Event::Quit),
        ("f" | "fav", [id]) => id.parse::<ContactId>().ok().map(Event::ToggleFavorite),
        ("del" | "delete", [id]) => id.parse::<ContactId>().ok().map(Event::DeleteContact),
        ("add", [first, last, phones @ ..]) => Some(Event::AddContact(new_contact(first, last, phones))),
        ("edit", [id, first, last, phones @ ..]) => {
            let id = id.parse::<ContactId>().ok()?;
            Some(Event::EditContact {
                id,
                contact: new_contact(first, last, phones),
            })
        }
        _ => None,
    }
}

fn new_contact(first: &str, last: &str, phones: &[&str]) -> NewContact {
    NewContact::new(first, last, phones.iter().map(ToString::to_string).collect())
}
