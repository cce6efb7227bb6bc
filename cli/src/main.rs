//! `pets`: list, search, create, edit and delete pets on a REST backend.
//!
//! Every run mounts the view (one full load) and then runs one command
//! against the freshly loaded cache.

mod render;
mod transport;

use std::io::Write;

use clap::{Parser, Subcommand};
use pets_core::{Command, Outcome, PetClient, PetDraft, PetId, PetListView, Transport, ViewError};
use tracing_subscriber::EnvFilter;

use crate::transport::UreqTransport;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Parser)]
#[command(name = "pets", about = "Manage the pets of a REST backend")]
struct Cli {
    /// Backend root; the collection lives at `<base-url>/pets/`.
    #[arg(long, env = "PETS_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Address single pets as `/pets/{id}` instead of `/pets/{id}/`.
    #[arg(long, env = "PETS_NO_TRAILING_SLASH")]
    no_trailing_slash: bool,

    #[command(subcommand)]
    command: PetCommand,
}

#[derive(Debug, Subcommand)]
enum PetCommand {
    /// Show every pet, or those whose name contains `--search`.
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        breed: String,
        #[arg(long)]
        age: u32,
    },
    /// Replace a pet. Fields left out keep their cached value.
    Update {
        id: PetId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        breed: Option<String>,
        #[arg(long)]
        age: Option<u32>,
    },
    Delete {
        id: PetId,
    },
    View {
        id: PetId,
    },
}

fn main() -> anyhow::Result<()> {
    // Honor `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    run(cli, UreqTransport::new(), &mut stdout)
}

fn run<T: Transport>(cli: Cli, transport: T, out: &mut impl Write) -> anyhow::Result<()> {
    let client = PetClient::new(&cli.base_url).with_trailing_slash(!cli.no_trailing_slash);
    let mut view = PetListView::new(client, transport);

    checked(&mut view, |v| v.mount())?;

    match cli.command {
        PetCommand::List { search } => {
            if let Some(query) = search {
                checked(&mut view, |v| v.dispatch(Command::Search(query)))?;
            }
            render::write_list(out, &view.store().visible())?;
        }
        PetCommand::Create { name, breed, age } => {
            let draft = PetDraft { name, breed, age };
            if let Outcome::Created(pet) = checked(&mut view, |v| v.dispatch(Command::Create(draft)))? {
                writeln!(out, "Created")?;
                render::write_pet(out, &pet)?;
            }
        }
        PetCommand::Update {
            id,
            name,
            breed,
            age,
        } => {
            let session = view.store_mut().begin_edit(id)?;
            let buffer = session.buffer_mut();
            if let Some(name) = name {
                buffer.name = name;
            }
            if let Some(breed) = breed {
                buffer.breed = breed;
            }
            if let Some(age) = age {
                buffer.age = age;
            }
            if let Outcome::Updated(pet) = checked(&mut view, |v| v.submit_edit())? {
                writeln!(out, "Updated")?;
                render::write_pet(out, &pet)?;
            }
        }
        PetCommand::Delete { id } => {
            checked(&mut view, |v| v.dispatch(Command::Delete(id)))?;
            writeln!(out, "Deleted pet #{id}")?;
        }
        PetCommand::View { id } => {
            if let Outcome::Viewed(pet) = checked(&mut view, |v| v.dispatch(Command::View(id)))? {
                render::write_pet(out, &pet)?;
            }
        }
    }
    Ok(())
}

/// Run `op` and attach the message the view shows for a failure.
fn checked<T, F>(view: &mut PetListView<T>, op: F) -> anyhow::Result<Outcome>
where
    T: Transport,
    F: FnOnce(&mut PetListView<T>) -> Result<Outcome, ViewError>,
{
    op(&mut *view).map_err(|err| {
        let message = match err {
            ViewError::Api(_) => view.store().error(),
            ViewError::Store(_) => None,
        };
        match message {
            Some(message) => anyhow::Error::new(err).context(message.to_string()),
            None => err.into(),
        }
    })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use pets_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct Scripted {
        responses: VecDeque<(u16, &'static str)>,
        requests: Vec<(HttpMethod, String, Option<String>)>,
    }

    impl Transport for Scripted {
        fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.push((request.method, request.path, request.body));
            let (status, body) = self
                .responses
                .pop_front()
                .ok_or_else(|| ApiError::Transport("connection refused".to_string()))?;
            Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            })
        }
    }

    const PETS: &str = r#"[
        {"id":1,"nombre":"Rex","raza":"Labrador","edad":3},
        {"id":2,"nombre":"Luna","raza":"Siamese","edad":2}
    ]"#;

    fn run_args(args: &[&str], transport: &mut Scripted) -> (anyhow::Result<()>, String) {
        let cli = Cli::try_parse_from(std::iter::once("pets").chain(args.iter().copied())).unwrap();
        let mut out = Vec::new();
        let result = run(cli, &mut *transport, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn defaults_to_local_backend() {
        let cli = Cli::try_parse_from(["pets", "list"]).unwrap();
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
        assert!(!cli.no_trailing_slash);
    }

    #[test]
    fn rejects_negative_age() {
        let parsed = Cli::try_parse_from(["pets", "create", "--name", "Rex", "--breed", "Lab", "--age", "-1"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn list_with_search() {
        let mut transport = Scripted {
            responses: VecDeque::from([(200, PETS)]),
            ..Default::default()
        };
        let (result, out) = run_args(&["list", "--search", "LU"], &mut transport);
        result.unwrap();
        assert_eq!(out, "Luna (#2)\n  Breed: Siamese\n  Age: 2 years\n");
        assert_eq!(transport.requests.len(), 1);
    }

    #[test]
    fn list_with_no_matches() {
        let mut transport = Scripted {
            responses: VecDeque::from([(200, PETS)]),
            ..Default::default()
        };
        let (result, out) = run_args(&["list", "--search", "cat"], &mut transport);
        result.unwrap();
        assert_eq!(out, "No pets available\n");
    }

    #[test]
    fn update_merges_cached_fields() {
        let mut transport = Scripted {
            responses: VecDeque::from([
                (200, PETS),
                (200, r#"{"id":1,"nombre":"Rex","raza":"Labrador","edad":4}"#),
            ]),
            ..Default::default()
        };
        let (result, out) = run_args(
            &["--base-url", "http://pets.test", "--no-trailing-slash", "update", "1", "--age", "4"],
            &mut transport,
        );
        result.unwrap();
        assert!(out.starts_with("Updated\nRex (#1)"));

        let (method, path, body) = &transport.requests[1];
        assert_eq!(*method, HttpMethod::Put);
        assert_eq!(path, "http://pets.test/pets/1");
        let body: serde_json::Value = serde_json::from_str(body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"id": 1, "nombre": "Rex", "raza": "Labrador", "edad": 4}));
    }

    #[test]
    fn update_of_unknown_pet_fails_locally() {
        let mut transport = Scripted {
            responses: VecDeque::from([(200, PETS)]),
            ..Default::default()
        };
        let (result, _) = run_args(&["update", "9", "--name", "Ghost"], &mut transport);
        assert_eq!(result.unwrap_err().to_string(), "Pet 9 not found");
        assert_eq!(transport.requests.len(), 1);
    }

    #[test]
    fn failed_load_reports_message() {
        let mut transport = Scripted::default();
        let (result, out) = run_args(&["list"], &mut transport);
        assert_eq!(result.unwrap_err().to_string(), "Error fetching data");
        assert!(out.is_empty());
    }

    #[test]
    fn delete_prints_confirmation() {
        let mut transport = Scripted {
            responses: VecDeque::from([(200, PETS), (204, "")]),
            ..Default::default()
        };
        let (result, out) = run_args(&["delete", "2"], &mut transport);
        result.unwrap();
        assert_eq!(out, "Deleted pet #2\n");
        assert_eq!(transport.requests[1].1, "http://127.0.0.1:8000/pets/2/");
    }
}
