//! `cargo run -p architecture-lint`: check the client's layer boundaries.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::{env, fs};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("no workspace Cargo.toml found above {start}", start = .0.display())]
struct WorkspaceNotFound(PathBuf);

fn main() -> ExitCode {
    let outcome = workspace_root()
        .map_err(|err| err.to_string())
        .and_then(|root| {
            architecture_lint::lint_client_sources(&root.join("client"))
                .map_err(|err| err.to_string())
        });
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            let _ = writeln!(io::stderr().lock(), "{report}");
            ExitCode::FAILURE
        }
    }
}

/// First directory holding a workspace manifest, searching upwards from
/// `CARGO_WORKSPACE_DIR`, then the working directory, then this crate.
fn workspace_root() -> Result<PathBuf, WorkspaceNotFound> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let starts = [
        env::var_os("CARGO_WORKSPACE_DIR").map(PathBuf::from),
        env::current_dir().ok(),
        Some(manifest_dir.clone()),
    ];
    starts
        .iter()
        .flatten()
        .find_map(|start| start.ancestors().find(|dir| declares_workspace(dir)))
        .map(Path::to_path_buf)
        .ok_or(WorkspaceNotFound(manifest_dir))
}

fn declares_workspace(dir: &Path) -> bool {
    fs::read_to_string(dir.join("Cargo.toml"))
        .is_ok_and(|manifest| manifest.lines().any(|line| line.trim() == "[workspace]"))
}
