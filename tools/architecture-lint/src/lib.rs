//! Layer-boundary lint for the status page client.
//!
//! Every source file under a layer directory of `client/src` is parsed with
//! `syn`, and each path it names is checked against that layer's rule:
//!
//! - `domain` may not reach application, adapter or wiring modules, nor the
//!   infrastructure crates the adapters wrap
//! - application services (`admin`, `api`, `session`) talk to adapters only
//!   through domain ports
//! - `outbound` adapters may not call back into application services
//!
//! Run it with `cargo run -p architecture-lint` from the workspace root.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;
use thiserror::Error;

/// Crate name used when client sources refer to themselves by path.
const CLIENT_CRATE: &str = "status_client";

/// Crates only the outbound adapters and the wiring code may touch.
const INFRASTRUCTURE_CRATES: &[&str] = &["cap_std", "ortho_config", "reqwest", "tracing_subscriber"];

/// Import rules for one layer of the client.
#[derive(Debug)]
struct LayerRule {
    name: &'static str,
    roots: &'static [&'static str],
    forbidden_modules: &'static [&'static str],
    forbidden_crates: &'static [&'static str],
}

static RULES: [LayerRule; 3] = [
    LayerRule {
        name: "domain",
        roots: &["domain"],
        forbidden_modules: &[
            "admin",
            "api",
            "session",
            "outbound",
            "bootstrap",
            "config",
            "telemetry",
        ],
        forbidden_crates: INFRASTRUCTURE_CRATES,
    },
    LayerRule {
        name: "application",
        roots: &["admin", "api", "session"],
        forbidden_modules: &["outbound", "bootstrap", "config", "telemetry"],
        forbidden_crates: INFRASTRUCTURE_CRATES,
    },
    LayerRule {
        name: "outbound",
        roots: &["outbound"],
        forbidden_modules: &["admin", "api", "session", "bootstrap"],
        forbidden_crates: &["ortho_config", "tracing_subscriber"],
    },
];

impl LayerRule {
    fn for_file(file: &Path) -> Option<&'static Self> {
        let first = file.components().next()?.as_os_str().to_str()?;
        let root = first.strip_suffix(".rs").unwrap_or(first);
        RULES.iter().find(|rule| names(rule.roots, root))
    }

    /// Message for `path` when this layer may not name it.
    ///
    /// Bare and `self::`/`super::` paths resolve inside the current module,
    /// so only `crate::` and `status_client::` prefixes can reach another
    /// layer; any other first segment is an external crate.
    fn violation(&self, path: &[String]) -> Option<String> {
        let (first, rest) = path.split_first()?;
        match first.as_str() {
            "crate" | CLIENT_CRATE => {
                let module = rest.first()?;
                names(self.forbidden_modules, module)
                    .then(|| format!("{} module must not depend on crate::{module}", self.name))
            }
            "self" | "super" => None,
            external => names(self.forbidden_crates, external).then(|| {
                format!(
                    "{} module must not depend on external crate `{external}`",
                    self.name
                )
            }),
        }
    }
}

fn names(list: &[&str], candidate: &str) -> bool {
    list.iter().any(|entry| *entry == candidate)
}

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {message}", .file.display())]
pub struct Violation {
    /// File path relative to `client/src`.
    pub file: PathBuf,
    /// Human-readable description of the violated rule.
    pub message: String,
}

/// Failure modes returned by the architecture lint.
#[derive(Debug, Error)]
pub enum ArchitectureLintError {
    /// Reading the source tree failed.
    #[error("failed to read client sources: {0}")]
    Io(#[from] io::Error),
    /// The file does not sit under a known layer directory.
    #[error("{} is outside every known layer", .file.display())]
    UnknownLayer {
        /// Offending path.
        file: PathBuf,
    },
    /// The file is not valid Rust.
    #[error("failed to parse {}: {message}", .file.display())]
    Parse {
        /// Offending path.
        file: PathBuf,
        /// Parser message.
        message: String,
    },
    /// One or more boundary violations were found.
    #[error("architecture boundary violations:\n{}", list(.0))]
    Violations(Vec<Violation>),
}

fn list(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("- {violation}\n"))
        .collect()
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `client/src`.
    pub file: PathBuf,
    /// File contents.
    pub contents: String,
}

/// Lint the client crate sources on disk.
///
/// `client_dir` must be the `client/` directory at the repository root.
/// Files outside the layer directories, such as the wiring modules, are not
/// checked.
pub fn lint_client_sources(client_dir: &Path) -> Result<(), ArchitectureLintError> {
    let sources = read_layer_sources(&client_dir.join("src"))?;
    lint_sources(&sources)
}

/// Lint the provided Rust sources, reporting every violation at once.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();

    for source in sources {
        let rule =
            LayerRule::for_file(&source.file).ok_or_else(|| ArchitectureLintError::UnknownLayer {
                file: source.file.clone(),
            })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;

        let mut paths = ReferencedPaths::default();
        paths.visit_file(&parsed);
        let messages: BTreeSet<String> =
            paths.0.iter().filter_map(|path| rule.violation(path)).collect();
        violations.extend(messages.into_iter().map(|message| Violation {
            file: source.file.clone(),
            message,
        }));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

/// Every path named by a file, with `use` trees flattened to full paths.
#[derive(Default)]
struct ReferencedPaths(BTreeSet<Vec<String>>);

impl<'ast> Visit<'ast> for ReferencedPaths {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.0.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        flatten_use_tree(&node.tree, &mut Vec::new(), &mut self.0);
    }
}

fn flatten_use_tree(
    tree: &syn::UseTree,
    prefix: &mut Vec<String>,
    out: &mut BTreeSet<Vec<String>>,
) {
    match tree {
        syn::UseTree::Path(path) => {
            prefix.push(path.ident.to_string());
            flatten_use_tree(&path.tree, prefix, out);
            prefix.pop();
        }
        syn::UseTree::Name(syn::UseName { ident })
        | syn::UseTree::Rename(syn::UseRename { ident, .. }) => {
            let mut full = prefix.clone();
            full.push(ident.to_string());
            out.insert(full);
        }
        syn::UseTree::Glob(_) => {
            if !prefix.is_empty() {
                out.insert(prefix.clone());
            }
        }
        syn::UseTree::Group(group) => {
            for item in &group.items {
                flatten_use_tree(item, prefix, out);
            }
        }
    }
}

/// Read every `.rs` file under the layer roots, sorted by path.
fn read_layer_sources(src_dir: &Path) -> Result<Vec<LintSource>, ArchitectureLintError> {
    let mut pending: Vec<PathBuf> = RULES
        .iter()
        .flat_map(|rule| rule.roots)
        .flat_map(|root| [src_dir.join(root), src_dir.join(format!("{root}.rs"))])
        .filter(|path| path.exists())
        .collect();
    let mut sources = Vec::new();

    while let Some(path) = pending.pop() {
        if path.is_dir() {
            for entry in fs::read_dir(&path)? {
                pending.push(entry?.path());
            }
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let file = path
                .strip_prefix(src_dir)
                .map_or_else(|_| path.clone(), Path::to_path_buf);
            let contents = fs::read_to_string(&path)?;
            sources.push(LintSource { file, contents });
        }
    }

    sources.sort_by(|left, right| left.file.cmp(&right.file));
    Ok(sources)
}
