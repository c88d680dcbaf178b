//! Hygiene: source rules for the editor core and the CLI, checked at test time.
//!
//! Each rule is a plain substring searched line by line in production
//! sources (`*_test.rs` files are skipped). Every rule is a hard zero. A
//! rule may be scoped to one crate when the other has a legitimate use,
//! e.g. the CLI prints its JSON summary to stdout.

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crate {
    Core,
    Cli,
}

impl Crate {
    fn root(self) -> &'static Path {
        match self {
            Self::Core => Path::new("src"),
            Self::Cli => Path::new("cli/src"),
        }
    }
}

const BOTH: &[Crate] = &[Crate::Core, Crate::Cli];
const CORE: &[Crate] = &[Crate::Core];

struct Rule {
    pattern: &'static str,
    scope: &'static [Crate],
    hint: &'static str,
}

const RULES: &[Rule] = &[
    // Crashes.
    Rule { pattern: ".unwrap()", scope: BOTH, hint: "propagate with `?` or handle the None/Err arm" },
    Rule { pattern: ".expect(", scope: BOTH, hint: "propagate with `?`" },
    Rule { pattern: "panic!(", scope: BOTH, hint: "return a TourError or CliError" },
    Rule { pattern: "unreachable!(", scope: BOTH, hint: "make the state unrepresentable instead" },
    Rule { pattern: "todo!(", scope: BOTH, hint: "finish the stub" },
    Rule { pattern: "unimplemented!(", scope: BOTH, hint: "finish the stub" },
    // Errors dropped on the floor.
    Rule { pattern: "let _ =", scope: BOTH, hint: "log or propagate the result" },
    Rule { pattern: ".ok()", scope: BOTH, hint: "match the error and log it" },
    Rule { pattern: "#[allow(dead_code)]", scope: BOTH, hint: "delete the unused item" },
    // The core reports through `tracing` and stays synchronous; the CLI owns
    // stdio and the runtime.
    Rule { pattern: "println!(", scope: CORE, hint: "use tracing" },
    Rule { pattern: "eprintln!(", scope: CORE, hint: "use tracing" },
    Rule { pattern: "dbg!(", scope: BOTH, hint: "use tracing::debug!" },
    Rule { pattern: "tokio::", scope: CORE, hint: "async work belongs to the host; use load tickets" },
];

struct SourceFile {
    krate: Crate,
    path: PathBuf,
    content: String,
}

fn sources(krate: Crate) -> Vec<SourceFile> {
    let mut out = Vec::new();
    walk(krate, krate.root(), &mut out);
    assert!(!out.is_empty(), "no sources found under {}", krate.root().display());
    out
}

fn walk(krate: Crate, dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            walk(krate, &path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if is_rs && !is_test {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { krate, path, content });
            }
        }
    }
}

fn all_sources() -> Vec<SourceFile> {
    BOTH.iter().flat_map(|k| sources(*k)).collect()
}

/// `path:line: text` for every line of `files` containing `pattern`.
fn hits<'a>(files: impl IntoIterator<Item = &'a SourceFile>, pattern: &str) -> Vec<String> {
    files
        .into_iter()
        .flat_map(|file| {
            file.content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(pattern))
                .map(|(n, line)| format!("  {}:{}: {}", file.path.display(), n + 1, line.trim()))
        })
        .collect()
}

#[test]
fn both_crates_are_scanned() {
    let files = all_sources();
    for krate in BOTH {
        assert!(files.iter().any(|f| f.krate == *krate), "{krate:?} missing from scan");
    }
    assert!(files.iter().any(|f| f.path.ends_with("cli/src/main.rs")));
}

#[test]
fn source_rules() {
    let files = all_sources();
    let mut report = Vec::new();
    for rule in RULES {
        let scoped = files.iter().filter(|f| rule.scope.contains(&f.krate));
        let found = hits(scoped, rule.pattern);
        if !found.is_empty() {
            report.push(format!("`{}` ({}):\n{}", rule.pattern, rule.hint, found.join("\n")));
        }
    }
    assert!(report.is_empty(), "hygiene violations:\n{}", report.join("\n"));
}

#[test]
fn env_reads_only_in_core_config() {
    let files = all_sources();
    let outside = files.iter().filter(|f| !(f.krate == Crate::Core && f.path.ends_with("config.rs")));
    let found = hits(outside, "env::var");
    assert!(
        found.is_empty(),
        "environment read outside src/config.rs; add a field to EditorConfig or a clap `env` arg:\n{}",
        found.join("\n")
    );
}

#[test]
fn declared_test_modules_exist() {
    let mut missing = Vec::new();
    for file in all_sources() {
        let dir = file.path.parent().unwrap_or_else(|| file.krate.root());
        for line in file.content.lines() {
            let declared = line
                .trim()
                .strip_prefix("#[path = \"")
                .and_then(|rest| rest.strip_suffix("\"]"));
            if let Some(name) = declared {
                if !dir.join(name).is_file() {
                    missing.push(format!("  {}: {name}", file.path.display()));
                }
            }
        }
    }
    assert!(missing.is_empty(), "test modules declared but missing:\n{}", missing.join("\n"));
}
