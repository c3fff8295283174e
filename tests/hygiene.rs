//! Source hygiene budgets for the omniconnect crate.
//!
//! Scans production sources under `src/` (sibling `*_test.rs` files are
//! skipped) and counts lines containing known antipatterns. Budgets only go
//! down: remove an existing hit before adding a new one.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "panics on None/Err" },
    Budget { pattern: ".expect(", max: 0, why: "panics on None/Err" },
    Budget { pattern: "panic!(", max: 0, why: "crashes the process" },
    Budget { pattern: "unreachable!(", max: 0, why: "crashes the process" },
    Budget { pattern: "todo!(", max: 0, why: "unfinished stub" },
    Budget { pattern: "unimplemented!(", max: 0, why: "unfinished stub" },
    Budget { pattern: "let _ =", max: 0, why: "discards a result unseen" },
    // Env lookups in llm/config.rs: absent and unparsable both mean "use the default".
    Budget { pattern: ".ok()", max: 2, why: "discards an error unseen" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "hides unused code" },
];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|f| (f.path.clone(), f.content.lines().filter(|line| line.contains(pattern)).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")), "run from the crate root");
}

#[test]
fn antipattern_budgets_hold() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let listing: Vec<String> = found.iter().map(|(path, c)| format!("    {path}: {c}")).collect();
            failures.push(format!(
                "`{}` ({}): found {count}, max {}\n{}",
                budget.pattern,
                budget.why,
                budget.max,
                listing.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}
