//! Writes the wiring formula reference, `EQUATIONS.md`, from the equation
//! registry so the document always matches the formulas the calculators run.
//!
//! ```bash
//! cargo run --bin gen-equations            # regenerate
//! cargo run --bin gen-equations -- --check # fail if the file is stale
//! ```
//!
//! Run from the workspace root.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use denko_core::equations::{generate_equations_markdown, ALL_EQUATIONS};

const OUTPUT_PATH: &str = "denko_core/src/equations/EQUATIONS.md";

/// First line where two documents differ (1-based), if any
fn first_difference(current: &str, expected: &str) -> Option<usize> {
    let mut current_lines = current.lines();
    let mut expected_lines = expected.lines();
    let mut line = 1;
    loop {
        match (current_lines.next(), expected_lines.next()) {
            (None, None) => return None,
            (a, b) if a == b => line += 1,
            _ => return Some(line),
        }
    }
}

fn check(path: &Path, expected: &str) -> ExitCode {
    match fs::read_to_string(path) {
        Ok(current) => match first_difference(&current, expected) {
            None => {
                println!("{} is up to date ({} equations)", path.display(), ALL_EQUATIONS.len());
                ExitCode::SUCCESS
            }
            Some(line) => {
                eprintln!("{} is stale from line {}; rerun gen-equations", path.display(), line);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("cannot read {}: {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let markdown = generate_equations_markdown();
    let path = Path::new(OUTPUT_PATH);

    if std::env::args().skip(1).any(|arg| arg == "--check") {
        return check(path, &markdown);
    }

    match fs::write(path, &markdown) {
        Ok(()) => {
            println!("wrote {} equations to {}", ALL_EQUATIONS.len(), path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("cannot write {}: {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference("a\nb\n", "a\nb\n"), None);
        assert_eq!(first_difference("a\nx\n", "a\nb\n"), Some(2));
        assert_eq!(first_difference("a\n", "a\nb\n"), Some(2));
    }

    #[test]
    fn test_generated_reference_lists_every_equation() {
        let markdown = generate_equations_markdown();
        for equation in ALL_EQUATIONS {
            assert!(markdown.contains(&format!("### {}", equation.metadata().name)));
        }
    }
}
