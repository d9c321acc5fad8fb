use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::Path;

pub fn recap() -> Command {
    cargo_bin_cmd!("recap")
}

#[allow(dead_code)]
pub fn write_note(vault: &Path, rel: &str, content: &str) {
    let path = vault.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Lay down a small vault with dated entries tagged #meeting
#[allow(dead_code)]
pub fn create_test_vault(vault: &Path) {
    fs::create_dir_all(vault.join(".obsidian")).unwrap();
    write_note(
        vault,
        "daily/2024-01-15.md",
        "# Sprint kickoff\n\nPlanned the sprint backlog #meeting",
    );
    write_note(
        vault,
        "daily/2024-01-16.md",
        "# Standup\n\nDiscussed blockers with the team #meeting",
    );
    write_note(
        vault,
        "daily/2024-01-17.md",
        "# Design review\n\nReviewed the storage design #meeting #work",
    );
    write_note(vault, "ideas.md", "Untagged note about nothing");
}
