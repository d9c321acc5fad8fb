//! Vault scanning for discovering markdown files
//!
//! Walks an Obsidian vault and collects `.md` files, skipping the
//! directories Obsidian and common tooling leave behind, plus the
//! summaries output directory so generated files never feed back in.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use crate::error::{RecapError, Result};

/// Directories excluded from scanning by default
const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    ".obsidian",
    ".git",
    ".trash",
    ".vscode",
    ".idea",
    "node_modules",
    "Summaries",
    "Attachments",
    "Templates",
];

/// Filename prefixes/suffixes for editor temp files
const EXCLUDE_PREFIXES: &[&str] = &["~", ".#"];
const EXCLUDE_SUFFIXES: &[&str] = &[".tmp", ".bak", ".swp", ".swo"];

/// Result of a vault scan
#[derive(Debug)]
pub struct ScanResult {
    /// Vault root that was scanned
    pub vault_path: PathBuf,
    /// Markdown files found, sorted by path
    pub markdown_files: Vec<PathBuf>,
    /// Total files seen (including excluded ones)
    pub total_files: usize,
    /// Scan duration in milliseconds
    pub scan_time_ms: f64,
}

/// Scans an Obsidian vault for markdown files
#[derive(Debug)]
pub struct VaultScanner {
    vault_path: PathBuf,
    exclude_dirs: BTreeSet<String>,
}

impl VaultScanner {
    /// Create a scanner for a vault, merging extra exclusions with the
    /// defaults. Fails if the path is missing or not a directory.
    pub fn new(vault_path: &Path, extra_exclude_dirs: &[String]) -> Result<Self> {
        if !vault_path.exists() {
            return Err(RecapError::VaultNotFound {
                path: vault_path.to_path_buf(),
            });
        }
        if !vault_path.is_dir() {
            return Err(RecapError::NotADirectory {
                path: vault_path.to_path_buf(),
            });
        }

        let mut exclude_dirs: BTreeSet<String> = DEFAULT_EXCLUDE_DIRS
            .iter()
            .map(|s| s.to_string())
            .collect();
        exclude_dirs.extend(extra_exclude_dirs.iter().cloned());

        tracing::debug!(
            vault = %vault_path.display(),
            excluded = ?exclude_dirs,
            "initialized vault scanner"
        );

        Ok(VaultScanner {
            vault_path: vault_path.to_path_buf(),
            exclude_dirs,
        })
    }

    /// The vault root this scanner walks
    pub fn vault_path(&self) -> &Path {
        &self.vault_path
    }

    /// Scan the vault for markdown files
    pub fn scan(&self) -> ScanResult {
        let start = Instant::now();
        let mut markdown_files = Vec::new();
        let mut total_files = 0usize;

        let walker = WalkDir::new(&self.vault_path)
            .into_iter()
            .filter_entry(|e| !self.is_excluded_dir(e.path()));

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            total_files += 1;

            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            if Self::is_temp_file(path) {
                tracing::debug!(path = %path.display(), "excluding temp file");
                continue;
            }

            markdown_files.push(path.to_path_buf());
        }

        markdown_files.sort();
        let scan_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        tracing::info!(
            found = markdown_files.len(),
            total = total_files,
            elapsed_ms = scan_time_ms,
            "scan completed"
        );

        ScanResult {
            vault_path: self.vault_path.clone(),
            markdown_files,
            total_files,
            scan_time_ms,
        }
    }

    /// Whether the vault looks like an Obsidian vault (has `.obsidian/`)
    pub fn looks_like_obsidian_vault(&self) -> bool {
        self.vault_path.join(".obsidian").is_dir()
    }

    fn is_excluded_dir(&self, path: &Path) -> bool {
        // The vault root itself is never excluded, even if its own name
        // matches an exclusion entry
        if path == self.vault_path {
            return false;
        }
        path.file_name()
            .map(|name| self.exclude_dirs.contains(&name.to_string_lossy().into_owned()))
            .unwrap_or(false)
    }

    fn is_temp_file(path: &Path) -> bool {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
            return false;
        };
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        EXCLUDE_PREFIXES.iter().any(|p| name.starts_with(p))
            || EXCLUDE_SUFFIXES.iter().any(|s| stem.ends_with(s))
    }
}
