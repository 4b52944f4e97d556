//! Named save slots on disk

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::snapshot::Snapshot;

const EXTENSION: &str = "json";

/// A save file and the name shown for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlot {
    pub name: String,
    pub path: PathBuf,
}

impl SaveSlot {
    fn from_path(path: PathBuf) -> Option<Self> {
        if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        Some(Self {
            name: stem.replace('_', " "),
            path,
        })
    }
}

/// Directory holding one JSON file per save
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a save name: spaces and characters that are not
    /// allowed in file names become `_`. `None` for blank names.
    pub fn file_name_for(name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let stem: String = name
            .chars()
            .map(|c| match c {
                ' ' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        Some(format!("{stem}.{EXTENSION}"))
    }

    /// Write a snapshot under `name`, replacing any save with the same name
    pub fn save(&self, name: &str, snapshot: &Snapshot) -> anyhow::Result<SaveSlot> {
        let file_name = Self::file_name_for(name).context("save name is empty")?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating save directory {}", self.dir.display()))?;

        let path = self.dir.join(&file_name);
        let tmp = self.dir.join(format!("{file_name}.tmp"));
        let json = snapshot.to_json()?;
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("replacing {}", path.display()))?;

        log::info!(
            "Saved game '{}' ({} obstacles) to {}",
            name.trim(),
            snapshot.obstacles.len(),
            path.display()
        );
        SaveSlot::from_path(path).context("save path is not valid UTF-8")
    }

    /// All saves, sorted by file name. A missing directory means no saves.
    pub fn list(&self) -> anyhow::Result<Vec<SaveSlot>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("reading save directory {}", self.dir.display()));
            }
        };

        let mut slots = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(slot) = SaveSlot::from_path(entry.path()) {
                slots.push(slot);
            }
        }
        slots.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(slots)
    }

    /// Read and parse a save
    pub fn load(&self, slot: &SaveSlot) -> anyhow::Result<Snapshot> {
        let json = fs::read_to_string(&slot.path)
            .with_context(|| format!("reading {}", slot.path.display()))?;
        let snapshot = Snapshot::from_json(&json)
            .with_context(|| format!("parsing {}", slot.path.display()))?;
        log::info!(
            "Loaded game '{}' ({} obstacles)",
            slot.name,
            snapshot.obstacles.len()
        );
        Ok(snapshot)
    }
}
