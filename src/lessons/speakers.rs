//! Speaker renaming for dialogue lessons
//!
//! Transcribed dialogues label their speakers "Speaker 1", "Speaker 2", ...
//! A [`SpeakerTable`] maps each lesson id to the names those labels stand for.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{IllustError, IllustResult};

use super::{is_dialogue, lesson_id, read_lesson, write_lesson};

lazy_static! {
    static ref SPEAKER_LABEL: Regex =
        Regex::new(r"^Speaker\s*(\d+)").expect("speaker label pattern is valid");

    // Parse the bundled table once
    static ref BUILTIN_TABLE: SpeakerTable = {
        let content = include_str!("../../speaker_names.toml");
        SpeakerTable::from_str(content).unwrap_or_else(|e| {
            warn!("Failed to parse built-in speaker table: {}", e);
            SpeakerTable::default()
        })
    };
}

#[derive(Debug, Deserialize)]
struct SpeakerFile {
    #[serde(default)]
    speakers: HashMap<String, Vec<String>>,
}

/// Speaker names per lesson id, in label order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeakerTable {
    names: HashMap<u32, Vec<String>>,
}

impl SpeakerTable {
    /// The table bundled with the crate
    pub fn builtin() -> &'static SpeakerTable {
        &BUILTIN_TABLE
    }

    /// Parse a table from TOML with a `[speakers]` section keyed by lesson id
    pub fn from_str(content: &str) -> IllustResult<Self> {
        let file: SpeakerFile = toml::from_str(content)?;

        let mut names = HashMap::with_capacity(file.speakers.len());
        for (key, speakers) in file.speakers {
            let id = key.trim().parse::<u32>().map_err(|_| {
                IllustError::ConfigError(format!("Speaker table key '{}' is not a lesson id", key))
            })?;
            names.insert(id, speakers);
        }

        Ok(SpeakerTable { names })
    }

    /// Load a table from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> IllustResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn names_for(&self, lesson_id: u32) -> Option<&[String]> {
        self.names.get(&lesson_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// What happened to a lesson during renaming
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Lesson qualified; the number of lines whose speaker changed
    Renamed(usize),
    NotDialogue,
    NotInTable,
    NoLines,
    NoSpeakers,
}

impl RenameOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, RenameOutcome::Renamed(_))
    }
}

/// Name for a "Speaker N" label, if the table has an N-th entry
fn resolve_label<'a>(label: &str, names: &'a [String]) -> Option<&'a String> {
    let captures = SPEAKER_LABEL.captures(label)?;
    let number: usize = captures.get(1)?.as_str().parse().ok()?;
    names.get(number.checked_sub(1)?)
}

fn speaker_of(line: &Value) -> Option<&str> {
    line.get("speaker")
        .and_then(Value::as_str)
        .filter(|speaker| !speaker.is_empty())
}

/// Replace generic speaker labels in a dialogue lesson with names from `table`
///
/// Labels that do not look like "Speaker N", or whose N has no entry,
/// are left as they are.
pub fn rename_speakers(lesson: &mut Value, table: &SpeakerTable) -> RenameOutcome {
    if !is_dialogue(lesson) {
        return RenameOutcome::NotDialogue;
    }
    let Some(names) = lesson_id(lesson).and_then(|id| table.names_for(id)) else {
        return RenameOutcome::NotInTable;
    };

    let Some(lines) = lesson
        .get_mut("dialogue")
        .and_then(|dialogue| dialogue.get_mut("lines"))
        .and_then(Value::as_array_mut)
        .filter(|lines| !lines.is_empty())
    else {
        return RenameOutcome::NoLines;
    };

    if !lines.iter().any(|line| speaker_of(line).is_some()) {
        return RenameOutcome::NoSpeakers;
    }

    let mut mapping: HashMap<String, String> = HashMap::new();
    let mut seen: HashSet<String> = HashSet::new();
    for line in lines.iter() {
        if let Some(speaker) = speaker_of(line) {
            if seen.insert(speaker.to_string()) {
                if let Some(name) = resolve_label(speaker, names) {
                    mapping.insert(speaker.to_string(), name.clone());
                }
            }
        }
    }

    let mut renamed = 0;
    for line in lines.iter_mut() {
        let replacement = speaker_of(line).and_then(|speaker| mapping.get(speaker)).cloned();
        if let (Some(name), Some(object)) = (replacement, line.as_object_mut()) {
            object.insert("speaker".to_string(), Value::String(name));
            renamed += 1;
        }
    }

    RenameOutcome::Renamed(renamed)
}

/// Rename speakers in one lesson file, rewriting it if it qualified
pub fn rename_lesson_file(lesson_path: &Path, table: &SpeakerTable) -> IllustResult<RenameOutcome> {
    let mut lesson = read_lesson(lesson_path)?;

    let outcome = rename_speakers(&mut lesson, table);
    if outcome.is_updated() {
        write_lesson(lesson_path, &lesson)?;
        info!("Updated: {}", lesson_path.display());
    }
    Ok(outcome)
}
