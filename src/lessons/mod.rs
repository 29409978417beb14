//! Lesson metadata rewriting
//!
//! Lessons are JSON documents (`lesson_*.json`). Only the dialogue fields
//! touched by the tools in this module are interpreted; everything else
//! is carried through untouched and in its original key order.

pub mod images;
pub mod speakers;

use std::fs;
use std::path::{Path, PathBuf};
use serde_json::{Map, Value};

use crate::errors::IllustResult;

pub use images::{illustrations_for_page, link_lesson_file, link_lesson_images, LinkOutcome};
pub use speakers::{rename_lesson_file, rename_speakers, RenameOutcome, SpeakerTable};

/// Lesson `type` value of dialogue lessons
pub const DIALOGUE_TYPE: &str = "dialogue";

/// Find `lesson_*.json` files in `dir`, sorted by name
pub fn discover_lessons(dir: &Path) -> IllustResult<Vec<PathBuf>> {
    let mut lessons: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map_or(false, |name| name.starts_with("lesson_") && name.ends_with(".json"))
        })
        .collect();

    lessons.sort();
    Ok(lessons)
}

pub fn read_lesson(path: &Path) -> IllustResult<Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a lesson back as two-space indented JSON
pub fn write_lesson(path: &Path, lesson: &Value) -> IllustResult<()> {
    let content = serde_json::to_string_pretty(lesson)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn is_dialogue(lesson: &Value) -> bool {
    lesson.get("type").and_then(Value::as_str) == Some(DIALOGUE_TYPE)
}

/// Numeric lesson id, which is also the source page number
pub fn lesson_id(lesson: &Value) -> Option<u32> {
    lesson.get("id")
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok())
}

/// The lesson's `dialogue` object, created if missing or not an object
pub(crate) fn dialogue_mut(lesson: &mut Value) -> Option<&mut Map<String, Value>> {
    let root = lesson.as_object_mut()?;
    let dialogue = root.entry("dialogue").or_insert_with(|| Value::Object(Map::new()));
    if !dialogue.is_object() {
        *dialogue = Value::Object(Map::new());
    }
    dialogue.as_object_mut()
}
