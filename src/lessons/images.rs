//! Linking extracted illustrations into dialogue lessons
//!
//! A lesson's id is the page its dialogue was printed on. The page's
//! illustrations, ordered by rank, become the dialogue's images; a page
//! with a single illustration gets it as the dialogue header instead.

use std::fs;
use std::path::Path;
use log::{info, warn};
use serde_json::{json, Value};

use crate::errors::IllustResult;
use crate::utils::naming::parse_illustration_file_name;

use super::{dialogue_mut, is_dialogue, lesson_id, read_lesson, write_lesson};

/// Alt text for a header image that had none
pub const HEADER_ALT: &str = "Ilustración del diálogo";

fn numbered_alt(position: usize) -> String {
    format!("Ilustración {} del diálogo", position)
}

/// What happened to a lesson during linking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A single illustration became the header image
    Header,
    /// Several illustrations filled the images list
    Images(usize),
    NotDialogue,
    MissingId,
    NoIllustrations,
}

impl LinkOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, LinkOutcome::Header | LinkOutcome::Images(_))
    }
}

/// Illustration file names for `page_number` in `dir`, sorted by rank
pub fn illustrations_for_page(dir: &Path, page_number: u32) -> IllustResult<Vec<String>> {
    let mut found: Vec<(usize, String)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().to_string();
        if let Some((page, rank)) = parse_illustration_file_name(&name) {
            if page == page_number {
                found.push((rank, name));
            }
        }
    }

    found.sort();
    Ok(found.into_iter().map(|(_, name)| name).collect())
}

fn image_entry(url_prefix: &str, name: &str, alt: Value) -> Value {
    json!({
        "src": format!("{}/{}", url_prefix.trim_end_matches('/'), name),
        "alt": alt,
    })
}

fn non_empty_alt(image: Option<&Value>) -> Option<Value> {
    image
        .and_then(|image| image.get("alt"))
        .filter(|alt| alt.as_str().map_or(false, |s| !s.is_empty()))
        .cloned()
}

/// Point a dialogue lesson at the given illustrations
///
/// `illustrations` must already be in rank order. Existing alt texts are
/// kept where they can be matched up.
pub fn link_lesson_images(lesson: &mut Value, illustrations: &[String], url_prefix: &str) -> LinkOutcome {
    if !is_dialogue(lesson) {
        return LinkOutcome::NotDialogue;
    }
    if illustrations.is_empty() {
        return LinkOutcome::NoIllustrations;
    }
    let Some(dialogue) = dialogue_mut(lesson) else {
        return LinkOutcome::NotDialogue;
    };

    let current_images: Vec<Value> = dialogue.get("images")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    if let [only] = illustrations {
        let alt = non_empty_alt(dialogue.get("headerImage"))
            .or_else(|| non_empty_alt(current_images.first()))
            .unwrap_or_else(|| Value::from(HEADER_ALT));

        dialogue.insert("headerImage".to_string(), image_entry(url_prefix, only, alt));
        dialogue.insert("images".to_string(), Value::Array(Vec::new()));
        return LinkOutcome::Header;
    }

    let keep_alts = current_images.len() == illustrations.len();
    let images: Vec<Value> = illustrations
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let alt = if keep_alts {
                current_images[index].get("alt").cloned()
            } else {
                None
            };
            image_entry(url_prefix, name, alt.unwrap_or_else(|| Value::from(numbered_alt(index + 1))))
        })
        .collect();

    dialogue.shift_remove("headerImage");
    dialogue.insert("images".to_string(), Value::Array(images));
    LinkOutcome::Images(illustrations.len())
}

/// Link one lesson file against an illustrations directory, rewriting it if updated
pub fn link_lesson_file(lesson_path: &Path, illustrations_dir: &Path, url_prefix: &str) -> IllustResult<LinkOutcome> {
    let mut lesson = read_lesson(lesson_path)?;

    if !is_dialogue(&lesson) {
        return Ok(LinkOutcome::NotDialogue);
    }
    let Some(page_number) = lesson_id(&lesson) else {
        warn!("No lesson ID found in {}", lesson_path.display());
        return Ok(LinkOutcome::MissingId);
    };

    let illustrations = illustrations_for_page(illustrations_dir, page_number)?;
    if illustrations.is_empty() {
        warn!("No images found for page {}", page_number);
        return Ok(LinkOutcome::NoIllustrations);
    }

    let outcome = link_lesson_images(&mut lesson, &illustrations, url_prefix);
    if outcome.is_updated() {
        write_lesson(lesson_path, &lesson)?;
        info!("Updated: {}", lesson_path.display());
    }
    Ok(outcome)
}
