//! Lesson image linking command

use std::path::PathBuf;
use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::config::AppConfig;
use crate::errors::{IllustError, IllustResult};
use crate::lessons::{discover_lessons, link_lesson_file};
use crate::utils::logger::Logger;

use super::required_path;

/// Command pointing dialogue lessons at their extracted illustrations
pub struct LinkCommand<'a> {
    /// Directory of `lesson_*.json` files
    lessons_dir: PathBuf,
    /// Directory of extracted illustrations
    illustrations_dir: PathBuf,
    /// URL prefix written in front of each illustration name
    url_prefix: String,
    logger: &'a Logger,
}

impl<'a> LinkCommand<'a> {
    pub fn new(args: &ArgMatches, config: &AppConfig, logger: &'a Logger) -> IllustResult<Self> {
        let lessons_dir = required_path(args, "input", "lessons directory")?;
        let illustrations_dir = required_path(args, "illustrations", "illustrations directory (--illustrations)")?;

        if !illustrations_dir.is_dir() {
            return Err(IllustError::GenericError(format!(
                "Illustrations directory not found: {}", illustrations_dir.display())));
        }

        Ok(LinkCommand {
            lessons_dir,
            illustrations_dir,
            url_prefix: config.lessons.image_url_prefix.clone(),
            logger,
        })
    }
}

impl<'a> Command for LinkCommand<'a> {
    fn execute(&self) -> IllustResult<()> {
        let lessons = discover_lessons(&self.lessons_dir)?;
        info!("Found {} lesson files", lessons.len());
        info!("Illustrations directory: {}", self.illustrations_dir.display());

        let mut updated = 0;
        let mut skipped = 0;
        for lesson in &lessons {
            if link_lesson_file(lesson, &self.illustrations_dir, &self.url_prefix)?.is_updated() {
                updated += 1;
            } else {
                skipped += 1;
            }
        }

        let lines = vec![
            format!("Updated: {} dialogue lessons", updated),
            format!("Skipped: {} lessons", skipped),
        ];
        self.logger.log_report("Lesson image linking", &lines)?;
        for line in &lines {
            println!("{}", line);
        }

        Ok(())
    }
}
