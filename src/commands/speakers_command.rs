//! Speaker renaming command

use std::path::PathBuf;
use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::errors::IllustResult;
use crate::lessons::{discover_lessons, rename_lesson_file, SpeakerTable};
use crate::utils::logger::Logger;

use super::required_path;

/// Command replacing "Speaker N" labels with names from a speaker table
pub struct SpeakersCommand<'a> {
    /// Directory of `lesson_*.json` files
    lessons_dir: PathBuf,
    table: SpeakerTable,
    logger: &'a Logger,
}

impl<'a> SpeakersCommand<'a> {
    /// Uses `--speaker-table` if given, else the bundled table
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> IllustResult<Self> {
        let lessons_dir = required_path(args, "input", "lessons directory")?;

        let table = match args.get_one::<String>("speaker-table") {
            Some(path) => {
                info!("Loading speaker table from {}", path);
                SpeakerTable::from_file(path)?
            }
            None => SpeakerTable::builtin().clone(),
        };
        info!("Speaker table covers {} lessons", table.len());

        Ok(SpeakersCommand {
            lessons_dir,
            table,
            logger,
        })
    }
}

impl<'a> Command for SpeakersCommand<'a> {
    fn execute(&self) -> IllustResult<()> {
        let lessons = discover_lessons(&self.lessons_dir)?;
        info!("Processing {} lesson files", lessons.len());

        let mut updated = 0;
        let mut skipped = 0;
        for lesson in &lessons {
            if rename_lesson_file(lesson, &self.table)?.is_updated() {
                updated += 1;
            } else {
                skipped += 1;
            }
        }

        let lines = vec![
            format!("Updated: {} lessons", updated),
            format!("Skipped: {} lessons", skipped),
        ];
        self.logger.log_report("Speaker renaming", &lines)?;
        for line in &lines {
            println!("{}", line);
        }

        Ok(())
    }
}
