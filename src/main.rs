use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::{error, LevelFilter};

use illustkit::utils::logger::Logger;
use illustkit::commands::{CommandFactory, IllustkitCommandFactory};

fn main() {
    let matches = ClapCommand::new("illustkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract illustrations from scanned textbook pages and link them into lessons")
        .arg(
            Arg::new("input")
                .help("Page image, directory of page documents (--batch) or lessons directory")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output directory for extracted illustrations")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .help("Page number used in output names (single-page mode)")
                .value_name("N")
                .required(false),
        )
        .arg(
            Arg::new("min-area")
                .long("min-area")
                .help("Exclusive lower bound on illustration area in pixels")
                .value_name("PIXELS")
                .required(false),
        )
        .arg(
            Arg::new("max-area")
                .long("max-area")
                .help("Exclusive upper bound on illustration area in pixels")
                .value_name("PIXELS")
                .required(false),
        )
        .arg(
            Arg::new("batch")
                .short('b')
                .long("batch")
                .help("Rasterize and extract every page document in the input directory")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dpi")
                .long("dpi")
                .help("Rasterization resolution for batch mode")
                .value_name("DPI")
                .required(false),
        )
        .arg(
            Arg::new("link-lessons")
                .long("link-lessons")
                .help("Point dialogue lessons in the input directory at their illustrations")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("illustrations")
                .long("illustrations")
                .help("Directory of extracted illustrations (with --link-lessons)")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("rename-speakers")
                .long("rename-speakers")
                .help("Replace generic speaker labels in the input lessons directory")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("speaker-table")
                .long("speaker-table")
                .help("TOML speaker table replacing the built-in one")
                .value_name("FILE")
                .required(false),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };

    let logger = match Logger::new("illustkit.log") {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("illustkit-global.log", level) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = IllustkitCommandFactory::new();

    match factory.create_command(&matches, &logger) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
