mod demo;

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use navstack::core::config;
use simplelog::{ConfigBuilder, WriteLogger};

use demo::Step;

#[derive(Parser)]
#[command(name = "navstack", about = "Scripted navigation and presentation stack demo")]
struct Args {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(short, long)]
    log_level: Option<String>,

    /// State file for --save and --restore (defaults to the configured one)
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Restore both stacks from the state file before running steps
    #[arg(long)]
    restore: bool,

    /// Save both stacks to the state file after running steps
    #[arg(long)]
    save: bool,

    /// Skip the login redirect for settings and profile screens
    #[arg(long)]
    signed_in: bool,

    /// Steps to run, e.g. "push home" "sheet profile:7" "pop 2"
    #[arg(value_name = "STEP")]
    steps: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (file_config, load_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (config::NavstackConfig::default(), Some(e)),
    };
    let resolved = config::resolve(&file_config, args.log_level.as_deref());

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = &load_error {
        log::warn!("Failed to load config, using defaults: {}", e);
    }
    log::info!("navstack starting with {} step(s)", args.steps.len());

    let steps = match args.steps.iter().map(|s| s.parse::<Step>()).collect::<Result<Vec<_>, _>>() {
        Ok(steps) => steps,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let router = demo::build_router(&resolved, args.signed_in);
    router.navigation().subscribe(|old, new| {
        log::info!("navigation depth {} -> {}", old.len(), new.len());
    });

    let state_file = args.state.unwrap_or_else(|| resolved.state_file.clone());
    if (args.restore || resolved.restore_on_start) && state_file.exists() {
        if let Err(e) = router.restore_from(&state_file) {
            eprintln!("error: could not restore {}: {e}", state_file.display());
            return ExitCode::FAILURE;
        }
        log::info!("Restored state from {}", state_file.display());
    }

    for step in &steps {
        if let Err(e) = demo::apply(&router, step) {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    }

    print!("{}", demo::render(&router, &demo::registry()));

    if args.save {
        if let Err(e) = router.save_to(&state_file) {
            eprintln!("error: could not save {}: {e}", state_file.display());
            return ExitCode::FAILURE;
        }
        println!("saved to {}", state_file.display());
    }

    ExitCode::SUCCESS
}
