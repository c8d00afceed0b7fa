use std::env;
use std::path::PathBuf;

mod commands;
mod completion;
mod config;
mod dictionary;
mod error;
mod io_helpers;
mod repl;

use commands::parse_budget_ms;
use config::{apply_env, load_config, Settings};
use repl::{init_state, run_once, shutdown, Flow};

fn main() {
    init_logging();
    let mut settings = Settings::default();
    if let Err(err) = load_config(&mut settings) {
        eprintln!("config error: {err}");
    }
    apply_env(&mut settings);
    if let Err(err) = apply_args(&mut settings, env::args().skip(1)) {
        eprintln!("error: {err}");
        std::process::exit(2);
    }

    let interactive = unsafe { libc::isatty(libc::STDIN_FILENO) == 1 };
    let mut state = match init_state(settings, interactive) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    loop {
        match run_once(&mut state) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(err) => {
                eprintln!("error: {err}");
                break;
            }
        }
    }
    shutdown(&mut state);
    std::process::exit(state.session.last_status);
}

fn init_logging() {
    let env = env_logger::Env::default().filter_or("SPELLTRIE_LOG", "info");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

/// Command-line flags override the config file and environment. Anything
/// that is not a flag is a dictionary to load at startup.
fn apply_args(settings: &mut Settings, args: impl Iterator<Item = String>) -> Result<(), String> {
    for arg in args {
        if arg == "-i" || arg == "--ignore-case" {
            settings.case_sensitive = false;
        } else if arg == "--case-sensitive" {
            settings.case_sensitive = true;
        } else if let Some(value) = arg.strip_prefix("--budget-ms=") {
            settings.budget = parse_budget_ms(value)?;
        } else if arg.starts_with('-') && arg.len() > 1 {
            return Err(format!("unknown option '{arg}'"));
        } else {
            settings.dictionaries.push(PathBuf::from(arg));
        }
    }
    Ok(())
}
