use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;

use crate::commands::parse_budget_ms;
use crate::error::{ErrorKind, TrieError};

pub(crate) const DEFAULT_BUDGET: Duration = Duration::from_millis(250);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EditMode {
    Emacs,
    Vi,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) case_sensitive: bool,
    pub(crate) budget: Duration,
    pub(crate) prompt: Option<String>,
    pub(crate) dictionaries: Vec<PathBuf>,
    pub(crate) edit_mode: EditMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            budget: DEFAULT_BUDGET,
            prompt: None,
            dictionaries: Vec::new(),
            edit_mode: EditMode::Emacs,
        }
    }
}

/// `$SPELLTRIE_CONFIG`, falling back to `$HOME/.spelltrierc`.
pub(crate) fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("SPELLTRIE_CONFIG") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    let home = env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".spelltrierc"))
}

pub(crate) fn load_config(settings: &mut Settings) -> io::Result<()> {
    let Some(path) = config_path() else {
        return Ok(());
    };
    load_config_file(settings, &path)
}

pub(crate) fn load_config_file(settings: &mut Settings, path: &Path) -> io::Result<()> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };
    debug!("config event=load path={}", path.display());
    for (line, err) in apply_config(settings, &content) {
        eprintln!("config:{line}: {}", err.message);
    }
    Ok(())
}

/// Applies every recognised line of `content` and returns the rejected ones
/// as `(line number, error)` pairs.
pub(crate) fn apply_config(settings: &mut Settings, content: &str) -> Vec<(usize, TrieError)> {
    let mut problems = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            problems.push((
                idx + 1,
                TrieError::new(ErrorKind::Config, "unrecognized directive"),
            ));
            continue;
        };
        if let Err(err) = apply_setting(settings, key.trim(), strip_quotes(value.trim())) {
            problems.push((idx + 1, err));
        }
    }
    problems
}

fn apply_setting(settings: &mut Settings, key: &str, value: &str) -> Result<(), TrieError> {
    match key.to_ascii_lowercase().as_str() {
        "case_sensitive" => settings.case_sensitive = parse_bool(value)?,
        "budget_ms" => {
            settings.budget =
                parse_budget_ms(value).map_err(|err| TrieError::new(ErrorKind::Config, err))?
        }
        "prompt" => settings.prompt = Some(value.to_string()),
        "dictionary" => settings.dictionaries.push(PathBuf::from(value)),
        "edit_mode" => {
            settings.edit_mode = parse_edit_mode(value).ok_or_else(|| {
                TrieError::new(ErrorKind::Config, format!("unknown edit mode '{value}'"))
            })?
        }
        _ => {
            return Err(TrieError::new(
                ErrorKind::Config,
                format!("unknown key '{key}'"),
            ))
        }
    }
    Ok(())
}

/// Overrides that come from the environment rather than the file.
pub(crate) fn apply_env(settings: &mut Settings) {
    if let Ok(mode) = env::var("SPELLTRIE_EDITMODE") {
        match parse_edit_mode(&mode) {
            Some(mode) => settings.edit_mode = mode,
            None => eprintln!("config error: invalid SPELLTRIE_EDITMODE '{mode}'"),
        }
    }
}

pub(crate) fn parse_edit_mode(value: &str) -> Option<EditMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "emacs" => Some(EditMode::Emacs),
        "vi" => Some(EditMode::Vi),
        _ => None,
    }
}

fn parse_bool(value: &str) -> Result<bool, TrieError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(TrieError::new(
            ErrorKind::Config,
            format!("expected true or false, got '{value}'"),
        )),
    }
}

pub(crate) fn build_prompt(interactive: bool, template: &Option<String>, words: usize) -> String {
    if !interactive {
        return String::new();
    }
    match template {
        Some(template) => template.replace("{size}", &words.to_string()),
        None => format!("spelltrie [{words}]> "),
    }
}

fn strip_quotes(input: &str) -> &str {
    let bytes = input.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &input[1..bytes.len() - 1];
        }
    }
    input
}
