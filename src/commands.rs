use std::time::Duration;

use spelltrie::{Trie, TrieConfig};

use crate::error::{ErrorKind, TrieError, TrieResult};

pub(crate) const COMMAND_NAMES: &[&str] = &[
    "insert", "add", "remove", "rm", "contains", "freq", "size", "match", "load", "words",
    "tree", "dump", "help", "exit", "quit",
];

pub(crate) const HELP_TEXT: &str = "\
insert <word>...          record one occurrence of each word (alias: add)
remove <word>...          clear every occurrence of each word (alias: rm)
contains <word>           true if the word is stored
freq <word>               occurrence count of the word
size                      number of distinct stored words
match <query> [ms]        closest stored word within the time budget
load <path>...            insert every word found in the files
words [prefix]            list stored words with their counts
tree                      show the trie structure
dump                      raw node dump
exit | quit               leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Insert(Vec<String>),
    Remove(Vec<String>),
    Contains(String),
    Frequency(String),
    Size,
    Match {
        query: String,
        budget: Option<Duration>,
    },
    Load(Vec<String>),
    Words(Option<String>),
    Tree,
    Dump,
    Help,
    Exit,
}

/// Split a command line into words. Single and double quotes group text,
/// including spaces, into one word.
pub(crate) fn tokenize(line: &str) -> TrieResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<(char, usize)> = None;

    for (pos, ch) in line.chars().enumerate() {
        match quote {
            Some((open, _)) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if ch == '\'' || ch == '"' => {
                quote = Some((ch, pos));
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }
    if let Some((open, pos)) = quote {
        return Err(
            TrieError::new(ErrorKind::Parse, format!("unterminated {open} quote"))
                .with_position(pos),
        );
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Parse one non-empty line. Returns `Ok(None)` for blank lines and comments.
pub(crate) fn parse_command(line: &str) -> TrieResult<Option<Command>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let mut tokens = tokenize(trimmed)?.into_iter();
    let Some(name) = tokens.next() else {
        return Ok(None);
    };
    let args: Vec<String> = tokens.collect();

    let command = match name.as_str() {
        "insert" | "add" => Command::Insert(at_least_one(&name, args)?),
        "remove" | "rm" => Command::Remove(at_least_one(&name, args)?),
        "contains" => Command::Contains(exactly_one(&name, args)?),
        "freq" => Command::Frequency(exactly_one(&name, args)?),
        "size" => no_args(&name, &args, Command::Size)?,
        "match" => parse_match(args)?,
        "load" => Command::Load(at_least_one(&name, args)?),
        "words" => {
            if args.len() > 1 {
                return Err(usage(&name, "words [prefix]"));
            }
            Command::Words(args.into_iter().next())
        }
        "tree" => no_args(&name, &args, Command::Tree)?,
        "dump" => no_args(&name, &args, Command::Dump)?,
        "help" => Command::Help,
        "exit" | "quit" => Command::Exit,
        _ => return Err(unknown_command(&name)),
    };
    Ok(Some(command))
}

fn parse_match(args: Vec<String>) -> TrieResult<Command> {
    let mut args = args.into_iter();
    let (Some(query), budget, None) = (args.next(), args.next(), args.next()) else {
        return Err(usage("match", "match <query> [budget_ms]"));
    };
    let budget = match budget {
        Some(raw) => Some(parse_budget_ms(&raw).map_err(|err| {
            TrieError::new(ErrorKind::Command, err).with_context("match <query> [budget_ms]")
        })?),
        None => None,
    };
    Ok(Command::Match { query, budget })
}

pub(crate) fn parse_budget_ms(raw: &str) -> Result<Duration, String> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| format!("invalid budget '{raw}': expected milliseconds"))
}

fn at_least_one(name: &str, args: Vec<String>) -> TrieResult<Vec<String>> {
    if args.is_empty() {
        return Err(usage(name, &format!("{name} <word>...")));
    }
    Ok(args)
}

fn exactly_one(name: &str, args: Vec<String>) -> TrieResult<String> {
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(arg), None) => Ok(arg),
        _ => Err(usage(name, &format!("{name} <word>"))),
    }
}

fn no_args(name: &str, args: &[String], command: Command) -> TrieResult<Command> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(usage(name, name))
    }
}

fn usage(name: &str, form: &str) -> TrieError {
    TrieError::new(ErrorKind::Command, format!("wrong arguments for '{name}'"))
        .with_context(format!("usage: {form}"))
}

fn unknown_command(name: &str) -> TrieError {
    let err = TrieError::new(ErrorKind::Command, format!("unknown command '{name}'"));
    match suggest_command(name) {
        Some(suggestion) => err.with_context(format!("did you mean '{suggestion}'?")),
        None => err.with_context("type 'help' for a list of commands"),
    }
}

/// Closest known command name, if it is plausibly a typo.
pub(crate) fn suggest_command(name: &str) -> Option<String> {
    let mut names = Trie::with_config(TrieConfig {
        case_sensitive: false,
    });
    for known in COMMAND_NAMES {
        names.insert(known);
    }
    let best = names.best_match(name, Duration::MAX);
    let limit = (name.chars().count() / 2).max(1);
    if spelltrie::distance(&best, &name.to_lowercase()) <= limit {
        Some(best)
    } else {
        None
    }
}
