use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use rustyline::history::DefaultHistory;
use rustyline::{Config, EditMode, Editor};

use spelltrie::{Trie, TrieConfig, TrieView};

use crate::commands::{parse_command, Command, HELP_TEXT};
use crate::completion::{update_completion_context, LineHelper};
use crate::config::{self, build_prompt, Settings};
use crate::dictionary::load_file;
use crate::error::TrieResult;
use crate::io_helpers::read_input_line;

pub(crate) struct ReplState {
    pub(crate) editor: Editor<LineHelper, DefaultHistory>,
    pub(crate) session: Session,
    pub(crate) prompt_template: Option<String>,
    pub(crate) interactive: bool,
}

/// Everything a command can touch, kept apart from the line editor so it can
/// be driven directly.
pub(crate) struct Session {
    pub(crate) trie: Trie,
    pub(crate) budget: Duration,
    pub(crate) last_status: i32,
    // Set when the word list used for completion is stale.
    pub(crate) words_changed: bool,
}

/// What the loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

impl Session {
    pub(crate) fn new(settings: &Settings) -> Self {
        Session {
            trie: Trie::with_config(TrieConfig {
                case_sensitive: settings.case_sensitive,
            }),
            budget: settings.budget,
            last_status: 0,
            words_changed: true,
        }
    }

    /// Parse and run one line, writing results to `out` and problems to
    /// stderr.
    pub(crate) fn run_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let trimmed = line.trim();
        let command = match parse_command(trimmed) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                eprintln!("{}", err.display_with_input(trimmed));
                self.last_status = err.status();
                return Ok(Flow::Continue);
            }
        };
        match self.execute(command, out) {
            Ok(flow) => {
                self.last_status = 0;
                Ok(flow)
            }
            Err(err) => {
                eprintln!("{}", err.display_simple());
                self.last_status = err.status();
                Ok(Flow::Continue)
            }
        }
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> TrieResult<Flow> {
        match command {
            Command::Insert(words) => {
                for word in words {
                    let count = self.trie.insert(&word);
                    emit(out, format_args!("{word} {count}"));
                }
                self.words_changed = true;
            }
            Command::Remove(words) => {
                for word in words {
                    let state = if self.trie.remove(&word) {
                        "removed"
                    } else {
                        "absent"
                    };
                    emit(out, format_args!("{word} {state}"));
                }
                self.words_changed = true;
            }
            Command::Contains(word) => emit(out, format_args!("{}", self.trie.contains(&word))),
            Command::Frequency(word) => emit(out, format_args!("{}", self.trie.frequency(&word))),
            Command::Size => emit(out, format_args!("{}", self.trie.size())),
            Command::Match { query, budget } => {
                let budget = budget.unwrap_or(self.budget);
                let found = self.trie.best_match(&query, budget);
                debug!(
                    "repl event=match query={query:?} budget_ms={} found={found:?}",
                    budget.as_millis()
                );
                if found.is_empty() {
                    emit(out, format_args!("(no match)"));
                } else {
                    emit(out, format_args!("{found}"));
                }
            }
            Command::Load(paths) => {
                for path in paths {
                    self.load(Path::new(&path), out)?;
                }
            }
            Command::Words(prefix) => {
                let view = TrieView::new(&self.trie);
                let entries = match prefix {
                    Some(prefix) => view.completions(&prefix),
                    None => view.words(),
                };
                for entry in entries {
                    emit(out, format_args!("{} {}", entry.word, entry.occurrences));
                }
            }
            Command::Tree => {
                let rendered = TrieView::new(&self.trie).render();
                emit(out, format_args!("{}", rendered.trim_end()));
            }
            Command::Dump => {
                let dump = self.trie.to_string();
                if !dump.is_empty() {
                    emit(out, format_args!("{}", dump.trim_end()));
                }
            }
            Command::Help => emit(out, format_args!("{HELP_TEXT}")),
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    pub(crate) fn load(&mut self, path: &Path, out: &mut impl Write) -> TrieResult<()> {
        let stats = load_file(&mut self.trie, path)?;
        self.words_changed = true;
        emit(
            out,
            format_args!(
                "loaded {} words from {} in {:.3}s",
                stats.words,
                path.display(),
                stats.elapsed.as_secs_f64()
            ),
        );
        Ok(())
    }
}

// A closed stdout is not worth failing a command over.
fn emit(out: &mut impl Write, args: std::fmt::Arguments<'_>) {
    let _ = writeln!(out, "{args}");
}

fn history_path() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".spelltrie_history")
}

pub(crate) fn init_state(settings: Settings, interactive: bool) -> io::Result<ReplState> {
    let edit_mode = match settings.edit_mode {
        config::EditMode::Vi => EditMode::Vi,
        config::EditMode::Emacs => EditMode::Emacs,
    };
    let editor_config = Config::builder()
        .auto_add_history(true)
        .edit_mode(edit_mode)
        .build();
    let mut editor = Editor::with_config(editor_config).map_err(io::Error::other)?;
    editor.set_helper(Some(LineHelper::new()));
    if interactive {
        let _ = editor.load_history(&history_path());
    }

    let mut session = Session::new(&settings);
    let mut stdout = io::stdout();
    for path in &settings.dictionaries {
        if let Err(err) = session.load(path, &mut stdout) {
            eprintln!("{}", err.display_simple());
        }
    }

    Ok(ReplState {
        editor,
        session,
        prompt_template: settings.prompt,
        interactive,
    })
}

pub(crate) fn run_once(state: &mut ReplState) -> io::Result<Flow> {
    if state.interactive && state.session.words_changed {
        update_completion_context(&mut state.editor, &state.session.trie);
        state.session.words_changed = false;
    }
    let prompt = build_prompt(
        state.interactive,
        &state.prompt_template,
        state.session.trie.size(),
    );
    let Some(line) = read_input_line(&mut state.editor, state.interactive, &prompt)? else {
        if state.interactive {
            println!();
        }
        return Ok(Flow::Exit);
    };
    let mut stdout = io::stdout().lock();
    let flow = state.session.run_line(&line, &mut stdout)?;
    stdout.flush()?;
    Ok(flow)
}

pub(crate) fn shutdown(state: &mut ReplState) {
    if state.interactive {
        let _ = state.editor.save_history(&history_path());
    }
}
