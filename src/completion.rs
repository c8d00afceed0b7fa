use std::borrow::Cow;

use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{Highlighter, MatchingBracketHighlighter};
use rustyline::hint::Hinter;
use rustyline::history::{DefaultHistory, SearchDirection};
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use spelltrie::{Trie, TrieView};

use crate::commands::{suggest_command, COMMAND_NAMES};

const HINT_COLOR: &str = "\x1b[90m";

/// Refresh the word list the helper completes from. Called after commands
/// that change the trie, not on every prompt.
pub fn update_completion_context(editor: &mut Editor<LineHelper, DefaultHistory>, trie: &Trie) {
    let words = TrieView::new(trie)
        .words()
        .into_iter()
        .map(|entry| entry.word)
        .collect();
    if let Some(helper) = editor.helper_mut() {
        helper.update_context(words, trie.is_case_sensitive());
    }
}

pub struct LineHelper {
    completer: FilenameCompleter,
    hinter: HistoryAutosuggest,
    highlighter: MatchingBracketHighlighter,
    // Sorted, as produced by TrieView::words. Folded when the trie folds.
    words: Vec<String>,
    case_sensitive: bool,
}

impl LineHelper {
    pub fn new() -> Self {
        Self {
            completer: FilenameCompleter::new(),
            hinter: HistoryAutosuggest,
            highlighter: MatchingBracketHighlighter::new(),
            words: Vec::new(),
            case_sensitive: true,
        }
    }

    fn update_context(&mut self, words: Vec<String>, case_sensitive: bool) {
        self.words = words;
        self.case_sensitive = case_sensitive;
    }

    /// Stored words extending `token`, compared the way the trie compares.
    fn complete_word(&self, token: &str) -> Vec<Pair> {
        if self.case_sensitive {
            complete_from_list(token, &self.words)
        } else {
            complete_from_list(&token.to_lowercase(), &self.words)
        }
    }

    fn command_hint(&self, line: &str, pos: usize) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let (start, token) = current_token(line, pos);
        if token.is_empty() || !is_command_position(line, start) {
            return None;
        }
        if COMMAND_NAMES.iter().any(|name| name.starts_with(token.as_str())) {
            return None;
        }
        suggest_command(&token).map(|suggestion| format!(" -> {suggestion}"))
    }
}

impl Default for LineHelper {
    fn default() -> Self {
        Self::new()
    }
}

struct HistoryAutosuggest;

impl Hinter for HistoryAutosuggest {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        if line.is_empty() || pos < line.len() {
            return None;
        }
        let history = ctx.history();
        let start = if ctx.history_index() == history.len() {
            ctx.history_index().saturating_sub(1)
        } else {
            ctx.history_index()
        };
        let result = history
            .starts_with(line, start, SearchDirection::Reverse)
            .ok()
            .flatten()?;
        if result.entry == line {
            return None;
        }
        let remainder = result.entry[pos..].to_string();
        if remainder.is_empty() {
            return None;
        }
        Some(remainder)
    }
}

/// Byte offset where the token under the cursor starts, and the token.
pub(crate) fn current_token(line: &str, pos: usize) -> (usize, String) {
    let head = &line[..pos];
    let start = head
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map_or(0, |(idx, ch)| idx + ch.len_utf8());
    (start, head[start..].to_string())
}

pub(crate) fn is_command_position(line: &str, start: usize) -> bool {
    line[..start].trim().is_empty()
}

pub(crate) fn command_for_position(line: &str, start: usize) -> Option<&str> {
    line[..start].split_whitespace().next()
}

pub(crate) fn complete_from_list<S: AsRef<str>>(prefix: &str, list: &[S]) -> Vec<Pair> {
    let mut out = Vec::new();
    for item in list {
        let item: &str = item.as_ref();
        if item.starts_with(prefix) {
            out.push(Pair {
                display: item.to_string(),
                replacement: item.to_string(),
            });
        }
    }
    out
}

impl Helper for LineHelper {}

impl Completer for LineHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let (start, token) = current_token(line, pos);
        if is_command_position(line, start) {
            return Ok((start, complete_from_list(&token, COMMAND_NAMES)));
        }
        match command_for_position(line, start) {
            Some("load") => self.completer.complete(line, pos, ctx),
            Some("help" | "size" | "tree" | "dump" | "exit" | "quit") => Ok((start, Vec::new())),
            _ => Ok((start, self.complete_word(&token))),
        }
    }
}

impl Hinter for LineHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        if let Some(hint) = self.hinter.hint(line, pos, ctx) {
            return Some(hint);
        }
        self.command_hint(line, pos)
    }
}

impl Highlighter for LineHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        self.highlighter.highlight_prompt(prompt, default)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        if hint.is_empty() {
            return Cow::Borrowed(hint);
        }
        Cow::Owned(format!("{HINT_COLOR}{hint}\x1b[0m"))
    }

    fn highlight_char(&self, line: &str, pos: usize) -> bool {
        self.highlighter.highlight_char(line, pos)
    }
}

impl Validator for LineHelper {}
