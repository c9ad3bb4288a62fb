//! The terminal chooser: a full-screen filterable list for picking a target.
//!
//! Typing filters the candidates (case-insensitive subsequence match), the
//! arrow keys move the highlight, Enter accepts and Esc cancels.

use crate::transfer::{Candidate, Chooser};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;

#[must_use]
/// Whether every character of `query` appears in `text`, in order, ignoring case.
pub fn matches(query: &str, text: &str) -> bool {
    let mut haystack = text.chars().flat_map(char::to_lowercase);
    query
        .chars()
        .flat_map(char::to_lowercase)
        .all(|wanted| haystack.any(|c| c == wanted))
}

#[derive(Debug, PartialEq, Eq)]
/// How a key press ended the picker.
pub enum Outcome {
    /// The candidate at this index (into the full candidate list) was accepted.
    Chosen(usize),
    /// The user backed out.
    Cancelled,
}

/// Query and highlight state of one prompt.
pub struct Picker<'a> {
    prompt: &'a str,
    candidates: &'a [Candidate],
    query: String,
    filtered: Vec<usize>,
    selected: usize,
}

impl<'a> Picker<'a> {
    #[must_use]
    /// Picker over `candidates` with an empty query.
    pub fn new(prompt: &'a str, candidates: &'a [Candidate]) -> Self {
        Self {
            prompt,
            candidates,
            query: String::new(),
            filtered: (0..candidates.len()).collect(),
            selected: 0,
        }
    }

    #[must_use]
    /// Indices of the candidates matching the current query.
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    #[must_use]
    /// Candidate index under the highlight, if any candidate matches.
    pub fn highlighted(&self) -> Option<usize> {
        self.filtered.get(self.selected).copied()
    }

    fn refilter(&mut self) {
        self.filtered = self
            .candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| matches(&self.query, &c.display) || matches(&self.query, &c.key))
            .map(|(i, _)| i)
            .collect();
        self.selected = 0;
    }

    /// Apply a key press; returns an outcome once the user accepts or cancels.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Outcome> {
        match key.code {
            KeyCode::Esc => return Some(Outcome::Cancelled),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Outcome::Cancelled);
            }
            KeyCode::Enter => return self.highlighted().map(Outcome::Chosen),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.filtered.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.refilter();
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.refilter();
            }
            _ => {}
        }
        None
    }
}

fn candidate_line(candidate: &Candidate) -> Line<'_> {
    if candidate.key == candidate.display {
        return Line::from(candidate.display.as_str());
    }
    Line::from(vec![
        Span::styled(format!("{:>5} ", candidate.key), Style::default().fg(Color::DarkGray)),
        Span::raw(candidate.display.as_str()),
    ])
}

/// Render the picker: the candidate list above a one-line query box.
pub fn draw(f: &mut Frame, picker: &Picker<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let items: Vec<ListItem> = picker
        .filtered
        .iter()
        .map(|&i| ListItem::new(candidate_line(&picker.candidates[i])))
        .collect();

    let title = format!("{} ({}/{})", picker.prompt, picker.filtered.len(), picker.candidates.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(picker.highlighted().map(|_| picker.selected));
    f.render_stateful_widget(list, chunks[0], &mut state);

    let query = Paragraph::new(format!("> {}", picker.query)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Filter (Enter: choose, Esc: cancel)"),
    );
    f.render_widget(query, chunks[1]);
}

fn run_picker<B: Backend>(terminal: &mut Terminal<B>, picker: &mut Picker<'_>) -> io::Result<Outcome> {
    loop {
        terminal.draw(|f| draw(f, picker))?;
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(outcome) = picker.handle_key(key) {
                return Ok(outcome);
            }
        }
    }
}

/// Chooser that takes over the terminal for each prompt.
///
/// Draws on stderr so stdout stays free for command output.
#[derive(Default)]
pub struct TerminalChooser;

/// Run `body` between `enter` and `leave`.
///
/// Once `enter` succeeds, `leave` runs whatever `body` returns, and the body's
/// error wins over the one from `leave`.
pub(crate) fn bracket<T>(
    enter: impl FnOnce() -> io::Result<()>,
    body: impl FnOnce() -> io::Result<T>,
    leave: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    enter()?;
    let result = body();
    let left = leave();
    let value = result?;
    left?;
    Ok(value)
}

impl TerminalChooser {
    fn run(prompt: &str, candidates: &[Candidate]) -> io::Result<Outcome> {
        bracket(
            enable_raw_mode,
            || {
                bracket(
                    || {
                        let mut stderr = io::stderr();
                        execute!(stderr, EnterAlternateScreen)
                    },
                    || {
                        let mut terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;
                        let outcome = run_picker(&mut terminal, &mut Picker::new(prompt, candidates));
                        terminal.show_cursor()?;
                        outcome
                    },
                    || {
                        let mut stderr = io::stderr();
                        execute!(stderr, LeaveAlternateScreen)
                    },
                )
            },
            disable_raw_mode,
        )
    }
}

impl Chooser for TerminalChooser {
    fn choose(&mut self, prompt: &str, candidates: &[Candidate]) -> Option<usize> {
        match Self::run(prompt, candidates) {
            Ok(Outcome::Chosen(index)) => Some(index),
            Ok(Outcome::Cancelled) => None,
            Err(e) => {
                tracing::warn!("terminal chooser failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
