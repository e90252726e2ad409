//! Interactive konf picker.
//!
//! Drawn on stderr in the alternate screen so stdout stays free for the
//! shell wrapper. Typing narrows the list with a fuzzy match over context,
//! cluster and file; Enter picks the highlighted row; Esc or Ctrl-C aborts.

use std::io::{self, Stderr};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use konf_core::{KonfError, Metadata};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};

/// Runs the picker over `konfs` and returns the index of the chosen one.
pub fn pick(konfs: &[Metadata]) -> konf_core::Result<usize> {
    enable_raw_mode()?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let mut picker = Picker::new(konfs);
    let result = run_picker(&mut terminal, &mut picker);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_picker(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    picker: &mut Picker<'_>,
) -> konf_core::Result<usize> {
    loop {
        terminal.draw(|f| picker.render(f))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match picker.handle_key(key) {
                Some(Outcome::Selected(index)) => return Ok(index),
                Some(Outcome::Aborted) => return Err(KonfError::Aborted),
                None => {}
            }
        }
    }
}

/// Case-insensitive subsequence match. Whitespace in the query is ignored.
pub fn fuzzy_match(query: &str, candidate: &str) -> bool {
    let mut haystack = candidate.chars().flat_map(char::to_lowercase);
    query
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .all(|needle| haystack.any(|c| c == needle))
}

fn search_text(konf: &Metadata) -> String {
    format!("{} {} {}", konf.context, konf.cluster, konf.file.display())
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Selected(usize),
    Aborted,
}

struct Picker<'a> {
    konfs: &'a [Metadata],
    haystacks: Vec<String>,
    query: String,
    /// Indices into `konfs` that match `query`, in display order.
    visible: Vec<usize>,
    state: TableState,
}

impl<'a> Picker<'a> {
    fn new(konfs: &'a [Metadata]) -> Self {
        let mut picker = Self {
            konfs,
            haystacks: konfs.iter().map(search_text).collect(),
            query: String::new(),
            visible: Vec::new(),
            state: TableState::default(),
        };
        picker.refilter();
        picker
    }

    fn refilter(&mut self) {
        self.visible = self
            .haystacks
            .iter()
            .enumerate()
            .filter(|(_, text)| fuzzy_match(&self.query, text))
            .map(|(i, _)| i)
            .collect();
        self.state
            .select(if self.visible.is_empty() { None } else { Some(0) });
    }

    fn selected(&self) -> Option<usize> {
        self.state
            .selected()
            .and_then(|row| self.visible.get(row).copied())
    }

    fn select_next(&mut self) {
        if let Some(row) = self.state.selected() {
            if row + 1 < self.visible.len() {
                self.state.select(Some(row + 1));
            }
        }
    }

    fn select_previous(&mut self) {
        if let Some(row) = self.state.selected() {
            self.state.select(Some(row.saturating_sub(1)));
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Outcome> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Outcome::Aborted)
            }
            KeyCode::Esc => Some(Outcome::Aborted),
            KeyCode::Enter => self.selected().map(Outcome::Selected),
            KeyCode::Down => {
                self.select_next();
                None
            }
            KeyCode::Up => {
                self.select_previous();
                None
            }
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.refilter();
                }
                None
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.refilter();
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let [prompt_area, table_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(f.area());

        let prompt = Line::from(vec![
            Span::styled(
                "Select konf: ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(self.query.as_str()),
        ]);
        f.render_widget(Paragraph::new(prompt), prompt_area);

        let header = Row::new(["Context", "Cluster", "File"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = self.visible.iter().map(|&i| {
            let konf = &self.konfs[i];
            Row::new(vec![
                konf.context.clone(),
                konf.cluster.clone(),
                konf.file.display().to_string(),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(50),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::TOP))
        .row_highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .highlight_symbol("▸ ");
        f.render_stateful_widget(table, table_area, &mut self.state);

        let help = Line::from(Span::styled(
            format!(
                "{}/{}  up/down move  enter select  esc abort",
                self.visible.len(),
                self.konfs.len()
            ),
            Style::default().fg(Color::DarkGray),
        ));
        f.render_widget(Paragraph::new(help), help_area);
    }
}
