//! Board event loop and rendering.
//!
//! One live session over the registry: a view switcher, the active view's
//! table, its summary panel and chart, and the form overlay for add/edit.
//! State lives for the session; nothing is persisted on quit.

use crate::registry::ViewRegistry;
use crate::screen::{FormResult, ViewContext, ViewModule};
use crate::tui::form_overlay::{FormOverlay, cycle_choice, render_form};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Row, Table, TableState, Tabs,
    },
};
use std::time::Duration;
use vero_core::{FieldKind, RecordId};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

enum Mode {
    Browse,
    Form(FormOverlay),
    ConfirmDelete { id: RecordId, label: String },
}

pub struct Board {
    registry: ViewRegistry,
    ctx: ViewContext,
    active: String,
    table_state: TableState,
    mode: Mode,
    status: Option<String>,
    quit: bool,
}

/// Run the board until the user quits.
pub fn run(registry: ViewRegistry, ctx: ViewContext, start: &str) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = Board::new(registry, ctx, start).run_loop(&mut terminal);
    ratatui::restore();
    result
}

impl Board {
    fn new(registry: ViewRegistry, ctx: ViewContext, start: &str) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self {
            registry,
            ctx,
            active: start.to_string(),
            table_state,
            mode: Mode::Browse,
            status: None,
            quit: false,
        }
    }

    fn run_loop(mut self, terminal: &mut ratatui::DefaultTerminal) -> Result<()> {
        while !self.quit {
            terminal.draw(|frame| self.render(frame))?;
            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Input handling
    // -----------------------------------------------------------------------

    fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Form(_) => self.handle_form_key(key),
            Mode::ConfirmDelete { .. } => self.handle_confirm_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Char('v') => self.cycle_view(1),
            KeyCode::BackTab | KeyCode::Char('V') => self.cycle_view(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Char('a') => {
                if let Some(view) = self.registry.get_mut(&self.active) {
                    view.form_begin_create();
                    self.mode = Mode::Form(FormOverlay::default());
                    self.status = None;
                }
            }
            KeyCode::Char('e') => {
                let Some(id) = self.selected_id() else { return };
                if let Some(view) = self.registry.get_mut(&self.active) {
                    if view.form_begin_edit(id) {
                        self.mode = Mode::Form(FormOverlay::default());
                        self.status = None;
                    }
                }
            }
            KeyCode::Char('d') => {
                let Some(id) = self.selected_id() else { return };
                let label = self
                    .registry
                    .get(&self.active)
                    .and_then(|view| view.record_label(id))
                    .unwrap_or_default();
                self.mode = Mode::ConfirmDelete { id, label };
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(view) = self.registry.get_mut(&self.active) else {
            return;
        };
        let Mode::Form(overlay) = &mut self.mode else {
            return;
        };
        let specs = view.field_specs();
        let Some(spec) = specs.get(overlay.field_idx) else {
            return;
        };

        let mut close_with: Option<Option<String>> = None;
        match key.code {
            KeyCode::Esc => {
                view.form_cancel();
                close_with = Some(None);
            }
            KeyCode::Tab | KeyCode::Down => overlay.next_field(specs.len()),
            KeyCode::BackTab | KeyCode::Up => overlay.prev_field(specs.len()),
            KeyCode::Left | KeyCode::Right => {
                if let FieldKind::Choice(tokens) = spec.kind {
                    let step = if key.code == KeyCode::Left { -1 } else { 1 };
                    let current = view.form_field(spec.name).unwrap_or_default();
                    let next = cycle_choice(&current, tokens, step);
                    let _ = view.form_set_field(spec.name, next);
                }
            }
            KeyCode::Backspace => {
                let mut current = view.form_field(spec.name).unwrap_or_default();
                current.pop();
                let _ = view.form_set_field(spec.name, &current);
            }
            KeyCode::Char(c) => {
                if !matches!(spec.kind, FieldKind::Choice(_)) {
                    let mut current = view.form_field(spec.name).unwrap_or_default();
                    current.push(c);
                    let _ = view.form_set_field(spec.name, &current);
                }
            }
            KeyCode::Enter => match view.form_submit() {
                FormResult::Created(id) => {
                    close_with = Some(Some(format!("created record {id}")));
                }
                FormResult::Updated(id) => {
                    close_with = Some(Some(format!("updated record {id}")));
                }
                FormResult::Missing(id) => {
                    close_with = Some(Some(format!("record {id} is gone; nothing changed")));
                }
                FormResult::Rejected | FormResult::Idle => {} // stay open; errors render inline
            },
            _ => {}
        }

        if let Some(status) = close_with {
            self.mode = Mode::Browse;
            self.status = status;
            self.clamp_selection();
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let Mode::ConfirmDelete { id, .. } = &self.mode else {
            return;
        };
        let id = *id;
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let removed = self
                    .registry
                    .get_mut(&self.active)
                    .is_some_and(|view| view.delete(id));
                self.status = Some(if removed {
                    format!("deleted record {id}")
                } else {
                    format!("record {id} was already gone")
                });
                self.mode = Mode::Browse;
                self.clamp_selection();
            }
            KeyCode::Char('n') | KeyCode::Esc => self.mode = Mode::Browse,
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Selection and view switching
    // -----------------------------------------------------------------------

    fn view_len(&self) -> usize {
        self.registry.get(&self.active).map_or(0, ViewModule::len)
    }

    fn selected_id(&self) -> Option<RecordId> {
        let view = self.registry.get(&self.active)?;
        let at = self.table_state.selected()?;
        view.row_ids().get(at).copied()
    }

    fn move_selection(&mut self, step: isize) {
        let len = self.view_len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let at = self.table_state.selected().unwrap_or(0);
        let next = at.saturating_add_signed(step).min(len - 1);
        self.table_state.select(Some(next));
    }

    fn clamp_selection(&mut self) {
        let len = self.view_len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            let at = self.table_state.selected().unwrap_or(0).min(len - 1);
            self.table_state.select(Some(at));
        }
    }

    fn cycle_view(&mut self, step: isize) {
        let keys = self.registry.keys();
        if keys.is_empty() {
            return;
        }
        let len = keys.len();
        let at = keys
            .iter()
            .position(|k| *k == self.active)
            .unwrap_or(0);
        let next = (at + len).wrapping_add_signed(step) % len;
        self.active = keys[next].to_string();
        self.table_state.select(Some(0));
        self.status = None;
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    fn render(&mut self, frame: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_tabs(frame, chunks[0]);

        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(chunks[1]);
        self.render_table(frame, main[0]);
        self.render_side_panel(frame, main[1]);

        self.render_footer(frame, chunks[2]);

        match &self.mode {
            Mode::Form(overlay) => {
                if let Some(view) = self.registry.get(&self.active) {
                    render_form(frame, view, overlay, frame.area());
                }
            }
            Mode::ConfirmDelete { id, label } => {
                render_confirm(frame, *id, label, frame.area());
            }
            Mode::Browse => {}
        }
    }

    fn render_tabs(&self, frame: &mut Frame<'_>, area: Rect) {
        let keys = self.registry.keys();
        let selected = keys.iter().position(|k| *k == self.active).unwrap_or(0);
        let tabs = Tabs::new(keys.iter().map(ToString::to_string).collect::<Vec<_>>())
            .select(selected)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn render_table(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let Some(view) = self.registry.get(&self.active) else {
            return;
        };
        let widths: Vec<Constraint> = view
            .column_widths()
            .into_iter()
            .map(|w| Constraint::Min(w + 2))
            .collect();
        let header = Row::new(view.headers())
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = view.rows().into_iter().map(Row::new);
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(view.title()))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_side_panel(&self, frame: &mut Frame<'_>, area: Rect) {
        let Some(view) = self.registry.get(&self.active) else {
            return;
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(10)])
            .split(area);

        let summary = view.summary(&self.ctx);
        let mut lines = vec![Line::from(format!("Records: {}", summary.total))];
        for group in &summary.groups {
            let mean = group
                .mean
                .map_or(String::new(), |m| format!("  mean {m:.1}"));
            lines.push(Line::from(format!(
                "{:<13} {:>3}  {:>5.1}%{mean}",
                group.key, group.count, group.share_pct
            )));
        }
        if !summary.flagged.is_empty() {
            lines.push(Line::default());
            for flag in &summary.flagged {
                lines.push(Line::from(Span::styled(
                    format!("{}: {}", flag.health, flag.label),
                    Style::default().fg(Color::Red),
                )));
            }
        }
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Summary")),
            chunks[0],
        );

        let series = view.chart_series(&self.ctx);
        let bars: Vec<Bar<'_>> = series
            .iter()
            .map(|(label, value)| {
                Bar::default()
                    .label(Line::from(label.clone()))
                    .value(*value)
            })
            .collect();
        let chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Breakdown"))
            .bar_width(9)
            .bar_gap(1)
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(chart, chunks[1]);
    }

    fn render_footer(&self, frame: &mut Frame<'_>, area: Rect) {
        let text = match (&self.mode, &self.status) {
            (Mode::Browse, Some(status)) => status.clone(),
            (Mode::Browse, None) => {
                "q quit   tab view   j/k move   a add   e edit   d delete".to_string()
            }
            (Mode::Form(_), _) => "editing — Enter save, Esc cancel".to_string(),
            (Mode::ConfirmDelete { .. }, _) => "confirm delete — y/n".to_string(),
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray))),
            area,
        );
    }
}

fn render_confirm(frame: &mut Frame<'_>, id: RecordId, label: &str, area: Rect) {
    let width = 46_u16.min(area.width);
    let height = 4_u16.min(area.height);
    let modal = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, modal);
    let body = vec![
        Line::from(format!("Delete '{label}' ({id})?")),
        Line::from(Span::styled(
            "y delete   n keep",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(body).block(Block::default().borders(Borders::ALL).title(" Confirm ")),
        modal,
    );
}
