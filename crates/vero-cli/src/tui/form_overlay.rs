//! Add/edit form overlay.
//!
//! The overlay owns only the cursor position; the draft and its errors
//! live in the view's form. Rendering reads the draft back field by field,
//! so the overlay works unchanged for every registered view.

use crate::screen::ViewModule;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use vero_core::{EditTarget, FieldKind};

/// Cursor state for the form overlay.
#[derive(Debug, Default)]
pub struct FormOverlay {
    pub field_idx: usize,
}

impl FormOverlay {
    pub fn next_field(&mut self, field_count: usize) {
        if field_count > 0 {
            self.field_idx = (self.field_idx + 1) % field_count;
        }
    }

    pub fn prev_field(&mut self, field_count: usize) {
        if field_count > 0 {
            self.field_idx = (self.field_idx + field_count - 1) % field_count;
        }
    }
}

/// Step a choice field to the previous/next token in its vocabulary.
pub fn cycle_choice(current: &str, tokens: &[&'static str], step: isize) -> &'static str {
    if tokens.is_empty() {
        return "";
    }
    let len = tokens.len();
    let at = tokens
        .iter()
        .position(|t| *t == current)
        .map_or(0, |at| (at + len).wrapping_add_signed(step) % len);
    tokens[at]
}

/// Centered overlay rectangle, clamped to the parent area.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

pub fn render_form(frame: &mut Frame<'_>, view: &dyn ViewModule, overlay: &FormOverlay, area: Rect) {
    let specs = view.field_specs();
    let errors = view.form_errors();

    let title = match view.form_target() {
        Some(EditTarget::Existing(_)) => format!(" Edit {} record ", view.key()),
        _ => format!(" New {} record ", view.key()),
    };

    let mut lines: Vec<Line<'_>> = Vec::new();
    for (at, spec) in specs.iter().enumerate() {
        let value = view.form_field(spec.name).unwrap_or_default();
        let selected = at == overlay.field_idx;
        let marker = if selected { "> " } else { "  " };
        let value_span = match spec.kind {
            FieldKind::Choice(_) if selected => Span::styled(
                format!("< {value} >"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            _ if selected => Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
            _ => Span::raw(value),
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(
                format!("{:<20}", spec.label),
                Style::default().fg(Color::Cyan),
            ),
            value_span,
        ]));
        if let Some(message) = errors.get(spec.name) {
            lines.push(Line::from(Span::styled(
                format!("    {message}"),
                Style::default().fg(Color::Red),
            )));
        }
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Enter save   Esc cancel   Tab next   \u{2190}\u{2192} cycle choice",
        Style::default().fg(Color::DarkGray),
    )));

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let modal = centered(area, 56, height);
    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title)),
        modal,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKENS: &[&str] = &["open", "in-review", "closed"];

    #[test]
    fn cycle_choice_wraps_both_ways() {
        assert_eq!(cycle_choice("open", TOKENS, 1), "in-review");
        assert_eq!(cycle_choice("closed", TOKENS, 1), "open");
        assert_eq!(cycle_choice("open", TOKENS, -1), "closed");
    }

    #[test]
    fn cycle_choice_starts_from_the_first_token_on_unset_fields() {
        assert_eq!(cycle_choice("", TOKENS, 1), "open");
    }

    #[test]
    fn field_cursor_wraps() {
        let mut overlay = FormOverlay::default();
        overlay.prev_field(4);
        assert_eq!(overlay.field_idx, 3);
        overlay.next_field(4);
        assert_eq!(overlay.field_idx, 0);
    }
}
