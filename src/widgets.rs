//! Clickable UI components.
//!
//! Each component renders and registers its own click targets, so the rows a
//! player taps always line up with what was drawn.
//!
//! - [`TabBar`]: one-row tab navigation.
//! - [`ClickableList`]: vertical list with per-row actions and scrolling.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// Tabs drawn as padded labels joined by a separator. Targets follow the
/// rendered label widths, so wide glyphs and counters in labels stay aligned.
///
/// ```ignore
/// TabBar::new("│")
///     .tab("Shop", active, TAB_SHOP)
///     .tab("Style", idle, TAB_COSMETICS)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Wrap the bar in a block. Targets are placed inside its borders.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let sep_width = Line::from(self.separator).width() as u16;
        let mut spans: Vec<Span> = Vec::new();
        let mut tab_widths: Vec<(u16, u16)> = Vec::new();

        for (i, (label, style, action_id)) in self.tabs.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
            }
            let padded = format!(" {label} ");
            tab_widths.push((Line::from(padded.as_str()).width() as u16, action_id));
            spans.push(Span::styled(padded, style));
        }

        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        let paragraph = match self.block {
            Some(block) => Paragraph::new(Line::from(spans)).block(block),
            None => Paragraph::new(Line::from(spans)),
        };
        f.render_widget(paragraph, area);

        // Inner x/width for accuracy, outer rows for tap tolerance.
        cs.register_tab_targets(
            &tab_widths,
            sep_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with optional actions. Targets are bound to line indices,
/// so inserting a line above a button moves its target with it.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Backgrounds"));
/// cl.push_clickable(Line::from("Aurora  1.0K"), BACKGROUND_BASE + 9);
/// cl.register_targets(area, &mut cs, 1, 1, scroll);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block).scroll((scroll, 0)), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a row target for every clickable line that is on screen.
    ///
    /// `top_offset` / `bottom_offset` are the border rows of `area`; `scroll`
    /// is the number of lines scrolled off the top. Lines are not wrapped.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        for &(line_idx, action_id) in &self.actions {
            if line_idx < scroll {
                continue;
            }
            let row = content_y + (line_idx - scroll);
            if row >= content_end {
                continue;
            }
            cs.add_row_target(area, row, action_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratzilla::ratatui::backend::TestBackend;
    use ratzilla::ratatui::widgets::Borders;
    use ratzilla::ratatui::Terminal;

    #[test]
    fn tab_bar_targets_follow_labels() {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        let mut cs = ClickState::new();
        terminal
            .draw(|f| {
                TabBar::new("│")
                    .tab("Shop", Style::default(), 10)
                    .tab("Stats", Style::default(), 14)
                    .block(Block::default().borders(Borders::ALL))
                    .render(f, f.area(), &mut cs);
            })
            .unwrap();

        // " Shop " is 6 wide starting at x=1, then "│", then " Stats "
        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(1, 1), Some(10));
        assert_eq!(cs.hit_test(6, 1), Some(10));
        assert_eq!(cs.hit_test(8, 1), Some(14));
        assert_eq!(cs.hit_test(38, 0), Some(14));
    }

    #[test]
    fn list_rows_skip_plain_lines() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Backgrounds"));
        cl.push_clickable(Line::from("Default"), 299);
        cl.push_clickable(Line::from("Classic Blue"), 200);
        cl.push(Line::from(""));

        assert_eq!(cl.len(), 4);

        let area = Rect::new(0, 5, 80, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 6), None);
        assert_eq!(cs.hit_test(10, 7), Some(299));
        assert_eq!(cs.hit_test(10, 8), Some(200));
        assert_eq!(cs.hit_test(10, 9), None);
    }

    #[test]
    fn list_scrolled_rows_move_up() {
        let mut cl = ClickableList::new();
        for i in 0..4u16 {
            cl.push_clickable(Line::from(format!("task {i}")), 400 + i);
        }

        let area = Rect::new(0, 10, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 1, 2);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 10), Some(402));
        assert_eq!(cs.hit_test(10, 11), Some(403));
        assert_eq!(cs.hit_test(10, 9), None);
    }

    #[test]
    fn list_clipped_by_bottom_border() {
        let mut cl = ClickableList::new();
        for i in 0..20u16 {
            cl.push_clickable(Line::from(format!("bg {i}")), 200 + i);
        }

        let area = Rect::new(0, 0, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(10, 3), Some(202));
        assert_eq!(cs.hit_test(10, 4), None);
    }

    #[test]
    fn empty_list_registers_nothing() {
        let cl: ClickableList = ClickableList::new();
        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 80, 10), &mut cs, 1, 1, 0);
        assert!(cs.targets.is_empty());
        assert!(cl.into_lines().is_empty());
    }
}
