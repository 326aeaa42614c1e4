//! Shared input handling: click targets, hit testing, and pixel-to-cell
//! conversion for the DOM grid.
//!
//! Game-agnostic. Each game maps action ids to its own intents.

use ratzilla::ratatui::layout::Rect;

/// Keyboard, mouse and touch input, normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key press. Enter, Esc and Backspace arrive as `'\n'`, `'\u{1b}'`
    /// and `'\u{8}'`.
    Key(char),
    /// A tap on a registered target, identified by a semantic action id.
    Click(u16),
}

/// A tappable region in terminal cell coordinates.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared between the render loop (which registers targets every frame)
/// and the mouse handler (which hit-tests them).
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Full-width target for one row of `area`. Rows outside the area are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Targets for a horizontal tab bar.
    ///
    /// `tab_widths` holds `(display_width, action_id)` per padded label.
    /// Each target covers its label plus half of each neighbouring separator;
    /// the first and last tabs extend to the edges of the bar.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        let n = tab_widths.len();
        if n == 0 || total_width == 0 {
            return;
        }

        let mut starts: Vec<u16> = Vec::with_capacity(n);
        let mut cursor: u16 = 0;
        for (i, &(w, _)) in tab_widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            starts.push(cursor);
            cursor += w;
        }

        for (i, &(width, action_id)) in tab_widths.iter().enumerate() {
            let left = if i == 0 {
                0
            } else {
                let prev_end = starts[i - 1] + tab_widths[i - 1].0;
                prev_end + (starts[i] - prev_end) / 2
            };
            let right = if i == n - 1 {
                total_width
            } else {
                let end = starts[i] + width;
                end + (starts[i + 1] - end) / 2
            };

            let w = right.saturating_sub(left);
            if w > 0 {
                self.add_click_target(Rect::new(x + left, y, w, height), action_id);
            }
        }
    }

    /// Action id at a cell. Later targets win where they overlap.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Phones and narrow windows drop side borders.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Map a pixel offset along one axis to a cell index.
///
/// `offset` is relative to the grid's edge, `extent` is the grid's pixel
/// size along that axis and `cells` the number of cells. `None` outside the grid.
pub fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / f64::from(cells))) as u16;
    (cell < cells).then_some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_rows() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 10, 80, 1), 1);
        cs.add_click_target(Rect::new(0, 11, 80, 1), 2);

        assert_eq!(cs.hit_test(5, 10), Some(1));
        assert_eq!(cs.hit_test(5, 11), Some(2));
        assert_eq!(cs.hit_test(5, 12), None);
    }

    #[test]
    fn hit_test_columns() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 10, 1), 1);
        cs.add_click_target(Rect::new(10, 5, 10, 1), 2);

        assert_eq!(cs.hit_test(9, 5), Some(1));
        assert_eq!(cs.hit_test(10, 5), Some(2));
        assert_eq!(cs.hit_test(20, 5), None);
    }

    #[test]
    fn later_target_wins() {
        let mut cs = ClickState::new();
        // Scrollable list row, then the border scroll target over it
        cs.add_click_target(Rect::new(0, 5, 80, 1), 100);
        cs.add_click_target(Rect::new(68, 5, 12, 1), 500);

        assert_eq!(cs.hit_test(70, 5), Some(500));
        assert_eq!(cs.hit_test(0, 5), Some(100));
    }

    #[test]
    fn row_target_clipped_to_area() {
        let mut cs = ClickState::new();
        let area = Rect::new(5, 10, 30, 5);
        cs.add_row_target(area, 9, 1);
        cs.add_row_target(area, 15, 2);
        assert!(cs.targets.is_empty());

        cs.add_row_target(area, 12, 3);
        assert_eq!(cs.hit_test(15, 12), Some(3));
        assert_eq!(cs.hit_test(4, 12), None);
    }

    #[test]
    fn clear_removes_everything() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 1, 80, 1), 1);
        cs.clear_targets();
        assert_eq!(cs.hit_test(0, 1), None);
    }

    #[test]
    fn narrow_threshold() {
        assert!(is_narrow_layout(37));
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_conversion() {
        assert_eq!(pixel_to_cell(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_to_cell(14.9, 450.0, 30), Some(0));
        assert_eq!(pixel_to_cell(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_to_cell(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_to_cell(450.0, 450.0, 30), None);
        assert_eq!(pixel_to_cell(-1.0, 450.0, 30), None);
        assert_eq!(pixel_to_cell(10.0, 0.0, 30), None);
        assert_eq!(pixel_to_cell(10.0, 450.0, 0), None);
    }

    #[test]
    fn cell_centres_map_back() {
        let rows: u16 = 50;
        let cell = 15.0;
        for row in 0..rows {
            let y = f64::from(row) * cell + cell / 2.0;
            assert_eq!(pixel_to_cell(y, f64::from(rows) * cell, rows), Some(row));
        }
    }

    #[test]
    fn tab_targets_split_separators() {
        // " Shop " (6) │ " Style " (7) │ " Daily " (7), separator 1 col
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[(6, 10), (7, 11), (7, 12)], 1, 1, 4, 58, 3);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(1, 4), Some(10));
        assert_eq!(cs.hit_test(6, 4), Some(10));
        assert_eq!(cs.hit_test(7, 5), Some(11));
        assert_eq!(cs.hit_test(15, 6), Some(12));
        assert_eq!(cs.hit_test(58, 4), Some(12));
        assert_eq!(cs.hit_test(0, 4), None);
    }

    #[test]
    fn tab_targets_empty() {
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[], 1, 0, 0, 80, 1);
        assert!(cs.targets.is_empty());
    }

    #[test]
    fn tap_pipeline_on_phone_grid() {
        let mut cs = ClickState::new();
        cs.terminal_cols = 37;
        cs.terminal_rows = 50;
        cs.add_click_target(Rect::new(0, 4, 37, 1), 0);
        cs.add_click_target(Rect::new(0, 20, 37, 1), 101);

        let grid_h = 750.0;
        let row = pixel_to_cell(4.0 * 15.0 + 3.0, grid_h, cs.terminal_rows).unwrap();
        let col = pixel_to_cell(100.0, 370.0, cs.terminal_cols).unwrap();
        assert_eq!(cs.hit_test(col, row), Some(0));

        let row = pixel_to_cell(20.0 * 15.0 + 14.0, grid_h, cs.terminal_rows).unwrap();
        assert_eq!(cs.hit_test(col, row), Some(101));
    }
}
