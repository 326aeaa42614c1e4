mod games;
mod input;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use games::{create_game, AppState, GameChoice, SessionClock};
use input::{is_narrow_layout, pixel_to_cell, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::{Frame, Terminal};
use ratzilla::{DomBackend, WebRenderer};
use time::FrameClock;
use tracing::{debug, info};
use widgets::ClickableList;

/// Action id every game may register to return to the version menu.
pub const BACK_TO_MENU: u16 = u16::MAX;

/// Menu rows use `MENU_BASE + index` into `GameChoice::all()`.
const MENU_BASE: u16 = 1;

/// Forwards formatted tracing lines to the browser console.
struct ConsoleWriter;

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let line = String::from_utf8_lossy(buf);
        web_sys::console::log_1(&line.trim_end().into());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .without_time()
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .with_writer(|| ConsoleWriter)
        .init();
}

fn session_clock() -> SessionClock {
    let now = js_sys::Date::now();
    // getTimezoneOffset is minutes west of UTC.
    let offset_west = js_sys::Date::new_0().get_timezone_offset();
    SessionClock {
        now_ms: now.max(0.0) as u64,
        utc_offset_minutes: -(offset_west as i32),
        seed: now.to_bits(),
    }
}

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Convert a mouse position to a grid cell using the grid container's rect.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_to_cell(f64::from(mouse_x) - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_to_cell(f64::from(mouse_y) - rect.top(), rect.height(), cs.terminal_rows)?;

    debug!(col, row, targets = cs.targets.len(), "click");
    Some((col, row))
}

fn start_game(app: &mut AppState, choice: GameChoice) {
    info!(version = ?choice.version(), "starting game");
    *app = AppState::Playing {
        game: create_game(choice, session_clock()),
    };
}

/// Route one input event. Events a game leaves unconsumed that mean "back"
/// return to the menu.
fn dispatch(app: &mut AppState, event: InputEvent) {
    match app {
        AppState::Menu => {
            let choice = match event {
                InputEvent::Key(c) => GameChoice::from_key(c),
                InputEvent::Click(id) => id
                    .checked_sub(MENU_BASE)
                    .and_then(|i| GameChoice::all().get(usize::from(i)).copied()),
            };
            if let Some(choice) = choice {
                start_game(app, choice);
            }
        }
        AppState::Playing { game } => {
            if game.handle_input(&event) {
                return;
            }
            if matches!(event, InputEvent::Click(BACK_TO_MENU) | InputEvent::Key('\u{1b}')) {
                *app = AppState::Menu;
            }
        }
    }
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    init_logging();

    let app = Rc::new(RefCell::new(AppState::Menu));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let action = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                .and_then(|(col, row)| cs.hit_test(col, row));
            drop(cs);

            if let Some(id) = action {
                dispatch(&mut app.borrow_mut(), InputEvent::Click(id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let app = app.clone();
        move |key_event| {
            let key = match key_event.code {
                KeyCode::Char(c) => c,
                KeyCode::Enter => '\n',
                KeyCode::Esc => '\u{1b}',
                KeyCode::Backspace => '\u{8}',
                _ => return,
            };
            dispatch(&mut app.borrow_mut(), InputEvent::Key(key));
        }
    });

    let clock = RefCell::new(FrameClock::new());
    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            let mut app = app.borrow_mut();
            match &mut *app {
                AppState::Menu => {
                    clock.borrow_mut().reset();
                    render_menu(f, size, &click_state);
                }
                AppState::Playing { game } => {
                    let ms = clock.borrow_mut().update(performance_now());
                    game.tick(ms);
                    game.render(f, size, &click_state);
                }
            }
        }
    });

    Ok(())
}

fn render_menu(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let borders = if is_narrow_layout(area.width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6)])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "✦ Beyond Rare ✦",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(borders)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        " Pick a version (saves are kept per version)",
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(""));
    for (i, choice) in GameChoice::all().iter().enumerate() {
        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!(" [{}] ", choice.key()),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    choice.version().name(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]),
            MENU_BASE + i as u16,
        );
        cl.push(Line::from(Span::styled(
            format!("     {}", choice.blurb()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let area = chunks[1];
    cl.register_targets(area, &mut click_state.borrow_mut(), 1, 1, 0);
    let menu = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(borders)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Menu "),
    );
    f.render_widget(menu, area);
}
