//! Beyond Rare rendering (read-only from the game).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::config::GameVersion;
use super::leaderboard::ConnectionStatus;
use super::progression::stage_points_threshold;
use super::shop::{self, CosmeticDef, CosmeticKind, ShopItem};
use super::state::{format_number, format_percent, DEFAULT_COSMETIC};
use super::table::{base_table, table_for};
use super::{achievements, RarityGame, Tab};

const PALETTE: &[Color] = &[
    Color::Blue,
    Color::Green,
    Color::Red,
    Color::Yellow,
    Color::Magenta,
    Color::LightBlue,
    Color::LightGreen,
    Color::LightRed,
    Color::LightMagenta,
    Color::LightCyan,
];

pub fn render(game: &RarityGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let borders = if is_narrow_layout(area.width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };

    // Log on the right when wide enough, below otherwise.
    let (main_area, log_area) = if area.width >= 80 {
        let h = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h[0], h[1])
    } else {
        let v = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(16), Constraint::Length(6)])
            .split(area);
        (v[0], v[1])
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(7), // draw button + status
            Constraint::Length(3), // tabs
            Constraint::Min(5),    // tab content
        ])
        .split(main_area);

    render_header(game, f, chunks[0], borders, click_state);
    render_draw_panel(game, f, chunks[1], borders, click_state);
    render_tab_bar(game, f, chunks[2], borders, click_state);

    if game.confirm_reset {
        render_reset_confirm(f, chunks[3], borders, click_state);
    } else {
        let cl = match game.tab {
            Tab::Shop => shop_list(game),
            Tab::Cosmetics => cosmetics_list(game),
            Tab::Tasks => tasks_list(game),
            Tab::Achievements => achievements_list(game),
            Tab::Stats => stats_list(game),
        };
        let title = match game.tab {
            Tab::Shop => " Shop [1-6] ".to_string(),
            Tab::Tasks => format!(" Daily {} ", game.today()),
            other => format!(" {} ▲▼ ", other.name()),
        };
        render_scrolling(game, cl, title, f, chunks[3], borders, click_state);
    }

    render_log(game, f, log_area, borders);
}

// ── Colors ─────────────────────────────────────────────────────

fn rarity_color(points: u64) -> Color {
    match points {
        0 => Color::DarkGray,
        1..=4 => Color::White,
        5..=49 => Color::Green,
        50..=249 => Color::Cyan,
        250..=999 => Color::Magenta,
        1_000..=99_999 => Color::Yellow,
        _ => Color::LightRed,
    }
}

fn background_color(game: &RarityGame) -> Color {
    shop::backgrounds(game.config.version)
        .iter()
        .position(|b| b.id == game.state.active_background)
        .map(|i| PALETTE[i % PALETTE.len()])
        .unwrap_or(Color::Cyan)
}

fn skin_color(id: &str) -> Color {
    match id {
        "ocean" => Color::Blue,
        "forest" => Color::Green,
        "sunset" => Color::LightRed,
        "amethyst" => Color::Magenta,
        "gold" => Color::Yellow,
        "diamond" => Color::LightCyan,
        "rainbow" => Color::LightMagenta,
        "cosmic" => Color::LightBlue,
        "divine" => Color::White,
        _ => Color::Cyan,
    }
}

// ── Header ─────────────────────────────────────────────────────

fn render_header(
    game: &RarityGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let s = &game.state;
    let stage = match game.config.version {
        GameVersion::Staged => format!("Stage {}", s.stage),
        GameVersion::Classic => format!("Run {}", s.prestige_count + 1),
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" ◆ {} pts ", game.points_display()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {stage} "), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!(" {} ", format_percent(game.completion())),
            Style::default().fg(Color::Green),
        ),
    ]);
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(background_color(game)))
        .title(Span::styled(
            format!(" {} ", game.config.version.name()),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(" [Esc] Menu ").right_aligned());
    f.render_widget(Paragraph::new(line).block(block), area);

    // Bottom-right corner holds the back hint.
    let hint_w = 12.min(area.width);
    let mut cs = click_state.borrow_mut();
    cs.add_click_target(
        Rect::new(area.x + area.width - hint_w, area.y + area.height.saturating_sub(1), hint_w, 1),
        crate::BACK_TO_MENU,
    );
}

// ── Draw panel ─────────────────────────────────────────────────

fn render_draw_panel(
    game: &RarityGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let s = &game.state;
    let button_color = skin_color(&s.active_skin);
    let mut cl = ClickableList::new();

    cl.push_clickable(
        Line::from(vec![
            Span::styled(
                "  [C] ✦ DRAW ✦  ",
                Style::default()
                    .fg(Color::Black)
                    .bg(button_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} clicks", format_number(s.total_clicks)),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        CLICK_BUTTON,
    );

    cl.push(match &game.last_draw {
        Some(d) => {
            let mut spans = vec![
                Span::raw(" → "),
                Span::styled(
                    d.name,
                    Style::default()
                        .fg(rarity_color(d.points))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" +{}", format_number(d.points)),
                    Style::default().fg(Color::Yellow),
                ),
            ];
            if d.is_new {
                spans.push(Span::styled(
                    " NEW!",
                    Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled(
            " Draw to discover a rarity",
            Style::default().fg(Color::DarkGray),
        )),
    });

    let effects = game.effect_status();
    cl.push(if effects.is_empty() {
        Line::from(Span::styled(" No active effects", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(Span::styled(
            format!(" ⚡ {}", effects.join(" · ")),
            Style::default().fg(Color::LightCyan),
        ))
    });

    let auto = match (s.auto_clicker_count, game.auto_period_ms()) {
        (0, _) => " No auto clickers".to_string(),
        (n, Some(ms)) => format!(" Auto ×{n} every {:.1}s", ms as f64 / 1000.0),
        (n, None) => format!(" Auto ×{n} frozen"),
    };
    cl.push(Line::from(Span::styled(auto, Style::default().fg(Color::Gray))));

    if game.can_advance() {
        let label = match game.config.version {
            GameVersion::Staged => format!(" [A] Advance to Stage {} ", s.stage + 1),
            GameVersion::Classic => " [A] Upstage (prices ×1.5) ".to_string(),
        };
        cl.push_clickable(
            Line::from(Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            )),
            ADVANCE_STAGE,
        );
    } else {
        cl.push(Line::from(Span::styled(
            progress_text(game),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(button_color));
    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn progress_text(game: &RarityGame) -> String {
    let s = &game.state;
    let table = base_table(game.config.version, s.stage);
    let found = table.discovered_count(&s.discovered);
    match game.config.version {
        GameVersion::Staged => {
            let goal = stage_points_threshold(s.stage, game.config.progression.stage_points_base);
            format!(
                " Next stage: {found}/{} found or {}/{} pts",
                table.len(),
                format_number(s.points),
                format_number(goal)
            )
        }
        GameVersion::Classic => format!(
            " Upstage: find every rarity through {}",
            game.config.progression.upstage_through
        ),
    }
}

// ── Tabs ───────────────────────────────────────────────────────

fn render_tab_bar(
    game: &RarityGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut bar = TabBar::new("│");
    for tab in Tab::all() {
        let style = if *tab == game.tab {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        bar = bar.tab(tab.name(), style, tab.action_id());
    }
    let claimable = game
        .state
        .daily
        .as_ref()
        .map_or(0, |d| d.tasks.iter().filter(|t| t.is_claimable()).count());
    let mut block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray));
    if claimable > 0 {
        block = block.title(Span::styled(
            format!(" {claimable} to claim "),
            Style::default().fg(Color::Green),
        ));
    }
    let mut cs = click_state.borrow_mut();
    bar.block(block).render(f, area, &mut cs);
}

/// Render a tab list with scrolling. Tapping the top or bottom border scrolls.
fn render_scrolling(
    game: &RarityGame,
    cl: ClickableList<'static>,
    title: String,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let visible = area.height.saturating_sub(2) as usize;
    let max_scroll = cl.len().saturating_sub(visible) as u16;
    let scroll = game.scroll.min(max_scroll);

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(background_color(game)))
        .title(title);

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, scroll);
    if area.height >= 3 {
        cs.add_row_target(area, area.y, SCROLL_UP);
        cs.add_row_target(area, area.y + area.height - 1, SCROLL_DOWN);
    }
    drop(cs);

    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block).scroll((scroll, 0)),
        area,
    );
}

fn key_span(label: String, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(label, style)
}

fn shop_list(game: &RarityGame) -> ClickableList<'static> {
    let s = &game.state;
    let mut cl = ClickableList::new();
    for (i, item) in ShopItem::consumable_kinds().iter().enumerate() {
        let price = shop::price(item, s, &game.config);
        let at_cap = *item == ShopItem::AutoClicker
            && s.auto_clicker_count >= game.config.economy.max_auto_clickers;
        let affordable = !at_cap && price.is_some_and(|p| s.points >= p);

        let detail = match item {
            ShopItem::AutoClicker => format!(
                "{}/{}",
                s.auto_clicker_count, game.config.economy.max_auto_clickers
            ),
            ShopItem::Effect(kind) => {
                let on = if s.effects.is_active(*kind) { " ●" } else { "" };
                format!("{}{on}", kind.description())
            }
            _ => String::new(),
        };
        let text_style = if affordable {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        cl.push_clickable(
            Line::from(vec![
                key_span(format!(" [{}] ", i + 1), affordable),
                Span::styled(format!("{:<14}", item.name()), text_style),
                Span::styled(
                    format!("{:>7} ", game.price_display(item)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(detail, Style::default().fg(Color::Gray)),
            ]),
            BUY_ITEM_BASE + i as u16,
        );
    }
    cl
}

fn cosmetic_line(game: &RarityGame, def: &CosmeticDef, owned: bool, active: bool) -> Line<'static> {
    let status = if active {
        Span::styled("● equipped", Style::default().fg(Color::Green))
    } else if owned {
        Span::styled("owned", Style::default().fg(Color::Cyan))
    } else if !shop::on_sale(def, game.today()) {
        Span::styled("🕘 out of season", Style::default().fg(Color::DarkGray))
    } else if shop::is_unlocked(def, &game.state, &game.config) {
        let item = match def.kind {
            CosmeticKind::Background => ShopItem::Background(def.id.to_string()),
            CosmeticKind::Skin => ShopItem::Skin(def.id.to_string()),
        };
        Span::styled(game.price_display(&item), Style::default().fg(Color::Yellow))
    } else {
        let need = match def.required_rarity {
            Some(rarity) => format!("🔒 find {rarity}"),
            None => format!("🔒 stage {}", def.required_stage),
        };
        Span::styled(need, Style::default().fg(Color::DarkGray))
    };
    let name_style = if owned || active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(vec![
        Span::styled(format!("  {:<22}", def.name), name_style),
        status,
    ])
}

fn default_line(active: bool) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<22}", "Default"), Style::default().fg(Color::White)),
        if active {
            Span::styled("● equipped", Style::default().fg(Color::Green))
        } else {
            Span::styled("free", Style::default().fg(Color::Cyan))
        },
    ])
}

fn cosmetics_list(game: &RarityGame) -> ClickableList<'static> {
    let s = &game.state;
    let version = game.config.version;
    let heading = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
    let mut cl = ClickableList::new();

    cl.push(Line::from(Span::styled(" Backgrounds", heading)));
    cl.push_clickable(default_line(s.active_background == DEFAULT_COSMETIC), BACKGROUND_DEFAULT);
    let mut seasonal_heading = false;
    for (i, def) in shop::backgrounds(version).iter().enumerate() {
        if def.is_seasonal() && !seasonal_heading {
            seasonal_heading = true;
            cl.push(Line::from(Span::styled(" Seasonal (limited time)", heading)));
        }
        let line = cosmetic_line(
            game,
            def,
            s.owns_background(def.id),
            s.active_background == def.id,
        );
        cl.push_clickable(line, BACKGROUND_BASE + i as u16);
    }

    let skins = shop::skins(version);
    if !skins.is_empty() {
        cl.push(Line::from(""));
        cl.push(Line::from(Span::styled(" Button skins", heading)));
        cl.push_clickable(default_line(s.active_skin == DEFAULT_COSMETIC), SKIN_DEFAULT);
        for (i, def) in skins.iter().enumerate() {
            let line = cosmetic_line(game, def, s.owns_skin(def.id), s.active_skin == def.id);
            cl.push_clickable(line, SKIN_BASE + i as u16);
        }
    }
    cl
}

fn tasks_list(game: &RarityGame) -> ClickableList<'static> {
    let s = &game.state;
    let today = game.today();
    let mut cl = ClickableList::new();

    if s.streak.claimed_on(today) {
        cl.push(Line::from(Span::styled(
            format!(" Streak: day {} (claimed today)", s.streak.count),
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        cl.push_clickable(
            Line::from(vec![
                key_span(" [S] ".into(), true),
                Span::styled("Claim daily streak", Style::default().fg(Color::White)),
                Span::styled(
                    format!("  current {}", s.streak.count),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            CLAIM_STREAK,
        );
    }
    cl.push(Line::from(""));

    let Some(daily) = s.daily.as_ref() else {
        return cl;
    };
    for (i, task) in daily.tasks.iter().enumerate() {
        let (status, style) = if task.claimed {
            ("✓ done".to_string(), Style::default().fg(Color::DarkGray))
        } else if task.completed {
            ("CLAIM!".to_string(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            (
                format!("{}/{}", format_number(task.progress), format_number(task.target)),
                Style::default().fg(Color::Gray),
            )
        };
        cl.push_clickable(
            Line::from(vec![
                key_span(format!(" [{}] ", i + 1), task.is_claimable()),
                Span::styled(format!("{:<22}", task.name), Style::default().fg(Color::White)),
                Span::styled(
                    format!("+{:<6}", format_number(task.reward)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(status, style),
            ]),
            CLAIM_TASK_BASE + i as u16,
        );
    }
    cl
}

fn achievements_list(game: &RarityGame) -> ClickableList<'static> {
    let catalog = achievements::catalog(game.config.version);
    let unlocked = catalog
        .iter()
        .filter(|a| game.state.achievements.contains(a.id))
        .count();
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!(" {unlocked}/{} unlocked", catalog.len()),
        Style::default().fg(Color::Yellow),
    )));
    for def in catalog {
        let line = if game.state.achievements.contains(def.id) {
            Line::from(vec![
                Span::styled(format!(" ★ {:<20}", def.name), Style::default().fg(Color::Yellow)),
                Span::styled(def.desc, Style::default().fg(Color::Gray)),
            ])
        } else {
            Line::from(vec![
                Span::styled(format!(" ☆ {:<20}", def.name), Style::default().fg(Color::DarkGray)),
                Span::styled(def.desc, Style::default().fg(Color::DarkGray)),
            ])
        };
        cl.push(line);
    }
    cl
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<16}"), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn stats_list(game: &RarityGame) -> ClickableList<'static> {
    let s = &game.state;
    let version = game.config.version;
    let mut cl = ClickableList::new();

    match &game.name_input {
        Some(buffer) => cl.push(Line::from(vec![
            Span::styled(" New name: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{buffer}_"),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Enter saves, Esc cancels", Style::default().fg(Color::DarkGray)),
        ])),
        None => cl.push_clickable(
            Line::from(vec![
                key_span(" [N] ".into(), true),
                Span::styled(s.username.clone(), Style::default().fg(Color::White)),
                Span::styled("  rename", Style::default().fg(Color::DarkGray)),
            ]),
            RENAME,
        ),
    }

    let table = table_for(version, s.stage, &s.discovered);
    cl.push(stat_line("Player id", s.user_id.clone()));
    cl.push(stat_line("Clicks", format_number(s.total_clicks)));
    cl.push(stat_line("Points", format_number(s.points)));
    cl.push(stat_line(
        "Rarities",
        format!("{}/{}", table.discovered_count(&s.discovered), table.len()),
    ));
    cl.push(stat_line("Completion", format_percent(game.completion())));
    match version {
        GameVersion::Staged => cl.push(stat_line("Stage", s.stage.to_string())),
        GameVersion::Classic => {
            cl.push(stat_line("Upstages", s.prestige_count.to_string()));
            cl.push(stat_line("Price multiplier", format!("×{:.2}", s.price_multiplier)));
        }
    }
    cl.push(stat_line("Achievements", s.achievements.len().to_string()));

    if !s.stage_history.is_empty() {
        cl.push(Line::from(""));
        cl.push(Line::from(Span::styled(
            " History",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )));
        for record in s.stage_history.iter().rev().take(5) {
            cl.push(Line::from(Span::styled(
                format!(
                    "  #{} {} pts, {} rarities, {} clicks, {}",
                    record.stage,
                    format_number(record.points),
                    record.rarities.len(),
                    format_number(record.total_clicks),
                    record.completed_at.format("%Y-%m-%d")
                ),
                Style::default().fg(Color::Gray),
            )));
        }
    }

    cl.push(Line::from(""));
    let board = &game.leaderboard;
    let status = match board.status {
        ConnectionStatus::Online => Span::styled(" Leaderboard ● online", Style::default().fg(Color::Green)),
        ConnectionStatus::Offline => Span::styled(" Leaderboard ○ offline", Style::default().fg(Color::DarkGray)),
    };
    cl.push(Line::from(status));
    for (rank, entry) in board.entries.iter().take(5).enumerate() {
        let style = if entry.id == s.user_id {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        cl.push(Line::from(Span::styled(
            format!("  {:>3}. {:<20} {}", rank + 1, entry.name, format_percent(entry.percent)),
            style,
        )));
    }
    if let Some(pos) = board.position_of(&s.user_id).filter(|p| *p > 5) {
        cl.push(Line::from(Span::styled(
            format!("  You are #{pos}"),
            Style::default().fg(Color::Yellow),
        )));
    }

    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(vec![
            key_span(" [X] ".into(), true),
            Span::styled("Reset game", Style::default().fg(Color::Red)),
        ]),
        RESET_GAME,
    );
    cl
}

fn render_reset_confirm(
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        " Reset all progress? Your name and id are kept.",
        Style::default().fg(Color::White),
    )));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(vec![
            key_span(" [Y] ".into(), true),
            Span::styled("Yes, reset", Style::default().fg(Color::Red)),
        ]),
        CONFIRM_RESET,
    );
    cl.push_clickable(
        Line::from(vec![
            key_span(" [N] ".into(), true),
            Span::styled("Cancel", Style::default().fg(Color::White)),
        ]),
        CANCEL_RESET,
    );

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Red))
        .title(" Reset ");
    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_log(game: &RarityGame, f: &mut Frame, area: Rect, borders: Borders) {
    let visible = area.height.saturating_sub(2) as usize;

    // Newest first.
    let lines: Vec<Line> = game
        .state
        .log
        .iter()
        .rev()
        .take(visible)
        .enumerate()
        .map(|(i, entry)| {
            let style = match (entry.is_important, i < 3) {
                (true, true) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(Color::Yellow),
                (false, true) => Style::default().fg(Color::White),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(borders)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
