use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, Screen};

use super::screens::{home, onboarding, profile};
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingLogout) {
        render_logout_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  LITTLE LEMON";

    // Avatar on the right once the user is known
    let avatar = if app.gate.is_authenticated() {
        let initials = app.saved_profile.initials();
        match app.saved_profile.image.as_deref() {
            Some(image) => format!("[{}] {}", initials, image),
            None if initials.is_empty() => "[?]".to_string(),
            None => format!("[{}]", initials),
        }
    } else {
        String::new()
    };
    let right = format!("{}  [?] Help", avatar);

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.len() + right.chars().count() + 2),
        )),
        Span::styled(right, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.screen {
        Screen::Onboarding => onboarding::render(frame, app, area),
        Screen::Home => home::render(frame, app, area),
        Screen::Profile => profile::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match (app.screen, app.state) {
        (_, AppState::Searching) => "[Enter] done | [Esc] clear",
        (Screen::Onboarding, _) => "[Tab] next field | [Enter] continue | [Esc] quit",
        (Screen::Home, _) => "[/] search | [Tab] filters | [p]rofile | [q]uit",
        (Screen::Profile, _) => "[Tab] next | [Space] toggle | [Esc] back",
    };

    let left_text = match app.status_message {
        Some(ref msg) => format!(" {} ", msg),
        None if app.menu_loading => " Loading menu... ".to_string(),
        None => String::new(),
    };
    let right_text = format!(" {} ", shortcuts);

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame, _app: &App) {
    let area = centered_rect_fixed(48, 22, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  LITTLE LEMON", styles::title_style())),
        Line::from(Span::styled(
            format!("  Chicago - version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Menu", styles::highlight_style())),
        help_line("↑/↓ j/k", "Navigate menu"),
        help_line("Tab", "Switch focus (filters ↔ menu)"),
        help_line("←/→", "Select category"),
        help_line("Space", "Toggle category"),
        help_line("/", "Search dishes by name"),
        help_line("r", "Retry loading the menu"),
        Line::from(""),
        Line::from(Span::styled(" Profile", styles::highlight_style())),
        help_line("p", "Open profile"),
        help_line("Tab", "Next field or button"),
        help_line("Enter", "Press focused button"),
        help_line("Esc", "Back to menu"),
        Line::from(""),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_logout_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Log out and erase your information?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to log out, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
