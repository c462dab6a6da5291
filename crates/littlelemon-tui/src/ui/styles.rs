use ratatui::style::{Color, Modifier, Style};

// Little Lemon palette
pub const PRIMARY: Color = Color::Rgb(73, 94, 87);
pub const SECONDARY: Color = Color::Rgb(244, 206, 20);
pub const ACCENT: Color = Color::Rgb(238, 153, 114);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const HIGHLIGHT: Color = Color::Rgb(51, 66, 61);
pub const LIGHT: Color = Color::Rgb(237, 239, 238);

// Styles
pub fn title_style() -> Style {
    Style::default().fg(SECONDARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(LIGHT)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(SECONDARY)
}

pub fn price_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Category chip: filled when active
pub fn chip_style(active: bool, focused: bool) -> Style {
    let style = if active {
        Style::default().bg(PRIMARY).fg(SECONDARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(PRIMARY).bg(LIGHT)
    };
    if focused {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

/// Buttons render muted while their action is disabled
pub fn button_style(enabled: bool, focused: bool) -> Style {
    match (enabled, focused) {
        (false, _) => Style::default().fg(MUTED),
        (true, true) => Style::default()
            .bg(SECONDARY)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(LIGHT),
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(SECONDARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn search_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn hero_style() -> Style {
    Style::default().bg(PRIMARY).fg(LIGHT)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 40, 37)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default()
        .fg(SECONDARY)
        .add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}
