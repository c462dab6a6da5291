use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use littlelemon_core::utils::truncate_string;

use crate::app::{App, AppState, HomeFocus};
use crate::ui::styles;

const HERO_TAGLINE: &str = "We are a family owned Mediterranean restaurant, \
focused on traditional recipes served with a modern twist.";

/// Render the home screen: hero banner, search box, category chips and
/// the menu with a detail pane.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Hero
            Constraint::Length(3), // Search
            Constraint::Length(3), // Filters
            Constraint::Min(5),    // Menu
        ])
        .split(area);

    render_hero(frame, chunks[0]);
    render_search(frame, app, chunks[1]);
    render_filters(frame, app, chunks[2]);

    let menu_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[3]);

    render_menu_table(frame, app, menu_chunks[0]);
    render_item_detail(frame, app, menu_chunks[1]);
}

fn render_hero(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(" Little Lemon", styles::title_style())),
        Line::from(" Chicago"),
        Line::from(format!(" {}", HERO_TAGLINE)),
    ];
    let paragraph = Paragraph::new(lines)
        .style(styles::hero_style())
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let searching = matches!(app.state, AppState::Searching);
    let cursor = if searching { "▌" } else { "" };

    let content = if app.search_input.is_empty() && !searching {
        Line::from(Span::styled("Press / to search dishes", styles::muted_style()))
    } else {
        Line::from(vec![
            Span::styled("🔍 ", styles::search_style()),
            Span::raw(format!("{}{}", app.search_input, cursor)),
        ])
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(searching));
    if app.search_pending() {
        block = block
            .title(" searching... ")
            .title_style(styles::muted_style());
    }
    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.home_focus == HomeFocus::Filters && matches!(app.state, AppState::Normal);

    let mut spans = vec![Span::raw(" ")];
    for (i, filter) in app.home.filters().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let chip_focused = focused && i == app.filter_selection;
        spans.push(Span::styled(
            format!(" {} ", filter.name),
            styles::chip_style(filter.value, chip_focused),
        ));
    }

    let block = Block::default()
        .title(" ORDER FOR DELIVERY! ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_menu_table(frame: &mut Frame, app: &App, area: Rect) {
    let items = app.visible_items();
    let focused = app.home_focus == HomeFocus::Menu && matches!(app.state, AppState::Normal);

    let header = Row::new(vec![Cell::from("Dish"), Cell::from("Price")])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == app.menu_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            Row::new(vec![
                Cell::from(item.name.clone()),
                Cell::from(Span::styled(item.display_price(), styles::price_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [Constraint::Fill(1), Constraint::Length(9)];

    let title = if app.menu_loading && items.is_empty() {
        " Menu (loading...) ".to_string()
    } else {
        format!(" Menu ({}) ", items.len())
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !items.is_empty() {
        state.select(Some(app.menu_selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_item_detail(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.selected_item() {
        Some(item) => {
            let max_url = (area.width as usize).saturating_sub(4);
            vec![
                Line::from(Span::styled(item.name.clone(), styles::title_style())),
                Line::from(""),
                Line::from(item.description_preview()),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Price:    ", styles::muted_style()),
                    Span::styled(item.display_price(), styles::price_style()),
                ]),
                Line::from(vec![
                    Span::styled("Category: ", styles::muted_style()),
                    Span::raw(item.category.clone()),
                ]),
                Line::from(""),
                Line::from(Span::styled("Image", styles::highlight_style())),
                Line::from(Span::styled(
                    truncate_string(&app.client.image_url(&item.image), max_url),
                    styles::muted_style(),
                )),
            ]
        }
        None if app.menu_loading => vec![Line::from(Span::styled(
            "Loading menu...",
            styles::muted_style(),
        ))],
        None => vec![Line::from(Span::styled(
            "No dishes match",
            styles::muted_style(),
        ))],
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
