use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, OnboardingFocus};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

fn input_line<'a>(label: &'a str, value: &str, focused: bool) -> Line<'a> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("    "),
        Span::styled(format!("{:<11}[", label), styles::muted_style()),
        Span::styled(format!("{:<24}{}", value, cursor), style),
        Span::styled("]", styles::muted_style()),
    ])
}

/// Render the onboarding form. Next stays disabled until the name is
/// non-empty and the email is valid.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let dialog = centered_rect_fixed(50, 12, area);
    frame.render_widget(Clear, dialog);

    let enabled = app.onboarding.can_proceed();
    let next_focused = app.onboarding_focus == OnboardingFocus::Next;
    let next_label = if next_focused { " ▶ Next ◀ " } else { "   Next   " };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "         Let us get to know you",
            styles::title_style(),
        )),
        Line::from(""),
        input_line(
            "First Name",
            &app.onboarding.first_name,
            app.onboarding_focus == OnboardingFocus::FirstName,
        ),
        Line::from(""),
        input_line(
            "Email",
            &app.onboarding.email,
            app.onboarding_focus == OnboardingFocus::Email,
        ),
        Line::from(""),
        Line::from(vec![
            Span::raw("                    ["),
            Span::styled(next_label, styles::button_style(enabled, next_focused)),
            Span::raw("]"),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}
