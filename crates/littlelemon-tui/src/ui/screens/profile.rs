use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use littlelemon_core::models::{FieldValue, ProfileField};
use littlelemon_core::utils::format_phone;

use crate::app::{App, ProfileFocus};
use crate::ui::styles;

const TEXT_FIELDS: [ProfileField; 4] = [
    ProfileField::FirstName,
    ProfileField::LastName,
    ProfileField::Email,
    ProfileField::Number,
];

const FLAG_FIELDS: [ProfileField; 4] = [
    ProfileField::Statuses,
    ProfileField::PasswordChanges,
    ProfileField::Offers,
    ProfileField::Newsletter,
];

fn field_style(focused: bool) -> ratatui::style::Style {
    if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    }
}

fn button<'a>(label: &'a str, enabled: bool, focused: bool) -> Span<'a> {
    Span::styled(format!(" {} ", label), styles::button_style(enabled, focused))
}

/// Render the profile screen: avatar, personal information, notification
/// preferences and the action buttons.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let focus = app.profile_focus;
    let draft = &app.draft;
    let mut lines = vec![];

    lines.push(Line::from(Span::styled(
        "Personal information",
        styles::title_style(),
    )));
    lines.push(Line::from(""));

    // Avatar: the image reference if set, otherwise initials
    let image_focused = focus == ProfileFocus::Field(ProfileField::Image);
    let avatar = match draft.image.as_deref() {
        Some(image) => image.to_string(),
        None if image_focused => String::new(),
        None => format!("({})", draft.initials()),
    };
    let cursor = if image_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::styled(format!("{:<18}", ProfileField::Image.label()), styles::muted_style()),
        Span::styled(format!("{}{}", avatar, cursor), field_style(image_focused)),
        Span::raw("  "),
        button("Remove", draft.image.is_some(), focus == ProfileFocus::RemoveImage),
    ]));
    lines.push(Line::from(""));

    for field in TEXT_FIELDS {
        let focused = focus == ProfileFocus::Field(field);
        let value = match draft.get(field) {
            FieldValue::Text(s) if field == ProfileField::Number && !focused => format_phone(&s),
            FieldValue::Text(s) => s,
            FieldValue::Flag(_) => String::new(),
        };
        let cursor = if focused { "▌" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<18}", field.label()), styles::muted_style()),
            Span::styled(format!("{}{}", value, cursor), field_style(focused)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Email notifications",
        styles::highlight_style(),
    )));

    for field in FLAG_FIELDS {
        let focused = focus == ProfileFocus::Field(field);
        let checked = matches!(draft.get(field), FieldValue::Flag(true));
        let mark = if checked { "[x]" } else { "[ ]" };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", mark), styles::highlight_style()),
            Span::styled(field.label(), field_style(focused)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![button(
        "Log out",
        true,
        focus == ProfileFocus::Logout,
    )]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        button("Discard changes", true, focus == ProfileFocus::Discard),
        Span::raw("   "),
        button("Save changes", app.can_save_profile(), focus == ProfileFocus::Save),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
