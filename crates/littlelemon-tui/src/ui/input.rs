//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{
    can_add_text_char, App, AppState, HomeFocus, OnboardingFocus, ProfileFocus, Screen,
    PAGE_SCROLL_SIZE,
};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle logout confirmation
    if matches!(app.state, AppState::ConfirmingLogout) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Normal;
                app.logout().await;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle search mode
    if matches!(app.state, AppState::Searching) {
        handle_search_input(app, key);
        return Ok(false);
    }

    match app.screen {
        Screen::Onboarding => handle_onboarding_input(app, key).await,
        Screen::Home => Ok(handle_home_input(app, key)),
        Screen::Profile => {
            handle_profile_input(app, key).await;
            Ok(false)
        }
    }
}

async fn handle_onboarding_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => return Ok(true),
        KeyCode::Tab | KeyCode::Down => {
            app.onboarding_focus = app.onboarding_focus.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.onboarding_focus = app.onboarding_focus.prev();
        }
        KeyCode::Enter => match app.onboarding_focus {
            OnboardingFocus::Next => app.submit_onboarding().await,
            focus => app.onboarding_focus = focus.next(),
        },
        KeyCode::Backspace => {
            if let Some(text) = focused_onboarding_text(app) {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(text) = focused_onboarding_text(app) {
                if can_add_text_char(text.chars().count(), c) {
                    text.push(c);
                }
            }
        }
        _ => {}
    }
    Ok(false)
}

fn focused_onboarding_text(app: &mut App) -> Option<&mut String> {
    match app.onboarding_focus {
        OnboardingFocus::FirstName => Some(&mut app.onboarding.first_name),
        OnboardingFocus::Email => Some(&mut app.onboarding.email),
        OnboardingFocus::Next => None,
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.clear_search();
            app.state = AppState::Normal;
        }
        KeyCode::Enter => {
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => {
            if app.search_input.pop().is_some() {
                app.search_changed();
            }
        }
        KeyCode::Char(c) => {
            if can_add_text_char(app.search_input.chars().count(), c) {
                app.search_input.push(c);
                app.search_changed();
            }
        }
        _ => {}
    }
}

/// Home screen keys. Returns true if the app should quit.
fn handle_home_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::Quitting;
            return true;
        }
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('/') => app.state = AppState::Searching,
        KeyCode::Char('p') => app.open_profile(),
        KeyCode::Char('r') => {
            if app.home.menu().is_empty() {
                app.load_menu_background();
            }
        }
        KeyCode::Esc => {
            if !app.search_input.is_empty() {
                app.clear_search();
            }
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.home_focus = match app.home_focus {
                HomeFocus::Filters => HomeFocus::Menu,
                HomeFocus::Menu => HomeFocus::Filters,
            };
        }
        _ => match app.home_focus {
            HomeFocus::Filters => handle_filter_keys(app, key),
            HomeFocus::Menu => handle_menu_keys(app, key),
        },
    }
    false
}

fn handle_filter_keys(app: &mut App, key: KeyEvent) {
    let count = app.home.filters().len();
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => {
            app.filter_selection = app.filter_selection.saturating_sub(1);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.filter_selection + 1 < count {
                app.filter_selection += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected_filter(),
        KeyCode::Down => app.home_focus = HomeFocus::Menu,
        _ => {}
    }
}

fn handle_menu_keys(app: &mut App, key: KeyEvent) {
    let len = app.visible_items().len();
    if len == 0 {
        return;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.menu_selection = app.menu_selection.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.menu_selection + 1 < len {
                app.menu_selection += 1;
            }
        }
        KeyCode::PageUp => {
            app.menu_selection = app.menu_selection.saturating_sub(PAGE_SCROLL_SIZE);
        }
        KeyCode::PageDown => {
            app.menu_selection = (app.menu_selection + PAGE_SCROLL_SIZE).min(len - 1);
        }
        KeyCode::Home => app.menu_selection = 0,
        KeyCode::End => app.menu_selection = len - 1,
        _ => {}
    }
}

async fn handle_profile_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.open_home(),
        KeyCode::Tab | KeyCode::Down => app.profile_focus = app.profile_focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.profile_focus = app.profile_focus.prev(),
        KeyCode::Enter | KeyCode::Char(' ') if is_pressable(app.profile_focus) => {
            activate_profile_focus(app).await;
        }
        KeyCode::Enter => app.profile_focus = app.profile_focus.next(),
        KeyCode::Backspace => app.profile_backspace(),
        KeyCode::Char(c) => app.profile_input_char(c),
        _ => {}
    }
}

/// Buttons and checkboxes react to Enter/Space; text fields take the keys.
fn is_pressable(focus: ProfileFocus) -> bool {
    match focus {
        ProfileFocus::Field(field) => field.is_flag(),
        _ => true,
    }
}

async fn activate_profile_focus(app: &mut App) {
    match app.profile_focus {
        ProfileFocus::Field(field) => {
            app.draft.toggle(field);
        }
        ProfileFocus::RemoveImage => app.remove_image().await,
        ProfileFocus::Discard => app.discard_changes().await,
        ProfileFocus::Save => app.save_profile().await,
        ProfileFocus::Logout => app.state = AppState::ConfirmingLogout,
    }
}
