//! Application state management for Little Lemon.
//!
//! This module contains the `App` struct that owns the stores, the
//! navigation gate, per-screen UI state and the background task channel.

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use littlelemon_core::api::MenuClient;
use littlelemon_core::auth::{NavigationGate, OnboardingForm};
use littlelemon_core::cache::{MenuCacheLoader, MenuLoad, MenuOrigin};
use littlelemon_core::config::Config;
use littlelemon_core::models::{MenuItem, Profile, ProfileField};
use littlelemon_core::profile::{can_save, ProfileStore, SAVE_CONFIRMATION_BODY, SAVE_CONFIRMATION_TITLE};
use littlelemon_core::search::{Debouncer, SEARCH_DEBOUNCE};
use littlelemon_core::state::MenuState;
use littlelemon_core::store::{FileKvStore, MenuTable};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Maximum length for free-text inputs (names, email, search, image).
const MAX_TEXT_LENGTH: usize = 64;

/// Phone inputs stop accepting digits at this length.
const MAX_NUMBER_LENGTH: usize = 10;

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 5;

// ============================================================================
// UI State Types
// ============================================================================

/// Which screen flow is showing. Home and Profile are only reachable while
/// the navigation gate is authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Onboarding,
    Home,
    Profile,
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    ConfirmingLogout,
    Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingFocus {
    FirstName,
    Email,
    Next,
}

impl OnboardingFocus {
    pub fn next(&self) -> Self {
        match self {
            OnboardingFocus::FirstName => OnboardingFocus::Email,
            OnboardingFocus::Email => OnboardingFocus::Next,
            OnboardingFocus::Next => OnboardingFocus::FirstName,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            OnboardingFocus::FirstName => OnboardingFocus::Next,
            OnboardingFocus::Email => OnboardingFocus::FirstName,
            OnboardingFocus::Next => OnboardingFocus::Email,
        }
    }
}

/// Home screen focus: the category filter row or the menu list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeFocus {
    Filters,
    Menu,
}

/// Focusable elements of the profile screen, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFocus {
    Field(ProfileField),
    RemoveImage,
    Discard,
    Save,
    Logout,
}

const PROFILE_FOCUS_ORDER: [ProfileFocus; 13] = [
    ProfileFocus::Field(ProfileField::Image),
    ProfileFocus::RemoveImage,
    ProfileFocus::Field(ProfileField::FirstName),
    ProfileFocus::Field(ProfileField::LastName),
    ProfileFocus::Field(ProfileField::Email),
    ProfileFocus::Field(ProfileField::Number),
    ProfileFocus::Field(ProfileField::Statuses),
    ProfileFocus::Field(ProfileField::PasswordChanges),
    ProfileFocus::Field(ProfileField::Offers),
    ProfileFocus::Field(ProfileField::Newsletter),
    ProfileFocus::Logout,
    ProfileFocus::Discard,
    ProfileFocus::Save,
];

impl ProfileFocus {
    fn position(&self) -> usize {
        PROFILE_FOCUS_ORDER
            .iter()
            .position(|f| f == self)
            .unwrap_or(0)
    }

    /// Get the next focusable element (wrapping around)
    pub fn next(&self) -> Self {
        PROFILE_FOCUS_ORDER[(self.position() + 1) % PROFILE_FOCUS_ORDER.len()]
    }

    /// Get the previous focusable element (wrapping around)
    pub fn prev(&self) -> Self {
        let len = PROFILE_FOCUS_ORDER.len();
        PROFILE_FOCUS_ORDER[(self.position() + len - 1) % len]
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent back from spawned tasks.
enum BackgroundResult {
    Menu(std::result::Result<MenuLoad, String>),
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub client: MenuClient,
    loader: MenuCacheLoader<MenuClient>,
    pub profiles: ProfileStore<FileKvStore>,
    pub gate: NavigationGate,

    // UI State
    pub state: AppState,
    pub screen: Screen,

    // Onboarding form
    pub onboarding: OnboardingForm,
    pub onboarding_focus: OnboardingFocus,

    // Home screen
    pub home: MenuState,
    pub search_input: String,
    pub home_focus: HomeFocus,
    pub menu_selection: usize,
    pub filter_selection: usize,
    pub menu_loading: bool,
    debouncer: Debouncer<String>,
    query_rx: mpsc::UnboundedReceiver<String>,

    // Profile screen: last saved values and the copy being edited
    pub saved_profile: Profile,
    pub draft: Profile,
    pub profile_focus: ProfileFocus,

    // Background task channel
    background_rx: mpsc::Receiver<BackgroundResult>,
    background_tx: mpsc::Sender<BackgroundResult>,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new application instance
    pub async fn new(config: Config) -> Result<Self> {
        let data_dir = config.data_dir()?;
        debug!(?data_dir, "Data directory configured");

        let kv = FileKvStore::open(config.kv_path()?).context("Failed to open profile storage")?;
        let table = MenuTable::open(config.database_path()?)
            .await
            .context("Failed to open menu database")?;
        let client = MenuClient::new(&config)?;
        let loader = MenuCacheLoader::new(table, client.clone());

        let profiles = ProfileStore::new(kv);
        let gate = NavigationGate::resolve(profiles.kv()).await;
        let saved_profile = profiles.load().await;

        let screen = if gate.is_authenticated() {
            Screen::Home
        } else {
            Screen::Onboarding
        };

        let (debouncer, query_rx) = Debouncer::new(SEARCH_DEBOUNCE);
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Ok(Self {
            client,
            loader,
            profiles,
            gate,

            state: AppState::Normal,
            screen,

            onboarding: OnboardingForm::new(),
            onboarding_focus: OnboardingFocus::FirstName,

            home: MenuState::new(),
            search_input: String::new(),
            home_focus: HomeFocus::Menu,
            menu_selection: 0,
            filter_selection: 0,
            menu_loading: false,
            debouncer,
            query_rx,

            draft: saved_profile.clone(),
            saved_profile,
            profile_focus: ProfileFocus::Field(ProfileField::FirstName),

            background_rx: rx,
            background_tx: tx,

            status_message: None,
        })
    }

    // =========================================================================
    // Menu
    // =========================================================================

    /// Spawn a background task that loads the menu from the table or, if
    /// the table is empty, from the remote document.
    pub fn load_menu_background(&mut self) {
        if self.menu_loading {
            return;
        }
        self.menu_loading = true;
        self.status_message = Some("Loading menu...".to_string());

        let loader = self.loader.clone();
        let tx = self.background_tx.clone();
        tokio::spawn(async move {
            let result = loader.try_load().await.map_err(|e| e.to_string());
            if let Err(e) = tx.send(BackgroundResult::Menu(result)).await {
                error!(error = %e, "Failed to send menu result - channel closed");
            }
        });
    }

    /// Drain finished background work and settled search queries.
    pub fn check_background_tasks(&mut self) {
        while let Ok(result) = self.background_rx.try_recv() {
            self.process_background_result(result);
        }
        while let Ok(query) = self.query_rx.try_recv() {
            debug!(query = %query, "Search query settled");
            self.home.set_query(query);
            self.menu_selection = 0;
        }
    }

    fn process_background_result(&mut self, result: BackgroundResult) {
        match result {
            BackgroundResult::Menu(Ok(_)) if !self.gate.is_authenticated() => {
                // Load finished after logout
                self.menu_loading = false;
                debug!("Dropping menu load that finished after logout");
            }
            BackgroundResult::Menu(Ok(load)) => {
                self.menu_loading = false;
                let count = load.items.len();
                self.status_message = match load.origin {
                    MenuOrigin::Remote => Some(format!("Menu downloaded ({} items)", count)),
                    MenuOrigin::Table => None,
                };
                info!(count, origin = ?load.origin, "Menu loaded");
                self.home.set_menu(load.items);
                self.clamp_menu_selection();
            }
            BackgroundResult::Menu(Err(e)) => {
                self.menu_loading = false;
                error!(error = %e, "Error fetching menu data");
                self.status_message = Some("Menu failed to load. Press r to retry.".to_string());
            }
        }
    }

    pub fn visible_items(&self) -> Vec<&MenuItem> {
        self.home.visible()
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.visible_items().get(self.menu_selection).copied()
    }

    pub fn clamp_menu_selection(&mut self) {
        let len = self.visible_items().len();
        if self.menu_selection >= len {
            self.menu_selection = len.saturating_sub(1);
        }
    }

    /// Restart the debounce timer with the current search text.
    pub fn search_changed(&mut self) {
        self.debouncer.push(self.search_input.clone());
    }

    /// True while typed search text has not been applied yet.
    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Clear the search box and the applied query immediately.
    pub fn clear_search(&mut self) {
        self.debouncer.cancel();
        self.search_input.clear();
        self.home.set_query("");
        self.menu_selection = 0;
    }

    pub fn toggle_selected_filter(&mut self) {
        if self.home.toggle_filter_at(self.filter_selection).is_some() {
            self.menu_selection = 0;
        }
    }

    // =========================================================================
    // Onboarding
    // =========================================================================

    /// Persist the onboarding identity and continue to the profile screen.
    pub async fn submit_onboarding(&mut self) {
        if !self.onboarding.can_proceed() {
            return;
        }

        match self
            .gate
            .complete_onboarding(self.profiles.kv(), &self.onboarding)
            .await
        {
            Ok(()) => {
                info!("Onboarding complete");
                self.saved_profile = self.profiles.load().await;
                self.draft = self.saved_profile.clone();
                self.onboarding = OnboardingForm::new();
                self.onboarding_focus = OnboardingFocus::FirstName;
                self.profile_focus = ProfileFocus::Field(ProfileField::LastName);
                self.screen = Screen::Profile;
                self.load_menu_background();
            }
            Err(e) => {
                warn!(error = %e, "An error occurred while trying to save your information");
                self.status_message = Some("Could not save your information".to_string());
            }
        }
    }

    // =========================================================================
    // Profile
    // =========================================================================

    pub fn open_profile(&mut self) {
        self.draft = self.saved_profile.clone();
        self.profile_focus = ProfileFocus::Field(ProfileField::FirstName);
        self.screen = Screen::Profile;
    }

    pub fn open_home(&mut self) {
        self.screen = Screen::Home;
        if self.home.menu().is_empty() {
            self.load_menu_background();
        }
    }

    /// Type a character into the focused profile text field.
    pub fn profile_input_char(&mut self, c: char) {
        let ProfileFocus::Field(field) = self.profile_focus else {
            return;
        };
        match field {
            ProfileField::Image => {
                let len = self.draft.image.as_deref().map_or(0, |s| s.chars().count());
                if can_add_text_char(len, c) {
                    self.draft.image.get_or_insert_with(String::new).push(c);
                }
            }
            ProfileField::Number => {
                if can_add_number_char(self.draft.number.len(), c) {
                    self.draft.number.push(c);
                }
            }
            _ => {
                if let Some(text) = self.draft.text_mut(field) {
                    if can_add_text_char(text.chars().count(), c) {
                        text.push(c);
                    }
                }
            }
        }
    }

    pub fn profile_backspace(&mut self) {
        let ProfileFocus::Field(field) = self.profile_focus else {
            return;
        };
        if field == ProfileField::Image {
            if let Some(image) = self.draft.image.as_mut() {
                image.pop();
                if image.is_empty() {
                    self.draft.image = None;
                }
            }
        } else if let Some(text) = self.draft.text_mut(field) {
            text.pop();
        }
    }

    pub fn can_save_profile(&self) -> bool {
        can_save(&self.draft)
    }

    pub async fn save_profile(&mut self) {
        if !self.can_save_profile() {
            return;
        }
        match self.profiles.save(&self.draft).await {
            Ok(()) => {
                self.saved_profile = self.draft.clone();
                self.status_message = Some(format!(
                    "{}. {}",
                    SAVE_CONFIRMATION_TITLE, SAVE_CONFIRMATION_BODY
                ));
            }
            Err(e) => {
                error!(error = %e, "Failed to save profile");
                self.status_message = Some("Could not save your information".to_string());
            }
        }
    }

    /// Throw away edits by reloading from the store.
    pub async fn discard_changes(&mut self) {
        self.saved_profile = self.profiles.load().await;
        self.draft = self.saved_profile.clone();
        self.status_message = Some("Changes discarded".to_string());
    }

    pub async fn remove_image(&mut self) {
        self.draft.image = None;
        match self.profiles.remove_image().await {
            Ok(()) => self.saved_profile.image = None,
            Err(e) => warn!(error = %e, "An error occurred when trying to remove the image"),
        }
    }

    /// Clear all stored state and return to onboarding.
    pub async fn logout(&mut self) {
        match self.profiles.logout(&mut self.gate).await {
            Ok(()) => {
                self.clear_search();
                self.home = MenuState::new();
                self.saved_profile = Profile::default();
                self.draft = Profile::default();
                self.screen = Screen::Onboarding;
                self.status_message = None;
            }
            Err(e) => {
                error!(error = %e, "Logout failed");
                self.status_message = Some("Logout failed".to_string());
            }
        }
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a text field character should be accepted
pub fn can_add_text_char(current_len: usize, c: char) -> bool {
    current_len < MAX_TEXT_LENGTH && is_valid_input_char(c)
}

/// Check if a phone number character should be accepted
pub fn can_add_number_char(current_len: usize, c: char) -> bool {
    current_len < MAX_NUMBER_LENGTH && c.is_ascii_digit()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_app(dir: &tempfile::TempDir) -> App {
        let config = Config {
            menu_url: "http://127.0.0.1:9/menu.json".to_string(),
            data_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        App::new(config).await.unwrap()
    }

    fn item(name: &str, category: &str) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            description: String::new(),
            price: 12.99,
            category: category.to_string(),
            image: String::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Focus Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_onboarding_focus_cycle() {
        assert_eq!(OnboardingFocus::FirstName.next(), OnboardingFocus::Email);
        assert_eq!(OnboardingFocus::Next.next(), OnboardingFocus::FirstName);
        assert_eq!(OnboardingFocus::FirstName.prev(), OnboardingFocus::Next);
    }

    #[test]
    fn test_profile_focus_wraps() {
        let first = PROFILE_FOCUS_ORDER[0];
        let last = PROFILE_FOCUS_ORDER[PROFILE_FOCUS_ORDER.len() - 1];
        assert_eq!(last.next(), first);
        assert_eq!(first.prev(), last);
        assert_eq!(
            ProfileFocus::Field(ProfileField::FirstName).next(),
            ProfileFocus::Field(ProfileField::LastName)
        );
    }

    // -------------------------------------------------------------------------
    // Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_text_char() {
        assert!(can_add_text_char(0, 'a'));
        assert!(can_add_text_char(63, '@'));
        assert!(!can_add_text_char(64, 'a'));
        assert!(!can_add_text_char(0, '\n'));
    }

    #[test]
    fn test_can_add_number_char() {
        assert!(can_add_number_char(0, '3'));
        assert!(!can_add_number_char(10, '3'));
        assert!(!can_add_number_char(0, '-'));
    }

    // -------------------------------------------------------------------------
    // App Flow Tests
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_fresh_install_starts_onboarding() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir).await;
        assert_eq!(app.screen, Screen::Onboarding);
        assert!(!app.gate.is_authenticated());
    }

    #[tokio::test]
    async fn test_corrupt_storage_starts_onboarding() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("storage.json"), "{ truncated").unwrap();

        let app = test_app(&dir).await;
        assert_eq!(app.screen, Screen::Onboarding);
        assert_eq!(app.saved_profile, Profile::default());
    }

    #[tokio::test]
    async fn test_invalid_onboarding_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.onboarding.email = "tilly@littlelemon.com".to_string();

        app.submit_onboarding().await;
        assert_eq!(app.screen, Screen::Onboarding);
        assert!(!app.menu_loading);
    }

    #[tokio::test]
    async fn test_onboarding_then_restart_is_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut app = test_app(&dir).await;
            app.onboarding.first_name = "Tilly".to_string();
            app.onboarding.email = "tilly@littlelemon.com".to_string();
            app.submit_onboarding().await;
            assert_eq!(app.screen, Screen::Profile);
            assert_eq!(app.draft.first_name, "Tilly");
            assert!(!app.can_save_profile());
        }

        let app = test_app(&dir).await;
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.saved_profile.email, "tilly@littlelemon.com");
    }

    #[tokio::test]
    async fn test_logout_returns_to_onboarding() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.onboarding.first_name = "Tilly".to_string();
        app.onboarding.email = "tilly@littlelemon.com".to_string();
        app.submit_onboarding().await;

        app.logout().await;
        assert_eq!(app.screen, Screen::Onboarding);
        assert_eq!(app.saved_profile, Profile::default());

        let restarted = test_app(&dir).await;
        assert_eq!(restarted.screen, Screen::Onboarding);
    }

    #[tokio::test]
    async fn test_menu_result_populates_home() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.menu_loading = true;

        app.process_background_result(BackgroundResult::Menu(Ok(MenuLoad {
            items: vec![item("Greek Salad", "Mains"), item("Lemon Dessert", "Desserts")],
            origin: MenuOrigin::Remote,
        })));

        assert!(!app.menu_loading);
        assert_eq!(app.visible_items().len(), 2);
        assert_eq!(app.home.filters().len(), 2);
        assert_eq!(app.selected_item().map(|i| i.display_price()), Some("$12.99".to_string()));
    }

    #[tokio::test]
    async fn test_menu_load_after_logout_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.onboarding.first_name = "Tilly".to_string();
        app.onboarding.email = "tilly@littlelemon.com".to_string();
        app.submit_onboarding().await;
        assert!(app.menu_loading);

        app.logout().await;
        app.process_background_result(BackgroundResult::Menu(Ok(MenuLoad {
            items: vec![item("Greek Salad", "Mains")],
            origin: MenuOrigin::Table,
        })));

        assert!(!app.menu_loading);
        assert!(app.home.menu().is_empty());
        assert!(app.home.filters().is_empty());
    }

    #[tokio::test]
    async fn test_menu_failure_sets_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.menu_loading = true;

        app.process_background_result(BackgroundResult::Menu(Err("offline".to_string())));
        assert!(!app.menu_loading);
        assert!(app.visible_items().is_empty());
        assert!(app.status_message.as_deref().unwrap_or("").contains("failed"));
    }

    #[tokio::test]
    async fn test_profile_number_input_accepts_ten_digits() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.profile_focus = ProfileFocus::Field(ProfileField::Number);

        for c in "555-123-45678".chars() {
            app.profile_input_char(c);
        }
        assert_eq!(app.draft.number, "5551234567");

        app.profile_backspace();
        assert_eq!(app.draft.number, "555123456");
    }

    #[tokio::test]
    async fn test_profile_image_input_clears_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.profile_focus = ProfileFocus::Field(ProfileField::Image);

        app.profile_input_char('a');
        assert_eq!(app.draft.image.as_deref(), Some("a"));
        app.profile_backspace();
        assert_eq!(app.draft.image, None);
    }

    #[tokio::test]
    async fn test_profile_image_limit_counts_chars() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.profile_focus = ProfileFocus::Field(ProfileField::Image);

        for _ in 0..70 {
            app.profile_input_char('é');
        }
        assert_eq!(app.draft.image.as_deref().map(|s| s.chars().count()), Some(64));
    }

    #[tokio::test]
    async fn test_save_and_discard_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.draft.first_name = "Tilly".to_string();
        app.draft.last_name = "Lemon".to_string();
        app.draft.email = "tilly@littlelemon.com".to_string();
        app.draft.number = "5551234567".to_string();
        app.draft.notify_newsletter = false;

        assert!(app.can_save_profile());
        app.save_profile().await;
        assert_eq!(app.saved_profile, app.draft);
        assert!(app
            .status_message
            .as_deref()
            .unwrap_or("")
            .starts_with(SAVE_CONFIRMATION_TITLE));

        app.draft.last_name = "Changed".to_string();
        app.discard_changes().await;
        assert_eq!(app.draft.last_name, "Lemon");
        assert!(!app.draft.notify_newsletter);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_applies_after_debounce() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.home.set_menu(vec![item("Greek Salad", "Mains"), item("Lemon Dessert", "Desserts")]);

        app.search_input = "gre".to_string();
        app.search_changed();
        app.search_input = "greek".to_string();
        app.search_changed();

        app.check_background_tasks();
        assert!(app.search_pending());
        assert_eq!(app.visible_items().len(), 2);

        tokio::time::sleep(SEARCH_DEBOUNCE + std::time::Duration::from_millis(10)).await;
        app.check_background_tasks();
        assert!(!app.search_pending());
        let names: Vec<&str> = app.visible_items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Greek Salad"]);
    }
}
