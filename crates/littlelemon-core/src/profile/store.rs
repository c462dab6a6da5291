use tracing::{info, warn};

use crate::auth::NavigationGate;
use crate::models::{Profile, ProfileField};
use crate::store::KeyValueStore;
use crate::Result;

use super::validation::check_profile;

pub const SAVE_CONFIRMATION_TITLE: &str = "User Information Saved";
pub const SAVE_CONFIRMATION_BODY: &str = "Thank you for using our Little Lemon App!";

/// Reads and writes the profile through a key-value store.
pub struct ProfileStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store, shared with the navigation gate.
    pub fn kv(&self) -> &S {
        &self.store
    }

    /// Read every profile field, applying the per-field defaults.
    pub async fn try_load(&self) -> Result<Profile> {
        let keys: Vec<&str> = ProfileField::ALL.iter().map(|f| f.key()).collect();
        let values = self.store.multi_get(&keys).await?;
        Ok(Profile::from_pairs(
            values.iter().map(|(k, v)| (k.as_str(), v.as_deref())),
        ))
    }

    /// Read the profile. A store failure is logged and yields the defaults.
    pub async fn load(&self) -> Profile {
        match self.try_load().await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "Something went wrong loading the user information");
                Profile::default()
            }
        }
    }

    /// Validate and write every field in one batch.
    pub async fn save(&self, profile: &Profile) -> Result<()> {
        check_profile(profile)?;
        self.store.multi_set(&profile.to_pairs()).await?;
        info!("Profile saved");
        Ok(())
    }

    /// Forget the avatar image.
    pub async fn remove_image(&self) -> Result<()> {
        self.store.set(ProfileField::Image.key(), "").await
    }

    /// Wipe the whole store and send the gate back to onboarding. On failure
    /// nothing changes.
    pub async fn logout(&self, gate: &mut NavigationGate) -> Result<()> {
        self.store.clear().await?;
        gate.on_logout();
        info!("Logged out, store cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::GateState;
    use crate::store::MemoryKvStore;
    use crate::Error;

    fn complete() -> Profile {
        Profile {
            first_name: "Tilly".into(),
            last_name: "Lemon".into(),
            email: "tilly@littlelemon.com".into(),
            number: "3125550100".into(),
            image: Some("file:///avatar.png".into()),
            notify_statuses: false,
            notify_password_changes: true,
            notify_special_offers: false,
            notify_newsletter: true,
        }
    }

    #[tokio::test]
    async fn test_load_empty_store_gives_defaults() {
        let profiles = ProfileStore::new(MemoryKvStore::new());
        assert_eq!(profiles.load().await, Profile::default());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let profiles = ProfileStore::new(MemoryKvStore::new());
        let profile = complete();
        profiles.save(&profile).await.unwrap();
        assert_eq!(profiles.load().await, profile);
        assert_eq!(
            profiles.kv().get("offers").await.unwrap().as_deref(),
            Some("false")
        );
    }

    #[tokio::test]
    async fn test_save_without_image_round_trip() {
        let profiles = ProfileStore::new(MemoryKvStore::new());
        let profile = Profile {
            image: None,
            ..complete()
        };
        profiles.save(&profile).await.unwrap();
        assert_eq!(profiles.load().await, profile);
    }

    #[tokio::test]
    async fn test_invalid_profile_not_written() {
        let store = MemoryKvStore::new();
        let profiles = ProfileStore::new(store);
        let mut profile = complete();
        profile.number = "555".into();

        let err = profiles.save(&profile).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(profiles.kv().is_empty());
    }

    #[tokio::test]
    async fn test_partial_onboarding_profile_loads() {
        let store = MemoryKvStore::new();
        store.set("firstName", "Tilly").await.unwrap();
        store.set("email", "tilly@littlelemon.com").await.unwrap();
        let profiles = ProfileStore::new(store);

        let profile = profiles.load().await;
        assert_eq!(profile.first_name, "Tilly");
        assert_eq!(profile.last_name, "");
        assert!(profile.notify_newsletter);
    }

    #[tokio::test]
    async fn test_remove_image() {
        let profiles = ProfileStore::new(MemoryKvStore::new());
        profiles.save(&complete()).await.unwrap();
        profiles.remove_image().await.unwrap();
        assert_eq!(profiles.load().await.image, None);
    }

    #[tokio::test]
    async fn test_logout_clears_and_resets_gate() {
        let profiles = ProfileStore::new(MemoryKvStore::new());
        profiles.save(&complete()).await.unwrap();
        profiles.kv().set("unrelated", "state").await.unwrap();

        let mut gate = NavigationGate::resolve(profiles.kv()).await;
        assert_eq!(gate.state(), GateState::Authenticated);

        profiles.logout(&mut gate).await.unwrap();
        assert_eq!(gate.state(), GateState::Onboarding);
        assert!(profiles.kv().is_empty());
        assert_eq!(profiles.load().await, Profile::default());
    }
}
