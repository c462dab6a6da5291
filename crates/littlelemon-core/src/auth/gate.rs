use tracing::{debug, warn};

use crate::models::ProfileField;
use crate::store::KeyValueStore;
use crate::{Error, Result};

use super::OnboardingForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Onboarding,
    Authenticated,
}

/// Two-state machine: `Onboarding -> Authenticated` through a successful
/// onboarding, `Authenticated -> Onboarding` through logout only.
#[derive(Debug, Clone)]
pub struct NavigationGate {
    state: GateState,
}

impl NavigationGate {
    /// Initial state from the stored identity: both `firstName` and `email`
    /// present and non-empty means authenticated. A failed read is logged
    /// and treated as not authenticated.
    pub async fn resolve<S: KeyValueStore>(store: &S) -> Self {
        let keys = [ProfileField::FirstName.key(), ProfileField::Email.key()];
        let state = match store.multi_get(&keys).await {
            Ok(values) => {
                let present = values
                    .iter()
                    .all(|(_, v)| v.as_deref().is_some_and(|s| !s.is_empty()));
                if present {
                    GateState::Authenticated
                } else {
                    GateState::Onboarding
                }
            }
            Err(e) => {
                warn!(error = %e, "Something went wrong while trying to retrieve login information");
                GateState::Onboarding
            }
        };
        debug!(?state, "Navigation gate resolved");
        Self { state }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == GateState::Authenticated
    }

    /// Persist the onboarding identity and move to `Authenticated`.
    ///
    /// Rejects an incomplete form without touching the store. A failed
    /// write leaves the gate in `Onboarding`. Already authenticated gates
    /// are left alone.
    pub async fn complete_onboarding<S: KeyValueStore>(
        &mut self,
        store: &S,
        form: &OnboardingForm,
    ) -> Result<()> {
        if self.is_authenticated() {
            debug!("Onboarding submitted while already authenticated; ignoring");
            return Ok(());
        }
        if !form.can_proceed() {
            return Err(Error::Validation("onboarding form is incomplete".to_string()));
        }

        store
            .multi_set(&[
                (ProfileField::FirstName.key(), form.first_name.clone()),
                (ProfileField::Email.key(), form.email.clone()),
            ])
            .await?;

        self.state = GateState::Authenticated;
        Ok(())
    }

    /// Called once the store has been cleared.
    pub(crate) fn on_logout(&mut self) {
        self.state = GateState::Onboarding;
    }
}
