//! Onboarding and the navigation gate.
//!
//! The gate decides at startup whether the user sees onboarding or the
//! signed-in screens, based only on the identity fields in the key-value
//! store. There is no session expiry.

pub mod gate;
pub mod onboarding;

pub use gate::{GateState, NavigationGate};
pub use onboarding::OnboardingForm;
