use crate::profile::{validate_email, validate_name};

/// The two fields collected before the user reaches the profile screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingForm {
    pub first_name: String,
    pub email: String,
}

impl OnboardingForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the Next action is enabled.
    pub fn can_proceed(&self) -> bool {
        validate_name(&self.first_name) && validate_email(&self.email)
    }
}
