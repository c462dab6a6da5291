//! Per-screen content rendering.

pub mod home;
pub mod onboarding;
pub mod profile;
