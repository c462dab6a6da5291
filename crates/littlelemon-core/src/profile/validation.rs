use std::sync::OnceLock;

use regex::Regex;

use crate::models::Profile;
use crate::{Error, Result};

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Phone numbers are exactly this many ASCII digits.
pub const PHONE_DIGITS: usize = 10;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("Invalid email regex"))
}

pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(&email.to_lowercase())
}

pub fn validate_number(number: &str) -> bool {
    number.len() == PHONE_DIGITS && number.chars().all(|c| c.is_ascii_digit())
}

/// A name counts only if something other than whitespace was typed.
pub fn validate_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Whether the profile screen's save action is enabled.
pub fn can_save(profile: &Profile) -> bool {
    validate_name(&profile.first_name)
        && validate_name(&profile.last_name)
        && validate_email(&profile.email)
        && validate_number(&profile.number)
}

pub(crate) fn check_profile(profile: &Profile) -> Result<()> {
    if can_save(profile) {
        Ok(())
    } else {
        Err(Error::Validation("profile is incomplete".to_string()))
    }
}
