use serde::{Deserialize, Serialize};

/// Every persisted profile field, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FirstName,
    LastName,
    Email,
    Number,
    Image,
    Statuses,
    PasswordChanges,
    Offers,
    Newsletter,
}

/// A field value as it lives in the profile, before it is stringified
/// for the key-value store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    fn into_storage(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Flag(b) => b.to_string(),
        }
    }
}

impl ProfileField {
    pub const ALL: [ProfileField; 9] = [
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::Email,
        ProfileField::Number,
        ProfileField::Image,
        ProfileField::Statuses,
        ProfileField::PasswordChanges,
        ProfileField::Offers,
        ProfileField::Newsletter,
    ];

    /// Key under which the field is stored.
    pub fn key(self) -> &'static str {
        match self {
            ProfileField::FirstName => "firstName",
            ProfileField::LastName => "lastName",
            ProfileField::Email => "email",
            ProfileField::Number => "number",
            ProfileField::Image => "image",
            ProfileField::Statuses => "statuses",
            ProfileField::PasswordChanges => "passwordChanges",
            ProfileField::Offers => "offers",
            ProfileField::Newsletter => "newsletter",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::FirstName => "First name",
            ProfileField::LastName => "Last name",
            ProfileField::Email => "Email",
            ProfileField::Number => "Phone number",
            ProfileField::Image => "Avatar",
            ProfileField::Statuses => "Order statuses",
            ProfileField::PasswordChanges => "Password changes",
            ProfileField::Offers => "Special offers",
            ProfileField::Newsletter => "Newsletter",
        }
    }

    /// Value used when the store has nothing (or an empty string) for the
    /// field. Text fields default to empty, notification flags to enabled.
    pub fn default_value(self) -> FieldValue {
        match self {
            ProfileField::FirstName
            | ProfileField::LastName
            | ProfileField::Email
            | ProfileField::Number
            | ProfileField::Image => FieldValue::Text(String::new()),
            ProfileField::Statuses
            | ProfileField::PasswordChanges
            | ProfileField::Offers
            | ProfileField::Newsletter => FieldValue::Flag(true),
        }
    }

    pub fn is_flag(self) -> bool {
        matches!(self.default_value(), FieldValue::Flag(_))
    }

    /// Decode a raw stored value, falling back to the default table.
    pub fn decode(self, raw: Option<&str>) -> FieldValue {
        let raw = match raw {
            Some(r) if !r.is_empty() => r,
            _ => return self.default_value(),
        };

        match self.default_value() {
            FieldValue::Text(_) => FieldValue::Text(raw.to_string()),
            FieldValue::Flag(default) => match raw {
                "true" => FieldValue::Flag(true),
                "false" => FieldValue::Flag(false),
                _ => FieldValue::Flag(default),
            },
        }
    }
}

/// The user's identity and notification preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub number: String,
    pub image: Option<String>,
    pub notify_statuses: bool,
    pub notify_password_changes: bool,
    pub notify_special_offers: bool,
    pub notify_newsletter: bool,
}

impl Default for Profile {
    fn default() -> Self {
        let mut profile = Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            number: String::new(),
            image: None,
            notify_statuses: false,
            notify_password_changes: false,
            notify_special_offers: false,
            notify_newsletter: false,
        };
        for field in ProfileField::ALL {
            profile.set(field, field.default_value());
        }
        profile
    }
}

impl Profile {
    /// Build a profile from raw `(key, value)` pairs as returned by a
    /// multi-get. Unknown keys are ignored; missing ones take their default.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut profile = Self::default();
        for (key, raw) in pairs {
            if let Some(field) = ProfileField::ALL.iter().copied().find(|f| f.key() == key) {
                profile.set(field, field.decode(raw));
            }
        }
        profile
    }

    /// Every field as a `(key, value)` pair ready for a batched write.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        ProfileField::ALL
            .iter()
            .map(|&field| (field.key(), self.get(field).into_storage()))
            .collect()
    }

    pub fn get(&self, field: ProfileField) -> FieldValue {
        match field {
            ProfileField::FirstName => FieldValue::Text(self.first_name.clone()),
            ProfileField::LastName => FieldValue::Text(self.last_name.clone()),
            ProfileField::Email => FieldValue::Text(self.email.clone()),
            ProfileField::Number => FieldValue::Text(self.number.clone()),
            ProfileField::Image => FieldValue::Text(self.image.clone().unwrap_or_default()),
            ProfileField::Statuses => FieldValue::Flag(self.notify_statuses),
            ProfileField::PasswordChanges => FieldValue::Flag(self.notify_password_changes),
            ProfileField::Offers => FieldValue::Flag(self.notify_special_offers),
            ProfileField::Newsletter => FieldValue::Flag(self.notify_newsletter),
        }
    }

    /// Set a field. A value of the wrong kind for the field is ignored.
    pub fn set(&mut self, field: ProfileField, value: FieldValue) {
        match (field, value) {
            (ProfileField::FirstName, FieldValue::Text(s)) => self.first_name = s,
            (ProfileField::LastName, FieldValue::Text(s)) => self.last_name = s,
            (ProfileField::Email, FieldValue::Text(s)) => self.email = s,
            (ProfileField::Number, FieldValue::Text(s)) => self.number = s,
            (ProfileField::Image, FieldValue::Text(s)) => {
                self.image = if s.is_empty() { None } else { Some(s) };
            }
            (ProfileField::Statuses, FieldValue::Flag(b)) => self.notify_statuses = b,
            (ProfileField::PasswordChanges, FieldValue::Flag(b)) => self.notify_password_changes = b,
            (ProfileField::Offers, FieldValue::Flag(b)) => self.notify_special_offers = b,
            (ProfileField::Newsletter, FieldValue::Flag(b)) => self.notify_newsletter = b,
            _ => {}
        }
    }

    /// Mutable access to a text field, for editing in place.
    pub fn text_mut(&mut self, field: ProfileField) -> Option<&mut String> {
        match field {
            ProfileField::FirstName => Some(&mut self.first_name),
            ProfileField::LastName => Some(&mut self.last_name),
            ProfileField::Email => Some(&mut self.email),
            ProfileField::Number => Some(&mut self.number),
            _ => None,
        }
    }

    /// Flip a notification flag. Returns the new value, or None for text fields.
    pub fn toggle(&mut self, field: ProfileField) -> Option<bool> {
        match self.get(field) {
            FieldValue::Flag(b) => {
                self.set(field, FieldValue::Flag(!b));
                Some(!b)
            }
            FieldValue::Text(_) => None,
        }
    }

    /// Avatar placeholder: first letter of the first and last names.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .collect()
    }
}
