use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one input of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    /// All fields in render and focus order.
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ];

    /// The wire name used by the view layer and the registration payload.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }

    /// Resolves a wire name to a field. Unknown names yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use edubridge::domain::Field;
    ///
    /// assert_eq!(Field::from_name("confirmPassword"), Some(Field::ConfirmPassword));
    /// assert_eq!(Field::from_name("phone"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Enter your name",
            Field::Email => "Enter your email",
            Field::Password => "Enter your password",
            Field::ConfirmPassword => "Confirm your password",
        }
    }

    /// Whether the field's value must be masked when rendered.
    pub fn is_secret(self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }

    fn index(self) -> usize {
        match self {
            Field::Name => 0,
            Field::Email => 1,
            Field::Password => 2,
            Field::ConfirmPassword => 3,
        }
    }

    /// The next field in focus order, wrapping around.
    pub fn next(self) -> Field {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    /// The previous field in focus order, wrapping around.
    pub fn previous(self) -> Field {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The in-progress registration values.
///
/// Serializes to the registration payload
/// `{ "name", "email", "password", "confirmPassword" }`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

// Passwords never reach logs through `{:?}`.
impl fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .field("confirm_password", &"***")
            .finish()
    }
}

/// Per-field "has the user interacted with it" flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touched([bool; 4]);

impl Touched {
    pub fn mark(&mut self, field: Field) {
        self.0[field.index()] = true;
    }

    pub fn mark_all(&mut self) {
        self.0 = [true; 4];
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.0[field.index()]
    }

    pub fn clear(&mut self) {
        self.0 = [false; 4];
    }
}

/// Which of the two onboarding views is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Home,
    Register,
}

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Register => "Register",
        }
    }
}

/// Lifecycle of a registration submission. Exactly one value at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    /// A registration call is in flight.
    Pending,
    /// The call succeeded and the acknowledgment is showing.
    Succeeded,
    /// The call failed; carries the user-facing reason.
    Failed(String),
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name(""), None);
        assert_eq!(Field::from_name("Name"), None); // Names are case sensitive
    }

    #[test]
    fn test_field_focus_order_wraps() {
        assert_eq!(Field::Name.next(), Field::Email);
        assert_eq!(Field::ConfirmPassword.next(), Field::Name);
        assert_eq!(Field::Name.previous(), Field::ConfirmPassword);
        assert_eq!(Field::Password.previous(), Field::Email);
    }

    #[test]
    fn test_draft_serializes_to_payload_shape() {
        let mut draft = RegistrationDraft::default();
        draft.set(Field::Name, "Jo");
        draft.set(Field::Email, "jo@example.com");
        draft.set(Field::Password, "Abcdef12");
        draft.set(Field::ConfirmPassword, "Abcdef12");

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["name"], "Jo");
        assert_eq!(json["email"], "jo@example.com");
        assert_eq!(json["password"], "Abcdef12");
        assert_eq!(json["confirmPassword"], "Abcdef12");
    }

    #[test]
    fn test_draft_debug_redacts_passwords() {
        let mut draft = RegistrationDraft::default();
        draft.set(Field::Password, "Secret123");
        draft.set(Field::ConfirmPassword, "Secret123");

        let printed = format!("{:?}", draft);
        assert!(!printed.contains("Secret123"));
    }

    #[test]
    fn test_draft_clear() {
        let mut draft = RegistrationDraft::default();
        assert!(draft.is_empty());
        draft.set(Field::Email, "a@b.com");
        assert!(!draft.is_empty());
        draft.clear();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_touched_flags() {
        let mut touched = Touched::default();
        assert!(!touched.is_touched(Field::Email));
        touched.mark(Field::Email);
        assert!(touched.is_touched(Field::Email));
        assert!(!touched.is_touched(Field::Name));
        touched.mark_all();
        assert!(Field::ALL.iter().all(|f| touched.is_touched(*f)));
        touched.clear();
        assert_eq!(touched, Touched::default());
    }
}
