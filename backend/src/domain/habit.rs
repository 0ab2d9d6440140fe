//! Habits owned by a single user.
//!
//! Habit identifiers are only unique within their owner: user 1 and user 2
//! can both own habit 1. Every lookup therefore takes the `(UserId, HabitId)`
//! pair.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Maximum habit name length accepted by the store.
pub const HABIT_NAME_MAX: usize = 100;

/// Validation errors for habit inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HabitValidationError {
    /// Name was missing or blank once trimmed.
    #[error("Name is required")]
    EmptyName,
    /// Name exceeds [`HABIT_NAME_MAX`] characters.
    #[error("Name must be at most {max} characters")]
    NameTooLong { max: usize },
    /// Habit identifiers start at 1.
    #[error("Invalid habit ID")]
    InvalidId,
}

/// Per-user sequential habit identifier, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct HabitId(i32);

impl HabitId {
    /// Validate and wrap a raw identifier.
    pub fn new(id: i32) -> Result<Self, HabitValidationError> {
        if id <= 0 {
            return Err(HabitValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// The identifier given to a user's first habit.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HabitId {
    type Err = HabitValidationError;

    /// Parse a path segment such as `"12"`.
    ///
    /// # Examples
    /// ```
    /// use habit_tracker::domain::HabitId;
    ///
    /// assert_eq!("12".parse::<HabitId>().unwrap().get(), 12);
    /// assert!("twelve".parse::<HabitId>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i32>()
            .map_err(|_| HabitValidationError::InvalidId)?;
        Self::new(raw)
    }
}

impl From<HabitId> for i32 {
    fn from(value: HabitId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for HabitId {
    type Error = HabitValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-empty habit name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HabitName(String);

impl HabitName {
    /// Validate a habit name. Surrounding whitespace is removed.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, HabitValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(HabitValidationError::EmptyName);
        }
        if trimmed.chars().count() > HABIT_NAME_MAX {
            return Err(HabitValidationError::NameTooLong {
                max: HABIT_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<HabitName> for String {
    fn from(value: HabitName) -> Self {
        value.0
    }
}

impl TryFrom<String> for HabitName {
    type Error = HabitValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated input for creating a habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDraft {
    name: HabitName,
    description: String,
}

impl HabitDraft {
    /// Build a draft from raw request fields. A missing description becomes
    /// the empty string.
    ///
    /// # Examples
    /// ```
    /// use habit_tracker::domain::HabitDraft;
    ///
    /// let draft = HabitDraft::try_from_parts("Exercise", None).unwrap();
    /// assert_eq!(draft.name().as_str(), "Exercise");
    /// assert_eq!(draft.description(), "");
    /// ```
    pub fn try_from_parts(
        name: &str,
        description: Option<&str>,
    ) -> Result<Self, HabitValidationError> {
        Ok(Self {
            name: HabitName::new(name)?,
            description: description.unwrap_or_default().to_owned(),
        })
    }

    /// Habit name.
    pub fn name(&self) -> &HabitName {
        &self.name
    }

    /// Free-form description, possibly empty.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// A habit as stored in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    id: HabitId,
    user_id: UserId,
    name: HabitName,
    description: String,
    created_at: DateTime<Utc>,
}

impl Habit {
    /// Assemble a habit from its stored parts.
    #[must_use]
    pub fn new(
        id: HabitId,
        user_id: UserId,
        draft: HabitDraft,
        created_at: DateTime<Utc>,
    ) -> Self {
        let HabitDraft { name, description } = draft;
        Self {
            id,
            user_id,
            name,
            description,
            created_at,
        }
    }

    /// Identifier, unique per owner.
    #[must_use]
    pub fn id(&self) -> HabitId {
        self.id
    }

    /// Owning user.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Habit name.
    #[must_use]
    pub fn name(&self) -> &HabitName {
        &self.name
    }

    /// Free-form description, possibly empty.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Creation instant.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
