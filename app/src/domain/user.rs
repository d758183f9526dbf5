//! User data model.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validation errors returned when parsing user fields from raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The role string is not one of `Admin`, `Editor` or `Viewer`.
    UnknownRole {
        /// The rejected input.
        value: String,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRole { value } => write!(
                f,
                "role must be one of Admin, Editor or Viewer (got {value:?})"
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Process-local user identifier.
///
/// Seed records use small fixed values; records created at runtime use
/// millisecond timestamps handed out by [`UserIdSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Closed set of roles a user can hold.
///
/// Roles compare structurally, so `"admin"` or `"Administrator"` never count
/// as [`UserRole::Admin`]; they fail to parse instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Full administrative access.
    Admin,
    /// May edit content.
    Editor,
    /// Read-only access.
    Viewer,
}

impl UserRole {
    /// Every role, in declaration order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Editor, Self::Viewer];

    /// Canonical label used for display and serialisation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| UserValidationError::UnknownRole {
                value: value.to_owned(),
            })
    }
}

/// Application user.
///
/// Name and email are free-form; no format checks are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: UserRole,
}

impl User {
    /// Build a user from its parts.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// Identifier, unique among the users held by one store.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Full name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Assigned role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Whether the user holds the [`UserRole::Admin`] role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Candidate user awaiting an identifier from the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Requested role.
    pub role: UserRole,
}

impl NewUser {
    /// Build a candidate from its parts.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// Stamp an identifier onto the candidate.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
        }
    }
}

/// Clock-derived identifier allocator.
///
/// Identifiers are the current UTC time in milliseconds, bumped past the
/// previously issued value whenever two calls land in the same tick (or the
/// clock steps backwards). Values are therefore strictly increasing for the
/// lifetime of one source.
pub struct UserIdSource {
    clock: Arc<dyn Clock>,
    last: AtomicI64,
}

impl UserIdSource {
    /// Create a source reading time from `clock`.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use user_directory::domain::UserIdSource;
    ///
    /// let ids = UserIdSource::new(Arc::new(DefaultClock));
    /// let first = ids.next_id();
    /// assert!(ids.next_id() > first);
    /// ```
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicI64::new(0),
        }
    }

    /// Issue the next identifier.
    pub fn next_id(&self) -> UserId {
        let now = self.clock.utc().timestamp_millis();
        let bump = |previous: i64| now.max(previous.saturating_add(1));
        let previous = match self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |previous| {
                Some(bump(previous))
            }) {
            Ok(previous) | Err(previous) => previous,
        };
        UserId::new(bump(previous))
    }
}

impl fmt::Debug for UserIdSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserIdSource")
            .field("last", &self.last.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
