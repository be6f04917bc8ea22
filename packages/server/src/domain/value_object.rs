//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Maximum length of a user identifier in bytes.
pub const USER_ID_MAX_LEN: usize = 100;

/// Maximum length of a message text in bytes.
pub const MESSAGE_TEXT_MAX_LEN: usize = 10_000;

/// User identifier value object.
///
/// Free text supplied by the sender. It is not checked for uniqueness:
/// two people may well post under the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId.
    ///
    /// # Arguments
    ///
    /// * `id` - The user identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the UserId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::UserIdEmpty);
        }
        let len = id.len();
        if len > USER_ID_MAX_LEN {
            return Err(ValueObjectError::UserIdTooLong {
                max: USER_ID_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message text value object.
///
/// Represents the body of a chat message with validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageText(String);

impl MessageText {
    /// Create a new MessageText.
    ///
    /// # Arguments
    ///
    /// * `text` - The message body
    ///
    /// # Returns
    ///
    /// A Result containing the MessageText or an error if validation fails
    pub fn new(text: String) -> Result<Self, ValueObjectError> {
        if text.is_empty() {
            return Err(ValueObjectError::MessageTextEmpty);
        }
        let len = text.len();
        if len > MESSAGE_TEXT_MAX_LEN {
            return Err(ValueObjectError::MessageTextTooLong {
                max: MESSAGE_TEXT_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(text))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message identifier value object.
///
/// Assigned by the message store, strictly increasing, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    /// The identifier given to the first message of a process.
    pub const FIRST: MessageId = MessageId(1);

    /// Create a new MessageId.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the inner u64 value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The identifier following this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Connection identifier value object.
///
/// Identifies one WebSocket connection (one browser tab), as opposed to
/// the user behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(uuid::Uuid);

impl ConnectionId {
    /// Create a ConnectionId from a UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    ///
    /// # Arguments
    ///
    /// * `value` - Unix timestamp in milliseconds
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self(kibun_shared::time::now_millis())
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// RFC 3339 representation used on the wire.
    pub fn to_rfc3339(&self) -> String {
        kibun_shared::time::timestamp_to_rfc3339(self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
