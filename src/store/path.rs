use std::fmt;
use thiserror::Error;

/// Characters the realtime database does not allow inside a key.
const FORBIDDEN_KEY_CHARS: [char; 6] = ['.', '$', '#', '[', ']', '/'];
/// Longest key the realtime database accepts, in UTF-8 bytes.
pub const MAX_KEY_BYTES: usize = 768;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidKey {
    #[error("Key must not be empty")]
    Empty,
    #[error("Key {key:?} contains forbidden character {found:?}")]
    ForbiddenCharacter { key: String, found: char },
    #[error("Key is {len} bytes long, the limit is {}", MAX_KEY_BYTES)]
    TooLong { len: usize },
}

/// A location in the remote tree, one validated key per level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorePath {
    segments: Vec<String>,
}

impl StorePath {
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn child(mut self, key: impl Into<String>) -> Result<Self, InvalidKey> {
        let key = key.into();
        validate_key(&key)?;
        self.segments.push(key);
        Ok(self)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

fn validate_key(key: &str) -> Result<(), InvalidKey> {
    if key.is_empty() {
        return Err(InvalidKey::Empty);
    }
    if key.len() > MAX_KEY_BYTES {
        return Err(InvalidKey::TooLong { len: key.len() });
    }
    match key
        .chars()
        .find(|c| FORBIDDEN_KEY_CHARS.contains(c) || c.is_ascii_control())
    {
        Some(found) => Err(InvalidKey::ForbiddenCharacter {
            key: key.to_string(),
            found,
        }),
        None => Ok(()),
    }
}
