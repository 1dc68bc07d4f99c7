//! Opaque continuation cursors.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors raised while encoding or decoding a cursor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The cursor text is not valid URL-safe base64.
    #[error("cursor is not valid base64: {message}")]
    Encoding {
        /// Decoder failure description.
        message: String,
    },
    /// The decoded bytes do not describe a key of the expected shape.
    #[error("cursor payload is malformed: {message}")]
    Payload {
        /// Serialisation failure description.
        message: String,
    },
}

/// Position marker pointing just past the last item of a page.
///
/// # Examples
/// ```
/// use pagination::Cursor;
///
/// let cursor = Cursor::new((7_i64, "b".to_owned()));
/// let encoded = cursor.encode().expect("tuples serialise");
/// let decoded: Cursor<(i64, String)> = Cursor::decode(&encoded).expect("round trip");
/// assert_eq!(decoded, cursor);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor<K> {
    key: K,
}

impl<K> Cursor<K> {
    /// Wrap an ordering key.
    #[must_use]
    pub const fn new(key: K) -> Self {
        Self { key }
    }

    /// Borrow the ordering key.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Consume the cursor and return its key.
    #[must_use]
    pub fn into_inner(self) -> K {
        self.key
    }
}

impl<K: Serialize> Cursor<K> {
    /// Encode the key as URL-safe base64 JSON.
    ///
    /// # Errors
    /// Returns [`CursorError::Payload`] when the key cannot be serialised.
    pub fn encode(&self) -> Result<String, CursorError> {
        let bytes = serde_json::to_vec(&self.key).map_err(|err| CursorError::Payload {
            message: err.to_string(),
        })?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}

impl<K: DeserializeOwned> Cursor<K> {
    /// Decode a cursor produced by [`Cursor::encode`].
    ///
    /// # Errors
    /// Returns [`CursorError::Encoding`] for malformed base64 and
    /// [`CursorError::Payload`] when the JSON does not match `K`.
    pub fn decode(value: &str) -> Result<Self, CursorError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(value)
            .map_err(|err| CursorError::Encoding {
                message: err.to_string(),
            })?;
        let key = serde_json::from_slice(&bytes).map_err(|err| CursorError::Payload {
            message: err.to_string(),
        })?;
        Ok(Self { key })
    }
}
