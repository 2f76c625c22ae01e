//! The 4-character room identifier (§3, §6).

use std::fmt::Display;

/// Symbols a `RoomCode` is drawn from. Omits `I, O, 0, 1` to reduce
/// transcription error when a code is read aloud or copied by hand.
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// A 4-character room code, e.g. `ABCD`. Distinct from [`crate::ID`]: it is
/// not a UUID, just a short human-transcribable string drawn from
/// [`ALPHABET`]. Uniqueness is enforced by the process-wide room registry
/// at creation time, not by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomCode([u8; 4]);

/// A string was the wrong length or contained a symbol outside [`ALPHABET`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRoomCode;

impl Display for InvalidRoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room code must be 4 characters from the tabula alphabet")
    }
}
impl std::error::Error for InvalidRoomCode {}

impl RoomCode {
    /// Draw a fresh random code. Collision with an existing room is the
    /// registry's concern (§5: "touched only at room creation/destruction").
    pub fn random() -> Self {
        let mut bytes = [0u8; 4];
        for b in bytes.iter_mut() {
            let idx = rand::random_range(0..ALPHABET.len());
            *b = ALPHABET[idx];
        }
        Self(bytes)
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).expect("alphabet is ASCII")
    }
}

impl Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for RoomCode {
    type Error = InvalidRoomCode;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let upper = s.to_ascii_uppercase();
        let bytes = upper.as_bytes();
        if bytes.len() != 4 || !bytes.iter().all(|b| ALPHABET.contains(b)) {
            return Err(InvalidRoomCode);
        }
        let mut out = [0u8; 4];
        out.copy_from_slice(bytes);
        Ok(Self(out))
    }
}

impl TryFrom<String> for RoomCode {
    type Error = InvalidRoomCode;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_from(s.as_str())
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_codes_use_only_the_alphabet() {
        for _ in 0..64 {
            let code = RoomCode::random();
            assert!(code.as_str().bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(RoomCode::try_from("AB").is_err());
        assert!(RoomCode::try_from("ABCDE").is_err());
    }

    #[test]
    fn rejects_excluded_symbols() {
        for bad in ["ABCI", "ABCO", "ABC0", "ABC1"] {
            assert!(RoomCode::try_from(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn lowercase_is_normalized() {
        assert_eq!(RoomCode::try_from("abcd").unwrap(), RoomCode::try_from("ABCD").unwrap());
    }
}
