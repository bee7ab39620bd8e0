use std::{
    fmt::{self, Display},
    str::FromStr,
};

use sha2::{Digest as _, Sha256};

/// A 32-byte seed that reproduces a generated grid.
///
/// The text form is 64 lowercase hexadecimal digits; parsing also accepts
/// uppercase digits.
///
/// # Examples
///
/// ```
/// use cellgrid_generator::GridSeed;
///
/// let seed = GridSeed::from_phrase("daily 2026-10-18");
/// let text = seed.to_string();
/// assert_eq!(text.len(), 64);
/// assert_eq!(text.parse::<GridSeed>().unwrap(), seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSeed([u8; 32]);

impl GridSeed {
    /// Wraps raw seed bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Draws a fresh seed from the thread-local generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Derives a seed from arbitrary text by hashing it with SHA-256.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        Self(Sha256::digest(phrase.as_bytes()).into())
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for GridSeed {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Display for GridSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing a [`GridSeed`] from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridSeedError {
    /// The text does not hold exactly 64 characters.
    #[display("seed must be 64 hex digits, got {len} characters")]
    InvalidLength {
        /// Number of characters found.
        len: usize,
    },
    /// A character is not a hexadecimal digit.
    #[display("invalid hex digit {ch:?} at {index}")]
    InvalidDigit {
        /// The offending character.
        ch: char,
        /// Its character offset.
        index: usize,
    },
}

impl FromStr for GridSeed {
    type Err = ParseGridSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != 64 {
            return Err(ParseGridSeedError::InvalidLength { len });
        }

        let mut bytes = [0; 32];
        let mut nibbles = s.chars().enumerate().map(|(index, ch)| {
            ch.to_digit(16)
                .and_then(|d| u8::try_from(d).ok())
                .ok_or(ParseGridSeedError::InvalidDigit { ch, index })
        });
        for byte in &mut bytes {
            // Length was checked above, so both nibbles are present.
            let high = nibbles.next().transpose()?.unwrap_or(0);
            let low = nibbles.next().transpose()?.unwrap_or(0);
            *byte = (high << 4) | low;
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1";

    #[test]
    fn test_hex_round_trip() {
        let seed = SEED.parse::<GridSeed>().unwrap();
        assert_eq!(seed.as_bytes()[0], 0xc1);
        assert_eq!(seed.as_bytes()[31], 0xf1);
        assert_eq!(seed.to_string(), SEED);
        assert_eq!(SEED.to_uppercase().parse::<GridSeed>().unwrap(), seed);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "abc".parse::<GridSeed>().unwrap_err(),
            ParseGridSeedError::InvalidLength { len: 3 }
        );
        let mut bad = SEED.to_owned();
        bad.replace_range(10..11, "g");
        assert_eq!(
            bad.parse::<GridSeed>().unwrap_err(),
            ParseGridSeedError::InvalidDigit { ch: 'g', index: 10 }
        );
    }

    #[test]
    fn test_from_phrase_is_stable() {
        assert_eq!(
            GridSeed::from_phrase("").to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_ne!(GridSeed::from_phrase("a"), GridSeed::from_phrase("b"));
    }

    #[test]
    fn test_random_seeds_differ() {
        assert_ne!(GridSeed::random(), GridSeed::random());
    }
}
