//! The closed set of moods a recommendation can be requested for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Chill,
}

impl Mood {
    /// Display order of the mood picker.
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Sad, Mood::Energetic, Mood::Chill];

    /// Lowercase token sent as the `mood` query parameter.
    pub fn token(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Energetic => "energetic",
            Self::Chill => "chill",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Sad => "Sad",
            Self::Energetic => "Energetic",
            Self::Chill => "Chill",
        }
    }

    /// Position in [`Mood::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&m| m == self).unwrap_or(0)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mood: {0:?}")]
pub struct UnknownMood(pub String);

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.token().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_and_tokens() {
        let tokens: Vec<&str> = Mood::ALL.iter().map(|m| m.token()).collect();
        assert_eq!(tokens, ["happy", "sad", "energetic", "chill"]);
        let labels: Vec<&str> = Mood::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels, ["Happy", "Sad", "Energetic", "Chill"]);
    }

    #[test]
    fn test_token_is_lowercase_label() {
        for mood in Mood::ALL {
            assert_eq!(mood.token(), mood.label().to_lowercase());
            assert_eq!(Mood::ALL[mood.index()], mood);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("chill".parse::<Mood>(), Ok(Mood::Chill));
        assert_eq!("Energetic".parse::<Mood>(), Ok(Mood::Energetic));
        assert!("angry".parse::<Mood>().is_err());
    }

    #[test]
    fn test_serde_uses_token() {
        assert_eq!(serde_json::to_string(&Mood::Sad).unwrap(), "\"sad\"");
        let m: Mood = serde_json::from_str("\"happy\"").unwrap();
        assert_eq!(m, Mood::Happy);
    }
}
