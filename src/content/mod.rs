//! Pure content derivations shared by editors and handlers.

pub mod lists;
pub mod reading_time;
pub mod slug;
pub mod tags;
pub mod text;

use crate::constants::{WORDS_PER_MINUTE_EN, WORDS_PER_MINUTE_NL};
use serde::{Deserialize, Serialize};

/// Content language of a bilingual field pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Nl,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Nl => "nl",
            Language::En => "en",
        }
    }

    /// Reading speed used for the reading-time estimate.
    pub fn words_per_minute(self) -> usize {
        match self {
            Language::Nl => WORDS_PER_MINUTE_NL,
            Language::En => WORDS_PER_MINUTE_EN,
        }
    }
}

impl std::str::FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nl" => Ok(Language::Nl),
            "en" => Ok(Language::En),
            _ => Err(()),
        }
    }
}
