//! Favourite book entity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Book, UnknownVariant};

/// How far a user has got with a favourited book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    #[default]
    NotStarted,
    Reading,
    Finished,
}

impl ReadingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Reading => "reading",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "reading" => Ok(Self::Reading),
            "finished" => Ok(Self::Finished),
            other => Err(UnknownVariant::new("reading status", other)),
        }
    }
}

/// A `(user, book)` bookmark, read back together with its book.
#[derive(Debug, Clone, PartialEq)]
pub struct FavouriteBook {
    pub id: Uuid,
    pub status: ReadingStatus,
    pub book: Book,
}
