//! Wire models exchanged with the upstream booking backend.
//!
//! Field names follow the backend's JSON (`barberoId`, `horaEntrada`, ...);
//! English camelCase aliases are accepted on input.

pub mod appointment;
pub mod auth;
pub mod availability;
pub mod catalog;

use serde::{de::IgnoredAny, Deserialize, Deserializer};
use tracing::warn;

use crate::time::{self, MINUTES_PER_DAY};

/// A time of day as the backend may encode it in slot lists.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSlot {
    Text(String),
    Pair(u32, u32),
    Fields {
        hour: u32,
        #[serde(default)]
        minute: u32,
    },
    Other(IgnoredAny),
}

impl RawSlot {
    fn minute_of_day(&self) -> Option<u32> {
        match self {
            Self::Text(raw) => time::parse_24h(raw).ok(),
            Self::Pair(hour, minute) | Self::Fields { hour, minute } => {
                (*hour < 24 && *minute < 60).then(|| *hour * 60 + *minute)
            }
            Self::Other(_) => None,
        }
    }
}

/// Reads a slot list of `"HH:MM[:SS]"` strings, `[h, m]` pairs or
/// `{hour, minute}` objects into `"HH:MM"` strings.
///
/// `null` reads as an empty list; entries in any other shape are dropped
/// with a warning.
pub(crate) fn slot_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<RawSlot>>::deserialize(deserializer)?.unwrap_or_default();

    Ok(raw
        .into_iter()
        .filter_map(|slot| match slot.minute_of_day() {
            Some(minute) if minute < MINUTES_PER_DAY => Some(time::format_24h(minute)),
            _ => {
                warn!(slot = ?slot, "Dropping slot in unknown format");
                None
            }
        })
        .collect())
}
