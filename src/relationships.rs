use serde::{Deserialize, Deserializer, Serialize};

use crate::nullable;

/// An object ID assigned by the service.
pub type ObjectId = i64;

/// Links from a recording to the objects it belongs to.
///
/// Airings point at their movie and channel, episodes at their season,
/// series and channel, and catalog entries carry genres. Unset links are
/// left out of the encoded object entirely; an ID of `0` is a real ID.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Relationships {
    #[serde(rename = "recMovie", default, deserialize_with = "deserialize_id", skip_serializing_if = "Option::is_none")]
    pub movie: Option<ObjectId>,

    #[serde(rename = "recSeason", default, deserialize_with = "deserialize_id", skip_serializing_if = "Option::is_none")]
    pub season: Option<ObjectId>,

    #[serde(rename = "recSeries", default, deserialize_with = "deserialize_id", skip_serializing_if = "Option::is_none")]
    pub series: Option<ObjectId>,

    #[serde(rename = "recChannel", default, deserialize_with = "deserialize_id", skip_serializing_if = "Option::is_none")]
    pub channel: Option<ObjectId>,

    /// Genre IDs, in the order the service listed them.
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<ObjectId>,
}

impl Relationships {
    /// The links of a movie airing.
    pub fn airing(movie: ObjectId, channel: ObjectId) -> Self {
        Relationships {
            movie: Some(movie),
            channel: Some(channel),
            ..Default::default()
        }
    }

    /// The links of an episode.
    pub fn episode(season: ObjectId, series: ObjectId, channel: ObjectId) -> Self {
        Relationships {
            season: Some(season),
            series: Some(series),
            channel: Some(channel),
            ..Default::default()
        }
    }

    /// The links of a catalog entry that only carries genres.
    pub fn genres(genres: impl IntoIterator<Item = ObjectId>) -> Self {
        Relationships {
            genres: genres.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Relationships::default()
    }
}

/// Reads an ID, treating `null` and negative numbers as unset.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<ObjectId>, D::Error>
where D: Deserializer<'de> {
    let id: Option<ObjectId> = Deserialize::deserialize(deserializer)?;
    Ok(id.filter(|id| *id >= 0))
}
