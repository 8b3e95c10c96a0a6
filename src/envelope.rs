use std::str::FromStr;

use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;

use crate::errors::CodecError;
use crate::media::{UserInfo, VideoInfo};
use crate::{finite, nullable};
use crate::relationships::{ObjectId, Relationships};
use crate::timestamp::Timestamp;

/// Wire name of the discriminant.
pub const TYPE_KEY: &str = "type";

/// Wire name of the air date, the only timestamp in an envelope.
pub const AIR_DATE_KEY: &str = "airDate";

/// The envelope kinds that can be encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// A scheduled airing: when, for how long, and what got recorded.
    MovieAiring,

    /// A catalog entry describing the film itself.
    Movie,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::MovieAiring, Variant::Movie];

    /// The discriminant string the service uses.
    pub fn tag(self) -> &'static str {
        match self {
            Variant::MovieAiring => "recMovieAiring",
            Variant::Movie => "recMovie",
        }
    }
}

impl FromStr for Variant {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .iter()
            .copied()
            .find(|variant| variant.tag() == s)
            .ok_or_else(|| CodecError::UnknownVariant(s.to_owned()))
    }
}

/// The `jsonForClient` payload shared by every recording kind.
///
/// Decoding fills whichever fields are present regardless of `type`;
/// encoding emits only the field set of the variant `type` names.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Envelope {
    pub title: Option<String>,
    pub plot: Option<String>,

    /// Running time in seconds.
    pub runtime: Option<i64>,

    pub mpaa_rating: Option<String>,
    pub release_year: Option<i32>,

    #[serde(deserialize_with = "nullable::deserialize")]
    pub cast: Vec<String>,

    #[serde(deserialize_with = "nullable::deserialize")]
    pub directors: Vec<String>,

    /// Critics' rating between 0 and 1.
    pub quality_rating: Option<f64>,

    #[serde(deserialize_with = "nullable::deserialize")]
    pub relationships: Relationships,

    /// The discriminant; empty when the service sent none.
    #[serde(rename = "type", deserialize_with = "nullable::deserialize")]
    pub kind: String,

    #[serde(rename = "objectID")]
    pub object_id: Option<ObjectId>,

    pub air_date: Option<Timestamp>,

    /// Scheduled length in seconds.
    pub schedule_duration: Option<f64>,

    pub video: Option<VideoInfo>,
    pub user: Option<UserInfo>,

    // Episode and series fields; decoded, never encoded.
    pub description: Option<String>,
    pub episode_number: Option<i32>,
    pub season_number: Option<i32>,
    pub original_air_date: Option<String>,
    #[serde(deserialize_with = "nullable::deserialize")]
    pub qualifiers: Vec<String>,
    pub duration: Option<i64>,
}

impl Envelope {
    /// Creates the envelope of a scheduled movie airing.
    pub fn movie_airing(
        object_id: ObjectId,
        air_date: Timestamp,
        schedule_duration: f64,
        relationships: Relationships,
        video: VideoInfo,
        user: UserInfo,
    ) -> Self {
        Envelope {
            kind: Variant::MovieAiring.tag().to_owned(),
            object_id: Some(object_id),
            air_date: Some(air_date),
            schedule_duration: Some(schedule_duration),
            relationships,
            video: Some(video),
            user: Some(user),
            ..Default::default()
        }
    }

    /// Creates a movie catalog envelope with only its required fields set.
    pub fn movie(object_id: ObjectId, title: impl Into<String>) -> Self {
        Envelope {
            kind: Variant::Movie.tag().to_owned(),
            object_id: Some(object_id),
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Whether the service sent a discriminant at all.
    pub fn is_present(&self) -> bool {
        !self.kind.is_empty()
    }

    pub fn variant(&self) -> Result<Variant, CodecError> {
        self.kind.parse()
    }

    /// Selects the fields the variant emits, in wire order.
    pub(crate) fn fields(&self) -> Result<Fields<'_>, CodecError> {
        let variant = self.variant()?;
        let tag = variant.tag();
        let required = |field: &'static str| CodecError::missing(tag, field);

        let fields = match variant {
            Variant::MovieAiring => Fields::MovieAiring(MovieAiringFields {
                kind: tag,
                object_id: self.object_id.ok_or_else(|| required("objectID"))?,
                air_date: self.air_date.ok_or_else(|| required(AIR_DATE_KEY))?,
                schedule_duration: self
                    .schedule_duration
                    .ok_or_else(|| required("scheduleDuration"))?,
                relationships: &self.relationships,
                video: self.video.as_ref().ok_or_else(|| required("video"))?,
                user: self.user.as_ref().ok_or_else(|| required("user"))?,
            }),
            Variant::Movie => Fields::Movie(MovieFields {
                title: self.title.as_deref().ok_or_else(|| required("title"))?,
                plot: self.plot.as_deref(),
                runtime: self.runtime,
                mpaa_rating: self.mpaa_rating.as_deref(),
                release_year: self.release_year,
                cast: &self.cast,
                directors: &self.directors,
                quality_rating: self.quality_rating,
                relationships: &self.relationships,
                kind: tag,
                object_id: self.object_id.ok_or_else(|| required("objectID"))?,
            }),
        };

        Ok(fields)
    }

    /// Encodes to JSON text.
    pub fn encode(&self) -> Result<String, CodecError> {
        let fields = self.fields()?;

        serde_json::to_string(&fields).map_err(|source| CodecError::Serialization { source })
    }

    /// Encodes to a generic JSON tree.
    pub fn to_tree(&self) -> Result<Value, CodecError> {
        let fields = self.fields()?;

        serde_json::to_value(&fields).map_err(|source| CodecError::Serialization { source })
    }

    /// Decodes JSON text, reporting a bad air date as such rather than as a
    /// shape error.
    pub fn decode(json: &str) -> Result<Self, CodecError> {
        let tree: Value = serde_json::from_str(json).map_err(CodecError::from_json)?;

        Envelope::from_tree(tree)
    }

    pub fn from_tree(tree: Value) -> Result<Self, CodecError> {
        check_air_date(&tree)?;

        serde_json::from_value(tree).map_err(CodecError::from_json)
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields()
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

/// Validates the air date of an undecoded envelope, if it has a textual one.
pub(crate) fn check_air_date(envelope: &Value) -> Result<(), CodecError> {
    if let Some(text) = envelope.get(AIR_DATE_KEY).and_then(Value::as_str) {
        text.parse::<Timestamp>()?;
    }

    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum Fields<'a> {
    MovieAiring(MovieAiringFields<'a>),
    Movie(MovieFields<'a>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MovieAiringFields<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "objectID")]
    object_id: ObjectId,
    air_date: Timestamp,
    #[serde(serialize_with = "finite::serialize")]
    schedule_duration: f64,
    relationships: &'a Relationships,
    video: &'a VideoInfo,
    user: &'a UserInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MovieFields<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    plot: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    runtime: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mpaa_rating: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_year: Option<i32>,
    cast: &'a [String],
    directors: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "three_places")]
    quality_rating: Option<f64>,
    relationships: &'a Relationships,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "objectID")]
    object_id: ObjectId,
}

/// Writes a rating the way the service does, e.g. `0.250`.
fn three_places<S: Serializer>(rating: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match rating {
        Some(rating) if rating.is_finite() => {
            let raw = RawValue::from_string(format!("{:.3}", rating)).map_err(ser::Error::custom)?;
            raw.serialize(serializer)
        }
        Some(rating) => Err(ser::Error::custom(format!("quality rating {} is not a number", rating))),
        None => serializer.serialize_none(),
    }
}
