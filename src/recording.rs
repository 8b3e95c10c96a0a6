use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::ser::{self, SerializeMap, Serializer};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::envelope::{self, Envelope, Fields};
use crate::errors::{CodecError, ConfigError};
use crate::media::Images;

/// Wire name of the envelope inside a listing.
const DETAILS_KEY: &str = "jsonForClient";

/// The kinds of listing a recording can bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Episode,
    Series,
    Season,
    MovieAiring,
    Movie,
}

impl Slot {
    /// Every slot, in the order they're encoded.
    pub const ALL: [Slot; 5] = [
        Slot::Episode,
        Slot::Series,
        Slot::Season,
        Slot::MovieAiring,
        Slot::Movie,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Slot::Episode => "recEpisode",
            Slot::Series => "recSeries",
            Slot::Season => "recSeason",
            Slot::MovieAiring => "recMovieAiring",
            Slot::Movie => "recMovie",
        }
    }

    /// Seasons are the only listings without artwork.
    pub fn carries_images(self) -> bool {
        self != Slot::Season
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Common access to the two listing shapes.
pub trait Container {
    fn details(&self) -> &Envelope;

    fn images(&self) -> Option<&Images>;

    fn is_present(&self) -> bool {
        self.details().is_present()
    }
}

/// An envelope together with its artwork.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Listing {
    #[serde(rename = "jsonForClient", default)]
    pub details: Envelope,

    #[serde(rename = "imageJson", default, deserialize_with = "crate::nullable::deserialize")]
    pub images: Images,
}

impl Listing {
    pub fn new(details: Envelope, images: impl Into<Images>) -> Self {
        Listing {
            details,
            images: images.into(),
        }
    }
}

impl Container for Listing {
    fn details(&self) -> &Envelope {
        &self.details
    }

    fn images(&self) -> Option<&Images> {
        Some(&self.images)
    }
}

/// A season's envelope; seasons come without artwork.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SeasonListing {
    #[serde(rename = "jsonForClient", default)]
    pub details: Envelope,
}

impl SeasonListing {
    pub fn new(details: Envelope) -> Self {
        SeasonListing { details }
    }
}

impl Container for SeasonListing {
    fn details(&self) -> &Envelope {
        &self.details
    }

    fn images(&self) -> Option<&Images> {
        None
    }
}

/// A recording as the service describes it: up to one listing of each
/// kind.
///
/// A slot only counts as filled when its envelope has a `type`; decoding
/// leaves slots without one empty, and encoding skips them.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Recording {
    #[serde(rename = "recEpisode", default, deserialize_with = "present")]
    pub episode: Option<Listing>,

    #[serde(rename = "recSeries", default, deserialize_with = "present")]
    pub series: Option<Listing>,

    #[serde(rename = "recSeason", default, deserialize_with = "present")]
    pub season: Option<SeasonListing>,

    #[serde(rename = "recMovieAiring", default, deserialize_with = "present")]
    pub movie_airing: Option<Listing>,

    #[serde(rename = "recMovie", default, deserialize_with = "present")]
    pub movie: Option<Listing>,
}

/// What to do when one slot of a recording fails to encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodePolicy {
    /// Fail the whole recording.
    Abort,

    /// Leave the slot out and report it in [`Encoded::skipped`].
    SkipFailed,
}

impl Default for EncodePolicy {
    fn default() -> Self {
        EncodePolicy::Abort
    }
}

impl FromStr for EncodePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "abort" => Ok(EncodePolicy::Abort),
            "skip" => Ok(EncodePolicy::SkipFailed),
            other => Err(ConfigError::InvalidValue {
                name: "encode policy",
                value: other.to_owned(),
            }),
        }
    }
}

impl Recording {
    pub fn container(&self, slot: Slot) -> Option<&dyn Container> {
        match slot {
            Slot::Episode => self.episode.as_ref().map(|l| l as &dyn Container),
            Slot::Series => self.series.as_ref().map(|l| l as &dyn Container),
            Slot::Season => self.season.as_ref().map(|l| l as &dyn Container),
            Slot::MovieAiring => self.movie_airing.as_ref().map(|l| l as &dyn Container),
            Slot::Movie => self.movie.as_ref().map(|l| l as &dyn Container),
        }
    }

    /// Filled slots, in encoding order.
    pub fn slots(&self) -> impl Iterator<Item = (Slot, &Envelope)> + '_ {
        Slot::ALL.iter().filter_map(move |&slot| {
            self.container(slot)
                .filter(|container| container.is_present())
                .map(|container| (slot, container.details()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.slots().next().is_none()
    }

    /// Decodes JSON text.
    pub fn decode(json: &str) -> Result<Self, CodecError> {
        let tree: Value = serde_json::from_str(json).map_err(CodecError::from_json)?;

        Recording::from_tree(tree)
    }

    /// Decodes a generic JSON tree.
    pub fn from_tree(tree: Value) -> Result<Self, CodecError> {
        if !tree.is_object() {
            return Err(CodecError::Shape {
                source: de::Error::custom("a recording must be a JSON object"),
            });
        }

        for slot in Slot::ALL.iter() {
            if let Some(details) = tree.get(slot.key()).and_then(|listing| listing.get(DETAILS_KEY)) {
                envelope::check_air_date(details)?;
            }
        }

        serde_json::from_value(tree).map_err(CodecError::from_json)
    }

    /// Encodes to JSON text, failing on the first slot that can't be encoded.
    pub fn encode(&self) -> Result<String, CodecError> {
        self.prepare(EncodePolicy::Abort)?.to_string()
    }

    /// Encodes to a generic JSON tree, failing on the first slot that can't
    /// be encoded.
    pub fn to_tree(&self) -> Result<Value, CodecError> {
        self.prepare(EncodePolicy::Abort)?.to_tree()
    }

    /// Selects the fields of every filled slot, ready to be written out.
    pub fn prepare(&self, policy: EncodePolicy) -> Result<Encoded<'_>, CodecError> {
        let mut encoded = Encoded::default();

        for &slot in Slot::ALL.iter() {
            let container = match self.container(slot) {
                Some(container) if container.is_present() => container,
                _ => continue,
            };

            match container.details().fields() {
                Ok(details) => encoded.listings.push((
                    slot,
                    ListingFields {
                        details,
                        images: container.images(),
                    },
                )),
                Err(e) if policy == EncodePolicy::SkipFailed => encoded.skipped.push((slot, e)),
                Err(e) => return Err(e),
            }
        }

        Ok(encoded)
    }
}

impl Serialize for Recording {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.prepare(EncodePolicy::Abort)
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

/// A recording whose slots have been checked against their variants.
#[derive(Debug, Default)]
pub struct Encoded<'a> {
    listings: Vec<(Slot, ListingFields<'a>)>,
    skipped: Vec<(Slot, CodecError)>,
}

impl<'a> Encoded<'a> {
    /// Slots that will be written, in order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.listings.iter().map(|(slot, _)| *slot)
    }

    /// Slots left out under [`EncodePolicy::SkipFailed`], with the reason.
    pub fn skipped(&self) -> &[(Slot, CodecError)] {
        &self.skipped
    }

    pub fn to_string(&self) -> Result<String, CodecError> {
        serde_json::to_string(self).map_err(|source| CodecError::Serialization { source })
    }

    pub fn to_string_pretty(&self) -> Result<String, CodecError> {
        serde_json::to_string_pretty(self).map_err(|source| CodecError::Serialization { source })
    }

    pub fn to_tree(&self) -> Result<Value, CodecError> {
        serde_json::to_value(self).map_err(|source| CodecError::Serialization { source })
    }
}

impl<'a> Serialize for Encoded<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.listings.len()))?;

        for (slot, listing) in &self.listings {
            map.serialize_entry(slot.key(), listing)?;
        }

        map.end()
    }
}

#[derive(Debug, Serialize)]
struct ListingFields<'a> {
    #[serde(rename = "jsonForClient")]
    details: Fields<'a>,

    #[serde(rename = "imageJson", skip_serializing_if = "Option::is_none")]
    images: Option<&'a Images>,
}

/// Reads a listing, keeping it only if its envelope has a `type`.
fn present<'de, D, C>(deserializer: D) -> Result<Option<C>, D::Error>
where
    D: Deserializer<'de>,
    C: Deserialize<'de> + Container,
{
    let container: Option<C> = Deserialize::deserialize(deserializer)?;
    Ok(container.filter(|c| c.is_present()))
}
