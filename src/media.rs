use serde::{Deserialize, Serialize};

use crate::{finite, nullable};

/// The state of the recorded file on the DVR.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    /// Recording state, e.g. `finished` or `recording`.
    pub state: String,

    /// Size of the file in bytes.
    pub size: u64,

    pub width: u32,
    pub height: u32,

    /// Length of the recording in seconds.
    #[serde(serialize_with = "finite::serialize")]
    pub duration: f64,

    /// Seconds the recording started relative to the scheduled start.
    #[serde(serialize_with = "finite::serialize")]
    pub schedule_offset_start: f64,

    /// Seconds the recording ended relative to the scheduled end.
    #[serde(serialize_with = "finite::serialize")]
    pub schedule_offset_end: f64,
}

/// Per-user state of a recording.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct UserInfo {
    #[serde(rename = "type")]
    pub kind: String,

    pub watched: bool,

    /// Whether the recording is protected from automatic deletion.
    pub protected: bool,

    /// Playback position in seconds.
    #[serde(serialize_with = "finite::serialize")]
    pub position: f64,
}

/// A single piece of artwork attached to a recording.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(rename = "imageID")]
    pub id: i64,

    pub image_type: String,
    pub image_style: String,
}

/// The `imageJson` object of a listing.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Images {
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub images: Vec<Image>,
}

impl From<Vec<Image>> for Images {
    fn from(images: Vec<Image>) -> Self {
        Images { images }
    }
}
