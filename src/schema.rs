use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize, Serializer};
use typed_builder::TypedBuilder;
use url::Url;

#[derive(Clone, PartialEq, Eq, Debug, derive_more::Display, derive_more::From, Serialize, Deserialize)]
pub struct PilotName(String);

impl PilotName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, derive_more::From, derive_more::Into, Serialize, Deserialize)]
pub struct DistanceKm(f64);

impl DistanceKm {
    pub fn get(self) -> f64 {
        self.0
    }
}

#[derive(Clone, PartialEq, Eq, Debug, derive_more::Display, derive_more::From, Serialize, Deserialize)]
pub struct Activity(String);

#[derive(Clone, PartialEq, Eq, Debug, derive_more::Display, derive_more::From, Serialize, Deserialize)]
pub struct AreaName(String);

/// One row of the daily flight listing.
#[derive(Clone, PartialEq, Debug, TypedBuilder, Getters, CopyGetters, Serialize, Deserialize)]
pub struct TrackEntry {
    #[getset(get = "pub")]
    pilot_name: PilotName,
    #[getset(get_copy = "pub")]
    distance: DistanceKm,
    #[getset(get = "pub")]
    activity: Activity,
    #[getset(get = "pub")]
    #[builder(default)]
    area: Option<AreaName>,
    #[getset(get = "pub")]
    igc_url: Url,
}

/// A listing entry together with the raw IGC tracklog downloaded for it.
/// This is the value that flows from the export step to the convert step.
#[derive(Clone, PartialEq, Debug, TypedBuilder, Getters)]
pub struct Track {
    #[getset(get = "pub")]
    entry: TrackEntry,
    #[getset(get = "pub")]
    igc: String,
}

/// A single GPS fix.  The time is UTC, as recorded in the tracklog.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TrackPoint {
    pub time: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// The per-track element of the JSON document served to the viewer.
#[derive(Debug, Serialize)]
pub struct TrackDocument {
    pub pilotname: String,
    pub distance: String,
    pub activity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    pub track_points: Vec<DocumentPoint>,
}

/// A fix as the viewer expects it: a 4-element array of
/// `[rfc3339 time, latitude, longitude, altitude]`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DocumentPoint {
    pub time: DateTime<FixedOffset>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Serialize for DocumentPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let time = self.time.to_rfc3339_opts(SecondsFormat::Secs, false);
        (time, self.latitude, self.longitude, self.altitude).serialize(serializer)
    }
}
