use std::path::Path;

use anyhow::Context;
use itertools::Itertools;
use log::{info, warn};

use crate::chrono_util::utc_to_jst;
use crate::fs_json_util::write_json;
use crate::igc::IgcFile;
use crate::schema::{DocumentPoint, Track, TrackDocument};

/// Converts exported tracklogs into the viewer document
/// `<out_dir>/<date>.json`.
pub fn convert_tracks(date: &str, tracks: &[Track], out_dir: &Path) -> anyhow::Result<()> {
    let documents: Vec<_> = tracks.iter().map(to_document).try_collect()?;
    let path = out_dir.join(format!("{date}.json"));
    write_json(&path, &documents)?;
    info!("Converted {} tracks into {:?}", documents.len(), path);
    Ok(())
}

pub fn to_document(track: &Track) -> anyhow::Result<TrackDocument> {
    let entry = track.entry();
    let igc = IgcFile::parse(track.igc())
        .with_context(|| format!("While parsing the tracklog of {}", entry.pilot_name()))?;
    if igc.fixes.is_empty() {
        warn!("The tracklog of {} contains no fixes", entry.pilot_name());
    }
    // The listing is authoritative for the pilot name; the header entry of
    // the tracklog is only a fallback.
    let pilotname = match entry.pilot_name().as_str() {
        "" => igc.pilot.unwrap_or_default(),
        name => name.to_owned(),
    };
    let track_points = igc
        .fixes
        .iter()
        .map(|fix| DocumentPoint {
            time: utc_to_jst(fix.time),
            latitude: fix.latitude,
            longitude: fix.longitude,
            altitude: fix.altitude,
        })
        .collect();
    Ok(TrackDocument {
        pilotname,
        distance: format!("{:.2} km", entry.distance().get()),
        activity: entry.activity().to_string(),
        area: entry.area().as_ref().map(ToString::to_string),
        track_points,
    })
}
