use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use log::info;

use crate::api::TrackSourceClient;
use crate::fs_json_util::write_json;
use crate::parser::track_list;
use crate::schema::Track;

// Downloads are paced to avoid hammering the listing server.
const DOWNLOAD_INTERVAL: Duration = Duration::from_secs(2);

/// Fetches the flight listing for `date`, downloads every listed tracklog,
/// and persists the raw data under `<out_dir>/<date>/`.
pub async fn export_tracks(
    client: &TrackSourceClient,
    date: &str,
    out_dir: &Path,
) -> anyhow::Result<Vec<Track>> {
    let entries = {
        let html = client.fetch_track_list(date).await?;
        track_list::parse(&html, client.list_url())?
    };
    info!("Found {} tracks on {date}", entries.len());

    let date_dir = out_dir.join(date);
    let igc_dir = date_dir.join("igc");
    fs_err::create_dir_all(&igc_dir)?;
    write_json(date_dir.join("track_list.json"), &entries)?;

    let total = entries.len();
    let mut tracks = Vec::with_capacity(total);
    for (index, entry) in entries.into_iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(DOWNLOAD_INTERVAL).await;
        }
        info!(
            "Downloading the tracklog of {} ({}/{total})",
            entry.pilot_name(),
            index + 1
        );
        let igc = client
            .download_igc(entry.igc_url())
            .await
            .with_context(|| format!("While downloading the tracklog of {}", entry.pilot_name()))?;
        let file_name = format!("{}.igc", sanitize_file_name(entry.pilot_name().as_str()));
        fs_err::write(igc_dir.join(file_name), &igc)?;
        tracks.push(Track::builder().entry(entry).igc(igc).build());
    }
    Ok(tracks)
}

// Pilot names come straight from the listing page and end up as file names.
fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' => '_',
            c => c,
        })
        .collect();
    if sanitized.is_empty() {
        "unknown".to_owned()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_file_name;

    #[test]
    fn sanitizes_pilot_names() {
        assert_eq!(sanitize_file_name("Hken"), "Hken");
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_file_name("Miya Chan"), "Miya_Chan");
        assert_eq!(sanitize_file_name("  "), "unknown");
    }
}
