use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use track_loader::api::{TrackSourceClient, DEFAULT_LIST_URL};
use track_loader::convert::convert_tracks;
use track_loader::export::export_tracks;
use url::Url;

#[derive(Parser)]
struct Opts {
    /// Target date, e.g. 2023-05-01
    date: Option<String>,
    /// Directory the tracklogs and viewer documents are written to
    #[arg(long, default_value = "tracks")]
    output_dir: PathBuf,
    /// Flight listing endpoint
    #[arg(long, default_value = DEFAULT_LIST_URL)]
    list_url: Url,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    pretty_env_logger::init();
    let status = run(Opts::parse()).await?;
    Ok(ExitCode::from(status))
}

async fn run(opts: Opts) -> anyhow::Result<u8> {
    let Some(date) = opts.date else {
        println!("Please specify the target date");
        return Ok(1);
    };
    let client = TrackSourceClient::new(opts.list_url)?;
    let tracks = export_tracks(&client, &date, &opts.output_dir).await?;
    convert_tracks(&date, &tracks, &opts.output_dir)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{run, Opts};

    #[tokio::test]
    async fn missing_date_exits_with_status_1() {
        let opts = Opts::try_parse_from(["track-loader"]).unwrap();
        assert_eq!(run(opts).await.unwrap(), 1);
    }

    #[test]
    fn date_is_taken_from_the_first_positional_argument() {
        let opts = Opts::try_parse_from(["track-loader", "2023-05-01"]).unwrap();
        assert_eq!(opts.date.as_deref(), Some("2023-05-01"));
    }

    #[tokio::test]
    async fn failed_export_leaves_no_viewer_document() {
        let out_dir = std::env::temp_dir().join("track-loader-failed-export-test");
        let _ = fs_err::remove_dir_all(&out_dir);
        // Port 9 (discard) is not served; the listing fetch fails before
        // anything is written.
        let opts = Opts::try_parse_from([
            "track-loader",
            "2023-05-01",
            "--output-dir",
            out_dir.to_str().unwrap(),
            "--list-url",
            "http://127.0.0.1:9/",
        ])
        .unwrap();
        assert!(run(opts).await.is_err());
        assert!(!out_dir.join("2023-05-01.json").exists());
    }
}
