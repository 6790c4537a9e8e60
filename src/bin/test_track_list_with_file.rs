use std::path::PathBuf;

use clap::Parser;
use scraper::Html;
use track_loader::api::DEFAULT_LIST_URL;
use track_loader::parser::track_list;
use url::Url;

#[derive(Parser)]
struct Opts {
    html_file: PathBuf,
    #[arg(long, default_value = DEFAULT_LIST_URL)]
    list_url: Url,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let html = Html::parse_document(&fs_err::read_to_string(&opts.html_file)?);
    let entries = track_list::parse(&html, &opts.list_url)?;
    for entry in &entries {
        println!(
            "{}\t{:.2} km\t{}\t{}",
            entry.pilot_name(),
            entry.distance().get(),
            entry.activity(),
            entry.igc_url(),
        );
    }
    println!("{} tracks found.", entries.len());
    Ok(())
}
