use std::path::PathBuf;

use clap::Parser;
use track_loader::igc::IgcFile;

#[derive(Parser)]
struct Opts {
    igc_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let igc = IgcFile::parse(&fs_err::read_to_string(&opts.igc_file)?)?;
    println!("Pilot: {:?}", igc.pilot);
    println!("Date: {}", igc.date);
    println!("{} fixes", igc.fixes.len());
    for fix in igc.fixes.iter().take(5) {
        println!(
            "  {}  {:+.6}  {:+.6}  {:.0} m",
            fix.time, fix.latitude, fix.longitude, fix.altitude
        );
    }
    Ok(())
}
