use std::fmt::Debug;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::Context;
use fs_err::File;
use serde::{Deserialize, Serialize};

pub fn read_json<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path> + Debug) -> anyhow::Result<T> {
    let file = File::open(path.as_ref())?;
    serde_json::from_reader(BufReader::new(file)).with_context(|| {
        format!(
            "While trying to parse {path:?} as {}",
            std::any::type_name::<T>()
        )
    })
}

pub fn write_json<T: Serialize>(path: impl AsRef<Path> + Debug, value: &T) -> anyhow::Result<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer(BufWriter::new(file), value)
        .with_context(|| format!("While trying to write {path:?}"))
}
