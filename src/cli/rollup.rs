use anyhow::{Context, Result};

use jobatlas::dataset::{DataPaths, Snapshot};
use jobatlas::model::{MetricKind, PeriodRange};
use jobatlas::report;
use jobatlas::schema::TableKind;

/// Print per-state density rollups
pub fn run(
    paths: DataPaths,
    range: Option<PeriodRange>,
    metric: MetricKind,
    frames: bool,
    json: bool,
) -> Result<()> {
    let snapshot = Snapshot::load(&paths.only(&[TableKind::Density]))
        .context("Failed to load the density table")?;

    if frames {
        let frames = snapshot.rollup_frames(range, metric)?;
        if json {
            println!("{}", report::to_json(&frames)?);
        } else {
            print!("{}", report::render_frames(&frames));
        }
    } else {
        let rollup = snapshot.rollup(range, metric)?;
        if json {
            println!("{}", report::to_json(&rollup)?);
        } else {
            print!("{}", report::render_rollup(&rollup));
        }
    }

    Ok(())
}
