use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info};

use jobatlas::animation::{frame_duration_ms, Playback, ANIMATION_TOTAL_MS};
use jobatlas::dataset::{DataPaths, Snapshot};
use jobatlas::model::{MetricKind, PeriodRange};
use jobatlas::report;
use jobatlas::schema::TableKind;

/// Play the year animation over the density table
pub fn run(
    paths: DataPaths,
    range: Option<PeriodRange>,
    ticks: Option<usize>,
    metric: MetricKind,
    interval_ms: Option<u64>,
) -> Result<()> {
    let snapshot = Snapshot::load(&paths.only(&[TableKind::Density]))
        .context("Failed to load the density table")?;

    let years = snapshot.available_years()?;
    let (Some(&first), Some(&last)) = (years.first(), years.last()) else {
        anyhow::bail!("The density table has no years to animate");
    };
    let selection = range.unwrap_or(PeriodRange { start: first, end: last });

    let mut playback = Playback::new(years, selection);
    playback.toggle();
    let cycle = playback.pool().map_or(0, <[i32]>::len);
    let ticks = ticks.unwrap_or(cycle);

    info!(
        "Animating {} ticks over {} years ({} ms per frame when autoplaying)",
        ticks,
        cycle,
        frame_duration_ms(cycle, ANIMATION_TOTAL_MS)
    );

    for tick in 0..ticks {
        let Some(year) = playback.tick() else {
            break;
        };
        debug!("Tick {} -> {}", tick + 1, year);

        let frame = snapshot.rollup(Some(PeriodRange::single(year)), metric)?;
        let leader = frame.iter().max_by(|a, b| a.value.total_cmp(&b.value));
        match leader {
            Some(top) => println!(
                "{}  {} states, top {} {}",
                year,
                frame.len(),
                top.entity,
                report::percent(top.value)
            ),
            None => println!("{}  no rows", year),
        }

        if let Some(ms) = interval_ms {
            thread::sleep(Duration::from_millis(ms));
        }
    }

    playback.toggle();
    info!("Playback {} at {}", playback.state(), playback.selection());
    Ok(())
}
