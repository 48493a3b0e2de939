use std::path::PathBuf;

use anyhow::Context;
use kona::Store;

/// Number of observation rows printed as a sample
const SAMPLE_ROWS: usize = 5;

fn main() -> anyhow::Result<()> {
    // Path to the database, defaulting to the reference dataset location
    let file_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("Resources/hawaii.sqlite"));

    println!("Inspecting climate database: {}", file_path.display());

    let store = Store::open(&file_path).context("Failed to open database")?;
    let session = store.open_session().context("Failed to open session")?;

    match session.verify_schema() {
        Ok(()) => println!("\nSchema: ok"),
        Err(e) => println!("\nSchema: {}", e),
    }

    let summary = session.dataset_summary()?;
    println!("\n=== DATASET ===");
    println!("  Observations: {}", summary.observation_count);
    println!("  Stations:     {}", summary.station_count);
    println!(
        "  Date span:    {} .. {}",
        summary.earliest_date.as_deref().unwrap_or("-"),
        summary.latest_date.as_deref().unwrap_or("-")
    );

    println!("\nStations:");
    for station in session.stations()? {
        println!(
            "  {} {} ({:?}, {:?}) elev {:?}",
            station.station_id,
            station.name.as_deref().unwrap_or("?"),
            station.latitude,
            station.longitude,
            station.elevation
        );
    }

    println!("\nActivity ranking:");
    for (rank, activity) in session.station_activity_ranking()?.iter().enumerate() {
        println!(
            "  {:>2}. {} {} observations",
            rank + 1,
            activity.station_id,
            activity.observations
        );
    }

    println!("\nSample observations:");
    for obs in session.sample_observations(SAMPLE_ROWS)? {
        println!(
            "  {} {} prcp={:?} tobs={:?}",
            obs.date, obs.station_id, obs.precipitation, obs.temperature
        );
    }

    Ok(())
}
