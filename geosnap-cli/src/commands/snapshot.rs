//! Snapshot command - resolve a position and collect elevation, pressure
//! and local time for it.

use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use geosnap::clock::SystemClock;
use geosnap::config::ConfigFile;
use geosnap::elevation::{ElevationCache, OpenElevationClient};
use geosnap::location::{FixedPositionProvider, LocationResolver};
use geosnap::navigation::Screen;
use geosnap::pressure::{IioPressureSensor, PressureReader, PressureSensor, SensorHub};
use geosnap::snapshot::{AcquisitionCoordinator, GeoSnapshot};
use geosnap::store::JsonFileRecordStore;

use super::output::print_snapshot;
use crate::error::CliError;

/// Arguments for the snapshot command.
#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Device altitude in meters, if known
    #[arg(long, allow_hyphen_values = true)]
    pub alt: Option<f64>,

    /// Save the snapshot to the record log under this name
    #[arg(long, value_name = "NAME")]
    pub save: Option<String>,

    /// Skip the barometer
    #[arg(long)]
    pub no_pressure: bool,

    /// Seconds to wait for terrain elevation and pressure
    #[arg(long, default_value = "15")]
    pub timeout_secs: u64,
}

/// Run the snapshot command.
pub fn run(args: SnapshotArgs) -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    let runtime = Runtime::new().map_err(CliError::Runtime)?;
    runtime.block_on(take_snapshot(args, config))
}

async fn take_snapshot(args: SnapshotArgs, config: ConfigFile) -> Result<(), CliError> {
    let elevation_config = config.elevation_config();
    let client = OpenElevationClient::new(&elevation_config).map_err(CliError::ElevationClient)?;
    let elevation = Arc::new(ElevationCache::from_config(client, &elevation_config));

    let sensor: Arc<dyn PressureSensor> = if args.no_pressure {
        Arc::new(SensorHub::unavailable())
    } else {
        Arc::new(IioPressureSensor::discover(
            &config.pressure.sysfs_root,
            config.pressure_poll_interval(),
        ))
    };

    let records_file = config.storage.records_file.clone();
    let store = JsonFileRecordStore::open(&records_file).map_err(|error| CliError::Store {
        path: records_file.clone(),
        error,
    })?;

    let provider = FixedPositionProvider::new(args.lat, args.lon).with_altitude(args.alt);
    let coordinator = AcquisitionCoordinator::new(
        LocationResolver::with_config(provider, config.location_config()),
        elevation,
        PressureReader::new(sensor),
        Arc::new(store),
        Arc::new(SystemClock),
    );

    let result = acquire(&coordinator, &args).await;
    coordinator.shutdown().await;
    let snapshot = result?;

    if let Some(name) = args.save.as_deref() {
        match coordinator
            .save(name)
            .map_err(|error| CliError::Store {
                path: records_file.clone(),
                error,
            })? {
            Some(id) => println!("Saved as record #{}", id),
            None => println!("Nothing to save: no position"),
        }
    }

    if !snapshot.is_settled() {
        println!();
        println!("Some fields did not arrive within {}s.", args.timeout_secs);
    }

    Ok(())
}

/// Refresh, wait for the remaining fields and print the result.
async fn acquire(
    coordinator: &AcquisitionCoordinator<FixedPositionProvider, OpenElevationClient>,
    args: &SnapshotArgs,
) -> Result<GeoSnapshot, CliError> {
    coordinator.refresh().await?;

    let snapshot = match tokio::time::timeout(
        Duration::from_secs(args.timeout_secs),
        coordinator.wait_until_settled(),
    )
    .await
    {
        Ok(snapshot) => snapshot,
        Err(_) => {
            warn!(timeout_secs = args.timeout_secs, "Snapshot did not settle in time");
            coordinator.snapshot()
        }
    };

    if let Some(error) = snapshot.error.clone() {
        return Err(error.into());
    }

    info!(
        latitude = %snapshot.latitude,
        longitude = %snapshot.longitude,
        "Snapshot acquired"
    );

    let title = Screen::Home.title();
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!();
    print_snapshot(&snapshot);

    Ok(snapshot)
}
