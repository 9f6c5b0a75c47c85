//! Linux Industrial I/O barometer.
//!
//! Barometers exposed by the kernel IIO subsystem appear as
//! `/sys/bus/iio/devices/iio:deviceN/` with either a processed
//! `in_pressure_input` attribute or an `in_pressure_raw` /
//! `in_pressure_scale` pair. Both are in kilopascal.
//!
//! A subscription spawns a poll task that reads the attribute at a fixed
//! interval and stops as soon as the subscription is dropped.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use super::sensor::{PressureSensor, PressureSubscription};

/// Default sysfs directory holding IIO devices.
pub const DEFAULT_IIO_ROOT: &str = "/sys/bus/iio/devices";

/// Default poll interval for IIO reads.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 200;

const PRESSURE_INPUT: &str = "in_pressure_input";
const PRESSURE_RAW: &str = "in_pressure_raw";
const PRESSURE_SCALE: &str = "in_pressure_scale";

/// kPa → hPa.
const KPA_TO_HPA: f64 = 10.0;

/// Pressure sensor backed by an IIO sysfs device.
#[derive(Debug, Clone)]
pub struct IioPressureSensor {
    device_dir: Option<PathBuf>,
    poll_interval: Duration,
}

impl IioPressureSensor {
    /// Find the first IIO device under `root` that reports pressure.
    ///
    /// A missing root or no matching device yields an unavailable sensor.
    pub fn discover(root: &Path, poll_interval: Duration) -> Self {
        let device_dir = find_pressure_device(root);
        match &device_dir {
            Some(dir) => info!(device = %dir.display(), "Found IIO pressure sensor"),
            None => debug!(root = %root.display(), "No IIO pressure sensor found"),
        }

        Self {
            device_dir,
            poll_interval,
        }
    }

    /// Use a specific IIO device directory.
    pub fn with_device(device_dir: PathBuf, poll_interval: Duration) -> Self {
        Self {
            device_dir: Some(device_dir),
            poll_interval,
        }
    }

    /// The device directory in use, if any.
    pub fn device_dir(&self) -> Option<&Path> {
        self.device_dir.as_deref()
    }
}

impl PressureSensor for IioPressureSensor {
    fn is_available(&self) -> bool {
        self.device_dir.is_some()
    }

    fn subscribe(&self) -> Option<PressureSubscription> {
        let device_dir = self.device_dir.clone()?;

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, "Cannot start IIO poll task outside a tokio runtime");
                return None;
            }
        };

        let (tx, rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();
        runtime.spawn(poll_device(
            device_dir,
            self.poll_interval,
            tx,
            cancel.clone(),
        ));

        Some(PressureSubscription::new(rx, move || cancel.cancel()))
    }
}

/// Poll loop delivering samples until cancelled or the receiver is gone.
async fn poll_device(
    device_dir: PathBuf,
    poll_interval: Duration,
    tx: mpsc::Sender<f32>,
    cancel: CancellationToken,
) {
    trace!(device = %device_dir.display(), "IIO poll task started");
    let mut interval = tokio::time::interval(poll_interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        match read_pressure_hpa(&device_dir).await {
            Ok(hpa) => {
                if tx.send(hpa).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                debug!(device = %device_dir.display(), error = %e, "IIO pressure read failed");
            }
        }
    }

    trace!(device = %device_dir.display(), "IIO poll task stopped");
}

/// Read the current pressure from an IIO device directory, in hPa.
pub async fn read_pressure_hpa(device_dir: &Path) -> io::Result<f32> {
    let kpa = match tokio::fs::read_to_string(device_dir.join(PRESSURE_INPUT)).await {
        Ok(input) => parse_number(&input)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let raw = tokio::fs::read_to_string(device_dir.join(PRESSURE_RAW)).await?;
            let scale = match tokio::fs::read_to_string(device_dir.join(PRESSURE_SCALE)).await {
                Ok(scale) => parse_number(&scale)?,
                Err(e) if e.kind() == io::ErrorKind::NotFound => 1.0,
                Err(e) => return Err(e),
            };
            parse_number(&raw)? * scale
        }
        Err(e) => return Err(e),
    };

    Ok((kpa * KPA_TO_HPA) as f32)
}

fn parse_number(text: &str) -> io::Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn find_pressure_device(root: &Path) -> Option<PathBuf> {
    let mut devices: Vec<PathBuf> = std::fs::read_dir(root)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("iio:device"))
        })
        .filter(|path| path.join(PRESSURE_INPUT).exists() || path.join(PRESSURE_RAW).exists())
        .collect();

    devices.sort();
    devices.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_device(root: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for (file, content) in files {
            fs::write(dir.join(file), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_discover_missing_root() {
        let sensor =
            IioPressureSensor::discover(Path::new("/nonexistent/iio"), Duration::from_millis(10));
        assert!(!sensor.is_available());
        assert!(sensor.subscribe().is_none());
    }

    #[test]
    fn test_discover_skips_devices_without_pressure() {
        let temp = TempDir::new().unwrap();
        make_device(temp.path(), "iio:device0", &[("in_accel_x_raw", "12\n")]);
        let baro = make_device(temp.path(), "iio:device1", &[(PRESSURE_INPUT, "101.325\n")]);

        let sensor = IioPressureSensor::discover(temp.path(), Duration::from_millis(10));
        assert_eq!(sensor.device_dir(), Some(baro.as_path()));
    }

    #[tokio::test]
    async fn test_read_processed_input() {
        let temp = TempDir::new().unwrap();
        let dir = make_device(temp.path(), "iio:device0", &[(PRESSURE_INPUT, "101.325\n")]);

        let hpa = read_pressure_hpa(&dir).await.unwrap();
        assert!((hpa - 1013.25).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_read_raw_with_scale() {
        let temp = TempDir::new().unwrap();
        let dir = make_device(
            temp.path(),
            "iio:device0",
            &[(PRESSURE_RAW, "4053000\n"), (PRESSURE_SCALE, "0.000025\n")],
        );

        let hpa = read_pressure_hpa(&dir).await.unwrap();
        assert!((hpa - 1013.25).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_read_garbage_is_error() {
        let temp = TempDir::new().unwrap();
        let dir = make_device(temp.path(), "iio:device0", &[(PRESSURE_INPUT, "n/a\n")]);

        let err = read_pressure_hpa(&dir).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn test_subscription_delivers_samples() {
        let temp = TempDir::new().unwrap();
        let dir = make_device(temp.path(), "iio:device0", &[(PRESSURE_INPUT, "99.5\n")]);

        let sensor = IioPressureSensor::with_device(dir, Duration::from_millis(10));
        let mut subscription = sensor.subscribe().unwrap();

        let hpa = subscription.next().await.unwrap();
        assert!((hpa - 995.0).abs() < 0.01);
    }
}
