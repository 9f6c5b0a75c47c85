//! Barometric pressure sensing.
//!
//! - [`PressureSensor`] - Capability: "is there a sensor" and "subscribe"
//! - [`PressureSubscription`] - Sample stream; dropping it unregisters
//! - [`SensorHub`] - Push-based in-process sensor with a listener registry
//! - [`IioPressureSensor`] - Linux IIO sysfs barometer
//! - [`PressureReader`] - Single-shot, cancellable read

mod hub;
mod iio;
mod reader;
mod sensor;

pub use hub::SensorHub;
pub use iio::{read_pressure_hpa, IioPressureSensor, DEFAULT_IIO_ROOT, DEFAULT_POLL_INTERVAL_MS};
pub use reader::PressureReader;
pub use sensor::{PressureSensor, PressureSubscription};
