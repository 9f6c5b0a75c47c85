//! In-process pressure sensor.
//!
//! [`SensorHub`] keeps a registry of listeners and fans every published sample
//! out to them. It backs platforms where samples are pushed from elsewhere
//! (a bridge to a platform sensor service, a replay file) and is the sensor
//! used in tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use tracing::trace;

use super::sensor::{PressureSensor, PressureSubscription};

/// Per-listener buffer; samples beyond it are dropped for that listener.
const LISTENER_BUFFER: usize = 8;

type Listeners = Arc<Mutex<HashMap<u64, mpsc::Sender<f32>>>>;

/// Push-based pressure sensor with a listener registry.
pub struct SensorHub {
    available: bool,
    listeners: Listeners,
    next_id: AtomicU64,
}

impl SensorHub {
    /// Create a hub for a device that has a pressure sensor.
    pub fn new() -> Self {
        Self {
            available: true,
            listeners: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Create a hub representing a device without a pressure sensor.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Deliver a sample (hPa) to every registered listener.
    ///
    /// Returns the number of listeners that accepted it. Listeners whose
    /// receiver is gone are pruned.
    pub fn publish(&self, hpa: f32) -> usize {
        let mut listeners = lock(&self.listeners);
        let mut delivered = 0;

        listeners.retain(|id, tx| match tx.try_send(hpa) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                trace!(listener = id, "Pressure listener buffer full, sample dropped");
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });

        delivered
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }
}

impl Default for SensorHub {
    fn default() -> Self {
        Self::new()
    }
}

impl PressureSensor for SensorHub {
    fn is_available(&self) -> bool {
        self.available
    }

    fn subscribe(&self) -> Option<PressureSubscription> {
        if !self.available {
            return None;
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(LISTENER_BUFFER);
        lock(&self.listeners).insert(id, tx);
        trace!(listener = id, "Pressure listener registered");

        let listeners = Arc::clone(&self.listeners);
        Some(PressureSubscription::new(rx, move || {
            lock(&listeners).remove(&id);
            trace!(listener = id, "Pressure listener unregistered");
        }))
    }
}

fn lock(listeners: &Listeners) -> MutexGuard<'_, HashMap<u64, mpsc::Sender<f32>>> {
    listeners.lock().unwrap_or_else(|e| e.into_inner())
}
