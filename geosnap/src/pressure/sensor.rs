//! Pressure sensor capability and subscriptions.

use tokio::sync::mpsc;

/// A barometric pressure sensor that delivers samples to subscribers.
pub trait PressureSensor: Send + Sync {
    /// Returns true if the device has a pressure sensor.
    fn is_available(&self) -> bool;

    /// Register a listener for pressure samples (hPa).
    ///
    /// Returns `None` when no sensor exists or it cannot be started.
    /// Samples are delivered until the returned subscription is dropped.
    fn subscribe(&self) -> Option<PressureSubscription>;
}

type Unregister = Box<dyn FnOnce() + Send + Sync>;

/// A live registration with a pressure sensor.
///
/// Dropping the subscription unregisters the listener.
pub struct PressureSubscription {
    samples: mpsc::Receiver<f32>,
    unregister: Option<Unregister>,
}

impl PressureSubscription {
    /// Wrap a sample receiver with the action that unregisters it.
    pub fn new(samples: mpsc::Receiver<f32>, unregister: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            samples,
            unregister: Some(Box::new(unregister)),
        }
    }

    /// Wait for the next sample.
    ///
    /// Returns `None` once the sensor stops delivering.
    pub async fn next(&mut self) -> Option<f32> {
        self.samples.recv().await
    }

    /// Unregister explicitly (same as dropping).
    pub fn unsubscribe(self) {}
}

impl Drop for PressureSubscription {
    fn drop(&mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}

impl std::fmt::Debug for PressureSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PressureSubscription")
            .field("registered", &self.unregister.is_some())
            .finish()
    }
}
