//! One-shot pressure read.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::sensor::PressureSensor;

/// Reads a single pressure sample from a [`PressureSensor`].
///
/// No retries, no averaging and no internal timeout: the read is bounded only
/// by the caller dropping the future or cancelling the token.
#[derive(Clone)]
pub struct PressureReader {
    sensor: Arc<dyn PressureSensor>,
}

impl PressureReader {
    /// Create a reader for a sensor.
    pub fn new(sensor: Arc<dyn PressureSensor>) -> Self {
        Self { sensor }
    }

    /// Returns true if the underlying sensor exists.
    pub fn is_available(&self) -> bool {
        self.sensor.is_available()
    }

    /// Return the first sample delivered after subscribing, in hPa.
    ///
    /// Returns `None` immediately if there is no sensor. The subscription is
    /// released as soon as a sample arrives, and also when this future is
    /// dropped before one does.
    pub async fn read_once(&self) -> Option<f32> {
        if !self.sensor.is_available() {
            debug!("No pressure sensor available");
            return None;
        }

        let mut subscription = self.sensor.subscribe()?;
        let sample = subscription.next().await;
        subscription.unsubscribe();

        trace!(hpa = ?sample, "Pressure read completed");
        sample
    }

    /// Like [`read_once`](Self::read_once), but gives up when `cancel` fires.
    pub async fn read_once_until(&self, cancel: &CancellationToken) -> Option<f32> {
        tokio::select! {
            _ = cancel.cancelled() => {
                trace!("Pressure read cancelled");
                None
            }
            sample = self.read_once() => sample,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pressure::SensorHub;
    use std::time::Duration;

    async fn wait_for_listener(hub: &SensorHub) {
        while hub.listener_count() == 0 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_unavailable_sensor_returns_none() {
        let reader = PressureReader::new(Arc::new(SensorHub::unavailable()));
        assert!(!reader.is_available());
        assert_eq!(reader.read_once().await, None);
    }

    #[tokio::test]
    async fn test_first_sample_is_returned_and_listener_released() {
        let hub = Arc::new(SensorHub::new());
        let reader = PressureReader::new(hub.clone());

        let read = tokio::spawn(async move { reader.read_once().await });
        wait_for_listener(&hub).await;

        hub.publish(1013.25);
        hub.publish(990.0);

        assert_eq!(read.await.unwrap(), Some(1013.25));
        assert_eq!(hub.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_dropped_read_unregisters() {
        let hub = Arc::new(SensorHub::new());
        let reader = PressureReader::new(hub.clone());

        let result = tokio::time::timeout(Duration::from_millis(20), reader.read_once()).await;

        assert!(result.is_err());
        assert_eq!(hub.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_read_returns_none() {
        let hub = Arc::new(SensorHub::new());
        let reader = PressureReader::new(hub.clone());
        let cancel = CancellationToken::new();

        let task_cancel = cancel.clone();
        let read = tokio::spawn(async move { reader.read_once_until(&task_cancel).await });
        wait_for_listener(&hub).await;

        cancel.cancel();

        assert_eq!(read.await.unwrap(), None);
        assert_eq!(hub.listener_count(), 0);
    }
}
