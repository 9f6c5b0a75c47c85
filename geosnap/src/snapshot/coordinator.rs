//! Acquisition coordinator - position, then terrain elevation and pressure.
//!
//! A refresh resolves the position inline and then fans out two independent
//! tasks. The state is owned by a single task that applies
//! `(generation, update)` messages in arrival order and publishes every new
//! value on a watch channel:
//!
//! ```text
//! refresh() ──Loading/PositionReady──┐
//! elevation task ──Elevation(..)─────┼──► mpsc ──► owner task ──► watch<GeoSnapshot>
//! pressure task ──Pressure(..)───────┘
//! ```
//!
//! Each refresh takes a new generation and a child cancellation token.
//! Starting another refresh cancels the previous token, and the owner drops
//! any message whose generation is no longer current.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use super::error::SnapshotError;
use super::state::{GeoSnapshot, SnapshotUpdate};
use crate::clock::Clock;
use crate::elevation::{ElevationCache, ElevationClient};
use crate::location::{GeoFix, LocationResolver, PositionError, PositionProvider};
use crate::pressure::PressureReader;
use crate::store::{LoggedRecord, NewRecord, RecordId, RecordStore, StoreError};

/// Capacity of the update channel into the owner task.
const UPDATE_BUFFER: usize = 16;

/// Message consumed by the owner task.
struct Envelope {
    generation: u64,
    update: SnapshotUpdate,
    /// Signalled once the update has been applied or discarded.
    applied: Option<oneshot::Sender<()>>,
}

impl Envelope {
    fn new(generation: u64, update: SnapshotUpdate) -> Self {
        Self {
            generation,
            update,
            applied: None,
        }
    }
}

/// Drives snapshot acquisition and owns the resulting state.
///
/// Must be created inside a Tokio runtime. Dropping the coordinator cancels
/// all in-flight work.
pub struct AcquisitionCoordinator<P: PositionProvider, C: ElevationClient> {
    resolver: LocationResolver<P>,
    elevation: Arc<ElevationCache<C>>,
    pressure: PressureReader,
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,

    updates: mpsc::Sender<Envelope>,
    state: watch::Receiver<GeoSnapshot>,
    generation: Arc<AtomicU64>,

    root: CancellationToken,
    current: Mutex<CancellationToken>,
    owner: Mutex<Option<JoinHandle<()>>>,
}

impl<P, C> AcquisitionCoordinator<P, C>
where
    P: PositionProvider + 'static,
    C: ElevationClient + 'static,
{
    /// Create a coordinator and start its owner task.
    pub fn new(
        resolver: LocationResolver<P>,
        elevation: Arc<ElevationCache<C>>,
        pressure: PressureReader,
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (updates, rx) = mpsc::channel(UPDATE_BUFFER);
        let (state_tx, state) = watch::channel(GeoSnapshot::default());
        let generation = Arc::new(AtomicU64::new(0));
        let root = CancellationToken::new();

        let owner = tokio::spawn(run_owner(
            rx,
            state_tx,
            Arc::clone(&generation),
            root.clone(),
        ));

        Self {
            resolver,
            elevation,
            pressure,
            store,
            clock,
            updates,
            state,
            generation,
            current: Mutex::new(root.child_token()),
            root,
            owner: Mutex::new(Some(owner)),
        }
    }

    /// Resolve the position and launch the elevation and pressure reads.
    ///
    /// Returns once the position step has been applied to the state. Only a
    /// permission denial is returned as an error; every other failure is
    /// reported through the snapshot's `error` field.
    pub async fn refresh(&self) -> Result<(), SnapshotError> {
        let (generation, cancel) = self.begin_generation();
        info!(generation, "Refreshing snapshot");

        self.post(generation, SnapshotUpdate::Loading).await;

        let resolved = tokio::select! {
            _ = cancel.cancelled() => {
                debug!(generation, "Refresh superseded during position step");
                return Ok(());
            }
            resolved = self.resolver.resolve() => resolved,
        };

        match resolved {
            Ok(Some(fix)) => {
                debug!(
                    generation,
                    lat = fix.latitude,
                    lon = fix.longitude,
                    altitude = ?fix.altitude,
                    "Position resolved"
                );
                let update = SnapshotUpdate::PositionReady {
                    fix: fix.clone(),
                    time_zone_id: self.clock.time_zone_id(),
                    formatted_local_time: self.clock.format_now(),
                };
                self.post_and_wait(generation, update).await;
                self.launch_fields(generation, &fix, cancel);
                Ok(())
            }
            Ok(None) => {
                warn!(generation, "Location unavailable");
                self.post_and_wait(
                    generation,
                    SnapshotUpdate::Failed(SnapshotError::LocationUnavailable),
                )
                .await;
                Ok(())
            }
            Err(PositionError::PermissionDenied) => {
                warn!(generation, "Location permission denied");
                self.post_and_wait(
                    generation,
                    SnapshotUpdate::Failed(SnapshotError::PermissionDenied),
                )
                .await;
                Err(SnapshotError::PermissionDenied)
            }
            Err(e) => {
                warn!(generation, error = %e, "Position step failed");
                self.post_and_wait(generation, SnapshotUpdate::Failed(e.into()))
                    .await;
                Ok(())
            }
        }
    }

    /// Wait until the current refresh has nothing left in flight.
    ///
    /// Callers that need a bound should wrap this in `tokio::time::timeout`.
    pub async fn wait_until_settled(&self) -> GeoSnapshot {
        let mut state = self.state.clone();
        let settled = state
            .wait_for(GeoSnapshot::is_settled)
            .await
            .map(|snapshot| snapshot.clone());
        settled.unwrap_or_else(|_| self.snapshot())
    }

    /// Current state.
    pub fn snapshot(&self) -> GeoSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<GeoSnapshot> {
        self.state.clone()
    }

    /// Dismiss the current error.
    pub async fn clear_error(&self) {
        let generation = self.generation.load(Ordering::SeqCst);
        self.post_and_wait(generation, SnapshotUpdate::ClearError)
            .await;
    }

    /// Save the current snapshot under `name`.
    ///
    /// Returns `Ok(None)` without touching the store when there is no fix.
    /// Terrain elevation and pressure are stored only when they hold a number.
    pub fn save(&self, name: &str) -> Result<Option<RecordId>, StoreError> {
        let snapshot = self.snapshot();
        let Some(fix) = snapshot.raw_fix.as_ref() else {
            debug!("No position to save");
            return Ok(None);
        };

        let record = NewRecord {
            name: name.to_string(),
            longitude: fix.longitude,
            latitude: fix.latitude,
            device_altitude: fix.altitude,
            terrain_altitude: snapshot.terrain_elevation(),
            pressure_hpa: snapshot.pressure(),
            time_zone_id: self.clock.time_zone_id(),
            recorded_at_millis: self.clock.now_millis(),
            note: String::new(),
        };

        let id = self.store.insert(record)?;
        info!(id, name, "Snapshot saved");
        Ok(Some(id))
    }

    /// Delete a saved record.
    pub fn delete(&self, record: &LoggedRecord) -> Result<usize, StoreError> {
        self.store.delete(record)
    }

    /// Live, newest-first list of saved records.
    pub fn records(&self) -> watch::Receiver<Vec<LoggedRecord>> {
        self.store.get_all()
    }

    /// Elevation cache used for terrain lookups.
    pub fn elevation_cache(&self) -> &ElevationCache<C> {
        &self.elevation
    }

    /// Cancel all work and wait for the owner task to exit.
    pub async fn shutdown(&self) {
        self.root.cancel();
        let owner = self.owner_handle().take();
        if let Some(owner) = owner {
            if let Err(e) = owner.await {
                warn!(error = %e, "Snapshot owner task failed");
            }
        }
        info!("Acquisition coordinator stopped");
    }

    /// Advance the generation and swap in a fresh cancellation token,
    /// cancelling the previous refresh.
    fn begin_generation(&self) -> (u64, CancellationToken) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.cancel();
        let token = self.root.child_token();
        *current = token.clone();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        (generation, token)
    }

    fn launch_fields(&self, generation: u64, fix: &GeoFix, cancel: CancellationToken) {
        let (lat, lon) = fix.position();

        let elevation = Arc::clone(&self.elevation);
        let updates = self.updates.clone();
        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    trace!(generation, "Elevation lookup cancelled");
                }
                value = elevation.lookup(lat, lon) => {
                    debug!(generation, elevation = ?value, "Terrain elevation resolved");
                    let _ = updates
                        .send(Envelope::new(generation, SnapshotUpdate::Elevation(value)))
                        .await;
                }
            }
        });

        let pressure = self.pressure.clone();
        let updates = self.updates.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    trace!(generation, "Pressure read cancelled");
                }
                hpa = pressure.read_once() => {
                    debug!(generation, hpa = ?hpa, "Pressure read finished");
                    let _ = updates
                        .send(Envelope::new(generation, SnapshotUpdate::Pressure(hpa)))
                        .await;
                }
            }
        });
    }

    async fn post(&self, generation: u64, update: SnapshotUpdate) {
        if self.updates.send(Envelope::new(generation, update)).await.is_err() {
            trace!(generation, "Owner task gone, update dropped");
        }
    }

    async fn post_and_wait(&self, generation: u64, update: SnapshotUpdate) {
        let (tx, rx) = oneshot::channel();
        let envelope = Envelope {
            generation,
            update,
            applied: Some(tx),
        };
        if self.updates.send(envelope).await.is_err() {
            trace!(generation, "Owner task gone, update dropped");
            return;
        }
        let _ = rx.await;
    }

    fn owner_handle(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.owner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<P: PositionProvider, C: ElevationClient> Drop for AcquisitionCoordinator<P, C> {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

/// Owner loop: apply current-generation updates and publish the result.
async fn run_owner(
    mut rx: mpsc::Receiver<Envelope>,
    state: watch::Sender<GeoSnapshot>,
    generation: Arc<AtomicU64>,
    cancel: CancellationToken,
) {
    debug!("Snapshot owner task started");

    loop {
        let envelope = tokio::select! {
            _ = cancel.cancelled() => break,
            envelope = rx.recv() => match envelope {
                Some(envelope) => envelope,
                None => break,
            },
        };

        let current = generation.load(Ordering::SeqCst);
        if envelope.generation == current {
            let next = state.borrow().apply(envelope.update);
            state.send_replace(next);
        } else {
            trace!(
                stale = envelope.generation,
                current,
                "Discarding update from superseded refresh"
            );
        }

        if let Some(applied) = envelope.applied {
            let _ = applied.send(());
        }
    }

    debug!("Snapshot owner task stopped");
}
