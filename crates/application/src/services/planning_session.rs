//! Planning session event loop
//!
//! Runs a [`RoutePlanner`] for one signed-in user. User events arrive on a
//! channel, geocoding and routing run concurrently on a [`JoinSet`], and
//! every state change is published as a [`PlannerSnapshot`]. All mutation
//! happens on the loop task, so completions for superseded selections are
//! discarded by the planner's epoch checks regardless of arrival order.

use tokio::{
    sync::{mpsc, watch},
    task::JoinSet,
};
use tracing::{debug, info, warn};

use crate::{
    error::ApplicationError,
    ports::{AuthenticatedUser, SessionPort, require_user},
    services::route_planner::{Completion, PlannerCommand, PlannerEvent, PlannerSnapshot, RoutePlanner},
};

/// Default capacity of the event channel
pub const DEFAULT_EVENT_BUFFER: usize = 32;

/// Caller side of a running planning session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    events: mpsc::Sender<PlannerEvent>,
    snapshots: watch::Receiver<PlannerSnapshot>,
}

impl SessionHandle {
    /// Queue a user event
    pub async fn send(&self, event: impl Into<PlannerEvent>) -> Result<(), ApplicationError> {
        self.events
            .send(event.into())
            .await
            .map_err(|_| ApplicationError::Internal("planning session closed".to_string()))
    }

    /// Latest published state
    #[must_use]
    pub fn snapshot(&self) -> PlannerSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every published state
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PlannerSnapshot> {
        self.snapshots.clone()
    }
}

/// Event loop owning a [`RoutePlanner`]
#[derive(Debug)]
pub struct PlanningSession {
    user: AuthenticatedUser,
    planner: RoutePlanner,
    events: mpsc::Receiver<PlannerEvent>,
    snapshots: watch::Sender<PlannerSnapshot>,
}

impl PlanningSession {
    /// Open a session for the signed-in user
    ///
    /// Fails with `NotAuthorized` when nobody is signed in.
    pub fn start(
        auth: &dyn SessionPort,
        planner: RoutePlanner,
        buffer: usize,
    ) -> Result<(Self, SessionHandle), ApplicationError> {
        let user = require_user(auth)?;
        let (event_tx, event_rx) = mpsc::channel(buffer.max(1));
        let (snapshot_tx, snapshot_rx) = watch::channel(planner.snapshot());

        info!("planning session started");

        Ok((
            Self {
                user,
                planner,
                events: event_rx,
                snapshots: snapshot_tx,
            },
            SessionHandle {
                events: event_tx,
                snapshots: snapshot_rx,
            },
        ))
    }

    /// The user this session belongs to
    #[must_use]
    pub const fn user(&self) -> &AuthenticatedUser {
        &self.user
    }

    /// Process events until every handle is dropped and all in-flight
    /// work has finished, then return the planner
    pub async fn run(mut self) -> RoutePlanner {
        let mut inflight: JoinSet<Completion> = JoinSet::new();
        let mut open = true;

        loop {
            tokio::select! {
                event = self.events.recv(), if open => match event {
                    Some(event) => {
                        match self.planner.handle(event) {
                            Ok(commands) => self.dispatch(&mut inflight, commands),
                            Err(e) => debug!(error = %e, "event rejected"),
                        }
                        self.publish();
                    },
                    None => open = false,
                },
                Some(joined) = inflight.join_next() => {
                    match joined {
                        Ok(completion) => match self.planner.complete(completion) {
                            Ok(commands) => self.dispatch(&mut inflight, commands),
                            Err(e) if e.is_stale() => debug!(error = %e, "ignored stale completion"),
                            Err(e) => debug!(error = %e, "completion rejected"),
                        },
                        Err(e) => warn!(error = %e, "planner task failed"),
                    }
                    self.publish();
                },
                else => break,
            }
        }

        info!(epoch = %self.planner.epoch(), "planning session finished");
        self.planner
    }

    fn dispatch(&self, inflight: &mut JoinSet<Completion>, commands: Vec<PlannerCommand>) {
        for command in commands {
            inflight.spawn(self.planner.executor().run(command));
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.planner.snapshot());
    }
}
