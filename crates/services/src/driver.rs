use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, info};
use uuid::Uuid;

use game_core::Clock;
use game_core::model::GameId;
use game_core::session::{
    ActionOutcome, AdvanceTicket, GameAction, GameSession, SessionSnapshot, TimerTicket,
};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Runs a `GameSession` against real time.
///
/// The session decides which callbacks should exist; the driver keeps at most one
/// pending advance task and one round ticker in step with that, aborting the old
/// handle before spawning a new one. Dropping the last clone aborts both.
///
/// Must be used from within a Tokio runtime.
#[derive(Clone)]
pub struct SessionDriver {
    inner: Arc<DriverInner>,
}

struct DriverInner {
    game_id: GameId,
    run_id: Uuid,
    clock: Clock,
    state: Mutex<DriverState>,
    snapshots: watch::Sender<SessionSnapshot>,
}

struct DriverState {
    session: GameSession,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    advance_task: Option<(AdvanceTicket, AbortHandle)>,
    timer_task: Option<(TimerTicket, AbortHandle)>,
}

impl DriverState {
    fn abort_all(&mut self) {
        if let Some((_, handle)) = self.advance_task.take() {
            handle.abort();
        }
        if let Some((_, handle)) = self.timer_task.take() {
            handle.abort();
        }
    }
}

impl Drop for DriverInner {
    fn drop(&mut self) {
        self.state.get_mut().abort_all();
    }
}

impl SessionDriver {
    #[must_use]
    pub fn new(game_id: GameId, session: GameSession, clock: Clock) -> Self {
        let (snapshots, _) = watch::channel(session.snapshot());
        let run_id = Uuid::new_v4();
        info!(%game_id, %run_id, kind = %session.kind(), "session started");
        let inner = Arc::new(DriverInner {
            game_id,
            run_id,
            clock,
            state: Mutex::new(DriverState {
                session,
                started_at: clock.now(),
                completed_at: None,
                advance_task: None,
                timer_task: None,
            }),
            snapshots,
        });
        Self { inner }
    }

    #[must_use]
    pub fn game_id(&self) -> GameId {
        self.inner.game_id
    }

    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.inner.run_id
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.snapshots.borrow().clone()
    }

    /// Receives a new snapshot after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.snapshots.subscribe()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.inner.state.lock().started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.inner.state.lock().completed_at
    }

    /// Whether a delayed advance is currently scheduled.
    #[must_use]
    pub fn has_pending_advance(&self) -> bool {
        self.inner.state.lock().advance_task.is_some()
    }

    /// Whether a round countdown task is currently running.
    #[must_use]
    pub fn has_running_timer(&self) -> bool {
        self.inner.state.lock().timer_task.is_some()
    }

    /// Apply a user action and schedule whatever follows from it.
    pub fn dispatch(&self, action: GameAction) -> ActionOutcome {
        let mut state = self.inner.state.lock();
        let outcome = state.session.apply(action);
        match outcome {
            ActionOutcome::Ignored(reason) => {
                debug!(game_id = %self.inner.game_id, ?action, ?reason, "action ignored");
            }
            ActionOutcome::Reset => {
                state.abort_all();
                state.started_at = self.inner.clock.now();
                state.completed_at = None;
                info!(game_id = %self.inner.game_id, run_id = %self.inner.run_id, "session reset");
            }
            _ => {}
        }
        self.inner.settle(&mut state, outcome);
        outcome
    }

    /// "Try again".
    pub fn reset(&self) -> ActionOutcome {
        self.dispatch(GameAction::Reset)
    }
}

/// Two handles are equal when they drive the same session.
impl PartialEq for SessionDriver {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for SessionDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionDriver")
            .field("game_id", &self.inner.game_id)
            .field("run_id", &self.inner.run_id)
            .finish_non_exhaustive()
    }
}

impl DriverInner {
    fn on_advance(self: &Arc<Self>, ticket: AdvanceTicket) {
        let mut state = self.state.lock();
        if state.advance_task.as_ref().is_some_and(|(t, _)| *t == ticket) {
            state.advance_task = None;
        }
        let outcome = state.session.fire_advance(ticket);
        if let ActionOutcome::Ignored(reason) = outcome {
            debug!(game_id = %self.game_id, ?reason, "advance ignored");
        }
        self.settle(&mut state, outcome);
    }

    /// Returns whether the ticker should keep running.
    fn on_tick(self: &Arc<Self>, ticket: TimerTicket) -> bool {
        let mut state = self.state.lock();
        let outcome = state.session.tick(ticket);
        if let ActionOutcome::Ignored(reason) = outcome {
            debug!(game_id = %self.game_id, ?reason, "tick ignored");
            return false;
        }
        debug!(game_id = %self.game_id, ?outcome, "round tick");
        let still_active = state.session.active_timer() == Some(ticket);
        if !still_active && state.timer_task.as_ref().is_some_and(|(t, _)| *t == ticket) {
            state.timer_task = None;
        }
        self.settle(&mut state, outcome);
        still_active
    }

    fn settle(self: &Arc<Self>, state: &mut DriverState, outcome: ActionOutcome) {
        if let ActionOutcome::Completed(result) = outcome {
            state.completed_at = Some(self.clock.now());
            info!(
                game_id = %self.game_id,
                run_id = %self.run_id,
                final_score = result.final_score,
                max_score = result.max_score,
                outcome = ?result.outcome,
                "session completed"
            );
        }
        self.reconcile(state);
        self.snapshots.send_replace(state.session.snapshot());
    }

    /// Bring the spawned tasks in line with what the session expects.
    fn reconcile(self: &Arc<Self>, state: &mut DriverState) {
        let wanted_advance = state.session.pending_advance();
        let advance_current = matches!(
            (&state.advance_task, wanted_advance),
            (Some((ticket, _)), Some(pending)) if *ticket == pending.ticket
        );
        if !advance_current {
            if let Some((_, handle)) = state.advance_task.take() {
                handle.abort();
            }
            if let Some(pending) = wanted_advance {
                let weak = Arc::downgrade(self);
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(pending.delay).await;
                    if let Some(inner) = weak.upgrade() {
                        inner.on_advance(pending.ticket);
                    }
                })
                .abort_handle();
                state.advance_task = Some((pending.ticket, handle));
            }
        }

        let wanted_timer = state.session.active_timer();
        let timer_current = matches!(
            (&state.timer_task, wanted_timer),
            (Some((ticket, _)), Some(wanted)) if *ticket == wanted
        );
        if !timer_current {
            if let Some((_, handle)) = state.timer_task.take() {
                handle.abort();
            }
            if let Some(ticket) = wanted_timer {
                let handle = tokio::spawn(run_ticker(Arc::downgrade(self), ticket)).abort_handle();
                state.timer_task = Some((ticket, handle));
            }
        }
    }
}

async fn run_ticker(weak: Weak<DriverInner>, ticket: TimerTicket) {
    let mut interval = tokio::time::interval(TICK_PERIOD);
    // The first tick completes immediately.
    interval.tick().await;
    loop {
        interval.tick().await;
        let Some(inner) = weak.upgrade() else {
            break;
        };
        if !inner.on_tick(ticket) {
            break;
        }
    }
}
