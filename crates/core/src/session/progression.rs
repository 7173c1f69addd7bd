use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::outcome::Verdict;

/// Delays and round length for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub correct_delay_ms: u64,
    pub incorrect_delay_ms: u64,
    /// Countdown per round for reflex games.
    pub round_secs: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            correct_delay_ms: 1000,
            incorrect_delay_ms: 800,
            round_secs: 10,
        }
    }
}

impl TimingConfig {
    /// How long feedback stays on screen before the session moves on.
    #[must_use]
    pub fn delay_for(&self, verdict: Verdict) -> Duration {
        let ms = if verdict.is_correct() {
            self.correct_delay_ms
        } else {
            self.incorrect_delay_ms
        };
        Duration::from_millis(ms)
    }
}

/// Token a scheduled advance must present. Only the most recently issued one is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceTicket(u64);

/// An advance the caller has to schedule after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    pub ticket: AdvanceTicket,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Waiting for input on the current question or board.
    Idle,
    /// Judged and locked; waiting for the feedback delay.
    Answered,
    /// The delay fired and the session is moving on.
    Advancing,
    Complete,
}

/// `Idle -> Answered -> Advancing -> Idle | Complete`, with one pending callback at most.
#[derive(Debug, Clone)]
pub struct Progression {
    stage: Stage,
    issued: u64,
    pending: Option<PendingAdvance>,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            issued: 0,
            pending: None,
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingAdvance> {
        self.pending
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.stage == Stage::Idle
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Complete
    }

    /// Lock the current step and issue a fresh ticket. `None` unless idle.
    pub fn lock(&mut self, delay: Duration) -> Option<PendingAdvance> {
        if self.stage != Stage::Idle {
            return None;
        }
        self.issued = self.issued.wrapping_add(1);
        let pending = PendingAdvance {
            ticket: AdvanceTicket(self.issued),
            delay,
        };
        self.stage = Stage::Answered;
        self.pending = Some(pending);
        Some(pending)
    }

    /// Accept `ticket` if it is the outstanding one. Stale tickets are a no-op.
    pub fn begin_advance(&mut self, ticket: AdvanceTicket) -> bool {
        match self.pending {
            Some(pending) if pending.ticket == ticket && self.stage == Stage::Answered => {
                self.pending = None;
                self.stage = Stage::Advancing;
                true
            }
            _ => false,
        }
    }

    pub fn settle(&mut self, finished: bool) {
        if self.stage != Stage::Advancing {
            return;
        }
        self.stage = if finished { Stage::Complete } else { Stage::Idle };
    }

    /// Back to idle. Any ticket issued so far becomes stale.
    pub fn reset(&mut self) {
        self.issued = self.issued.wrapping_add(1);
        self.pending = None;
        self.stage = Stage::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_through_every_stage() {
        let mut progression = Progression::new();
        let pending = progression.lock(Duration::from_millis(1000)).unwrap();
        assert_eq!(progression.stage(), Stage::Answered);
        assert_eq!(progression.pending(), Some(pending));

        assert!(progression.begin_advance(pending.ticket));
        assert_eq!(progression.stage(), Stage::Advancing);
        assert_eq!(progression.pending(), None);

        progression.settle(false);
        assert!(progression.is_idle());

        let pending = progression.lock(Duration::ZERO).unwrap();
        assert!(progression.begin_advance(pending.ticket));
        progression.settle(true);
        assert!(progression.is_complete());
        assert!(progression.lock(Duration::ZERO).is_none());
    }

    #[test]
    fn lock_is_refused_while_answered() {
        let mut progression = Progression::new();
        progression.lock(Duration::ZERO).unwrap();
        assert!(progression.lock(Duration::ZERO).is_none());
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut progression = Progression::new();
        let old = progression.lock(Duration::ZERO).unwrap();
        assert!(progression.begin_advance(old.ticket));
        progression.settle(false);
        let _current = progression.lock(Duration::ZERO).unwrap();

        assert!(!progression.begin_advance(old.ticket));
        assert_eq!(progression.stage(), Stage::Answered);
    }

    #[test]
    fn reset_invalidates_outstanding_ticket() {
        let mut progression = Progression::new();
        let pending = progression.lock(Duration::ZERO).unwrap();
        progression.reset();
        assert!(!progression.begin_advance(pending.ticket));
        assert!(progression.is_idle());
    }

    #[test]
    fn delay_depends_on_verdict() {
        let timing = TimingConfig::default();
        assert_eq!(timing.delay_for(Verdict::Correct), Duration::from_millis(1000));
        assert_eq!(timing.delay_for(Verdict::Incorrect), Duration::from_millis(800));
        assert_eq!(timing.delay_for(Verdict::TimedOut), Duration::from_millis(800));
    }
}
