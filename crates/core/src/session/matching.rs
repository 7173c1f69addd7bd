use std::sync::Arc;

use crate::model::{DisplayOrder, DisplayOrderError, ItemId, MatchItem, PairBank, Side};

use super::outcome::{ActionOutcome, IgnoreReason, Judgement, PassThreshold, SessionResult, Verdict};
use super::progression::{AdvanceTicket, PendingAdvance, Progression, Stage, TimingConfig};
use super::snapshot::{BoardView, ItemView};

/// One confirmed pair and how it was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchAttempt {
    pub left: ItemId,
    pub right: ItemId,
    pub verdict: Verdict,
}

/// Select-left, select-right, confirm. Every item can take part in one attempt.
#[derive(Debug, Clone)]
pub struct MatchingSession {
    bank: Arc<PairBank>,
    order: DisplayOrder,
    timing: TimingConfig,
    threshold: PassThreshold,
    selected_left: Option<ItemId>,
    selected_right: Option<ItemId>,
    attempts: Vec<MatchAttempt>,
    score: u32,
    progression: Progression,
    result: Option<SessionResult>,
}

impl MatchingSession {
    /// # Errors
    ///
    /// Returns `DisplayOrderError::LengthMismatch` if `order` does not cover the
    /// right column exactly.
    pub fn new(
        bank: Arc<PairBank>,
        order: DisplayOrder,
        timing: TimingConfig,
        threshold: PassThreshold,
    ) -> Result<Self, DisplayOrderError> {
        if order.len() != bank.right().len() {
            return Err(DisplayOrderError::LengthMismatch {
                expected: bank.right().len(),
                found: order.len(),
            });
        }
        Ok(Self {
            bank,
            order,
            timing,
            threshold,
            selected_left: None,
            selected_right: None,
            attempts: Vec::new(),
            score: 0,
            progression: Progression::new(),
            result: None,
        })
    }

    #[must_use]
    pub fn bank(&self) -> &PairBank {
        &self.bank
    }

    #[must_use]
    pub fn display_order(&self) -> &DisplayOrder {
        &self.order
    }

    #[must_use]
    pub fn selected(&self) -> (Option<ItemId>, Option<ItemId>) {
        (self.selected_left, self.selected_right)
    }

    #[must_use]
    pub fn attempts(&self) -> &[MatchAttempt] {
        &self.attempts
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        u32::try_from(self.bank.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.progression.stage()
    }

    #[must_use]
    pub fn pending_advance(&self) -> Option<PendingAdvance> {
        self.progression.pending()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn result(&self) -> Option<SessionResult> {
        self.result
    }

    #[must_use]
    pub fn is_resolved(&self, side: Side, id: ItemId) -> bool {
        self.attempt_for(side, id).is_some()
    }

    pub fn select_left(&mut self, id: ItemId) -> ActionOutcome {
        self.select(Side::Left, id)
    }

    pub fn select_right(&mut self, id: ItemId) -> ActionOutcome {
        self.select(Side::Right, id)
    }

    /// Judge the selected pair. A no-op unless both sides are selected.
    pub fn confirm_match(&mut self) -> ActionOutcome {
        if let Some(reason) = self.input_guard() {
            return ActionOutcome::Ignored(reason);
        }
        let (Some(left), Some(right)) = (self.selected_left, self.selected_right) else {
            return ActionOutcome::Ignored(IgnoreReason::IncompleteSelection);
        };
        let verdict = if self.bank.is_correct(left, right) {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };
        let Some(pending) = self.progression.lock(self.timing.delay_for(verdict)) else {
            return ActionOutcome::Ignored(IgnoreReason::FeedbackPending);
        };
        if verdict.is_correct() {
            self.score += 1;
        }
        self.attempts.push(MatchAttempt {
            left,
            right,
            verdict,
        });
        self.selected_left = None;
        self.selected_right = None;
        ActionOutcome::Judged(Judgement {
            verdict,
            score: self.score,
            ticket: pending.ticket,
        })
    }

    /// Called once the feedback delay for `ticket` has elapsed.
    pub fn fire_advance(&mut self, ticket: AdvanceTicket) -> ActionOutcome {
        if !self.progression.begin_advance(ticket) {
            return ActionOutcome::Ignored(IgnoreReason::StaleTicket);
        }
        let every_left_attempted = self
            .bank
            .left()
            .iter()
            .all(|item| self.is_resolved(Side::Left, item.id));
        if every_left_attempted {
            self.progression.settle(true);
            let max_score = self.max_score();
            let result = SessionResult {
                final_score: self.score,
                max_score,
                outcome: self.threshold.outcome(self.score, max_score),
            };
            self.result = Some(result);
            return ActionOutcome::Completed(result);
        }
        self.progression.settle(false);
        ActionOutcome::Advanced
    }

    pub fn reset(&mut self) -> ActionOutcome {
        self.selected_left = None;
        self.selected_right = None;
        self.attempts.clear();
        self.score = 0;
        self.result = None;
        self.progression.reset();
        ActionOutcome::Reset
    }

    #[must_use]
    pub fn view(&self) -> BoardView {
        let left = self
            .bank
            .left()
            .iter()
            .map(|item| self.item_view(Side::Left, item))
            .collect();
        let right = self
            .order
            .apply(self.bank.right())
            .map(|item| self.item_view(Side::Right, item))
            .collect();
        BoardView {
            left,
            right,
            resolved: self.attempts.len(),
            total: self.bank.len(),
            can_confirm: self.input_guard().is_none()
                && self.selected_left.is_some()
                && self.selected_right.is_some(),
            last_verdict: match self.stage() {
                Stage::Answered => self.attempts.last().map(|a| a.verdict),
                _ => None,
            },
        }
    }

    fn item_view(&self, side: Side, item: &MatchItem) -> ItemView {
        let selected = match side {
            Side::Left => self.selected_left == Some(item.id),
            Side::Right => self.selected_right == Some(item.id),
        };
        ItemView {
            id: item.id,
            label: item.label.clone(),
            selected,
            verdict: self.attempt_for(side, item.id).map(|a| a.verdict),
        }
    }

    fn attempt_for(&self, side: Side, id: ItemId) -> Option<&MatchAttempt> {
        self.attempts.iter().find(|attempt| match side {
            Side::Left => attempt.left == id,
            Side::Right => attempt.right == id,
        })
    }

    fn input_guard(&self) -> Option<IgnoreReason> {
        if self.is_complete() {
            Some(IgnoreReason::SessionComplete)
        } else if !self.progression.is_idle() {
            Some(IgnoreReason::FeedbackPending)
        } else {
            None
        }
    }

    fn select(&mut self, side: Side, id: ItemId) -> ActionOutcome {
        if let Some(reason) = self.input_guard() {
            return ActionOutcome::Ignored(reason);
        }
        if !self.bank.contains(side, id) {
            return ActionOutcome::Ignored(IgnoreReason::UnknownItem);
        }
        if self.is_resolved(side, id) {
            return ActionOutcome::Ignored(IgnoreReason::AlreadyResolved);
        }
        match side {
            Side::Left => self.selected_left = Some(id),
            Side::Right => self.selected_right = Some(id),
        }
        ActionOutcome::Selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MatchPair;
    use crate::session::outcome::Outcome;

    /// Left 1..=3 pairs with right 10*n.
    fn session() -> MatchingSession {
        let left = (1..=3).map(|id| MatchItem::new(id, format!("L{id}"))).collect();
        let right = (1..=3)
            .map(|id| MatchItem::new(id * 10, format!("R{id}")))
            .collect();
        let pairs = (1..=3).map(|id| MatchPair::new(id, id * 10)).collect();
        let bank = Arc::new(PairBank::new(left, right, pairs).unwrap());
        MatchingSession::new(
            bank,
            DisplayOrder::from_permutation(vec![2, 0, 1]).unwrap(),
            TimingConfig::default(),
            PassThreshold::proportional(),
        )
        .unwrap()
    }

    fn attempt(s: &mut MatchingSession, left: u64, right: u64) -> ActionOutcome {
        assert_eq!(s.select_left(ItemId::new(left)), ActionOutcome::Selected);
        assert_eq!(s.select_right(ItemId::new(right)), ActionOutcome::Selected);
        let ActionOutcome::Judged(judgement) = s.confirm_match() else {
            panic!("expected a judgement");
        };
        s.fire_advance(judgement.ticket)
    }

    #[test]
    fn confirm_without_both_sides_is_a_noop() {
        let mut s = session();
        assert_eq!(
            s.confirm_match(),
            ActionOutcome::Ignored(IgnoreReason::IncompleteSelection)
        );
        s.select_left(ItemId::new(1));
        assert_eq!(
            s.confirm_match(),
            ActionOutcome::Ignored(IgnoreReason::IncompleteSelection)
        );
        assert!(s.attempts().is_empty());
    }

    #[test]
    fn correct_pair_scores_and_wrong_pair_does_not() {
        let mut s = session();
        assert_eq!(attempt(&mut s, 1, 10), ActionOutcome::Advanced);
        assert_eq!(s.score(), 1);
        assert_eq!(attempt(&mut s, 2, 30), ActionOutcome::Advanced);
        assert_eq!(s.score(), 1);
        assert_eq!(s.attempts()[1].verdict, Verdict::Incorrect);
    }

    #[test]
    fn resolved_items_cannot_be_reused() {
        let mut s = session();
        attempt(&mut s, 1, 10);
        assert_eq!(
            s.select_left(ItemId::new(1)),
            ActionOutcome::Ignored(IgnoreReason::AlreadyResolved)
        );
        assert_eq!(
            s.select_right(ItemId::new(10)),
            ActionOutcome::Ignored(IgnoreReason::AlreadyResolved)
        );
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn selection_is_blocked_while_feedback_is_pending() {
        let mut s = session();
        s.select_left(ItemId::new(1));
        s.select_right(ItemId::new(10));
        let ActionOutcome::Judged(_) = s.confirm_match() else {
            panic!("expected a judgement");
        };
        assert_eq!(
            s.select_left(ItemId::new(2)),
            ActionOutcome::Ignored(IgnoreReason::FeedbackPending)
        );
        assert_eq!(s.selected(), (None, None));
    }

    #[test]
    fn unknown_items_are_ignored() {
        let mut s = session();
        assert_eq!(
            s.select_left(ItemId::new(10)),
            ActionOutcome::Ignored(IgnoreReason::UnknownItem)
        );
        assert_eq!(
            s.select_right(ItemId::new(1)),
            ActionOutcome::Ignored(IgnoreReason::UnknownItem)
        );
    }

    #[test]
    fn completes_after_every_left_item_is_attempted() {
        let mut s = session();
        assert_eq!(attempt(&mut s, 1, 10), ActionOutcome::Advanced);
        assert_eq!(attempt(&mut s, 2, 30), ActionOutcome::Advanced);
        let last = attempt(&mut s, 3, 20);
        let ActionOutcome::Completed(result) = last else {
            panic!("expected completion, got {last:?}");
        };
        assert_eq!(result.final_score, 1);
        assert_eq!(result.outcome, Outcome::TryAgain);
        assert_eq!(
            s.select_left(ItemId::new(2)),
            ActionOutcome::Ignored(IgnoreReason::SessionComplete)
        );
    }

    #[test]
    fn reset_clears_attempts() {
        let mut s = session();
        attempt(&mut s, 1, 10);
        s.select_left(ItemId::new(2));
        s.reset();
        assert_eq!(s.score(), 0);
        assert!(s.attempts().is_empty());
        assert_eq!(s.selected(), (None, None));
        assert!(!s.is_complete());
    }

    #[test]
    fn view_uses_display_order_for_right_column() {
        let mut s = session();
        s.select_right(ItemId::new(30));
        let view = s.view();
        let ids: Vec<_> = view.right.iter().map(|item| item.id.value()).collect();
        assert_eq!(ids, vec![30, 10, 20]);
        assert!(view.right[0].selected);
        assert!(!view.can_confirm);
    }

    #[test]
    fn display_order_must_cover_the_column() {
        let fresh = session();
        let bank = Arc::new(fresh.bank().clone());
        let err = MatchingSession::new(
            bank,
            DisplayOrder::canonical(2),
            TimingConfig::default(),
            PassThreshold::proportional(),
        )
        .unwrap_err();
        assert_eq!(err, DisplayOrderError::LengthMismatch { expected: 3, found: 2 });
    }
}
