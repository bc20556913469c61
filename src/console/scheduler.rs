//! Deferred, cancellable computer moves.

use std::time::Duration;
use tictactoe_engine::TurnTicket;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Delivers computer-turn tickets after a fixed delay.
///
/// At most one ticket is in flight. Scheduling a new one or calling
/// [`ComputerMoveScheduler::cancel`] aborts the previous timer, so a reset
/// board never receives a reply meant for the old one.
#[derive(Debug)]
pub struct ComputerMoveScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<TurnTicket>,
    pending: Option<(TurnTicket, JoinHandle<()>)>,
}

impl ComputerMoveScheduler {
    /// Creates a scheduler and the receiver its tickets arrive on.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<TurnTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Delivers `ticket` after the delay, replacing any pending one.
    #[instrument(skip(self), fields(delay_ms = self.delay.as_millis() as u64))]
    pub fn schedule(&mut self, ticket: TurnTicket) {
        self.cancel();
        let tx = self.tx.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down.
            let _ = tx.send(ticket);
        });
        self.pending = Some((ticket, handle));
    }

    /// Drops the pending ticket, if any.
    pub fn cancel(&mut self) {
        if let Some((_, handle)) = self.pending.take() {
            if !handle.is_finished() {
                debug!("Cancelling pending computer move");
            }
            handle.abort();
        }
    }

    /// True while a timer is running.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|(_, h)| !h.is_finished())
    }

    /// Marks `ticket` as consumed.
    ///
    /// A ticket other than the one last scheduled leaves the pending timer
    /// in place so it can still be cancelled.
    pub fn delivered(&mut self, ticket: TurnTicket) {
        if self.pending.as_ref().is_some_and(|(t, _)| *t == ticket) {
            self.pending = None;
        } else {
            debug!(?ticket, "Delivered ticket was not the scheduled one");
        }
    }
}

impl Drop for ComputerMoveScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::{Difficulty, GameEngine, GameEvent, GameMode};

    fn ticket_from(events: &[GameEvent]) -> TurnTicket {
        events
            .iter()
            .find_map(|event| match event {
                GameEvent::ComputerTurnPending(ticket) => Some(*ticket),
                _ => None,
            })
            .expect("computer turn should be pending")
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_delivery_keeps_live_timer_cancellable() {
        let mut engine =
            GameEngine::with_seed(0).with_settings(GameMode::HumanVsComputer, Difficulty::Hard);
        let (mut scheduler, mut rx) = ComputerMoveScheduler::new(Duration::from_millis(500));

        let stale = ticket_from(&engine.apply_move(0));
        scheduler.schedule(stale);
        assert_eq!(rx.recv().await, Some(stale));

        engine.reset_round();
        let live = ticket_from(&engine.apply_move(4));
        scheduler.schedule(live);

        scheduler.delivered(stale);
        assert!(scheduler.is_pending());

        scheduler.cancel();
        assert!(!scheduler.is_pending());
        let waited = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert!(waited.is_err(), "cancelled timer still delivered");
    }

    #[tokio::test(start_paused = true)]
    async fn test_matching_delivery_clears_pending() {
        let mut engine =
            GameEngine::with_seed(0).with_settings(GameMode::HumanVsComputer, Difficulty::Hard);
        let (mut scheduler, mut rx) = ComputerMoveScheduler::new(Duration::from_millis(500));

        let ticket = ticket_from(&engine.apply_move(0));
        scheduler.schedule(ticket);
        assert_eq!(rx.recv().await, Some(ticket));
        scheduler.delivered(ticket);
        assert!(!scheduler.is_pending());
    }
}
