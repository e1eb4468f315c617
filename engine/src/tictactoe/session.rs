use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::stats::Stats;
use super::game_state::{GameOverNotification, GameSession, SessionSnapshot, TurnResult};
use super::types::SessionSettings;

/// Presentation-side sink for everything the session emits.
pub trait SessionObserver: Send + Sync + Clone + 'static {
    fn on_state(&self, snapshot: SessionSnapshot) -> impl Future<Output = ()> + Send;

    fn on_game_over(&self, notification: GameOverNotification) -> impl Future<Output = ()> + Send;
}

#[derive(Clone)]
pub struct SessionController<O: SessionObserver> {
    session: Arc<Mutex<GameSession>>,
    observer: O,
    bot_delay: Duration,
}

impl<O: SessionObserver> SessionController<O> {
    pub fn new(session: GameSession, observer: O, bot_delay: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            observer,
            bot_delay,
        }
    }

    pub async fn start(&self, settings: SessionSettings) {
        let (result, snapshot) = {
            let mut session = self.session.lock().await;
            let result = session.start(settings);
            (result, session.snapshot())
        };
        self.dispatch(result, snapshot).await;
    }

    pub async fn handle_move(&self, index: usize) {
        let (result, snapshot) = {
            let mut session = self.session.lock().await;
            let result = session.place_mark(index);
            (result, session.snapshot())
        };
        self.dispatch(result, snapshot).await;
    }

    /// Any bot move still waiting out its delay is dropped when it wakes.
    pub async fn reset(&self) {
        let snapshot = {
            let mut session = self.session.lock().await;
            session.reset();
            session.snapshot()
        };
        self.observer.on_state(snapshot).await;
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    pub async fn stats(&self) -> Stats {
        self.session.lock().await.stats()
    }

    async fn dispatch(&self, result: TurnResult, snapshot: SessionSnapshot) {
        if let TurnResult::BotTurn { generation } = result {
            self.schedule_bot_turn(generation);
        }
        notify(&self.observer, result, snapshot).await;
    }

    fn schedule_bot_turn(&self, generation: u64) {
        let session = self.session.clone();
        let observer = self.observer.clone();
        let delay = self.bot_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let (result, snapshot) = {
                let mut session = session.lock().await;
                let result = session.play_bot_turn(generation);
                (result, session.snapshot())
            };
            notify(&observer, result, snapshot).await;
        });
    }
}

async fn notify<O: SessionObserver>(observer: &O, result: TurnResult, snapshot: SessionSnapshot) {
    match result {
        TurnResult::Ignored => {}
        TurnResult::Continue | TurnResult::BotTurn { .. } => observer.on_state(snapshot).await,
        TurnResult::Finished(notification) => {
            observer.on_state(snapshot).await;
            observer.on_game_over(notification).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryContentProvider;
    use crate::session_rng::SessionRng;
    use crate::stats::StatsStore;
    use crate::tictactoe::{Board, Difficulty, Mark, Outcome, SessionPhase, StatusMessage, WinningLine};

    const DELAY: Duration = Duration::from_millis(800);

    #[derive(Clone, Default)]
    struct RecordingObserver {
        states: Arc<std::sync::Mutex<Vec<SessionSnapshot>>>,
        game_overs: Arc<std::sync::Mutex<Vec<GameOverNotification>>>,
    }

    impl RecordingObserver {
        fn states(&self) -> Vec<SessionSnapshot> {
            self.states.lock().unwrap().clone()
        }

        fn game_overs(&self) -> Vec<GameOverNotification> {
            self.game_overs.lock().unwrap().clone()
        }
    }

    impl SessionObserver for RecordingObserver {
        async fn on_state(&self, snapshot: SessionSnapshot) {
            self.states.lock().unwrap().push(snapshot);
        }

        async fn on_game_over(&self, notification: GameOverNotification) {
            self.game_overs.lock().unwrap().push(notification);
        }
    }

    fn controller() -> (SessionController<RecordingObserver>, RecordingObserver) {
        let session = GameSession::new(StatsStore::new(MemoryContentProvider::new()), SessionRng::new(1));
        let observer = RecordingObserver::default();
        (SessionController::new(session, observer.clone(), DELAY), observer)
    }

    async fn wait_out_delay() {
        tokio::time::sleep(DELAY + Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_bot_moves_after_delay() {
        let (controller, observer) = controller();
        controller.start(SessionSettings::vs_bot(Difficulty::Hard)).await;
        controller.handle_move(0).await;

        let thinking = controller.snapshot().await;
        assert_eq!(thinking.status, StatusMessage::BotThinking);
        assert_eq!(thinking.cells[4], Mark::Empty);

        wait_out_delay().await;

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.cells[4], Mark::O);
        assert_eq!(snapshot.status, StatusMessage::YourTurn);
        assert_eq!(observer.states().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_delay_discards_bot_move() {
        let (controller, observer) = controller();
        controller.start(SessionSettings::vs_bot(Difficulty::Hard)).await;
        controller.handle_move(0).await;
        controller.reset().await;

        wait_out_delay().await;

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.cells, *Board::new().cells());
        assert_eq!(snapshot.phase, SessionPhase::Idle);
        assert_eq!(observer.states().last().map(|s| s.phase), Some(SessionPhase::Idle));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_during_delay_keeps_new_board_clean() {
        let (controller, _observer) = controller();
        controller.start(SessionSettings::vs_bot(Difficulty::Easy)).await;
        controller.handle_move(4).await;
        controller.reset().await;
        controller.start(SessionSettings::pvp()).await;

        wait_out_delay().await;

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.cells, *Board::new().cells());
        assert_eq!(snapshot.phase, SessionPhase::InProgress);
        assert_eq!(snapshot.current_mark, Mark::X);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ignored_input_emits_nothing() {
        let (controller, observer) = controller();
        controller.handle_move(3).await;
        assert!(observer.states().is_empty());

        controller.start(SessionSettings::pvp()).await;
        controller.handle_move(3).await;
        controller.handle_move(3).await;
        assert_eq!(observer.states().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pvp_game_over_notification() {
        let (controller, observer) = controller();
        controller.start(SessionSettings::pvp()).await;
        for index in [0, 1, 4, 2, 8] {
            controller.handle_move(index).await;
        }

        let game_overs = observer.game_overs();
        assert_eq!(game_overs.len(), 1);
        assert_eq!(game_overs[0].outcome, Outcome::Win(WinningLine::new(Mark::X, [0, 4, 8])));
        assert_eq!(controller.stats().await, Stats::default());

        controller.handle_move(5).await;
        assert_eq!(observer.states().len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hard_bot_game_ends_in_stats_update() {
        let (controller, observer) = controller();
        controller.start(SessionSettings::vs_bot(Difficulty::Hard)).await;

        for index in [1, 2, 3, 5, 6, 7, 8] {
            if controller.snapshot().await.phase != SessionPhase::InProgress {
                break;
            }
            controller.handle_move(index).await;
            wait_out_delay().await;
        }

        let game_overs = observer.game_overs();
        assert_eq!(game_overs.len(), 1);
        assert_eq!(game_overs[0].status, StatusMessage::BotWon);
        assert_eq!(controller.stats().await.losses, 1);
    }
}
