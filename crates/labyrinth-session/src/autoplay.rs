//! Timer-driven playback of a session's solver.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::session::{MazeSession, TimeDirection};
use crate::Result;

/// Where auto-play is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Not started, or stopped by a reset
    Stopped,
    /// Stepping forward on every tick
    Playing,
    /// Waiting for `resume`
    Paused,
    /// The solver ran out of steps
    Finished,
}

/// Repeatedly steps a session forward until the solver is exhausted.
///
/// Bound to the session epoch it was started in: once the maze is replaced
/// or the solver reset, the next tick stops instead of stepping.
#[derive(Debug, Clone)]
pub struct AutoPlay {
    state: PlaybackState,
    delay_ms: u64,
    epoch: Option<u64>,
    steps: usize,
}

impl AutoPlay {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            state: PlaybackState::Stopped,
            delay_ms,
            epoch: None,
            steps: 0,
        }
    }

    /// Uses the session's configured delay.
    pub fn for_session(session: &MazeSession) -> Self {
        Self::new(session.config().autoplay_delay_ms)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Takes effect on the next [`run`](Self::run).
    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    /// Steps taken since the last `start`.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Begin playing against the session's current epoch.
    pub fn start(&mut self, session: &MazeSession) {
        self.epoch = Some(session.epoch());
        self.steps = 0;
        self.state = PlaybackState::Playing;
        debug!(epoch = session.epoch(), "auto-play started");
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
    }

    pub fn stop(&mut self) {
        self.epoch = None;
        self.state = PlaybackState::Stopped;
    }

    /// Timer period, at least one millisecond.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.delay_ms.max(1))
    }

    /// Take one forward step if playing. Returns whether a step was taken.
    pub fn tick(&mut self, session: &mut MazeSession) -> Result<bool> {
        if self.state != PlaybackState::Playing {
            return Ok(false);
        }

        if self.epoch != Some(session.epoch()) {
            warn!(
                started = ?self.epoch,
                current = session.epoch(),
                "session changed under auto-play, stopping"
            );
            self.stop();
            return Ok(false);
        }

        match session.take_step_in_solution(TimeDirection::Forward) {
            Ok(true) => {
                self.steps += 1;
                Ok(true)
            }
            Ok(false) => {
                debug!(steps = self.steps, "auto-play finished");
                self.state = PlaybackState::Finished;
                Ok(false)
            }
            Err(err) => {
                self.stop();
                Err(err)
            }
        }
    }

    /// Tick on a timer until playback stops. Starts playback if stopped.
    ///
    /// Returns the number of steps taken since the last start.
    pub async fn run(&mut self, session: &mut MazeSession) -> Result<usize> {
        if matches!(self.state, PlaybackState::Stopped | PlaybackState::Finished) {
            self.start(session);
        }
        let mut ticker = tokio::time::interval(self.interval());
        while self.state == PlaybackState::Playing {
            ticker.tick().await;
            self.tick(session)?;
        }
        Ok(self.steps)
    }

    pub fn status(&self, session: &MazeSession) -> PlaybackStatus {
        PlaybackStatus {
            state: self.state,
            steps: self.steps,
            history_index: session.history().history_index(),
            can_undo: session.history().can_undo(),
            can_redo: session.history().can_redo(),
        }
    }
}

/// Snapshot of playback for a UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub state: PlaybackState,
    pub steps: usize,
    pub history_index: isize,
    pub can_undo: bool,
    pub can_redo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionConfig;

    fn session() -> MazeSession {
        let mut session = MazeSession::new(SessionConfig {
            rows: 5,
            cols: 5,
            seed: Some(3),
            ..SessionConfig::default()
        })
        .unwrap();
        session.generate_maze().unwrap();
        session
    }

    #[test]
    fn interval_follows_the_configured_delay() {
        let session = MazeSession::new(SessionConfig {
            autoplay_delay_ms: 40,
            ..SessionConfig::default()
        })
        .unwrap();
        let mut play = AutoPlay::for_session(&session);
        assert_eq!(play.delay_ms(), 40);
        assert_eq!(play.interval(), Duration::from_millis(40));

        play.set_delay_ms(0);
        assert_eq!(play.interval(), Duration::from_millis(1));
    }

    #[test]
    fn ticks_only_while_playing() {
        let mut session = session();
        let mut play = AutoPlay::for_session(&session);

        assert!(!play.tick(&mut session).unwrap());
        assert_eq!(play.state(), PlaybackState::Stopped);

        play.start(&session);
        assert!(play.tick(&mut session).unwrap());
        play.pause();
        assert!(!play.tick(&mut session).unwrap());
        play.resume();
        assert!(play.tick(&mut session).unwrap());
        assert_eq!(play.steps(), 2);
        assert_eq!(session.history().history_index(), 1);
    }

    #[test]
    fn plays_to_the_end() {
        let mut session = session();
        let mut play = AutoPlay::for_session(&session);
        play.start(&session);

        while play.tick(&mut session).unwrap() {}

        assert_eq!(play.state(), PlaybackState::Finished);
        assert_eq!(play.steps(), session.history().len());
        assert_eq!(session.solution().first(), Some(session.start()));
        assert_eq!(session.solution().last(), Some(session.end()));
    }

    #[test]
    fn stops_when_the_maze_is_replaced() {
        let mut session = session();
        let mut play = AutoPlay::for_session(&session);
        play.start(&session);
        play.tick(&mut session).unwrap();

        session.generate_maze().unwrap();

        assert!(!play.tick(&mut session).unwrap());
        assert_eq!(play.state(), PlaybackState::Stopped);
        assert!(session.history().is_empty());
        assert!(!session.has_active_solver());
    }

    #[test]
    fn status_reflects_history() {
        let mut session = session();
        let mut play = AutoPlay::for_session(&session);
        play.start(&session);
        play.tick(&mut session).unwrap();

        let status = play.status(&session);
        assert_eq!(status.state, PlaybackState::Playing);
        assert_eq!(status.steps, 1);
        assert_eq!(status.history_index, 0);
        assert!(status.can_undo);
        assert!(!status.can_redo);
    }

    #[tokio::test]
    async fn run_drives_the_solver_to_completion() {
        let mut session = session();
        let mut play = AutoPlay::new(0);

        let steps = play.run(&mut session).await.unwrap();

        assert!(steps > 0);
        assert_eq!(play.state(), PlaybackState::Finished);
        assert_eq!(
            session.take_step(TimeDirection::Forward).unwrap(),
            crate::StepOutcome::Exhausted
        );
    }
}
