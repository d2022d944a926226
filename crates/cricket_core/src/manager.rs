//! Continuous match runner.
//!
//! The manager repeatedly picks two teams, plays a match delivery by
//! delivery, publishes a snapshot after every ball and appends a record to
//! its history when the match ends. It is meant to be shared behind an `Arc`:
//! one thread drives [`MatchManager::run`] while others poll
//! [`MatchManager::current_snapshot`] and [`MatchManager::history`] or call
//! [`MatchManager::stop`].
//!
//! The runner owns the match in play and stores a fresh snapshot after every
//! delivery, so readers never observe a half-applied ball.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::data::teams::default_teams;
use crate::engine::config::ManagerConfig;
use crate::engine::match_sim::CricketMatch;
use crate::engine::snapshot::MatchSnapshot;
use crate::error::{MatchError, Result};
use crate::models::history::MatchRecord;
use crate::models::roster::Roster;
use crate::publish::SnapshotPublisher;

pub struct MatchManager {
    teams: Vec<Arc<Roster>>,
    config: ManagerConfig,
    current: RwLock<Option<MatchSnapshot>>,
    history: RwLock<Vec<MatchRecord>>,
    rng: Mutex<ChaCha8Rng>,
    running: AtomicBool,
    pause_lock: Mutex<()>,
    wake: Condvar,
}

impl MatchManager {
    pub fn new(teams: Vec<Arc<Roster>>, config: ManagerConfig) -> Result<Self> {
        config.validate()?;
        if teams.len() < 2 {
            return Err(MatchError::NotEnoughTeams { found: teams.len() });
        }
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            teams,
            config,
            current: RwLock::new(None),
            history: RwLock::new(Vec::new()),
            rng: Mutex::new(rng),
            running: AtomicBool::new(false),
            pause_lock: Mutex::new(()),
            wake: Condvar::new(),
        })
    }

    /// Manager over the built-in team sheets.
    pub fn with_default_teams(config: ManagerConfig) -> Result<Self> {
        Self::new(default_teams(), config)
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn teams(&self) -> &[Arc<Roster>] {
        &self.teams
    }

    // ========================
    // Run loop
    // ========================

    /// Play matches until stopped or until `max_matches` have finished.
    ///
    /// Returns the number of matches played by this call. A second concurrent
    /// call is refused and returns `Ok(0)`.
    pub fn run(
        &self,
        publisher: &dyn SnapshotPublisher,
        max_matches: Option<usize>,
    ) -> Result<usize> {
        if !self.claim() {
            return Ok(0);
        }
        self.run_claimed(publisher, max_matches)
    }

    /// Run on a background thread.
    ///
    /// The manager is marked running before the thread is spawned, so a
    /// [`Self::stop`] issued right after this call is never lost. If another
    /// run is already active the thread returns `Ok(0)` at once.
    pub fn start(
        self: &Arc<Self>,
        publisher: Arc<dyn SnapshotPublisher>,
        max_matches: Option<usize>,
    ) -> JoinHandle<Result<usize>> {
        let claimed = self.claim();
        let manager = Arc::clone(self);
        std::thread::spawn(move || {
            if !claimed {
                return Ok(0);
            }
            manager.run_claimed(publisher.as_ref(), max_matches)
        })
    }

    fn claim(&self) -> bool {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("match manager is already running");
            return false;
        }
        true
    }

    /// Match loop for a caller that has already set `running`.
    fn run_claimed(
        &self,
        publisher: &dyn SnapshotPublisher,
        max_matches: Option<usize>,
    ) -> Result<usize> {
        let mut played = 0;
        let outcome = loop {
            if !self.is_running() || max_matches.is_some_and(|max| played >= max) {
                break Ok(played);
            }
            if let Err(err) = self.play_one(publisher) {
                break Err(err);
            }
            played += 1;
            if max_matches.map_or(true, |max| played < max) {
                self.pause(self.config.match_interval());
            }
        };

        self.running.store(false, Ordering::SeqCst);
        info!(played, "match manager stopped");
        outcome
    }

    /// Ask the run loop to halt.
    ///
    /// The match in progress is played out without pacing, recorded, and
    /// then the loop exits.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        let _guard = lock(&self.pause_lock);
        self.wake.notify_all();
        info!("match manager stop requested");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Play one full match, publishing after every delivery.
    pub fn play_one(&self, publisher: &dyn SnapshotPublisher) -> Result<MatchRecord> {
        let (team_a, team_b) = self.select_teams();
        let seed = lock(&self.rng).gen::<u64>();
        let mut game = CricketMatch::with_seed(team_a, team_b, self.config.match_config, seed)?
            .with_venue(self.config.venue.clone());
        info!(match_id = %game.id(), title = %game.title(), seed, "starting match");
        *write(&self.current) = Some(game.snapshot());

        while game.step().is_some() {
            let snapshot = game.snapshot();
            *write(&self.current) = Some(snapshot.clone());
            self.publish(publisher, &snapshot);
            self.pause(self.config.delivery_interval());
        }

        let record = game.record().with_finished_at(Utc::now());
        write(&self.history).push(record.clone());
        self.publish(publisher, &game.snapshot());
        info!(match_id = %record.id, result = %record.result, "match recorded");
        Ok(record)
    }

    fn select_teams(&self) -> (Arc<Roster>, Arc<Roster>) {
        let mut rng = lock(&self.rng);
        let count = self.teams.len();
        let first = rng.gen_range(0..count);
        let mut second = rng.gen_range(0..count - 1);
        if second >= first {
            second += 1;
        }
        (Arc::clone(&self.teams[first]), Arc::clone(&self.teams[second]))
    }

    fn publish(&self, publisher: &dyn SnapshotPublisher, snapshot: &MatchSnapshot) {
        let payload = match snapshot.to_json_value() {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "failed to encode snapshot");
                return;
            }
        };
        if let Err(err) = publisher.publish(&self.config.subject, &payload) {
            warn!(subject = %self.config.subject, error = %err, "failed to publish snapshot");
        }
    }

    /// Sleep for `duration`, waking early on stop. No-op once stopped.
    fn pause(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        let guard = lock(&self.pause_lock);
        let _ = self
            .wake
            .wait_timeout_while(guard, duration, |_| self.is_running())
            .unwrap_or_else(|poisoned| poisoned.into_inner());
    }

    // ========================
    // Read endpoints
    // ========================

    /// Snapshot of the match in progress (or the last one played).
    pub fn current_snapshot(&self) -> Option<MatchSnapshot> {
        read(&self.current).clone()
    }

    /// Finished matches, oldest first.
    pub fn history(&self) -> Vec<MatchRecord> {
        read(&self.history).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::{ChannelPublisher, NullPublisher};

    fn fast_config(seed: u64) -> ManagerConfig {
        ManagerConfig {
            delivery_interval_ms: 0,
            match_interval_ms: 0,
            seed: Some(seed),
            ..ManagerConfig::default()
        }
    }

    #[test]
    fn test_needs_two_teams() {
        let one = default_teams().into_iter().take(1).collect();
        let err = MatchManager::new(one, fast_config(1)).err().unwrap();
        assert!(matches!(err, MatchError::NotEnoughTeams { found: 1 }));
    }

    #[test]
    fn test_no_snapshot_before_first_match() {
        let manager = MatchManager::with_default_teams(fast_config(1)).unwrap();
        assert!(manager.current_snapshot().is_none());
        assert!(manager.history().is_empty());
    }

    #[test]
    fn test_run_records_history() {
        let manager = MatchManager::with_default_teams(fast_config(5)).unwrap();
        let played = manager.run(&NullPublisher, Some(3)).unwrap();
        assert_eq!(played, 3);
        assert!(!manager.is_running());

        let history = manager.history();
        assert_eq!(history.len(), 3);
        for record in &history {
            assert_ne!(record.teams[0].team, record.teams[1].team);
            assert!(!record.result.is_empty());
            assert!(record.finished_at.is_some());
        }
        let last = manager.current_snapshot().unwrap();
        assert!(last.match_ended);
        assert_eq!(last.id, history[2].id);
    }

    #[test]
    fn test_publishes_every_delivery_and_final_state() {
        let manager = MatchManager::with_default_teams(fast_config(9)).unwrap();
        let (publisher, receiver) = ChannelPublisher::new();
        let record = manager.play_one(&publisher).unwrap();

        let messages: Vec<_> = receiver.try_iter().collect();
        assert!(messages.len() >= 2);
        assert!(messages.iter().all(|(subject, _)| subject == "stark.sports.data"));
        // The deciding delivery and the closing publish both carry the result.
        let ended = messages.iter().filter(|(_, payload)| payload["match_ended"] == true).count();
        assert_eq!(ended, 2);
        let (_, first) = &messages[0];
        assert_eq!(first["result"], "");
        assert_eq!(first["live"]["update"].as_str().map(|u| u.is_empty()), Some(false));
        let (_, last) = messages.last().unwrap();
        assert_eq!(last["result"], record.result.as_str());
        assert_eq!(last["id"], record.id.to_string());
    }

    #[test]
    fn test_same_seed_same_history() {
        let results = |seed| {
            let manager = MatchManager::with_default_teams(fast_config(seed)).unwrap();
            manager.run(&NullPublisher, Some(2)).unwrap();
            manager
                .history()
                .into_iter()
                .map(|r| (r.id, r.title, r.result))
                .collect::<Vec<_>>()
        };
        assert_eq!(results(77), results(77));
    }

    #[test]
    fn test_stop_finishes_in_flight_match() {
        let config = ManagerConfig { delivery_interval_ms: 50, ..fast_config(3) };
        let manager = Arc::new(MatchManager::with_default_teams(config).unwrap());
        let handle = manager.start(Arc::new(NullPublisher), None);

        // Wait for the first delivery, then stop mid-match.
        while manager.current_snapshot().map_or(true, |s| s.live.update.is_empty()) {
            std::thread::sleep(Duration::from_millis(5));
        }
        manager.stop();

        let played = handle.join().unwrap().unwrap();
        assert_eq!(played, 1);
        let history = manager.history();
        assert_eq!(history.len(), 1);
        assert!(!history[0].result.is_empty());
        assert!(manager.current_snapshot().unwrap().match_ended);
    }

    #[test]
    fn test_stop_right_after_start_is_honoured() {
        let config = ManagerConfig { delivery_interval_ms: 1, ..fast_config(6) };
        let manager = Arc::new(MatchManager::with_default_teams(config).unwrap());
        let handle = manager.start(Arc::new(NullPublisher), None);
        assert!(manager.is_running());
        manager.stop();

        // Joining returns only because the unbounded loop saw the stop.
        let played = handle.join().unwrap().unwrap();
        assert!(played <= 1, "played {played} matches after stop");
        assert!(!manager.is_running());
        assert_eq!(manager.history().len(), played);
    }

    #[test]
    fn test_start_while_running_returns_immediately() {
        let config = ManagerConfig { delivery_interval_ms: 20, ..fast_config(8) };
        let manager = Arc::new(MatchManager::with_default_teams(config).unwrap());
        let first = manager.start(Arc::new(NullPublisher), None);
        let second = manager.start(Arc::new(NullPublisher), None);
        assert_eq!(second.join().unwrap().unwrap(), 0);
        assert!(manager.is_running());
        manager.stop();
        assert!(first.join().unwrap().is_ok());
    }

    #[test]
    fn test_second_run_refused_while_running() {
        let config = ManagerConfig { delivery_interval_ms: 20, ..fast_config(4) };
        let manager = Arc::new(MatchManager::with_default_teams(config).unwrap());
        let handle = manager.start(Arc::new(NullPublisher), None);
        assert!(manager.is_running());
        assert_eq!(manager.run(&NullPublisher, Some(1)).unwrap(), 0);
        manager.stop();
        assert!(handle.join().unwrap().is_ok());
    }
}
