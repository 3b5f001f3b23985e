// Repeating reveal timer with an explicit cancellation handle.
//
// The timer runs as its own task and reports ticks over a channel. Each
// schedule gets a fresh generation; ticks from an older generation may still
// be queued after a cancel, and the receiver must drop them (`is_current`).

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Events emitted by the reveal timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { generation: u64 },
}

impl TimerEvent {
    pub fn generation(&self) -> u64 {
        match self {
            TimerEvent::Tick { generation } => *generation,
        }
    }
}

/// Owner of the running reveal timer task, if any.
pub struct RevealTimer {
    tx: mpsc::Sender<TimerEvent>,
    handle: Option<JoinHandle<()>>,
    /// Incremented on every schedule and cancel. u64 will not wrap in practice.
    generation: u64,
}

impl RevealTimer {
    pub fn new(tx: mpsc::Sender<TimerEvent>) -> Self {
        RevealTimer {
            tx,
            handle: None,
            generation: 0,
        }
    }

    /// Start ticking every `period`, first tick one full period from now.
    ///
    /// Any timer already running is cancelled first, so at most one timer is
    /// ever live. Returns the generation carried by the new timer's ticks.
    pub fn schedule(&mut self, period: Duration) -> u64 {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            // A period past the clock's range never elapses.
            let Some(start) = Instant::now().checked_add(period) else {
                debug!("Reveal timer period out of range (gen: {})", generation);
                return;
            };
            let mut ticker = interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(TimerEvent::Tick { generation }).await.is_err() {
                    debug!("Reveal timer receiver closed (gen: {})", generation);
                    break;
                }
            }
        });

        self.handle = Some(handle);
        info!("Scheduled reveal timer every {:?} (gen: {})", period, generation);
        generation
    }

    /// Stop the running timer. Returns `true` if one was running.
    ///
    /// The generation moves on even when nothing was running, so a tick that
    /// was already in flight is recognised as stale.
    pub fn cancel(&mut self) -> bool {
        self.generation += 1;
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                info!("Cancelled reveal timer");
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Whether an event belongs to the live timer.
    pub fn is_current(&self, event: &TimerEvent) -> bool {
        self.handle.is_some() && event.generation() == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for RevealTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_arrive_once_per_period() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = RevealTimer::new(tx);
        let started = Instant::now();
        let generation = timer.schedule(Duration::from_secs(10));

        let first = rx.recv().await.unwrap();
        assert_eq!(first, TimerEvent::Tick { generation });
        assert_eq!(started.elapsed(), Duration::from_secs(10));

        let second = rx.recv().await.unwrap();
        assert!(timer.is_current(&second));
        assert_eq!(started.elapsed(), Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = RevealTimer::new(tx);
        timer.schedule(Duration::from_secs(10));
        assert!(timer.is_running());

        assert!(timer.cancel());
        assert!(!timer.is_running());
        assert!(!timer.cancel());

        let waited = tokio::time::timeout(Duration::from_secs(60), rx.recv()).await;
        assert!(waited.is_err(), "no tick should arrive after cancel");
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_range_period_never_ticks() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = RevealTimer::new(tx);
        timer.schedule(Duration::MAX);

        let waited = tokio::time::timeout(Duration::from_secs(60), rx.recv()).await;
        assert!(waited.is_err(), "an out-of-range period should not tick");
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_makes_old_ticks_stale() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = RevealTimer::new(tx);
        let old = timer.schedule(Duration::from_secs(1));
        let stale = rx.recv().await.unwrap();
        assert_eq!(stale.generation(), old);

        let new = timer.schedule(Duration::from_secs(1));
        assert_ne!(old, new);
        assert!(!timer.is_current(&stale));

        let fresh = rx.recv().await.unwrap();
        assert_eq!(fresh.generation(), new);
        assert!(timer.is_current(&fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_timer_aborts_the_task() {
        let (tx, mut rx) = mpsc::channel(8);
        {
            let mut timer = RevealTimer::new(tx);
            timer.schedule(Duration::from_secs(5));
        }
        // Timer and its sender clone are gone; the channel closes.
        let next = tokio::time::timeout(Duration::from_secs(60), rx.recv()).await;
        assert!(matches!(next, Ok(None)));
    }
}
