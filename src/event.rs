use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};

/// Decay-clock interval (~30 fps).
const TICK_RATE_MS: u64 = 33;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

/// Fixed-cadence deadline for the decay tick. A stall emits a single
/// late tick rather than a burst; `App::on_tick` measures real elapsed
/// time, so late ticks never skew the decay amount.
struct TickClock {
    period: Duration,
    next: Instant,
}

impl TickClock {
    fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    /// Time left until the deadline; zero once it has passed.
    fn timeout(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Whether the deadline passed. Reschedules from `now`, not from the
    /// missed deadline.
    fn due(&mut self, now: Instant) -> bool {
        if now >= self.next {
            self.next = now + self.period;
            true
        } else {
            false
        }
    }
}

/// Turns terminal keys and the decay clock into a single event stream.
/// The tick cadence lives here; callers just consume `next()`.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || pump(&tx));
        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}

/// Wait for keys until the next tick deadline, forwarding keys as they
/// arrive and ticks when the clock comes due. Other terminal events are
/// ignored; the next tick redraws within one period anyway.
fn pump(tx: &mpsc::Sender<AppEvent>) {
    let mut clock = TickClock::new(Duration::from_millis(TICK_RATE_MS));
    loop {
        if event::poll(clock.timeout(Instant::now())).unwrap_or(false)
            && let Ok(Event::Key(key)) = event::read()
            && tx.send(AppEvent::Key(key)).is_err()
        {
            return;
        }
        if clock.due(Instant::now()) && tx.send(AppEvent::Tick).is_err() {
            return;
        }
    }
}
