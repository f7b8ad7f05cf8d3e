use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent};

pub enum Event {
    /// Press, repeat and release events alike.
    Key(KeyEvent),
    Tick,
}

/// Polls the terminal on a background thread and emits ticks on a fixed
/// cadence. Dropping the handler stops and joins the thread.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let worker = thread::spawn(move || {
            let mut last_tick = Instant::now();
            while flag.load(Ordering::Relaxed) {
                // Wait only until the next tick is due so key traffic cannot
                // stretch the tick interval.
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) {
                    if let Ok(crossterm::event::Event::Key(key)) = event::read() {
                        if tx.send(Event::Key(key)).is_err() {
                            return;
                        }
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    last_tick = Instant::now();
                    if tx.send(Event::Tick).is_err() {
                        return;
                    }
                }
            }
        });

        Self {
            rx,
            running,
            worker: Some(worker),
        }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("event thread panicked during shutdown");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_arrive_and_drop_stops_the_thread() {
        let events = EventHandler::new(Duration::from_millis(5));
        let mut ticked = false;
        for _ in 0..100 {
            if matches!(events.next().unwrap(), Event::Tick) {
                ticked = true;
                break;
            }
        }
        assert!(ticked);

        let started = Instant::now();
        drop(events);
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
