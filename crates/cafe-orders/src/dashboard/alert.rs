//! Audible new-order alert with a playback ceiling.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Something that can make a noise.
pub trait AlertSound: Send + Sync {
    fn play(&self) -> std::io::Result<()>;
    fn stop(&self);
}

/// Rings the terminal bell. Stopping is a no-op; the bell is instantaneous.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl AlertSound for TerminalBell {
    fn play(&self) -> std::io::Result<()> {
        let mut err = std::io::stderr();
        err.write_all(b"\x07")?;
        err.flush()
    }

    fn stop(&self) {}
}

/// Plays the sound and force-stops it once `ceiling` has passed.
///
/// A new trigger restarts the window: only the stop scheduled by the latest
/// trigger takes effect.
#[derive(Clone)]
pub struct BoundedAlert {
    sound: Arc<dyn AlertSound>,
    ceiling: Duration,
    generation: Arc<AtomicU64>,
}

impl BoundedAlert {
    pub fn new(sound: Arc<dyn AlertSound>, ceiling: Duration) -> Self {
        Self {
            sound,
            ceiling,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Must be called inside a Tokio runtime. Playback failures are logged
    /// and otherwise ignored.
    pub fn trigger(&self) {
        if let Err(e) = self.sound.play() {
            warn!(error = %e, "Alert playback failed");
            return;
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let sound = self.sound.clone();
        let latest = self.generation.clone();
        let ceiling = self.ceiling;
        tokio::spawn(async move {
            tokio::time::sleep(ceiling).await;
            if latest.load(Ordering::SeqCst) == generation {
                sound.stop();
                debug!("Alert stopped");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct Counting {
        plays: AtomicUsize,
        stops: AtomicUsize,
        broken: bool,
    }

    impl AlertSound for Counting {
        fn play(&self) -> std::io::Result<()> {
            if self.broken {
                return Err(std::io::Error::other("no audio device"));
            }
            self.plays.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn stop(&self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn playback_is_stopped_at_the_ceiling() {
        let sound = Arc::new(Counting::default());
        let alert = BoundedAlert::new(sound.clone(), Duration::from_secs(20));

        alert.trigger();
        assert_eq!(sound.plays.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(19)).await;
        assert_eq!(sound.stops.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(sound.stops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retrigger_extends_the_window() {
        let sound = Arc::new(Counting::default());
        let alert = BoundedAlert::new(sound.clone(), Duration::from_secs(20));

        alert.trigger();
        tokio::time::sleep(Duration::from_secs(10)).await;
        alert.trigger();

        tokio::time::sleep(Duration::from_secs(15)).await;
        assert_eq!(sound.stops.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(sound.plays.load(Ordering::SeqCst), 2);
        assert_eq!(sound.stops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_playback_schedules_nothing() {
        let sound = Arc::new(Counting {
            broken: true,
            ..Default::default()
        });
        BoundedAlert::new(sound.clone(), Duration::from_secs(20)).trigger();

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(sound.stops.load(Ordering::SeqCst), 0);
    }
}
