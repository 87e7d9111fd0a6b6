// Rotation scheduler - interval-driven slide cycling for one display group
use crate::domain::rotation::Rotation;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

const MIN_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
struct Slides {
    rotation: Rotation,
    /// Bumped on every start; a timer only advances its own generation
    generation: u64,
}

pub struct RotationScheduler {
    group: &'static str,
    slides: Arc<Mutex<Slides>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RotationScheduler {
    pub fn new(group: &'static str) -> Self {
        Self {
            group,
            slides: Arc::new(Mutex::new(Slides::default())),
            timer: Mutex::new(None),
        }
    }

    /// Show slide 0 and, when there is more than one slide, cycle every
    /// `interval_seconds`. Any running timer is cancelled first.
    pub fn start(&self, slide_count: usize, interval_seconds: u64) {
        let mut timer = lock(&self.timer);
        if let Some(handle) = timer.take() {
            handle.abort();
        }

        let generation = {
            let mut slides = lock(&self.slides);
            slides.generation += 1;
            if !slides.rotation.start(slide_count) {
                tracing::debug!(
                    "{} rotation {:?} ({} slides)",
                    self.group,
                    slides.rotation.phase(),
                    slide_count
                );
                return;
            }
            slides.generation
        };

        let period = Duration::from_secs(interval_seconds).max(MIN_INTERVAL);
        tracing::debug!(
            "{} rotation started: {} slides every {:?}",
            self.group,
            slide_count,
            period
        );

        let slides = Arc::clone(&self.slides);
        let group = self.group;
        *timer = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let mut current = lock(&slides);
                if current.generation != generation {
                    return;
                }
                if let Some(change) = current.rotation.tick() {
                    tracing::trace!("{} slide {} -> {}", group, change.hidden, change.shown);
                }
            }
        }));
    }

    pub fn stop(&self) {
        if let Some(handle) = lock(&self.timer).take() {
            handle.abort();
        }
        let mut slides = lock(&self.slides);
        slides.generation += 1;
        slides.rotation.stop();
    }

    pub fn has_timer(&self) -> bool {
        lock(&self.timer)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Index of the slide currently shown
    pub fn active(&self) -> Option<usize> {
        lock(&self.slides).rotation.active()
    }
}

impl Drop for RotationScheduler {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.timer).take() {
            handle.abort();
        }
    }
}
