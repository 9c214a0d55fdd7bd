//! One-shot delayed tasks
//!
//! Tasks carry the session generation they were scheduled under. When a task
//! comes due under a different generation it is dropped instead of returned,
//! so nothing scheduled during one run can act on the next.

use hilltop_core::Generation;
use std::fmt;

/// A task waiting for its fire time
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTask<T> {
    pub task: T,
    /// Wall-clock timestamp at which the task becomes due
    pub fire_at: f64,
    pub generation: Generation,
}

/// Queue of one-shot delayed tasks
#[derive(Debug)]
pub struct Scheduler<T> {
    tasks: Vec<ScheduledTask<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<T: fmt::Debug> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to fire at `fire_at` under `generation`
    pub fn schedule(&mut self, task: T, fire_at: f64, generation: Generation) {
        log::debug!("Scheduled {:?} at {:.3} ({})", task, fire_at, generation);
        self.tasks.push(ScheduledTask {
            task,
            fire_at,
            generation,
        });
    }

    /// Remove and return every task due at `now` that belongs to `current`,
    /// ordered by fire time. Due tasks from other generations are discarded.
    pub fn due(&mut self, now: f64, current: Generation) -> Vec<T> {
        let (mut ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|t| t.fire_at <= now);
        self.tasks = waiting;

        ready.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at));
        ready
            .into_iter()
            .filter_map(|t| {
                if t.generation == current {
                    Some(t.task)
                } else {
                    log::debug!(
                        "Dropping stale task {:?} from {} (now {})",
                        t.task,
                        t.generation,
                        current
                    );
                    None
                }
            })
            .collect()
    }

    /// Earliest pending fire time
    pub fn next_fire_time(&self) -> Option<f64> {
        self.tasks.iter().map(|t| t.fire_at).min_by(f64::total_cmp)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledTask<T>> {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hilltop_core::GenerationCounter;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Task {
        Menu,
        Banner,
    }

    #[test]
    fn test_fires_once_when_due() {
        let counter = GenerationCounter::new();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Task::Menu, 2.0, counter.current());

        assert!(scheduler.due(1.9, counter.current()).is_empty());
        assert_eq!(scheduler.due(2.0, counter.current()), vec![Task::Menu]);
        assert!(scheduler.due(5.0, counter.current()).is_empty());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_stale_generation_dropped() {
        let mut counter = GenerationCounter::new();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Task::Menu, 2.0, counter.current());

        let next = counter.bump();
        scheduler.schedule(Task::Banner, 3.0, next);

        assert_eq!(scheduler.due(10.0, counter.current()), vec![Task::Banner]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_ordered_by_fire_time() {
        let counter = GenerationCounter::new();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Task::Menu, 2.0, counter.current());
        scheduler.schedule(Task::Banner, 1.0, counter.current());

        assert_eq!(scheduler.next_fire_time(), Some(1.0));
        assert_eq!(
            scheduler.due(2.5, counter.current()),
            vec![Task::Banner, Task::Menu]
        );
    }
}
