//! Button level polling and toggle detection.

/// Anything that can report a digital input level.
pub trait LevelSource {
    fn is_high(&mut self) -> bool;
}

/// Reports a toggle whenever the sampled level differs from the previous sample.
///
/// Press and release are not distinguished: each level change is one toggle.
pub struct ToggleMonitor<S: LevelSource> {
    source: S,
    last: bool,
}

impl<S: LevelSource> ToggleMonitor<S> {
    /// Takes the current level as the baseline, so startup never reports a toggle.
    pub fn new(mut source: S) -> Self {
        let last = source.is_high();
        ToggleMonitor { source, last }
    }

    /// Sample once. Returns `true` if the level changed since the last sample.
    pub fn poll(&mut self) -> bool {
        let level = self.source.is_high();
        if level == self.last {
            return false;
        }
        self.last = level;
        true
    }

    /// Take the current level as the new baseline, discarding any change since the last poll.
    pub fn resync(&mut self) {
        self.last = self.source.is_high();
    }

    pub fn level(&self) -> bool {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed sequence of levels, then holds the last one.
    struct Script {
        levels: VecDeque<bool>,
        hold: bool,
    }

    impl Script {
        fn new(levels: &[bool]) -> Self {
            Script { levels: levels.iter().copied().collect(), hold: false }
        }
    }

    impl LevelSource for Script {
        fn is_high(&mut self) -> bool {
            if let Some(level) = self.levels.pop_front() {
                self.hold = level;
            }
            self.hold
        }
    }

    #[test]
    fn startup_level_is_not_a_toggle() {
        let mut monitor = ToggleMonitor::new(Script::new(&[true]));
        assert!(monitor.level());
        assert!(!monitor.poll());
    }

    #[test]
    fn steady_level_never_toggles() {
        let mut monitor = ToggleMonitor::new(Script::new(&[false, false, false, false]));
        assert!((0..5).all(|_| !monitor.poll()));
    }

    #[test]
    fn press_and_release_are_each_a_toggle() {
        // baseline low, press, hold, release
        let mut monitor = ToggleMonitor::new(Script::new(&[false, true, true, false]));
        let toggles: Vec<bool> = (0..3).map(|_| monitor.poll()).collect();
        assert_eq!(toggles, vec![true, false, true]);
        assert!(!monitor.level());
    }

    #[test]
    fn resync_swallows_pending_change() {
        let mut monitor = ToggleMonitor::new(Script::new(&[false, true]));
        monitor.resync();
        assert!(monitor.level());
        assert!(!monitor.poll());
    }
}
