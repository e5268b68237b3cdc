/// Tracks where playback is in the route and whether it's running. The repeating timer itself
/// lives with the caller: it should deliver ticks to `advance` only while `is_playing`.
pub struct Playback {
    len: usize,
    idx: usize,
    status: PlaybackStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    Paused,
    Playing,
    Finished,
}

/// What a call to `toggle` did.
#[derive(Debug, PartialEq, Eq)]
pub enum Toggle {
    Started,
    Paused,
    /// Playback was finished; the index is back at 0 and playing again. The caller must reset the
    /// traveled path and marker to the first sample.
    Replayed,
}

/// What a tick did.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Moved { prev: usize, current: usize },
    Finished,
}

impl Playback {
    /// `len` is the number of samples in the route, at least 1.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            idx: 0,
            status: PlaybackStatus::Paused,
        }
    }

    pub fn current_index(&self) -> usize {
        self.idx
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn toggle(&mut self) -> Toggle {
        match self.status {
            PlaybackStatus::Paused => {
                self.status = PlaybackStatus::Playing;
                Toggle::Started
            }
            PlaybackStatus::Playing => {
                self.status = PlaybackStatus::Paused;
                Toggle::Paused
            }
            PlaybackStatus::Finished => {
                self.idx = 0;
                self.status = PlaybackStatus::Playing;
                Toggle::Replayed
            }
        }
    }

    /// One timer tick. Stray ticks while paused or finished are no-ops.
    pub fn advance(&mut self) -> Option<Step> {
        if self.status != PlaybackStatus::Playing {
            return None;
        }
        if self.idx + 1 >= self.len {
            self.status = PlaybackStatus::Finished;
            return Some(Step::Finished);
        }
        self.idx += 1;
        Some(Step::Moved {
            prev: self.idx - 1,
            current: self.idx,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_paused_at_zero() {
        let playback = Playback::new(5);
        assert_eq!(playback.current_index(), 0);
        assert_eq!(playback.status(), PlaybackStatus::Paused);
    }

    #[test]
    fn test_full_run() {
        let mut playback = Playback::new(4);
        assert_eq!(playback.toggle(), Toggle::Started);

        // A route of 4 samples moves 3 times
        for i in 1..4 {
            assert_eq!(
                playback.advance(),
                Some(Step::Moved {
                    prev: i - 1,
                    current: i
                })
            );
        }
        assert_eq!(playback.advance(), Some(Step::Finished));
        assert_eq!(playback.status(), PlaybackStatus::Finished);
        assert_eq!(playback.current_index(), 3);

        // Finished; later ticks do nothing
        assert_eq!(playback.advance(), None);
        assert_eq!(playback.current_index(), 3);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut playback = Playback::new(3);
        playback.toggle();
        playback.advance();
        assert_eq!(playback.toggle(), Toggle::Paused);
        assert_eq!(playback.current_index(), 1);

        // Paused; ticks do nothing
        assert_eq!(playback.advance(), None);
        assert_eq!(playback.current_index(), 1);

        assert_eq!(playback.toggle(), Toggle::Started);
        assert_eq!(
            playback.advance(),
            Some(Step::Moved { prev: 1, current: 2 })
        );
    }

    #[test]
    fn test_replay_resets_to_start() {
        let mut playback = Playback::new(2);
        playback.toggle();
        playback.advance();
        playback.advance();
        assert_eq!(playback.status(), PlaybackStatus::Finished);

        assert_eq!(playback.toggle(), Toggle::Replayed);
        assert_eq!(playback.current_index(), 0);
        assert!(playback.is_playing());
        assert_eq!(
            playback.advance(),
            Some(Step::Moved { prev: 0, current: 1 })
        );
    }

    #[test]
    fn test_single_sample_route() {
        let mut playback = Playback::new(1);
        playback.toggle();
        // The first tick finishes without moving
        assert_eq!(playback.advance(), Some(Step::Finished));
        assert_eq!(playback.current_index(), 0);
    }
}
