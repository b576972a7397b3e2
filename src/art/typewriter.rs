use std::time::{Duration, Instant};

pub const TITLE: &str = "Generative Mondrian";
pub const TYPING_SPEED: Duration = Duration::from_millis(150);
pub const TYPING_PAUSE: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Paused,
}

/// Reveals a string one character per `speed`, holds the full string for
/// `pause`, clears it and starts over.
///
/// Time only moves when [`Typewriter::poll`] is called, so the owner decides
/// the clock. Deadlines are kept on a fixed schedule: a late poll fires
/// every step it missed.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: Vec<char>,
    shown: String,
    index: usize,
    phase: Phase,
    speed: Duration,
    pause: Duration,
    deadline: Option<Instant>,
}

impl Typewriter {
    pub fn start(text: &str, speed: Duration, pause: Duration, now: Instant) -> Self {
        let text: Vec<char> = text.chars().collect();

        let (phase, wait) = if text.is_empty() {
            (Phase::Paused, pause)
        } else {
            (Phase::Typing, speed)
        };

        Self {
            text,
            shown: String::new(),
            index: 0,
            phase,
            speed,
            pause,
            deadline: Some(now + wait),
        }
    }

    /// Fires every step due at `now`. Returns whether the text changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;

        while let Some(deadline) = self.deadline {
            if deadline > now {
                break;
            }

            let wait = self.fire();
            self.deadline = Some(deadline + wait);
            changed = true;
        }

        changed
    }

    fn fire(&mut self) -> Duration {
        match self.phase {
            Phase::Typing => {
                if let Some(&ch) = self.text.get(self.index) {
                    self.shown.push(ch);
                    self.index += 1;
                }

                if self.index >= self.text.len() {
                    self.phase = Phase::Paused;
                    return self.pause;
                }

                self.speed
            }

            Phase::Paused => {
                self.shown.clear();
                self.index = 0;

                if self.text.is_empty() {
                    return self.pause;
                }

                self.phase = Phase::Typing;
                self.speed
            }
        }
    }

    /// Cancels the pending step. The displayed text stays as it is.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn text(&self) -> &str {
        &self.shown
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: Duration = Duration::from_millis(100);
    const PAUSE: Duration = Duration::from_millis(1000);

    #[test]
    fn types_pauses_and_loops() {
        let t0 = Instant::now();
        let text = "Mondrian";
        let len = text.chars().count() as u32;

        let mut tw = Typewriter::start(text, SPEED, PAUSE, t0);
        assert_eq!(tw.text(), "");

        let mut at = t0;

        for _cycle in 0..3 {
            for i in 1..=len {
                at += SPEED;
                assert!(tw.poll(at));
                assert_eq!(tw.text(), &text[..i as usize]);
            }

            assert_eq!(tw.phase(), Phase::Paused);

            // nothing happens just before the pause ends
            assert!(!tw.poll(at + PAUSE - Duration::from_millis(1)));
            assert_eq!(tw.text(), text);

            at += PAUSE;
            assert!(tw.poll(at));
            assert_eq!(tw.text(), "");
            assert_eq!(tw.phase(), Phase::Typing);
        }
    }

    #[test]
    fn late_poll_catches_up() {
        let t0 = Instant::now();
        let mut tw = Typewriter::start("abcdef", SPEED, PAUSE, t0);

        assert!(tw.poll(t0 + SPEED * 3));
        assert_eq!(tw.text(), "abc");

        assert!(tw.poll(t0 + SPEED * 6 + PAUSE + SPEED));
        assert_eq!(tw.text(), "a");
    }

    #[test]
    fn polling_early_is_a_no_op() {
        let t0 = Instant::now();
        let mut tw = Typewriter::start("abc", SPEED, PAUSE, t0);

        assert!(!tw.poll(t0));
        assert!(!tw.poll(t0 + SPEED / 2));
        assert_eq!(tw.text(), "");
    }

    #[test]
    fn multibyte_characters() {
        let t0 = Instant::now();
        let mut tw = Typewriter::start("héllo", SPEED, PAUSE, t0);

        tw.poll(t0 + SPEED * 2);
        assert_eq!(tw.text(), "hé");
    }

    #[test]
    fn stop_cancels_the_chain() {
        let t0 = Instant::now();
        let mut tw = Typewriter::start("abc", SPEED, PAUSE, t0);

        tw.poll(t0 + SPEED);
        tw.stop();

        assert!(!tw.is_running());
        assert!(!tw.poll(t0 + SPEED * 100));
        assert_eq!(tw.text(), "a");
    }

    #[test]
    fn empty_text_idles() {
        let t0 = Instant::now();
        let mut tw = Typewriter::start("", SPEED, PAUSE, t0);

        assert_eq!(tw.phase(), Phase::Paused);
        tw.poll(t0 + PAUSE * 3);
        assert_eq!(tw.text(), "");
        assert!(tw.is_running());
    }
}
