//! Tone playback on a PWM buzzer
//!
//! A [`Cue`] is a fixed list of [`ToneStep`]s with an optional trailing
//! [`Wobble`] and a silent hold. [`CuePlayer`] plays one synchronously: it
//! drives the buzzer's frequency and duty cycle and blocks on the delay for
//! each step.
//!
//! ## Example
//!
//! ```rust,no_run
//! use moodpanel::{Buzzer, Cue, CuePlayer, Mood};
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::pwm::{ErrorType, SetDutyCycle};
//! # struct Pwm;
//! # impl ErrorType for Pwm { type Error = core::convert::Infallible; }
//! # impl SetDutyCycle for Pwm {
//! #     fn max_duty_cycle(&self) -> u16 { 65535 }
//! #     fn set_duty_cycle(&mut self, _: u16) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Buzzer for Pwm {
//! #     fn set_frequency(&mut self, _: u32) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct Delay;
//! # impl DelayNs for Delay { fn delay_ns(&mut self, _: u32) {} }
//! # let mut delay = Delay;
//! let mut player = CuePlayer::new(Pwm);
//! if let Some(cue) = Cue::for_mood(Mood::Happy) {
//!     let _ = player.play(&cue, &mut delay);
//! }
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

use crate::mood::Mood;

/// Duty cycle numerator used while a tone sounds
pub const TONE_DUTY_NUM: u16 = 20_000;
/// Duty cycle denominator used while a tone sounds
pub const TONE_DUTY_DENOM: u16 = 65_535;

/// A PWM output whose carrier frequency can be changed
///
/// Implemented by the firmware for its timer channel. The duty cycle sets
/// the volume and the frequency sets the pitch.
pub trait Buzzer: SetDutyCycle {
    /// Retune the PWM carrier to `hz`
    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error>;
}

/// One tone of a cue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToneStep {
    /// Pitch in hertz; zero or negative is a rest
    pub frequency_hz: i32,
    /// How long the step lasts
    pub duration_ms: u32,
}

impl ToneStep {
    /// Create a step
    pub const fn new(frequency_hz: i32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }
}

/// A vibrato sweep played after a cue's steps
///
/// Each repeat walks from `center_hz - spread` to `center_hz + spread`
/// in 1 Hz steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wobble {
    /// Middle pitch in hertz
    pub center_hz: i32,
    /// Maximum offset from the center in hertz
    pub spread: i32,
    /// Duration of each 1 Hz step
    pub step_ms: u32,
    /// Number of sweeps
    pub repeats: u32,
}

/// A fixed tone sequence for one mood
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cue {
    /// Steps played in order
    pub steps: &'static [ToneStep],
    /// Optional sweep after the steps
    pub wobble: Option<Wobble>,
    /// Silence after the cue
    pub hold_ms: u32,
}

impl Cue {
    /// Rising jingle
    pub const HAPPY: Self = Self {
        steps: &[
            ToneStep::new(330, 150),
            ToneStep::new(392, 150),
            ToneStep::new(659, 150),
            ToneStep::new(523, 150),
            ToneStep::new(587, 150),
            ToneStep::new(784, 150),
        ],
        wobble: None,
        hold_ms: 500,
    };

    /// Falling tune that ends in a trembling note
    pub const SAD: Self = Self {
        steps: &[
            ToneStep::new(622, 300),
            ToneStep::new(587, 300),
            ToneStep::new(554, 300),
        ],
        wobble: Some(Wobble {
            center_hz: 523,
            spread: 10,
            step_ms: 5,
            repeats: 10,
        }),
        hold_ms: 500,
    };

    /// The cue that accompanies `mood`, if any
    pub const fn for_mood(mood: Mood) -> Option<Self> {
        match mood {
            Mood::Happy => Some(Self::HAPPY),
            Mood::Sad => Some(Self::SAD),
            Mood::Neutral => None,
        }
    }
}

type AudioResult<B> = core::result::Result<(), <B as embedded_hal::pwm::ErrorType>::Error>;

/// Plays cues on a single buzzer
pub struct CuePlayer<B>
where
    B: Buzzer,
{
    buzzer: B,
}

impl<B> CuePlayer<B>
where
    B: Buzzer,
{
    /// Take ownership of the buzzer
    pub fn new(buzzer: B) -> Self {
        Self { buzzer }
    }

    /// Turn the output fully off
    pub fn silence(&mut self) -> AudioResult<B> {
        self.buzzer.set_duty_cycle_fully_off()
    }

    /// Sound one step and wait out its duration
    ///
    /// A frequency of zero or below rests instead.
    pub fn play_tone<D: DelayNs>(&mut self, step: ToneStep, delay: &mut D) -> AudioResult<B> {
        if step.frequency_hz > 0 {
            self.buzzer.set_frequency(step.frequency_hz as u32)?;
            self.buzzer
                .set_duty_cycle_fraction(TONE_DUTY_NUM, TONE_DUTY_DENOM)?;
        } else {
            self.buzzer.set_duty_cycle_fully_off()?;
        }
        delay.delay_ms(step.duration_ms);
        Ok(())
    }

    /// Play a whole cue, then silence the buzzer and hold
    pub fn play<D: DelayNs>(&mut self, cue: &Cue, delay: &mut D) -> AudioResult<B> {
        log::debug!(
            "cue: {} steps, wobble {}",
            cue.steps.len(),
            cue.wobble.is_some()
        );

        for step in cue.steps {
            self.play_tone(*step, delay)?;
        }

        if let Some(wobble) = cue.wobble {
            for _ in 0..wobble.repeats {
                for offset in -wobble.spread..=wobble.spread {
                    let step = ToneStep::new(wobble.center_hz + offset, wobble.step_ms);
                    self.play_tone(step, delay)?;
                }
            }
        }

        self.silence()?;
        delay.delay_ms(cue.hold_ms);
        Ok(())
    }

    /// Give the buzzer back
    pub fn release(self) -> B {
        self.buzzer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use embedded_hal::pwm::{ErrorKind, ErrorType};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Frequency(u32),
        Duty(u16),
        Delay(u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct MockBuzzer {
        log: Log,
        fail: bool,
    }

    impl ErrorType for MockBuzzer {
        type Error = ErrorKind;
    }

    impl SetDutyCycle for MockBuzzer {
        fn max_duty_cycle(&self) -> u16 {
            u16::MAX
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Duty(duty));
            Ok(())
        }
    }

    impl Buzzer for MockBuzzer {
        fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.log.borrow_mut().push(Event::Frequency(hz));
            Ok(())
        }
    }

    struct MockDelay {
        log: Log,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::Delay(ms));
        }
    }

    fn setup(fail: bool) -> (CuePlayer<MockBuzzer>, MockDelay, Log) {
        let log = Log::default();
        let buzzer = MockBuzzer {
            log: log.clone(),
            fail,
        };
        let delay = MockDelay { log: log.clone() };
        (CuePlayer::new(buzzer), delay, log)
    }

    fn frequencies(log: &Log) -> Vec<u32> {
        log.borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Frequency(hz) => Some(*hz),
                _ => None,
            })
            .collect()
    }

    const TONE_DUTY: u16 = 20_000;

    #[test]
    fn test_tone_sets_frequency_then_duty_then_waits() {
        let (mut player, mut delay, log) = setup(false);
        player.play_tone(ToneStep::new(440, 150), &mut delay).unwrap();

        assert_eq!(
            *log.borrow(),
            alloc::vec![
                Event::Frequency(440),
                Event::Duty(TONE_DUTY),
                Event::Delay(150)
            ]
        );
    }

    #[test]
    fn test_rest_turns_output_off() {
        for hz in [0, -5] {
            let (mut player, mut delay, log) = setup(false);
            player.play_tone(ToneStep::new(hz, 40), &mut delay).unwrap();
            assert_eq!(*log.borrow(), alloc::vec![Event::Duty(0), Event::Delay(40)]);
        }
    }

    #[test]
    fn test_happy_cue_plays_six_notes_then_holds() {
        let (mut player, mut delay, log) = setup(false);
        player.play(&Cue::HAPPY, &mut delay).unwrap();

        assert_eq!(frequencies(&log), alloc::vec![330, 392, 659, 523, 587, 784]);

        let events = log.borrow();
        assert_eq!(events.len(), 6 * 3 + 2);
        assert!(
            events[..18]
                .chunks(3)
                .all(|c| c[1] == Event::Duty(TONE_DUTY) && c[2] == Event::Delay(150))
        );
        assert_eq!(&events[18..], &[Event::Duty(0), Event::Delay(500)]);
    }

    #[test]
    fn test_sad_cue_wobbles_around_523() {
        let (mut player, mut delay, log) = setup(false);
        player.play(&Cue::SAD, &mut delay).unwrap();

        let frequencies = frequencies(&log);
        assert_eq!(frequencies.len(), 3 + 10 * 21);
        assert_eq!(&frequencies[..3], &[622, 587, 554]);
        assert_eq!(frequencies[3], 513);
        assert_eq!(frequencies[13], 523);
        assert_eq!(frequencies[23], 533);
        assert_eq!(frequencies[24], 513);
        assert_eq!(frequencies.last(), Some(&533));

        let events = log.borrow();
        let long_waits = events.iter().filter(|e| **e == Event::Delay(300)).count();
        let short_waits = events.iter().filter(|e| **e == Event::Delay(5)).count();
        assert_eq!(long_waits, 3);
        assert_eq!(short_waits, 210);
        assert_eq!(&events[events.len() - 2..], &[Event::Duty(0), Event::Delay(500)]);
    }

    #[test]
    fn test_buzzer_error_stops_playback() {
        let (mut player, mut delay, log) = setup(true);
        assert_eq!(player.play(&Cue::HAPPY, &mut delay), Err(ErrorKind::Other));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_silence() {
        let (mut player, _delay, log) = setup(false);
        player.silence().unwrap();
        assert_eq!(*log.borrow(), alloc::vec![Event::Duty(0)]);
    }

    #[test]
    fn test_cue_for_mood() {
        assert_eq!(Cue::for_mood(Mood::Happy), Some(Cue::HAPPY));
        assert_eq!(Cue::for_mood(Mood::Sad), Some(Cue::SAD));
        assert_eq!(Cue::for_mood(Mood::Neutral), None);
    }
}
