//! Event loop connecting a message source to the mood renderer
//!
//! The dispatcher owns three collaborators, each behind a trait so the
//! firmware can plug in its own network stack:
//!
//! - [`Link`]: the network link (e.g. a WiFi station)
//! - [`MoodSource`]: a subscription that yields raw payloads on demand
//! - [`MoodSink`]: whatever shows a [`Mood`], normally a
//!   [`MoodRenderer`](crate::face::MoodRenderer)
//!
//! Everything is polled from a single thread. Connection failures are
//! retried forever with a fixed wait, and render failures are logged and
//! skipped, so [`Dispatcher::run`] never returns.
//!
//! ## Example
//!
//! ```rust,no_run
//! use moodpanel::{Dispatcher, DispatcherConfig, Link, Mood, MoodSink, MoodSource};
//! # use embedded_hal::delay::DelayNs;
//! # struct Wifi;
//! # impl Link for Wifi {
//! #     type Error = ();
//! #     fn begin(&mut self) -> Result<(), ()> { Ok(()) }
//! #     fn is_connected(&mut self) -> bool { true }
//! # }
//! # struct Broker;
//! # impl MoodSource for Broker {
//! #     type Error = ();
//! #     fn connect(&mut self, _: &str) -> Result<(), ()> { Ok(()) }
//! #     fn poll(&mut self, _: &mut [u8]) -> Result<Option<usize>, ()> { Ok(None) }
//! # }
//! # struct Face;
//! # impl MoodSink for Face {
//! #     type Error = ();
//! #     fn prepare(&mut self) -> Result<(), ()> { Ok(()) }
//! #     fn show<D: DelayNs>(&mut self, _: Mood, _: &mut D) -> Result<(), ()> { Ok(()) }
//! # }
//! # struct Delay;
//! # impl DelayNs for Delay { fn delay_ns(&mut self, _: u32) {} }
//! let config = DispatcherConfig::default().with_topic("moods");
//! let mut dispatcher = Dispatcher::new(Wifi, Broker, Face, config);
//! dispatcher.run(&mut Delay);
//! ```

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;

use crate::config::DispatcherConfig;
use crate::mood::Mood;

/// Receive buffer size; longer payloads classify as neutral
pub const MAX_PAYLOAD_LEN: usize = 128;

/// Wait between link status checks
const LINK_POLL_MS: u32 = 1_000;

/// Network link bring-up
pub trait Link {
    /// Error from starting the link
    type Error: Debug;

    /// Start connecting; returns without waiting for the link
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Whether the link is currently up
    fn is_connected(&mut self) -> bool;
}

/// A subscription that yields one raw payload per poll
pub trait MoodSource {
    /// Connection or transport error
    type Error: Debug;

    /// Connect and subscribe to `topic`
    fn connect(&mut self, topic: &str) -> Result<(), Self::Error>;

    /// Take at most one pending message
    ///
    /// Copies as much of the payload as fits into `buf` and returns the
    /// payload's full length, which may exceed `buf.len()`. Returns
    /// `Ok(None)` when nothing is pending.
    fn poll(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error>;
}

/// Something that can show a mood
pub trait MoodSink {
    /// Drawing or audio error
    type Error: Debug;

    /// Put outputs in a quiet state before the first message
    fn prepare(&mut self) -> Result<(), Self::Error>;

    /// Show `mood`, blocking until any sound has finished
    fn show<D: DelayNs>(&mut self, mood: Mood, delay: &mut D) -> Result<(), Self::Error>;
}

/// Outcome of one [`Dispatcher::step`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A message arrived and this mood was shown (or failed to show)
    Rendered(Mood),
    /// No message was pending
    Idle,
    /// Polling failed and the loop backed off
    Backoff,
}

/// Single-threaded event loop
pub struct Dispatcher<L, S, R>
where
    L: Link,
    S: MoodSource,
    R: MoodSink,
{
    link: L,
    source: S,
    sink: R,
    config: DispatcherConfig,
}

impl<L, S, R> Dispatcher<L, S, R>
where
    L: Link,
    S: MoodSource,
    R: MoodSink,
{
    /// Create a dispatcher; nothing is started yet
    pub fn new(link: L, source: S, sink: R, config: DispatcherConfig) -> Self {
        Self {
            link,
            source,
            sink,
            config,
        }
    }

    /// Bring the link up, retrying until it connects
    ///
    /// Each attempt calls [`Link::begin`] and then checks the link once a
    /// second for up to `link_timeout_s` seconds. Returns the number of
    /// attempts it took.
    pub fn bring_up_link<D: DelayNs>(&mut self, delay: &mut D) -> u32 {
        let mut attempts = 0;
        loop {
            attempts += 1;

            match self.link.begin() {
                Ok(()) => {
                    let mut remaining = self.config.link_timeout_s;
                    while !self.link.is_connected() && remaining > 0 {
                        delay.delay_ms(LINK_POLL_MS);
                        remaining -= 1;
                    }
                    if self.link.is_connected() {
                        log::info!("link up after {} attempt(s)", attempts);
                        return attempts;
                    }
                    log::warn!(
                        "link not up after {} s, retrying in {} ms",
                        self.config.link_timeout_s,
                        self.config.link_retry_ms
                    );
                }
                Err(e) => {
                    log::warn!(
                        "link start failed: {:?}, retrying in {} ms",
                        e,
                        self.config.link_retry_ms
                    );
                }
            }

            delay.delay_ms(self.config.link_retry_ms);
        }
    }

    /// Connect and subscribe, retrying until it succeeds
    ///
    /// Returns the number of attempts it took.
    pub fn connect_source<D: DelayNs>(&mut self, delay: &mut D) -> u32 {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.source.connect(self.config.topic) {
                Ok(()) => {
                    log::info!("subscribed to '{}'", self.config.topic);
                    return attempts;
                }
                Err(e) => {
                    log::warn!(
                        "source connect failed: {:?}, retrying in {} ms",
                        e,
                        self.config.connect_retry_ms
                    );
                    delay.delay_ms(self.config.connect_retry_ms);
                }
            }
        }
    }

    /// Poll once and show whatever arrived
    pub fn step<D: DelayNs>(&mut self, delay: &mut D) -> Step {
        let mut buf = [0u8; MAX_PAYLOAD_LEN];

        match self.source.poll(&mut buf) {
            Ok(Some(len)) => {
                let mood = match buf.get(..len) {
                    Some(payload) => Mood::from_payload(payload),
                    None => {
                        log::debug!("payload of {} bytes truncated", len);
                        Mood::Neutral
                    }
                };
                log::info!("mood received: {}", mood);

                if let Err(e) = self.sink.show(mood, delay) {
                    log::error!("render failed: {:?}", e);
                }

                delay.delay_ms(self.config.poll_interval_ms);
                Step::Rendered(mood)
            }
            Ok(None) => {
                delay.delay_ms(self.config.poll_interval_ms);
                Step::Idle
            }
            Err(e) => {
                log::warn!("poll failed: {:?}", e);
                delay.delay_ms(self.config.error_backoff_ms);
                Step::Backoff
            }
        }
    }

    /// Start everything and dispatch forever
    pub fn run<D: DelayNs>(&mut self, delay: &mut D) -> ! {
        if let Err(e) = self.sink.prepare() {
            log::error!("prepare failed: {:?}", e);
        }
        self.bring_up_link(delay);
        self.connect_source(delay);

        loop {
            self.step(delay);
        }
    }

    /// The sink, for inspection between steps
    pub fn sink(&self) -> &R {
        &self.sink
    }

    /// Tear down and return the collaborators
    pub fn release(self) -> (L, S, R) {
        (self.link, self.source, self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::VecDeque;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct MockLink {
        /// Connection state reported by successive `is_connected` calls
        states: VecDeque<bool>,
        begins: u32,
    }

    impl Link for MockLink {
        type Error = ();

        fn begin(&mut self) -> Result<(), ()> {
            self.begins += 1;
            Ok(())
        }

        fn is_connected(&mut self) -> bool {
            self.states.pop_front().unwrap_or(true)
        }
    }

    #[derive(Default)]
    struct MockSource {
        connect_results: VecDeque<Result<(), ()>>,
        polls: VecDeque<Result<Option<Vec<u8>>, ()>>,
        topics: Vec<String>,
    }

    impl MoodSource for MockSource {
        type Error = ();

        fn connect(&mut self, topic: &str) -> Result<(), ()> {
            self.topics.push(topic.into());
            self.connect_results.pop_front().unwrap_or(Ok(()))
        }

        fn poll(&mut self, buf: &mut [u8]) -> Result<Option<usize>, ()> {
            match self.polls.pop_front() {
                Some(Ok(Some(payload))) => {
                    let n = payload.len().min(buf.len());
                    buf[..n].copy_from_slice(&payload[..n]);
                    Ok(Some(payload.len()))
                }
                Some(Ok(None)) | None => Ok(None),
                Some(Err(())) => Err(()),
            }
        }
    }

    #[derive(Default)]
    struct MockSink {
        shown: Vec<Mood>,
        prepared: bool,
        fail: bool,
    }

    impl MoodSink for MockSink {
        type Error = &'static str;

        fn prepare(&mut self) -> Result<(), Self::Error> {
            self.prepared = true;
            Ok(())
        }

        fn show<D: DelayNs>(&mut self, mood: Mood, _delay: &mut D) -> Result<(), Self::Error> {
            self.shown.push(mood);
            if self.fail { Err("panel gone") } else { Ok(()) }
        }
    }

    #[derive(Default)]
    struct MockDelay {
        waits: Vec<u32>,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.waits.push(ms);
        }
    }

    fn dispatcher(
        link: MockLink,
        source: MockSource,
        sink: MockSink,
    ) -> Dispatcher<MockLink, MockSource, MockSink> {
        Dispatcher::new(link, source, sink, DispatcherConfig::default())
    }

    fn source_with(polls: Vec<Result<Option<Vec<u8>>, ()>>) -> MockSource {
        MockSource {
            polls: polls.into(),
            ..MockSource::default()
        }
    }

    #[test]
    fn test_step_renders_and_waits_poll_interval() {
        let source = source_with(alloc::vec![Ok(Some(b"Positive".to_vec()))]);
        let mut d = dispatcher(MockLink::default(), source, MockSink::default());
        let mut delay = MockDelay::default();

        assert_eq!(d.step(&mut delay), Step::Rendered(Mood::Happy));
        assert_eq!(d.sink().shown, alloc::vec![Mood::Happy]);
        assert_eq!(delay.waits, alloc::vec![500]);
    }

    #[test]
    fn test_step_idle() {
        let mut d = dispatcher(MockLink::default(), MockSource::default(), MockSink::default());
        let mut delay = MockDelay::default();

        assert_eq!(d.step(&mut delay), Step::Idle);
        assert!(d.sink().shown.is_empty());
        assert_eq!(delay.waits, alloc::vec![500]);
    }

    #[test]
    fn test_step_poll_error_backs_off() {
        let source = source_with(alloc::vec![Err(()), Ok(Some(b"negative".to_vec()))]);
        let mut d = dispatcher(MockLink::default(), source, MockSink::default());
        let mut delay = MockDelay::default();

        assert_eq!(d.step(&mut delay), Step::Backoff);
        assert_eq!(d.step(&mut delay), Step::Rendered(Mood::Sad));
        assert_eq!(delay.waits, alloc::vec![2_000, 500]);
    }

    #[test]
    fn test_overlong_payload_is_neutral() {
        let mut payload = b"positive".to_vec();
        payload.resize(MAX_PAYLOAD_LEN + 1, b' ');
        let source = source_with(alloc::vec![Ok(Some(payload))]);
        let mut d = dispatcher(MockLink::default(), source, MockSink::default());

        assert_eq!(d.step(&mut MockDelay::default()), Step::Rendered(Mood::Neutral));
    }

    #[test]
    fn test_payload_filling_buffer_exactly_is_classified() {
        let mut payload = b"negative".to_vec();
        payload.resize(MAX_PAYLOAD_LEN, b' ');
        let source = source_with(alloc::vec![Ok(Some(payload))]);
        let mut d = dispatcher(MockLink::default(), source, MockSink::default());

        assert_eq!(d.step(&mut MockDelay::default()), Step::Rendered(Mood::Sad));
    }

    #[test]
    fn test_render_failure_is_not_fatal() {
        let source = source_with(alloc::vec![
            Ok(Some(b"positive".to_vec())),
            Ok(Some(b"meh".to_vec())),
        ]);
        let sink = MockSink {
            fail: true,
            ..MockSink::default()
        };
        let mut d = dispatcher(MockLink::default(), source, sink);
        let mut delay = MockDelay::default();

        assert_eq!(d.step(&mut delay), Step::Rendered(Mood::Happy));
        assert_eq!(d.step(&mut delay), Step::Rendered(Mood::Neutral));
        assert_eq!(delay.waits, alloc::vec![500, 500]);
    }

    #[test]
    fn test_link_up_first_try() {
        let link = MockLink {
            states: alloc::vec![false, false, true].into(),
            ..MockLink::default()
        };
        let mut d = dispatcher(link, MockSource::default(), MockSink::default());
        let mut delay = MockDelay::default();

        assert_eq!(d.bring_up_link(&mut delay), 1);
        assert_eq!(delay.waits, alloc::vec![1_000, 1_000]);
    }

    #[test]
    fn test_link_timeout_retries() {
        // Eleven checks in the wait loop plus the one after it
        let states = alloc::vec![false; 12];
        let link = MockLink {
            states: states.into(),
            ..MockLink::default()
        };
        let mut d = dispatcher(link, MockSource::default(), MockSink::default());
        let mut delay = MockDelay::default();

        assert_eq!(d.bring_up_link(&mut delay), 2);
        let mut expected = alloc::vec![1_000; 10];
        expected.push(5_000);
        assert_eq!(delay.waits, expected);
        assert_eq!(d.release().0.begins, 2);
    }

    #[test]
    fn test_connect_source_retries() {
        let source = MockSource {
            connect_results: alloc::vec![Err(()), Err(()), Ok(())].into(),
            ..MockSource::default()
        };
        let mut d = dispatcher(MockLink::default(), source, MockSink::default());
        let mut delay = MockDelay::default();

        assert_eq!(d.connect_source(&mut delay), 3);
        assert_eq!(delay.waits, alloc::vec![5_000, 5_000]);
        assert_eq!(d.release().1.topics, alloc::vec!["flaskapp"; 3]);
    }
}
