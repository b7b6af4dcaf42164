//! Decoding of raw switch counters into button events.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::client::RawSensorState;
use crate::types::ButtonEvent;

/// One decoded sensor observation.
///
/// `daylight` is only reported when the observation carried no button
/// activity.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorState {
    pub time: DateTime<Utc>,
    pub daylight: Option<bool>,
    #[serde(default)]
    pub button_events: Vec<ButtonEvent>,
}

/// Interaction phase packed into the low digits of a raw button code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonPhase {
    Press,
    Hold,
    ShortRelease,
    LongRelease,
}

impl ButtonPhase {
    fn from_code(code: u32) -> Option<(u16, Self)> {
        let button = u16::try_from(code / 1000).ok()?;
        let phase = match code % 1000 {
            0 => ButtonPhase::Press,
            1 => ButtonPhase::Hold,
            2 => ButtonPhase::ShortRelease,
            3 => ButtonPhase::LongRelease,
            _ => return None,
        };
        Some((button, phase))
    }
}

/// Per-sensor memory that turns polled raw codes into discrete events.
///
/// Each raw `(timestamp, code)` pair is reported at most once, so polling
/// faster than the sensor updates does not repeat events.
#[derive(Debug, Clone, Default)]
pub struct ButtonDetector {
    last: Option<(DateTime<Utc>, u32)>,
}

impl ButtonDetector {
    /// Raw events older than this are stale and treated as idle.
    pub const ACTIVE_WINDOW: Duration = Duration::from_secs(2);

    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one raw reading taken at `now`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bridge_lights_rs::{ButtonDetector, ButtonEvent, RawSensorState};
    /// use chrono::Utc;
    ///
    /// let now = Utc::now();
    /// let mut detector = ButtonDetector::new();
    /// let raw = RawSensorState { last_updated: now, button_event: 1002, daylight: false };
    ///
    /// let state = detector.observe(&raw, now);
    /// assert_eq!(state.button_events, vec![ButtonEvent::press(1)]);
    ///
    /// // The same reading again is not a new press.
    /// assert!(detector.observe(&raw, now).button_events.is_empty());
    /// ```
    pub fn observe(&mut self, raw: &RawSensorState, now: DateTime<Utc>) -> SensorState {
        let mut state = SensorState {
            time: raw.last_updated,
            daylight: None,
            button_events: Vec::new(),
        };

        if raw.button_event == 0 || !self.is_recent(raw.last_updated, now) {
            state.daylight = Some(raw.daylight);
            return state;
        }

        let current = (raw.last_updated, raw.button_event);
        if self.last != Some(current) {
            if let Some(event) = self.decode(raw.button_event) {
                state.button_events.push(event);
            }
        }
        self.last = Some(current);

        state
    }

    /// [`ButtonDetector::observe`] on memory shared between a sensor handle
    /// and its pollers. The lock is only held while decoding.
    pub(crate) fn observe_shared(
        detector: &Mutex<ButtonDetector>,
        raw: &RawSensorState,
        now: DateTime<Utc>,
    ) -> SensorState {
        detector
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .observe(raw, now)
    }

    fn is_recent(&self, updated: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let window = TimeDelta::from_std(Self::ACTIVE_WINDOW).unwrap_or(TimeDelta::MAX);
        now.signed_duration_since(updated) < window
    }

    fn decode(&self, code: u32) -> Option<ButtonEvent> {
        let Some((button, phase)) = ButtonPhase::from_code(code) else {
            trace!("ignoring unknown button code {code}");
            return None;
        };

        match phase {
            ButtonPhase::Press => Some(ButtonEvent::press(button)),
            ButtonPhase::Hold => Some(ButtonEvent::hold(button)),
            // The press was already reported if it landed in an earlier poll.
            ButtonPhase::ShortRelease => {
                let pressed = self
                    .last
                    .and_then(|(_, code)| ButtonPhase::from_code(code))
                    .is_some_and(|prev| prev == (button, ButtonPhase::Press));
                (!pressed).then(|| ButtonEvent::press(button))
            }
            ButtonPhase::LongRelease => Some(ButtonEvent::release(button)),
        }
    }
}
