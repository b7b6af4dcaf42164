//! Background polling that turns a sensor into a stream of button events.

use std::future::Future;
use std::pin::{Pin, pin};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use chrono::Utc;
use futures::channel::mpsc;
use futures::future::{self, AbortHandle, Abortable, Either};
use futures::{Stream, StreamExt};
use log::{debug, warn};

use crate::client::BridgeClient;
use crate::detector::ButtonDetector;
use crate::errors::Error;
use crate::runtime;
use crate::types::ButtonEvent;

/// Cadence and buffering of the button event poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between polls while buttons are in use.
    pub active_interval: Duration,
    /// Delay between polls once the sensor has been quiet for a while.
    pub idle_interval: Duration,
    /// Consecutive polls without events before switching to `idle_interval`.
    pub idle_after: u32,
    /// Events buffered for the consumer; further events are dropped.
    pub capacity: usize,
}

impl PollConfig {
    pub const ACTIVE_INTERVAL: Duration = Duration::from_millis(20);
    pub const IDLE_INTERVAL: Duration = Duration::from_millis(500);
    pub const IDLE_AFTER: u32 = 500;
    pub const CAPACITY: usize = 16;

    fn interval(&self, idle_polls: u32) -> Duration {
        if idle_polls >= self.idle_after {
            self.idle_interval
        } else {
            self.active_interval
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            active_interval: Self::ACTIVE_INTERVAL,
            idle_interval: Self::IDLE_INTERVAL,
            idle_after: Self::IDLE_AFTER,
            capacity: Self::CAPACITY,
        }
    }
}

/// A lazy, cancellable stream of button events from one sensor.
///
/// Events are produced by a background task that polls the bridge. The
/// buffer is bounded: when the consumer falls behind, new events are
/// dropped rather than slowing the poller down.
///
/// The stream ends when it is cancelled (through [`ButtonEvents::cancel`],
/// an [`AbortHandle`] from [`ButtonEvents::abort_handle`], the cancel future
/// given to [`crate::Sensor::button_events_until`], or by dropping it) or
/// when a poll fails. A failed poll is not yielded as an item; fetch it with
/// [`ButtonEvents::take_error`] once the stream has ended.
pub struct ButtonEvents {
    receiver: mpsc::Receiver<ButtonEvent>,
    abort: AbortHandle,
    error: Arc<Mutex<Option<Error>>>,
}

impl ButtonEvents {
    pub(crate) fn spawn<C, F>(
        client: Arc<C>,
        sensor_id: String,
        detector: Arc<Mutex<ButtonDetector>>,
        config: PollConfig,
        cancel: F,
    ) -> Self
    where
        C: BridgeClient,
        F: Future<Output = ()> + Send + 'static,
    {
        // A futures channel holds its buffer plus one slot per sender.
        let (sender, receiver) = mpsc::channel(config.capacity.saturating_sub(1));
        let (abort, registration) = AbortHandle::new_pair();
        let error = Arc::new(Mutex::new(None));

        let poller = Poller {
            client,
            sensor_id,
            detector,
            config,
            sender,
            error: Arc::clone(&error),
        };
        let polling = Abortable::new(poller.run(), registration);
        let handle = abort.clone();

        runtime::spawn(async move {
            let polling = pin!(polling);
            let cancel = pin!(cancel);
            if let Either::Right(_) = future::select(polling, cancel).await {
                debug!("button event stream cancelled");
                handle.abort();
            }
        });

        ButtonEvents {
            receiver,
            abort,
            error,
        }
    }

    /// Stop polling. No further events are yielded, even buffered ones.
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// A handle that cancels this stream from elsewhere.
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Whether the stream was cancelled or dropped by any of its handles.
    pub fn is_cancelled(&self) -> bool {
        self.abort.is_aborted()
    }

    /// The device error that ended polling, if any.
    pub fn take_error(&self) -> Option<Error> {
        self.error.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl Stream for ButtonEvents {
    type Item = ButtonEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<ButtonEvent>> {
        if self.abort.is_aborted() {
            return Poll::Ready(None);
        }
        self.receiver.poll_next_unpin(cx)
    }
}

impl Drop for ButtonEvents {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

struct Poller<C> {
    client: Arc<C>,
    sensor_id: String,
    detector: Arc<Mutex<ButtonDetector>>,
    config: PollConfig,
    sender: mpsc::Sender<ButtonEvent>,
    error: Arc<Mutex<Option<Error>>>,
}

impl<C: BridgeClient> Poller<C> {
    async fn run(mut self) {
        let mut idle_polls: u32 = 0;

        loop {
            let raw = match self.client.read_sensor_state(&self.sensor_id).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("stopped polling sensor {}: {}", self.sensor_id, e);
                    if let Ok(mut slot) = self.error.lock() {
                        *slot = Some(e);
                    }
                    return;
                }
            };

            let state = ButtonDetector::observe_shared(&self.detector, &raw, Utc::now());
            if state.button_events.is_empty() {
                idle_polls = idle_polls.saturating_add(1);
            } else {
                idle_polls = 0;
                for event in state.button_events {
                    if let Err(e) = self.sender.try_send(event) {
                        if e.is_disconnected() {
                            break;
                        }
                        debug!("event buffer full for sensor {}, dropping {:?}", self.sensor_id, event);
                    }
                }
            }

            if self.sender.is_closed() {
                debug!("button event consumer for sensor {} went away", self.sensor_id);
                return;
            }

            runtime::sleep(self.config.interval(idle_polls)).await;
        }
    }
}
