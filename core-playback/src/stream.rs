//! Lazy per-session event stream.

use crate::event::{MediaEvent, SessionId};
use crate::session::{PlaybackSession, TeardownReason};
use futures::stream::{FusedStream, Stream};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

/// The media events of one playback session, in the order the engine raised
/// them.
///
/// Nothing happens until the stream is first polled (or [`connect`]ed): only
/// then is the previous session released and the engine pointed at the new
/// URL. The stream ends right after yielding `ended` or `error`, or as soon as
/// the session is cancelled by `stop()` or a newer stream. Events still
/// buffered at cancellation are discarded. Dropping a stream whose session is
/// still active releases that session.
///
/// [`connect`]: PlaybackStream::connect
pub struct PlaybackStream {
    session: Arc<PlaybackSession>,
    session_id: Option<SessionId>,
    state: StreamState,
}

enum StreamState {
    Pending(String),
    Open {
        id: SessionId,
        events: mpsc::UnboundedReceiver<MediaEvent>,
        cancelled: Pin<Box<WaitForCancellationFutureOwned>>,
        stop: CancellationToken,
    },
    Finished,
}

impl PlaybackStream {
    pub(crate) fn new(session: Arc<PlaybackSession>, url: String) -> Self {
        Self {
            session,
            session_id: None,
            state: StreamState::Pending(url),
        }
    }

    /// Opens the session now instead of on first poll.
    ///
    /// Returns the session id, or `None` if the stream already finished
    /// without ever opening.
    pub fn connect(&mut self) -> Option<SessionId> {
        if let StreamState::Pending(url) = &self.state {
            let opened = self.session.open(url);
            self.session_id = Some(opened.id);
            self.state = StreamState::Open {
                id: opened.id,
                events: opened.events,
                cancelled: Box::pin(opened.stop.clone().cancelled_owned()),
                stop: opened.stop,
            };
        }
        self.session_id
    }

    /// Id of the session this stream opened, once it has opened one.
    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }

    /// URL this stream will open, while it has not been polled yet.
    pub fn pending_url(&self) -> Option<&str> {
        match &self.state {
            StreamState::Pending(url) => Some(url),
            _ => None,
        }
    }

    /// `true` once the session was cancelled from outside.
    pub fn is_cancelled(&self) -> bool {
        match &self.state {
            StreamState::Open { stop, .. } => stop.is_cancelled(),
            _ => false,
        }
    }
}

impl Stream for PlaybackStream {
    type Item = MediaEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        this.connect();

        let StreamState::Open {
            events, cancelled, ..
        } = &mut this.state
        else {
            return Poll::Ready(None);
        };

        if cancelled.as_mut().poll(cx).is_ready() {
            this.state = StreamState::Finished;
            return Poll::Ready(None);
        }

        match events.poll_recv(cx) {
            Poll::Ready(Some(event)) => {
                if event.is_terminal() {
                    this.state = StreamState::Finished;
                }
                Poll::Ready(Some(event))
            }
            Poll::Ready(None) => {
                this.state = StreamState::Finished;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl FusedStream for PlaybackStream {
    fn is_terminated(&self) -> bool {
        matches!(self.state, StreamState::Finished)
    }
}

impl Drop for PlaybackStream {
    fn drop(&mut self) {
        if let StreamState::Open { id, .. } = &self.state {
            self.session.teardown(*id, TeardownReason::Dropped);
        }
    }
}

impl fmt::Debug for PlaybackStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            StreamState::Pending(_) => "pending",
            StreamState::Open { .. } => "open",
            StreamState::Finished => "finished",
        };
        f.debug_struct("PlaybackStream")
            .field("session_id", &self.session_id)
            .field("state", &state)
            .finish()
    }
}
