use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum MonitorState {
    Created = 0,
    Started = 1,
    TimedOut = 2,
    Cancelled = 3,
    Completed = 4,
}
impl MonitorState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Created,
            1 => Self::Started,
            2 => Self::TimedOut,
            3 => Self::Cancelled,
            _ => Self::Completed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::TimedOut | Self::Cancelled | Self::Completed)
    }
}

/// Races a request's timeout against its external cancellation signal.
///
/// The monitor moves from `Created` to `Started` once, and from `Started` to
/// exactly one of `TimedOut`, `Cancelled` or `Completed`; later transitions
/// are ignored.
#[derive(Debug)]
pub struct QueryCancellationMonitor {
    completion: CancellationToken,
    external: CancellationToken,
    state: AtomicU8,
    timeout: Option<Duration>,
}
impl QueryCancellationMonitor {
    pub fn new(external: CancellationToken, timeout: Option<Duration>) -> Self {
        Self {
            completion: CancellationToken::new(),
            external,
            state: AtomicU8::new(MonitorState::Created as u8),
            timeout,
        }
    }

    pub fn state(&self) -> MonitorState {
        MonitorState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns `false` if the monitor was already started.
    pub fn start(&self) -> bool {
        self.transition(MonitorState::Created, MonitorState::Started)
    }

    /// Mark the monitored work as finished. Returns `false` when the monitor
    /// already reached a terminal state (or was never started).
    pub fn complete(&self) -> bool {
        let completed = self.transition(MonitorState::Started, MonitorState::Completed);
        self.completion.cancel();
        completed
    }

    /// Wait until the monitor reaches a terminal state and return it. A
    /// monitor that was never started (or already finished) reports its
    /// current state without waiting. The pending timer is released when the
    /// returned future completes or is dropped.
    pub async fn wait(&self) -> MonitorState {
        if self.state() == MonitorState::Started {
            let timer = async {
                match self.timeout {
                    Some(timeout) => tokio::time::sleep(timeout).await,
                    None => std::future::pending::<()>().await,
                }
            };
            tokio::select! {
                _ = self.completion.cancelled() => (),
                _ = self.external.cancelled() => {
                    self.transition(MonitorState::Started, MonitorState::Cancelled);
                },
                _ = timer => {
                    self.transition(MonitorState::Started, MonitorState::TimedOut);
                },
            }
        }
        self.state()
    }

    fn transition(&self, from: MonitorState, to: MonitorState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
