use std::fmt;
use std::time::{Duration, Instant, SystemTime};

use async_trait::async_trait;
use thiserror::Error;

/// The four failure categories a connection attempt can surface. Anything
/// the driver reports is folded into one of these before it reaches the
/// dispatch layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectErrorKind {
    AccessDenied,
    UnknownDatabase,
    Unreachable,
    DriverMissing,
}

impl fmt::Display for ConnectErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AccessDenied => "access denied",
            Self::UnknownDatabase => "unknown database",
            Self::Unreachable => "server unreachable",
            Self::DriverMissing => "driver unavailable",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ConnectError {
    pub kind: ConnectErrorKind,
    message: String,
}

impl ConnectError {
    #[must_use]
    pub fn new(kind: ConnectErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Produces live database handles from the fixed startup configuration.
/// Implementations carry the configuration themselves; callers only decide
/// when a handle is opened and when it is released.
#[async_trait]
pub trait ConnectionProvider {
    type Handle: Send;

    async fn connect(&self) -> Result<Self::Handle, ConnectError>;
    async fn ping(&self, handle: &mut Self::Handle) -> Result<(), ConnectError>;
    async fn disconnect(&self, handle: Self::Handle) -> Result<(), ConnectError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub is_connected: bool,
    pub last_latency: Option<Duration>,
    pub connected_at: Option<SystemTime>,
}

impl SessionStatus {
    #[must_use]
    pub fn disconnected() -> Self {
        Self {
            is_connected: false,
            last_latency: None,
            connected_at: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a session connection is already open")]
    AlreadyOpen,
    #[error(transparent)]
    Connect(#[from] ConnectError),
}

/// Holds at most one live handle for the whole session. `refresh` releases
/// the old handle before the replacement is opened, so open and close
/// counts never drift apart by more than one.
pub struct Session<P: ConnectionProvider> {
    provider: P,
    handle: Option<P::Handle>,
    last_latency: Option<Duration>,
    connected_at: Option<SystemTime>,
}

impl<P: ConnectionProvider> Session<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            handle: None,
            last_latency: None,
            connected_at: None,
        }
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            is_connected: self.handle.is_some(),
            last_latency: self.last_latency,
            connected_at: self.connected_at,
        }
    }

    /// Establishes the session connection and verifies it with a ping.
    pub async fn open(&mut self) -> Result<Duration, SessionError> {
        if self.handle.is_some() {
            return Err(SessionError::AlreadyOpen);
        }

        let started_at = Instant::now();
        let mut handle = self.provider.connect().await?;
        if let Err(ping_err) = self.provider.ping(&mut handle).await {
            // Release the unverified handle; the ping failure is what the
            // caller needs to see, not a secondary disconnect error.
            let _ = self.provider.disconnect(handle).await;
            return Err(ping_err.into());
        }

        let latency = started_at.elapsed();
        self.last_latency = Some(latency);
        self.connected_at = Some(SystemTime::now());
        self.handle = Some(handle);
        Ok(latency)
    }

    /// Replaces the session connection: the old handle is closed first, so
    /// two live handles never coexist. Also opens a connection when none
    /// is currently held.
    pub async fn refresh(&mut self) -> Result<Duration, SessionError> {
        if let Some(old_handle) = self.handle.take() {
            self.last_latency = None;
            self.connected_at = None;
            self.provider.disconnect(old_handle).await?;
        }
        self.open().await
    }

    /// Releases the session connection. Safe to call when already closed.
    pub async fn close(&mut self) -> Result<(), SessionError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        self.last_latency = None;
        self.connected_at = None;
        self.provider.disconnect(handle).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::{
        ConnectError, ConnectErrorKind, ConnectionProvider, Session, SessionError, SessionStatus,
    };

    /// Tracks the open/close balance; `max_live` records the highest number
    /// of simultaneously live handles ever observed.
    #[derive(Debug, Default)]
    struct CountingProvider {
        live: Arc<AtomicIsize>,
        max_live: Arc<AtomicIsize>,
        open_calls: AtomicUsize,
        close_calls: AtomicUsize,
        fail_connects: AtomicUsize,
        fail_pings: AtomicUsize,
    }

    struct CountedHandle {
        live: Arc<AtomicIsize>,
    }

    #[async_trait::async_trait]
    impl ConnectionProvider for CountingProvider {
        type Handle = CountedHandle;

        async fn connect(&self) -> Result<Self::Handle, ConnectError> {
            if self.fail_connects.load(Ordering::Relaxed) > 0 {
                self.fail_connects.fetch_sub(1, Ordering::Relaxed);
                return Err(ConnectError::new(
                    ConnectErrorKind::Unreachable,
                    "connect refused",
                ));
            }

            self.open_calls.fetch_add(1, Ordering::Relaxed);
            let live = self.live.fetch_add(1, Ordering::Relaxed) + 1;
            self.max_live.fetch_max(live, Ordering::Relaxed);
            Ok(CountedHandle {
                live: Arc::clone(&self.live),
            })
        }

        async fn ping(&self, _handle: &mut Self::Handle) -> Result<(), ConnectError> {
            if self.fail_pings.load(Ordering::Relaxed) > 0 {
                self.fail_pings.fetch_sub(1, Ordering::Relaxed);
                return Err(ConnectError::new(
                    ConnectErrorKind::Unreachable,
                    "ping timed out",
                ));
            }
            Ok(())
        }

        async fn disconnect(&self, handle: Self::Handle) -> Result<(), ConnectError> {
            self.close_calls.fetch_add(1, Ordering::Relaxed);
            handle.live.fetch_sub(1, Ordering::Relaxed);
            Ok(())
        }
    }

    #[tokio::test]
    async fn open_connects_and_reports_status() {
        let mut session = Session::new(CountingProvider::default());
        let latency = session.open().await.expect("open should succeed");
        assert!(latency >= std::time::Duration::ZERO);

        let status = session.status();
        assert!(status.is_connected);
        assert!(status.last_latency.is_some());
        assert!(status.connected_at.is_some());
    }

    #[tokio::test]
    async fn second_open_is_rejected_while_connected() {
        let mut session = Session::new(CountingProvider::default());
        session.open().await.expect("first open should succeed");

        let err = session.open().await.expect_err("second open should fail");
        assert!(matches!(err, SessionError::AlreadyOpen));
    }

    #[tokio::test]
    async fn refresh_never_holds_two_live_handles() {
        let mut session = Session::new(CountingProvider::default());
        session.open().await.expect("open should succeed");
        session.refresh().await.expect("refresh should succeed");
        session.refresh().await.expect("refresh should succeed");

        let provider = &session.provider;
        assert_eq!(provider.open_calls.load(Ordering::Relaxed), 3);
        assert_eq!(provider.close_calls.load(Ordering::Relaxed), 2);
        assert_eq!(provider.max_live.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn refresh_from_closed_state_just_opens() {
        let mut session = Session::new(CountingProvider::default());
        session.refresh().await.expect("refresh should open");
        assert!(session.status().is_connected);
    }

    #[tokio::test]
    async fn failed_connect_leaves_session_closed() {
        let provider = CountingProvider {
            fail_connects: AtomicUsize::new(1),
            ..CountingProvider::default()
        };
        let mut session = Session::new(provider);

        let err = session.open().await.expect_err("open should fail");
        assert!(matches!(
            err,
            SessionError::Connect(ConnectError {
                kind: ConnectErrorKind::Unreachable,
                ..
            })
        ));
        assert_eq!(session.status(), SessionStatus::disconnected());
    }

    #[tokio::test]
    async fn failed_ping_releases_the_handle() {
        let provider = CountingProvider {
            fail_pings: AtomicUsize::new(1),
            ..CountingProvider::default()
        };
        let mut session = Session::new(provider);

        let err = session.open().await.expect_err("open should fail on ping");
        assert!(matches!(err, SessionError::Connect(_)));
        assert_eq!(session.status(), SessionStatus::disconnected());

        session.open().await.expect("reopen should succeed");

        let provider = session.provider();
        let opens = provider.open_calls.load(Ordering::Relaxed);
        let closes = provider.close_calls.load(Ordering::Relaxed);
        assert_eq!(opens, 2);
        assert_eq!(closes, 1);
        assert_eq!(provider.max_live.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let mut session = Session::new(CountingProvider::default());
        session.open().await.expect("open should succeed");
        session.close().await.expect("close should succeed");
        session.close().await.expect("close should stay idempotent");
        assert_eq!(session.status(), SessionStatus::disconnected());
    }
}
