//! Login state and the scripted login sequence.

use std::collections::VecDeque;
use std::time::Duration;

use folio_types::config::LoginStep;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginState {
    #[default]
    Prompting,
    LoggingIn,
    LoggedIn,
}

/// Per-load session: login progress, username and current folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub login: LoginState,
    pub username: Option<String>,
    pub cwd: Vec<String>,
}

impl Session {
    /// A session for a remembered user starts logged in.
    pub fn restored(username: Option<String>) -> Self {
        let login = if username.is_some() {
            LoginState::LoggedIn
        } else {
            LoginState::Prompting
        };
        Self {
            login,
            username,
            cwd: Vec::new(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.login == LoginState::LoggedIn
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or("guest")
    }

    pub fn logout(&mut self) {
        *self = Self::default();
    }
}

/// Ordered `(delay, message)` steps. Each step's delay counts from the
/// moment the previous step fired, so steps never overlap.
#[derive(Debug, Clone, Default)]
pub struct LoginSequence {
    pending: VecDeque<(Duration, String)>,
    /// Time accumulated towards the front step.
    waited: Duration,
}

impl LoginSequence {
    /// Build the sequence for `username`, substituting `{name}`.
    pub fn new(steps: &[LoginStep], username: &str) -> Self {
        let pending = steps
            .iter()
            .map(|step| (step.delay(), step.message.replace("{name}", username)))
            .collect();
        Self {
            pending,
            waited: Duration::ZERO,
        }
    }

    /// Let `dt` pass and return the messages whose time has come, in order.
    pub fn advance(&mut self, dt: Duration) -> Vec<String> {
        self.waited += dt;
        let mut fired = Vec::new();
        while let Some((delay, _)) = self.pending.front() {
            if self.waited < *delay {
                break;
            }
            self.waited -= *delay;
            if let Some((_, message)) = self.pending.pop_front() {
                fired.push(message);
            }
        }
        if self.pending.is_empty() {
            self.waited = Duration::ZERO;
        }
        fired
    }

    /// Time left until the next message fires.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending
            .front()
            .map(|(delay, _)| delay.saturating_sub(self.waited))
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }
}
