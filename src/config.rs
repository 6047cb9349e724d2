//! # Group configuration.
//!
//! Provides [`Config`] settings consumed by [`GroupBuilder`](crate::GroupBuilder).
//!
//! Only the termination actor reads it today: [`Config::signals`] selects which
//! OS signals [`Group::run_with_termination`](crate::Group::run_with_termination)
//! treats as a request to stop.

/// OS-level termination requests the group can listen for.
///
/// On non-Unix platforms every variant collapses to Ctrl-C.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerminationSignal {
    /// `SIGINT` (Ctrl-C in terminal).
    Interrupt,
    /// `SIGTERM` (default kill signal, used by systemd/Kubernetes).
    Terminate,
    /// `SIGQUIT`.
    Quit,
    /// `SIGHUP` (controlling terminal closed).
    Hangup,
}

impl TerminationSignal {
    /// Returns the conventional signal name, e.g. `SIGTERM`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationSignal::Interrupt => "SIGINT",
            TerminationSignal::Terminate => "SIGTERM",
            TerminationSignal::Quit => "SIGQUIT",
            TerminationSignal::Hangup => "SIGHUP",
        }
    }
}

/// Configuration for an actor group.
///
/// ## Field semantics
/// - `signals`: signals observed by the termination actor (empty = none, the
///   actor then only exits on token cancellation or interrupt)
#[derive(Clone, Debug)]
pub struct Config {
    /// Signals that count as an external termination request.
    pub signals: Vec<TerminationSignal>,
}

impl Config {
    /// Returns the configured signals without duplicates, keeping their order.
    pub fn unique_signals(&self) -> Vec<TerminationSignal> {
        let mut out: Vec<TerminationSignal> = Vec::with_capacity(self.signals.len());
        for s in &self.signals {
            if !out.contains(s) {
                out.push(*s);
            }
        }
        out
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `signals = [SIGINT, SIGTERM]`
    fn default() -> Self {
        Self {
            signals: vec![TerminationSignal::Interrupt, TerminationSignal::Terminate],
        }
    }
}
