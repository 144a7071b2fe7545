//! Terminal implementations of the client's environment ports.

use neszi_client::{Navigator, Notifier, Severity};

/// Navigation port for a terminal: there is no page to redirect, so the
/// user gets a hint about how to re-authenticate.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect_to_login(&self) {
        eprintln!("Not logged in. Run `neszi-admin login` to start a session.");
    }
}

/// Notification port printing severity-tagged lines to stderr, keeping
/// stdout clean for command output.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        eprintln!("[{}] {message}", severity.label());
    }
}
