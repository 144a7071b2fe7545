//! Injected environment capabilities.
//!
//! The browser console reached straight for `window.location`, `alert`,
//! and a global spinner element. Those ambient effects become injected
//! ports here so the client runs (and is tested) without a browser:
//! a [`Navigator`] for the redirect-to-login side effect, a [`Notifier`]
//! for toasts/alerts, and a [`BusyIndicator`] for the global spinner.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Label used when rendering the notification in plain text.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Full-page-navigation port.
///
/// Called when the session is missing or rejected; the environment decides
/// what "go to the login entry point" means (a real redirect, a CLI hint).
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// User-visible notification port (toast/alert analog).
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

/// Busy-indicator port: the show/hide pair around outstanding calls.
///
/// Implementations only see edge transitions; the client guarantees
/// `show` fires when the first in-flight call starts and `hide` when the
/// last one resolves (see [`BusyGauge`]).
pub trait BusyIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

/// Port implementation that does nothing.
///
/// Default for embedding contexts without a user interface.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPort;

impl Navigator for NoopPort {
    fn redirect_to_login(&self) {}
}

impl Notifier for NoopPort {
    fn notify(&self, _severity: Severity, _message: &str) {}
}

impl BusyIndicator for NoopPort {
    fn show(&self) {}
    fn hide(&self) {}
}

/// Reference-counted visibility gauge over a [`BusyIndicator`].
///
/// The original console toggled a shared boolean around each call, so two
/// overlapping requests hid the spinner as soon as the first one finished.
/// The gauge counts in-flight calls instead: `show` fires on the 0 -> 1
/// transition, `hide` on 1 -> 0.
#[derive(Clone)]
pub struct BusyGauge {
    indicator: Arc<dyn BusyIndicator>,
    in_flight: Arc<AtomicUsize>,
}

impl BusyGauge {
    /// Wrap an indicator port in a counting gauge.
    pub fn new(indicator: Arc<dyn BusyIndicator>) -> Self {
        Self {
            indicator,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of calls currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Open a busy span for one call.
    ///
    /// The returned guard decrements on drop, so the span closes exactly
    /// once whether the call succeeds, fails, or panics.
    #[must_use]
    pub fn enter(&self) -> BusySpan {
        if self.in_flight.fetch_add(1, Ordering::SeqCst) == 0 {
            self.indicator.show();
        }
        BusySpan {
            gauge: self.clone(),
        }
    }
}

/// RAII guard for one in-flight call.
pub struct BusySpan {
    gauge: BusyGauge,
}

impl Drop for BusySpan {
    fn drop(&mut self) {
        if self.gauge.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.gauge.indicator.hide();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct EdgeRecorder {
        events: Mutex<Vec<&'static str>>,
    }

    impl BusyIndicator for EdgeRecorder {
        fn show(&self) {
            self.events
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push("show");
        }

        fn hide(&self) {
            self.events
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push("hide");
        }
    }

    impl EdgeRecorder {
        fn events(&self) -> Vec<&'static str> {
            self.events
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .clone()
        }
    }

    #[test]
    fn test_single_span_shows_then_hides() {
        let recorder = Arc::new(EdgeRecorder::default());
        let gauge = BusyGauge::new(recorder.clone());

        let span = gauge.enter();
        assert_eq!(recorder.events(), vec!["show"]);
        assert_eq!(gauge.in_flight(), 1);

        drop(span);
        assert_eq!(recorder.events(), vec!["show", "hide"]);
        assert_eq!(gauge.in_flight(), 0);
    }

    #[test]
    fn test_overlapping_spans_hide_only_after_last() {
        let recorder = Arc::new(EdgeRecorder::default());
        let gauge = BusyGauge::new(recorder.clone());

        let first = gauge.enter();
        let second = gauge.enter();
        // Second span starts while the first is in flight: no extra show.
        assert_eq!(recorder.events(), vec!["show"]);

        drop(first);
        // One call still outstanding: the indicator must stay visible.
        assert_eq!(recorder.events(), vec!["show"]);
        assert_eq!(gauge.in_flight(), 1);

        drop(second);
        assert_eq!(recorder.events(), vec!["show", "hide"]);
    }

    #[test]
    fn test_sequential_spans_toggle_each_time() {
        let recorder = Arc::new(EdgeRecorder::default());
        let gauge = BusyGauge::new(recorder.clone());

        drop(gauge.enter());
        drop(gauge.enter());
        assert_eq!(recorder.events(), vec!["show", "hide", "show", "hide"]);
    }
}
