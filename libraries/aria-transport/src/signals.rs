//! Transport-derived signals exposed to the UI

/// Current time, duration and readiness as last reported by the transport
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransportSignals {
    current_time: f64,
    duration: f64,
    ready: bool,
}

impl TransportSignals {
    /// Playback position in seconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Media duration in seconds (0 until known)
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Whether the loaded source can start playing
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub(crate) fn update_time(&mut self, current_time: f64, duration: f64) {
        self.current_time = finite_or_zero(current_time);
        self.duration = finite_or_zero(duration);
    }

    pub(crate) fn set_current_time(&mut self, seconds: f64) {
        self.current_time = finite_or_zero(seconds);
    }

    pub(crate) fn mark_ready(&mut self) {
        self.ready = true;
    }

    pub(crate) fn clear_ready(&mut self) {
        self.ready = false;
    }

    /// Everything back to zero for a freshly loaded source
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

// Media elements report NaN duration until metadata arrives.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_reports_become_zero() {
        let mut signals = TransportSignals::default();
        signals.update_time(12.5, f64::NAN);
        assert_eq!(signals.current_time(), 12.5);
        assert_eq!(signals.duration(), 0.0);

        signals.update_time(f64::INFINITY, 200.0);
        assert_eq!(signals.current_time(), 0.0);
        assert_eq!(signals.duration(), 200.0);
    }

    #[test]
    fn ready_is_sticky_until_reset() {
        let mut signals = TransportSignals::default();
        signals.mark_ready();
        signals.update_time(1.0, 2.0);
        assert!(signals.is_ready());

        signals.reset();
        assert!(!signals.is_ready());
        assert_eq!(signals.current_time(), 0.0);
    }
}
