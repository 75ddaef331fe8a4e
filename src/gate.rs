use crate::error::{HistoryError, Result};

/// Guards a capability set behind the history-enabled flag.
///
/// The flag is fixed at construction; every dispatch goes through
/// [`AccessGate::guarded`], so a disabled gate rejects each call before any
/// work happens.
#[derive(Debug, Clone)]
pub struct AccessGate<T> {
    inner: T,
    enabled: bool,
}

impl<T> AccessGate<T> {
    pub fn wrap(inner: T, enabled: bool) -> Self {
        AccessGate { inner, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn guarded(&self) -> Result<&T> {
        if self.enabled {
            Ok(&self.inner)
        } else {
            Err(HistoryError::Disabled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_gate_exposes_inner() {
        let gate = AccessGate::wrap(7_u32, true);
        assert!(gate.is_enabled());
        assert_eq!(*gate.guarded().unwrap(), 7);
    }

    #[test]
    fn disabled_gate_rejects_every_call() {
        let gate = AccessGate::wrap(7_u32, false);
        for _ in 0..3 {
            assert!(matches!(gate.guarded(), Err(HistoryError::Disabled)));
        }
    }
}
