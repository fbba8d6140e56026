//! Notification severities and the toast carried across a navigation.
//!
//! [`FlashSlot`] holds one pending toast and yields it once, so a reload of
//! the page that showed it never shows it again.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A toast to show after the next navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flash {
    pub kind: ToastKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

/// Holds at most one pending [`Flash`]; reading it clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlashSlot(Option<Flash>);

impl FlashSlot {
    pub fn put(&mut self, flash: Flash) {
        self.0 = Some(flash);
    }

    pub fn take(&mut self) -> Option<Flash> {
        self.0.take()
    }

    pub fn is_pending(&self) -> bool {
        self.0.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_is_taken_once() {
        let mut slot = FlashSlot::default();
        assert!(slot.take().is_none());
        slot.put(Flash::error("nope"));
        assert!(slot.is_pending());
        assert_eq!(slot.take(), Some(Flash::error("nope")));
        assert!(slot.take().is_none());
    }
}
