//! Latest-request-wins bookkeeping.
//!
//! A [`Sequence`] hands out monotonically increasing [`Ticket`]s. Whoever
//! finishes an asynchronous step (a fetch, a debounce timer) checks its ticket
//! with [`Sequence::is_latest`] and drops its result when a newer ticket has
//! been issued in the meantime.

/// Identity of one issued request or timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence {
    latest: u64,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every earlier one.
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Supersede all outstanding tickets without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_newest_ticket_is_latest() {
        let mut seq = Sequence::new();
        let first = seq.issue();
        assert!(seq.is_latest(first));

        let second = seq.issue();
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
        assert!(first < second);

        seq.invalidate();
        assert!(!seq.is_latest(second));
    }
}
