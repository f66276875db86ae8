//! Request generations for discarding stale responses.

/// Counts loads issued by one view-model.
///
/// Every load takes a `Ticket`; only the ticket of the most recent load may
/// apply its result. Closing the generation (the screen went away) makes
/// every outstanding ticket stale.
#[derive(Debug, Default)]
pub struct Generation {
    current: u64,
    closed: bool,
}

/// Proof of which load a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Generation {
    pub fn begin(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        !self.closed && ticket.0 == self.current
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
