use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket of one list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Request epochs: only the response of the latest request is applied,
/// whatever order responses arrive in.
#[derive(Debug, Default)]
pub struct RequestEpoch {
    latest: AtomicU64,
}

impl RequestEpoch {
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superseded_ticket_is_rejected() {
        let epoch = RequestEpoch::default();
        let page_1 = epoch.begin();
        let page_2 = epoch.begin();
        // page 2 answers first, page 1 arrives late
        assert!(epoch.is_current(page_2));
        assert!(!epoch.is_current(page_1));
    }

    #[test]
    fn test_single_request_is_current() {
        let epoch = RequestEpoch::default();
        let ticket = epoch.begin();
        assert!(epoch.is_current(ticket));
    }
}
