//! Edge detection for the "every phase complete" celebration.

/// Where the celebration currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    /// A completion edge was seen and not yet dismissed.
    AwaitingFact,
}

/// Permission to perform exactly one fact fetch for one completion edge.
///
/// Not `Clone`: redeeming consumes it.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a ticket that is never redeemed leaves the loading indicator up"]
pub struct FetchTicket {
    generation: u64,
}

/// Fires once per false→true transition of the all-complete condition.
///
/// At most one fetch is outstanding at a time: an edge seen while a fetch is
/// in flight does not issue a second ticket.
#[derive(Debug, Clone)]
pub struct CompletionTrigger {
    state: TriggerState,
    was_complete: bool,
    in_flight: bool,
    generation: u64,
}

impl Default for CompletionTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionTrigger {
    /// Starts idle with the condition assumed false, so a snapshot that is
    /// already complete at startup counts as an edge.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: TriggerState::Idle,
            was_complete: false,
            in_flight: false,
            generation: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> TriggerState {
        self.state
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Feed the latest all-complete value; returns a ticket on a rising edge.
    pub fn observe(&mut self, all_complete: bool) -> Option<FetchTicket> {
        let rising = all_complete && !self.was_complete;
        self.was_complete = all_complete;
        if !rising || self.in_flight {
            return None;
        }

        self.state = TriggerState::AwaitingFact;
        self.in_flight = true;
        self.generation += 1;
        Some(FetchTicket {
            generation: self.generation,
        })
    }

    /// True if the ticket belongs to the fetch currently awaited.
    #[must_use]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.in_flight && ticket.generation == self.generation
    }

    /// Mark the ticket's fetch as finished. Returns whether its message should
    /// be delivered; stale tickets return false.
    pub fn resolve(&mut self, ticket: FetchTicket) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Back to idle; any outstanding ticket becomes stale.
    pub fn dismiss(&mut self) {
        self.state = TriggerState::Idle;
        self.in_flight = false;
        self.was_complete = false;
        self.generation += 1;
    }
}
