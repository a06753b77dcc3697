/// Credentials for one call to the report API. Passed explicitly to every
/// request instead of being read from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    token: String,
}

impl RequestContext {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Identifies one outgoing request in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

/// Monotonic ticket issuer. Only the most recently issued ticket is current.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickets_increase_and_only_the_last_is_current() {
        let mut seq = RequestSequence::default();
        let first = seq.issue();
        let second = seq.issue();
        assert!(second > first);
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
    }

    #[test]
    fn bearer_header() {
        assert_eq!(RequestContext::new("abc").bearer(), "Bearer abc");
    }
}
