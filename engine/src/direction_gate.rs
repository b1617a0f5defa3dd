use crate::types::Direction;

/// Restricts turns to 90 degrees relative to the committed direction.
///
/// At most one request is accepted per tick window: once a turn is latched,
/// further requests are dropped until [`DirectionGate::take`] consumes it.
#[derive(Clone, Copy, Debug)]
pub struct DirectionGate {
    committed: Direction,
    latched: bool,
}

impl DirectionGate {
    pub fn new(initial: Direction) -> Self {
        Self {
            committed: initial,
            latched: false,
        }
    }

    pub fn committed(&self) -> Direction {
        self.committed
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Returns whether the request changed the committed direction.
    pub fn request(&mut self, requested: Direction) -> bool {
        if self.latched || !self.committed.can_turn_to(requested) {
            return false;
        }
        self.committed = requested;
        self.latched = true;
        true
    }

    /// Hands the direction to the tick about to run and reopens the gate.
    pub fn take(&mut self) -> Direction {
        self.latched = false;
        self.committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_matches_turn_table() {
        for current in Direction::ALL {
            for requested in Direction::ALL {
                let mut gate = DirectionGate::new(current);
                let accepted = gate.request(requested);
                assert_eq!(accepted, current.can_turn_to(requested));
                let expected = if accepted { requested } else { current };
                assert_eq!(gate.committed(), expected);
            }
        }
    }

    #[test]
    fn test_second_turn_in_same_window_is_dropped() {
        let mut gate = DirectionGate::new(Direction::Up);
        assert!(gate.request(Direction::Right));
        assert!(!gate.request(Direction::Down));
        assert_eq!(gate.take(), Direction::Right);

        assert!(gate.request(Direction::Down));
        assert_eq!(gate.take(), Direction::Down);
    }

    #[test]
    fn test_rejected_request_does_not_latch() {
        let mut gate = DirectionGate::new(Direction::Up);
        assert!(!gate.request(Direction::Down));
        assert!(!gate.request(Direction::Up));
        assert!(!gate.is_latched());
        assert!(gate.request(Direction::Left));
    }
}
