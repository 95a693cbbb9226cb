/// Capture session state machine.
///
/// State transitions:
/// ```text
/// idle → active → closed
/// ```
/// A closed session holds no hardware resources and never becomes active again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Active,
    Closed,
}

impl CaptureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        let state = CaptureState::default();
        assert!(state.is_idle());
        assert!(!state.is_active());
        assert!(!state.is_closed());
    }

    #[test]
    fn names() {
        assert_eq!(CaptureState::Active.as_str(), "active");
        assert_eq!(CaptureState::Closed.as_str(), "closed");
    }
}
