//! Run state machine.
//!
//! ```text
//! Idle → Authenticated → EnvelopeCreated → ViewObtained → Done
//!   └──────────┴───────────────┴────────────────┴──→ Failed(kind)
//! ```

use crate::error::FailureKind;

/// Where a signing run currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningState {
    Idle,
    Authenticated {
        account_id: String,
    },
    EnvelopeCreated {
        account_id: String,
        envelope_id: String,
    },
    ViewObtained {
        account_id: String,
        envelope_id: String,
        url: String,
    },
    Done,
    Failed(FailureKind),
}

impl SigningState {
    pub fn name(&self) -> &'static str {
        match self {
            SigningState::Idle => "idle",
            SigningState::Authenticated { .. } => "authenticated",
            SigningState::EnvelopeCreated { .. } => "envelope_created",
            SigningState::ViewObtained { .. } => "view_obtained",
            SigningState::Done => "done",
            SigningState::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SigningState::Done | SigningState::Failed(_))
    }

    /// Whether `next` is a legal successor of this state.
    pub fn can_advance_to(&self, next: &SigningState) -> bool {
        use SigningState::*;

        match (self, next) {
            (s, Failed(_)) => !s.is_terminal(),
            (Idle, Authenticated { .. }) => true,
            (Authenticated { .. }, EnvelopeCreated { .. }) => true,
            (EnvelopeCreated { .. }, ViewObtained { .. }) => true,
            (ViewObtained { .. }, Done) => true,
            _ => false,
        }
    }
}

/// Current state of one run plus every state it went through.
#[derive(Debug, Clone)]
pub struct SigningRun {
    state: SigningState,
    history: Vec<SigningState>,
}

impl SigningRun {
    pub fn new() -> Self {
        Self {
            state: SigningState::Idle,
            history: vec![SigningState::Idle],
        }
    }

    pub fn state(&self) -> &SigningState {
        &self.state
    }

    pub fn history(&self) -> &[SigningState] {
        &self.history
    }

    /// Names of visited states, oldest first.
    pub fn trail(&self) -> Vec<&'static str> {
        self.history.iter().map(SigningState::name).collect()
    }

    /// Move to `next`. Illegal transitions are ignored and logged.
    pub fn advance(&mut self, next: SigningState) -> bool {
        if !self.state.can_advance_to(&next) {
            tracing::warn!(
                from = self.state.name(),
                to = next.name(),
                "Ignoring illegal state transition"
            );
            return false;
        }

        tracing::debug!(from = self.state.name(), to = next.name(), "State transition");
        self.history.push(next.clone());
        self.state = next;
        true
    }

    /// Record a failure unless the run already finished.
    pub fn fail(&mut self, kind: FailureKind) -> bool {
        self.advance(SigningState::Failed(kind))
    }
}

impl Default for SigningRun {
    fn default() -> Self {
        Self::new()
    }
}
