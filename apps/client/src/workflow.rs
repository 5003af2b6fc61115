//! Step Router — the three-stage workflow state machine.
//!
//! `Setup → Upload → Results`, forward-gated on session state. Gate
//! violations redirect instead of erroring: this is a navigation-guard model,
//! not an exception path. Backward navigation is free and clears nothing, so
//! `Results` is re-enterable without a re-analysis.

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Setup,
    Upload,
    Results,
}

/// Pure derivation of the furthest stage the session supports. The stage is
/// never stored independently of the state that justifies it.
pub fn current_stage(session: &Session) -> Stage {
    if session.analysis().is_some() {
        Stage::Results
    } else if session.has_credential() {
        Stage::Upload
    } else {
        Stage::Setup
    }
}

/// Resolves a requested stage against the session's gates.
///
/// - `Upload` without a credential redirects to `Setup`.
/// - `Results` without an analysis redirects to `Upload`, which is resolved
///   again and may chain down to `Setup`.
/// - `Setup` with a credential already set redirects forward to `Upload` —
///   once satisfied there is no staying on `Setup`.
pub fn resolve(requested: Stage, session: &Session) -> Stage {
    match requested {
        Stage::Setup if session.has_credential() => Stage::Upload,
        Stage::Setup => Stage::Setup,
        Stage::Upload if !session.has_credential() => Stage::Setup,
        Stage::Upload => Stage::Upload,
        Stage::Results if session.analysis().is_none() => resolve(Stage::Upload, session),
        Stage::Results => Stage::Results,
    }
}

/// Thin controller holding the stage currently on screen.
#[derive(Debug)]
pub struct StepRouter {
    current: Stage,
}

impl StepRouter {
    pub fn new(session: &Session) -> Self {
        Self {
            current: resolve(Stage::Setup, session),
        }
    }

    pub fn current(&self) -> Stage {
        self.current
    }

    /// Applies the navigation guard and lands on the resolved stage.
    pub fn navigate(&mut self, requested: Stage, session: &Session) -> Stage {
        self.current = resolve(requested, session);
        self.current
    }
}
