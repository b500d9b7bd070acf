use error_common::SecurityError;

/// Lifecycle of a single authorization request.
///
/// `Idle -> Checking -> Authorized | Denied`. The two terminal states are
/// final; a new request starts a new [`Authorization`].
#[derive(Debug, Clone, PartialEq)]
pub enum GateState<T> {
    Idle,
    Checking,
    /// Access granted, with the validated and sanitized payload when one
    /// was submitted.
    Authorized(Option<T>),
    Denied(SecurityError),
}

impl<T> GateState<T> {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Authorized(_) | Self::Denied(_))
    }
}

/// Outcome of one call to the gate, owned by the caller's request.
#[derive(Debug, Clone, PartialEq)]
pub struct Authorization<T> {
    state: GateState<T>,
}

impl<T> Authorization<T> {
    pub(crate) fn new() -> Self {
        Self { state: GateState::Idle }
    }

    pub(crate) fn begin(&mut self) {
        if matches!(self.state, GateState::Idle) {
            self.state = GateState::Checking;
        }
    }

    pub(crate) fn grant(mut self, data: Option<T>) -> Self {
        if matches!(self.state, GateState::Checking) {
            self.state = GateState::Authorized(data);
        }
        self
    }

    pub(crate) fn deny(mut self, error: SecurityError) -> Self {
        if matches!(self.state, GateState::Checking) {
            self.state = GateState::Denied(error);
        }
        self
    }

    pub fn state(&self) -> &GateState<T> {
        &self.state
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self.state, GateState::Authorized(_))
    }

    /// The denial reason, if access was refused.
    pub fn error(&self) -> Option<&SecurityError> {
        match &self.state {
            GateState::Denied(error) => Some(error),
            _ => None,
        }
    }

    /// Collapse into the clean payload or the denial.
    ///
    /// # Errors
    ///
    /// The [`SecurityError`] that denied the request. An authorization that
    /// never reached a verdict is reported as a permission denial.
    pub fn into_result(self) -> Result<Option<T>, SecurityError> {
        match self.state {
            GateState::Authorized(data) => Ok(data),
            GateState::Denied(error) => Err(error),
            GateState::Idle | GateState::Checking => {
                Err(SecurityError::permission_denied("Authorization did not complete"))
            }
        }
    }
}
