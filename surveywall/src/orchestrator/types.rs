//! Terminal presentation results.

/// Terminal result of one presentation attempt.
///
/// Exactly one value is delivered per presentation; no bridge events are
/// processed after it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentationResult {
    /// The interview finished.
    Completed,
    /// The interview was skipped by the widget.
    Skipped,
    /// The user dismissed the survey.
    Canceled,
    /// The wall declined to show content but the user is credited anyway.
    CreditEarned,
    /// No survey could be offered.
    NoSurveyAvailable,
    /// Availability was never established or the network went away.
    NetworkNotAvailable,
}

impl PresentationResult {
    /// Returns true if the user finished or was credited for the survey.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed | Self::CreditEarned)
    }
}

impl std::fmt::Display for PresentationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "Completed"),
            Self::Skipped => write!(f, "Skipped"),
            Self::Canceled => write!(f, "Canceled"),
            Self::CreditEarned => write!(f, "CreditEarned"),
            Self::NoSurveyAvailable => write!(f, "NoSurveyAvailable"),
            Self::NetworkNotAvailable => write!(f, "NetworkNotAvailable"),
        }
    }
}
