//! One-shot status messages carried through a redirect as a query code.

use axum::response::Redirect;

use crate::components::{Alert, AlertVariant};

/// Outcome of a form action, shown once on the page the action redirects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Scheduled,
    /// Saved locally but the remote scheduling call failed.
    ScheduledLocally,
    Posted,
    Removed,
    MissingNiche,
    MissingDraft,
    BadTime,
    BadIndex,
    PostFailed,
    StoreFailed,
}

impl Flash {
    const ALL: [Flash; 10] = [
        Flash::Scheduled,
        Flash::ScheduledLocally,
        Flash::Posted,
        Flash::Removed,
        Flash::MissingNiche,
        Flash::MissingDraft,
        Flash::BadTime,
        Flash::BadIndex,
        Flash::PostFailed,
        Flash::StoreFailed,
    ];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::ScheduledLocally => "scheduled_locally",
            Self::Posted => "posted",
            Self::Removed => "removed",
            Self::MissingNiche => "missing_niche",
            Self::MissingDraft => "missing_draft",
            Self::BadTime => "bad_time",
            Self::BadIndex => "bad_index",
            Self::PostFailed => "post_failed",
            Self::StoreFailed => "store_failed",
        }
    }

    /// Look up a code; unknown codes are ignored.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.code() == code)
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(
            self,
            Self::MissingNiche
                | Self::MissingDraft
                | Self::BadTime
                | Self::BadIndex
                | Self::PostFailed
                | Self::StoreFailed
        )
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Scheduled => "Post scheduled.",
            Self::ScheduledLocally => {
                "Post saved to the schedule, but the remote scheduling call failed. See the log."
            }
            Self::Posted => "Posted.",
            Self::Removed => "Scheduled post removed.",
            Self::MissingNiche => "Enter a topic or niche first.",
            Self::MissingDraft => "Pick a draft before scheduling.",
            Self::BadTime => "Post time must look like 2025-03-01T14:30.",
            Self::BadIndex => "That schedule entry does not exist.",
            Self::PostFailed => "Posting failed. See the log for details.",
            Self::StoreFailed => "Could not save the schedule file. See the log.",
        }
    }

    #[must_use]
    pub const fn alert(self) -> Alert<'static> {
        let variant = match self {
            Self::ScheduledLocally => AlertVariant::Warning,
            _ if self.is_error() => AlertVariant::Error,
            _ => AlertVariant::Success,
        };
        Alert::new(variant, self.message())
    }

    /// Redirect to the home page carrying this flash.
    #[must_use]
    pub fn redirect(self) -> Redirect {
        let key = if self.is_error() { "error" } else { "notice" };
        Redirect::to(&format!("/?{key}={}", self.code()))
    }
}
