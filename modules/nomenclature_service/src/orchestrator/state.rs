//! Form state machine of one entity page
//!
//! Transitions consume the current state and return the next one; the page
//! controller performs the network calls in between.

use crate::contract::RecordId;

/// What the form is doing right now.
///
/// `target` is the record under edit, `None` when the form creates a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState<D> {
    /// Empty form, ready to create
    Idle { draft: D },
    /// Form prefilled from an existing record
    Editing { id: RecordId, draft: D },
    /// Request in flight
    Submitting { target: Option<RecordId>, draft: D },
    /// Last submit failed; the form keeps what the user typed
    Error {
        message: String,
        target: Option<RecordId>,
        draft: D,
    },
}

/// Request the controller has to send after a successful local check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<D> {
    Create(D),
    Update(RecordId, D),
}

impl<D: Default> Default for PageState<D> {
    fn default() -> Self {
        PageState::Idle { draft: D::default() }
    }
}

impl<D: Clone + Default> PageState<D> {
    /// Load a record's fields into the form. Ignored while submitting.
    pub fn start_edit(self, id: RecordId, draft: D) -> Self {
        match self {
            PageState::Submitting { .. } => self,
            _ => PageState::Editing { id, draft },
        }
    }

    /// Drop in-progress edits
    pub fn cancel(self) -> Self {
        Self::default()
    }

    /// Run the local precondition and, if it passes, move to `Submitting`.
    ///
    /// A failed check moves to `Error` without producing a submission.
    pub fn submit<F>(self, check: F) -> (Self, Option<Submission<D>>)
    where
        F: FnOnce(&D) -> Result<(), String>,
    {
        let (target, draft) = match self {
            PageState::Submitting { .. } => return (self, None),
            PageState::Idle { draft } => (None, draft),
            PageState::Editing { id, draft } => (Some(id), draft),
            PageState::Error { target, draft, .. } => (target, draft),
        };

        if let Err(message) = check(&draft) {
            return (PageState::Error { message, target, draft }, None);
        }

        let submission = match target {
            Some(id) => Submission::Update(id, draft.clone()),
            None => Submission::Create(draft.clone()),
        };
        (PageState::Submitting { target, draft }, Some(submission))
    }

    pub fn submit_succeeded(self) -> Self {
        match self {
            PageState::Submitting { .. } => Self::default(),
            other => other,
        }
    }

    pub fn submit_failed(self, message: impl Into<String>) -> Self {
        match self {
            PageState::Submitting { target, draft } => PageState::Error {
                message: message.into(),
                target,
                draft,
            },
            other => other,
        }
    }

    /// A record was deleted; an edit of that record is abandoned
    pub fn record_deleted(self, id: RecordId) -> Self {
        if self.target() == Some(id) {
            Self::default()
        } else {
            self
        }
    }
}

impl<D> PageState<D> {
    pub fn draft(&self) -> &D {
        match self {
            PageState::Idle { draft }
            | PageState::Editing { draft, .. }
            | PageState::Submitting { draft, .. }
            | PageState::Error { draft, .. } => draft,
        }
    }

    /// The form is read-only while a request is in flight
    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            PageState::Idle { draft }
            | PageState::Editing { draft, .. }
            | PageState::Error { draft, .. } => Some(draft),
            PageState::Submitting { .. } => None,
        }
    }

    pub fn target(&self) -> Option<RecordId> {
        match self {
            PageState::Idle { .. } => None,
            PageState::Editing { id, .. } => Some(*id),
            PageState::Submitting { target, .. } | PageState::Error { target, .. } => *target,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, PageState::Submitting { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageState::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}
