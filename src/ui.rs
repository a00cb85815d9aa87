//! Contract for the UI collaborator: transient notifications and
//! confirmation dialogs.
//!
//! The core never renders; shells implement [`UserInterface`] and the
//! [`api`](crate::api) facade drives it. A cancelled confirmation is a
//! normal user choice, modelled as [`Confirmation::Cancelled`] rather than
//! an error.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Fail,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub duration_ms: u64,
}

impl Toast {
    pub fn success(message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
            duration_ms,
        }
    }

    pub fn fail(message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            kind: ToastKind::Fail,
            message: message.into(),
            duration_ms,
        }
    }
}

/// A confirmation dialog request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    /// Hex color for the confirm button, e.g. `#ee0a24` for destructive
    /// actions.
    pub confirm_color: String,
}

impl ConfirmRequest {
    /// Red-button confirmation used by every destructive operation.
    pub fn destructive(
        title: impl Into<String>,
        message: impl Into<String>,
        confirm_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_text: confirm_text.into(),
            cancel_text: "Cancel".to_string(),
            confirm_color: "#ee0a24".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

/// What the shell must provide for the facade to surface feedback and gate
/// destructive operations.
pub trait UserInterface {
    fn toast(&self, toast: Toast);
    fn confirm(&self, request: ConfirmRequest) -> Confirmation;
}
