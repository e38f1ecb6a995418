//! In-memory toast queue drained by the UI.

use std::sync::Mutex;

use crate::ports::NotifierPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: Mutex<Vec<Toast>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(|p| p.into_inner()))
    }

    fn push(&self, kind: ToastKind, message: &str) {
        self.pending
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(Toast {
                kind,
                message: message.to_string(),
            });
    }
}

impl NotifierPort for ToastQueue {
    fn success(&self, message: &str) {
        self.push(ToastKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(ToastKind::Error, message);
    }
}
