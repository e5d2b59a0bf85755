//! Application Context
//!
//! Shared UI state provided via Leptos Context API.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;

/// Top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Cards,
    Canvas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub message: String,
    pub kind: ToastKind,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Visible toasts, oldest first - read
    pub toasts: ReadSignal<Vec<Toast>>,
    /// Visible toasts - write
    set_toasts: WriteSignal<Vec<Toast>>,
    next_toast_id: StoredValue<u32>,
    /// How long a toast stays up
    toast_ms: Signal<u32>,
    /// Card currently in edit mode - read
    pub editing_card: ReadSignal<Option<String>>,
    /// Card currently in edit mode - write
    set_editing_card: WriteSignal<Option<String>>,
    /// Active view - read
    pub view: ReadSignal<View>,
    /// Active view - write
    pub set_view: WriteSignal<View>,
    /// Document library modal - read
    pub library_open: ReadSignal<bool>,
    /// Document library modal - write
    pub set_library_open: WriteSignal<bool>,
}

impl AppContext {
    pub fn new(toast_ms: Signal<u32>) -> Self {
        let (toasts, set_toasts) = signal(Vec::new());
        let (editing_card, set_editing_card) = signal(None);
        let (view, set_view) = signal(View::Cards);
        let (library_open, set_library_open) = signal(false);
        Self {
            toasts,
            set_toasts,
            next_toast_id: StoredValue::new(0),
            toast_ms,
            editing_card,
            set_editing_card,
            view,
            set_view,
            library_open,
            set_library_open,
        }
    }

    /// Show a toast that dismisses itself
    pub fn notify(&self, message: impl Into<String>) {
        self.push_toast(message.into(), ToastKind::Info);
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        self.push_toast(message.into(), ToastKind::Error);
    }

    fn push_toast(&self, message: String, kind: ToastKind) {
        let id = self.next_toast_id.get_value();
        self.next_toast_id.set_value(id.wrapping_add(1));
        self.set_toasts.update(|t| t.push(Toast { id, message, kind }));

        let ms = self.toast_ms.get_untracked();
        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(ms).await;
            ctx.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|t| t.retain(|toast| toast.id != id));
    }

    /// Put a card in edit mode; any other card leaves it
    pub fn start_editing(&self, card_id: &str) {
        self.set_editing_card.set(Some(card_id.to_string()));
    }

    pub fn stop_editing(&self) {
        self.set_editing_card.set(None);
    }

    pub fn is_editing(&self, card_id: &str) -> bool {
        self.editing_card.with(|e| e.as_deref() == Some(card_id))
    }

    /// Copy text and confirm with a toast; failures block with an alert
    pub fn copy_to_clipboard(&self, text: String) {
        let ctx = *self;
        spawn_local(async move {
            match commands::copy_text(&text).await {
                Ok(()) => ctx.notify("Copied"),
                Err(e) => {
                    tracing::error!("Clipboard write failed: {}", e);
                    commands::alert(&format!("Copy failed: {}", e));
                }
            }
        });
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
