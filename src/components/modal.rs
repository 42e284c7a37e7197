//! Modales
//!
//! Overlays bloqueantes: un modal genérico y una variante de confirmación.
//! Mientras un modal está abierto mantiene un `ScrollGuard`, de modo que el
//! scroll del fondo queda bloqueado hasta que se cierra el último overlay.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Bloqueo compartido del scroll de fondo
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> ScrollGuard {
        self.holders.fetch_add(1, Ordering::SeqCst);
        ScrollGuard {
            holders: Arc::clone(&self.holders),
        }
    }

    /// `true` mientras algún overlay esté abierto
    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::SeqCst) > 0
    }
}

#[derive(Debug)]
pub struct ScrollGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.holders.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Char(char),
}

/// Eventos que recibe un overlay abierto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    KeyDown(Key),
    BackdropClick,
    PanelClick,
    CloseButton,
}

#[derive(Debug)]
pub struct Modal {
    title: String,
    scroll: ScrollLock,
    guard: Option<ScrollGuard>,
}

impl Modal {
    pub fn new(title: impl Into<String>, scroll: &ScrollLock) -> Self {
        Self {
            title: title.into(),
            scroll: scroll.clone(),
            guard: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_open(&self) -> bool {
        self.guard.is_some()
    }

    pub fn open(&mut self) {
        if self.guard.is_none() {
            self.guard = Some(self.scroll.acquire());
        }
    }

    pub fn close(&mut self) {
        self.guard = None;
    }

    /// Procesar un evento; devuelve `true` si el modal se cerró
    pub fn handle(&mut self, event: ModalEvent) -> bool {
        if !self.is_open() {
            return false;
        }

        match event {
            ModalEvent::KeyDown(Key::Escape) | ModalEvent::BackdropClick | ModalEvent::CloseButton => {
                self.close();
                true
            }
            // El click dentro del panel no llega al fondo
            ModalEvent::PanelClick | ModalEvent::KeyDown(_) => false,
        }
    }
}

/// Modal de confirmación con una acción pendiente de tipo `T`
#[derive(Debug)]
pub struct ConfirmationModal<T> {
    modal: Modal,
    message: String,
    confirm_label: String,
    cancel_label: String,
    pending: Option<T>,
}

impl<T> ConfirmationModal<T> {
    pub fn new(title: impl Into<String>, message: impl Into<String>, scroll: &ScrollLock) -> Self {
        Self {
            modal: Modal::new(title, scroll),
            message: message.into(),
            confirm_label: "Yes".to_string(),
            cancel_label: "Cancel".to_string(),
            pending: None,
        }
    }

    pub fn with_confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }

    pub fn with_cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = label.into();
        self
    }

    pub fn title(&self) -> &str {
        self.modal.title()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn confirm_label(&self) -> &str {
        &self.confirm_label
    }

    pub fn cancel_label(&self) -> &str {
        &self.cancel_label
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Abrir pidiendo confirmación para `payload`
    pub fn open(&mut self, payload: T) {
        self.pending = Some(payload);
        self.modal.open();
    }

    /// Confirmar: se cierra siempre y devuelve la acción para ejecutarla
    pub fn confirm(&mut self) -> Option<T> {
        if !self.modal.is_open() {
            return None;
        }
        self.modal.close();
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.modal.close();
        self.pending = None;
    }

    pub fn handle(&mut self, event: ModalEvent) -> bool {
        let closed = self.modal.handle(event);
        if closed {
            self.pending = None;
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_closed_until_opened() {
        let scroll = ScrollLock::new();
        let mut modal = Modal::new("Car Details", &scroll);

        assert!(!modal.is_open());
        assert!(!modal.handle(ModalEvent::KeyDown(Key::Escape)));
        assert!(!scroll.is_locked());

        modal.open();
        assert!(modal.is_open());
        assert!(scroll.is_locked());
    }

    #[test]
    fn test_escape_backdrop_and_close_button_close() {
        let scroll = ScrollLock::new();
        let mut modal = Modal::new("Edit Car", &scroll);

        for event in [
            ModalEvent::KeyDown(Key::Escape),
            ModalEvent::BackdropClick,
            ModalEvent::CloseButton,
        ] {
            modal.open();
            assert!(modal.handle(event));
            assert!(!modal.is_open());
            assert!(!scroll.is_locked());
        }
    }

    #[test]
    fn test_panel_click_and_other_keys_keep_modal_open() {
        let scroll = ScrollLock::new();
        let mut modal = Modal::new("Edit Car", &scroll);
        modal.open();

        assert!(!modal.handle(ModalEvent::PanelClick));
        assert!(!modal.handle(ModalEvent::KeyDown(Key::Enter)));
        assert!(!modal.handle(ModalEvent::KeyDown(Key::Char('q'))));
        assert!(modal.is_open());
    }

    #[test]
    fn test_scroll_restored_after_last_overlay() {
        let scroll = ScrollLock::new();
        let mut outer = Modal::new("Car Details", &scroll);
        let mut inner: ConfirmationModal<i64> = ConfirmationModal::new("Delete Car", "Sure?", &scroll);

        outer.open();
        inner.open(4);
        inner.cancel();
        assert!(scroll.is_locked());

        outer.close();
        assert!(!scroll.is_locked());
    }

    #[test]
    fn test_opening_twice_holds_one_guard() {
        let scroll = ScrollLock::new();
        let mut modal = Modal::new("Add New Car", &scroll);
        modal.open();
        modal.open();
        modal.close();
        assert!(!scroll.is_locked());
    }

    #[test]
    fn test_confirm_returns_payload_and_closes() {
        let scroll = ScrollLock::new();
        let mut confirm = ConfirmationModal::new("Delete Car", "Sure?", &scroll)
            .with_confirm_label("Delete");

        assert_eq!(confirm.confirm_label(), "Delete");
        assert_eq!(confirm.cancel_label(), "Cancel");
        assert_eq!(confirm.confirm(), None);

        confirm.open(12_i64);
        assert_eq!(confirm.pending(), Some(&12));
        assert_eq!(confirm.confirm(), Some(12));
        assert!(!confirm.is_open());
        assert_eq!(confirm.pending(), None);
        assert!(!scroll.is_locked());
    }

    #[test]
    fn test_escape_drops_pending_action() {
        let scroll = ScrollLock::new();
        let mut confirm = ConfirmationModal::new("Delete Car", "Sure?", &scroll);

        confirm.open(3_i64);
        assert!(confirm.handle(ModalEvent::KeyDown(Key::Escape)));
        assert_eq!(confirm.pending(), None);
        assert_eq!(confirm.confirm(), None);
    }

    #[test]
    fn test_default_labels() {
        let scroll = ScrollLock::new();
        let confirm: ConfirmationModal<()> = ConfirmationModal::new("Title", "Message", &scroll);
        assert_eq!(confirm.confirm_label(), "Yes");
        assert_eq!(confirm.cancel_label(), "Cancel");
        assert_eq!(confirm.title(), "Title");
        assert_eq!(confirm.message(), "Message");
    }
}
