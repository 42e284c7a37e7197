//! Controlador de la lista de coches
//!
//! Carga todos los coches de un código Neptun, gestiona el borrado con
//! confirmación y aloja en modales el detalle y el formulario.

use std::sync::Arc;

use tracing::{info, warn};

use crate::components::modal::{ConfirmationModal, Modal, ModalEvent, ScrollLock};
use crate::controllers::car_detail_controller::{CarDetailController, DetailExit};
use crate::controllers::car_form_controller::{
    CarFormController, FormExit, Presentation, SubmitOutcome,
};
use crate::models::car::Car;
use crate::models::scope::ScopeKey;
use crate::services::car_service::CarService;

pub const EMPTY_LIST_MESSAGE: &str = "No cars found.";

/// Lo que se debe mostrar ahora mismo
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListView<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    Rows(&'a [Car]),
}

/// Modales que aloja la lista
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    View,
    Edit,
    Create,
}

pub struct CarListController {
    service: Arc<dyn CarService>,
    scope: ScopeKey,
    scroll: ScrollLock,
    cars: Vec<Car>,
    loading: bool,
    error: Option<String>,
    view_modal: Modal,
    edit_modal: Modal,
    create_modal: Modal,
    delete_confirm: ConfirmationModal<i64>,
    selected_id: Option<i64>,
    detail: Option<CarDetailController>,
    edit_form: Option<CarFormController>,
    create_form: Option<CarFormController>,
}

impl CarListController {
    pub fn new(service: Arc<dyn CarService>, scope: ScopeKey, scroll: &ScrollLock) -> Self {
        let delete_confirm = ConfirmationModal::new(
            "Delete Car",
            "Are you sure you want to delete this car? This action cannot be undone.",
            scroll,
        )
        .with_confirm_label("Delete");

        Self {
            service,
            scope,
            scroll: scroll.clone(),
            cars: Vec::new(),
            loading: true,
            error: None,
            view_modal: Modal::new("Car Details", scroll),
            edit_modal: Modal::new("Edit Car", scroll),
            create_modal: Modal::new("Add New Car", scroll),
            delete_confirm,
            selected_id: None,
            detail: None,
            edit_form: None,
            create_form: None,
        }
    }

    pub fn scope(&self) -> &ScopeKey {
        &self.scope
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected_id
    }

    pub fn view(&self) -> ListView<'_> {
        if self.loading {
            ListView::Loading
        } else if let Some(error) = &self.error {
            ListView::Failed(error)
        } else if self.cars.is_empty() {
            ListView::Empty
        } else {
            ListView::Rows(&self.cars)
        }
    }

    /// Cargar la lista completa
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        match self.service.list_all(&self.scope).await {
            Ok(cars) => {
                info!("📋 {} coches cargados para {}", cars.len(), self.scope);
                self.cars = cars;
            }
            Err(e) => {
                self.error = Some(e.message());
            }
        }
        self.loading = false;
    }

    /// Cambiar de código Neptun; solo recarga si cambió
    pub async fn set_scope(&mut self, scope: ScopeKey) {
        if scope == self.scope {
            return;
        }
        self.scope = scope;
        self.close_all_overlays();
        self.load().await;
    }

    /// Recargar tras un guardado o borrado en un modal.
    /// Si falla, se conservan las filas actuales.
    pub async fn refresh(&mut self) {
        match self.service.list_all(&self.scope).await {
            Ok(cars) => self.cars = cars,
            Err(e) => warn!("⚠️ No se pudo refrescar la lista: {}", e),
        }
    }

    // --- borrado ---

    pub fn delete_confirm(&self) -> &ConfirmationModal<i64> {
        &self.delete_confirm
    }

    pub fn request_delete(&mut self, id: i64) {
        self.delete_confirm.open(id);
    }

    pub fn decline_delete(&mut self) {
        self.delete_confirm.cancel();
    }

    pub fn handle_delete_event(&mut self, event: ModalEvent) -> bool {
        self.delete_confirm.handle(event)
    }

    /// Borrar el coche confirmado y quitarlo de la lista sin recargar
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.delete_confirm.confirm() else {
            return false;
        };

        match self.service.delete_by_id(&self.scope, id).await {
            Ok(()) => {
                self.cars.retain(|car| car.id != id);
                info!("🗑️ Coche {} borrado", id);
                true
            }
            Err(e) => {
                self.error = Some(e.message());
                false
            }
        }
    }

    // --- modales ---

    pub fn is_open(&self, overlay: Overlay) -> bool {
        self.modal(overlay).is_open()
    }

    pub fn modal(&self, overlay: Overlay) -> &Modal {
        match overlay {
            Overlay::View => &self.view_modal,
            Overlay::Edit => &self.edit_modal,
            Overlay::Create => &self.create_modal,
        }
    }

    fn modal_mut(&mut self, overlay: Overlay) -> &mut Modal {
        match overlay {
            Overlay::View => &mut self.view_modal,
            Overlay::Edit => &mut self.edit_modal,
            Overlay::Create => &mut self.create_modal,
        }
    }

    pub async fn open_view(&mut self, id: i64) {
        self.selected_id = Some(id);
        self.view_modal.open();

        let mut detail = CarDetailController::new(
            Arc::clone(&self.service),
            self.scope.clone(),
            id.to_string(),
            Presentation::Overlay,
            &self.scroll,
        );
        detail.load().await;
        self.detail = Some(detail);
    }

    pub async fn open_edit(&mut self, id: i64) {
        self.selected_id = Some(id);
        self.edit_modal.open();

        let mut form = CarFormController::edit(
            Arc::clone(&self.service),
            self.scope.clone(),
            id.to_string(),
            Presentation::Overlay,
        );
        form.load().await;
        self.edit_form = Some(form);
    }

    pub fn open_create(&mut self) {
        self.create_modal.open();
        self.create_form = Some(CarFormController::create(
            Arc::clone(&self.service),
            self.scope.clone(),
            Presentation::Overlay,
        ));
    }

    /// Evento sobre un modal; cerrarlo no recarga la lista
    pub fn handle_overlay_event(&mut self, overlay: Overlay, event: ModalEvent) -> bool {
        let closed = self.modal_mut(overlay).handle(event);
        if closed {
            self.drop_hosted(overlay);
        }
        closed
    }

    pub fn close_overlay(&mut self, overlay: Overlay) {
        self.modal_mut(overlay).close();
        self.drop_hosted(overlay);
    }

    fn close_all_overlays(&mut self) {
        for overlay in [Overlay::View, Overlay::Edit, Overlay::Create] {
            self.close_overlay(overlay);
        }
        self.delete_confirm.cancel();
    }

    fn drop_hosted(&mut self, overlay: Overlay) {
        match overlay {
            Overlay::View => self.detail = None,
            Overlay::Edit => self.edit_form = None,
            Overlay::Create => self.create_form = None,
        }
    }

    pub fn detail(&self) -> Option<&CarDetailController> {
        self.detail.as_ref()
    }

    pub fn detail_mut(&mut self) -> Option<&mut CarDetailController> {
        self.detail.as_mut()
    }

    pub fn form(&self, overlay: Overlay) -> Option<&CarFormController> {
        match overlay {
            Overlay::Edit => self.edit_form.as_ref(),
            Overlay::Create => self.create_form.as_ref(),
            Overlay::View => None,
        }
    }

    pub fn form_mut(&mut self, overlay: Overlay) -> Option<&mut CarFormController> {
        match overlay {
            Overlay::Edit => self.edit_form.as_mut(),
            Overlay::Create => self.create_form.as_mut(),
            Overlay::View => None,
        }
    }

    /// Enviar el formulario de un modal; si se guarda, recarga y cierra
    pub async fn submit_form(&mut self, overlay: Overlay) -> Option<SubmitOutcome> {
        let outcome = self.form_mut(overlay)?.submit().await;
        if let SubmitOutcome::Saved { exit, .. } = &outcome {
            self.on_form_exit(exit.clone()).await;
        }
        Some(outcome)
    }

    /// Cancelar el formulario de un modal
    pub async fn cancel_form(&mut self, overlay: Overlay) {
        let form = match overlay {
            Overlay::Edit => self.edit_form.take(),
            Overlay::Create => self.create_form.take(),
            Overlay::View => None,
        };
        if let Some(form) = form {
            self.on_form_exit(form.cancel()).await;
        }
    }

    async fn on_form_exit(&mut self, exit: FormExit) {
        if exit != FormExit::Completed {
            return;
        }
        self.refresh().await;
        self.close_overlay(Overlay::Edit);
        self.close_overlay(Overlay::Create);
    }

    /// Confirmar el borrado pedido desde el detalle del modal
    pub async fn confirm_detail_delete(&mut self) -> Option<DetailExit> {
        let exit = self.detail.as_mut()?.confirm_delete().await?;
        if exit == DetailExit::Deleted {
            self.refresh().await;
            self.close_overlay(Overlay::View);
        }
        Some(exit)
    }
}
