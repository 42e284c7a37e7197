//! Controlador del detalle de un coche

use std::sync::Arc;

use tracing::info;

use crate::components::modal::{ConfirmationModal, ModalEvent, ScrollLock};
use crate::controllers::car_form_controller::Presentation;
use crate::models::car::Car;
use crate::models::scope::ScopeKey;
use crate::navigation::Route;
use crate::services::car_service::CarService;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Failed(String),
    /// El servidor respondió sin coche
    NotFound,
    Loaded(Car),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailExit {
    /// Borrado dentro de un modal: el anfitrión refresca y cierra
    Deleted,
    Navigate(Route),
}

pub struct CarDetailController {
    service: Arc<dyn CarService>,
    scope: ScopeKey,
    car_id: String,
    presentation: Presentation,
    state: DetailState,
    delete_confirm: ConfirmationModal<i64>,
}

impl CarDetailController {
    pub fn new(
        service: Arc<dyn CarService>,
        scope: ScopeKey,
        car_id: impl Into<String>,
        presentation: Presentation,
        scroll: &ScrollLock,
    ) -> Self {
        let delete_confirm = ConfirmationModal::new("Delete Car", "", scroll)
            .with_confirm_label("Yes, Delete")
            .with_cancel_label("Cancel");

        Self {
            service,
            scope,
            car_id: car_id.into(),
            presentation,
            state: DetailState::Loading,
            delete_confirm,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn car(&self) -> Option<&Car> {
        match &self.state {
            DetailState::Loaded(car) => Some(car),
            _ => None,
        }
    }

    /// "{marca} {modelo}" una vez cargado
    pub fn heading(&self) -> Option<String> {
        self.car().map(|car| format!("{} {}", car.brand, car.model))
    }

    pub fn delete_confirm(&self) -> &ConfirmationModal<i64> {
        &self.delete_confirm
    }

    pub async fn load(&mut self) {
        self.state = DetailState::Loading;

        let id = match self.car_id.trim().parse::<i64>() {
            Ok(id) => id,
            Err(_) => {
                self.state = DetailState::Failed(format!("Invalid car id: {}", self.car_id));
                return;
            }
        };

        self.state = match self.service.get_by_id(&self.scope, id).await {
            Ok(Some(car)) => DetailState::Loaded(car),
            Ok(None) => DetailState::NotFound,
            Err(e) => DetailState::Failed(e.message()),
        };
    }

    /// Pedir confirmación de borrado; solo con un coche cargado
    pub fn request_delete(&mut self) -> bool {
        let Some(car) = self.car() else {
            return false;
        };

        let message = format!(
            "Are you sure you want to delete the {} {}? This action cannot be undone.",
            car.brand, car.model
        );
        let id = car.id;
        self.delete_confirm.set_message(message);
        self.delete_confirm.open(id);
        true
    }

    pub fn decline_delete(&mut self) {
        self.delete_confirm.cancel();
    }

    pub fn handle_confirm_event(&mut self, event: ModalEvent) -> bool {
        self.delete_confirm.handle(event)
    }

    /// Ejecutar el borrado confirmado
    pub async fn confirm_delete(&mut self) -> Option<DetailExit> {
        let id = self.delete_confirm.confirm()?;

        match self.service.delete_by_id(&self.scope, id).await {
            Ok(()) => {
                info!("🗑️ Coche {} borrado desde el detalle", id);
                Some(match self.presentation {
                    Presentation::Overlay => DetailExit::Deleted,
                    Presentation::Page => DetailExit::Navigate(Route::home(self.scope.clone())),
                })
            }
            Err(e) => {
                self.state = DetailState::Failed(e.message());
                None
            }
        }
    }

    /// Botón "Back to List" de la página de detalle
    pub fn back_to_list(&self) -> DetailExit {
        DetailExit::Navigate(Route::home(self.scope.clone()))
    }
}
