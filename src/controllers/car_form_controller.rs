//! Controlador del formulario de coches
//!
//! Orquesta la carga para edición, los cambios de campo, la validación
//! previa al envío y el envío (crear o actualizar).

use std::sync::Arc;

use tracing::{info, warn};

use crate::models::car::{Car, CarDraft, CarField};
use crate::models::scope::ScopeKey;
use crate::navigation::Route;
use crate::services::car_service::CarService;
use crate::utils::validation::{validate_car, FieldErrors};

/// Dónde se muestra el componente
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Página propia: al terminar se navega a la lista
    Page,
    /// Dentro de un modal: al terminar se avisa al anfitrión
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Loading,
    Ready,
    Submitting,
}

/// Cambio de un único campo del formulario
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Brand(String),
    Model(String),
    /// Texto tal cual lo escribió el usuario
    FuelUse(String),
    Owner(String),
    Electric(bool),
    DayOfCommission(String),
}

/// Salida del formulario (guardado o cancelado)
#[derive(Debug, Clone, PartialEq)]
pub enum FormExit {
    Navigate(Route),
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validación fallida; no hubo llamada de red
    Invalid(FieldErrors),
    /// El servidor o la red fallaron; el usuario sigue en el formulario
    Failed(String),
    Saved { car: Car, exit: FormExit },
    /// Todavía cargando el coche a editar
    NotReady,
}

pub struct CarFormController {
    service: Arc<dyn CarService>,
    scope: ScopeKey,
    car_id: Option<String>,
    presentation: Presentation,
    draft: CarDraft,
    phase: FormPhase,
    error: Option<String>,
    field_errors: FieldErrors,
    attempted: bool,
    focus: Option<CarField>,
}

impl CarFormController {
    pub fn new(
        service: Arc<dyn CarService>,
        scope: ScopeKey,
        car_id: Option<String>,
        presentation: Presentation,
    ) -> Self {
        let phase = if car_id.is_some() {
            FormPhase::Loading
        } else {
            FormPhase::Ready
        };

        Self {
            service,
            scope,
            car_id,
            presentation,
            draft: CarDraft::default(),
            phase,
            error: None,
            field_errors: FieldErrors::new(),
            attempted: false,
            focus: None,
        }
    }

    pub fn create(service: Arc<dyn CarService>, scope: ScopeKey, presentation: Presentation) -> Self {
        Self::new(service, scope, None, presentation)
    }

    pub fn edit(
        service: Arc<dyn CarService>,
        scope: ScopeKey,
        car_id: impl Into<String>,
        presentation: Presentation,
    ) -> Self {
        Self::new(service, scope, Some(car_id.into()), presentation)
    }

    pub fn is_edit_mode(&self) -> bool {
        self.car_id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit_mode() {
            "Edit Car"
        } else {
            "Add New Car"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.phase, self.is_edit_mode()) {
            (FormPhase::Submitting, _) => "Saving...",
            (_, true) => "Update Car",
            (_, false) => "Add Car",
        }
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub fn scope(&self) -> &ScopeKey {
        &self.scope
    }

    pub fn draft(&self) -> &CarDraft {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Error general (carga o guardado)
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Errores por campo visibles ahora mismo
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn attempted(&self) -> bool {
        self.attempted
    }

    /// Campo que debe recibir el foco tras un envío fallido
    pub fn focus(&self) -> Option<CarField> {
        self.focus
    }

    /// Cargar el coche en modo edición; en modo creación no hace nada
    pub async fn load(&mut self) {
        let Some(raw_id) = self.car_id.clone() else {
            self.phase = FormPhase::Ready;
            return;
        };

        self.phase = FormPhase::Loading;
        match parse_car_id(&raw_id) {
            Ok(id) => match self.service.get_by_id(&self.scope, id).await {
                Ok(Some(car)) => {
                    self.draft = CarDraft::from(car);
                }
                Ok(None) => {
                    warn!("⚠️ Coche {} no encontrado para editar", id);
                    self.error = Some("Car not found".to_string());
                }
                Err(e) => {
                    self.error = Some(e.message());
                }
            },
            Err(message) => {
                self.error = Some(message);
            }
        }
        self.phase = FormPhase::Ready;
    }

    /// Aplicar un cambio de campo
    pub fn change(&mut self, change: FieldChange) {
        match change {
            FieldChange::Brand(value) => self.draft.brand = value,
            FieldChange::Model(value) => self.draft.model = value,
            FieldChange::FuelUse(raw) => {
                // El campo está deshabilitado para coches eléctricos
                if !self.draft.electric {
                    self.draft.fuel_use = parse_fuel_use(&raw);
                }
            }
            FieldChange::Owner(value) => self.draft.owner = value,
            FieldChange::Electric(electric) => {
                self.draft.electric = electric;
                if electric {
                    self.draft.fuel_use = Some(0.0);
                }
            }
            FieldChange::DayOfCommission(value) => self.draft.day_of_commission = value,
        }

        if self.attempted {
            self.field_errors = validate_car(&self.draft);
        }
    }

    /// Validar y, si todo es correcto, crear o actualizar
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.phase != FormPhase::Ready {
            return SubmitOutcome::NotReady;
        }

        self.attempted = true;
        self.field_errors = validate_car(&self.draft);
        if !self.field_errors.is_valid() {
            self.focus = self
                .draft
                .brand
                .is_empty()
                .then_some(CarField::Brand);
            return SubmitOutcome::Invalid(self.field_errors.clone());
        }
        self.focus = None;

        let id = match self.car_id.as_deref().map(parse_car_id).transpose() {
            Ok(id) => id,
            Err(message) => {
                self.error = Some(message.clone());
                return SubmitOutcome::Failed(message);
            }
        };

        self.phase = FormPhase::Submitting;
        self.error = None;

        let result = match id {
            Some(id) => self.service.update(&self.scope, &self.draft.to_car(id)).await,
            None => self.service.create(&self.scope, &self.draft.to_new_car()).await,
        };
        self.phase = FormPhase::Ready;

        match result {
            Ok(car) => {
                info!("✅ Coche {} guardado para {}", car.id, self.scope);
                SubmitOutcome::Saved {
                    car,
                    exit: self.exit(),
                }
            }
            Err(e) => {
                let message = e.message();
                self.error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Cancelar: se descartan los cambios sin guardar nada
    pub fn cancel(self) -> FormExit {
        self.exit()
    }

    fn exit(&self) -> FormExit {
        match self.presentation {
            Presentation::Page => FormExit::Navigate(Route::home(self.scope.clone())),
            Presentation::Overlay => FormExit::Completed,
        }
    }
}

fn parse_car_id(raw: &str) -> Result<i64, String> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| format!("Invalid car id: {}", raw))
}

fn parse_fuel_use(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Mensaje de la página de edición sin código Neptun
pub const MISSING_SCOPE_MESSAGE: &str = "Neptun code is missing";

/// Página independiente de edición (`/cars/edit/{id}?neptun=...`)
pub enum EditPage {
    MissingScope,
    Form(CarFormController),
}

impl EditPage {
    /// `None` si la dirección no es la de edición
    pub fn from_route(route: &Route, service: Arc<dyn CarService>) -> Option<Self> {
        let Route::EditCar { id, scope } = route else {
            return None;
        };

        Some(match scope {
            Some(scope) => EditPage::Form(CarFormController::edit(
                service,
                scope.clone(),
                id.clone(),
                Presentation::Page,
            )),
            None => EditPage::MissingScope,
        })
    }
}
