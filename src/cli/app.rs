//! Menú interactivo
//!
//! Recorre las pantallas de la aplicación: entrada del código Neptun, lista
//! con sus modales y la página independiente de edición.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use colored::*;
use tracing::info;

use car_registry::components::modal::{Key, ModalEvent, ScrollLock};
use car_registry::controllers::car_detail_controller::DetailExit;
use car_registry::controllers::car_form_controller::{
    CarFormController, EditPage, FieldChange, FormExit, SubmitOutcome, MISSING_SCOPE_MESSAGE,
};
use car_registry::controllers::car_list_controller::{CarListController, Overlay};
use car_registry::controllers::scope_controller::{ScopeEntry, ENTER_SCOPE_PROMPT};
use car_registry::navigation::{History, Route};
use car_registry::services::car_service::CarService;

use super::prompt::{parse_confirm_answer, ConfirmAnswer, Prompt};
use super::render::{render_brands, render_confirm, render_detail, render_form, render_list};

pub struct App<R, W> {
    service: Arc<dyn CarService>,
    history: History,
    scroll: ScrollLock,
    entry: ScopeEntry,
    list: Option<CarListController>,
    prompt: Prompt<R, W>,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(service: Arc<dyn CarService>, start: Route, prompt: Prompt<R, W>) -> Self {
        Self {
            service,
            entry: ScopeEntry::from_route(&start),
            history: History::new(start),
            scroll: ScrollLock::new(),
            list: None,
            prompt,
        }
    }

    /// Ejecutar hasta que el usuario salga o se cierre la entrada
    pub async fn run(&mut self) -> Result<()> {
        match self.run_screens().await {
            Err(e)
                if e
                    .downcast_ref::<io::Error>()
                    .is_some_and(|io| io.kind() == io::ErrorKind::UnexpectedEof) =>
            {
                info!("👋 Entrada cerrada");
                Ok(())
            }
            other => other,
        }
    }

    async fn run_screens(&mut self) -> Result<()> {
        loop {
            let route = self.history.current().clone();
            let keep_going = match route {
                Route::EditCar { .. } => self.edit_page(&route).await?,
                Route::Home { .. } => self.home().await?,
            };
            if !keep_going {
                self.prompt.say("👋 Bye!".bright_green())?;
                return Ok(());
            }
        }
    }

    /// Página `/cars/edit/{id}`
    async fn edit_page(&mut self, route: &Route) -> Result<bool> {
        self.prompt.say(format!("🧭 {}", route.to_path()).dimmed())?;

        match EditPage::from_route(route, Arc::clone(&self.service)) {
            Some(EditPage::Form(mut form)) => {
                form.load().await;
                if let FormExit::Navigate(next) = run_form(&mut self.prompt, form).await? {
                    self.entry = ScopeEntry::from_route(&next);
                    self.history.push(next);
                }
            }
            Some(EditPage::MissingScope) | None => {
                self.prompt.say(MISSING_SCOPE_MESSAGE.bright_red())?;
                self.prompt.say("Go to Home Page")?;
                self.history.push(Route::Home { scope: None });
            }
        }
        Ok(true)
    }

    /// Pantalla principal: código Neptun + lista
    async fn home(&mut self) -> Result<bool> {
        let Some(scope) = self.entry.submitted().cloned() else {
            self.prompt.say(ENTER_SCOPE_PROMPT)?;
            let code = self.prompt.ask("Enter Neptun code (e.g., ABC123): ")?;
            self.entry.set_input(code);
            if let Err(e) = self.entry.submit(&mut self.history) {
                self.prompt.say(e.to_string().bright_red())?;
            }
            return Ok(true);
        };

        match self.list.as_mut() {
            Some(list) => list.set_scope(scope).await,
            None => {
                let mut list = CarListController::new(Arc::clone(&self.service), scope, &self.scroll);
                list.load().await;
                self.list = Some(list);
            }
        }

        self.list_menu().await
    }

    async fn list_menu(&mut self) -> Result<bool> {
        let Some(list) = self.list.as_mut() else {
            return Ok(true);
        };
        let prompt = &mut self.prompt;

        loop {
            prompt.say("")?;
            prompt.say(render_list(list.scope(), list.view()))?;
            prompt.say("1. 🔍 View car   2. ➕ Add New Car   3. ✏️  Edit car   4. 🗑️  Delete car")?;
            prompt.say("5. 🔄 Reload     6. 🔑 Change Neptun code             7. 🚪 Exit")?;

            match prompt.ask("Select an option (1-7): ")?.trim() {
                "1" => {
                    if let Some(id) = ask_id(prompt)? {
                        view_overlay(prompt, list, id).await?;
                    }
                }
                "2" => {
                    list.open_create();
                    form_overlay(prompt, list, Overlay::Create).await?;
                }
                "3" => {
                    if let Some(id) = ask_id(prompt)? {
                        list.open_edit(id).await;
                        form_overlay(prompt, list, Overlay::Edit).await?;
                    }
                }
                "4" => {
                    if let Some(id) = ask_id(prompt)? {
                        list.request_delete(id);
                        prompt.say(render_confirm(list.delete_confirm()))?;
                        match parse_confirm_answer(&prompt.ask("")?) {
                            ConfirmAnswer::Confirm => {
                                list.confirm_delete().await;
                            }
                            ConfirmAnswer::Cancel => list.decline_delete(),
                            ConfirmAnswer::Event(event) => {
                                list.handle_delete_event(event);
                            }
                        }
                    }
                }
                "5" => list.load().await,
                "6" => {
                    let code = prompt.ask_with_default("Neptun code", list.scope().as_str())?;
                    self.entry.set_input(code);
                    match self.entry.submit(&mut self.history) {
                        Ok(_) => return Ok(true),
                        Err(e) => prompt.say(e.to_string().bright_red())?,
                    }
                }
                "7" => return Ok(false),
                _ => prompt.say("❌ Invalid option. Try again.".bright_red())?,
            }
        }
    }
}

fn ask_id<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> io::Result<Option<i64>> {
    let raw = prompt.ask("Car ID: ")?;
    match raw.trim().parse::<i64>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            prompt.say(format!("❌ Invalid car id: {}", raw).bright_red())?;
            Ok(None)
        }
    }
}

/// Modal de detalle dentro de la lista
async fn view_overlay<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    list: &mut CarListController,
    id: i64,
) -> Result<()> {
    list.open_view(id).await;

    while list.is_open(Overlay::View) {
        let title = list.modal(Overlay::View).title().to_string();
        let Some(detail) = list.detail_mut() else {
            break;
        };
        prompt.say(format!("── {} ──", title).bright_blue())?;
        prompt.say(render_detail(detail))?;

        let answer = prompt.ask("[d] Delete / [esc] Close: ")?;
        if answer.trim() != "d" {
            list.handle_overlay_event(Overlay::View, ModalEvent::KeyDown(Key::Escape));
            continue;
        }
        if !detail.request_delete() {
            continue;
        }
        prompt.say(render_confirm(detail.delete_confirm()))?;
        match parse_confirm_answer(&prompt.ask("")?) {
            ConfirmAnswer::Confirm => {
                if let Some(DetailExit::Deleted) = list.confirm_detail_delete().await {
                    prompt.say("🗑️  Car deleted".bright_green())?;
                }
            }
            ConfirmAnswer::Cancel => detail.decline_delete(),
            ConfirmAnswer::Event(event) => {
                detail.handle_confirm_event(event);
            }
        }
    }
    Ok(())
}

/// Modal de formulario (crear o editar) dentro de la lista
async fn form_overlay<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    list: &mut CarListController,
    overlay: Overlay,
) -> Result<()> {
    while list.is_open(overlay) {
        let Some(form) = list.form_mut(overlay) else {
            break;
        };
        prompt.say(format!("── {} ──", form.title()).bright_blue())?;
        edit_fields(prompt, form)?;
        prompt.say(render_form(form))?;

        let label = format!("[s] {} / [c] Cancel / [esc] Close / [enter] Keep editing: ", form.submit_label());
        match prompt.ask(&label)?.trim() {
            "s" => {
                if let Some(outcome) = list.submit_form(overlay).await {
                    report_outcome(prompt, &outcome)?;
                }
            }
            "c" => list.cancel_form(overlay).await,
            "esc" => {
                list.handle_overlay_event(overlay, ModalEvent::KeyDown(Key::Escape));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Formulario en página propia hasta que se guarda o se cancela
async fn run_form<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    mut form: CarFormController,
) -> Result<FormExit> {
    prompt.say(format!("── {} ──", form.title()).bright_blue())?;
    loop {
        edit_fields(prompt, &mut form)?;
        prompt.say(render_form(&form))?;

        let label = format!("[s] {} / [c] Cancel / [enter] Keep editing: ", form.submit_label());
        match prompt.ask(&label)?.trim() {
            "s" => {
                let outcome = form.submit().await;
                report_outcome(prompt, &outcome)?;
                if let SubmitOutcome::Saved { exit, .. } = outcome {
                    return Ok(exit);
                }
            }
            "c" => return Ok(form.cancel()),
            _ => {}
        }
    }
}

fn report_outcome<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>, outcome: &SubmitOutcome) -> io::Result<()> {
    match outcome {
        SubmitOutcome::Saved { car, .. } => prompt.say(format!("✅ Saved car {}", car.id).bright_green()),
        SubmitOutcome::Failed(message) => prompt.say(format!("❌ {}", message).bright_red()),
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in errors.iter() {
                prompt.say(format!("  {}: {}", field.label(), message).bright_red())?;
            }
            Ok(())
        }
        SubmitOutcome::NotReady => prompt.say("⏳ Loading..."),
    }
}

/// Pedir cada campo; una línea vacía conserva el valor
fn edit_fields<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>, form: &mut CarFormController) -> io::Result<()> {
    if let Some(error) = form.error() {
        prompt.say(format!("❌ {}", error).bright_red())?;
    }
    prompt.say(format!("Brands: {}", render_brands()).dimmed())?;

    let draft = form.draft().clone();
    let brand = prompt.ask_with_default("Brand", &draft.brand)?;
    form.change(FieldChange::Brand(brand));

    let model = prompt.ask_with_default("Model", &draft.model)?;
    form.change(FieldChange::Model(model));

    let electric = prompt.ask_yes_no("Electric Car (y/n)", draft.electric)?;
    form.change(FieldChange::Electric(electric));

    if !electric {
        let current = form.draft().fuel_use.map(|v| v.to_string()).unwrap_or_default();
        let fuel_use = prompt.ask_with_default("Fuel Use (L/100km)", &current)?;
        form.change(FieldChange::FuelUse(fuel_use));
    }

    let owner = prompt.ask_with_default("Owner", &draft.owner)?;
    form.change(FieldChange::Owner(owner));

    let day = prompt.ask_with_default("Commission Date (YYYY-MM-DD)", &draft.day_of_commission)?;
    form.change(FieldChange::DayOfCommission(day));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use car_registry::controllers::car_form_controller::Presentation;
    use car_registry::models::car::{Car, NewCar};
    use car_registry::models::scope::ScopeKey;
    use car_registry::utils::errors::ApiResult;

    /// Servicio vacío que acepta cualquier escritura
    struct NoCars;

    #[async_trait]
    impl CarService for NoCars {
        async fn list_all(&self, _scope: &ScopeKey) -> ApiResult<Vec<Car>> {
            Ok(Vec::new())
        }

        async fn get_by_id(&self, _scope: &ScopeKey, _id: i64) -> ApiResult<Option<Car>> {
            Ok(None)
        }

        async fn create(&self, _scope: &ScopeKey, car: &NewCar) -> ApiResult<Car> {
            Ok(car.clone().with_id(1))
        }

        async fn update(&self, _scope: &ScopeKey, car: &Car) -> ApiResult<Car> {
            Ok(car.clone())
        }

        async fn delete_by_id(&self, _scope: &ScopeKey, _id: i64) -> ApiResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_page_form_cancel_returns_to_list() {
        let scope = ScopeKey::new("ABC123").unwrap();
        let form = CarFormController::create(Arc::new(NoCars), scope.clone(), Presentation::Page);

        // brand, model, electric, fuel use, owner, date, then cancel
        let input = "Tesla\n\n\n\n\n\nc\n";
        let mut prompt = Prompt::new(input.as_bytes(), Vec::new());

        let exit = run_form(&mut prompt, form).await.unwrap();
        assert_eq!(exit, FormExit::Navigate(Route::home(scope)));
    }
}
