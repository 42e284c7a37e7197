//! Presentación en terminal de las vistas

use std::fmt::Write;

use colored::*;

use car_registry::components::modal::ConfirmationModal;
use car_registry::controllers::car_detail_controller::{CarDetailController, DetailState};
use car_registry::controllers::car_form_controller::CarFormController;
use car_registry::controllers::car_list_controller::{ListView, EMPTY_LIST_MESSAGE};
use car_registry::models::car::{CarField, VALID_BRANDS};
use car_registry::models::scope::ScopeKey;

pub fn render_list(scope: &ScopeKey, view: ListView<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("🚗 Car List ({})", scope).bright_green().bold());
    let _ = writeln!(out, "{}", "==================".bright_green());

    match view {
        ListView::Loading => {
            let _ = writeln!(out, "Loading cars...");
        }
        ListView::Failed(error) => {
            let _ = writeln!(out, "{}", format!("❌ Error: {}", error).bright_red());
        }
        ListView::Empty => {
            let _ = writeln!(out, "{}", EMPTY_LIST_MESSAGE.bright_yellow());
        }
        ListView::Rows(cars) => {
            let _ = writeln!(
                out,
                "{:<6} {:<14} {:<16} {:<22} {:<9} {}",
                "ID", "Brand", "Model", "Owner", "Fuel Use", "Electric"
            );
            for car in cars {
                let _ = writeln!(
                    out,
                    "{:<6} {:<14} {:<16} {:<22} {:<9} {}",
                    car.id,
                    car.brand,
                    car.model,
                    car.owner,
                    car.fuel_use,
                    if car.electric { "Yes" } else { "No" }
                );
            }
        }
    }
    out
}

pub fn render_detail(detail: &CarDetailController) -> String {
    let mut out = String::new();
    match detail.state() {
        DetailState::Loading => {
            let _ = writeln!(out, "Loading car details...");
        }
        DetailState::Failed(error) => {
            let _ = writeln!(out, "{}", format!("Error: {}", error).bright_red());
        }
        DetailState::NotFound => {
            let _ = writeln!(out, "Car not found");
        }
        DetailState::Loaded(car) => {
            let heading = format!("{} {}", car.brand, car.model);
            let _ = writeln!(out, "{}", heading.bright_cyan().bold());
            let _ = writeln!(out, "  ID:              {}", car.id);
            let _ = writeln!(out, "  Brand:           {}", car.brand);
            let _ = writeln!(out, "  Model:           {}", car.model);
            let _ = writeln!(out, "  Owner:           {}", car.owner);
            let _ = writeln!(out, "  Fuel Use:        {} L/100km", car.fuel_use);
            let kind = if car.electric {
                "⚡ Electric".green().to_string()
            } else {
                "Fuel-powered".to_string()
            };
            let _ = writeln!(out, "  Type:            {}", kind);
            let _ = writeln!(out, "  Commission Date: {}", car.day_of_commission);
        }
    }
    out
}

pub fn render_form(form: &CarFormController) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", form.title().bright_cyan().bold());

    if let Some(error) = form.error() {
        let _ = writeln!(out, "{}", format!("❌ {}", error).bright_red());
    }

    let draft = form.draft();
    let fuel_use = draft
        .fuel_use
        .map(|v| v.to_string())
        .unwrap_or_default();
    let fields = [
        (CarField::Brand, draft.brand.clone()),
        (CarField::Model, draft.model.clone()),
        (CarField::FuelUse, fuel_use),
        (CarField::Owner, draft.owner.clone()),
        (CarField::DayOfCommission, draft.day_of_commission.clone()),
    ];

    for (field, value) in fields {
        let mut line = format!("  {} *: {}", field.label(), value);
        if field == CarField::FuelUse && draft.electric {
            line.push_str(" (Must be 0 for electric cars)");
        }
        let _ = writeln!(out, "{}", line);
        if let Some(message) = form.field_errors().get(field) {
            let _ = writeln!(out, "    {}", message.bright_red());
        }
    }
    let _ = writeln!(
        out,
        "  Electric Car: {}",
        if draft.electric { "Yes" } else { "No" }
    );
    out
}

pub fn render_confirm<T>(modal: &ConfirmationModal<T>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", modal.title().bright_red().bold());
    let _ = writeln!(out, "{}", modal.message());
    let _ = write!(
        out,
        "[y] {} / [n] {} / [esc]: ",
        modal.confirm_label(),
        modal.cancel_label()
    );
    out
}

pub fn render_brands() -> String {
    VALID_BRANDS.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use car_registry::models::car::Car;

    #[test]
    fn test_empty_list_message() {
        let scope = ScopeKey::new("ABC123").unwrap();
        let out = render_list(&scope, ListView::Empty);
        assert!(out.contains("No cars found."));
    }

    #[test]
    fn test_list_rows() {
        let scope = ScopeKey::new("ABC123").unwrap();
        let cars = vec![Car {
            id: 9,
            brand: "Tesla".to_string(),
            model: "Model 3".to_string(),
            fuel_use: 0.0,
            owner: "Jane Doe".to_string(),
            day_of_commission: "2024-01-01".to_string(),
            electric: true,
        }];
        let out = render_list(&scope, ListView::Rows(&cars));
        assert!(out.contains("Model 3"));
        assert!(out.contains("Yes"));
    }

    #[test]
    fn test_error_state() {
        let scope = ScopeKey::new("ABC123").unwrap();
        let out = render_list(&scope, ListView::Failed("Failed to fetch cars"));
        assert!(out.contains("Failed to fetch cars"));
    }
}
