//! Controladores de las pantallas
//!
//! Cada controlador guarda el estado de una vista y habla con el servicio
//! de coches a través de `CarService`.

pub mod car_detail_controller;
pub mod car_form_controller;
pub mod car_list_controller;
pub mod scope_controller;
