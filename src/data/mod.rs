//! Catálogos estáticos de la aplicación

pub mod car_models;
pub mod presets;
