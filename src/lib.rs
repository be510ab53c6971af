//! AutoKeep — seguimiento de mantenimiento de vehículos
//!
//! Cliente de un backend tabular alojado: vehículos, reglas de mantenimiento
//! por distancia y/o tiempo, registros de eventos completados y el evaluador
//! que decide qué regla está al día, próxima a vencer o vencida.

pub mod cli;
pub mod client;
pub mod config;
pub mod controllers;
pub mod data;
pub mod models;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;
