//! Servicios de la aplicación
//!
//! El evaluador de estado (cómputo puro), la sesión contra el servicio de
//! auth delegado y el aviso diario de kilometraje del dispositivo.

pub mod auth_service;
pub mod maintenance_status_service;
pub mod prompt_service;
