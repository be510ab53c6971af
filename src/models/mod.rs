//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! a las tablas del backend alojado, con la opcionalidad declarada por campo.

pub mod auth;
pub mod maintenance_log;
pub mod maintenance_rule;
pub mod vehicle;
