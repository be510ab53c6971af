//! Interfaz de línea de comandos
//!
//! Las pantallas de la aplicación: cada subcomando valida su entrada, llama al
//! controller correspondiente y presenta el resultado. Toda identidad sale de
//! la sesión persistida en el dispositivo.

use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::controllers::log_controller::LogController;
use crate::controllers::rule_controller::RuleController;
use crate::controllers::vehicle_controller::{VehicleController, VehicleDetail};
use crate::data::car_models::{models_for_make, CAR_BRANDS};
use crate::data::presets::MAINTENANCE_PRESETS;
use crate::models::maintenance_log::{CreateLogRequest, LogType, MaintenanceLog};
use crate::models::maintenance_rule::CreateRuleRequest;
use crate::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest, Vehicle};
use crate::services::maintenance_status_service::UrgencyStatus;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{validate_date, validate_non_negative, validate_not_empty, validate_uuid};

#[derive(Parser)]
#[command(name = "autokeep", version, about = "Seguimiento de mantenimiento de vehículos")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Crear una cuenta nueva
    Signup { email: String, password: String },
    /// Iniciar sesión
    Login { email: String, password: String },
    /// Cerrar la sesión del dispositivo
    Logout,
    /// Mostrar el usuario autenticado
    Whoami,
    /// Gestión de vehículos
    #[command(subcommand)]
    Vehicle(VehicleCommand),
    /// Reglas de mantenimiento de un vehículo
    #[command(subcommand)]
    Rule(RuleCommand),
    /// Registros de mantenimiento/reparación
    #[command(subcommand)]
    Log(LogCommand),
    /// Catálogo de marcas y modelos
    Brands {
        /// Limitar a una marca concreta
        make: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum VehicleCommand {
    /// Listar los vehículos del usuario
    List,
    /// Dar de alta un vehículo
    Add {
        /// Apodo del vehículo
        #[arg(long, value_parser = parse_nonempty)]
        name: String,
        #[arg(long, value_parser = parse_nonempty)]
        make: String,
        #[arg(long, value_parser = parse_nonempty)]
        model: String,
        /// Año de fabricación (por defecto, el actual)
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        license_plate: Option<String>,
        /// Odómetro actual en km
        #[arg(long, default_value_t = 0, value_parser = parse_non_negative)]
        mileage: i64,
        /// Km conducidos al día (por defecto 30)
        #[arg(long)]
        daily_avg: Option<f64>,
        /// No crear las reglas de mantenimiento por defecto
        #[arg(long)]
        no_presets: bool,
    },
    /// Ficha completa: reglas evaluadas y últimos registros
    Show {
        #[arg(value_parser = parse_uuid)]
        id: Uuid,
    },
    /// Editar campos de un vehículo
    Edit {
        #[arg(value_parser = parse_uuid)]
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        make: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        license_plate: Option<String>,
        #[arg(long, value_parser = parse_non_negative)]
        mileage: Option<i64>,
        #[arg(long)]
        daily_avg: Option<f64>,
    },
    /// Actualizar solo el odómetro
    Mileage {
        #[arg(value_parser = parse_uuid)]
        id: Uuid,
        #[arg(value_parser = parse_non_negative)]
        km: i64,
    },
    /// Borrar un vehículo (y, en cascada, sus reglas y registros)
    Delete {
        #[arg(value_parser = parse_uuid)]
        id: Uuid,
    },
}

#[derive(Subcommand)]
pub enum RuleCommand {
    /// Reglas de un vehículo, por nombre
    List {
        #[arg(value_parser = parse_uuid)]
        vehicle_id: Uuid,
    },
    /// Crear una regla (libre o desde plantilla)
    Add {
        #[arg(value_parser = parse_uuid)]
        vehicle_id: Uuid,
        /// Nombre de la regla (obligatorio sin --preset)
        #[arg(long)]
        name: Option<String>,
        /// Intervalo en km
        #[arg(long)]
        km: Option<i64>,
        /// Intervalo en meses
        #[arg(long)]
        months: Option<u32>,
        /// Nombre de una plantilla del catálogo
        #[arg(long, conflicts_with_all = ["name", "km", "months"])]
        preset: Option<String>,
    },
    /// Catálogo de plantillas disponibles
    Presets,
    /// Borrar una regla
    Delete {
        #[arg(value_parser = parse_uuid)]
        id: Uuid,
    },
}

#[derive(Subcommand)]
pub enum LogCommand {
    /// Registros de un vehículo, más recientes primero
    List {
        #[arg(value_parser = parse_uuid)]
        vehicle_id: Uuid,
    },
    /// Registrar un mantenimiento o reparación
    Add {
        #[arg(value_parser = parse_uuid)]
        vehicle_id: Uuid,
        /// Qué se hizo
        #[arg(long, value_parser = parse_nonempty)]
        name: String,
        /// maintenance | repair
        #[arg(long = "type", default_value = "maintenance")]
        log_type: LogType,
        /// Odómetro en el momento del trabajo
        #[arg(long, value_parser = parse_non_negative)]
        mileage: i64,
        #[arg(long)]
        cost: Option<Decimal>,
        #[arg(long)]
        notes: Option<String>,
        /// Fecha del trabajo, YYYY-MM-DD (por defecto hoy)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Regla que cumple este registro (solo mantenimiento)
        #[arg(long, value_parser = parse_uuid)]
        rule: Option<Uuid>,
    },
}

fn parse_uuid(value: &str) -> Result<Uuid, String> {
    validate_uuid(value).map_err(|_| format!("'{}' no es un UUID válido", value))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    validate_date(value).map_err(|_| format!("'{}' no es una fecha YYYY-MM-DD", value))
}

fn parse_nonempty(value: &str) -> Result<String, String> {
    validate_not_empty(value)
        .map(|_| value.to_string())
        .map_err(|_| "el valor no puede estar vacío".to_string())
}

fn parse_non_negative(value: &str) -> Result<i64, String> {
    let parsed: i64 = value
        .parse()
        .map_err(|_| format!("'{}' no es un número entero", value))?;
    validate_non_negative(parsed, "km")
        .map(|_| parsed)
        .map_err(|_| "el kilometraje no puede ser negativo".to_string())
}

/// Ejecutar el comando contra el estado de la aplicación
pub async fn run(command: Command, state: &AppState) -> Result<(), AppError> {
    match command {
        Command::Signup { email, password } => {
            state.auth.sign_up(&email, &password).await?;
            println!("✅ Cuenta creada. Revisa tu correo si el backend pide confirmación.");
        }
        Command::Login { email, password } => {
            let session = state.auth.sign_in(&email, &password).await?;
            println!("✅ Sesión iniciada como {}", session.user.email);
        }
        Command::Logout => {
            state.auth.sign_out().await?;
            println!("Sesión cerrada.");
        }
        Command::Whoami => {
            let session = state.auth.current_session().await?;
            println!("{} ({})", session.user.email, session.user.id);
        }
        Command::Vehicle(command) => run_vehicle(command, state).await?,
        Command::Rule(command) => run_rule(command, state).await?,
        Command::Log(command) => run_log(command, state).await?,
        Command::Brands { make } => render_brands(make.as_deref()),
    }
    Ok(())
}

async fn run_vehicle(command: VehicleCommand, state: &AppState) -> Result<(), AppError> {
    let controller = VehicleController::new(state.tables.clone());
    let session = state.auth.current_session().await?;
    let token = session.access_token.as_str();

    match command {
        VehicleCommand::List => {
            let vehicles = controller.list(token).await?;
            if vehicles.is_empty() {
                println!("Sin vehículos. Da de alta el primero con `autokeep vehicle add`.");
            }
            for vehicle in &vehicles {
                println!(
                    "🚗 {}  {} {} ({})  {} km  [{}]",
                    vehicle.name,
                    vehicle.make,
                    vehicle.model,
                    vehicle.year,
                    vehicle.current_mileage,
                    vehicle.id
                );
            }
            daily_mileage_reminder(state, vehicles.first());
        }
        VehicleCommand::Add {
            name,
            make,
            model,
            year,
            license_plate,
            mileage,
            daily_avg,
            no_presets,
        } => {
            let request = CreateVehicleRequest {
                name,
                make,
                model,
                year: year.unwrap_or_else(|| Local::now().year()),
                license_plate,
                current_mileage: mileage,
                daily_avg_km: daily_avg,
            };
            let vehicle = controller
                .create(token, session.user.id, request, !no_presets)
                .await?;
            println!("✅ Vehículo creado: {} [{}]", vehicle.name, vehicle.id);
            if !no_presets {
                println!("   Reglas de mantenimiento por defecto aplicadas.");
            }
        }
        VehicleCommand::Show { id } => {
            let today = Local::now().date_naive();
            let detail = controller.detail(token, id, today).await?;
            render_vehicle_detail(&detail);
        }
        VehicleCommand::Edit {
            id,
            name,
            make,
            model,
            year,
            license_plate,
            mileage,
            daily_avg,
        } => {
            let request = UpdateVehicleRequest {
                name,
                make,
                model,
                year,
                license_plate,
                current_mileage: mileage,
                daily_avg_km: daily_avg,
            };
            let vehicle = controller.update(token, id, request).await?;
            println!("✅ Vehículo actualizado: {}", vehicle.name);
        }
        VehicleCommand::Mileage { id, km } => {
            let vehicle = controller.update_mileage(token, id, km).await?;
            println!(
                "✅ Odómetro de '{}' actualizado a {} km",
                vehicle.name, vehicle.current_mileage
            );
        }
        VehicleCommand::Delete { id } => {
            controller.delete(token, id).await?;
            println!("Vehículo borrado (reglas y registros incluidos).");
        }
    }
    Ok(())
}

async fn run_rule(command: RuleCommand, state: &AppState) -> Result<(), AppError> {
    let controller = RuleController::new(state.tables.clone());

    // El catálogo es local: no requiere sesión
    if let RuleCommand::Presets = command {
        for preset in MAINTENANCE_PRESETS.iter() {
            println!(
                "• {}  {}",
                preset.name,
                format_interval(preset.interval_km, preset.interval_months)
            );
        }
        return Ok(());
    }

    let session = state.auth.current_session().await?;
    let token = session.access_token.as_str();

    match command {
        RuleCommand::List { vehicle_id } => {
            let rules = controller.list(token, vehicle_id).await?;
            if rules.is_empty() {
                println!("Sin reglas. Añade una con `autokeep rule add`.");
            }
            for rule in rules {
                println!(
                    "• {}  {}  [{}]",
                    rule.name,
                    format_interval(rule.interval_km, rule.interval_months),
                    rule.id
                );
            }
        }
        RuleCommand::Add {
            vehicle_id,
            name,
            km,
            months,
            preset,
        } => {
            let rule = match preset {
                Some(preset_name) => {
                    controller
                        .create_from_preset(token, vehicle_id, &preset_name)
                        .await?
                }
                None => {
                    let name = name.ok_or_else(|| {
                        AppError::BadRequest("indica --name o --preset".to_string())
                    })?;
                    let request = CreateRuleRequest {
                        vehicle_id,
                        name,
                        interval_km: km,
                        interval_months: months,
                    };
                    controller.create(token, request).await?
                }
            };
            println!("✅ Regla creada: {} [{}]", rule.name, rule.id);
        }
        RuleCommand::Delete { id } => {
            controller.delete(token, id).await?;
            println!("Regla borrada.");
        }
        RuleCommand::Presets => {}
    }
    Ok(())
}

async fn run_log(command: LogCommand, state: &AppState) -> Result<(), AppError> {
    let controller = LogController::new(state.tables.clone());
    let session = state.auth.current_session().await?;
    let token = session.access_token.as_str();

    match command {
        LogCommand::List { vehicle_id } => {
            let logs = controller.list(token, vehicle_id).await?;
            if logs.is_empty() {
                println!("Sin registros todavía.");
            }
            for log in logs {
                render_log_line(&log);
            }
        }
        LogCommand::Add {
            vehicle_id,
            name,
            log_type,
            mileage,
            cost,
            notes,
            date,
            rule,
        } => {
            let request = CreateLogRequest {
                vehicle_id,
                item_name: name,
                log_type,
                mileage,
                cost,
                notes,
                done_at: date.unwrap_or_else(|| Local::now().date_naive()),
            };
            let log = controller.record(token, request, rule).await?;
            println!("✅ Registro guardado: {} ({} km)", log.item_name, log.mileage);
        }
    }
    Ok(())
}

/// Aviso de odómetro, como mucho una vez por día de calendario. Se marca
/// también cuando no hay vehículo: el día queda igualmente consumido.
fn daily_mileage_reminder(state: &AppState, first_vehicle: Option<&Vehicle>) {
    let today = Local::now().date_naive();
    if !state.prompt.should_prompt(today) {
        return;
    }

    if let Some(vehicle) = first_vehicle {
        println!();
        println!(
            "💡 ¿Has conducido hoy? Actualiza el odómetro de '{}' (último: {} km):",
            vehicle.name, vehicle.current_mileage
        );
        println!("   autokeep vehicle mileage {} <km>", vehicle.id);
    }

    if let Err(e) = state.prompt.mark_prompted(today) {
        tracing::warn!("no se pudo guardar el marcador de aviso: {}", e);
    }
}

fn status_icon(status: UrgencyStatus) -> &'static str {
    match status {
        UrgencyStatus::Normal => "✅",
        UrgencyStatus::Warning => "⚠️",
        UrgencyStatus::Overdue => "🔴",
    }
}

fn format_interval(interval_km: Option<i64>, interval_months: Option<u32>) -> String {
    match (interval_km, interval_months) {
        (Some(km), Some(months)) => format!("cada {} km / {} meses", km, months),
        (Some(km), None) => format!("cada {} km", km),
        (None, Some(months)) => format!("cada {} meses", months),
        (None, None) => "sin intervalo".to_string(),
    }
}

fn render_vehicle_detail(detail: &VehicleDetail) {
    let vehicle = &detail.vehicle;
    println!(
        "🚗 {}  {} {} ({})",
        vehicle.name, vehicle.make, vehicle.model, vehicle.year
    );
    if let Some(plate) = &vehicle.license_plate {
        println!("   matrícula: {}", plate);
    }
    println!(
        "   odómetro: {} km  ·  ritmo: {} km/día",
        vehicle.current_mileage, vehicle.daily_avg_km
    );

    println!();
    println!("Mantenimiento ({} reglas):", detail.rules.len());
    for entry in &detail.rules {
        let status = &entry.status;
        println!(
            "  {} {}  [{}]",
            status_icon(status.status),
            entry.rule.name,
            status.status
        );

        let mut remaining = Vec::new();
        if let Some(km) = status.mileage.remaining {
            remaining.push(format!("{} km", km));
        }
        if let Some(days) = status.date.remaining_days {
            remaining.push(format!("{} días", days));
        }
        if !remaining.is_empty() {
            println!("     restante: {}", remaining.join(" / "));
        }
        if let Some(due) = status.mileage.due {
            println!("     vence a los {} km", due);
        }
        if let Some(due) = status.date.due {
            println!("     vence el {}", due);
        }
        if let Some(days) = status.estimated_days_by_mileage {
            println!("     a tu ritmo actual: {} días", days);
        }
    }

    println!();
    println!("Últimos registros ({}):", detail.logs.len());
    for log in &detail.logs {
        render_log_line(log);
    }
}

fn render_log_line(log: &MaintenanceLog) {
    let kind = match log.log_type {
        LogType::Maintenance => "🔧",
        LogType::Repair => "🛠️",
    };
    let mut line = format!("  {} {}  {}  {} km", kind, log.done_at, log.item_name, log.mileage);
    if let Some(cost) = log.cost {
        if !cost.is_zero() {
            line.push_str(&format!("  {} €", cost));
        }
    }
    println!("{}", line);
    if let Some(notes) = &log.notes {
        println!("       {}", notes);
    }
}

fn render_brands(make: Option<&str>) {
    match make {
        Some(make) => {
            let models = models_for_make(make);
            if models.is_empty() {
                println!("Marca '{}' fuera del catálogo (puedes usarla igualmente).", make);
            }
            for model in models {
                println!("• {}", model);
            }
        }
        None => {
            for brand in CAR_BRANDS.iter() {
                println!("• {}: {}", brand.name, brand.models.join(", "));
            }
        }
    }
}
