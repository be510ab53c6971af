//! Evaluador de estado de mantenimiento
//!
//! Dada una regla y la lectura actual del odómetro del vehículo, calcula si la
//! regla está al día, próxima a vencer o vencida, en dos ejes independientes
//! (distancia y tiempo) que se combinan en un veredicto único.
//!
//! Función pura y total: las opcionales ausentes son entradas válidas, nunca
//! error. "Hoy" se recibe como parámetro.

use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::models::maintenance_rule::MaintenanceRule;

/// Umbral de aviso por distancia: a menos de 500 km del vencimiento
pub const MILEAGE_WARNING_THRESHOLD_KM: i64 = 500;

/// Umbral de aviso por tiempo: a menos de 30 días del vencimiento
pub const DATE_WARNING_THRESHOLD_DAYS: i64 = 30;

/// Urgencia de un eje o del veredicto combinado.
///
/// El orden de las variantes define la severidad: el veredicto combinado es el
/// máximo entre los ejes activos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyStatus {
    Normal,
    Warning,
    Overdue,
}

impl std::fmt::Display for UrgencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrgencyStatus::Normal => write!(f, "normal"),
            UrgencyStatus::Warning => write!(f, "warning"),
            UrgencyStatus::Overdue => write!(f, "overdue"),
        }
    }
}

/// Sub-informe del eje de distancia. `due`/`remaining` ausentes cuando la
/// regla no define intervalo de km (eje inactivo, no "cero").
#[derive(Debug, Clone, Serialize)]
pub struct MileageAxis {
    pub due: Option<i64>,
    pub remaining: Option<i64>,
    pub status: UrgencyStatus,
}

/// Sub-informe del eje de tiempo. Inactivo si falta el intervalo de meses o
/// la regla no se ha cumplido nunca: sin fecha base no hay vencimiento
/// computable.
#[derive(Debug, Clone, Serialize)]
pub struct DateAxis {
    pub due: Option<NaiveDate>,
    pub remaining_days: Option<i64>,
    pub status: UrgencyStatus,
}

/// Informe de estado de una regla; se calcula bajo demanda, nunca se persiste
#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceStatus {
    pub status: UrgencyStatus,
    pub mileage: MileageAxis,
    pub date: DateAxis,
    /// Proyección de días hasta cruzar el umbral de distancia al ritmo diario
    /// actual. Puede ser negativa: ya se ha rodado N días de más.
    pub estimated_days_by_mileage: Option<i64>,
}

/// Calcular el estado de una regla de mantenimiento.
///
/// `current_mileage` y `daily_avg_km` se asumen no negativos; validarlos es
/// responsabilidad del caller.
pub fn calculate_maintenance_status(
    rule: &MaintenanceRule,
    current_mileage: i64,
    daily_avg_km: f64,
    today: NaiveDate,
) -> MaintenanceStatus {
    let last_done_mileage = rule.last_done_mileage.unwrap_or(0);

    // 1. Eje de distancia
    let mileage = match rule.interval_km {
        Some(interval_km) => {
            let due = last_done_mileage + interval_km;
            let remaining = due - current_mileage;
            let status = if remaining < 0 {
                UrgencyStatus::Overdue
            } else if remaining < MILEAGE_WARNING_THRESHOLD_KM {
                UrgencyStatus::Warning
            } else {
                UrgencyStatus::Normal
            };
            MileageAxis {
                due: Some(due),
                remaining: Some(remaining),
                status,
            }
        }
        None => MileageAxis {
            due: None,
            remaining: None,
            status: UrgencyStatus::Normal,
        },
    };

    // 2. Eje de tiempo: solo activo con intervalo Y fecha base. Una regla
    // nunca cumplida no puede anclar una fecha de vencimiento.
    let date = match (rule.interval_months, rule.last_done_date) {
        (Some(interval_months), Some(last_done_date)) => {
            match last_done_date.checked_add_months(Months::new(interval_months)) {
                Some(due) => {
                    let remaining_days = (due - today).num_days();
                    let status = if remaining_days < 0 {
                        UrgencyStatus::Overdue
                    } else if remaining_days < DATE_WARNING_THRESHOLD_DAYS {
                        UrgencyStatus::Warning
                    } else {
                        UrgencyStatus::Normal
                    };
                    DateAxis {
                        due: Some(due),
                        remaining_days: Some(remaining_days),
                        status,
                    }
                }
                // Fuera del rango representable del calendario
                None => inactive_date_axis(),
            }
        }
        _ => inactive_date_axis(),
    };

    // 3. Veredicto combinado: el más urgente de los ejes. Un eje inactivo
    // reporta Normal y por tanto nunca aporta urgencia.
    let status = mileage.status.max(date.status);

    // 4. Proyección de días según el ritmo de conducción actual
    let estimated_days_by_mileage = match (mileage.remaining, daily_avg_km > 0.0) {
        (Some(remaining), true) => Some((remaining as f64 / daily_avg_km).ceil() as i64),
        _ => None,
    };

    MaintenanceStatus {
        status,
        mileage,
        date,
        estimated_days_by_mileage,
    }
}

fn inactive_date_axis() -> DateAxis {
    DateAxis {
        due: None,
        remaining_days: None,
        status: UrgencyStatus::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    fn make_rule(
        interval_km: Option<i64>,
        interval_months: Option<u32>,
        last_done_date: Option<NaiveDate>,
        last_done_mileage: Option<i64>,
    ) -> MaintenanceRule {
        MaintenanceRule {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            name: "Cambio de aceite".to_string(),
            interval_km,
            interval_months,
            last_done_date,
            last_done_mileage,
            created_at: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rule_without_intervals_is_never_due() {
        let rule = make_rule(None, None, None, None);
        let status = calculate_maintenance_status(&rule, 120000, 30.0, date(2024, 6, 1));

        assert_eq!(status.status, UrgencyStatus::Normal);
        assert!(status.mileage.due.is_none());
        assert!(status.mileage.remaining.is_none());
        assert!(status.date.due.is_none());
        assert!(status.date.remaining_days.is_none());
        assert!(status.estimated_days_by_mileage.is_none());
    }

    #[test]
    fn test_mileage_only_rule_verdict_equals_mileage_status() {
        let rule = make_rule(Some(10000), None, None, Some(40000));

        for (current, expected) in [
            (45000, UrgencyStatus::Normal),
            (49700, UrgencyStatus::Warning),
            (51000, UrgencyStatus::Overdue),
        ] {
            let status = calculate_maintenance_status(&rule, current, 30.0, date(2024, 6, 1));
            assert_eq!(status.status, expected);
            assert_eq!(status.mileage.status, expected);
            // El eje de tiempo queda completamente ausente
            assert!(status.date.due.is_none());
            assert!(status.date.remaining_days.is_none());
        }
    }

    #[test]
    fn test_time_axis_inactive_without_baseline() {
        // Intervalo de meses sin cumplimiento previo: nunca vence por tiempo
        let rule = make_rule(None, Some(6), None, None);
        let status = calculate_maintenance_status(&rule, 0, 30.0, date(2030, 1, 1));

        assert_eq!(status.status, UrgencyStatus::Normal);
        assert!(status.date.due.is_none());
        assert!(status.date.remaining_days.is_none());
    }

    #[test]
    fn test_never_done_rule_uses_zero_mileage_baseline() {
        let rule = make_rule(Some(10000), None, None, None);
        let status = calculate_maintenance_status(&rule, 2000, 30.0, date(2024, 6, 1));

        assert_eq!(status.mileage.due, Some(10000));
        assert_eq!(status.mileage.remaining, Some(8000));
        assert_eq!(status.status, UrgencyStatus::Normal);
    }

    #[test]
    fn test_mileage_boundaries() {
        let rule = make_rule(Some(10000), None, None, Some(40000));

        // remaining = 500 exacto -> normal
        let status = calculate_maintenance_status(&rule, 49500, 30.0, date(2024, 6, 1));
        assert_eq!(status.mileage.remaining, Some(500));
        assert_eq!(status.mileage.status, UrgencyStatus::Normal);

        // remaining = 499 -> warning
        let status = calculate_maintenance_status(&rule, 49501, 30.0, date(2024, 6, 1));
        assert_eq!(status.mileage.remaining, Some(499));
        assert_eq!(status.mileage.status, UrgencyStatus::Warning);

        // remaining = 0 -> warning todavía, no overdue
        let status = calculate_maintenance_status(&rule, 50000, 30.0, date(2024, 6, 1));
        assert_eq!(status.mileage.status, UrgencyStatus::Warning);

        // remaining = -1 -> overdue
        let status = calculate_maintenance_status(&rule, 50001, 30.0, date(2024, 6, 1));
        assert_eq!(status.mileage.remaining, Some(-1));
        assert_eq!(status.mileage.status, UrgencyStatus::Overdue);
    }

    #[test]
    fn test_date_boundaries() {
        let rule = make_rule(None, Some(12), Some(date(2023, 1, 15)), None);
        // due = 2024-01-15

        // 30 días restantes -> normal
        let status = calculate_maintenance_status(&rule, 0, 30.0, date(2023, 12, 16));
        assert_eq!(status.date.remaining_days, Some(30));
        assert_eq!(status.date.status, UrgencyStatus::Normal);

        // 29 días -> warning
        let status = calculate_maintenance_status(&rule, 0, 30.0, date(2023, 12, 17));
        assert_eq!(status.date.remaining_days, Some(29));
        assert_eq!(status.date.status, UrgencyStatus::Warning);

        // mismo día -> warning, no overdue
        let status = calculate_maintenance_status(&rule, 0, 30.0, date(2024, 1, 15));
        assert_eq!(status.date.remaining_days, Some(0));
        assert_eq!(status.date.status, UrgencyStatus::Warning);

        // -1 día -> overdue
        let status = calculate_maintenance_status(&rule, 0, 30.0, date(2024, 1, 16));
        assert_eq!(status.date.remaining_days, Some(-1));
        assert_eq!(status.date.status, UrgencyStatus::Overdue);
    }

    #[test]
    fn test_month_addition_clamps_to_end_of_month() {
        // 31 de enero + 1 mes cae en el último día válido de febrero
        let rule = make_rule(None, Some(1), Some(date(2023, 1, 31)), None);
        let status = calculate_maintenance_status(&rule, 0, 30.0, date(2023, 2, 1));
        assert_eq!(status.date.due, Some(date(2023, 2, 28)));

        // Año bisiesto
        let rule = make_rule(None, Some(1), Some(date(2024, 1, 31)), None);
        let status = calculate_maintenance_status(&rule, 0, 30.0, date(2024, 2, 1));
        assert_eq!(status.date.due, Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_combined_verdict_takes_max_severity() {
        // Distancia normal + tiempo overdue -> overdue
        let rule = make_rule(Some(10000), Some(6), Some(date(2023, 1, 15)), Some(40000));
        let status = calculate_maintenance_status(&rule, 41000, 30.0, date(2024, 1, 1));
        assert_eq!(status.mileage.status, UrgencyStatus::Normal);
        assert_eq!(status.date.status, UrgencyStatus::Overdue);
        assert_eq!(status.status, UrgencyStatus::Overdue);

        // Distancia warning + tiempo normal -> warning
        let rule = make_rule(Some(10000), Some(24), Some(date(2024, 1, 15)), Some(40000));
        let status = calculate_maintenance_status(&rule, 49700, 30.0, date(2024, 2, 1));
        assert_eq!(status.mileage.status, UrgencyStatus::Warning);
        assert_eq!(status.date.status, UrgencyStatus::Normal);
        assert_eq!(status.status, UrgencyStatus::Warning);
    }

    #[test]
    fn test_urgency_is_monotone_in_mileage() {
        let rule = make_rule(Some(10000), None, None, Some(40000));
        let mut last = UrgencyStatus::Normal;
        for current in (40000..=52000).step_by(100) {
            let status = calculate_maintenance_status(&rule, current, 30.0, date(2024, 6, 1));
            assert!(
                status.status >= last,
                "urgency regressed at mileage {}",
                current
            );
            last = status.status;
        }
    }

    #[test]
    fn test_estimated_days_by_mileage() {
        let rule = make_rule(Some(10000), None, None, Some(40000));

        // 400 km restantes a 30 km/día -> ceil(13.33) = 14
        let status = calculate_maintenance_status(&rule, 49600, 30.0, date(2024, 6, 1));
        assert_eq!(status.estimated_days_by_mileage, Some(14));

        // Ya vencida: la proyección negativa indica días rodados de más
        let status = calculate_maintenance_status(&rule, 50300, 30.0, date(2024, 6, 1));
        assert_eq!(status.estimated_days_by_mileage, Some(-10));

        // Sin ritmo diario no hay proyección
        let status = calculate_maintenance_status(&rule, 49600, 0.0, date(2024, 6, 1));
        assert!(status.estimated_days_by_mileage.is_none());

        // Sin eje de distancia tampoco
        let rule = make_rule(None, Some(6), Some(date(2024, 1, 1)), None);
        let status = calculate_maintenance_status(&rule, 49600, 30.0, date(2024, 6, 1));
        assert!(status.estimated_days_by_mileage.is_none());
    }

    #[test]
    fn test_oil_change_scenario_warns_on_both_axes() {
        let rule = make_rule(Some(10000), Some(12), Some(date(2023, 1, 15)), Some(40000));
        let status = calculate_maintenance_status(&rule, 49600, 30.0, date(2023, 12, 20));

        assert_eq!(status.mileage.remaining, Some(400));
        assert_eq!(status.mileage.status, UrgencyStatus::Warning);
        assert_eq!(status.date.remaining_days, Some(26));
        assert_eq!(status.date.status, UrgencyStatus::Warning);
        assert_eq!(status.status, UrgencyStatus::Warning);
    }

    #[test]
    fn test_distance_overdue_dominates_verdict() {
        let rule = make_rule(Some(10000), Some(12), Some(date(2023, 1, 15)), Some(40000));
        let status = calculate_maintenance_status(&rule, 51000, 30.0, date(2023, 12, 20));

        assert_eq!(status.mileage.remaining, Some(-1000));
        assert_eq!(status.status, UrgencyStatus::Overdue);
    }
}
