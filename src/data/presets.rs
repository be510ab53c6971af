//! Catálogo de reglas de mantenimiento predefinidas
//!
//! Plantillas habituales con sus intervalos de km/meses. Cinco de ellas se
//! aplican por defecto a cada vehículo nuevo (opcional al crearlo).

use lazy_static::lazy_static;

#[derive(Debug, Clone)]
pub struct MaintenancePreset {
    pub name: &'static str,
    pub interval_km: Option<i64>,
    pub interval_months: Option<u32>,
}

lazy_static! {
    pub static ref MAINTENANCE_PRESETS: Vec<MaintenancePreset> = vec![
        MaintenancePreset { name: "Cambio de aceite (sintético)", interval_km: Some(10000), interval_months: Some(12) },
        MaintenancePreset { name: "Cambio de aceite (mineral)", interval_km: Some(5000), interval_months: Some(6) },
        MaintenancePreset { name: "Filtro de aceite", interval_km: Some(10000), interval_months: Some(12) },
        MaintenancePreset { name: "Filtro de aire", interval_km: Some(20000), interval_months: Some(24) },
        MaintenancePreset { name: "Filtro de habitáculo", interval_km: Some(20000), interval_months: Some(12) },
        MaintenancePreset { name: "Líquido de frenos", interval_km: Some(40000), interval_months: Some(24) },
        MaintenancePreset { name: "Líquido refrigerante", interval_km: Some(40000), interval_months: Some(24) },
        MaintenancePreset { name: "Bujías", interval_km: Some(40000), interval_months: Some(48) },
        MaintenancePreset { name: "Rotación de neumáticos", interval_km: Some(10000), interval_months: None },
        MaintenancePreset { name: "Aceite de transmisión", interval_km: Some(60000), interval_months: Some(48) },
    ];
}

/// Plantillas aplicadas por defecto a un vehículo nuevo
pub const DEFAULT_PRESET_NAMES: [&str; 5] = [
    "Cambio de aceite (sintético)",
    "Filtro de aceite",
    "Filtro de aire",
    "Filtro de habitáculo",
    "Líquido de frenos",
];

pub fn find_preset(name: &str) -> Option<&'static MaintenancePreset> {
    MAINTENANCE_PRESETS.iter().find(|preset| preset.name == name)
}

/// Las plantillas por defecto, en el orden del catálogo
pub fn default_presets() -> Vec<&'static MaintenancePreset> {
    MAINTENANCE_PRESETS
        .iter()
        .filter(|preset| DEFAULT_PRESET_NAMES.contains(&preset.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_default_name_exists_in_catalog() {
        for name in DEFAULT_PRESET_NAMES {
            assert!(find_preset(name).is_some(), "missing preset '{}'", name);
        }
        assert_eq!(default_presets().len(), DEFAULT_PRESET_NAMES.len());
    }

    #[test]
    fn test_find_preset() {
        let preset = find_preset("Rotación de neumáticos").unwrap();
        assert_eq!(preset.interval_km, Some(10000));
        assert_eq!(preset.interval_months, None);

        assert!(find_preset("Inexistente").is_none());
    }

    #[test]
    fn test_presets_define_at_least_one_interval() {
        for preset in MAINTENANCE_PRESETS.iter() {
            assert!(
                preset.interval_km.is_some() || preset.interval_months.is_some(),
                "preset '{}' would never be due",
                preset.name
            );
        }
    }
}
