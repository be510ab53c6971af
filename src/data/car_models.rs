//! Catálogo de marcas y modelos
//!
//! Lista orientativa para la entrada guiada de vehículos; el usuario puede
//! escribir cualquier marca/modelo fuera del catálogo.

use lazy_static::lazy_static;

#[derive(Debug, Clone)]
pub struct CarBrand {
    pub name: &'static str,
    pub models: &'static [&'static str],
}

lazy_static! {
    pub static ref CAR_BRANDS: Vec<CarBrand> = vec![
        CarBrand { name: "Volkswagen", models: &["Golf", "Polo", "Passat", "Tiguan", "T-Roc", "ID.3", "ID.4"] },
        CarBrand { name: "Toyota", models: &["Corolla", "Yaris", "Camry", "RAV4", "C-HR", "Highlander"] },
        CarBrand { name: "Honda", models: &["Civic", "Accord", "CR-V", "HR-V", "Jazz"] },
        CarBrand { name: "BYD", models: &["Seal", "Dolphin", "Atto 3", "Han", "Tang"] },
        CarBrand { name: "BMW", models: &["Serie 3", "Serie 5", "X1", "X3", "X5", "i3", "iX3"] },
        CarBrand { name: "Mercedes-Benz", models: &["Clase A", "Clase C", "Clase E", "GLA", "GLC"] },
        CarBrand { name: "Audi", models: &["A3", "A4", "A6", "Q3", "Q5"] },
        CarBrand { name: "Tesla", models: &["Model 3", "Model Y"] },
        CarBrand { name: "Renault", models: &["Clio", "Mégane", "Captur", "Austral"] },
        CarBrand { name: "Peugeot", models: &["208", "308", "2008", "3008", "5008"] },
    ];
}

/// Modelos conocidos de una marca; vacío si la marca no está en el catálogo
pub fn models_for_make(make: &str) -> &'static [&'static str] {
    CAR_BRANDS
        .iter()
        .find(|brand| brand.name.eq_ignore_ascii_case(make))
        .map(|brand| brand.models)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_for_known_make_ignores_case() {
        assert!(models_for_make("toyota").contains(&"Corolla"));
    }

    #[test]
    fn test_models_for_unknown_make_is_empty() {
        assert!(models_for_make("DeLorean").is_empty());
    }
}
