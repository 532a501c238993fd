// Core configuration types
mod core;
mod loader;

// Re-export core types
pub use core::{BowtieConfig, DisplayConfig, ScenarioConfig, ValidationConfig};

// Re-export loader functions
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from_path,
    parse_and_validate_config, resolve_config, user_config_path, CONFIG_FILE_NAME,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScenarioId;

    #[test]
    fn test_full_config_round_trip() {
        let contents = r#"
[scenario_a]
lead_count = 1200
conversion_rates = [30, 20, 50, 25]

[scenario_b]
churn_or_upsell_rate = -10
monthly_fee = 49.5

[display]
currency_symbol = "€"

[validation]
strict = true
"#;
        let config = parse_and_validate_config(contents).unwrap();

        let a = config.scenario_input(ScenarioId::A);
        assert_eq!(a.lead_count, 1200.0);
        assert_eq!(a.conversion_rates, [30.0, 20.0, 50.0, 25.0]);
        assert_eq!(a.churn_or_upsell_rate, 25.0);

        let b = config.scenario_input(ScenarioId::B);
        assert_eq!(b.churn_or_upsell_rate, -10.0);
        assert_eq!(b.monthly_fee, 49.5);

        assert_eq!(config.display().currency_symbol, "€");
        assert!(config.display().animate);
        assert!(config.is_strict());
    }

    #[test]
    fn test_unknown_sections_are_ignored() {
        let config = parse_and_validate_config("[theme]\nname = \"dark\"\n").unwrap();
        assert_eq!(config, BowtieConfig::default());
    }
}
