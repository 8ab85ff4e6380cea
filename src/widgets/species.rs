//! Display helpers for species names.

pub const FALLBACK_ICON: &str = "🌼";

/// Decorative icon for a species, matched exactly but ignoring case.
pub fn species_icon(species: &str) -> &'static str {
    match species.to_lowercase().as_str() {
        "setosa" => "🌸",
        "versicolor" => "🌿",
        "virginica" => "🌺",
        _ => FALLBACK_ICON,
    }
}

pub fn display_name(species: &str) -> String {
    format!("Iris {}", species)
}
