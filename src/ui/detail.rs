// ============================================================================
// Série détaillée - Historique horaire sur 7 jours
// ============================================================================
// Transforme la sparkline (168 prix horaires) en points datés pour le
// graphique détaillé
//
// CONCEPTS RUST :
// 1. Génériques avec trait bounds : fonctionne pour Utc, Local, FixedOffset
// 2. Iterator chaining : enumerate + map + collect
// 3. Fonction pure : "now" est passé en paramètre, donc testable
// ============================================================================

use std::fmt::Display;

use chrono::{DateTime, Duration, TimeZone};

use crate::models::SPARKLINE_SAMPLES;

/// Format des labels : "Mon 15 Jan 2024, 1 PM"
pub const LABEL_FORMAT: &str = "%a %d %b %Y, %-I %p";

/// Un point du graphique détaillé
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPoint {
    /// Date et heure lisibles (ex: "Mon 15 Jan 2024, 1 PM")
    pub label: String,

    /// Prix arrondi à 2 décimales pour l'affichage
    pub display_value: String,

    /// Prix brut pour le tracé
    pub raw_value: f64,
}

/// Construit la série détaillée à partir des prix horaires
///
/// CONCEPT : Ancrage sur "now"
/// - L'échantillon i correspond à "now - (167 - i) heures", quelle que soit
///   la longueur de la série
/// - Avec 168 échantillons : i = 0 → 167h avant, i = 167 → maintenant
/// - Au-delà de 168, le décalage devient négatif (heures futures)
///
/// Une série vide donne un Vec vide.
pub fn detail_series<Tz>(prices: &[f64], now: DateTime<Tz>) -> Vec<DetailPoint>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let anchor = (SPARKLINE_SAMPLES - 1) as i64;

    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let hours_before = anchor - i as i64;
            let timestamp = now.clone() - Duration::hours(hours_before);

            DetailPoint {
                label: timestamp.format(LABEL_FORMAT).to_string(),
                display_value: format!("{:.2}", price),
                raw_value: price,
            }
        })
        .collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================
