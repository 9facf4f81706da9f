// ============================================================================
// Source de données : fichier markets
// ============================================================================
// Charge les snapshots depuis un fichier JSON au format de l'endpoint
// CoinGecko /coins/markets?sparkline=true, ou fournit un jeu de démo.
//
// CONCEPTS RUST :
// 1. Result<T> + Context (anyhow) : erreurs avec contexte lisible
// 2. Serde : désérialisation JSON vers Vec<CoinSnapshot>
// 3. #[instrument] : span tracing avec le chemin du fichier
// ============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::models::{CoinSnapshot, Sparkline7d, SPARKLINE_SAMPLES};

/// Charge les snapshots depuis un fichier JSON
///
/// # Arguments
/// * `path` - Fichier contenant un tableau JSON de coins
///
/// # Retourne
/// * `Result<Vec<CoinSnapshot>>` - Snapshots dans l'ordre du fichier
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_markets(path: &Path) -> Result<Vec<CoinSnapshot>> {
    debug!("Reading markets file");
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Échec de la lecture de {}", path.display()))?;

    let snapshots = parse_markets(&content)
        .with_context(|| format!("Fichier markets invalide : {}", path.display()))?;

    info!(coins = snapshots.len(), "Markets loaded");
    Ok(snapshots)
}

/// Parse un tableau JSON de coins
///
/// Les séries 7 jours de longueur inattendue sont acceptées telles quelles
/// (le point i reste daté "now - (167 - i) heures").
pub fn parse_markets(content: &str) -> Result<Vec<CoinSnapshot>> {
    let snapshots: Vec<CoinSnapshot> =
        serde_json::from_str(content).context("Échec du parsing JSON des markets")?;

    for snapshot in &snapshots {
        let samples = snapshot.sparkline_prices().len();
        if snapshot.sparkline_in_7d.is_some() && samples != SPARKLINE_SAMPLES {
            warn!(
                coin = %snapshot.id,
                samples,
                expected = SPARKLINE_SAMPLES,
                "Unexpected sparkline length"
            );
        }
    }

    Ok(snapshots)
}

/// Jeu de données de démonstration, déterministe
///
/// CONCEPT : Séries synthétiques
/// - Une sinusoïde + une tendance par coin
/// - Toujours 168 échantillons, comme l'API
pub fn demo_markets() -> Vec<CoinSnapshot> {
    let coins = [
        ("bitcoin", "Bitcoin", "btc", 1, 50000.0, 1e9, -2.5),
        ("ethereum", "Ethereum", "eth", 279, 3000.0, 4.2e8, 1.8),
        ("solana", "Solana", "sol", 4128, 140.0, 9.5e7, 0.0),
        ("dogecoin", "Dogecoin", "doge", 5, 0.15, 3.1e7, 5.25),
    ];

    coins
        .iter()
        .map(|&(id, name, symbol, image_id, price, volume, change)| {
            let prices = synthetic_series(price, change);
            CoinSnapshot {
                id: id.to_string(),
                name: name.to_string(),
                symbol: symbol.to_string(),
                image: format!(
                    "https://assets.coingecko.com/coins/images/{}/large/{}.png",
                    image_id, id
                ),
                current_price: Some(price),
                total_volume: Some(volume),
                price_change_percentage_24h: Some(change),
                sparkline_in_7d: Some(Sparkline7d { price: prices }),
            }
        })
        .collect()
}

/// Série de 168 prix se terminant sur `last`
fn synthetic_series(last: f64, change: f64) -> Vec<f64> {
    (0..SPARKLINE_SAMPLES)
        .map(|i| {
            let t = i as f64 / (SPARKLINE_SAMPLES - 1) as f64;
            let trend = 1.0 - (1.0 - t) * change / 100.0;
            let wave = 1.0 + 0.02 * (t * std::f64::consts::TAU * 3.0).sin();
            last * trend * wave
        })
        .collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================
