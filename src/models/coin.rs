// ============================================================================
// Structure : CoinSnapshot
// ============================================================================
// Représente l'état d'une cryptomonnaie à un instant donné, tel que fourni
// par la source de données (format /coins/markets de CoinGecko)
//
// CONCEPTS RUST :
// 1. #[serde(default)] : un champ absent du JSON prend sa valeur par défaut
//    - String vide pour les textes
//    - None pour les Option<f64>
// 2. Option<T> : les valeurs numériques peuvent manquer, la carte doit
//    s'afficher quand même (segments vides)
// ============================================================================

use serde::Deserialize;

/// Marqueur présent dans le chemin des icônes CoinGecko
/// Ex: https://assets.coingecko.com/coins/images/1/large/bitcoin.png
const IMAGE_MARKER: &str = "/coins/images/";

/// Nombre d'échantillons horaires attendus sur 7 jours (7 × 24)
pub const SPARKLINE_SAMPLES: usize = 168;

/// Série de prix horaires sur 7 jours
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Sparkline7d {
    /// Prix, du plus ancien au plus récent
    #[serde(default)]
    pub price: Vec<f64>,
}

/// Snapshot d'une cryptomonnaie
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoinSnapshot {
    /// Identifiant CoinGecko (ex: "bitcoin")
    pub id: String,

    /// Nom affiché (ex: "Bitcoin")
    pub name: String,

    /// Symbole du ticker en minuscules (ex: "btc")
    pub symbol: String,

    /// URL de l'icône
    pub image: String,

    /// Prix actuel dans la devise sélectionnée
    pub current_price: Option<f64>,

    /// Volume échangé sur 24h
    pub total_volume: Option<f64>,

    /// Variation du prix sur 24h, en pourcentage, telle que fournie
    pub price_change_percentage_24h: Option<f64>,

    /// Historique horaire sur 7 jours (optionnel)
    pub sparkline_in_7d: Option<Sparkline7d>,
}

impl CoinSnapshot {
    /// Crée un snapshot minimal (utile pour les tests et la démo)
    pub fn new(id: &str, name: &str, symbol: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            ..Self::default()
        }
    }

    /// Symbole en majuscules pour l'affichage (ex: "BTC")
    pub fn display_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }

    /// Prix horaires sur 7 jours, slice vide si absents
    ///
    /// CONCEPT RUST : Option chaining
    /// - as_ref() : &Option<T> -> Option<&T>
    /// - unwrap_or() : valeur par défaut si None
    pub fn sparkline_prices(&self) -> &[f64] {
        self.sparkline_in_7d
            .as_ref()
            .map(|sparkline| sparkline.price.as_slice())
            .unwrap_or(&[])
    }

    /// Référence de la miniature sparkline dérivée de l'icône
    pub fn thumbnail_url(&self) -> Option<String> {
        sparkline_thumbnail(&self.image)
    }
}

/// Extrait l'identifiant d'image CoinGecko d'une URL d'icône
///
/// "…/coins/images/1234/large/x.png" → Some("1234")
/// Sans le marqueur (ou identifiant vide) → None
pub fn image_id(icon_url: &str) -> Option<&str> {
    let (_, rest) = icon_url.split_once(IMAGE_MARKER)?;
    let id = rest.split('/').next()?;

    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Construit l'URL de la miniature sparkline à partir de l'URL d'icône
pub fn sparkline_thumbnail(icon_url: &str) -> Option<String> {
    image_id(icon_url).map(|id| format!("https://www.coingecko.com/coins/{}/sparkline", id))
}

// ============================================================================
// Tests unitaires
// ============================================================================
