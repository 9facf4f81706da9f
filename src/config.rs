// ============================================================================
// Configuration
// ============================================================================
// Lit la configuration depuis les variables d'environnement au démarrage
//
// Variables reconnues :
// - LAZYCOIN_MARKETS   : chemin d'un fichier JSON /coins/markets (sinon démo)
// - LAZYCOIN_CURRENCY  : code devise d'affichage (défaut : "usd")
// - LAZYCOIN_FAVORITES : ids favoris séparés par des virgules ("bitcoin,ethereum")
// - LAZYCOIN_LOG_DIR   : répertoire des logs
// - RUST_LOG           : niveau de log (lu directement par EnvFilter)
//
// CONCEPTS RUST :
// 1. Injection de dépendance : from_lookup() prend une closure, donc testable
//    sans toucher aux vraies variables d'environnement
// 2. PathBuf : chemin possédé, cross-platform
// ============================================================================

use std::path::PathBuf;

use anyhow::{bail, Result};

/// Devise par défaut
pub const DEFAULT_CURRENCY: &str = "usd";

/// Configuration de l'application
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Fichier markets à charger (None → données de démo)
    pub markets_path: Option<PathBuf>,

    /// Code devise en minuscules
    pub currency: String,

    /// Favoris initiaux
    pub favorites: Vec<String>,

    /// Répertoire des logs
    pub log_dir: PathBuf,
}

impl Config {
    /// Lit la configuration depuis l'environnement du processus
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construit la configuration à partir d'une fonction de lecture
    ///
    /// CONCEPT RUST : impl Fn(&str) -> Option<String>
    /// - En production : std::env::var
    /// - En test : une HashMap ou un match
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let markets_path = lookup("LAZYCOIN_MARKETS")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let currency = lookup("LAZYCOIN_CURRENCY")
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        if !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            bail!("Code devise invalide : {:?}", currency);
        }

        let favorites = lookup("LAZYCOIN_FAVORITES")
            .map(|value| parse_list(&value))
            .unwrap_or_default();

        let log_dir = lookup("LAZYCOIN_LOG_DIR")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);

        Ok(Self {
            markets_path,
            currency,
            favorites,
            log_dir,
        })
    }
}

/// Répertoire de logs par défaut
///
/// - Linux/WSL : ~/.local/share/lazycoin/logs
/// - macOS : ~/Library/Application Support/lazycoin/logs
/// - Windows : C:\Users\<user>\AppData\Local\lazycoin\logs
/// - Sinon : ./logs
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("lazycoin").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Découpe une liste séparée par des virgules, sans entrées vides
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================
