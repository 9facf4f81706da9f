// ============================================================================
// Module : models
// ============================================================================
// Ce module contient les structures de données et les fonctions de
// formatage pures utilisées par l'interface
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod coin;  // Snapshot d'une crypto (fichier coin.rs)
pub mod money; // Formatage des montants et variations (fichier money.rs)

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use lazycoin::models::coin::CoinSnapshot;
// On peut faire : use lazycoin::models::CoinSnapshot;
pub use coin::{sparkline_thumbnail, CoinSnapshot, Sparkline7d, SPARKLINE_SAMPLES};
pub use money::{format_change, format_currency};
