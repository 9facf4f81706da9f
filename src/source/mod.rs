// ============================================================================
// Module : source
// ============================================================================
// Ce module fournit les snapshots affichés par le dashboard : depuis un
// fichier JSON (format CoinGecko /coins/markets) ou un jeu de démo.
// Aucun appel réseau ici.
// ============================================================================

pub mod markets; // Chargement du fichier markets

// Re-export des fonctions principales
pub use markets::{demo_markets, load_markets};
