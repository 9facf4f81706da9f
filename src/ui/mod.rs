// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;    // Gestion des événements clavier et souris
pub mod dashboard; // Rendu de l'interface principale
pub mod card;      // Carte dépliable d'une crypto
pub mod columns;   // Colonnes de la ligne résumé
pub mod detail;    // Série horaire du graphique détaillé
pub mod chart;     // Rendu du graphique ligne

// Re-exports pour simplifier les imports
pub use card::{CardHit, CardProps, CardState, CoinCard};
pub use chart::{ChartRenderer, LineChartRenderer};
pub use dashboard::render;
pub use detail::DetailPoint;
pub use events::{Event, EventHandler};
