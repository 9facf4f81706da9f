// ============================================================================
// LazyCoin - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod app;       // État du dashboard
pub mod config;    // Configuration (variables d'environnement)
pub mod models;    // Structures de données et formatage
pub mod source;    // Source des snapshots (fichier ou démo)
pub mod ui;        // Interface utilisateur
