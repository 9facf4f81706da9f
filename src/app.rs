// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global du dashboard : les cartes, la devise, les favoris
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. HashSet : ensemble des favoris, recherche en O(1)
//
// PATTERN : App joue le rôle du parent des cartes
// - Il fournit à chaque carte ses props (devise, favori, sélection)
// - Il reçoit le callback "set favorite" des cartes
// - Chaque carte garde son propre état ouvert/fermé
// ============================================================================

use std::collections::HashSet;

use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::models::CoinSnapshot;
use crate::ui::card::{CardHit, CardProps, ClickOutcome, CoinCard, SUMMARY_HEIGHT};

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Une carte par coin, dans l'ordre de la source
    pub cards: Vec<CoinCard>,

    /// Code devise d'affichage (ex: "usd")
    pub currency: String,

    /// Ids des coins favoris
    pub favorites: HashSet<String>,

    /// Index de la carte sélectionnée
    pub selected_index: usize,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// CONCEPT : Two-step quit pour éviter les sorties accidentelles
    /// - Première pression de 'q' : confirm_quit = true
    /// - Deuxième pression de 'q' : running = false (quit réel)
    /// - N'importe quelle autre touche : confirm_quit = false (annulation)
    pub confirm_quit: bool,

    /// Message de statut affiché dans le footer (ex: erreur de rechargement)
    pub status_message: Option<String>,
}

impl App {
    /// Crée une App vide affichée dans la devise donnée
    pub fn new(currency: &str) -> Self {
        Self {
            running: true,
            cards: Vec::new(),
            currency: currency.to_string(),
            favorites: HashSet::new(),
            selected_index: 0,
            confirm_quit: false,
            status_message: None,
        }
    }

    /// Crée une App avec des snapshots préchargés
    pub fn with_snapshots(currency: &str, snapshots: Vec<CoinSnapshot>) -> Self {
        let mut app = Self::new(currency);
        app.cards = snapshots.into_iter().map(CoinCard::new).collect();
        app
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Sélectionne la carte précédente
    ///
    /// CONCEPT RUST : Saturating arithmetic
    /// - saturating_sub() : soustrait mais ne descend pas en dessous de 0
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Sélectionne la carte suivante
    pub fn navigate_down(&mut self) {
        let max_index = self.cards.len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    /// Retourne la carte sélectionnée
    pub fn selected_card(&self) -> Option<&CoinCard> {
        self.cards.get(self.selected_index)
    }

    // ========================================================================
    // Favoris et props
    // ========================================================================

    /// Callback "set favorite" reçu des cartes : bascule l'id dans les favoris
    pub fn set_favorite(&mut self, id: &str) {
        if self.favorites.remove(id) {
            info!(coin = %id, "Removed from favorites");
        } else {
            info!(coin = %id, "Added to favorites");
            self.favorites.insert(id.to_string());
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Props de la carte à l'index donné
    pub fn card_props(&self, index: usize) -> CardProps<'_> {
        let is_favorite = self
            .cards
            .get(index)
            .map(|card| self.is_favorite(card.id()))
            .unwrap_or(false);

        CardProps {
            currency: &self.currency,
            is_favorite,
            selected: index == self.selected_index,
        }
    }

    // ========================================================================
    // Activation des cartes
    // ========================================================================

    /// Active la ligne de la carte sélectionnée (ouvre/ferme)
    pub fn toggle_selected(&mut self) -> Option<ClickOutcome> {
        self.activate(self.selected_index, CardHit::Row)
    }

    /// Active l'étoile de la carte sélectionnée
    pub fn favorite_selected(&mut self) -> Option<ClickOutcome> {
        self.activate(self.selected_index, CardHit::FavoriteStar)
    }

    /// Transmet une activation à une carte
    ///
    /// CONCEPT RUST : Borrow scope
    /// - La carte est empruntée mutablement dans self.cards
    /// - Le callback se contente de noter l'id demandé
    /// - set_favorite() est appelé une fois l'emprunt de la carte terminé
    pub fn activate(&mut self, index: usize, hit: CardHit) -> Option<ClickOutcome> {
        let mut requested: Option<String> = None;

        let card = self.cards.get_mut(index)?;
        let outcome = card.click(hit, |id| requested = Some(id.to_string()));
        debug!(coin = %card.id(), ?outcome, "Card activated");

        if let Some(id) = requested {
            self.set_favorite(&id);
        }

        Some(outcome)
    }

    /// Traite un clic souris aux coordonnées (x, y)
    ///
    /// Le clic sélectionne la carte touchée puis lui est transmis.
    /// `area` est la zone de la pile de cartes telle que dessinée.
    pub fn click_at(&mut self, area: Rect, x: u16, y: u16) -> Option<ClickOutcome> {
        let (index, hit) = stack_layout(area, self)
            .into_iter()
            .find_map(|(index, card_area)| {
                let props = self.card_props(index);
                self.cards[index]
                    .hit_test(card_area, x, y, &props)
                    .map(|hit| (index, hit))
            })?;

        self.selected_index = index;
        self.activate(index, hit)
    }

    // ========================================================================
    // Rechargement des données
    // ========================================================================

    /// Remplace les snapshots en conservant l'état des cartes (par id)
    ///
    /// CONCEPT : Cartes "keyed" par id
    /// - Une carte existante reçoit son nouveau snapshot et reste ouverte/fermée
    /// - Les nouveaux coins reçoivent une carte fermée
    /// - Les coins disparus perdent leur carte
    pub fn replace_snapshots(&mut self, snapshots: Vec<CoinSnapshot>) {
        let mut previous: Vec<CoinCard> = std::mem::take(&mut self.cards);

        self.cards = snapshots
            .into_iter()
            .map(|snapshot| {
                match previous.iter().position(|card| card.id() == snapshot.id) {
                    Some(pos) => {
                        let mut card = previous.swap_remove(pos);
                        card.update_snapshot(snapshot);
                        card
                    }
                    None => CoinCard::new(snapshot),
                }
            })
            .collect();

        let max_index = self.cards.len().saturating_sub(1);
        self.selected_index = self.selected_index.min(max_index);
        info!(coins = self.cards.len(), "Snapshots replaced");
    }

    // ========================================================================
    // Confirmation de sortie
    // ========================================================================

    /// Demande la confirmation de quitter
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de quit
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }
}

/// Place les cartes verticalement dans `area`
///
/// CONCEPT : Scrolling minimal
/// - On commence à la première carte telle que la sélection soit visible
/// - Les cartes sont empilées tant qu'il reste de la place
/// - Une carte ouverte trop haute est tronquée (sa ligne résumé reste entière)
///
/// Retourne (index de la carte, zone) pour chaque carte visible.
pub fn stack_layout(area: Rect, app: &App) -> Vec<(usize, Rect)> {
    if app.cards.is_empty() {
        return Vec::new();
    }

    let selected = app.selected_index.min(app.cards.len() - 1);
    let mut first = 0;
    while first < selected {
        let needed: u16 = app.cards[first..=selected]
            .iter()
            .map(|card| card.height())
            .sum();
        if needed <= area.height {
            break;
        }
        first += 1;
    }

    let bottom = area.y + area.height;
    let mut y = area.y;
    let mut layout = Vec::new();

    for (index, card) in app.cards.iter().enumerate().skip(first) {
        let remaining = bottom.saturating_sub(y);
        if remaining < SUMMARY_HEIGHT {
            break;
        }

        let height = card.height().min(remaining);
        layout.push((index, Rect::new(area.x, y, area.width, height)));
        y += height;
    }

    layout
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshots() -> Vec<CoinSnapshot> {
        vec![
            CoinSnapshot::new("bitcoin", "Bitcoin", "btc"),
            CoinSnapshot::new("ethereum", "Ethereum", "eth"),
            CoinSnapshot::new("solana", "Solana", "sol"),
        ]
    }

    #[test]
    fn test_app_creation() {
        let app = App::with_snapshots("usd", snapshots());
        assert!(app.is_running());
        assert_eq!(app.cards.len(), 3);
        assert_eq!(app.selected_index, 0);
        assert!(app.cards.iter().all(|card| !card.is_expanded()));
    }

    #[test]
    fn test_navigation() {
        let mut app = App::with_snapshots("usd", snapshots());

        app.navigate_down();
        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_index, 2);

        app.navigate_up();
        assert_eq!(app.selected_card().unwrap().id(), "ethereum");

        app.navigate_up();
        app.navigate_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_set_favorite_toggles() {
        let mut app = App::new("usd");

        app.set_favorite("bitcoin");
        assert!(app.is_favorite("bitcoin"));

        app.set_favorite("bitcoin");
        assert!(!app.is_favorite("bitcoin"));
    }

    #[test]
    fn test_favorite_selected_does_not_expand() {
        let mut app = App::with_snapshots("usd", snapshots());

        let outcome = app.favorite_selected();

        assert_eq!(outcome, Some(ClickOutcome::FavoriteToggled));
        assert!(app.is_favorite("bitcoin"));
        assert!(!app.cards[0].is_expanded());
        assert!(app.card_props(0).is_favorite);
    }

    #[test]
    fn test_toggle_selected_does_not_favorite() {
        let mut app = App::with_snapshots("usd", snapshots());

        let outcome = app.toggle_selected();

        assert_eq!(outcome, Some(ClickOutcome::ExpandedToggled));
        assert!(app.cards[0].is_expanded());
        assert!(app.favorites.is_empty());
    }

    #[test]
    fn test_activate_on_empty_app() {
        let mut app = App::new("usd");
        assert_eq!(app.toggle_selected(), None);
    }

    #[test]
    fn test_replace_snapshots_keeps_card_state() {
        let mut app = App::with_snapshots("usd", snapshots());
        app.activate(1, CardHit::Row);

        let mut fresh = vec![
            CoinSnapshot::new("ethereum", "Ethereum", "eth"),
            CoinSnapshot::new("cardano", "Cardano", "ada"),
        ];
        fresh[0].current_price = Some(3100.0);
        app.selected_index = 2;
        app.replace_snapshots(fresh);

        assert_eq!(app.cards.len(), 2);
        assert!(app.cards[0].is_expanded());
        assert_eq!(app.cards[0].snapshot().current_price, Some(3100.0));
        assert!(!app.cards[1].is_expanded());
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_stack_layout_collapsed() {
        let app = App::with_snapshots("usd", snapshots());
        let layout = stack_layout(Rect::new(0, 3, 80, 20), &app);

        assert_eq!(layout.len(), 3);
        assert_eq!(layout[0], (0, Rect::new(0, 3, 80, SUMMARY_HEIGHT)));
        assert_eq!(layout[2].1.y, 3 + 2 * SUMMARY_HEIGHT);
    }

    #[test]
    fn test_stack_layout_scrolls_to_selection() {
        let mut app = App::with_snapshots("usd", snapshots());
        app.activate(0, CardHit::Row);
        app.selected_index = 2;

        // Carte 0 ouverte (18) + cartes 1 et 2 (8) > 20 : la carte 0 est masquée
        let layout = stack_layout(Rect::new(0, 0, 80, 20), &app);
        assert_eq!(layout[0].0, 1);
        assert_eq!(layout.last().unwrap().0, 2);
    }

    #[test]
    fn test_stack_layout_truncates_expanded_card() {
        let mut app = App::with_snapshots("usd", snapshots());
        app.activate(0, CardHit::Row);

        let layout = stack_layout(Rect::new(0, 0, 80, 10), &app);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout[0].1.height, 10);
    }

    #[test]
    fn test_click_at_selects_and_toggles() {
        let mut app = App::with_snapshots("usd", snapshots());
        let area = Rect::new(0, 0, 100, 20);

        // Clic sur la ligne résumé de la deuxième carte (hors étoile)
        let outcome = app.click_at(area, 95, SUMMARY_HEIGHT + 1);

        assert_eq!(outcome, Some(ClickOutcome::ExpandedToggled));
        assert_eq!(app.selected_index, 1);
        assert!(app.cards[1].is_expanded());
        assert!(app.favorites.is_empty());

        // Clic hors des cartes : rien
        assert_eq!(app.click_at(area, 10, 19), None);
    }
}
