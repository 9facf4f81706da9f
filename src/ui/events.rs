// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier, souris et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Pattern matching avec matches! : reconnaître une touche en une ligne
// 3. Error handling avec Result
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent,
    MouseEventKind,
};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Clic souris (bouton gauche enfoncé)
    Click(MouseEvent),

    /// Tick régulier (pas d'événement pendant le timeout)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    /// Durée maximale d'attente d'un événement
    tick_rate: Duration,
}

impl EventHandler {
    /// Crée un gestionnaire avec un tick de 250ms
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
        }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend au maximum tick_rate
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    /// - Si événement, le lit et le convertit
    pub fn next(&self) -> Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }

        Ok(convert(event::read()?))
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Convertit un événement crossterm en événement applicatif
///
/// CONCEPT : Filter sur KeyEventKind
/// - Sur certains OS, on reçoit Press ET Release
/// - On ne garde que Press pour éviter les doublons
/// - Seul l'appui du bouton gauche compte comme clic (pas le relâchement)
fn convert(event: CrosstermEvent) -> Event {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
        CrosstermEvent::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            Event::Click(mouse)
        }
        // Resize, focus, paste, mouvements souris : un simple redraw suffit
        _ => Event::Tick,
    }
}

// ============================================================================
// Helpers : Convertir un événement en action
// ============================================================================

/// Vérifie si l'événement est la touche 'q' (quitter)
pub fn is_quit_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
    } else {
        false
    }
}

/// Vérifie si l'événement est la flèche vers le haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K'))
    } else {
        false
    }
}

/// Vérifie si l'événement est la flèche vers le bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J'))
    } else {
        false
    }
}

/// Vérifie si l'événement active la ligne (Entrée ou Espace)
pub fn is_activate_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
    } else {
        false
    }
}

/// Vérifie si l'événement est 'f' (étoile des favoris)
pub fn is_favorite_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('f') | KeyCode::Char('F'))
    } else {
        false
    }
}

/// Vérifie si l'événement est 'r' (recharger les données)
pub fn is_reload_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
    } else {
        false
    }
}

/// Position (colonne, ligne) d'un clic
pub fn click_position(event: &Event) -> Option<(u16, u16)> {
    if let Event::Click(mouse) = event {
        Some((mouse.column, mouse.row))
    } else {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_activate_and_favorite_are_distinct() {
        assert!(is_activate_event(&key(KeyCode::Enter)));
        assert!(is_activate_event(&key(KeyCode::Char(' '))));
        assert!(!is_activate_event(&key(KeyCode::Char('f'))));

        assert!(is_favorite_event(&key(KeyCode::Char('f'))));
        assert!(!is_favorite_event(&key(KeyCode::Enter)));
    }

    #[test]
    fn test_convert_left_click_only() {
        let down = convert(CrosstermEvent::Mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            12,
            5,
        )));
        assert_eq!(click_position(&down), Some((12, 5)));

        let up = convert(CrosstermEvent::Mouse(mouse(
            MouseEventKind::Up(MouseButton::Left),
            12,
            5,
        )));
        assert_eq!(click_position(&up), None);

        let right = convert(CrosstermEvent::Mouse(mouse(
            MouseEventKind::Down(MouseButton::Right),
            1,
            1,
        )));
        assert!(matches!(right, Event::Tick));
    }

    #[test]
    fn test_convert_ignores_key_release() {
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty());
        release.kind = KeyEventKind::Release;

        assert!(matches!(convert(CrosstermEvent::Key(release)), Event::Tick));
        assert!(matches!(convert(CrosstermEvent::Resize(80, 24)), Event::Tick));
    }
}
