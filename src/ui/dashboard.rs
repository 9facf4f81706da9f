// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine le header, la pile de cartes et le footer
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones
// 3. Chaque carte se dessine dans la zone calculée par stack_layout()
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{stack_layout, App};
use crate::ui::card::render_card;
use crate::ui::chart::{ChartRenderer, LineChartRenderer};

/// Dessine l'interface complète avec le graphique ligne par défaut
pub fn render(frame: &mut Frame, app: &App) {
    render_with(frame, app, &LineChartRenderer::default());
}

/// Dessine l'interface avec un rendu de graphique donné
pub fn render_with(frame: &mut Frame, app: &App, renderer: &dyn ChartRenderer) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    render_cards(frame, app, chunks[1], renderer);
    render_footer(frame, app, chunks[2]);
}

/// Zone occupée par la pile de cartes pour un écran de taille donnée
///
/// Utilisée aussi par la boucle principale pour le hit-testing des clics.
pub fn cards_area(size: Rect) -> Rect {
    create_layout(size)[1]
}

/// Crée le layout principal (header, cartes, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header : 3 lignes
            Constraint::Min(0),    // Cartes : tout le reste
            Constraint::Length(3), // Footer : 3 lignes
        ])
        .split(area)
        .to_vec()
}

/// Dessine le header avec le titre et la devise
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" LazyCoin ")
        .title_alignment(Alignment::Center);

    let text = vec![Line::from(vec![
        Span::styled(
            "Crypto prices",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", app.currency.to_uppercase()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} favori(s)", app.favorites.len()),
            Style::default().fg(Color::Gray),
        ),
    ])];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Dessine les cartes visibles
fn render_cards(frame: &mut Frame, app: &App, area: Rect, renderer: &dyn ChartRenderer) {
    if app.cards.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("Aucune crypto à afficher", Style::default().fg(Color::Gray))),
        ];
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
        return;
    }

    for (index, card_area) in stack_layout(area, app) {
        let props = app.card_props(index);
        render_card(frame, card_area, &app.cards[index], &props, renderer);
    }
}

/// Dessine le footer avec les raccourcis (ou le message de statut)
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key = |label: &'static str| {
        Span::styled(label, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    };

    let line = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else if let Some(message) = &app.status_message {
        Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red)))
    } else {
        Line::from(vec![
            key("[q]"),
            Span::raw(" Quit  "),
            key("[↑↓ / j k]"),
            Span::raw(" Navigate  "),
            key("[Enter / clic]"),
            Span::raw(" Chart  "),
            key("[f / ★]"),
            Span::raw(" Favorite  "),
            key("[r]"),
            Span::raw(" Reload"),
        ])
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests unitaires
// ============================================================================
