// ============================================================================
// Chart - Graphique détaillé d'une carte dépliée
// ============================================================================
// Affiche l'historique 7 jours d'une crypto sous forme de graphique ligne
//
// CONCEPTS RUST :
// 1. Traits : ChartRenderer est le point d'extension entre la carte et le
//    graphique (on peut brancher un autre rendu, ou un faux pour les tests)
// 2. Iterator chaining : transformer les DetailPoint en points (x, y)
// 3. fold : min et max en un seul passage
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne
// 2. Dataset : série de données à afficher
// 3. Axis : configuration des axes X et Y
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::ui::detail::DetailPoint;

/// Collaborateur qui dessine le graphique détaillé
///
/// CONCEPT RUST : Trait object
/// - La carte reçoit un &dyn ChartRenderer
/// - Elle ne connaît que le contrat : une suite de points ordonnés
/// - Aucune valeur de retour n'est consommée
pub trait ChartRenderer {
    /// Dessine les points dans la zone. Une suite vide ne doit pas échouer.
    fn render_detail(&self, frame: &mut Frame, area: Rect, points: &[DetailPoint]);
}

/// Rendu par défaut : graphique ligne ratatui
#[derive(Debug, Clone, Copy, Default)]
pub struct LineChartRenderer;

impl ChartRenderer for LineChartRenderer {
    fn render_detail(&self, frame: &mut Frame, area: Rect, points: &[DetailPoint]) {
        // Si pas de points, affiche un message
        if points.is_empty() {
            render_no_history(frame, area);
            return;
        }

        // Convertit les DetailPoint en points (x, y)
        let data: Vec<(f64, f64)> = points
            .iter()
            .enumerate()
            .map(|(i, point)| (i as f64, point.raw_value))
            .collect();

        let (y_min, y_max) = y_bounds(&data);

        // Couleur selon la tendance sur la période (premier vs dernier point)
        let color = trend_color(points);

        let datasets = vec![Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&data)];

        let x_axis = Axis::default()
            .style(Style::default().fg(Color::Gray))
            .bounds([0.0, (data.len().saturating_sub(1)).max(1) as f64])
            .labels(x_labels(points));

        let y_axis = Axis::default()
            .style(Style::default().fg(Color::Gray))
            .bounds([y_min, y_max])
            .labels(vec![
                Span::raw(format!("{:.2}", y_min)),
                Span::raw(format!("{:.2}", (y_min + y_max) / 2.0)),
                Span::raw(format!("{:.2}", y_max)),
            ]);

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::NONE)
                    .title(chart_title(points))
                    .title_alignment(Alignment::Right),
            )
            .x_axis(x_axis)
            .y_axis(y_axis);

        frame.render_widget(chart, area);
    }
}

/// Bornes de l'axe Y avec une marge de 5%
///
/// Une série plate reçoit une marge arbitraire pour que la ligne reste visible
fn y_bounds(data: &[(f64, f64)]) -> (f64, f64) {
    let (min, max) = data.iter().fold(
        (f64::MAX, f64::MIN),
        |(min, max), &(_x, y)| (min.min(y), max.max(y)),
    );

    let margin = if max > min { (max - min) * 0.05 } else { min.abs().max(1.0) * 0.05 };
    ((min - margin).max(0.0), max + margin)
}

/// Labels de l'axe X : premier, milieu, dernier
fn x_labels(points: &[DetailPoint]) -> Vec<Span<'static>> {
    let middle = points.len() / 2;

    [0, middle, points.len() - 1]
        .iter()
        .map(|&i| Span::raw(points[i].label.clone()))
        .collect()
}

/// Titre : dernier label et dernière valeur affichée
fn chart_title(points: &[DetailPoint]) -> Line<'static> {
    match points.last() {
        Some(last) => Line::from(vec![
            Span::styled(last.label.clone(), Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled(
                last.display_value.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ]),
        None => Line::from(""),
    }
}

fn trend_color(points: &[DetailPoint]) -> Color {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if last.raw_value < first.raw_value => Color::Red,
        _ => Color::Green,
    }
}

/// Affiche un message quand il n'y a pas d'historique à afficher
fn render_no_history(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Pas d'historique 7 jours pour cette crypto",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests unitaires
// ============================================================================
