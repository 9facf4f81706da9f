// ============================================================================
// Colonnes - Mise en page déclarative d'une ligne
// ============================================================================
// Une ligne de carte est une suite ordonnée de colonnes. Chaque colonne a un
// contenu et des drapeaux (centré, empilé, aligné à droite).
//
// CONCEPTS RUST :
// 1. Enums : remplacent les listes de classes CSS conditionnelles
// 2. Fonctions pures : drapeaux → variante de style, testables sans rendu
//
// CONCEPTS RATATUI :
// 1. Constraint::Ratio(1, n) : largeur égale pour chaque colonne
// 2. Sparkline : mini-graphique dans une seule ligne de texte
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Sparkline},
    Frame,
};

/// Identifiant d'une colonne de la carte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnId {
    Title,
    Chart,
    Volume,
    Price,
}

/// Placement horizontal du contenu dans la colonne
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Start,
    Center,
    End,
}

/// Disposition des éléments du contenu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Tous les éléments sur une seule ligne
    Inline,
    /// Un élément par ligne (colonne verticale)
    Stacked,
}

/// Drapeaux optionnels d'une colonne
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnFlags {
    pub center: bool,
    pub stacked: bool,
    pub end: bool,
}

impl ColumnFlags {
    pub fn centered() -> Self {
        Self { center: true, ..Self::default() }
    }

    /// Règle de placement : "end" l'emporte sur "center"
    pub fn placement(&self) -> Placement {
        if self.end {
            Placement::End
        } else if self.center {
            Placement::Center
        } else {
            Placement::Start
        }
    }

    pub fn flow(&self) -> Flow {
        if self.stacked {
            Flow::Stacked
        } else {
            Flow::Inline
        }
    }
}

impl Placement {
    pub fn alignment(self) -> Alignment {
        match self {
            Placement::Start => Alignment::Left,
            Placement::Center => Alignment::Center,
            Placement::End => Alignment::Right,
        }
    }
}

/// Contenu d'une colonne
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnContent {
    /// Segments de texte (une ligne chacun en mode Stacked)
    Text(Vec<Line<'static>>),

    /// Miniature sparkline
    /// - reference : URL de la miniature dérivée de l'icône
    /// - samples : valeurs normalisées pour le widget Sparkline
    Thumbnail { reference: String, samples: Vec<u64> },

    /// Rien à afficher
    Empty,
}

/// Une colonne de la ligne
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: ColumnId,
    pub content: ColumnContent,
    pub flags: ColumnFlags,
}

impl Column {
    pub fn new(id: ColumnId, content: ColumnContent, flags: ColumnFlags) -> Self {
        Self { id, content, flags }
    }

    /// Lignes de texte telles qu'elles seront dessinées
    ///
    /// CONCEPT : Flow
    /// - Inline : les segments sont fusionnés sur une ligne
    /// - Stacked : un segment par ligne
    pub fn lines(&self) -> Vec<Line<'static>> {
        let segments = match &self.content {
            ColumnContent::Text(segments) => segments,
            _ => return Vec::new(),
        };

        match self.flags.flow() {
            Flow::Stacked => segments.clone(),
            Flow::Inline => {
                let spans: Vec<Span<'static>> = segments
                    .iter()
                    .flat_map(|line| line.spans.iter().cloned())
                    .collect();
                vec![Line::from(spans)]
            }
        }
    }

    /// Lignes ajustées à la largeur de la colonne (voir fit_line)
    pub fn fitted_lines(&self, width: u16) -> Vec<Line<'static>> {
        self.lines()
            .into_iter()
            .map(|line| fit_line(line, width))
            .collect()
    }
}

/// Marqueur de texte tronqué
pub const ELLIPSIS: &str = "…";

/// Tronque une ligne trop large et termine par "…"
///
/// Un montant coupé sans marqueur ressemblerait à un montant valide
/// ("$50,000." au lieu de "$50,000.00").
pub fn fit_line(line: Line<'static>, width: u16) -> Line<'static> {
    let width = width as usize;
    if line.width() <= width {
        return line;
    }
    if width == 0 {
        return Line::default();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut spans = Vec::new();
    let mut last_style = Style::default();

    for span in line.spans {
        let mut kept = String::new();
        let mut full = false;
        for c in span.content.chars() {
            let char_width = Span::raw(c.to_string()).width();
            if used + char_width > budget {
                full = true;
                break;
            }
            kept.push(c);
            used += char_width;
        }

        last_style = span.style;
        if !kept.is_empty() {
            spans.push(Span::styled(kept, span.style));
        }
        if full {
            break;
        }
    }

    spans.push(Span::styled(ELLIPSIS, last_style));
    Line::from(spans)
}

/// Découpe une ligne en `count` colonnes de largeur égale
pub fn column_areas(row: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }

    let constraints: Vec<Constraint> = (0..count)
        .map(|_| Constraint::Ratio(1, count as u32))
        .collect();

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(row)
        .to_vec()
}

/// Dessine une colonne dans sa zone
pub fn render_column(frame: &mut Frame, column: &Column, area: Rect) {
    match &column.content {
        ColumnContent::Text(_) => {
            let paragraph = Paragraph::new(column.fitted_lines(area.width))
                .alignment(column.flags.placement().alignment());
            frame.render_widget(paragraph, area);
        }
        ColumnContent::Thumbnail { samples, .. } => {
            let area = thumbnail_area(area, samples.len(), column.flags.placement());
            let sparkline = Sparkline::default()
                .data(samples)
                .style(Style::default().fg(Color::Gray));
            frame.render_widget(sparkline, area);
        }
        ColumnContent::Empty => {}
    }
}

/// Zone occupée par la miniature, placée selon les drapeaux
fn thumbnail_area(area: Rect, samples: usize, placement: Placement) -> Rect {
    let width = (samples as u16).min(area.width);
    let x = match placement {
        Placement::Start => area.x,
        Placement::Center => area.x + (area.width - width) / 2,
        Placement::End => area.x + area.width - width,
    };

    Rect::new(x, area.y, width, area.height.min(2))
}

// ============================================================================
// Tests unitaires
// ============================================================================
