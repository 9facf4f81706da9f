// ============================================================================
// CoinCard - Carte dépliable d'une crypto
// ============================================================================
// Une ligne résumé (favori, nom, symbole, miniature, volume, prix, variation)
// qui se déplie pour afficher le graphique détaillé sur 7 jours.
//
// CONCEPTS RUST :
// 1. Enum pour state machine : CardState (Collapsed ⇄ Expanded)
// 2. Closures en paramètre : impl FnMut(&str) pour remonter le favori
// 3. Trait objects : &dyn ChartRenderer pour le graphique détaillé
//
// CONCEPTS RATATUI :
// 1. Block avec bordures partielles : la carte ouverte "coule" dans le détail
// 2. Padding : marge intérieure horizontale
// 3. Frame::render_widget : chaque colonne est un widget indépendant
// ============================================================================

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
    Frame,
};
use tracing::debug;

use crate::models::{format_change, format_currency, CoinSnapshot};
use crate::ui::chart::ChartRenderer;
use crate::ui::columns::{
    column_areas, render_column, Column, ColumnContent, ColumnFlags, ColumnId, Placement,
};
use crate::ui::detail::{detail_series, DetailPoint};

/// Hauteur de la ligne résumé (bordures + 2 lignes de contenu)
pub const SUMMARY_HEIGHT: u16 = 4;

/// Hauteur du panneau détaillé quand la carte est ouverte
pub const DETAIL_HEIGHT: u16 = 14;

/// Marge intérieure horizontale de la ligne résumé
const ROW_PADDING: u16 = 2;

/// Largeur de la zone cliquable de l'étoile ("★" + espace)
const STAR_HIT_WIDTH: u16 = 2;

/// Nombre de barres de la miniature sparkline
const THUMBNAIL_WIDTH: usize = 24;

const STAR: &str = "★";

// ============================================================================
// State machine
// ============================================================================

/// État d'une carte
///
/// CONCEPT : State machine à deux états
/// - Collapsed : état initial
/// - Expanded : graphique détaillé visible
/// - Une seule transition : toggle (dans les deux sens)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardState {
    #[default]
    Collapsed,
    Expanded,
}

impl CardState {
    pub fn toggled(self) -> Self {
        match self {
            CardState::Collapsed => CardState::Expanded,
            CardState::Expanded => CardState::Collapsed,
        }
    }
}

/// Zone de la carte touchée par un clic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardHit {
    /// L'étoile des favoris (dans la colonne titre)
    FavoriteStar,
    /// N'importe où ailleurs sur la ligne résumé
    Row,
}

/// Résultat d'une activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    FavoriteToggled,
    ExpandedToggled,
}

// ============================================================================
// Règles de style
// ============================================================================

/// Style de la variation 24h
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStyle {
    Neutral,
    Positive,
    Negative,
}

impl ChangeStyle {
    /// P == 0 → Neutral, P > 0 → Positive, P < 0 → Negative
    /// Valeur absente → Neutral
    pub fn from_change(change: Option<f64>) -> Self {
        match change {
            Some(p) if p > 0.0 => ChangeStyle::Positive,
            Some(p) if p < 0.0 => ChangeStyle::Negative,
            _ => ChangeStyle::Neutral,
        }
    }

    pub fn style(self) -> Style {
        match self {
            ChangeStyle::Neutral => Style::default(),
            ChangeStyle::Positive => Style::default().fg(Color::Green),
            ChangeStyle::Negative => Style::default().fg(Color::Red),
        }
    }
}

/// Style de la ligne résumé selon l'état de la carte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    /// Carte fermée : bordure arrondie complète, fond au repos
    Resting,
    /// Carte ouverte : bordure ouverte en bas, fond surélevé
    Raised,
}

impl RowStyle {
    pub fn for_state(state: CardState) -> Self {
        match state {
            CardState::Collapsed => RowStyle::Resting,
            CardState::Expanded => RowStyle::Raised,
        }
    }

    pub fn borders(self) -> Borders {
        match self {
            RowStyle::Resting => Borders::ALL,
            RowStyle::Raised => Borders::TOP | Borders::LEFT | Borders::RIGHT,
        }
    }

    pub fn background(self) -> Color {
        match self {
            RowStyle::Resting => Color::Rgb(24, 24, 27),
            RowStyle::Raised => Color::Rgb(39, 39, 42),
        }
    }
}

// ============================================================================
// Props et structure CoinCard
// ============================================================================

/// Paramètres fournis par le parent à chaque rendu
#[derive(Debug, Clone, Copy)]
pub struct CardProps<'a> {
    /// Code devise d'affichage (ex: "usd")
    pub currency: &'a str,

    /// La crypto est-elle dans les favoris ?
    pub is_favorite: bool,

    /// La carte a-t-elle le focus clavier ?
    pub selected: bool,
}

/// Une carte : le snapshot courant et l'état local
#[derive(Debug, Clone)]
pub struct CoinCard {
    snapshot: CoinSnapshot,
    state: CardState,
}

impl CoinCard {
    /// Crée une carte fermée
    pub fn new(snapshot: CoinSnapshot) -> Self {
        Self {
            snapshot,
            state: CardState::Collapsed,
        }
    }

    pub fn id(&self) -> &str {
        &self.snapshot.id
    }

    pub fn snapshot(&self) -> &CoinSnapshot {
        &self.snapshot
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state == CardState::Expanded
    }

    /// Remplace les données (nouveau rendu du parent), l'état est conservé
    pub fn update_snapshot(&mut self, snapshot: CoinSnapshot) {
        self.snapshot = snapshot;
    }

    /// Ouvre ou ferme la carte
    pub fn toggle_expanded(&mut self) {
        self.state = self.state.toggled();
        debug!(coin = %self.snapshot.id, state = ?self.state, "Card toggled");
    }

    /// Signale au parent que le favori doit basculer
    ///
    /// CONCEPT RUST : impl FnMut(&str)
    /// - Le parent fournit une closure (ex: |id| app.set_favorite(id))
    /// - Appelée exactement une fois, l'état de la carte ne change pas
    pub fn toggle_favorite(&self, mut on_set_favorite: impl FnMut(&str)) {
        debug!(coin = %self.snapshot.id, "Favorite toggled");
        on_set_favorite(&self.snapshot.id);
    }

    /// Traite une activation (clic ou touche) sur la carte
    ///
    /// CONCEPT : Event containment
    /// - L'étoile est traitée en premier et marque l'événement comme traité
    /// - Le handler de la ligne ne tourne que si l'étoile n'est pas touchée
    pub fn click(&mut self, hit: CardHit, on_set_favorite: impl FnMut(&str)) -> ClickOutcome {
        match hit {
            CardHit::FavoriteStar => {
                self.toggle_favorite(on_set_favorite);
                ClickOutcome::FavoriteToggled
            }
            CardHit::Row => {
                self.toggle_expanded();
                ClickOutcome::ExpandedToggled
            }
        }
    }

    /// Hauteur totale de la carte selon son état
    pub fn height(&self) -> u16 {
        match self.state {
            CardState::Collapsed => SUMMARY_HEIGHT,
            CardState::Expanded => SUMMARY_HEIGHT + DETAIL_HEIGHT,
        }
    }

    /// Construit les quatre colonnes de la ligne résumé
    ///
    /// CONCEPT : Rendu déclaratif
    /// - On décrit le contenu et les drapeaux, sans dessiner
    /// - render_card() se charge du dessin, les tests inspectent les colonnes
    pub fn columns(&self, props: &CardProps) -> Vec<Column> {
        let snapshot = &self.snapshot;

        let title = Column::new(
            ColumnId::Title,
            ColumnContent::Text(vec![
                Line::from(Span::styled(STAR, star_style(props.is_favorite))),
                Line::from(" "),
                Line::from(Span::styled(
                    snapshot.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(" "),
                Line::from(Span::styled(
                    snapshot.display_symbol(),
                    Style::default().fg(Color::Gray),
                )),
            ]),
            ColumnFlags::centered(),
        );

        let chart_content = match snapshot.thumbnail_url() {
            Some(reference) => ColumnContent::Thumbnail {
                reference,
                samples: thumbnail_samples(snapshot.sparkline_prices(), THUMBNAIL_WIDTH),
            },
            None => ColumnContent::Empty,
        };
        let chart = Column::new(ColumnId::Chart, chart_content, ColumnFlags::centered());

        let volume = Column::new(
            ColumnId::Volume,
            ColumnContent::Text(vec![
                Line::from(format_currency(snapshot.total_volume, props.currency, 0)),
                Line::from(Span::styled("24h volume", Style::default().fg(Color::Gray))),
            ]),
            ColumnFlags {
                center: true,
                stacked: true,
                end: false,
            },
        );

        let change = snapshot.price_change_percentage_24h;
        let price = Column::new(
            ColumnId::Price,
            ColumnContent::Text(vec![
                Line::from(Span::styled(
                    format_currency(snapshot.current_price, props.currency, 2),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format_change(change),
                    ChangeStyle::from_change(change).style(),
                )),
            ]),
            ColumnFlags {
                center: false,
                stacked: true,
                end: true,
            },
        );

        vec![title, chart, volume, price]
    }

    /// Points du graphique détaillé, datés par rapport à `now`
    pub fn detail_points<Tz>(&self, now: DateTime<Tz>) -> Vec<DetailPoint>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        detail_series(self.snapshot.sparkline_prices(), now)
    }

    /// Détermine quelle partie de la carte se trouve sous (x, y)
    ///
    /// Seule la ligne résumé est cliquable : le panneau détaillé ne
    /// réagit pas. Retourne None hors de la ligne.
    pub fn hit_test(&self, area: Rect, x: u16, y: u16, props: &CardProps) -> Option<CardHit> {
        let summary = summary_area(area);
        if !contains(summary, x, y) {
            return None;
        }

        let inner = row_block(self.state, props.selected).inner(summary);
        let columns = self.columns(props);
        let areas = column_areas(inner, columns.len());

        let title_area = columns
            .iter()
            .zip(areas.iter())
            .find(|(column, _)| column.id == ColumnId::Title)
            .map(|(column, area)| (column, *area));

        if let Some((column, title_area)) = title_area {
            let line_width = column
                .fitted_lines(title_area.width)
                .first()
                .map(|line| line.width() as u16)
                .unwrap_or(0);
            let star_x = title_area.x
                + line_offset(line_width, title_area.width, column.flags.placement());

            if y == title_area.y && x >= star_x && x < star_x + STAR_HIT_WIDTH {
                return Some(CardHit::FavoriteStar);
            }
        }

        Some(CardHit::Row)
    }
}

// ============================================================================
// Rendu
// ============================================================================

/// Dessine la carte, "now" est pris à l'heure locale courante
pub fn render_card(
    frame: &mut Frame,
    area: Rect,
    card: &CoinCard,
    props: &CardProps,
    renderer: &dyn ChartRenderer,
) {
    render_card_at(frame, area, card, props, renderer, Local::now());
}

/// Dessine la carte avec un "now" explicite pour les labels du détail
pub fn render_card_at<Tz>(
    frame: &mut Frame,
    area: Rect,
    card: &CoinCard,
    props: &CardProps,
    renderer: &dyn ChartRenderer,
    now: DateTime<Tz>,
) where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let summary = summary_area(area);
    let block = row_block(card.state, props.selected);
    let inner = block.inner(summary);
    frame.render_widget(block, summary);

    let columns = card.columns(props);
    for (column, column_area) in columns.iter().zip(column_areas(inner, columns.len())) {
        render_column(frame, column, column_area);
    }

    if !card.is_expanded() || area.height <= SUMMARY_HEIGHT {
        return;
    }

    let detail = Rect::new(
        area.x,
        area.y + SUMMARY_HEIGHT,
        area.width,
        area.height - SUMMARY_HEIGHT,
    );
    let detail_block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
        .border_type(BorderType::Rounded)
        .border_style(border_style(props.selected))
        .style(Style::default().bg(RowStyle::Raised.background()));
    let detail_inner = detail_block.inner(detail);
    frame.render_widget(detail_block, detail);

    if detail_inner.height == 0 {
        return;
    }

    // Séparateur entre la ligne résumé et le graphique
    let rule = Paragraph::new(Line::from(Span::styled(
        "─".repeat(detail_inner.width as usize),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(rule, Rect::new(detail_inner.x, detail_inner.y, detail_inner.width, 1));

    let chart_area = Rect::new(
        detail_inner.x,
        detail_inner.y + 1,
        detail_inner.width,
        detail_inner.height - 1,
    );
    let points = card.detail_points(now);
    renderer.render_detail(frame, chart_area, &points);
}

/// Block de la ligne résumé
fn row_block(state: CardState, selected: bool) -> Block<'static> {
    let row_style = RowStyle::for_state(state);

    Block::default()
        .borders(row_style.borders())
        .border_type(BorderType::Rounded)
        .border_style(border_style(selected))
        .padding(Padding::horizontal(ROW_PADDING))
        .style(Style::default().bg(row_style.background()))
}

fn border_style(selected: bool) -> Style {
    if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn star_style(is_favorite: bool) -> Style {
    if is_favorite {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn summary_area(area: Rect) -> Rect {
    Rect::new(area.x, area.y, area.width, area.height.min(SUMMARY_HEIGHT))
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

/// Décalage d'une ligne dans sa zone, identique à celui de Paragraph
fn line_offset(line_width: u16, area_width: u16, placement: Placement) -> u16 {
    match placement.alignment() {
        Alignment::Center => (area_width / 2).saturating_sub(line_width / 2),
        Alignment::Right => area_width.saturating_sub(line_width),
        Alignment::Left => 0,
    }
}

/// Réduit la série à `width` barres normalisées entre 1 et 100
///
/// CONCEPT : Échantillonnage régulier
/// - On prend un point tous les len / width
/// - Le dernier point est toujours le plus récent
fn thumbnail_samples(prices: &[f64], width: usize) -> Vec<u64> {
    if prices.is_empty() || width == 0 {
        return Vec::new();
    }

    let (min, max) = prices
        .iter()
        .fold((f64::MAX, f64::MIN), |(min, max), &p| (min.min(p), max.max(p)));
    let range = max - min;

    let count = width.min(prices.len());
    (0..count)
        .map(|i| {
            let index = if count == 1 {
                prices.len() - 1
            } else {
                i * (prices.len() - 1) / (count - 1)
            };
            let price = prices[index];
            if range > 0.0 {
                1 + ((price - min) / range * 99.0).round() as u64
            } else {
                50
            }
        })
        .collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sparkline7d;
    use crate::ui::chart::LineChartRenderer;
    use crate::ui::columns::ELLIPSIS;
    use chrono::Utc;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::cell::RefCell;

    /// Faux rendu qui enregistre les points demandés
    #[derive(Default)]
    struct RecordingRenderer {
        calls: RefCell<Vec<Vec<DetailPoint>>>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render_detail(&self, _frame: &mut Frame, _area: Rect, points: &[DetailPoint]) {
            self.calls.borrow_mut().push(points.to_vec());
        }
    }

    fn bitcoin() -> CoinSnapshot {
        CoinSnapshot {
            id: "btc".to_string(),
            name: "Bitcoin".to_string(),
            symbol: "btc".to_string(),
            image: "https://assets.coingecko.com/coins/images/1/large/bitcoin.png".to_string(),
            current_price: Some(50000.0),
            total_volume: Some(1e9),
            price_change_percentage_24h: Some(-2.5),
            sparkline_in_7d: Some(Sparkline7d {
                price: (0..168).map(|i| 49000.0 + i as f64 * 10.0).collect(),
            }),
        }
    }

    fn props(is_favorite: bool) -> CardProps<'static> {
        CardProps { currency: "usd", is_favorite, selected: false }
    }

    fn draw(
        card: &CoinCard,
        props: &CardProps,
        renderer: &dyn ChartRenderer,
        height: u16,
    ) -> Buffer {
        draw_with_width(card, props, renderer, 100, height)
    }

    fn draw_with_width(
        card: &CoinCard,
        props: &CardProps,
        renderer: &dyn ChartRenderer,
        width: u16,
        height: u16,
    ) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                render_card_at(frame, area, card, props, renderer, now);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer.content[(y * buffer.area.width + x) as usize].symbol())
            .collect()
    }

    /// Position (x, y) de la première occurrence de `needle`
    fn find(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
        (0..buffer.area.height).find_map(|y| {
            let row = row_text(buffer, y);
            row.find(needle)
                .map(|byte| (row[..byte].chars().count() as u16, y))
        })
    }

    fn cell_fg(buffer: &Buffer, x: u16, y: u16) -> Color {
        buffer.content[(y * buffer.area.width + x) as usize].fg
    }

    #[test]
    fn test_change_style_rule() {
        assert_eq!(ChangeStyle::from_change(Some(0.0)), ChangeStyle::Neutral);
        assert_eq!(ChangeStyle::from_change(Some(-0.0)), ChangeStyle::Neutral);
        assert_eq!(ChangeStyle::from_change(Some(0.01)), ChangeStyle::Positive);
        assert_eq!(ChangeStyle::from_change(Some(-2.5)), ChangeStyle::Negative);
        assert_eq!(ChangeStyle::from_change(None), ChangeStyle::Neutral);
    }

    #[test]
    fn test_row_style_follows_state() {
        assert_eq!(RowStyle::for_state(CardState::Collapsed), RowStyle::Resting);
        assert_eq!(RowStyle::for_state(CardState::Expanded), RowStyle::Raised);
        assert!(!RowStyle::Raised.borders().contains(Borders::BOTTOM));
        assert_eq!(RowStyle::Resting.borders(), Borders::ALL);
    }

    #[test]
    fn test_state_machine() {
        let mut card = CoinCard::new(bitcoin());
        assert_eq!(card.state(), CardState::Collapsed);
        assert_eq!(card.height(), SUMMARY_HEIGHT);

        card.toggle_expanded();
        assert!(card.is_expanded());
        assert_eq!(card.height(), SUMMARY_HEIGHT + DETAIL_HEIGHT);

        card.toggle_expanded();
        assert_eq!(card.state(), CardState::Collapsed);
    }

    #[test]
    fn test_star_click_calls_favorite_once_without_expanding() {
        let mut card = CoinCard::new(bitcoin());
        let mut calls = Vec::new();

        let outcome = card.click(CardHit::FavoriteStar, |id| calls.push(id.to_string()));

        assert_eq!(outcome, ClickOutcome::FavoriteToggled);
        assert_eq!(calls, vec!["btc".to_string()]);
        assert_eq!(card.state(), CardState::Collapsed);
    }

    #[test]
    fn test_row_click_toggles_without_favorite() {
        let mut card = CoinCard::new(bitcoin());
        let mut calls = 0;

        let outcome = card.click(CardHit::Row, |_| calls += 1);

        assert_eq!(outcome, ClickOutcome::ExpandedToggled);
        assert_eq!(calls, 0);
        assert!(card.is_expanded());
    }

    #[test]
    fn test_update_snapshot_keeps_state() {
        let mut card = CoinCard::new(bitcoin());
        card.toggle_expanded();

        let mut fresh = bitcoin();
        fresh.current_price = Some(51000.0);
        card.update_snapshot(fresh);

        assert!(card.is_expanded());
        assert_eq!(card.snapshot().current_price, Some(51000.0));
    }

    #[test]
    fn test_columns_layout() {
        let card = CoinCard::new(bitcoin());
        let columns = card.columns(&props(false));

        let ids: Vec<ColumnId> = columns.iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec![ColumnId::Title, ColumnId::Chart, ColumnId::Volume, ColumnId::Price]
        );

        assert_eq!(columns[0].flags.placement(), Placement::Center);
        assert_eq!(
            columns[2].flags,
            ColumnFlags {
                center: true,
                stacked: true,
                end: false,
            }
        );
        assert_eq!(columns[3].flags.placement(), Placement::End);

        match &columns[1].content {
            ColumnContent::Thumbnail { reference, samples } => {
                assert_eq!(reference, "https://www.coingecko.com/coins/1/sparkline");
                assert_eq!(samples.len(), THUMBNAIL_WIDTH);
            }
            other => panic!("miniature attendue, obtenu {:?}", other),
        }
    }

    #[test]
    fn test_no_thumbnail_without_marker() {
        let mut snapshot = bitcoin();
        snapshot.image = "https://example.com/btc.png".to_string();
        let card = CoinCard::new(snapshot);

        let columns = card.columns(&props(false));
        assert_eq!(columns[1].content, ColumnContent::Empty);

        // Le rendu ne doit pas échouer
        let buffer = draw(&card, &props(false), &LineChartRenderer::default(), 4);
        assert!(find(&buffer, "Bitcoin").is_some());
    }

    #[test]
    fn test_missing_fields_render_empty_segments() {
        let card = CoinCard::new(CoinSnapshot::new("x", "", ""));
        let columns = card.columns(&props(false));

        let price_lines = columns[3].lines();
        assert_eq!(price_lines[0].width(), 0);
        assert_eq!(price_lines[1].width(), 0);

        let buffer = draw(&card, &props(false), &LineChartRenderer::default(), 4);
        assert!(find(&buffer, "24h volume").is_some());
    }

    #[test]
    fn test_render_bitcoin_scenario() {
        let card = CoinCard::new(bitcoin());
        let renderer = RecordingRenderer::default();
        let buffer = draw(&card, &props(false), &renderer, 4);

        assert!(find(&buffer, "Bitcoin").is_some());
        assert!(find(&buffer, "BTC").is_some());
        assert!(find(&buffer, "$1,000,000,000").is_some());
        assert!(find(&buffer, "$50,000.00").is_some());

        let (x, y) = find(&buffer, "-2.5%").unwrap();
        assert_eq!(cell_fg(&buffer, x, y), Color::Red);

        let (x, y) = find(&buffer, STAR).unwrap();
        assert_eq!(cell_fg(&buffer, x, y), Color::DarkGray);

        // Carte fermée : pas de graphique demandé
        assert!(renderer.calls.borrow().is_empty());
    }

    #[test]
    fn test_narrow_card_marks_cut_amounts() {
        let card = CoinCard::new(bitcoin());

        for width in [40, 30] {
            let buffer =
                draw_with_width(&card, &props(false), &LineChartRenderer::default(), width, 4);
            let row = row_text(&buffer, 1);

            assert!(row.matches(ELLIPSIS).count() >= 2, "row: {:?}", row);
            assert!(!row.contains("$1,000,00"), "row: {:?}", row);
            assert!(!row.contains("$50,000.0"), "row: {:?}", row);
        }
    }

    #[test]
    fn test_hit_test_star_on_narrow_card() {
        let card = CoinCard::new(bitcoin());
        let props = props(false);
        let buffer = draw_with_width(&card, &props, &LineChartRenderer::default(), 40, 4);

        let (star_x, star_y) = find(&buffer, STAR).unwrap();
        let area = Rect::new(0, 0, 40, SUMMARY_HEIGHT);
        assert_eq!(
            card.hit_test(area, star_x, star_y, &props),
            Some(CardHit::FavoriteStar)
        );
    }

    #[test]
    fn test_favorite_star_is_yellow() {
        let card = CoinCard::new(bitcoin());
        let buffer = draw(&card, &props(true), &LineChartRenderer::default(), 4);

        let (x, y) = find(&buffer, STAR).unwrap();
        assert_eq!(cell_fg(&buffer, x, y), Color::Yellow);
    }

    #[test]
    fn test_expanded_card_requests_168_points() {
        let mut card = CoinCard::new(bitcoin());
        card.toggle_expanded();

        let renderer = RecordingRenderer::default();
        draw(&card, &props(false), &renderer, SUMMARY_HEIGHT + DETAIL_HEIGHT);

        let calls = renderer.calls.borrow();
        assert_eq!(calls.len(), 1);

        let points = &calls[0];
        assert_eq!(points.len(), 168);
        assert_eq!(points[0].label, "Mon 08 Jan 2024, 1 PM");
        assert_eq!(points[167].label, "Mon 15 Jan 2024, 12 PM");
        assert_eq!(points[167].display_value, "50670.00");
        assert_eq!(points[167].raw_value, 50670.0);
    }

    #[test]
    fn test_expanded_card_without_sparkline_requests_empty_series() {
        let mut snapshot = bitcoin();
        snapshot.sparkline_in_7d = None;
        let mut card = CoinCard::new(snapshot);
        card.toggle_expanded();

        let renderer = RecordingRenderer::default();
        draw(&card, &props(false), &renderer, SUMMARY_HEIGHT + DETAIL_HEIGHT);

        let calls = renderer.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].is_empty());
    }

    #[test]
    fn test_hit_test_star_and_row() {
        let card = CoinCard::new(bitcoin());
        let props = props(false);
        let area = Rect::new(0, 0, 100, SUMMARY_HEIGHT);
        let buffer = draw(&card, &props, &LineChartRenderer::default(), SUMMARY_HEIGHT);

        let (star_x, star_y) = find(&buffer, STAR).unwrap();
        assert_eq!(card.hit_test(area, star_x, star_y, &props), Some(CardHit::FavoriteStar));

        let (name_x, name_y) = find(&buffer, "Bitcoin").unwrap();
        assert_eq!(card.hit_test(area, name_x, name_y, &props), Some(CardHit::Row));

        let (price_x, price_y) = find(&buffer, "$50,000.00").unwrap();
        assert_eq!(card.hit_test(area, price_x, price_y, &props), Some(CardHit::Row));

        assert_eq!(card.hit_test(area, 10, SUMMARY_HEIGHT, &props), None);
    }

    #[test]
    fn test_hit_test_ignores_detail_pane() {
        let mut card = CoinCard::new(bitcoin());
        card.toggle_expanded();
        let area = Rect::new(0, 0, 100, card.height());

        assert_eq!(card.hit_test(area, 50, SUMMARY_HEIGHT + 3, &props(false)), None);
        assert_eq!(card.hit_test(area, 50, 1, &props(false)), Some(CardHit::Row));
    }

    #[test]
    fn test_thumbnail_samples() {
        assert!(thumbnail_samples(&[], 24).is_empty());
        assert_eq!(thumbnail_samples(&[5.0, 5.0], 24), vec![50, 50]);

        let samples = thumbnail_samples(&[0.0, 50.0, 100.0], 3);
        assert_eq!(samples, vec![1, 51, 100]);
    }
}
