// ============================================================================
// LazyCoin - Dashboard de prix crypto dans le terminal
// ============================================================================
// Affiche une carte par crypto (prix, volume, variation 24h, miniature) ;
// chaque carte se déplie pour afficher l'historique 7 jours.
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendering
// 3. Logging vers fichier : stdout appartient au TUI
// ============================================================================

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use lazycoin::app::App;
use lazycoin::config::Config;
use lazycoin::models::CoinSnapshot;
use lazycoin::source::{demo_markets, load_markets};
use lazycoin::ui::dashboard::cards_area;
use lazycoin::ui::events::{
    click_position, is_activate_event, is_down_event, is_favorite_event, is_quit_event,
    is_reload_event, is_up_event, Event, EventHandler,
};
use lazycoin::ui::render;

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place
// - Rotation quotidienne automatique des logs
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// CONCEPT RUST : Tracing subscriber
/// - Registry : point central des logs
/// - Layer : transforme et route les logs
/// - EnvFilter : filtre par niveau (RUST_LOG env var)
/// - RollingFileAppender : rotation automatique
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ~/.local/share/lazycoin/logs/lazycoin.log
///
/// # Contrôler le niveau de log
/// RUST_LOG=lazycoin=trace cargo run
/// ```
fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = &config.log_dir;

    // Crée le répertoire s'il n'existe pas
    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "lazycoin.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender) // Écrit dans le fichier
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour lazycoin, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazycoin=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = Config::from_env().context("Configuration invalide")?;

    // Logging avant tout le reste ; si l'init échoue, on continue sans logs
    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(currency = %config.currency, markets = ?config.markets_path, "LazyCoin starting up");

    let snapshots = load_snapshots(&config)?;

    let mut app = App::with_snapshots(&config.currency, snapshots);
    for id in &config.favorites {
        app.set_favorite(id);
    }

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, &config);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

/// Charge les snapshots : fichier configuré ou jeu de démo
fn load_snapshots(config: &Config) -> Result<Vec<CoinSnapshot>> {
    match &config.markets_path {
        Some(path) => load_markets(path),
        None => {
            info!("No markets file configured, using demo data");
            Ok(demo_markets())
        }
    }
}

// ============================================================================
// Event Loop
// ============================================================================
// CONCEPT : Render → Input → Update
// - Tout est synchrone : chaque événement est traité avant le redraw suivant
// ============================================================================

/// Exécute la boucle principale de l'application
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    config: &Config,
) -> Result<()> {
    while app.is_running() {
        // 1. RENDER : Dessine l'interface
        terminal.draw(|frame| render(frame, app))?;

        // 2. INPUT : Traite les événements
        let event = events.next()?;
        let area = cards_area(terminal.size()?);
        handle_event(app, event, area, config);
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Guard clauses (if) pour filtrer les événements
/// - `cards_area` : zone de la pile de cartes pour le hit-testing des clics
fn handle_event(app: &mut App, event: Event, cards_area: ratatui::layout::Rect, config: &Config) {
    match event {
        Event::Key(_) if is_quit_event(&event) => {
            // Touche 'q' : quit confirmation two-step
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        Event::Key(_) if is_up_event(&event) => {
            app.cancel_quit();
            app.navigate_up();
        }

        Event::Key(_) if is_down_event(&event) => {
            app.cancel_quit();
            app.navigate_down();
        }

        // Entrée / Espace : activation de la ligne (ouvre/ferme la carte)
        Event::Key(_) if is_activate_event(&event) => {
            app.cancel_quit();
            app.toggle_selected();
        }

        // 'f' : activation de l'étoile (favori), la carte ne bouge pas
        Event::Key(_) if is_favorite_event(&event) => {
            app.cancel_quit();
            app.favorite_selected();
        }

        // 'r' : recharge les snapshots en gardant l'état des cartes
        Event::Key(_) if is_reload_event(&event) => {
            app.cancel_quit();
            match load_snapshots(config) {
                Ok(snapshots) => {
                    app.status_message = None;
                    app.replace_snapshots(snapshots);
                }
                Err(e) => {
                    error!(error = ?e, "Failed to reload markets");
                    app.status_message = Some(format!("Rechargement impossible : {:#}", e));
                }
            }
        }

        Event::Click(_) => {
            app.cancel_quit();
            if let Some((x, y)) = click_position(&event) {
                let outcome = app.click_at(cards_area, x, y);
                debug!(x, y, ?outcome, "Mouse click");
            }
        }

        Event::Key(_) => {
            // Toute autre touche : annule la confirmation si active
            app.cancel_quit();
        }

        Event::Tick => {}
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI (raw mode, alternate screen, souris)
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    Ok(())
}
