use std::error::Error;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::app::App;
use crate::components::ComponentRegistry;
use crate::logging;

mod event_loop;
mod headless;
mod settings;

pub use event_loop::handle_key_event;
pub use headless::{HeadlessError, TextReport, list_components, print_report, text_report};

/// Load settings, install logging and build the component registry.
///
/// Returns the registry and the plugin libraries that failed to load.
fn start() -> (ComponentRegistry, Vec<String>) {
    let (settings, warnings) = settings::load_settings();
    for warning in &warnings {
        eprintln!("spotify-analyzer: {warning}");
    }
    if let Err(e) = logging::init(&settings) {
        eprintln!("spotify-analyzer: logging disabled: {e}");
    }

    for warning in &warnings {
        warn!("{warning}");
    }

    ComponentRegistry::from_settings(&settings)
}

/// Run the terminal UI, loading `dir` first when given.
pub fn run(dir: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let (registry, plugin_errors) = start();
    let mut app = App::new(registry);

    if let Some(dir) = dir {
        app.load(&dir);
    }
    if !plugin_errors.is_empty() {
        app.show_warning(format!("Error loading components: {plugin_errors:?}"));
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
