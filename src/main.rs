mod app;

use app::{AppScreen, DictionaryApp};
use dictionary_app::config::{self, CONFIG_FILE};
use dictionary_app::database::db::init_database;
use dictionary_app::logging::init_tracing;
use dictionary_app::lookup::{DictionaryClient, LookupDispatcher};
use dictionary_app::models::BookmarkStore;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

fn main() -> eframe::Result<()> {
    let (config, config_error) = config::load_or_default(CONFIG_FILE);
    init_tracing(&config.log_level);
    if let Some(e) = config_error {
        warn!(error = %e, "using default configuration");
    }

    let conn = init_database(&config.database_path).expect("Failed to initialize database");
    let bookmarks = BookmarkStore::load(Arc::new(Mutex::new(conn)));
    info!(
        count = bookmarks.len(),
        database = %config.database_path.display(),
        "loaded bookmarks"
    );

    let client =
        DictionaryClient::from_config(&config).expect("Failed to create dictionary client");

    let initial_screen = AppScreen::from_path(&config.initial_route).unwrap_or_else(|| {
        warn!(route = %config.initial_route, "unknown initial route, opening the dictionary");
        AppScreen::Dictionary
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([600.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "English Dictionary",
        options,
        Box::new(move |cc| {
            let lookups =
                LookupDispatcher::new(Arc::new(client)).with_repaint(cc.egui_ctx.clone());
            Ok(Box::new(DictionaryApp::new(bookmarks, lookups, initial_screen)))
        }),
    )
}
