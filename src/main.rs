//! Tic-tac-toe GUI
//!
//! Play against the minimax engine or hot-seat with engine hints.
//! Set `RUST_LOG=minimax=debug` to see search statistics.

use minimax::ui::TicTacToeApp;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 560.0])
            .with_min_inner_size([640.0, 440.0])
            .with_title("Tic-Tac-Toe - Minimax"),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(|cc| Ok(Box::new(TicTacToeApp::new(cc)))),
    )
}
