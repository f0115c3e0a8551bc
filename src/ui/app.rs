//! Main application for the tic-tac-toe GUI
//!
//! Layout: a mode bar on top, the board in the middle with the result banner
//! above it once the game ends, the engine's view of the position on the
//! right and a one-line status bar at the bottom.

use eframe::egui;
use egui::{Align, CentralPanel, Color32, Context, CornerRadius, Frame, Grid, Layout, RichText, SidePanel, TopBottomPanel};

use super::board_view::BoardView;
use super::game_state::{GameMode, GameResult, GameState, Outcome};
use super::theme::*;
use crate::{Board, Mark, MoveResult, MoveSource, Pos};

const PANEL_FILL: Color32 = Color32::from_rgb(28, 30, 34);
const SECTION_FILL: Color32 = Color32::from_rgb(38, 41, 46);

/// Main tic-tac-toe application
pub struct TicTacToeApp {
    state: GameState,
    board_view: BoardView,
    show_engine: bool,
}

impl Default for TicTacToeApp {
    fn default() -> Self {
        Self {
            state: GameState::new(GameMode::default()),
            board_view: BoardView::default(),
            show_engine: true,
        }
    }
}

fn mark_color(mark: Mark) -> Color32 {
    match mark {
        Mark::X => X_MARK,
        Mark::O => O_MARK,
        Mark::Empty => TEXT_MUTED,
    }
}

fn outcome_text(outcome: Outcome) -> (String, Color32) {
    match outcome {
        Outcome::Win(mark) => (format!("{} wins", mark.symbol()), mark_color(mark)),
        Outcome::Draw => ("Draw".to_string(), TEXT_SECONDARY),
    }
}

fn source_text(source: MoveSource) -> &'static str {
    match source {
        MoveSource::GameOver => "game over",
        MoveSource::Cached => "from cache",
        MoveSource::Rebuilt => "fresh search",
        MoveSource::DeadEnd => "no move",
    }
}

/// Cell name in row-major reading order, e.g. "top left"
fn cell_name(pos: Pos) -> String {
    let row = ["top", "middle", "bottom"][pos.row as usize];
    let col = ["left", "center", "right"][pos.col as usize];
    if row == "middle" && col == "center" {
        "center".to_string()
    } else {
        format!("{row} {col}")
    }
}

/// Titled block inside the engine panel
fn section(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    Frame::new()
        .fill(SECTION_FILL)
        .corner_radius(CornerRadius::same(6))
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).size(10.0).color(TEXT_MUTED));
            ui.add_space(4.0);
            add_contents(ui);
        });
}

fn stat_row(ui: &mut egui::Ui, name: &str, value: String) {
    ui.label(RichText::new(name).size(11.0).color(TEXT_MUTED));
    ui.label(RichText::new(value).size(11.0).color(TEXT_PRIMARY));
    ui.end_row();
}

impl TicTacToeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn start(&mut self, mode: GameMode) {
        self.state = GameState::new(mode);
    }

    /// Mode switcher and panel toggle
    fn render_mode_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("mode_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("X").strong().color(X_MARK));
                ui.label(RichText::new("O").strong().color(O_MARK));
                ui.add_space(8.0);

                let mode = self.state.mode;
                let choices = [
                    ("Play X", GameMode::PvE { human: Mark::X }),
                    ("Play O", GameMode::PvE { human: Mark::O }),
                    ("Two players", GameMode::PvP { show_suggestions: false }),
                ];
                for (label, choice) in choices {
                    let active = match (mode, choice) {
                        (GameMode::PvE { human: a }, GameMode::PvE { human: b }) => a == b,
                        (GameMode::PvP { .. }, GameMode::PvP { .. }) => true,
                        _ => false,
                    };
                    if ui.selectable_label(active, label).clicked() {
                        self.start(choice);
                    }
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.checkbox(&mut self.show_engine, "Engine (E)");
                });
            });
        });
    }

    /// Side to move or final result, timer, move count and any message
    fn render_status_bar(&self, ctx: &Context) {
        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let (text, color) = match (self.state.game_over, self.state.ai_thinking_elapsed()) {
                    (Some(result), _) => outcome_text(result.outcome),
                    (None, Some(elapsed)) => (format!("Engine thinking {:.1}s", elapsed.as_secs_f32()), TIMER_WARNING),
                    (None, None) => {
                        let turn = self.state.current_turn();
                        (format!("{} to move", turn.symbol()), mark_color(turn))
                    }
                };
                ui.label(RichText::new(text).strong().color(color));

                if let Some(msg) = &self.state.message {
                    ui.separator();
                    ui.label(RichText::new(msg).color(TIMER_WARNING));
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let elapsed = self.state.move_timer.elapsed().as_secs_f32();
                    ui.label(RichText::new(format!("{elapsed:.1}s")).color(TIMER_NORMAL));
                    ui.separator();
                    ui.label(
                        RichText::new(format!("ply {}", self.state.move_history.len())).color(TEXT_SECONDARY),
                    );
                });
            });
        });
    }

    /// The engine's view of the game: hint, predicted result, last search
    fn render_engine_panel(&mut self, ctx: &Context) {
        SidePanel::right("engine_panel")
            .min_width(220.0)
            .max_width(260.0)
            .frame(Frame::new().fill(PANEL_FILL).inner_margin(10.0))
            .show(ctx, |ui| {
                ui.label(RichText::new("ENGINE").size(16.0).strong().color(TEXT_PRIMARY));
                let plays = match self.state.mode {
                    GameMode::PvE { human } => format!("plays {}", human.opponent().symbol()),
                    GameMode::PvP { .. } => "advises both sides".to_string(),
                };
                ui.label(RichText::new(plays).size(11.0).color(TEXT_SECONDARY));
                ui.add_space(10.0);

                self.render_hint_section(ui);
                ui.add_space(8.0);

                section(ui, "LAST ANSWER", |ui| match &self.state.last_ai_result {
                    Some(result) => Self::render_answer(ui, result),
                    None => {
                        ui.label(RichText::new("none yet").size(11.0).color(TEXT_MUTED));
                    }
                });

                if let Some(cached) = self.state.cached_positions() {
                    ui.add_space(6.0);
                    ui.label(RichText::new(format!("{cached} positions cached")).size(10.0).color(TEXT_MUTED));
                }
            });
    }

    fn render_hint_section(&mut self, ui: &mut egui::Ui) {
        section(ui, "HINT", |ui| {
            match self.state.suggested_move {
                Some(pos) => {
                    let turn = self.state.current_turn();
                    ui.label(
                        RichText::new(format!("{} to the {}", turn.symbol(), cell_name(pos)))
                            .size(13.0)
                            .strong()
                            .color(mark_color(turn)),
                    );
                }
                None => {
                    ui.label(RichText::new("no hint shown").size(11.0).color(TEXT_MUTED));
                }
            }

            if let Some(outcome) = self.state.predicted_outcome {
                let (text, color) = outcome_text(outcome);
                ui.label(RichText::new(format!("Best play ends: {text}")).size(11.0).color(color));
            }

            if let GameMode::PvP { .. } = self.state.mode {
                ui.add_space(6.0);
                let idle = self.state.game_over.is_none() && !self.state.is_ai_thinking();
                if ui.add_enabled(idle, egui::Button::new("Suggest a move (H)")).clicked() {
                    self.state.request_suggestion();
                }
            }
        });
    }

    fn render_answer(ui: &mut egui::Ui, result: &MoveResult<Board>) {
        Grid::new("last_answer").num_columns(2).spacing([12.0, 2.0]).show(ui, |ui| {
            stat_row(ui, "source", source_text(result.source).to_string());
            stat_row(ui, "time", format!("{} ms", result.time_ms));
            if let Some(build) = &result.build {
                stat_row(ui, "nodes", build.nodes.to_string());
                stat_row(ui, "cutoffs", build.cutoffs.to_string());
                stat_row(ui, "cached", build.cached.to_string());
                if let Some(value) = build.root_value {
                    stat_row(ui, "value", value.to_string());
                }
            }
        });
    }

    /// Result banner shown above the board once the game is decided
    fn render_result_banner(&mut self, ui: &mut egui::Ui, result: GameResult) {
        let (text, color) = outcome_text(result.outcome);
        Frame::new()
            .fill(SECTION_FILL)
            .corner_radius(CornerRadius::same(6))
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(text).size(18.0).strong().color(color));
                    if result.winning_line.is_some() {
                        ui.label(RichText::new("three in a row").size(11.0).color(WIN_HIGHLIGHT));
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Play again (N)").clicked() {
                            self.state.reset();
                        }
                    });
                });
            });
        ui.add_space(6.0);
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            if let Some(result) = self.state.game_over {
                self.render_result_banner(ui, result);
            }

            let winning_line = self.state.game_over.as_ref().and_then(|r| r.winning_line);
            let clicked = self.board_view.show(
                ui,
                &self.state.board,
                self.state.last_move,
                self.state.suggested_move,
                winning_line,
                self.state.game_over.is_some(),
            );

            if let Some(pos) = clicked {
                if let Err(msg) = self.state.try_place(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// E engine panel, H hint, U undo, N new game
    fn handle_input(&mut self, ctx: &Context) {
        let (engine, hint, undo, new_game) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::E),
                i.key_pressed(egui::Key::H),
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::N),
            )
        });

        if engine {
            self.show_engine = !self.show_engine;
        }
        if hint && matches!(self.state.mode, GameMode::PvP { .. }) {
            self.state.request_suggestion();
        }
        if undo {
            self.state.undo();
        }
        if new_game {
            self.state.reset();
        }
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_ai_result();
        if self.state.is_ai_turn() && !self.state.is_ai_thinking() && self.state.game_over.is_none() {
            self.state.start_ai_thinking();
        }

        self.render_mode_bar(ctx);
        self.render_status_bar(ctx);
        if self.show_engine {
            self.render_engine_panel(ctx);
        }
        self.render_board(ctx);

        // Keep the move timer ticking and poll the worker
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_names_read_like_the_board() {
        assert_eq!(cell_name(Pos::new(0, 0)), "top left");
        assert_eq!(cell_name(Pos::new(1, 1)), "center");
        assert_eq!(cell_name(Pos::new(1, 2)), "middle right");
        assert_eq!(cell_name(Pos::new(2, 1)), "bottom center");
    }

    #[test]
    fn test_outcome_text_uses_winner_color() {
        assert_eq!(outcome_text(Outcome::Win(Mark::O)), ("O wins".to_string(), O_MARK));
        assert_eq!(outcome_text(Outcome::Draw).0, "Draw");
    }
}
