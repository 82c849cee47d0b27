//! The cooperative tick loop
//!
//! One tick runs the line dispatcher, then the button tracker, then exactly
//! one mode's update, then a display flush. Edges detected in a tick are
//! consumed in that same tick. Nothing blocks except the bounded flash
//! sequences around game deaths and the boot fault indicator; during those
//! no other work exists to run.
//!
//! The controller is the single writer of the current mode. Mode payloads
//! travel by value through [`Controller::step`], mirroring a
//! `transition(self, event) -> Self` state machine, which keeps every
//! handler free to borrow the rest of the controller.

use core::fmt::Write as _;
use core::mem;

use heapless::String;

use crate::clock::ClockFace;
use crate::config::{
    DIFFICULTY_MAX, DIFFICULTY_MIN, FLASH_COUNT, FLASH_OFF_MS, FLASH_ON_MS, RTC_FAULT_SHOW_MS,
    SCORE_SHOW_MS, SNAKE_DEAD_SHOW_MS, TEXT_COLS,
};
use crate::games::{DodgeGame, GameKind, RunnerGame, SnakeGame, Step};
use crate::input::{
    ActivityClock, ButtonEvent, ButtonTracker, Edges, InputSample, Key, LineDispatcher,
};
use crate::rng::XorShift32;
use crate::scores::{self, HighScores};
use crate::settings::{DateEdit, MenuItem, SettingsMenu, TimeEdit};
use crate::state::{Mode, ModeKind, SelectState};
use crate::traits::{Board, Color, DisplayExt, Half, MatrixDisplay, TimeSource};

pub struct Controller {
    mode: Mode,
    dispatcher: LineDispatcher,
    button: ButtonTracker,
    activity: ActivityClock,
    scores: HighScores,
    difficulty: u8,
    saved_difficulty: u8,
    rng: XorShift32,
    face: ClockFace,
}

impl Controller {
    /// Boot sequence: load persisted values (substituting defaults for
    /// anything implausible) and probe the clock chip. A missing chip gets
    /// one full-grid indicator and a fixed pause, then operation continues
    /// on defaults; there is no retry loop.
    pub fn boot<B: Board>(board: &mut B, now: u64, seed: u32) -> Self {
        let difficulty = scores::load_difficulty(board.store());
        let scores = HighScores::load(board.store());

        if board.rtc().now().is_err() {
            let display = board.display();
            display.fill(Color::Red);
            display.flush();
            board.delay_ms(RTC_FAULT_SHOW_MS);
            let display = board.display();
            display.clear();
            display.flush();
        }

        Self {
            mode: Mode::Clock,
            dispatcher: LineDispatcher::new(),
            button: ButtonTracker::new(),
            activity: ActivityClock::new(now),
            scores,
            difficulty,
            saved_difficulty: difficulty,
            rng: XorShift32::new(seed),
            face: ClockFace::new(),
        }
    }

    pub fn mode_kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn high_score(&self, kind: GameKind) -> u16 {
        self.scores.get(kind)
    }

    /// One scheduler tick.
    pub fn tick<B: Board>(&mut self, board: &mut B, sample: &InputSample, now: u64) {
        let edges = self.dispatcher.poll(sample, now, &mut self.activity);

        let long_allowed = self.mode.kind().long_hold_allowed();
        let gesture = self.button.update(sample.button_pressed, now, long_allowed);
        if gesture.is_some() {
            // A release-classified gesture arrives on a tick where the
            // level is already low; still counts as activity.
            self.activity.touch(now);
        }

        if self.timed_out(now) {
            self.leave_to_clock(board);
        }

        let mode = mem::replace(&mut self.mode, Mode::Clock);
        self.mode = self.step(mode, board, &edges, gesture, now);

        board.display().flush();
    }

    fn timed_out(&self, now: u64) -> bool {
        let kind = self.mode.kind();
        let Some(window) = kind.idle_timeout_ms() else {
            return false;
        };
        let idle = if kind.uses_game_activity() {
            self.activity.game_idle_for(now)
        } else {
            self.activity.idle_for(now)
        };
        idle >= window
    }

    /// Fall back to Clock. Leaving the settings menu persists the
    /// difficulty even on timeout; edits in flight are discarded.
    fn leave_to_clock<B: Board>(&mut self, board: &mut B) {
        if self.mode.kind() == ModeKind::Settings {
            self.persist_difficulty(board);
        }
        self.mode = Mode::Clock;
        self.face.invalidate();
    }

    fn persist_difficulty<B: Board>(&mut self, board: &mut B) {
        if self.difficulty != self.saved_difficulty {
            scores::save_difficulty(board.store(), self.difficulty);
            self.saved_difficulty = self.difficulty;
        }
    }

    fn step<B: Board>(
        &mut self,
        mode: Mode,
        board: &mut B,
        edges: &Edges,
        gesture: Option<ButtonEvent>,
        now: u64,
    ) -> Mode {
        match mode {
            Mode::Clock => self.step_clock(board, edges, gesture, now),
            Mode::GameSelect(sel) => self.step_select(sel, board, edges, gesture, now),
            Mode::Settings(menu) => self.step_settings(menu, board, edges, gesture),
            Mode::SetTime(edit) => self.step_set_time(edit, board, edges, gesture),
            Mode::SetDate(edit) => self.step_set_date(edit, board, edges, gesture),
            Mode::Runner(game) => self.step_runner(game, board, edges, now),
            Mode::Dodge(game) => self.step_dodge(game, board, edges, now),
            Mode::Snake(game) => self.step_snake(game, board, edges, now),
        }
    }

    fn enter_game(&mut self, kind: GameKind, now: u64) -> Mode {
        self.activity.touch_game(now);
        match kind {
            GameKind::Runner => Mode::Runner(RunnerGame::new(now, &mut self.rng)),
            GameKind::Dodge => Mode::Dodge(DodgeGame::new(now, &mut self.rng)),
            GameKind::Snake => Mode::Snake(SnakeGame::new(now, &mut self.rng)),
        }
    }

    fn step_clock<B: Board>(
        &mut self,
        board: &mut B,
        edges: &Edges,
        gesture: Option<ButtonEvent>,
        now: u64,
    ) -> Mode {
        if edges.pressed(Key::Game1) {
            return self.enter_game(GameKind::Runner, now);
        }
        if edges.pressed(Key::Game2) {
            return self.enter_game(GameKind::Dodge, now);
        }
        if edges.pressed(Key::Game3) {
            return self.enter_game(GameKind::Snake, now);
        }
        if edges.pressed(Key::Options) || gesture == Some(ButtonEvent::Medium) {
            return Mode::Settings(SettingsMenu::new());
        }
        if gesture == Some(ButtonEvent::Short) {
            return Mode::GameSelect(SelectState::new());
        }

        self.face.update(board, self.difficulty);
        Mode::Clock
    }

    fn step_select<B: Board>(
        &mut self,
        mut sel: SelectState,
        board: &mut B,
        edges: &Edges,
        gesture: Option<ButtonEvent>,
        now: u64,
    ) -> Mode {
        if edges.pressed(Key::Return) {
            self.face.invalidate();
            return Mode::Clock;
        }
        if edges.pressed(Key::Up) || gesture == Some(ButtonEvent::Short) {
            sel.cycle(true);
        }
        if edges.pressed(Key::Down) {
            sel.cycle(false);
        }
        if edges.pressed(Key::Ok) || gesture == Some(ButtonEvent::Long) {
            return self.enter_game(sel.selected, now);
        }

        let display = board.display();
        display.clear();
        display.draw_row(Half::Top, "PLAY", Color::White);
        display.draw_row(Half::Bottom, sel.selected.label(), Color::Yellow);
        Mode::GameSelect(sel)
    }

    fn step_settings<B: Board>(
        &mut self,
        mut menu: SettingsMenu,
        board: &mut B,
        edges: &Edges,
        gesture: Option<ButtonEvent>,
    ) -> Mode {
        if edges.pressed(Key::Return) {
            self.persist_difficulty(board);
            self.face.invalidate();
            return Mode::Clock;
        }
        if edges.pressed(Key::Up) || gesture == Some(ButtonEvent::Short) {
            menu.cycle(true);
        }
        if edges.pressed(Key::Down) {
            menu.cycle(false);
        }
        if edges.pressed(Key::Ok) || gesture == Some(ButtonEvent::Long) {
            match menu.cursor {
                MenuItem::Difficulty => {
                    self.difficulty = if self.difficulty >= DIFFICULTY_MAX {
                        DIFFICULTY_MIN
                    } else {
                        self.difficulty + 1
                    };
                    self.persist_difficulty(board);
                }
                MenuItem::Time => {
                    let now_dt = board.rtc().now().unwrap_or_default();
                    return Mode::SetTime(TimeEdit::staged_from(&now_dt));
                }
                MenuItem::Date => {
                    let now_dt = board.rtc().now().unwrap_or_default();
                    return Mode::SetDate(DateEdit::staged_from(&now_dt));
                }
                MenuItem::Exit => {
                    self.persist_difficulty(board);
                    self.face.invalidate();
                    return Mode::Clock;
                }
            }
        }

        let display = board.display();
        display.clear();
        display.draw_row(Half::Top, menu.cursor.label(), Color::White);
        match menu.cursor {
            MenuItem::Difficulty => {
                let mut value: String<TEXT_COLS> = String::new();
                let _ = write!(value, "{}", self.difficulty);
                display.draw_row(Half::Bottom, &value, Color::Cyan);
            }
            _ => display.draw_row(Half::Bottom, "HOLD OK", Color::Cyan),
        }
        Mode::Settings(menu)
    }

    fn step_set_time<B: Board>(
        &mut self,
        mut edit: TimeEdit,
        board: &mut B,
        edges: &Edges,
        gesture: Option<ButtonEvent>,
    ) -> Mode {
        if edges.pressed(Key::Return) {
            // Discard the staged copy
            return Mode::Settings(SettingsMenu::at(MenuItem::Time));
        }
        if edges.pressed(Key::Up) || gesture == Some(ButtonEvent::Short) {
            edit.step(true);
        }
        if edges.pressed(Key::Down) {
            edit.step(false);
        }
        if edges.pressed(Key::Ok) || gesture == Some(ButtonEvent::Long) {
            if edit.confirm() {
                // Last field confirmed: commit everything in one write
                let mut dt = board.rtc().now().unwrap_or_default();
                edit.apply(&mut dt);
                let _ = board.rtc().set(&dt);
                self.face.invalidate();
                return Mode::Clock;
            }
        }

        draw_field(board.display(), edit.field_label(), edit.field_value());
        Mode::SetTime(edit)
    }

    fn step_set_date<B: Board>(
        &mut self,
        mut edit: DateEdit,
        board: &mut B,
        edges: &Edges,
        gesture: Option<ButtonEvent>,
    ) -> Mode {
        if edges.pressed(Key::Return) {
            return Mode::Settings(SettingsMenu::at(MenuItem::Date));
        }
        if edges.pressed(Key::Up) || gesture == Some(ButtonEvent::Short) {
            edit.step(true);
        }
        if edges.pressed(Key::Down) {
            edit.step(false);
        }
        if edges.pressed(Key::Ok) || gesture == Some(ButtonEvent::Long) {
            if edit.confirm() {
                let mut dt = board.rtc().now().unwrap_or_default();
                edit.apply(&mut dt);
                let _ = board.rtc().set(&dt);
                self.face.invalidate();
                return Mode::Clock;
            }
        }

        draw_field(board.display(), edit.field_label(), edit.field_value());
        Mode::SetDate(edit)
    }

    fn step_runner<B: Board>(
        &mut self,
        mut game: RunnerGame,
        board: &mut B,
        edges: &Edges,
        now: u64,
    ) -> Mode {
        if edges.pressed(Key::Return) {
            self.face.invalidate();
            return Mode::Clock;
        }
        game.handle_input(edges, now);
        if let Step::Died(score) = game.advance(now, &mut self.rng) {
            self.scores.record(GameKind::Runner, score, board.store());
            flash_border(board);
            game = RunnerGame::new(now, &mut self.rng);
        }
        game.draw(board.display());
        Mode::Runner(game)
    }

    fn step_dodge<B: Board>(
        &mut self,
        mut game: DodgeGame,
        board: &mut B,
        edges: &Edges,
        now: u64,
    ) -> Mode {
        if edges.pressed(Key::Return) {
            self.face.invalidate();
            return Mode::Clock;
        }
        game.handle_input(edges);
        if let Step::Died(score) = game.advance(now, &mut self.rng) {
            self.scores.record(GameKind::Dodge, score, board.store());
            flash_border(board);
            game = DodgeGame::new(now, &mut self.rng);
        }
        game.draw(board.display());
        Mode::Dodge(game)
    }

    fn step_snake<B: Board>(
        &mut self,
        mut game: SnakeGame,
        board: &mut B,
        edges: &Edges,
        now: u64,
    ) -> Mode {
        if edges.pressed(Key::Return) {
            self.face.invalidate();
            return Mode::Clock;
        }
        game.handle_input(edges);
        if let Step::Died(score) = game.advance(now, &mut self.rng) {
            self.scores.record(GameKind::Snake, score, board.store());
            snake_death_flash(board, &game, score);
            game = SnakeGame::new(now, &mut self.rng);
        }
        game.draw(board.display());
        Mode::Snake(game)
    }

    #[cfg(test)]
    pub(crate) fn mode_mut(&mut self) -> &mut Mode {
        &mut self.mode
    }
}

fn draw_field<D: MatrixDisplay>(display: &mut D, label: &str, value: u16) {
    let mut text: String<TEXT_COLS> = String::new();
    let _ = write!(text, "{}", value);
    display.clear();
    display.draw_row(Half::Top, label, Color::White);
    display.draw_row(Half::Bottom, &text, Color::Cyan);
}

/// Game-over feedback for runner and dodge: a red border, blinked a fixed
/// number of times. Deliberately blocking; the tick loop resumes after.
fn flash_border<B: Board>(board: &mut B) {
    for _ in 0..FLASH_COUNT {
        let display = board.display();
        display.clear();
        display.border(Color::Red);
        display.flush();
        board.delay_ms(FLASH_ON_MS);

        let display = board.display();
        display.clear();
        display.flush();
        board.delay_ms(FLASH_OFF_MS);
    }
}

/// Snake shows its dead body, then the final score, before resetting.
fn snake_death_flash<B: Board>(board: &mut B, game: &SnakeGame, score: u16) {
    let display = board.display();
    display.clear();
    game.draw_body(display, Color::Red);
    display.flush();
    board.delay_ms(SNAKE_DEAD_SHOW_MS);

    let mut text: String<TEXT_COLS> = String::new();
    let _ = write!(text, "{}", score);
    let display = board.display();
    display.clear();
    display.draw_row(Half::Top, "SCORE", Color::White);
    display.draw_row(Half::Bottom, &text, Color::Yellow);
    display.flush();
    board.delay_ms(SCORE_SHOW_MS);

    let display = board.display();
    display.clear();
    display.flush();
}
