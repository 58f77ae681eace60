use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fmt;
use std::io::Stdout;

use crate::app::{handle_input, App, SurveyStats};
use crate::ui;

// States for the record save pipeline
#[derive(Clone, Copy, PartialEq, Debug)]
enum SaveState {
    Idle,
    Saving,
    Done,
}

impl fmt::Display for SaveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Saving => write!(f, "Saving"),
            Self::Done => write!(f, "Done"),
        }
    }
}

// Events driving the save pipeline
#[derive(Clone, Copy, Debug)]
enum SaveEvent {
    Start,
    Finished,
    Reset,
}

struct SaveMachine {
    state: SaveState,
}

impl SaveMachine {
    const fn new() -> Self {
        Self {
            state: SaveState::Idle,
        }
    }

    const fn state(&self) -> SaveState {
        self.state
    }

    // Process an event, updating the machine and the app's status line.
    // Invalid transitions are dropped.
    fn process_event(&mut self, event: SaveEvent, app: &mut App) {
        self.state = match (self.state, event) {
            (SaveState::Idle, SaveEvent::Start) => {
                app.status_message = "Saving record...".to_string();
                SaveState::Saving
            }
            // Always the plain confirmation: a failed remote sync is logged
            // by the store and the row is kept locally either way.
            (SaveState::Saving, SaveEvent::Finished) => {
                app.status_message = format!("Recorded ({} total)", app.store.len());
                SaveState::Done
            }
            (SaveState::Done, SaveEvent::Reset) => SaveState::Idle,
            (state, event) => {
                log::debug!("save machine ignored {event:?} in state {state}");
                state
            }
        };
    }
}

/// Run the application in headless mode (no UI)
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    app.store.hydrate().await;

    if json {
        render_headless_json(app)?;
    } else {
        render_headless_stats(app);
    }

    Ok(())
}

fn render_headless_stats(app: &App) {
    let stats = SurveyStats::from_records(app.store.records());

    println!("\nSpectrum Logger Stats");
    println!("=====================");
    println!("Backend: {}", app.store.backend_caption());
    println!("Total records: {}", stats.total_records);
    println!("With photo: {}", stats.with_photo);
    println!("On registered sites: {}", stats.mapped_sites);

    if let (Some(hard_y), Some(hard_x)) = (stats.mean_hard_y, stats.mean_hard_x) {
        println!("Mean hard axis: ({hard_x:.1}, {hard_y:.1})");
    }
    if let (Some(soft_y), Some(soft_x)) = (stats.mean_soft_y, stats.mean_soft_x) {
        println!("Mean soft axis: ({soft_x:.1}, {soft_y:.1})");
    }

    println!("\nRecords by Location:");
    for (location, count) in &stats.by_location {
        println!("- {location}: {count}");
    }

    println!("\nRecent Records:");
    for record in &stats.recent {
        println!(
            "- {} | H-Y {} | S-Y {} | {}",
            record.location, record.hard_y, record.soft_y, record.timestamp
        );
    }
}

fn render_headless_json(app: &App) -> Result<()> {
    let stats = SurveyStats::from_records(app.store.records());
    let json = serde_json::to_string_pretty(&stats)?;
    println!("{json}");
    Ok(())
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let mut save_machine = SaveMachine::new();

    loop {
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    handle_input(app, key.code).await;
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {
                    // Ignore non-key events
                }
            }
        }

        // Drain a queued form submit through the save machine
        if app.pending_submit && save_machine.state() == SaveState::Idle {
            save_machine.process_event(SaveEvent::Start, app);

            app.submit_form().await;
            app.pending_submit = false;

            save_machine.process_event(SaveEvent::Finished, app);
            save_machine.process_event(SaveEvent::Reset, app);

            // Force a redraw to show the updated state
            if terminal.draw(|f| ui::ui(app, f)).is_err() {
                // Non-fatal redraw error
            }
        }
    }
    Ok(())
}
