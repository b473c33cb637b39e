use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use lottery_core::{update, AppState, Msg};
use lottery_logging::{lottery_debug, lottery_info};
use lottery_store::Store;

use super::effects::EffectRunner;
use super::settings::Settings;
use super::ui::input::{Command, CommandInterpreter};
use super::ui::render;
use super::{logging, persistence, Event};

pub fn run_app(settings: Settings) -> Result<()> {
    logging::initialize(settings.log, &settings.data_dir, settings.verbose);
    lottery_info!("Starting lottery with data dir {:?}", settings.data_dir);

    let store = Store::new(settings.data_dir.clone());
    if settings.reset {
        store
            .erase()
            .with_context(|| format!("failed to erase saved data in {:?}", store.dir()))?;
        lottery_info!("Saved draw list erased on request");
    }
    let startup = persistence::startup_msg(&store, settings.resume)?;

    let (msg_tx, msg_rx) = mpsc::channel::<Event>();
    let mut runner = EffectRunner::new(store, msg_tx.clone(), settings.seed);
    let mut app = App {
        state: AppState::with_countdown(settings.countdown),
        interpreter: CommandInterpreter::new(),
    };

    spawn_input_reader(msg_tx);

    let startup_msg = startup.unwrap_or(Msg::NoOp);
    runner.enqueue(app.dispatch(startup_msg));
    app.render_if_dirty()?;

    while !runner.should_quit() {
        let Ok(event) = msg_rx.recv() else {
            break;
        };
        match event {
            Event::Core(msg) => runner.enqueue(app.dispatch(msg)),
            Event::Input(line) => match app.interpreter.interpret(&line, &app.state.view()) {
                Command::Send(msgs) => {
                    for msg in msgs {
                        runner.enqueue(app.dispatch(msg));
                    }
                }
                Command::Help => print_out(render::help_text(&app.state.view()))?,
                Command::Pending => {}
                Command::Unknown(word) => {
                    print_out(&format!("Unknown command '{word}'. Type 'h' for help."))?
                }
            },
            Event::InputClosed => {
                lottery_info!("Input closed");
                runner.enqueue(app.dispatch(Msg::QuitClicked));
                break;
            }
        }
        app.render_if_dirty()?;
    }

    lottery_info!("Lottery exiting");
    Ok(())
}

struct App {
    state: AppState,
    interpreter: CommandInterpreter,
}

impl App {
    fn dispatch(&mut self, msg: Msg) -> Vec<lottery_core::Effect> {
        lottery_debug!("Dispatching {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        effects
    }

    fn render_if_dirty(&mut self) -> Result<()> {
        if !self.state.consume_dirty() {
            return Ok(());
        }
        print_out(&render::render(&self.state.view()))
    }
}

fn spawn_input_reader(tx: mpsc::Sender<Event>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(Event::Input(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Event::InputClosed);
    });
}

fn print_out(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}").context("failed to write to stdout")?;
    stdout.flush().context("failed to flush stdout")
}
