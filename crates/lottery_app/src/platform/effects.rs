use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use lottery_core::{Effect, Msg};
use lottery_logging::{lottery_debug, lottery_error, lottery_info};
use lottery_store::Store;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Event;

const TICK: Duration = Duration::from_secs(1);

pub struct EffectRunner {
    store: Store,
    msg_tx: mpsc::Sender<Event>,
    seeds: StdRng,
    countdown: Option<Arc<AtomicBool>>,
    quit: bool,
}

impl EffectRunner {
    /// `seed` makes every draw of the run reproducible.
    pub fn new(store: Store, msg_tx: mpsc::Sender<Event>, seed: Option<u64>) -> Self {
        let seeds = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            store,
            msg_tx,
            seeds,
            countdown: None,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SaveConfig(config) => {
                    let result = self.store.config().save(&config);
                    self.report("save draw list", result);
                }
                Effect::SaveSnapshot(snapshot) => {
                    let result = self.store.session().save(&snapshot);
                    self.report("save session", result);
                }
                Effect::DeletePersisted => match self.store.erase() {
                    Ok(()) => {
                        lottery_info!("Persisted draw list erased");
                        self.send(Msg::PersistedDeleted);
                    }
                    Err(err) => {
                        lottery_error!("Failed to erase persisted state: {}", err);
                        self.send(Msg::StorageFailed(err.to_string()));
                    }
                },
                Effect::StartCountdown { id, seconds } => self.start_countdown(id, seconds),
                Effect::CancelCountdown => self.cancel_countdown(),
                Effect::Quit => {
                    self.cancel_countdown();
                    self.quit = true;
                }
            }
        }
    }

    fn report<T>(&self, action: &str, result: Result<T, lottery_store::StoreError>) {
        if let Err(err) = result {
            lottery_error!("Failed to {}: {}", action, err);
            self.send(Msg::StorageFailed(format!("could not {action}: {err}")));
        }
    }

    fn send(&self, msg: Msg) {
        let _ = self.msg_tx.send(Event::Core(msg));
    }

    /// Ticks once per second on a background thread, then asks for the draw.
    /// Raising the cancel flag stops it before the draw is requested.
    fn start_countdown(&mut self, id: u64, seconds: u8) {
        self.cancel_countdown();
        let cancel = Arc::new(AtomicBool::new(false));
        self.countdown = Some(cancel.clone());
        let seed = self.seeds.gen::<u64>();
        let msg_tx = self.msg_tx.clone();
        lottery_debug!("Countdown {} started ({}s)", id, seconds);

        thread::spawn(move || {
            for remaining in (1..=seconds).rev() {
                if cancel.load(Ordering::SeqCst) {
                    return;
                }
                if msg_tx
                    .send(Event::Core(Msg::CountdownTick { id, remaining }))
                    .is_err()
                {
                    return;
                }
                thread::sleep(TICK);
            }
            if !cancel.load(Ordering::SeqCst) {
                let _ = msg_tx.send(Event::Core(Msg::CountdownElapsed { id, seed }));
            }
        });
    }

    fn cancel_countdown(&mut self) {
        if let Some(cancel) = self.countdown.take() {
            cancel.store(true, Ordering::SeqCst);
            lottery_debug!("Countdown cancelled");
        }
    }
}
