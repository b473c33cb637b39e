//! Turns operator command lines into core messages.

use lottery_core::{AppViewModel, Msg, RemovalScope, ScreenKind};

/// Line that ends a pasted name list.
pub const END_OF_NAMES: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(Vec<Msg>),
    Help,
    /// Still collecting name lines.
    Pending,
    Unknown(String),
}

#[derive(Debug, Default)]
pub struct CommandInterpreter {
    names: Option<Vec<String>>,
}

impl CommandInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collecting_names(&self) -> bool {
        self.names.is_some()
    }

    pub fn interpret(&mut self, line: &str, view: &AppViewModel) -> Command {
        if let Some(lines) = self.names.as_mut() {
            if line.trim() == END_OF_NAMES {
                let text = lines.join("\n");
                self.names = None;
                return Command::Send(vec![Msg::NamesChanged(text)]);
            }
            lines.push(line.to_string());
            return Command::Pending;
        }

        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        if matches!(word, "q" | "quit") {
            return Command::Send(vec![Msg::QuitClicked]);
        }
        if matches!(word, "h" | "help" | "?") {
            return Command::Help;
        }

        match view.screen {
            ScreenKind::Setup => self.setup_command(word, rest, view),
            ScreenKind::Drawing => drawing_command(word, rest, view),
        }
    }

    fn setup_command(&mut self, word: &str, rest: &str, view: &AppViewModel) -> Command {
        match word {
            "add" => match parse_draw(rest, view) {
                Some(msg) => Command::Send(vec![msg]),
                None => Command::Unknown(format!("add {rest}")),
            },
            "undo" => Command::Send(vec![Msg::LastDrawRemoved]),
            "names" => {
                self.names = Some(Vec::new());
                Command::Pending
            }
            "sample" => Command::Send(vec![Msg::SampleNamesRequested]),
            "start" => Command::Send(vec![Msg::SetupSubmitted]),
            "" => Command::Send(Vec::new()),
            other => Command::Unknown(other.to_string()),
        }
    }
}

fn drawing_command(word: &str, rest: &str, view: &AppViewModel) -> Command {
    let confirm_reset = view
        .drawing
        .as_ref()
        .is_some_and(|drawing| drawing.confirm_reset);
    if confirm_reset {
        let msg = if matches!(word, "y" | "yes") {
            Msg::ResetConfirmed
        } else {
            Msg::ResetDeclined
        };
        return Command::Send(vec![msg]);
    }

    let msg = match word {
        "d" | "draw" => Msg::DrawRequested,
        "c" | "cancel" => Msg::CountdownCancelled,
        "m" | "main" => Msg::AdvanceClicked(RemovalScope::MainOnly),
        "a" | "all" => Msg::AdvanceClicked(RemovalScope::MainAndBackup),
        "b" | "back" => Msg::BackClicked,
        "r" | "remove" if !rest.is_empty() => Msg::RemoveNameSubmitted(rest.to_string()),
        "l" | "list" => Msg::ShowPoolToggled,
        "reset" => Msg::ResetClicked,
        "" => return Command::Send(Vec::new()),
        other => return Command::Unknown(other.to_string()),
    };
    Command::Send(vec![msg])
}

/// Parses `<title>;<main>;<backup>`; omitted counts fall back to the defaults.
fn parse_draw(rest: &str, view: &AppViewModel) -> Option<Msg> {
    let (default_main, default_backup) = view
        .setup
        .as_ref()
        .map(|setup| (setup.default_main_count, setup.default_backup_count))?;
    let mut parts = rest.split(';').map(str::trim);
    let title = parts.next().filter(|title| !title.is_empty())?;
    let main_count = match parts.next() {
        Some(value) => value.parse().ok()?,
        None => default_main,
    };
    let backup_count = match parts.next() {
        Some(value) => value.parse().ok()?,
        None => default_backup,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(Msg::DrawAdded {
        title: title.to_string(),
        main_count,
        backup_count,
    })
}
