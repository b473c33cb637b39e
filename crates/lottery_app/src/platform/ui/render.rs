use std::fmt::Write;

use lottery_core::{AppViewModel, DrawingView, Notice, Phase, Severity, SetupView};

/// Participants shown per row in the pool listing.
const NAMES_PER_ROW: usize = 3;

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    if let Some(setup) = &view.setup {
        render_setup(&mut out, setup);
    }
    if let Some(drawing) = &view.drawing {
        render_drawing(&mut out, drawing);
    }
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "{}", format_notice(notice));
    }
    out
}

pub fn help_text(view: &AppViewModel) -> &'static str {
    if view.setup.is_some() {
        "add <title>;<main>;<backup>  add a draw\n\
         undo                         remove the last draw\n\
         names                        paste names, one per line, end with '.'\n\
         sample                       use the sample name list\n\
         start                        save and start drawing\n\
         q                            quit"
    } else {
        "d        start the draw (again)\n\
         c        cancel the countdown\n\
         m        remove main winners and go to the next draw\n\
         a        remove main and backup winners and go to the next draw\n\
         b        back to the previous draw\n\
         r <name> remove a name from the list\n\
         l        show or hide participants\n\
         reset    erase this draw list and start over\n\
         q        quit"
    }
}

fn render_setup(out: &mut String, setup: &SetupView) {
    let _ = writeln!(out, "=== Draw list setup ===");
    if setup.draws.is_empty() {
        let _ = writeln!(
            out,
            "No draws yet. Example: add Grand prize;{};{}",
            setup.default_main_count, setup.default_backup_count
        );
    }
    for (i, draw) in setup.draws.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} (main {}, backup {})",
            i + 1,
            draw.title,
            draw.main_count,
            draw.backup_count
        );
    }
    let _ = writeln!(out, "Names entered: {}", setup.name_count);
}

fn render_drawing(out: &mut String, drawing: &DrawingView) {
    match &drawing.title {
        Some(title) => {
            let _ = writeln!(
                out,
                "=== Draw {}/{}: {} ===",
                drawing.round_number, drawing.round_count, title
            );
        }
        None => {
            let _ = writeln!(out, "=== All draws completed ===");
        }
    }
    let _ = writeln!(out, "Remaining participants: {}", drawing.remaining);

    if let Some(seconds) = drawing.countdown {
        let _ = writeln!(out, "\n        {seconds}\n");
    }
    if let Some(result) = &drawing.result {
        let _ = writeln!(out, "Main winners:");
        for name in &result.main_winners {
            let _ = writeln!(out, "  {name}");
        }
        if !result.backup_winners.is_empty() {
            let _ = writeln!(out, "Backup winners:");
            for name in &result.backup_winners {
                let _ = writeln!(out, "  {name}");
            }
        }
    }
    if let Some(pool) = &drawing.pool {
        render_pool(out, pool);
    }

    if drawing.confirm_reset {
        let _ = writeln!(
            out,
            "Reset erases the saved draw list and returns to setup. Type 'yes' to confirm."
        );
        return;
    }
    let _ = writeln!(out, "{}", actions_line(drawing));
}

fn render_pool(out: &mut String, pool: &[String]) {
    let _ = writeln!(out, "Participants ({}):", pool.len());
    for row in pool.chunks(NAMES_PER_ROW) {
        let _ = writeln!(out, "  {}", row.join(" | "));
    }
}

fn actions_line(drawing: &DrawingView) -> String {
    let mut actions = Vec::new();
    if drawing.countdown.is_some() {
        actions.push("c cancel".to_string());
    }
    if drawing.can_draw {
        actions.push(format!("d {}", drawing.draw_label));
    }
    if drawing.can_advance {
        actions.push("m remove main + next".to_string());
        actions.push("a remove all + next".to_string());
    }
    if drawing.can_go_back {
        actions.push("b back".to_string());
    }
    if !matches!(drawing.phase, Phase::Completed) {
        actions.push("r <name> remove".to_string());
    }
    actions.extend(["l list", "reset", "q quit"].map(String::from));
    format!("[{}]", actions.join("] ["))
}

fn format_notice(notice: &Notice) -> String {
    let tag = match notice.severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Error => "error",
    };
    format!("({tag}) {}", notice.text)
}
