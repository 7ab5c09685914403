//! Human-readable output for pahmctl.

use owo_colors::OwoColorize;
use pahm_core::tracker::{PahmStageProgress, TLevelProgress};
use pahm_core::{AccessDecision, PahmStage, StageProgress, StreakStats, UserProgress};

const BAR_WIDTH: usize = 20;
const KEY_WIDTH: usize = 26;

/// Fixed-width score bar, e.g. `[#######.............]`
pub fn bar(value: u8, width: usize) -> String {
    let filled = (usize::from(value.min(100)) * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

fn colored_score(value: u8) -> String {
    if value >= 65 {
        value.green().to_string()
    } else if value >= 25 {
        value.yellow().to_string()
    } else {
        value.red().to_string()
    }
}

fn print_kv(key: &str, value: &str) {
    println!("  {:width$} {}", key, value, width = KEY_WIDTH);
}

fn header(title: &str) {
    println!("\n{}", title.bold());
    println!("{}", "-".repeat(48).dimmed());
}

fn check_mark(done: bool) -> String {
    if done {
        "[done]".green().to_string()
    } else {
        "[open]".dimmed().to_string()
    }
}

pub fn print_progress(progress: &UserProgress) {
    header("Progress");

    if !progress.has_minimum_data {
        println!("  {}", "Not enough data to compute a score yet.".yellow());
        for hint in progress.data_completeness.unlock_hints() {
            println!("  * {}", hint);
        }
        println!();
        return;
    }

    print_kv("Happiness points", &colored_score(progress.happiness_points));
    print_kv("Level", &progress.user_level.cyan().to_string());
    print_kv("Focus ability", &colored_score(progress.focus_ability));
    print_kv("Habit change", &colored_score(progress.habit_change_score));
    print_kv("Practice streak", &format!("{} days", progress.practice_streak));

    header("Components");
    for (component, value) in progress.breakdown.entries() {
        println!(
            "  {:width$} {} {:>3}",
            component.label(),
            bar(value, BAR_WIDTH).dimmed(),
            value,
            width = KEY_WIDTH
        );
    }

    if let Some(pahm) = &progress.pahm {
        header("PAHM development");
        print_kv("Stage", &pahm.stage.cyan().to_string());
        println!("  {}", pahm.description);
        println!("  {} {}", "Next:".bold(), pahm.progression_path);
        for insight in &pahm.insights {
            println!("  * {}", insight);
        }
        for rec in &pahm.recommendations {
            println!("  > {}", rec.italic());
        }
    }
    println!();
}

pub fn print_streak(stats: &StreakStats) {
    header("Streak");
    print_kv("Current", &format!("{} days", stats.current_streak.bold()));
    print_kv("Best", &format!("{} days", stats.best_streak));
    print_kv("Active days", &stats.active_days.to_string());
    println!();
}

fn t_level_line(t: &TLevelProgress) {
    println!(
        "  {:4} {} rated {}, total {}",
        t.level.to_string(),
        check_mark(t.completed),
        t.completed_session_count,
        t.total_sessions
    );
}

pub fn print_levels(progress: &StageProgress) {
    header("T-levels");
    for t in &progress.t_levels {
        t_level_line(t);
    }
    println!();
}

fn pahm_stage_line(p: &PahmStageProgress, current: PahmStage) {
    let marker = if p.stage == current { ">" } else { " " };
    println!(
        "{} {:28} {} {:>5.1}/{:.0} h",
        marker.cyan(),
        p.stage.to_string(),
        check_mark(p.completed),
        p.accumulated_hours,
        p.required_hours
    );
}

pub fn print_stage(current: PahmStage, progress: &StageProgress) {
    header("PAHM stages");
    print_kv("Current accessible", &current.cyan().to_string());
    if !progress.all_t_levels_complete() {
        println!("  {}", "Complete T1-T5 to open the PAHM stages.".yellow());
    }
    for p in &progress.pahm_stages {
        pahm_stage_line(p, current);
    }
    println!();
}

pub fn print_access(target: &str, decision: &AccessDecision) {
    if decision.allowed {
        println!("[OK] {} is open", target.green());
    } else {
        println!("[LOCKED] {}", target.red());
        if let Some(message) = &decision.requirement_message {
            println!("  {}", message);
        }
    }
}

pub fn print_ok(message: &str) {
    println!("[OK] {}", message.green());
}
