//! Colorful console output for compile and solve events.
//!
//! Provides a custom `tracing` layer that formats lifecycle events with
//! colors. Enabled with the `console` feature.

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "sbcforge_model=info,sbcforge_solver=info";

const BOX_TOP: &str = "╔══════════════════════════════════════════════════════════╗";
const BOX_BOTTOM: &str = "╚══════════════════════════════════════════════════════════╝";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default filter.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another global subscriber may already be installed.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SbcConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 ____  ____   ____ _____
/ ___|| __ ) / ___|  ___|__  _ __ __ _  ___
\___ \|  _ \| |   | |_ / _ \| '__/ _` |/ _ \
 ___) | |_) | |___|  _| (_) | | | (_| |  __/
|____/|____/ \____|_|  \___/|_|  \__, |\___|
                                 |___/
"#;

    let version_line = format!(
        "              v{} - Squad Building Challenge Solver\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats SbcForge events with colors.
pub struct SbcConsoleLayer;

impl<S: Subscriber> Layer<S> for SbcConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("sbcforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    status: Option<String>,
    formation: Option<String>,
    backend: Option<String>,
    candidates: Option<u64>,
    squad_size: Option<u64>,
    bool_vars: Option<u64>,
    int_vars: Option<u64>,
    constraints: Option<u64>,
    missing_fixed: Option<u64>,
    missing_removed: Option<u64>,
    time_limit_secs: Option<u64>,
    total_cost: Option<i64>,
    total_chemistry: Option<u64>,
    wall_ms: Option<u64>,
    elapsed_ms: Option<u64>,
    incumbents: Option<u64>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "status" => self.status = Some(value),
            "formation" => self.formation = Some(value),
            "backend" => self.backend = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let text = format!("{:?}", value);
        self.set_text(field.name(), text.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "candidates" => self.candidates = Some(value),
            "squad_size" => self.squad_size = Some(value),
            "bool_vars" => self.bool_vars = Some(value),
            "int_vars" => self.int_vars = Some(value),
            "constraints" => self.constraints = Some(value),
            "missing_fixed" => self.missing_fixed = Some(value),
            "missing_removed" => self.missing_removed = Some(value),
            "time_limit_secs" => self.time_limit_secs = Some(value),
            "wall_ms" => self.wall_ms = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            "incumbents" => self.incumbents = Some(value),
            "total_chemistry" => self.total_chemistry = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "total_cost" => self.total_cost = Some(value),
            _ => self.record_u64(field, value.max(0) as u64),
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "compile_start" => format_compile_start(v),
        "compile_end" => format_compile_end(v),
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "watchdog_stop" => format_watchdog_stop(v),
        _ => String::new(),
    }
}

fn format_compile_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} candidates ({}), formation ({}), squad size ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Compiler]".bright_cyan(),
        v.candidates.unwrap_or(0).bright_yellow(),
        v.formation.as_deref().unwrap_or("?").white().bold(),
        v.squad_size.unwrap_or(0).bright_yellow(),
    )
}

fn format_compile_end(v: &EventVisitor) -> String {
    let missing = v.missing_fixed.unwrap_or(0) + v.missing_removed.unwrap_or(0);
    let mut line = format!(
        "{} {} {} model ready: bools ({}), ints ({}), constraints ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Compiler]".bright_cyan(),
        v.bool_vars.unwrap_or(0).bright_yellow(),
        v.int_vars.unwrap_or(0).bright_yellow(),
        v.constraints.unwrap_or(0).bright_magenta(),
    );
    if missing > 0 {
        line.push_str(&format!(", unresolved identities ({})", missing.yellow()));
    }
    line
}

fn format_solve_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} backend, constraints ({}), time limit ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        v.backend.as_deref().unwrap_or("?").white().bold(),
        v.constraints.unwrap_or(0).bright_yellow(),
        format!("{}s", v.time_limit_secs.unwrap_or(0)).yellow(),
    )
}

fn format_watchdog_stop(v: &EventVisitor) -> String {
    format!(
        "    {} watchdog stop after {} ({} incumbents)",
        "->".bright_blue(),
        format_duration_ms(v.elapsed_ms.unwrap_or(0)).yellow(),
        v.incumbents.unwrap_or(0).white(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("UNKNOWN");
    let solved = matches!(status, "OPTIMAL" | "FEASIBLE");

    let mut output = format!(
        "{} {} {} Solving ended: status ({}), time spent ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        format_status(status),
        format_duration_ms(v.wall_ms.unwrap_or(0)).yellow(),
    );

    output.push_str("\n\n");
    output.push_str(&BOX_TOP.bright_cyan().to_string());
    output.push('\n');
    output.push_str(&box_line("Status:", status));
    if solved {
        let cost = v.total_cost.map_or_else(|| "N/A".to_string(), |c| c.to_string());
        let chemistry = v
            .total_chemistry
            .map_or_else(|| "N/A".to_string(), |c| c.to_string());
        output.push_str(&box_line("Total Cost:", &cost));
        output.push_str(&box_line("Total Chemistry:", &chemistry));
    }
    output.push_str(&BOX_BOTTOM.bright_cyan().to_string());
    output.push('\n');

    output
}

fn box_line(label: &str, value: &str) -> String {
    format!(
        "{}  {:<18}{:>36}  {}\n",
        "║".bright_cyan(),
        label,
        value,
        "║".bright_cyan()
    )
}

fn format_status(status: &str) -> String {
    match status {
        "OPTIMAL" => status.bright_green().bold().to_string(),
        "FEASIBLE" => status.green().to_string(),
        "INFEASIBLE" | "MODEL_INVALID" => status.bright_red().bold().to_string(),
        _ => status.yellow().to_string(),
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_events_are_skipped() {
        let visitor = EventVisitor {
            event: Some("backend_start".to_string()),
            ..Default::default()
        };
        assert!(format_event(&visitor).is_empty());

        let end = EventVisitor {
            event: Some("solve_end".to_string()),
            status: Some("OPTIMAL".to_string()),
            total_cost: Some(3820),
            ..Default::default()
        };
        assert!(format_event(&end).contains("3820"));
    }
}
