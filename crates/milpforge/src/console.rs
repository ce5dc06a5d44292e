//! Colorful console output for wrapper events.
//!
//! Provides a custom `tracing` layer that formats `wrap` and `dispatch`
//! events with colors. Enabled by the `console` feature.

use std::fmt::Debug;
use std::io::{self, Write};
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<bool> = OnceLock::new();

const DEFAULT_FILTER: &str = "milpforge_wrapper=debug";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. The
/// `RUST_LOG` environment variable overrides the default filter; set
/// `milpforge_wrapper=trace` to see every dispatched operator.
///
/// Returns true if the console layer is the global subscriber, false if
/// another subscriber was installed first.
pub fn init() -> bool {
    *INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        match tracing_subscriber::registry()
            .with(filter)
            .with(WrapperConsoleLayer)
            .try_init()
        {
            Ok(()) => true,
            Err(err) => {
                let _ = writeln!(io::stderr(), "milpforge console not installed: {}", err);
                false
            }
        }
    })
}

/// A tracing layer that formats wrapper events with colors.
pub struct WrapperConsoleLayer;

impl<S: Subscriber> Layer<S> for WrapperConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        if !metadata.target().starts_with("milpforge_wrapper") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    variable: Option<String>,
    receiver: Option<String>,
    operator: Option<String>,
    kind: Option<String>,
    operand: Option<String>,
    names: Option<String>,
    capabilities: Option<u64>,
}

impl EventVisitor {
    fn store(&mut self, field: &Field, value: String) {
        match field.name() {
            "event" => self.event = Some(value),
            "variable" => self.variable = Some(value),
            "receiver" => self.receiver = Some(value),
            "operator" => self.operator = Some(value),
            "kind" => self.kind = Some(value),
            "operand" => self.operand = Some(value),
            "names" => self.names = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        let s = format!("{:?}", value);
        self.store(field, s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.store(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "capabilities" {
            self.capabilities = Some(value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("wrap") => format_wrap(level, v),
        Some("dispatch") => format_dispatch(level, v),
        _ => String::new(),
    }
}

fn format_wrap(level: Level, v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} wrapped with {} capabilities {}",
        timestamp().bright_black(),
        format_level(level),
        "[Wrap]".bright_cyan(),
        v.variable.as_deref().unwrap_or("?").white().bold(),
        v.capabilities.unwrap_or(0).to_string().bright_yellow(),
        v.names.as_deref().unwrap_or("[]").bright_magenta()
    )
}

fn format_dispatch(level: Level, v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} {} {} ({})",
        timestamp().bright_black(),
        format_level(level),
        "[Dispatch]".bright_cyan(),
        v.receiver.as_deref().unwrap_or("?").white(),
        v.operator.as_deref().unwrap_or("?").bright_yellow().bold(),
        v.operand.as_deref().unwrap_or("?"),
        v.kind.as_deref().unwrap_or("?").bright_blue()
    )
}

fn format_level(level: Level) -> String {
    let label = level.as_str();
    match label {
        "ERROR" => label.bright_red().to_string(),
        "WARN" => label.yellow().to_string(),
        "INFO" => label.bright_green().to_string(),
        "DEBUG" => label.bright_blue().to_string(),
        _ => label.bright_black().to_string(),
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
