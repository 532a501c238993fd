//! Custom panic hook for structured crash reports.
//!
//! The hook leaves TUI mode (alternate screen, raw mode) before printing, so
//! the report is visible even when the explorer was running.

use super::context::{get_current_context, OperationContext};
use super::tracing::set_tui_active;
use std::panic::PanicHookInfo;
use tracing::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const WIDTH: usize = 78;

/// Install the custom panic hook.
///
/// Call early in main(), before any terminal state is changed.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    // Exit TUI mode first so crash report is visible
    exit_tui_mode();

    let context = get_current_context();

    eprintln!();
    print_header();
    print_panic_details(info);
    print_context_section(&context);
    print_backtrace_section();
}

fn exit_tui_mode() {
    // Mark TUI as inactive so subsequent logging works
    set_tui_active(false);

    // Ignore errors - we're already panicking
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = crossterm::execute!(std::io::stderr(), crossterm::terminal::LeaveAlternateScreen);
}

fn rule(left: char, right: char) -> String {
    format!("{left}{}{right}", "═".repeat(WIDTH))
}

fn row(text: &str) -> String {
    let text = truncate(text, WIDTH - 2);
    let pad = (WIDTH - 2).saturating_sub(text.width());
    format!("║  {text}{}║", " ".repeat(pad))
}

fn print_header() {
    let platform = std::env::consts::OS;
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

    eprintln!("{}", rule('╔', '╗'));
    eprintln!("{}", row("BOWTIE CRASH REPORT"));
    eprintln!("{}", rule('╠', '╣'));
    eprintln!("{}", row(&format!("Version: {VERSION}")));
    eprintln!("{}", row(&format!("Platform: {platform}")));
    eprintln!("{}", row(&format!("Time: {timestamp}")));
    eprintln!("{}", rule('╠', '╣'));
}

fn print_panic_details(info: &PanicHookInfo<'_>) {
    let message = extract_panic_message(info);
    eprintln!("{}", row(&format!("PANIC: {message}")));

    if let Some(location) = info.location() {
        let loc_str = format!(
            "{}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        );
        eprintln!("{}", row(&format!("Location: {loc_str}")));
    }
}

fn print_context_section(context: &OperationContext) {
    eprintln!("{}", rule('╠', '╣'));
    eprintln!("{}", row("OPERATION CONTEXT:"));
    eprintln!("{}", row(&format!("  {}", describe_phase(context))));

    let current_span = Span::current();
    if let Some(metadata) = current_span.metadata() {
        eprintln!("{}", row(&format!("  Span: {}", metadata.name())));
    }

    if let Some(scenario) = context.scenario {
        eprintln!("{}", row(&format!("  Scenario: {scenario}")));
    }
}

fn describe_phase(context: &OperationContext) -> String {
    match &context.phase {
        Some(phase) => format!("Phase: {phase}"),
        None => "Phase: (not set - crash occurred before any command started)".to_string(),
    }
}

fn print_backtrace_section() {
    eprintln!("{}", rule('╠', '╣'));

    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!("{}", row("STACK TRACE:"));
        eprintln!("{}", rule('╚', '╝'));
        eprintln!();
        eprintln!("{}", std::backtrace::Backtrace::capture());
    } else {
        eprintln!("{}", row("Run with RUST_BACKTRACE=1 for stack trace"));
        eprintln!("{}", rule('╚', '╝'));
    }
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Shorten `s` to at most `max_len` terminal columns.
fn truncate(s: &str, max_len: usize) -> String {
    if s.width() <= max_len {
        return s.to_string();
    }
    let budget = max_len.saturating_sub(3);
    let mut used = 0;
    let kept: String = s
        .chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= budget
        })
        .collect();
    format!("{kept}...")
}
