use colored::Colorize;

const DEFAULT_LINE_MAX_WIDTH: usize = 80;

/// Disable colors when `NO_COLOR` is set or stdout is not a terminal.
/// Call once, before anything is printed.
pub fn init_colors() {
    if std::env::var_os("NO_COLOR").is_some() || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }
}

pub fn failure(msg: &str) -> String {
    format!("{} {}", "✖".red(), msg)
}

pub fn success(msg: &str) -> String {
    format!("{} {}", "✔".green(), msg)
}

/// `💀 Terminated. (reason)`
pub fn terminated(cause_of_death: &str) -> String {
    format!("💀 Terminated. {}", format!("({})", cause_of_death).dimmed())
}

pub fn hint_to_help(command_name: &str) -> String {
    format!(
        "Run {} for usage information.",
        format!("{} --help", command_name).yellow()
    )
}

/// Horizontal rule, capped at the terminal width when there is one.
pub fn line(max_width: Option<usize>) -> String {
    let max_width = max_width.unwrap_or(DEFAULT_LINE_MAX_WIDTH);
    let width = match terminal_size::terminal_size() {
        Some((terminal_size::Width(cols), _)) => max_width.min(cols as usize),
        None => max_width,
    };
    "─".repeat(width)
}
