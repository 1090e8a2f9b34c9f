// nightcore-cli/src/output.rs
//
// Terminal output helpers. Human-readable summaries go to stdout; errors go
// to stderr. Styling is dropped automatically when the stream is not a tty.

use console::style;
use std::fmt::Display;

/// Print a section heading
pub fn print_heading(text: &str) {
    println!("{}", style(text).bold());
}

/// Print an info line with label and value, with the label colored
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("  {:<12} {}", style(format!("{label}:")).cyan(), value);
}

pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("error:").red().bold(), message);
}
