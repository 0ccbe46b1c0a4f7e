//! Terminal styling utilities for a modern, visually appealing TUI

use console::{style, Emoji};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static KEY: Emoji<'_, '_> = Emoji("🔑 ", "[!] ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[x] ");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
    ██████╗  ██████╗ ███╗   ██╗███████╗███████╗████████╗
    ██╔══██╗██╔════╝ ████╗  ██║██╔════╝██╔════╝╚══██╔══╝
    ██████╔╝██║  ███╗██╔██╗ ██║█████╗  ███████╗   ██║
    ██╔═══╝ ██║   ██║██║╚██╗██║██╔══╝  ╚════██║   ██║
    ██║     ╚██████╔╝██║ ╚████║███████╗███████║   ██║
    ╚═╝      ╚═════╝ ╚═╝  ╚═══╝╚══════╝╚══════╝   ╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("⌂").magenta().bold(),
        style("Publish your PG in five steps").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print an error message
pub fn print_error(message: &str) {
    println!("    {} {}", CROSS, style(message).red().bold());
}

/// Point the user at sign-in, naming where they will land afterwards.
pub fn print_login_hint(return_to: &str) {
    println!(
        "    {} {}",
        KEY,
        style(format!(
            "Sign in with an owner account, then run `{}` again.",
            return_to
        ))
        .yellow()
    );
}
