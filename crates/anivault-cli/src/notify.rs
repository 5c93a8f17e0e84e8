use anivault_core::Notifier;
use owo_colors::OwoColorize;

/// Prints reminder notifications straight to the terminal, with a bell so a
/// `remind watch` session in a background pane still gets attention.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, title: &str, body: &str) {
        println!("\x07🔔 {}", title.bold());
        println!("   {}", body);
    }
}
