/// Delivery seam for user-facing notifications. The CLI plugs in a terminal
/// renderer; tests record; consentless runs stay silent.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

/// Swallows everything.
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _title: &str, _body: &str) {}
}
