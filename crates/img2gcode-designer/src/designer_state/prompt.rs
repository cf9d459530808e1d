/// Dialogs the state needs from its host.
pub trait UserPrompt {
    /// Asks a yes/no question; `true` means proceed.
    fn confirm(&mut self, message: &str) -> bool;

    /// Shows a message that needs no answer.
    fn notify(&mut self, message: &str);
}

/// Answers every confirmation with a fixed value and logs notifications.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Default for AutoConfirm {
    fn default() -> Self {
        AutoConfirm(true)
    }
}

impl UserPrompt for AutoConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        tracing::debug!("confirm '{}' -> {}", message, self.0);
        self.0
    }

    fn notify(&mut self, message: &str) {
        tracing::info!("{}", message);
    }
}
