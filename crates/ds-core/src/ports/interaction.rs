/// User-interaction surface supplied by the embedding UI.
///
/// The controller funnels every confirmation, value prompt, and
/// user-visible failure notice through here; it never renders chrome of
/// its own.
#[async_trait::async_trait]
pub trait InteractionPort: Send + Sync {
    /// Synchronous-feeling yes/no confirmation. `true` means proceed.
    async fn confirm(&self, message: &str) -> bool;

    /// Ask the user for a value; `None` means cancelled.
    async fn prompt(&self, message: &str) -> Option<String>;

    /// Blocking failure notice. Exactly one per failed command.
    async fn notify_error(&self, message: &str);
}
