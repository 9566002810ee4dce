use crate::player::ParticipantId;

/// Delivery sink for everything the table says out loud.
///
/// Public text goes to every participant; private text (hole cards) goes to
/// exactly one. Implementations must not call back into the table.
pub trait Notifier: Send + Sync {
    fn send_public(&self, text: String);
    fn send_private(&self, participant: &ParticipantId, text: String);
}

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn send_public(&self, _text: String) {}
    fn send_private(&self, _participant: &ParticipantId, _text: String) {}
}
