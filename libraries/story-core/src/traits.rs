/// Core traits for the story viewer
use crate::types::LoadTicket;

/// Media loader contract
///
/// Resolves a remote media locator to a local playable resource. Loading is
/// asynchronous: `fetch` only issues the request, and the host delivers the
/// outcome back to the owner of the ticket (see `StorySession::complete_load`
/// in `story-playback`) on the interaction thread.
///
/// Implementations must hand back the exact ticket they were given so that
/// stale completions can be recognised by generation and locator.
pub trait MediaLoader {
    /// Issue a load request for `ticket.locator`
    fn fetch(&mut self, ticket: LoadTicket);
}

impl<L: MediaLoader + ?Sized> MediaLoader for Box<L> {
    fn fetch(&mut self, ticket: LoadTicket) {
        (**self).fetch(ticket);
    }
}
