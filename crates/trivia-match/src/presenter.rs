//! Presentation boundary
//!
//! The controller never renders. A UI implements [`Presenter`] and feeds it
//! the events returned by the controller.

use crate::controller::{MatchEvent, QuestionView, Summary};

/// Render callbacks implemented by the presentation layer
pub trait Presenter {
    /// A question is ready for the active player
    fn show_question(&mut self, view: &QuestionView);

    /// A round ended, or the match was stopped (`summary.is_final()`)
    fn show_summary(&mut self, summary: &Summary);
}

impl MatchEvent {
    /// Route this event to the matching render callback
    pub fn render<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        match self {
            MatchEvent::Question(view) => presenter.show_question(view),
            MatchEvent::RoundOver(summary) | MatchEvent::MatchOver(summary) => {
                presenter.show_summary(summary)
            }
        }
    }
}
