//! Dispatch from an intent to its handler.

use tracing::debug;

use super::{classify, Intent};
use crate::handlers::{notes, quiz, smalltalk, summarize, tasks, tips, Context};

/// Run the handler for `intent`. Fallback input is answered from the local
/// canned table.
pub fn dispatch(ctx: &mut Context<'_>, intent: Intent, text: &str) -> String {
    debug!(%intent, "Dispatching");
    match intent {
        Intent::CreateTask => tasks::create_task(ctx, text),
        Intent::ListTasks => tasks::list_tasks(ctx),
        Intent::CompleteTask => tasks::complete_task(ctx, text),
        Intent::SaveNote => notes::save_note(ctx, text),
        Intent::RetrieveNote => notes::retrieve_note(ctx, text),
        Intent::Summarize => summarize::summarize_request(text),
        Intent::Quiz => quiz::generate_quiz(ctx, text),
        Intent::ProductivityTip => tips::productivity_tip(&mut *ctx.rng),
        Intent::Fallback => smalltalk::smalltalk_reply(ctx, text),
    }
}

/// Classify and answer `text` in one step.
pub fn route(ctx: &mut Context<'_>, text: &str) -> (Intent, String) {
    let intent = classify(text);
    let reply = dispatch(ctx, intent, text);
    (intent, reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::tests::fixture;

    #[test]
    fn test_route_task_round() {
        let mut fx = fixture();
        let (intent, _) = route(&mut fx.ctx(), "remind me to water plants on friday");
        assert_eq!(intent, Intent::CreateTask);

        let (intent, listing) = route(&mut fx.ctx(), "list my tasks");
        assert_eq!(intent, Intent::ListTasks);
        assert!(listing.contains("1. water plants (Due: 5/10/2024 at 09:00 AM)"));

        let (intent, reply) = route(&mut fx.ctx(), "finish task 1");
        assert_eq!(intent, Intent::CompleteTask);
        assert!(reply.contains("Task Completed"));
    }

    #[test]
    fn test_route_fallback_and_tip() {
        let mut fx = fixture();
        let (intent, reply) = route(&mut fx.ctx(), "thank you");
        assert_eq!(intent, Intent::Fallback);
        assert!(reply.starts_with("## 😊 You're Welcome!"));

        let (_, tip) = route(&mut fx.ctx(), "productivity tip please");
        assert!(tip.starts_with("## ⚡ Productivity Tip"));
    }
}
