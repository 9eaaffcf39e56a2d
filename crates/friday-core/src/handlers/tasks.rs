//! Task creation, listing, completion and due reminders.

use chrono::{Duration, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::dates::extract_due_date;
use super::format::format_date;
use super::text::text_after;
use super::Context;
use crate::types::{Task, TaskList};

static CREATE_TASK_WORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)create|task").unwrap());

static TASK_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)task\s+(\d+)").unwrap());

const NO_TASKS: &str = "## 📋 Tasks\n\nYou don't have any tasks yet. You can create a task by saying something like 'Remind me to call mom tomorrow'.";

const NO_TASKS_TO_COMPLETE: &str = "## 📋 Tasks\n\nYou don't have any tasks to complete yet. You can create a task by saying something like 'Remind me to call mom tomorrow'.";

const TASK_NOT_IDENTIFIED: &str = "## ❓ Task Not Found\n\nI'm not sure which task you want to complete. Please say 'show my tasks' to see your task list, then specify the task number or description.";

/// Create a task from free text such as "remind me to call mom by tomorrow".
pub fn create_task(ctx: &mut Context<'_>, text: &str) -> String {
    let mut description = extract_description(text);
    let mut due_date = None;

    if let Some(phrase) = extract_due_date(text, ctx.now) {
        due_date = phrase.due;
        description = description.replacen(&phrase.span, "", 1).trim().to_string();
    }

    let id = ctx.session.next_id(ctx.now);
    let task = Task::new(id, description.clone(), ctx.now).with_due_date(due_date);
    debug!(task_id = %task.id, has_due_date = due_date.is_some(), "Task created");
    ctx.session.tasks_mut().push(task);

    let due_text = due_date
        .map(|due| format!(" due on {}", format_date(due, ctx.now)))
        .unwrap_or_default();

    format!(
        "## ✅ Task Added\n\nI've added your task: \"{}\"{}.\n\nI'll remind you when it's due.",
        description, due_text
    )
}

fn extract_description(text: &str) -> String {
    let lower = text.to_lowercase();
    let description = if lower.contains("remind me to") {
        text_after(text, "remind me to").map(str::to_string)
    } else if lower.contains("add task") {
        text_after(text, "add task").map(str::to_string)
    } else if lower.contains("create") && lower.contains("task") {
        Some(CREATE_TASK_WORDS.replace_all(text, "").trim().to_string())
    } else {
        None
    };
    description.unwrap_or_else(|| text.trim().to_string())
}

/// Render pending and completed tasks, each group numbered from 1.
pub fn list_tasks(ctx: &mut Context<'_>) -> String {
    let tasks = ctx.session.tasks();
    if tasks.is_empty() {
        return NO_TASKS.to_string();
    }

    let mut response = String::from("## 📋 Your Tasks\n\n");

    let pending: Vec<&Task> = tasks.pending().collect();
    if !pending.is_empty() {
        response.push_str("### 📝 Pending Tasks\n");
        for (index, task) in pending.iter().enumerate() {
            response.push_str(&format!("{}. {}", index + 1, task.description));
            if let Some(due) = task.due_date {
                response.push_str(&format!(" (Due: {})", format_date(due, ctx.now)));
            }
            response.push('\n');
        }
    }

    let completed: Vec<&Task> = tasks.completed().collect();
    if !completed.is_empty() {
        response.push_str("\n### ✅ Completed Tasks\n");
        for (index, task) in completed.iter().enumerate() {
            response.push_str(&format!("{}. {}\n", index + 1, task.description));
        }
    }

    response.push_str("\nYou can mark a task as complete by saying 'Complete task [task number]' or 'Mark task [description] as done'.");
    response
}

/// Complete a pending task chosen by number or by description.
pub fn complete_task(ctx: &mut Context<'_>, text: &str) -> String {
    if ctx.session.tasks().is_empty() {
        return NO_TASKS_TO_COMPLETE.to_string();
    }

    if let Some(caps) = TASK_NUMBER.captures(text) {
        let number: usize = caps[1].parse().unwrap_or(0);
        let completed = number
            .checked_sub(1)
            .and_then(|index| ctx.session.tasks_mut().complete_pending_at(index))
            .map(|task| task.description.clone());
        return match completed {
            Some(description) => completed_reply(&description),
            None => format!(
                "## ❓ Task Not Found\n\nI couldn't find task number {}. Please try again or say \"show my tasks\" to see your task list.",
                number
            ),
        };
    }

    match ctx
        .session
        .tasks_mut()
        .complete_mentioned(text)
        .map(|task| task.description.clone())
    {
        Some(description) => completed_reply(&description),
        None => TASK_NOT_IDENTIFIED.to_string(),
    }
}

fn completed_reply(description: &str) -> String {
    format!(
        "## ✅ Task Completed\n\nGreat job! I've marked \"{}\" as complete.",
        description
    )
}

/// Reminder text for pending tasks due within `window` of `now`.
pub fn due_reminder(tasks: &TaskList, now: NaiveDateTime, window: Duration) -> Option<String> {
    let due = tasks.due_within(now, window);
    if due.is_empty() {
        return None;
    }

    let mut text = String::from("## ⏰ Task Reminder\n\nYou have the following tasks due soon:\n\n");
    for (index, task) in due.iter().enumerate() {
        if let Some(date) = task.due_date {
            text.push_str(&format!(
                "{}. {} (Due: {})\n",
                index + 1,
                task.description,
                format_date(date, now)
            ));
        }
    }
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::tests::fixture;

    #[test]
    fn test_create_strips_date_phrase() {
        let mut fx = fixture();
        let reply = create_task(&mut fx.ctx(), "Remind me to call mom by tomorrow");
        let task = fx.session.tasks().last().unwrap();
        assert_eq!(task.description, "call mom");
        assert!(!task.completed);
        assert!(task.due_date.is_some());
        assert!(reply.contains("\"call mom\" due on Tomorrow at 09:00 AM"));
    }

    #[test]
    fn test_create_task_keyword_removal() {
        let mut fx = fixture();
        create_task(&mut fx.ctx(), "Create a task buy milk");
        assert_eq!(fx.session.tasks().last().unwrap().description, "a  buy milk");

        create_task(&mut fx.ctx(), "add task water plants");
        assert_eq!(fx.session.tasks().last().unwrap().description, "water plants");
    }

    #[test]
    fn test_list_groups_and_numbers_independently() {
        let mut fx = fixture();
        create_task(&mut fx.ctx(), "remind me to a");
        create_task(&mut fx.ctx(), "remind me to b");
        create_task(&mut fx.ctx(), "remind me to c");
        complete_task(&mut fx.ctx(), "complete task 2");

        let listing = list_tasks(&mut fx.ctx());
        assert!(listing.contains("### 📝 Pending Tasks\n1. a\n2. c\n"));
        assert!(listing.contains("### ✅ Completed Tasks\n1. b\n"));
    }

    #[test]
    fn test_complete_only_pending_by_index() {
        let mut fx = fixture();
        create_task(&mut fx.ctx(), "remind me to stretch");
        let reply = complete_task(&mut fx.ctx(), "mark task 1 as done");
        assert!(reply.contains("\"stretch\" as complete"));
        assert!(fx.session.tasks().iter().all(|t| t.completed));
    }

    #[test]
    fn test_complete_out_of_range_and_unknown() {
        let mut fx = fixture();
        assert!(complete_task(&mut fx.ctx(), "complete task 1").contains("any tasks to complete"));

        create_task(&mut fx.ctx(), "remind me to stretch");
        assert!(complete_task(&mut fx.ctx(), "complete task 4").contains("task number 4"));
        assert!(complete_task(&mut fx.ctx(), "finish the task please").contains("not sure which task"));
        assert!(complete_task(&mut fx.ctx(), "finish the stretch task").contains("as complete"));
    }

    #[test]
    fn test_due_reminder() {
        let mut fx = fixture();
        create_task(&mut fx.ctx(), "remind me to leave by today");
        assert!(due_reminder(fx.session.tasks(), fx.now, Duration::hours(1)).is_none());

        let later = fx.now + Duration::hours(8) + Duration::minutes(30);
        let text = due_reminder(fx.session.tasks(), later, Duration::hours(1)).unwrap();
        assert!(text.contains("1. leave (Due: Today at 06:00 PM)"));
    }
}
