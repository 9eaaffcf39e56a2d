//! Productivity tips.

use rand::seq::SliceRandom;
use rand::Rng;

pub const PRODUCTIVITY_TIPS: [&str; 15] = [
    "Try the Pomodoro Technique: Work for 25 minutes, then take a 5-minute break. After 4 cycles, take a longer 15-30 minute break.",
    "Use the 2-minute rule: If a task takes less than 2 minutes, do it immediately rather than scheduling it for later.",
    "Plan your day the night before. Identify your 3 most important tasks to accomplish.",
    "Use the Eisenhower Matrix to prioritize tasks: Urgent & Important (Do first), Important but Not Urgent (Schedule), Urgent but Not Important (Delegate), Neither Urgent nor Important (Eliminate).",
    "Practice 'time blocking' by scheduling specific blocks of time for different types of work or activities.",
    "Minimize multitasking. Focus on one task at a time for better quality and efficiency.",
    "Take regular breaks to maintain energy and focus. Try the 52/17 rule: 52 minutes of work followed by 17 minutes of rest.",
    "Use the 'eat the frog' technique: Do your most difficult or important task first thing in the morning.",
    "Batch similar tasks together to reduce context switching and improve efficiency.",
    "Set specific, measurable, achievable, relevant, and time-bound (SMART) goals for your work.",
    "Use the 'touch it once' principle: When you pick up a task, complete it, delegate it, or schedule it immediately.",
    "Practice the 80/20 rule (Pareto Principle): Focus on the 20% of activities that produce 80% of your results.",
    "Create a distraction-free environment by silencing notifications and using website blockers during focused work periods.",
    "Use the 'Swiss cheese' method for large tasks: Poke holes in big projects by completing small, manageable chunks whenever you have time.",
    "End each workday with a shutdown ritual: Review what you accomplished, update your to-do list, and prepare for tomorrow.",
];

/// A uniformly chosen tip.
pub fn productivity_tip<R: Rng + ?Sized>(rng: &mut R) -> String {
    let tip = PRODUCTIVITY_TIPS.choose(rng).copied().unwrap_or_default();
    format!(
        "## ⚡ Productivity Tip\n\n{}\n\nWould you like another tip or more information about this technique?",
        tip
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tip_comes_from_fixed_list() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let reply = productivity_tip(&mut rng);
            assert!(reply.starts_with("## ⚡ Productivity Tip\n\n"));
            assert!(PRODUCTIVITY_TIPS.iter().any(|tip| reply.contains(tip)));
        }
    }
}
