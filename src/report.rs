use crate::coordinator::{AssessmentView, HabitHistory};
use crate::db::{GoalRow, HabitRow, TaskRow};
use crate::engine::balance::LifeArea;
use crate::engine::habits::HabitStats;
use crate::engine::streak::StreakTier;

pub fn render_assessment(view: &AssessmentView) -> String {
    let score_rows = view
        .assessment
        .scores
        .iter()
        .map(|(area, score)| format!("| {} | {} | {} |", area.label(), score, score_bar(score)))
        .collect::<Vec<_>>()
        .join("\n");

    let lowest = list_areas(view.balance.lowest_areas.iter().map(|e| (e.area, e.score)));
    let highest = list_areas(
        view.balance
            .highest_areas
            .iter()
            .rev()
            .map(|e| (e.area, e.score)),
    );

    let improvement_rows = if view.improvement_areas.is_empty() {
        "- Every area is at 5 or above".to_string()
    } else {
        view.improvement_areas
            .iter()
            .map(|entry| {
                format!(
                    "- {} ({}) - {}",
                    entry.area.label(),
                    entry.score,
                    entry.priority.as_str()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let notes = if view.assessment.notes.is_empty() {
        "- None".to_string()
    } else {
        view.assessment.notes.clone()
    };

    format!(
        "# Life Balance Assessment #{} - {}\n\n## Summary\n- Overall balance: {:.1} / 10\n\n## Scores\n| Area | Score | |\n|------|-------|---|\n{}\n\n## Strongest Areas\n{}\n\n## Weakest Areas\n{}\n\n## Needs Attention\n{}\n\n## Notes\n{}\n",
        view.assessment.id,
        view.assessment.created_at.format("%Y-%m-%d"),
        view.balance.overall_balance,
        score_rows,
        highest,
        lowest,
        improvement_rows,
        notes
    )
}

pub fn render_habit_dashboard(stats: &HabitStats, habits: &[HabitRow]) -> String {
    let habit_rows = if habits.is_empty() {
        "- No habits yet".to_string()
    } else {
        habits
            .iter()
            .map(|habit| {
                let tier = StreakTier::from_count(habit.streak_count);
                format!(
                    "- [{}] {} {} ({}, streak {}, best {}){}",
                    habit.id,
                    tier.indicator(),
                    habit.name,
                    habit.frequency.as_str(),
                    habit.streak_count,
                    habit.best_streak,
                    if habit.active { "" } else { " [paused]" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "# Habits\n\n## Today\n- Completed: {} / {} ({:.0}%)\n- Average streak: {:.1}\n- Best streak: {}\n\n## Habits\n{}\n",
        stats.completed_today,
        stats.total_habits,
        stats.completion_rate_today,
        stats.avg_streak,
        stats.best_streak,
        habit_rows
    )
}

pub fn render_habit_history(history: &HabitHistory) -> String {
    let habit = &history.habit;
    let calendar = history
        .days
        .iter()
        .map(|day| if day.completed { '■' } else { '□' })
        .collect::<String>();
    let (from, to) = match (history.days.first(), history.days.last()) {
        (Some(first), Some(last)) => (
            first.date.format("%Y-%m-%d").to_string(),
            last.date.format("%Y-%m-%d").to_string(),
        ),
        _ => ("-".to_string(), "-".to_string()),
    };

    format!(
        "# {} {}\n\n## Habit Loop\n- Cue: {}\n- Routine: {}\n- Reward: {}\n\n## Streak\n- Current: {}\n- Best: {}\n- Last completed: {}\n\n## Last {} Days ({} .. {})\n{}\n- Completion rate: {:.0}%\n",
        StreakTier::from_count(habit.streak_count).indicator(),
        habit.name,
        habit.cue,
        habit.routine,
        habit.reward,
        habit.streak_count,
        habit.best_streak,
        habit
            .last_completed
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "never".to_string()),
        history.days.len(),
        from,
        to,
        calendar,
        history.completion_rate
    )
}

pub fn render_goal_line(goal: &GoalRow) -> String {
    format!(
        "- [{}] {} {:>3}% {} ({}{})",
        goal.id,
        progress_bar(goal.progress),
        goal.progress,
        goal.title,
        goal.status.as_str(),
        goal.target_date
            .map(|date| format!(", due {}", date.format("%Y-%m-%d")))
            .unwrap_or_default()
    )
}

pub fn render_task_line(task: &TaskRow) -> String {
    format!(
        "- [{}] {} {} {}{}{}",
        task.id,
        if task.completed { "✓" } else { "○" },
        task.energy_required.indicator(),
        task.title,
        task.due_date
            .map(|date| format!(" (due {})", date.format("%Y-%m-%d")))
            .unwrap_or_default(),
        task.goal_id
            .map(|goal_id| format!(" -> goal {goal_id}"))
            .unwrap_or_default()
    )
}

fn list_areas(entries: impl Iterator<Item = (LifeArea, u8)>) -> String {
    entries
        .enumerate()
        .map(|(index, (area, score))| format!("{}. {} - {}", index + 1, area.label(), score))
        .collect::<Vec<_>>()
        .join("\n")
}

fn score_bar(score: u8) -> String {
    let filled = usize::from(score.min(10));
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(100) / 10);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(10 - filled))
}
