use crate::db::{
    AssessmentRow, GoalInput, GoalPatch, GoalStatus, HabitInput, HabitPatch, HabitRow, TaskInput,
    TaskPatch, UnitOfWork,
};
use crate::engine::balance::{
    AreaScores, BalanceReport, ImprovementArea, calculate_balance, get_improvement_areas,
};
use crate::engine::habits::{self, HabitSnapshot, HabitStats, HistoryDay, MAX_HISTORY_DAYS};
use crate::engine::progress::calculate_progress;
use crate::engine::streak::{Celebration, update_streak_for};
use crate::error::CoreError;
use anyhow::Result;
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckInOutcome {
    Completed {
        streak_count: u32,
        best_streak: u32,
        celebration: Celebration,
        is_personal_best: bool,
    },
    AlreadyDone {
        streak_count: u32,
    },
    // recorded, but inside a period that already counted toward the streak
    Logged {
        streak_count: u32,
    },
    OutOfOrder {
        last_completed: NaiveDate,
    },
}

impl CheckInOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            CheckInOutcome::Completed { .. } | CheckInOutcome::Logged { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    pub goal_id: i64,
    pub progress: u8,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub status: GoalStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskToggle {
    pub task_id: i64,
    pub completed: bool,
    pub goal: Option<GoalProgress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskReassignment {
    pub task_id: i64,
    pub previous: Option<GoalProgress>,
    pub current: Option<GoalProgress>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HabitHistory {
    pub habit: HabitRow,
    pub days: Vec<HistoryDay>,
    pub completion_rate: f64,
}

#[derive(Debug, Clone)]
pub struct AssessmentView {
    pub assessment: AssessmentRow,
    pub balance: BalanceReport,
    pub improvement_areas: Vec<ImprovementArea>,
}

#[derive(Debug, Clone)]
pub struct AssessmentSummary {
    pub view: AssessmentView,
    pub days_since: i64,
}

pub fn create_habit(uow: &UnitOfWork<'_>, habit: &HabitInput, now: DateTime<Utc>) -> Result<i64> {
    validate_habit(habit)?;

    let id = uow.insert_habit(habit, now)?;
    info!(habit_id = id, frequency = habit.frequency.as_str(), "habit created");
    Ok(id)
}

pub fn check_in(
    uow: &UnitOfWork<'_>,
    habit_id: i64,
    date: NaiveDate,
    note: Option<&str>,
) -> Result<CheckInOutcome> {
    let habit = uow.require_habit(habit_id)?;

    if let Some(last_completed) = habit.last_completed.filter(|last| date < *last) {
        if uow.has_completed_on(habit_id, date)? {
            return Ok(CheckInOutcome::AlreadyDone {
                streak_count: habit.streak_count,
            });
        }
        debug!(habit_id, %date, %last_completed, "check-in precedes last completion");
        return Ok(CheckInOutcome::OutOfOrder { last_completed });
    }

    if !uow.insert_completion_log(habit_id, date, note)? {
        debug!(habit_id, %date, "habit already checked in");
        return Ok(CheckInOutcome::AlreadyDone {
            streak_count: habit.streak_count,
        });
    }

    let (streak_count, best_streak) = update_streak_for(
        habit.frequency,
        habit.last_completed,
        habit.streak_count,
        habit.best_streak,
        date,
    );
    uow.update_habit_streak(habit_id, streak_count, best_streak, date)?;

    let advanced = habit
        .last_completed
        .is_none_or(|last| habit.frequency.periods_between(last, date) > 0);
    if !advanced {
        info!(habit_id, %date, streak_count, "habit logged within current period");
        return Ok(CheckInOutcome::Logged { streak_count });
    }

    info!(habit_id, %date, streak_count, best_streak, "habit checked in");

    Ok(CheckInOutcome::Completed {
        streak_count,
        best_streak,
        celebration: Celebration::classify(streak_count, best_streak),
        is_personal_best: streak_count == best_streak,
    })
}

// One transaction for the whole batch: an unknown habit id rolls back every
// check-in before it.
pub fn check_in_many(
    uow: &UnitOfWork<'_>,
    habit_ids: &[i64],
    date: NaiveDate,
) -> Result<Vec<(i64, CheckInOutcome)>> {
    let outcomes = habit_ids
        .iter()
        .map(|&habit_id| check_in(uow, habit_id, date, None).map(|outcome| (habit_id, outcome)))
        .collect::<Result<Vec<_>>>()?;

    info!(
        %date,
        requested = habit_ids.len(),
        completed = outcomes.iter().filter(|(_, outcome)| outcome.is_success()).count(),
        "batch check-in"
    );
    Ok(outcomes)
}

pub fn update_habit(uow: &UnitOfWork<'_>, habit_id: i64, patch: &HabitPatch) -> Result<HabitRow> {
    let current = uow.require_habit(habit_id)?;
    let habit = patch.apply(&current);
    validate_habit(&habit)?;

    uow.update_habit(habit_id, &habit)?;

    info!(habit_id, frequency = habit.frequency.as_str(), "habit updated");
    uow.require_habit(habit_id)
}

pub fn toggle_habit_active(uow: &UnitOfWork<'_>, habit_id: i64) -> Result<bool> {
    let habit = uow.require_habit(habit_id)?;
    let active = !habit.active;
    uow.set_habit_active(habit_id, active)?;

    info!(habit_id, active, "habit state changed");
    Ok(active)
}

pub fn delete_habit(uow: &UnitOfWork<'_>, habit_id: i64) -> Result<()> {
    if !uow.delete_habit(habit_id)? {
        return Err(CoreError::HabitNotFound(habit_id).into());
    }

    info!(habit_id, "habit deleted");
    Ok(())
}

pub fn habit_stats(uow: &UnitOfWork<'_>, today: NaiveDate) -> Result<HabitStats> {
    let snapshots = uow
        .list_habits(true)?
        .into_iter()
        .map(|habit| {
            Ok(HabitSnapshot {
                streak_count: habit.streak_count,
                best_streak: habit.best_streak,
                completed_today: uow.has_completed_on(habit.id, today)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(habits::summarize(&snapshots))
}

pub fn habit_history(
    uow: &UnitOfWork<'_>,
    habit_id: i64,
    today: NaiveDate,
    days: u32,
) -> Result<HabitHistory> {
    if !(1..=MAX_HISTORY_DAYS).contains(&days) {
        return Err(CoreError::InvalidValue {
            field: "history days",
            value: format!("{days} is outside 1..={MAX_HISTORY_DAYS}"),
        }
        .into());
    }

    let habit = uow.require_habit(habit_id)?;
    let since = today
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .ok_or_else(|| CoreError::InvalidValue {
            field: "history days",
            value: format!("{days} days before {today} is out of range"),
        })?;
    let completed = uow.completion_dates_since(habit_id, since)?;
    let days = habits::completion_history(&completed, today, days);

    Ok(HabitHistory {
        completion_rate: habits::completion_rate(&days),
        habit,
        days,
    })
}

pub fn create_goal(uow: &UnitOfWork<'_>, goal: &GoalInput, now: DateTime<Utc>) -> Result<i64> {
    require_text("goal title", &goal.title)?;

    let id = uow.insert_goal(goal, now)?;
    if goal.status == GoalStatus::Completed {
        uow.set_goal_status(id, GoalStatus::Completed, Some(now))?;
        uow.update_goal_progress(id, 100)?;
    }

    info!(goal_id = id, status = goal.status.as_str(), "goal created");
    Ok(id)
}

pub fn refresh_goal_progress(uow: &UnitOfWork<'_>, goal_id: i64) -> Result<GoalProgress> {
    let goal = uow.require_goal(goal_id)?;
    let (total_tasks, completed_tasks) = uow.goal_task_counts(goal_id)?;

    let progress = match goal.status {
        GoalStatus::Completed => goal.progress,
        GoalStatus::Active | GoalStatus::Paused => {
            calculate_progress(total_tasks, completed_tasks)
        }
    };

    if progress != goal.progress {
        uow.update_goal_progress(goal_id, progress)?;
        debug!(goal_id, from = goal.progress, to = progress, "goal progress recomputed");
    }

    Ok(GoalProgress {
        goal_id,
        progress,
        total_tasks,
        completed_tasks,
        status: goal.status,
    })
}

// reaching 100% through tasks never completes a goal on its own
pub fn complete_goal(uow: &UnitOfWork<'_>, goal_id: i64, now: DateTime<Utc>) -> Result<GoalProgress> {
    let goal = uow.require_goal(goal_id)?;
    if goal.status != GoalStatus::Completed {
        uow.set_goal_status(goal_id, GoalStatus::Completed, Some(now))?;
    }
    uow.update_goal_progress(goal_id, 100)?;

    info!(goal_id, "goal completed");
    refresh_goal_progress(uow, goal_id)
}

pub fn set_goal_status(
    uow: &UnitOfWork<'_>,
    goal_id: i64,
    status: GoalStatus,
    now: DateTime<Utc>,
) -> Result<GoalProgress> {
    if status == GoalStatus::Completed {
        return complete_goal(uow, goal_id, now);
    }

    uow.require_goal(goal_id)?;
    uow.set_goal_status(goal_id, status, None)?;

    info!(goal_id, status = status.as_str(), "goal status changed");
    refresh_goal_progress(uow, goal_id)
}

pub fn update_goal(
    uow: &UnitOfWork<'_>,
    goal_id: i64,
    patch: &GoalPatch,
    now: DateTime<Utc>,
) -> Result<GoalProgress> {
    let current = uow.require_goal(goal_id)?;
    let goal = patch.apply(&current);
    require_text("goal title", &goal.title)?;

    uow.update_goal(goal_id, &goal)?;
    info!(goal_id, "goal updated");

    if goal.status != current.status {
        set_goal_status(uow, goal_id, goal.status, now)
    } else {
        refresh_goal_progress(uow, goal_id)
    }
}

// returns how many tasks were unlinked
pub fn delete_goal(uow: &UnitOfWork<'_>, goal_id: i64) -> Result<usize> {
    uow.require_goal(goal_id)?;
    let unlinked = uow.unlink_goal_tasks(goal_id)?;
    uow.delete_goal(goal_id)?;

    info!(goal_id, unlinked, "goal deleted, tasks preserved");
    Ok(unlinked)
}

pub fn create_task(
    uow: &UnitOfWork<'_>,
    task: &TaskInput,
    now: DateTime<Utc>,
) -> Result<(i64, Option<GoalProgress>)> {
    require_text("task title", &task.title)?;
    if let Some(goal_id) = task.goal_id {
        uow.require_goal(goal_id)?;
    }

    let id = uow.insert_task(task, now)?;
    let goal = task
        .goal_id
        .map(|goal_id| refresh_goal_progress(uow, goal_id))
        .transpose()?;

    info!(task_id = id, goal_id = ?task.goal_id, "task created");
    Ok((id, goal))
}

pub fn toggle_task(uow: &UnitOfWork<'_>, task_id: i64, now: DateTime<Utc>) -> Result<TaskToggle> {
    let task = uow.require_task(task_id)?;
    let completed = !task.completed;
    uow.set_task_completion(task_id, completed.then_some(now))?;

    let goal = task
        .goal_id
        .map(|goal_id| refresh_goal_progress(uow, goal_id))
        .transpose()?;

    info!(
        task_id,
        completed,
        goal_id = ?task.goal_id,
        progress = ?goal.as_ref().map(|goal| goal.progress),
        "task toggled"
    );

    Ok(TaskToggle {
        task_id,
        completed,
        goal,
    })
}

pub fn delete_task(uow: &UnitOfWork<'_>, task_id: i64) -> Result<Option<GoalProgress>> {
    let task = uow.require_task(task_id)?;
    uow.delete_task(task_id)?;

    let goal = task
        .goal_id
        .map(|goal_id| refresh_goal_progress(uow, goal_id))
        .transpose()?;

    info!(task_id, goal_id = ?task.goal_id, "task deleted");
    Ok(goal)
}

pub fn assign_task_goal(
    uow: &UnitOfWork<'_>,
    task_id: i64,
    goal_id: Option<i64>,
) -> Result<TaskReassignment> {
    let task = uow.require_task(task_id)?;
    if let Some(goal_id) = goal_id {
        uow.require_goal(goal_id)?;
    }

    uow.set_task_goal(task_id, goal_id)?;

    info!(task_id, from = ?task.goal_id, to = ?goal_id, "task goal reassigned");
    refresh_reassigned_goals(uow, task_id, task.goal_id, goal_id)
}

pub fn update_task(uow: &UnitOfWork<'_>, task_id: i64, patch: &TaskPatch) -> Result<TaskReassignment> {
    let current = uow.require_task(task_id)?;
    let task = patch.apply(&current);
    require_text("task title", &task.title)?;
    if let Some(goal_id) = task.goal_id {
        uow.require_goal(goal_id)?;
    }

    uow.update_task(task_id, &task)?;

    info!(task_id, from = ?current.goal_id, to = ?task.goal_id, "task updated");
    refresh_reassigned_goals(uow, task_id, current.goal_id, task.goal_id)
}

fn refresh_reassigned_goals(
    uow: &UnitOfWork<'_>,
    task_id: i64,
    previous: Option<i64>,
    current: Option<i64>,
) -> Result<TaskReassignment> {
    let previous = previous
        .filter(|previous| Some(*previous) != current)
        .map(|previous| refresh_goal_progress(uow, previous))
        .transpose()?;
    let current = current
        .map(|goal_id| refresh_goal_progress(uow, goal_id))
        .transpose()?;

    Ok(TaskReassignment {
        task_id,
        previous,
        current,
    })
}

pub fn submit_assessment(
    uow: &UnitOfWork<'_>,
    scores: &AreaScores,
    notes: &str,
    now: DateTime<Utc>,
) -> Result<AssessmentView> {
    let id = uow.insert_assessment(scores, notes.trim(), now)?;
    let view = assessment_view(uow, id)?;

    info!(
        assessment_id = id,
        overall_balance = view.balance.overall_balance,
        "assessment submitted"
    );
    Ok(view)
}

pub fn assessment_view(uow: &UnitOfWork<'_>, assessment_id: i64) -> Result<AssessmentView> {
    let assessment = uow.require_assessment(assessment_id)?;
    Ok(view_of(assessment))
}

pub fn latest_assessment(
    uow: &UnitOfWork<'_>,
    now: DateTime<Utc>,
    limit: usize,
) -> Result<Option<AssessmentSummary>> {
    let summary = uow.latest_assessment()?.map(|assessment| {
        let days_since = (now - assessment.created_at).num_days();
        let mut view = view_of(assessment);
        view.improvement_areas.truncate(limit);

        AssessmentSummary { view, days_since }
    });

    Ok(summary)
}

pub fn delete_assessment(uow: &UnitOfWork<'_>, assessment_id: i64) -> Result<()> {
    if !uow.delete_assessment(assessment_id)? {
        return Err(CoreError::AssessmentNotFound(assessment_id).into());
    }

    info!(assessment_id, "assessment deleted");
    Ok(())
}

fn view_of(assessment: AssessmentRow) -> AssessmentView {
    AssessmentView {
        balance: calculate_balance(&assessment.scores),
        improvement_areas: get_improvement_areas(&assessment.scores),
        assessment,
    }
}

fn validate_habit(habit: &HabitInput) -> Result<(), CoreError> {
    require_text("habit name", &habit.name)?;
    require_text("cue", &habit.cue)?;
    require_text("routine", &habit.routine)?;
    require_text("reward", &habit.reward)
}

fn require_text(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidValue {
            field,
            value: "must not be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, Energy, TaskFilter};
    use crate::engine::balance::{LifeArea, Priority};
    use crate::engine::streak::Frequency;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, Database) {
        let dir = tempfile::tempdir().expect("temp dir");
        let database = Database::open(&dir.path().join("elara.db")).expect("open db");
        (dir, database)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 8, 30, 0).single().expect("valid timestamp")
    }

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, n).expect("valid date")
    }

    fn habit(frequency: Frequency) -> HabitInput {
        HabitInput {
            name: "Daily Reading".to_string(),
            description: None,
            cue: "After dinner".to_string(),
            routine: "Read for 20 minutes".to_string(),
            reward: "Learn something new".to_string(),
            frequency,
        }
    }

    fn goal(title: &str) -> GoalInput {
        GoalInput {
            title: title.to_string(),
            description: None,
            life_area: Some(LifeArea::PersonalGrowth),
            target_date: None,
            status: GoalStatus::Active,
        }
    }

    fn task(goal_id: Option<i64>, title: &str) -> TaskInput {
        TaskInput {
            goal_id,
            title: title.to_string(),
            description: None,
            energy_required: Energy::Medium,
            due_date: None,
        }
    }

    #[test]
    fn streak_resets_after_gap_but_keeps_best() {
        let (_dir, mut database) = open_temp();

        let habit_row = database
            .unit_of_work(|uow| {
                let id = create_habit(uow, &habit(Frequency::Daily), now())?;
                let first = check_in(uow, id, day(1), None)?;
                assert_eq!(
                    first,
                    CheckInOutcome::Completed {
                        streak_count: 1,
                        best_streak: 1,
                        celebration: Celebration::First,
                        is_personal_best: true,
                    }
                );
                check_in(uow, id, day(2), None)?;
                check_in(uow, id, day(5), None)?;
                uow.require_habit(id)
            })
            .expect("unit of work");

        assert_eq!(habit_row.streak_count, 1);
        assert_eq!(habit_row.best_streak, 2);
        assert_eq!(habit_row.last_completed, Some(day(5)));
    }

    #[test]
    fn duplicate_check_in_is_reported_not_raised() {
        let (_dir, mut database) = open_temp();

        database
            .unit_of_work(|uow| {
                let id = create_habit(uow, &habit(Frequency::Daily), now())?;
                assert!(check_in(uow, id, day(3), None)?.is_success());

                let second = check_in(uow, id, day(3), Some("again"))?;
                assert_eq!(second, CheckInOutcome::AlreadyDone { streak_count: 1 });
                assert!(!second.is_success());
                assert_eq!(uow.count_completion_logs(id)?, 1);
                assert_eq!(uow.require_habit(id)?.streak_count, 1);
                Ok(())
            })
            .expect("unit of work");
    }

    #[test]
    fn backdated_check_in_is_rejected_without_logging() {
        let (_dir, mut database) = open_temp();

        database
            .unit_of_work(|uow| {
                let id = create_habit(uow, &habit(Frequency::Daily), now())?;
                check_in(uow, id, day(10), None)?;

                let outcome = check_in(uow, id, day(8), None)?;
                assert_eq!(outcome, CheckInOutcome::OutOfOrder { last_completed: day(10) });
                assert_eq!(uow.count_completion_logs(id)?, 1);

                let habit_row = uow.require_habit(id)?;
                assert_eq!((habit_row.streak_count, habit_row.best_streak), (1, 1));
                Ok(())
            })
            .expect("unit of work");
    }

    #[test]
    fn weekly_habit_logs_extra_days_without_extending_streak() {
        let (_dir, mut database) = open_temp();

        database
            .unit_of_work(|uow| {
                let id = create_habit(uow, &habit(Frequency::Weekly), now())?;
                // 2026-06-01 is a Monday
                check_in(uow, id, day(1), None)?;
                let same_week = check_in(uow, id, day(3), None)?;
                assert_eq!(same_week, CheckInOutcome::Logged { streak_count: 1 });
                assert!(same_week.is_success());

                let next_week = check_in(uow, id, day(9), None)?;
                assert!(matches!(
                    next_week,
                    CheckInOutcome::Completed { streak_count: 2, celebration: Celebration::PersonalBest, .. }
                ));

                let habit_row = uow.require_habit(id)?;
                assert_eq!((habit_row.streak_count, habit_row.best_streak), (2, 2));
                assert_eq!(habit_row.last_completed, Some(day(9)));
                assert_eq!(uow.count_completion_logs(id)?, 3);
                Ok(())
            })
            .expect("unit of work");
    }

    #[test]
    fn check_in_from_a_second_connection_sees_the_first() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("elara.db");
        let mut phone = Database::open(&path).expect("open first handle");
        let mut laptop = Database::open(&path).expect("open second handle");

        let id = phone
            .unit_of_work(|uow| create_habit(uow, &habit(Frequency::Daily), now()))
            .expect("create habit");
        let first = phone
            .unit_of_work(|uow| check_in(uow, id, day(3), None))
            .expect("first check-in");
        let second = laptop
            .unit_of_work(|uow| check_in(uow, id, day(3), None))
            .expect("second check-in");

        assert!(first.is_success());
        assert_eq!(second, CheckInOutcome::AlreadyDone { streak_count: 1 });
    }

    #[test]
    fn batch_check_in_is_all_or_nothing() {
        let (_dir, mut database) = open_temp();

        let (reading, walking) = database
            .unit_of_work(|uow| {
                Ok((
                    create_habit(uow, &habit(Frequency::Daily), now())?,
                    create_habit(uow, &habit(Frequency::Daily), now())?,
                ))
            })
            .expect("setup");

        let error = database
            .unit_of_work(|uow| check_in_many(uow, &[reading, walking + 50], day(2)))
            .expect_err("unknown habit");
        assert_eq!(
            error.downcast_ref::<CoreError>(),
            Some(&CoreError::HabitNotFound(walking + 50))
        );

        let outcomes = database
            .unit_of_work(|uow| {
                assert_eq!(uow.count_completion_logs(reading)?, 0);
                check_in(uow, walking, day(2), None)?;
                check_in_many(uow, &[reading, walking], day(2))
            })
            .expect("batch");
        assert!(outcomes[0].1.is_success());
        assert_eq!(outcomes[1], (walking, CheckInOutcome::AlreadyDone { streak_count: 1 }));
    }

    #[test]
    fn editing_a_habit_keeps_its_streak() {
        let (_dir, mut database) = open_temp();

        let edited = database
            .unit_of_work(|uow| {
                let id = create_habit(uow, &habit(Frequency::Daily), now())?;
                check_in(uow, id, day(1), None)?;
                check_in(uow, id, day(2), None)?;

                let patch = HabitPatch {
                    name: Some("Evening Reading".to_string()),
                    frequency: Some(Frequency::Weekly),
                    ..HabitPatch::default()
                };
                let edited = update_habit(uow, id, &patch)?;

                let blank = HabitPatch {
                    cue: Some("  ".to_string()),
                    ..HabitPatch::default()
                };
                assert!(update_habit(uow, id, &blank).is_err());
                Ok(edited)
            })
            .expect("unit of work");

        assert_eq!(edited.name, "Evening Reading");
        assert_eq!(edited.frequency, Frequency::Weekly);
        assert_eq!(edited.routine, "Read for 20 minutes");
        assert_eq!((edited.streak_count, edited.best_streak), (2, 2));
    }

    #[test]
    fn editing_a_goal_applies_status_transitions() {
        let (_dir, mut database) = open_temp();

        database
            .unit_of_work(|uow| {
                let goal_id = create_goal(uow, &goal("Run"), now())?;
                create_task(uow, &task(Some(goal_id), "shoes"), now())?;

                let retitled = GoalPatch {
                    title: Some("Run a 10k".to_string()),
                    target_date: Some(Some(day(30))),
                    ..GoalPatch::default()
                };
                assert_eq!(update_goal(uow, goal_id, &retitled, now())?.progress, 0);
                let stored = uow.require_goal(goal_id)?;
                assert_eq!(stored.title, "Run a 10k");
                assert_eq!(stored.target_date, Some(day(30)));
                assert_eq!(stored.life_area, Some(LifeArea::PersonalGrowth));

                let done = GoalPatch {
                    status: Some(GoalStatus::Completed),
                    target_date: Some(None),
                    ..GoalPatch::default()
                };
                let progress = update_goal(uow, goal_id, &done, now())?;
                assert_eq!((progress.status, progress.progress), (GoalStatus::Completed, 100));

                let stored = uow.require_goal(goal_id)?;
                assert_eq!(stored.completed_at, Some(now()));
                assert_eq!(stored.target_date, None);
                Ok(())
            })
            .expect("unit of work");
    }

    #[test]
    fn editing_a_task_goal_recomputes_both_goals() {
        let (_dir, mut database) = open_temp();

        database
            .unit_of_work(|uow| {
                let first = create_goal(uow, &goal("First"), now())?;
                let second = create_goal(uow, &goal("Second"), now())?;
                let (task_id, _) = create_task(uow, &task(Some(first), "draft"), now())?;
                create_task(uow, &task(Some(first), "polish"), now())?;
                toggle_task(uow, task_id, now())?;

                let patch = TaskPatch {
                    title: Some("Final draft".to_string()),
                    energy_required: Some(Energy::High),
                    goal_id: Some(Some(second)),
                    ..TaskPatch::default()
                };
                let moved = update_task(uow, task_id, &patch)?;
                assert_eq!(moved.previous.expect("old goal").progress, 0);
                assert_eq!(moved.current.expect("new goal").progress, 100);

                let edited = uow.require_task(task_id)?;
                assert_eq!(edited.title, "Final draft");
                assert_eq!(edited.energy_required, Energy::High);
                assert!(edited.completed);

                let missing = TaskPatch {
                    goal_id: Some(Some(second + 10)),
                    ..TaskPatch::default()
                };
                let error = update_task(uow, task_id, &missing).expect_err("missing goal");
                assert_eq!(
                    error.downcast_ref::<CoreError>(),
                    Some(&CoreError::GoalNotFound(second + 10))
                );
                Ok(())
            })
            .expect("unit of work");
    }

    #[test]
    fn goal_progress_follows_task_changes() {
        let (_dir, mut database) = open_temp();

        database
            .unit_of_work(|uow| {
                let goal_id = create_goal(uow, &goal("Learn Rust"), now())?;
                let tasks = ["read", "write", "review", "ship"]
                    .into_iter()
                    .map(|title| create_task(uow, &task(Some(goal_id), title), now()).map(|(id, _)| id))
                    .collect::<Result<Vec<_>>>()?;

                for id in &tasks[..3] {
                    toggle_task(uow, *id, now())?;
                }
                assert_eq!(uow.require_goal(goal_id)?.progress, 75);

                let after_delete = delete_task(uow, tasks[0])?.expect("goal recomputed");
                assert_eq!(after_delete.progress, 66);
                assert_eq!((after_delete.total_tasks, after_delete.completed_tasks), (3, 2));
                assert_eq!(uow.require_goal(goal_id)?.progress, 66);

                let untoggled = toggle_task(uow, tasks[1], now())?;
                assert!(!untoggled.completed);
                assert_eq!(untoggled.goal.expect("linked goal").progress, 33);
                assert!(uow.require_task(tasks[1])?.completed_at.is_none());
                Ok(())
            })
            .expect("unit of work");
    }

    #[test]
    fn reaching_full_progress_does_not_complete_goal() {
        let (_dir, mut database) = open_temp();

        database
            .unit_of_work(|uow| {
                let goal_id = create_goal(uow, &goal("Declutter"), now())?;
                let (task_id, _) = create_task(uow, &task(Some(goal_id), "garage"), now())?;
                let toggled = toggle_task(uow, task_id, now())?;

                let progress = toggled.goal.expect("linked goal");
                assert_eq!(progress.progress, 100);
                assert_eq!(progress.status, GoalStatus::Active);

                let done = complete_goal(uow, goal_id, now())?;
                assert_eq!(done.status, GoalStatus::Completed);
                assert_eq!(uow.require_goal(goal_id)?.completed_at, Some(now()));

                // completed goals keep their 100%
                create_task(uow, &task(Some(goal_id), "attic"), now())?;
                assert_eq!(uow.require_goal(goal_id)?.progress, 100);

                let reopened = set_goal_status(uow, goal_id, GoalStatus::Active, now())?;
                assert_eq!(reopened.progress, 50);
                assert!(uow.require_goal(goal_id)?.completed_at.is_none());
                Ok(())
            })
            .expect("unit of work");
    }

    #[test]
    fn reassigning_a_task_recomputes_both_goals() {
        let (_dir, mut database) = open_temp();

        database
            .unit_of_work(|uow| {
                let first = create_goal(uow, &goal("First"), now())?;
                let second = create_goal(uow, &goal("Second"), now())?;
                let (done, _) = create_task(uow, &task(Some(first), "done"), now())?;
                create_task(uow, &task(Some(first), "todo"), now())?;
                toggle_task(uow, done, now())?;
                assert_eq!(uow.require_goal(first)?.progress, 50);

                let moved = assign_task_goal(uow, done, Some(second))?;
                assert_eq!(moved.previous.expect("old goal").progress, 0);
                assert_eq!(moved.current.expect("new goal").progress, 100);

                let unlinked = assign_task_goal(uow, done, None)?;
                assert_eq!(unlinked.previous.expect("old goal").progress, 0);
                assert!(unlinked.current.is_none());
                Ok(())
            })
            .expect("unit of work");
    }

    #[test]
    fn deleting_goal_orphans_tasks() {
        let (_dir, mut database) = open_temp();

        database
            .unit_of_work(|uow| {
                let goal_id = create_goal(uow, &goal("Temporary"), now())?;
                let (task_id, _) = create_task(uow, &task(Some(goal_id), "survivor"), now())?;

                assert_eq!(delete_goal(uow, goal_id)?, 1);
                assert!(uow.goal(goal_id)?.is_none());

                let survivor = uow.require_task(task_id)?;
                assert_eq!(survivor.goal_id, None);
                assert_eq!(uow.list_tasks(TaskFilter::All, None, day(1))?.len(), 1);
                Ok(())
            })
            .expect("unit of work");
    }

    #[test]
    fn failure_after_toggle_rolls_back_task_and_goal() {
        let (_dir, mut database) = open_temp();

        let (goal_id, task_id) = database
            .unit_of_work(|uow| {
                let goal_id = create_goal(uow, &goal("Atomic"), now())?;
                let (task_id, _) = create_task(uow, &task(Some(goal_id), "only"), now())?;
                Ok((goal_id, task_id))
            })
            .expect("setup");

        let result: Result<()> = database.unit_of_work(|uow| {
            toggle_task(uow, task_id, now())?;
            Err(CoreError::GoalNotFound(goal_id + 100).into())
        });
        assert!(result.is_err());

        database
            .unit_of_work(|uow| {
                assert!(!uow.require_task(task_id)?.completed);
                assert_eq!(uow.require_goal(goal_id)?.progress, 0);
                Ok(())
            })
            .expect("verify");
    }

    #[test]
    fn task_under_missing_goal_is_rejected() {
        let (_dir, mut database) = open_temp();

        let error = database
            .unit_of_work(|uow| create_task(uow, &task(Some(7), "lost"), now()))
            .expect_err("missing goal");
        assert_eq!(error.downcast_ref::<CoreError>(), Some(&CoreError::GoalNotFound(7)));

        let tasks = database
            .unit_of_work(|uow| uow.list_tasks(TaskFilter::All, None, day(1)))
            .expect("list tasks");
        assert!(tasks.is_empty());
    }

    #[test]
    fn habit_stats_and_history() {
        let (_dir, mut database) = open_temp();

        database
            .unit_of_work(|uow| {
                let reading = create_habit(uow, &habit(Frequency::Daily), now())?;
                let paused = create_habit(uow, &habit(Frequency::Daily), now())?;
                let idle = create_habit(uow, &habit(Frequency::Daily), now())?;
                for n in 1..=3 {
                    check_in(uow, reading, day(n), None)?;
                }
                check_in(uow, paused, day(3), None)?;
                assert!(!toggle_habit_active(uow, paused)?);

                let stats = habit_stats(uow, day(3))?;
                assert_eq!(stats.total_habits, 2);
                assert_eq!(stats.completed_today, 1);
                assert_eq!(stats.best_streak, 3);
                assert_eq!(stats.avg_streak, 1.5);

                for days in [0, MAX_HISTORY_DAYS + 1, 200_000_000] {
                    let error = habit_history(uow, reading, day(4), days).expect_err("window rejected");
                    assert!(matches!(
                        error.downcast_ref::<CoreError>(),
                        Some(CoreError::InvalidValue { field: "history days", .. })
                    ));
                }
                let year = habit_history(uow, reading, day(4), MAX_HISTORY_DAYS)?;
                assert_eq!(year.days.len(), 365);

                let history = habit_history(uow, reading, day(4), 4)?;
                assert_eq!(
                    history.days.iter().map(|d| d.completed).collect::<Vec<_>>(),
                    vec![true, true, true, false]
                );
                assert_eq!(history.completion_rate, 75.0);

                delete_habit(uow, idle)?;
                let missing = delete_habit(uow, idle).expect_err("already deleted");
                assert_eq!(missing.downcast_ref::<CoreError>(), Some(&CoreError::HabitNotFound(idle)));
                Ok(())
            })
            .expect("unit of work");
    }

    #[test]
    fn empty_names_are_rejected() {
        let (_dir, mut database) = open_temp();

        let error = database
            .unit_of_work(|uow| create_goal(uow, &goal("   "), now()))
            .expect_err("blank title");
        assert!(matches!(
            error.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidValue { field: "goal title", .. })
        ));
    }

    #[test]
    fn assessment_submission_and_latest_summary() {
        let (_dir, mut database) = open_temp();
        let scores = AreaScores::new([2, 8, 9, 3, 6, 7, 4, 5]).expect("valid scores");

        let submitted = database
            .unit_of_work(|uow| submit_assessment(uow, &scores, "  quarterly check  ", now()))
            .expect("submit");
        assert_eq!(submitted.balance.overall_balance, 5.5);
        assert_eq!(submitted.assessment.notes, "quarterly check");
        assert_eq!(submitted.improvement_areas[0].priority, Priority::Critical);

        let later = now() + Duration::days(9);
        let summary = database
            .unit_of_work(|uow| latest_assessment(uow, later, 2))
            .expect("latest")
            .expect("one assessment");
        assert_eq!(summary.days_since, 9);
        assert_eq!(summary.view.assessment.id, submitted.assessment.id);
        assert_eq!(summary.view.improvement_areas.len(), 2);
        assert_eq!(summary.view.improvement_areas[1].area, LifeArea::Finance);

        database
            .unit_of_work(|uow| delete_assessment(uow, submitted.assessment.id))
            .expect("delete");
        let none = database
            .unit_of_work(|uow| latest_assessment(uow, later, 3))
            .expect("latest");
        assert!(none.is_none());
    }
}
