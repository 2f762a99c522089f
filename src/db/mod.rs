pub mod queries;

use crate::engine::balance::{AreaScores, LifeArea};
use crate::engine::streak::Frequency;
use crate::error::CoreError;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use queries::{ASSESSMENT_COLUMNS, GOAL_COLUMNS, HABIT_COLUMNS, TASK_COLUMNS};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, Transaction, TransactionBehavior, params};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Active,
    Paused,
    Completed,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Paused => "paused",
            GoalStatus::Completed => "completed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "active" => Some(GoalStatus::Active),
            "paused" => Some(GoalStatus::Paused),
            "completed" | "complete" | "done" => Some(GoalStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Energy {
    Low,
    Medium,
    High,
}

impl Energy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Energy::Low => "low",
            Energy::Medium => "medium",
            Energy::High => "high",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "low" => Some(Energy::Low),
            "medium" | "med" => Some(Energy::Medium),
            "high" => Some(Energy::High),
            _ => None,
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            Energy::Low => "🟢",
            Energy::Medium => "🟡",
            Energy::High => "🔴",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    Pending,
    Completed,
    Overdue,
}

impl TaskFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Pending => "pending",
            TaskFilter::Completed => "completed",
            TaskFilter::Overdue => "overdue",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "all" => Some(TaskFilter::All),
            "pending" => Some(TaskFilter::Pending),
            "completed" | "done" => Some(TaskFilter::Completed),
            "overdue" => Some(TaskFilter::Overdue),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HabitRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub cue: String,
    pub routine: String,
    pub reward: String,
    pub frequency: Frequency,
    pub streak_count: u32,
    pub best_streak: u32,
    pub last_completed: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub life_area: Option<LifeArea>,
    pub target_date: Option<NaiveDate>,
    pub status: GoalStatus,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskRow {
    pub id: i64,
    pub goal_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub energy_required: Energy,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AssessmentRow {
    pub id: i64,
    pub scores: AreaScores,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct HabitInput {
    pub name: String,
    pub description: Option<String>,
    pub cue: String,
    pub routine: String,
    pub reward: String,
    pub frequency: Frequency,
}

#[derive(Debug, Clone)]
pub struct GoalInput {
    pub title: String,
    pub description: Option<String>,
    pub life_area: Option<LifeArea>,
    pub target_date: Option<NaiveDate>,
    pub status: GoalStatus,
}

#[derive(Debug, Clone)]
pub struct TaskInput {
    pub goal_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub energy_required: Energy,
    pub due_date: Option<NaiveDate>,
}

// `None` keeps the stored value. The nested options on dates and goal links
// distinguish "keep" from "clear".
#[derive(Debug, Clone, Default)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cue: Option<String>,
    pub routine: Option<String>,
    pub reward: Option<String>,
    pub frequency: Option<Frequency>,
}

impl HabitPatch {
    pub fn apply(&self, habit: &HabitRow) -> HabitInput {
        HabitInput {
            name: self.name.clone().unwrap_or_else(|| habit.name.clone()),
            description: self.description.clone().or_else(|| habit.description.clone()),
            cue: self.cue.clone().unwrap_or_else(|| habit.cue.clone()),
            routine: self.routine.clone().unwrap_or_else(|| habit.routine.clone()),
            reward: self.reward.clone().unwrap_or_else(|| habit.reward.clone()),
            frequency: self.frequency.unwrap_or(habit.frequency),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub life_area: Option<LifeArea>,
    pub target_date: Option<Option<NaiveDate>>,
    pub status: Option<GoalStatus>,
}

impl GoalPatch {
    pub fn apply(&self, goal: &GoalRow) -> GoalInput {
        GoalInput {
            title: self.title.clone().unwrap_or_else(|| goal.title.clone()),
            description: self.description.clone().or_else(|| goal.description.clone()),
            life_area: self.life_area.or(goal.life_area),
            target_date: self.target_date.unwrap_or(goal.target_date),
            status: self.status.unwrap_or(goal.status),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub energy_required: Option<Energy>,
    pub due_date: Option<Option<NaiveDate>>,
    pub goal_id: Option<Option<i64>>,
}

impl TaskPatch {
    pub fn apply(&self, task: &TaskRow) -> TaskInput {
        TaskInput {
            goal_id: self.goal_id.unwrap_or(task.goal_id),
            title: self.title.clone().unwrap_or_else(|| task.title.clone()),
            description: self.description.clone().or_else(|| task.description.clone()),
            energy_required: self.energy_required.unwrap_or(task.energy_required),
            due_date: self.due_date.unwrap_or(task.due_date),
        }
    }
}

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create DB directory: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open SQLite DB: {}", path.display()))?;
        conn.pragma_update(None, "foreign_keys", true)
            .context("Failed to enable foreign keys")?;

        let database = Self { conn };
        database.init_schema()?;

        Ok(database)
    }

    pub fn init_schema(&self) -> Result<()> {
        queries::schema_statements()
            .iter()
            .try_for_each(|statement| {
                self.conn
                    .execute(statement, [])
                    .context("Failed to initialize schema")
                    .map(|_| ())
            })
    }

    /// Runs `work` inside one write transaction. Commits exactly once when it
    /// returns `Ok`, rolls back exactly once when it returns `Err`.
    pub fn unit_of_work<T, F>(&mut self, work: F) -> Result<T>
    where
        F: FnOnce(&UnitOfWork<'_>) -> Result<T>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to start transaction")?;
        let uow = UnitOfWork { tx };

        match work(&uow) {
            Ok(value) => {
                uow.commit()?;
                Ok(value)
            }
            Err(error) => {
                warn!(error = %error, "unit of work failed, rolling back");
                if let Err(rollback_error) = uow.rollback() {
                    warn!(error = %rollback_error, "rollback failed");
                }
                Err(error)
            }
        }
    }
}

pub struct UnitOfWork<'conn> {
    tx: Transaction<'conn>,
}

impl UnitOfWork<'_> {
    fn commit(self) -> Result<()> {
        self.tx.commit().context("Failed to commit transaction")
    }

    fn rollback(self) -> Result<()> {
        self.tx.rollback().context("Failed to roll back transaction")
    }

    pub fn insert_habit(&self, habit: &HabitInput, created_at: DateTime<Utc>) -> Result<i64> {
        self.tx
            .execute(
                "INSERT INTO habits (name, description, cue, routine, reward, frequency, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    habit.name,
                    habit.description,
                    habit.cue,
                    habit.routine,
                    habit.reward,
                    habit.frequency.as_str(),
                    created_at
                ],
            )
            .context("Failed to insert habit")?;

        Ok(self.tx.last_insert_rowid())
    }

    pub fn habit(&self, id: i64) -> Result<Option<HabitRow>> {
        self.tx
            .query_row(
                &format!("SELECT {HABIT_COLUMNS} FROM habits WHERE id = ?1"),
                params![id],
                habit_from_row,
            )
            .optional()
            .context("Failed to query habit")
    }

    pub fn require_habit(&self, id: i64) -> Result<HabitRow> {
        Ok(self.habit(id)?.ok_or(CoreError::HabitNotFound(id))?)
    }

    pub fn list_habits(&self, active_only: bool) -> Result<Vec<HabitRow>> {
        let mut statement = self.tx.prepare(&format!(
            "SELECT {HABIT_COLUMNS} FROM habits
             WHERE (?1 = 0 OR active = 1)
             ORDER BY streak_count DESC, id ASC"
        ))?;

        let rows = statement
            .query_map(params![active_only], habit_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list habits")?;

        Ok(rows)
    }

    pub fn update_habit_streak(
        &self,
        id: i64,
        streak_count: u32,
        best_streak: u32,
        last_completed: NaiveDate,
    ) -> Result<()> {
        self.tx
            .execute(
                "UPDATE habits SET streak_count = ?2, best_streak = ?3, last_completed = ?4 WHERE id = ?1",
                params![id, streak_count, best_streak, last_completed],
            )
            .context("Failed to update habit streak")?;

        Ok(())
    }

    pub fn update_habit(&self, id: i64, habit: &HabitInput) -> Result<()> {
        self.tx
            .execute(
                "UPDATE habits
                 SET name = ?2, description = ?3, cue = ?4, routine = ?5, reward = ?6, frequency = ?7
                 WHERE id = ?1",
                params![
                    id,
                    habit.name,
                    habit.description,
                    habit.cue,
                    habit.routine,
                    habit.reward,
                    habit.frequency.as_str()
                ],
            )
            .context("Failed to update habit")?;

        Ok(())
    }

    pub fn set_habit_active(&self, id: i64, active: bool) -> Result<()> {
        self.tx
            .execute(
                "UPDATE habits SET active = ?2 WHERE id = ?1",
                params![id, active],
            )
            .context("Failed to update habit state")?;

        Ok(())
    }

    pub fn delete_habit(&self, id: i64) -> Result<bool> {
        let deleted = self
            .tx
            .execute("DELETE FROM habits WHERE id = ?1", params![id])
            .context("Failed to delete habit")?;

        Ok(deleted > 0)
    }

    /// Inserts the completion unless one already exists for that day.
    /// Returns `false` when the row was already there.
    pub fn insert_completion_log(
        &self,
        habit_id: i64,
        completed_date: NaiveDate,
        note: Option<&str>,
    ) -> Result<bool> {
        let inserted = self
            .tx
            .execute(
                "INSERT INTO habit_logs (habit_id, completed_date, note) VALUES (?1, ?2, ?3)
                 ON CONFLICT(habit_id, completed_date) DO NOTHING",
                params![habit_id, completed_date, note],
            )
            .context("Failed to insert habit completion")?;

        Ok(inserted > 0)
    }

    pub fn has_completed_on(&self, habit_id: i64, date: NaiveDate) -> Result<bool> {
        self.tx
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM habit_logs WHERE habit_id = ?1 AND completed_date = ?2)",
                params![habit_id, date],
                |row| row.get(0),
            )
            .context("Failed to query habit completion")
    }

    pub fn completion_dates_since(&self, habit_id: i64, since: NaiveDate) -> Result<Vec<NaiveDate>> {
        let mut statement = self.tx.prepare(
            "SELECT completed_date FROM habit_logs
             WHERE habit_id = ?1 AND completed_date >= ?2
             ORDER BY completed_date DESC",
        )?;

        let rows = statement
            .query_map(params![habit_id, since], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to query habit completions")?;

        Ok(rows)
    }

    pub fn count_completion_logs(&self, habit_id: i64) -> Result<u32> {
        self.tx
            .query_row(
                "SELECT COUNT(*) FROM habit_logs WHERE habit_id = ?1",
                params![habit_id],
                |row| row.get(0),
            )
            .context("Failed to count habit completions")
    }

    pub fn insert_goal(&self, goal: &GoalInput, created_at: DateTime<Utc>) -> Result<i64> {
        self.tx
            .execute(
                "INSERT INTO goals (title, description, life_area, target_date, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    goal.title,
                    goal.description,
                    goal.life_area.map(|area| area.as_str()),
                    goal.target_date,
                    goal.status.as_str(),
                    created_at
                ],
            )
            .context("Failed to insert goal")?;

        Ok(self.tx.last_insert_rowid())
    }

    pub fn goal(&self, id: i64) -> Result<Option<GoalRow>> {
        self.tx
            .query_row(
                &format!("SELECT {GOAL_COLUMNS} FROM goals WHERE id = ?1"),
                params![id],
                goal_from_row,
            )
            .optional()
            .context("Failed to query goal")
    }

    pub fn require_goal(&self, id: i64) -> Result<GoalRow> {
        Ok(self.goal(id)?.ok_or(CoreError::GoalNotFound(id))?)
    }

    pub fn list_goals(&self, status: Option<GoalStatus>) -> Result<Vec<GoalRow>> {
        let mut statement = self.tx.prepare(&format!(
            "SELECT {GOAL_COLUMNS} FROM goals
             WHERE (?1 IS NULL OR status = ?1)
             ORDER BY created_at DESC, id DESC"
        ))?;

        let rows = statement
            .query_map(params![status.map(|value| value.as_str())], goal_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list goals")?;

        Ok(rows)
    }

    // status changes go through `set_goal_status`
    pub fn update_goal(&self, id: i64, goal: &GoalInput) -> Result<()> {
        self.tx
            .execute(
                "UPDATE goals SET title = ?2, description = ?3, life_area = ?4, target_date = ?5
                 WHERE id = ?1",
                params![
                    id,
                    goal.title,
                    goal.description,
                    goal.life_area.map(|area| area.as_str()),
                    goal.target_date
                ],
            )
            .context("Failed to update goal")?;

        Ok(())
    }

    pub fn update_goal_progress(&self, id: i64, progress: u8) -> Result<()> {
        self.tx
            .execute(
                "UPDATE goals SET progress = ?2 WHERE id = ?1",
                params![id, progress],
            )
            .context("Failed to update goal progress")?;

        Ok(())
    }

    pub fn set_goal_status(
        &self,
        id: i64,
        status: GoalStatus,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        self.tx
            .execute(
                "UPDATE goals SET status = ?2, completed_at = ?3 WHERE id = ?1",
                params![id, status.as_str(), completed_at],
            )
            .context("Failed to update goal status")?;

        Ok(())
    }

    pub fn unlink_goal_tasks(&self, goal_id: i64) -> Result<usize> {
        self.tx
            .execute(
                "UPDATE tasks SET goal_id = NULL WHERE goal_id = ?1",
                params![goal_id],
            )
            .context("Failed to unlink goal tasks")
    }

    pub fn delete_goal(&self, id: i64) -> Result<bool> {
        let deleted = self
            .tx
            .execute("DELETE FROM goals WHERE id = ?1", params![id])
            .context("Failed to delete goal")?;

        Ok(deleted > 0)
    }

    pub fn insert_task(&self, task: &TaskInput, created_at: DateTime<Utc>) -> Result<i64> {
        self.tx
            .execute(
                "INSERT INTO tasks (goal_id, title, description, energy_required, due_date, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    task.goal_id,
                    task.title,
                    task.description,
                    task.energy_required.as_str(),
                    task.due_date,
                    created_at
                ],
            )
            .context("Failed to insert task")?;

        Ok(self.tx.last_insert_rowid())
    }

    pub fn task(&self, id: i64) -> Result<Option<TaskRow>> {
        self.tx
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id],
                task_from_row,
            )
            .optional()
            .context("Failed to query task")
    }

    pub fn require_task(&self, id: i64) -> Result<TaskRow> {
        Ok(self.task(id)?.ok_or(CoreError::TaskNotFound(id))?)
    }

    pub fn list_tasks(
        &self,
        filter: TaskFilter,
        goal_id: Option<i64>,
        today: NaiveDate,
    ) -> Result<Vec<TaskRow>> {
        let mut statement = self.tx.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE (
                 ?1 = 'all'
                 OR (?1 = 'pending' AND completed = 0)
                 OR (?1 = 'completed' AND completed = 1)
                 OR (?1 = 'overdue' AND completed = 0 AND due_date IS NOT NULL AND due_date < ?2)
             )
             AND (?3 IS NULL OR goal_id = ?3)
             ORDER BY completed ASC, due_date IS NULL, due_date ASC, created_at DESC, id DESC"
        ))?;

        let rows = statement
            .query_map(params![filter.as_str(), today, goal_id], task_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list tasks")?;

        Ok(rows)
    }

    pub fn update_task(&self, id: i64, task: &TaskInput) -> Result<()> {
        self.tx
            .execute(
                "UPDATE tasks
                 SET goal_id = ?2, title = ?3, description = ?4, energy_required = ?5, due_date = ?6
                 WHERE id = ?1",
                params![
                    id,
                    task.goal_id,
                    task.title,
                    task.description,
                    task.energy_required.as_str(),
                    task.due_date
                ],
            )
            .context("Failed to update task")?;

        Ok(())
    }

    pub fn set_task_completion(&self, id: i64, completed_at: Option<DateTime<Utc>>) -> Result<()> {
        self.tx
            .execute(
                "UPDATE tasks SET completed = ?2, completed_at = ?3 WHERE id = ?1",
                params![id, completed_at.is_some(), completed_at],
            )
            .context("Failed to update task completion")?;

        Ok(())
    }

    pub fn set_task_goal(&self, id: i64, goal_id: Option<i64>) -> Result<()> {
        self.tx
            .execute(
                "UPDATE tasks SET goal_id = ?2 WHERE id = ?1",
                params![id, goal_id],
            )
            .context("Failed to update task goal")?;

        Ok(())
    }

    pub fn delete_task(&self, id: i64) -> Result<bool> {
        let deleted = self
            .tx
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])
            .context("Failed to delete task")?;

        Ok(deleted > 0)
    }

    // (total, completed)
    pub fn goal_task_counts(&self, goal_id: i64) -> Result<(u32, u32)> {
        self.tx
            .query_row(
                "SELECT COUNT(*), COALESCE(SUM(completed), 0) FROM tasks WHERE goal_id = ?1",
                params![goal_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .context("Failed to count goal tasks")
    }

    pub fn insert_assessment(
        &self,
        scores: &AreaScores,
        notes: &str,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        let [career, health, relationships, finance, growth, fun, environment, purpose] =
            LifeArea::ALL.map(|area| scores.get(area));

        self.tx
            .execute(
                "INSERT INTO assessments (
                    career_score, health_score, relationships_score, finance_score,
                    personal_growth_score, fun_recreation_score, environment_score, purpose_score,
                    notes, created_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    career,
                    health,
                    relationships,
                    finance,
                    growth,
                    fun,
                    environment,
                    purpose,
                    notes,
                    created_at
                ],
            )
            .context("Failed to insert assessment")?;

        Ok(self.tx.last_insert_rowid())
    }

    pub fn assessment(&self, id: i64) -> Result<Option<AssessmentRow>> {
        self.tx
            .query_row(
                &format!("SELECT {ASSESSMENT_COLUMNS} FROM assessments WHERE id = ?1"),
                params![id],
                assessment_from_row,
            )
            .optional()
            .context("Failed to query assessment")
    }

    pub fn require_assessment(&self, id: i64) -> Result<AssessmentRow> {
        Ok(self.assessment(id)?.ok_or(CoreError::AssessmentNotFound(id))?)
    }

    pub fn latest_assessment(&self) -> Result<Option<AssessmentRow>> {
        self.tx
            .query_row(
                &format!(
                    "SELECT {ASSESSMENT_COLUMNS} FROM assessments ORDER BY created_at DESC, id DESC LIMIT 1"
                ),
                [],
                assessment_from_row,
            )
            .optional()
            .context("Failed to query latest assessment")
    }

    pub fn list_assessments(&self, limit: usize) -> Result<Vec<AssessmentRow>> {
        let mut statement = self.tx.prepare(&format!(
            "SELECT {ASSESSMENT_COLUMNS} FROM assessments
             ORDER BY created_at DESC, id DESC
             LIMIT ?1"
        ))?;

        let rows = statement
            .query_map(params![limit as i64], assessment_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list assessments")?;

        Ok(rows)
    }

    pub fn delete_assessment(&self, id: i64) -> Result<bool> {
        let deleted = self
            .tx
            .execute("DELETE FROM assessments WHERE id = ?1", params![id])
            .context("Failed to delete assessment")?;

        Ok(deleted > 0)
    }
}

fn habit_from_row(row: &Row<'_>) -> rusqlite::Result<HabitRow> {
    Ok(HabitRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        cue: row.get(3)?,
        routine: row.get(4)?,
        reward: row.get(5)?,
        frequency: parse_column(row, 6, Frequency::parse)?,
        streak_count: row.get(7)?,
        best_streak: row.get(8)?,
        last_completed: row.get(9)?,
        active: row.get(10)?,
        created_at: row.get(11)?,
    })
}

fn goal_from_row(row: &Row<'_>) -> rusqlite::Result<GoalRow> {
    let life_area = row
        .get::<_, Option<String>>(3)?
        .map(|raw| {
            LifeArea::parse(&raw).ok_or_else(|| conversion_error(3, Type::Text, &raw))
        })
        .transpose()?;

    Ok(GoalRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        life_area,
        target_date: row.get(4)?,
        status: parse_column(row, 5, GoalStatus::parse)?,
        progress: row.get(6)?,
        created_at: row.get(7)?,
        completed_at: row.get(8)?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<TaskRow> {
    Ok(TaskRow {
        id: row.get(0)?,
        goal_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        completed: row.get(4)?,
        completed_at: row.get(5)?,
        energy_required: parse_column(row, 6, Energy::parse)?,
        due_date: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn assessment_from_row(row: &Row<'_>) -> rusqlite::Result<AssessmentRow> {
    let mut raw = [0_i64; 8];
    for (offset, slot) in raw.iter_mut().enumerate() {
        *slot = row.get(offset + 1)?;
    }

    let scores = AreaScores::new(raw)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(1, Type::Integer, Box::new(error)))?;

    Ok(AssessmentRow {
        id: row.get(0)?,
        scores,
        notes: row.get(9)?,
        created_at: row.get(10)?,
    })
}

fn parse_column<T>(
    row: &Row<'_>,
    index: usize,
    parse: impl Fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    let raw = row.get::<_, String>(index)?;
    parse(&raw).ok_or_else(|| conversion_error(index, Type::Text, &raw))
}

fn conversion_error(index: usize, kind: Type, raw: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, kind, format!("unexpected value: {raw}").into())
}
