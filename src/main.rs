mod cli;
mod coach;
mod config;
mod coordinator;
mod db;
mod engine;
mod error;
mod report;

use crate::cli::{
    AssessCommands, Cli, Commands, ConfigCommands, GoalCommands, HabitCommands, TaskCommands,
};
use crate::coach::{GoalEvent, celebration_message, goal_message};
use crate::config::Config;
use crate::coordinator::{CheckInOutcome, GoalProgress};
use crate::db::{
    Database, Energy, GoalInput, GoalPatch, GoalStatus, HabitInput, HabitPatch, TaskFilter,
    TaskInput, TaskPatch,
};
use crate::engine::balance::{AreaScores, LifeArea, calculate_balance};
use crate::engine::streak::{Frequency, StreakTier};
use crate::error::CoreError;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Habit { command } => handle_habit_command(command),
        Commands::Goal { command } => handle_goal_command(command),
        Commands::Task { command } => handle_task_command(command),
        Commands::Assess { command } => handle_assess_command(command),
        Commands::Config { command } => handle_config_command(command),
        Commands::Status => handle_status(),
    }
}

fn handle_habit_command(command: HabitCommands) -> Result<()> {
    let config = Config::load()?;
    let mut database = Database::open(&config.db_path)?;

    match command {
        HabitCommands::Add {
            name,
            cue,
            routine,
            reward,
            description,
            frequency,
        } => {
            let input = HabitInput {
                name,
                description,
                cue,
                routine,
                reward,
                frequency: parse_enum("frequency", &frequency, Frequency::parse)?,
            };
            let id = database
                .unit_of_work(|uow| coordinator::create_habit(uow, &input, Utc::now()))?;

            println!("Habit created: [{id}] {} ({})", input.name, input.frequency.as_str());
        }
        HabitCommands::Checkin { id, date, note } => {
            let date = parse_optional_date(date)?;
            let outcome = database
                .unit_of_work(|uow| coordinator::check_in(uow, id, date, note.as_deref()))?;

            print_check_in(id, date, &outcome);
        }
        HabitCommands::CheckinAll { ids, date } => {
            let date = parse_optional_date(date)?;
            let outcomes = database.unit_of_work(|uow| {
                let ids = if ids.is_empty() {
                    uow.list_habits(true)?.iter().map(|habit| habit.id).collect()
                } else {
                    ids.clone()
                };
                coordinator::check_in_many(uow, &ids, date)
            })?;

            if outcomes.is_empty() {
                println!("No active habits");
            }
            for (id, outcome) in &outcomes {
                print_check_in(*id, date, outcome);
            }
        }
        HabitCommands::Edit {
            id,
            name,
            description,
            cue,
            routine,
            reward,
            frequency,
        } => {
            let patch = HabitPatch {
                name,
                description,
                cue,
                routine,
                reward,
                frequency: frequency
                    .as_deref()
                    .map(|raw| parse_enum("frequency", raw, Frequency::parse))
                    .transpose()?,
            };
            let habit = database.unit_of_work(|uow| coordinator::update_habit(uow, id, &patch))?;

            println!("Habit updated: [{id}] {} ({})", habit.name, habit.frequency.as_str());
        }
        HabitCommands::Pause { id } => {
            let active = database.unit_of_work(|uow| coordinator::toggle_habit_active(uow, id))?;
            println!("Habit {id} {}", if active { "resumed" } else { "paused" });
        }
        HabitCommands::Delete { id } => {
            database.unit_of_work(|uow| coordinator::delete_habit(uow, id))?;
            println!("Habit {id} deleted");
        }
        HabitCommands::List { all } => {
            let today = Local::now().date_naive();
            let (stats, habits) = database.unit_of_work(|uow| {
                Ok((coordinator::habit_stats(uow, today)?, uow.list_habits(!all)?))
            })?;

            print!("{}", report::render_habit_dashboard(&stats, &habits));
        }
        HabitCommands::Show { id, days } => {
            let today = Local::now().date_naive();
            let days = days.unwrap_or(config.history_days);
            let history =
                database.unit_of_work(|uow| coordinator::habit_history(uow, id, today, days))?;

            print!("{}", report::render_habit_history(&history));
        }
        HabitCommands::Stats { date } => {
            let date = parse_optional_date(date)?;
            let stats = database.unit_of_work(|uow| coordinator::habit_stats(uow, date))?;

            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}

fn handle_goal_command(command: GoalCommands) -> Result<()> {
    let config = Config::load()?;
    let mut database = Database::open(&config.db_path)?;

    match command {
        GoalCommands::Add {
            title,
            description,
            area,
            target,
        } => {
            let input = GoalInput {
                title,
                description,
                life_area: area
                    .as_deref()
                    .map(|raw| parse_enum("life area", raw, LifeArea::parse))
                    .transpose()?,
                target_date: parse_date(target.as_deref())?,
                status: GoalStatus::Active,
            };
            let id =
                database.unit_of_work(|uow| coordinator::create_goal(uow, &input, Utc::now()))?;

            println!("Goal created: [{id}] {}", input.title);
            println!("{}", goal_message(config.personality, GoalEvent::Created));
        }
        GoalCommands::Edit {
            id,
            title,
            description,
            area,
            target,
            clear_target,
            status,
        } => {
            let patch = GoalPatch {
                title,
                description,
                life_area: area
                    .as_deref()
                    .map(|raw| parse_enum("life area", raw, LifeArea::parse))
                    .transpose()?,
                target_date: if clear_target {
                    Some(None)
                } else {
                    parse_date(target.as_deref())?.map(Some)
                },
                status: status
                    .as_deref()
                    .map(|raw| parse_enum("goal status", raw, GoalStatus::parse))
                    .transpose()?,
            };
            let progress = database
                .unit_of_work(|uow| coordinator::update_goal(uow, id, &patch, Utc::now()))?;

            println!("Goal {id} updated");
            print_goal_progress(&progress);
        }
        GoalCommands::Complete { id } => {
            database.unit_of_work(|uow| coordinator::complete_goal(uow, id, Utc::now()))?;

            println!("Goal {id} completed");
            println!("{}", goal_message(config.personality, GoalEvent::Completed));
        }
        GoalCommands::Status { id, status } => {
            let status = parse_enum("goal status", &status, GoalStatus::parse)?;
            let progress = database
                .unit_of_work(|uow| coordinator::set_goal_status(uow, id, status, Utc::now()))?;

            print_goal_progress(&progress);
            if status == GoalStatus::Completed {
                println!("{}", goal_message(config.personality, GoalEvent::Completed));
            }
        }
        GoalCommands::Delete { id } => {
            let unlinked = database.unit_of_work(|uow| coordinator::delete_goal(uow, id))?;
            println!("Goal {id} deleted, {unlinked} task(s) kept without a goal");
        }
        GoalCommands::Progress { id } => {
            let progress =
                database.unit_of_work(|uow| coordinator::refresh_goal_progress(uow, id))?;

            print_goal_progress(&progress);
            println!("{}", goal_message(config.personality, GoalEvent::Progress));
        }
        GoalCommands::List { status } => {
            let status = status
                .as_deref()
                .map(|raw| parse_enum("goal status", raw, GoalStatus::parse))
                .transpose()?;
            let goals = database.unit_of_work(|uow| uow.list_goals(status))?;

            if goals.is_empty() {
                println!("No goals");
            }
            for goal in &goals {
                println!("{}", report::render_goal_line(goal));
            }
        }
    }

    Ok(())
}

fn handle_task_command(command: TaskCommands) -> Result<()> {
    let config = Config::load()?;
    let mut database = Database::open(&config.db_path)?;

    match command {
        TaskCommands::Add {
            title,
            goal,
            description,
            energy,
            due,
        } => {
            let input = TaskInput {
                goal_id: goal,
                title,
                description,
                energy_required: parse_enum("energy", &energy, Energy::parse)?,
                due_date: parse_date(due.as_deref())?,
            };
            let (id, progress) =
                database.unit_of_work(|uow| coordinator::create_task(uow, &input, Utc::now()))?;

            println!("Task created: [{id}] {}", input.title);
            if let Some(progress) = progress {
                print_goal_progress(&progress);
            }
        }
        TaskCommands::Edit {
            id,
            title,
            description,
            energy,
            due,
            clear_due,
            goal,
            unlink,
        } => {
            let patch = TaskPatch {
                title,
                description,
                energy_required: energy
                    .as_deref()
                    .map(|raw| parse_enum("energy", raw, Energy::parse))
                    .transpose()?,
                due_date: if clear_due {
                    Some(None)
                } else {
                    parse_date(due.as_deref())?.map(Some)
                },
                goal_id: if unlink { Some(None) } else { goal.map(Some) },
            };
            let reassignment =
                database.unit_of_work(|uow| coordinator::update_task(uow, id, &patch))?;

            println!("Task {id} updated");
            for progress in [reassignment.previous, reassignment.current].iter().flatten() {
                print_goal_progress(progress);
            }
        }
        TaskCommands::Toggle { id } => {
            let toggle = database.unit_of_work(|uow| coordinator::toggle_task(uow, id, Utc::now()))?;

            println!(
                "Task {id} marked {}",
                if toggle.completed { "done" } else { "pending" }
            );
            if let Some(progress) = toggle.goal {
                print_goal_progress(&progress);
                if toggle.completed {
                    println!("{}", goal_message(config.personality, GoalEvent::Progress));
                }
            }
        }
        TaskCommands::Delete { id } => {
            let progress = database.unit_of_work(|uow| coordinator::delete_task(uow, id))?;

            println!("Task {id} deleted");
            if let Some(progress) = progress {
                print_goal_progress(&progress);
            }
        }
        TaskCommands::Link { id, goal } => {
            let reassignment =
                database.unit_of_work(|uow| coordinator::assign_task_goal(uow, id, goal))?;

            match goal {
                Some(goal_id) => println!("Task {id} linked to goal {goal_id}"),
                None => println!("Task {id} unlinked"),
            }
            for progress in [reassignment.previous, reassignment.current].iter().flatten() {
                print_goal_progress(progress);
            }
        }
        TaskCommands::List { filter, goal } => {
            let filter = parse_enum("task filter", &filter, TaskFilter::parse)?;
            let today = Local::now().date_naive();
            let tasks = database.unit_of_work(|uow| uow.list_tasks(filter, goal, today))?;

            if tasks.is_empty() {
                println!("No {} tasks", filter.as_str());
            }
            for task in &tasks {
                println!("{}", report::render_task_line(task));
            }
        }
    }

    Ok(())
}

fn handle_assess_command(command: AssessCommands) -> Result<()> {
    let config = Config::load()?;
    let mut database = Database::open(&config.db_path)?;

    match command {
        AssessCommands::Submit { scores, notes } => {
            let scores = parse_area_scores(&scores)?;
            let view = database.unit_of_work(|uow| {
                coordinator::submit_assessment(uow, &scores, &notes, Utc::now())
            })?;

            print!("{}", report::render_assessment(&view));
        }
        AssessCommands::Show { id } => {
            let view = database.unit_of_work(|uow| coordinator::assessment_view(uow, id))?;
            print!("{}", report::render_assessment(&view));
        }
        AssessCommands::Latest => {
            let summary = database.unit_of_work(|uow| {
                coordinator::latest_assessment(uow, Utc::now(), config.improvement_limit)
            })?;

            match summary {
                Some(summary) => {
                    print!("{}", report::render_assessment(&summary.view));
                    println!("\n_{} day(s) since this assessment_", summary.days_since);
                }
                None => println!("No assessments yet"),
            }
        }
        AssessCommands::History { limit } => {
            let assessments = database.unit_of_work(|uow| uow.list_assessments(limit))?;

            if assessments.is_empty() {
                println!("No assessments yet");
            }
            for assessment in &assessments {
                println!(
                    "- [{}] {} balance {:.1}",
                    assessment.id,
                    assessment.created_at.format("%Y-%m-%d"),
                    calculate_balance(&assessment.scores).overall_balance
                );
            }
        }
        AssessCommands::Delete { id } => {
            database.unit_of_work(|uow| coordinator::delete_assessment(uow, id))?;
            println!("Assessment {id} deleted");
        }
    }

    Ok(())
}

fn handle_config_command(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load()?;
            config.set_value(&key, &value)?;
            config.save()?;

            println!("Config saved: {key} = {value}");
            Ok(())
        }
        ConfigCommands::Get { key } => {
            let config = Config::load()?;
            let value = config
                .get_value(&key)
                .with_context(|| format!("Unsupported config key: {key}"))?;

            println!("{value}");
            Ok(())
        }
    }
}

fn handle_status() -> Result<()> {
    let config = Config::load()?;
    let mut database = Database::open(&config.db_path)?;
    let today = Local::now().date_naive();

    let (stats, goals, latest) = database.unit_of_work(|uow| {
        Ok((
            coordinator::habit_stats(uow, today)?,
            uow.list_goals(Some(GoalStatus::Active))?,
            coordinator::latest_assessment(uow, Utc::now(), config.improvement_limit)?,
        ))
    })?;

    println!("Elara status ({today})");
    println!(
        "- habits done today: {} / {} ({:.0}%)",
        stats.completed_today, stats.total_habits, stats.completion_rate_today
    );
    println!("- habits pending today: {}", stats.pending_today);
    println!("- active goals: {}", goals.len());
    match latest {
        Some(summary) => {
            println!(
                "- life balance: {:.1} ({} day(s) ago)",
                summary.view.balance.overall_balance, summary.days_since
            );
            for area in &summary.view.improvement_areas {
                println!("  - focus: {} ({})", area.area.label(), area.priority.as_str());
            }
        }
        None => println!("- life balance: no assessment yet"),
    }

    Ok(())
}

fn print_check_in(id: i64, date: NaiveDate, outcome: &CheckInOutcome) {
    match outcome {
        CheckInOutcome::Completed {
            streak_count,
            best_streak,
            celebration,
            ..
        } => {
            println!(
                "{} [{id}] {}",
                StreakTier::from_count(*streak_count).indicator(),
                celebration_message(*celebration, *streak_count)
            );
            println!("- streak: {streak_count} (best {best_streak})");
        }
        CheckInOutcome::Logged { streak_count } => {
            println!("[{id}] Logged {date}. This period already counts; streak stays at {streak_count}");
        }
        CheckInOutcome::AlreadyDone { streak_count } => {
            println!("[{id}] Already checked in for {date}. Current streak: {streak_count}");
        }
        CheckInOutcome::OutOfOrder { last_completed } => {
            println!("[{id}] Not recorded: {date} is before the last completion ({last_completed})");
        }
    }
}

fn print_goal_progress(progress: &GoalProgress) {
    println!(
        "- goal {}: {}% ({}/{} tasks, {})",
        progress.goal_id,
        progress.progress,
        progress.completed_tasks,
        progress.total_tasks,
        progress.status.as_str()
    );
}

fn parse_area_scores(raw: &[String]) -> Result<AreaScores> {
    let pairs = raw
        .iter()
        .map(|entry| {
            let (area, score) = entry
                .split_once('=')
                .with_context(|| format!("Invalid score: {entry}. Example: career=7"))?;
            let area = parse_enum("life area", area, LifeArea::parse)?;
            let score = score
                .trim()
                .parse::<i64>()
                .with_context(|| format!("Invalid score for {}: {score}", area.as_str()))?;
            Ok((area, score))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AreaScores::from_pairs(pairs)?)
}

fn parse_enum<T>(field: &'static str, raw: &str, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
    Ok(parse(raw).ok_or_else(|| CoreError::InvalidValue {
        field,
        value: raw.to_string(),
    })?)
}

fn parse_date(input: Option<&str>) -> Result<Option<NaiveDate>> {
    input
        .map(|date| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .with_context(|| format!("Invalid date format: {date}. Example: 2026-02-18"))
        })
        .transpose()
}

fn parse_optional_date(input: Option<String>) -> Result<NaiveDate> {
    Ok(parse_date(input.as_deref())?.unwrap_or_else(|| Local::now().date_naive()))
}
