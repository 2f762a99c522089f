use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "elara",
    about = "Habit streaks, goal progress and life balance tracking"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Habit {
        #[command(subcommand)]
        command: HabitCommands,
    },
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    Assess {
        #[command(subcommand)]
        command: AssessCommands,
    },
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Today's habits, active goals and the latest assessment at a glance.
    Status,
}

#[derive(Debug, Subcommand)]
pub enum HabitCommands {
    Add {
        name: String,
        #[arg(long)]
        cue: String,
        #[arg(long)]
        routine: String,
        #[arg(long)]
        reward: String,
        #[arg(long)]
        description: Option<String>,
        /// daily or weekly
        #[arg(long, default_value = "daily")]
        frequency: String,
    },
    Checkin {
        id: i64,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Check in several habits at once; all active habits when no id is given.
    CheckinAll {
        ids: Vec<i64>,
        #[arg(long)]
        date: Option<String>,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        cue: Option<String>,
        #[arg(long)]
        routine: Option<String>,
        #[arg(long)]
        reward: Option<String>,
        #[arg(long)]
        frequency: Option<String>,
    },
    /// Pause an active habit or resume a paused one.
    Pause { id: i64 },
    Delete { id: i64 },
    List {
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    Show {
        id: i64,
        #[arg(long)]
        days: Option<u32>,
    },
    Stats {
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum GoalCommands {
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        area: Option<String>,
        #[arg(long)]
        target: Option<String>,
    },
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        area: Option<String>,
        #[arg(long, conflicts_with = "clear_target")]
        target: Option<String>,
        #[arg(long, default_value_t = false)]
        clear_target: bool,
        #[arg(long)]
        status: Option<String>,
    },
    Complete { id: i64 },
    Status { id: i64, status: String },
    Delete { id: i64 },
    /// Recompute progress from the goal's tasks.
    Progress { id: i64 },
    List {
        #[arg(long)]
        status: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommands {
    Add {
        title: String,
        #[arg(long)]
        goal: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "medium")]
        energy: String,
        #[arg(long)]
        due: Option<String>,
    },
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        energy: Option<String>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        #[arg(long, default_value_t = false)]
        clear_due: bool,
        #[arg(long, conflicts_with = "unlink")]
        goal: Option<i64>,
        #[arg(long, default_value_t = false)]
        unlink: bool,
    },
    Toggle { id: i64 },
    Delete { id: i64 },
    /// Link a task to a goal, or unlink it when no goal is given.
    Link {
        id: i64,
        #[arg(long)]
        goal: Option<i64>,
    },
    List {
        #[arg(long, default_value = "all")]
        filter: String,
        #[arg(long)]
        goal: Option<i64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum AssessCommands {
    Submit {
        /// area=score, once per life area (e.g. --score career=7)
        #[arg(long = "score", required = true)]
        scores: Vec<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    Show { id: i64 },
    Latest,
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    Set { key: String, value: String },
    Get { key: String },
}
