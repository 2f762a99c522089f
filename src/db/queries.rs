pub const CREATE_HABITS: &str = r#"
CREATE TABLE IF NOT EXISTS habits (
  id             INTEGER PRIMARY KEY AUTOINCREMENT,
  name           TEXT NOT NULL,
  description    TEXT,
  cue            TEXT NOT NULL,
  routine        TEXT NOT NULL,
  reward         TEXT NOT NULL,
  frequency      TEXT NOT NULL DEFAULT 'daily',
  streak_count   INTEGER NOT NULL DEFAULT 0,
  best_streak    INTEGER NOT NULL DEFAULT 0,
  last_completed TEXT,
  active         INTEGER NOT NULL DEFAULT 1,
  created_at     TEXT NOT NULL
);
"#;

pub const CREATE_HABIT_LOGS: &str = r#"
CREATE TABLE IF NOT EXISTS habit_logs (
  id             INTEGER PRIMARY KEY AUTOINCREMENT,
  habit_id       INTEGER NOT NULL REFERENCES habits(id) ON DELETE CASCADE,
  completed_date TEXT NOT NULL,
  note           TEXT,
  UNIQUE (habit_id, completed_date)
);
"#;

pub const CREATE_GOALS: &str = r#"
CREATE TABLE IF NOT EXISTS goals (
  id           INTEGER PRIMARY KEY AUTOINCREMENT,
  title        TEXT NOT NULL,
  description  TEXT,
  life_area    TEXT,
  target_date  TEXT,
  status       TEXT NOT NULL DEFAULT 'active',
  progress     INTEGER NOT NULL DEFAULT 0,
  created_at   TEXT NOT NULL,
  completed_at TEXT
);
"#;

pub const CREATE_TASKS: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
  id              INTEGER PRIMARY KEY AUTOINCREMENT,
  goal_id         INTEGER REFERENCES goals(id) ON DELETE SET NULL,
  title           TEXT NOT NULL,
  description     TEXT,
  completed       INTEGER NOT NULL DEFAULT 0,
  completed_at    TEXT,
  energy_required TEXT NOT NULL DEFAULT 'medium',
  due_date        TEXT,
  created_at      TEXT NOT NULL,
  CHECK (completed = 0 OR completed_at IS NOT NULL)
);
"#;

pub const CREATE_ASSESSMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS assessments (
  id                    INTEGER PRIMARY KEY AUTOINCREMENT,
  career_score          INTEGER NOT NULL CHECK (career_score BETWEEN 1 AND 10),
  health_score          INTEGER NOT NULL CHECK (health_score BETWEEN 1 AND 10),
  relationships_score   INTEGER NOT NULL CHECK (relationships_score BETWEEN 1 AND 10),
  finance_score         INTEGER NOT NULL CHECK (finance_score BETWEEN 1 AND 10),
  personal_growth_score INTEGER NOT NULL CHECK (personal_growth_score BETWEEN 1 AND 10),
  fun_recreation_score  INTEGER NOT NULL CHECK (fun_recreation_score BETWEEN 1 AND 10),
  environment_score     INTEGER NOT NULL CHECK (environment_score BETWEEN 1 AND 10),
  purpose_score         INTEGER NOT NULL CHECK (purpose_score BETWEEN 1 AND 10),
  notes                 TEXT NOT NULL DEFAULT '',
  created_at            TEXT NOT NULL
);
"#;

pub const INDEX_TASKS_GOAL: &str = "CREATE INDEX IF NOT EXISTS idx_tasks_goal ON tasks(goal_id);";

pub const INDEX_ASSESSMENTS_CREATED_AT: &str =
    "CREATE INDEX IF NOT EXISTS idx_assessments_created_at ON assessments(created_at);";

pub const HABIT_COLUMNS: &str = "id, name, description, cue, routine, reward, frequency, streak_count, best_streak, last_completed, active, created_at";

pub const GOAL_COLUMNS: &str =
    "id, title, description, life_area, target_date, status, progress, created_at, completed_at";

pub const TASK_COLUMNS: &str = "id, goal_id, title, description, completed, completed_at, energy_required, due_date, created_at";

pub const ASSESSMENT_COLUMNS: &str = "id, career_score, health_score, relationships_score, finance_score, personal_growth_score, fun_recreation_score, environment_score, purpose_score, notes, created_at";

pub fn schema_statements() -> Vec<&'static str> {
    vec![
        CREATE_HABITS,
        CREATE_HABIT_LOGS,
        CREATE_GOALS,
        CREATE_TASKS,
        CREATE_ASSESSMENTS,
        INDEX_TASKS_GOAL,
        INDEX_ASSESSMENTS_CREATED_AT,
    ]
}
