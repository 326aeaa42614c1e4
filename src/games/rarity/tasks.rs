//! Daily tasks and the daily streak.

use chrono::NaiveDate;
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::GameConfig;
use super::error::GameError;
use super::state::PlayerState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskKind {
    Clicks,
    Points,
    FindRare { rarity: String },
    NewRarity,
}

/// Something that happened during a click, fed to every open task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskEvent<'a> {
    Clicks(u64),
    Points(u64),
    Found(&'a str),
    NewRarity,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskInstance {
    pub id: String,
    pub name: String,
    pub kind: TaskKind,
    pub target: u64,
    pub progress: u64,
    pub reward: u64,
    pub completed: bool,
    pub claimed: bool,
}

impl TaskInstance {
    /// Advance progress for a matching event. Completed tasks ignore events.
    pub fn apply(&mut self, event: TaskEvent<'_>) {
        if self.completed {
            return;
        }
        let amount = match (&self.kind, event) {
            (TaskKind::Clicks, TaskEvent::Clicks(n)) => n,
            (TaskKind::Points, TaskEvent::Points(n)) => n,
            (TaskKind::FindRare { rarity }, TaskEvent::Found(name)) if rarity == name => 1,
            (TaskKind::NewRarity, TaskEvent::NewRarity) => 1,
            _ => return,
        };
        self.progress = self.progress.saturating_add(amount).min(self.target);
        if self.progress >= self.target {
            self.completed = true;
        }
    }

    pub fn is_claimable(&self) -> bool {
        self.completed && !self.claimed
    }
}

#[derive(Clone, Copy)]
enum TemplateKind {
    Clicks,
    Points,
    FindRare(&'static str),
    NewRarity,
}

struct TaskTemplate {
    id: &'static str,
    name: &'static str,
    target: u64,
    reward: u64,
    kind: TemplateKind,
}

const fn task(id: &'static str, name: &'static str, target: u64, reward: u64, kind: TemplateKind) -> TaskTemplate {
    TaskTemplate { id, name, target, reward, kind }
}

const TASK_POOL: &[TaskTemplate] = &[
    task("clicks_50", "Click 50 times", 50, 100, TemplateKind::Clicks),
    task("clicks_100", "Click 100 times", 100, 250, TemplateKind::Clicks),
    task("clicks_500", "Click 500 times", 500, 750, TemplateKind::Clicks),
    task("rare_1", "Find a Rare rarity", 1, 150, TemplateKind::FindRare("Rare")),
    task("epic_1", "Find an Epic rarity", 1, 500, TemplateKind::FindRare("Epic")),
    task("points_500", "Earn 500 points", 500, 200, TemplateKind::Points),
    task("points_2000", "Earn 2000 points", 2000, 600, TemplateKind::Points),
    task("new_rarity", "Discover a new rarity", 1, 300, TemplateKind::NewRarity),
];

impl TaskTemplate {
    fn instantiate(&self) -> TaskInstance {
        let kind = match self.kind {
            TemplateKind::Clicks => TaskKind::Clicks,
            TemplateKind::Points => TaskKind::Points,
            TemplateKind::FindRare(rarity) => TaskKind::FindRare {
                rarity: rarity.to_string(),
            },
            TemplateKind::NewRarity => TaskKind::NewRarity,
        };
        TaskInstance {
            id: self.id.to_string(),
            name: self.name.to_string(),
            kind,
            target: self.target,
            progress: 0,
            reward: self.reward,
            completed: false,
            claimed: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyTasks {
    pub day: NaiveDate,
    pub tasks: Vec<TaskInstance>,
}

impl DailyTasks {
    pub fn apply(&mut self, event: TaskEvent<'_>) {
        for task in &mut self.tasks {
            task.apply(event);
        }
    }
}

/// Sample `count` distinct tasks from the pool.
pub fn generate<R: Rng + ?Sized>(day: NaiveDate, count: usize, rng: &mut R) -> DailyTasks {
    let amount = count.min(TASK_POOL.len());
    let tasks = index::sample(rng, TASK_POOL.len(), amount)
        .into_iter()
        .map(|i| TASK_POOL[i].instantiate())
        .collect();
    DailyTasks { day, tasks }
}

/// Replace the task set if it belongs to another day. Returns true if new
/// tasks were generated.
pub fn ensure_for_day<R: Rng + ?Sized>(
    state: &mut PlayerState,
    today: NaiveDate,
    config: &GameConfig,
    rng: &mut R,
) -> bool {
    if state.daily.as_ref().is_some_and(|d| d.day == today) {
        return false;
    }
    let daily = generate(today, config.daily.tasks_per_day, rng);
    debug!(day = %today, tasks = ?daily.tasks.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(), "daily tasks generated");
    state.daily = Some(daily);
    true
}

pub fn record(state: &mut PlayerState, event: TaskEvent<'_>) {
    if let Some(daily) = state.daily.as_mut() {
        daily.apply(event);
    }
}

/// Pay out a completed task once.
pub fn claim_task(state: &mut PlayerState, id: &str) -> Result<u64, GameError> {
    let task = state
        .daily
        .as_mut()
        .and_then(|d| d.tasks.iter_mut().find(|t| t.id == id))
        .ok_or_else(|| GameError::InvalidTarget(format!("unknown task {id}")))?;
    if !task.is_claimable() {
        return Err(GameError::InvalidTarget(format!("task {id} not claimable")));
    }
    task.claimed = true;
    let reward = task.reward;
    state.points = state.points.saturating_add(reward);
    info!(task = id, reward, "task claimed");
    Ok(reward)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Streak {
    pub count: u32,
    pub last_claimed: Option<NaiveDate>,
}

impl Streak {
    pub fn claimed_on(&self, day: NaiveDate) -> bool {
        self.last_claimed == Some(day)
    }
}

/// Claim today's streak reward. Consecutive days extend the streak; any gap
/// restarts it at 1.
pub fn claim_streak(state: &mut PlayerState, today: NaiveDate, config: &GameConfig) -> Result<u64, GameError> {
    if state.streak.claimed_on(today) {
        return Err(GameError::InvalidTarget("streak already claimed today".into()));
    }
    let continues = match (state.streak.last_claimed, today.pred_opt()) {
        (Some(last), Some(yesterday)) => last == yesterday,
        _ => false,
    };
    state.streak.count = if continues {
        state.streak.count.saturating_add(1)
    } else {
        1
    };
    state.streak.last_claimed = Some(today);

    let reward = config
        .daily
        .streak_reward_base
        .saturating_mul(u64::from(state.streak.count));
    state.points = state.points.saturating_add(reward);
    info!(streak = state.streak.count, reward, "streak claimed");
    Ok(reward)
}
