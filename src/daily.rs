use crate::codec::{
    WATER_CEILING, decode_day, decode_flag, decode_time, decode_todos, decode_water, encode_day,
    encode_flag, encode_time, encode_todos, encode_water,
};
use crate::models::{DailyRecord, DashboardSnapshot, Intent, Quote, TodoItem};
use crate::quote::{quote_of_day, random_quote};
use crate::storage::{KvStore, StoreError};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, SecondsFormat, Utc};
use tracing::{debug, info, warn};

pub const WATER_KEY: &str = "waterCups";
pub const EXERCISE_KEY: &str = "didExercise";
pub const SLEEP_START_KEY: &str = "sleepStart";
pub const SLEEP_END_KEY: &str = "sleepEnd";
pub const TODOS_KEY: &str = "todos";
pub const LAST_ACTIVE_KEY: &str = "lastActiveDate";

/// Header date, e.g. `Mon Oct 19 2026`.
pub const DATE_LABEL_FORMAT: &str = "%a %b %-d %Y";

/// Display denominator for the water bar.
pub const WATER_GOAL: u8 = 8;

impl Default for DailyRecord {
    fn default() -> Self {
        Self {
            water_cups: 0,
            did_exercise: false,
            sleep_start: default_sleep_start(),
            sleep_end: default_sleep_end(),
            todos: Vec::new(),
        }
    }
}

fn default_sleep_start() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_sleep_end() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Owns the daily record and writes every change through to the store.
#[derive(Debug)]
pub struct Dashboard<S> {
    store: S,
    record: DailyRecord,
    last_todo_id: i64,
}

impl<S: KvStore> Dashboard<S> {
    pub fn load(store: S) -> Self {
        let record = load_record(&store);
        let last_todo_id = record
            .todos
            .iter()
            .filter_map(|todo| todo.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        debug!(
            water_cups = record.water_cups,
            todos = record.todos.len(),
            "loaded daily record"
        );
        Self {
            store,
            record,
            last_todo_id,
        }
    }

    pub fn record(&self) -> &DailyRecord {
        &self.record
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resets the daily counters when the last active day differs from
    /// `today`. The to-do list carries over.
    pub fn check_day_reset(&mut self, today: NaiveDate) -> bool {
        let last_active = self
            .store
            .get(LAST_ACTIVE_KEY)
            .and_then(|raw| decode_day(&raw).ok());
        if last_active == Some(today) {
            return false;
        }

        info!(?last_active, %today, "new day, resetting daily counters");
        self.record.water_cups = 0;
        self.record.did_exercise = false;
        let today_raw = encode_day(today);
        self.persist_with(&[(LAST_ACTIVE_KEY, today_raw.as_str())]);
        true
    }

    /// Runs once per page load: day rollover first, then the daily quote.
    pub fn begin_session(&mut self, today: NaiveDate) -> Quote {
        self.check_day_reset(today);
        self.quote_of_day(today)
    }

    pub fn increment_water(&mut self) {
        if self.record.water_cups >= WATER_CEILING {
            return;
        }
        self.record.water_cups += 1;
        self.persist();
    }

    pub fn decrement_water(&mut self) {
        if self.record.water_cups == 0 {
            return;
        }
        self.record.water_cups -= 1;
        self.persist();
    }

    pub fn set_exercise(&mut self, flag: bool) {
        self.record.did_exercise = flag;
        self.persist();
    }

    pub fn set_sleep_start(&mut self, start: NaiveTime) {
        self.record.sleep_start = start;
        self.persist();
    }

    pub fn set_sleep_end(&mut self, end: NaiveTime) {
        self.record.sleep_end = end;
        self.persist();
    }

    pub fn sleep_duration_hours(&self) -> f64 {
        sleep_duration_hours(self.record.sleep_start, self.record.sleep_end)
    }

    pub fn water_progress_percent(&self) -> f64 {
        f64::from(self.record.water_cups) / f64::from(WATER_GOAL) * 100.0
    }

    pub fn add_todo(&mut self, raw_text: &str) -> Option<&TodoItem> {
        self.add_todo_at(raw_text, Local::now())
    }

    pub fn add_todo_at(&mut self, raw_text: &str, now: DateTime<Local>) -> Option<&TodoItem> {
        let text = raw_text.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.next_todo_id(now.timestamp_millis());
        self.record.todos.push(TodoItem {
            id: id.to_string(),
            text: text.to_string(),
            completed: false,
            created_at: now.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true),
        });
        self.persist();
        self.record.todos.last()
    }

    pub fn toggle_todo(&mut self, id: &str) {
        let Some(todo) = self.record.todos.iter_mut().find(|todo| todo.id == id) else {
            debug!(id, "toggle for unknown todo ignored");
            return;
        };
        todo.completed = !todo.completed;
        self.persist();
    }

    pub fn delete_todo(&mut self, id: &str) {
        let before = self.record.todos.len();
        self.record.todos.retain(|todo| todo.id != id);
        if self.record.todos.len() == before {
            debug!(id, "delete for unknown todo ignored");
            return;
        }
        self.persist();
    }

    pub fn incomplete_count(&self) -> usize {
        self.record.todos.iter().filter(|todo| !todo.completed).count()
    }

    /// Incomplete items first, each group in creation order.
    pub fn display_order(&self) -> Vec<TodoItem> {
        let (mut open, done): (Vec<_>, Vec<_>) = self
            .record
            .todos
            .iter()
            .cloned()
            .partition(|todo| !todo.completed);
        open.extend(done);
        open
    }

    pub fn quote_of_day(&mut self, today: NaiveDate) -> Quote {
        quote_of_day(&mut self.store, today)
    }

    pub fn random_quote(&self) -> Quote {
        random_quote(&mut rand::thread_rng())
    }

    /// Applies one intent. Only `RefreshQuote` yields a quote.
    pub fn apply(&mut self, intent: Intent) -> Option<Quote> {
        match intent {
            Intent::IncrementWater => self.increment_water(),
            Intent::DecrementWater => self.decrement_water(),
            Intent::SetExercise(flag) => self.set_exercise(flag),
            Intent::SetSleepStart(start) => self.set_sleep_start(start),
            Intent::SetSleepEnd(end) => self.set_sleep_end(end),
            Intent::AddTodo(text) => {
                self.add_todo(&text);
            }
            Intent::ToggleTodo(id) => self.toggle_todo(&id),
            Intent::DeleteTodo(id) => self.delete_todo(&id),
            Intent::RefreshQuote => return Some(self.random_quote()),
        }
        None
    }

    pub fn snapshot(&mut self, today: NaiveDate) -> DashboardSnapshot {
        let quote = self.quote_of_day(today);
        self.snapshot_with_quote(today, quote)
    }

    pub fn snapshot_with_quote(&self, today: NaiveDate, quote: Quote) -> DashboardSnapshot {
        DashboardSnapshot {
            date: encode_day(today),
            date_label: today.format(DATE_LABEL_FORMAT).to_string(),
            water_cups: self.record.water_cups,
            water_goal: WATER_GOAL,
            water_progress_percent: self.water_progress_percent(),
            did_exercise: self.record.did_exercise,
            sleep_start: encode_time(self.record.sleep_start),
            sleep_end: encode_time(self.record.sleep_end),
            sleep_hours: round_tenth(self.sleep_duration_hours()),
            todos: self.display_order(),
            incomplete_count: self.incomplete_count(),
            quote,
        }
    }

    fn next_todo_id(&mut self, millis: i64) -> i64 {
        let id = if millis > self.last_todo_id {
            millis
        } else {
            self.last_todo_id + 1
        };
        self.last_todo_id = id;
        id
    }

    fn persist(&mut self) {
        self.persist_with(&[]);
    }

    fn persist_with(&mut self, extra: &[(&str, &str)]) {
        if let Err(err) = self.try_persist(extra) {
            warn!("failed to persist daily record: {err}");
        }
    }

    /// One flush per intent: every record key plus `extra`.
    fn try_persist(&mut self, extra: &[(&str, &str)]) -> Result<(), StoreError> {
        let water = encode_water(self.record.water_cups);
        let sleep_start = encode_time(self.record.sleep_start);
        let sleep_end = encode_time(self.record.sleep_end);
        let todos = encode_todos(&self.record.todos)?;
        let mut entries = vec![
            (WATER_KEY, water.as_str()),
            (EXERCISE_KEY, encode_flag(self.record.did_exercise)),
            (SLEEP_START_KEY, sleep_start.as_str()),
            (SLEEP_END_KEY, sleep_end.as_str()),
            (TODOS_KEY, todos.as_str()),
        ];
        entries.extend_from_slice(extra);
        self.store.set_many(&entries)
    }
}

fn load_record<S: KvStore>(store: &S) -> DailyRecord {
    let defaults = DailyRecord::default();
    DailyRecord {
        water_cups: decode_field(store, WATER_KEY, decode_water).unwrap_or(defaults.water_cups),
        did_exercise: store.get(EXERCISE_KEY).is_some_and(|raw| decode_flag(&raw)),
        sleep_start: decode_field(store, SLEEP_START_KEY, decode_time).unwrap_or(defaults.sleep_start),
        sleep_end: decode_field(store, SLEEP_END_KEY, decode_time).unwrap_or(defaults.sleep_end),
        todos: decode_field(store, TODOS_KEY, decode_todos).unwrap_or(defaults.todos),
    }
}

fn decode_field<S, T, E>(store: &S, key: &str, decode: impl Fn(&str) -> Result<T, E>) -> Option<T>
where
    S: KvStore,
    E: std::fmt::Display,
{
    let raw = store.get(key)?;
    match decode(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, "ignoring stored value: {err}");
            None
        }
    }
}

/// Hours from `start` to `end`, wrapping past midnight when `end` is earlier.
pub fn sleep_duration_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    let seconds = (end - start).num_seconds();
    let seconds = if end < start { seconds + 24 * 3600 } else { seconds };
    seconds as f64 / 3600.0
}

pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
