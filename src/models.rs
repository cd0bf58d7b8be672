use crate::codec::hhmm;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub water_cups: u8,
    pub did_exercise: bool,
    pub sleep_start: NaiveTime,
    pub sleep_end: NaiveTime,
    pub todos: Vec<TodoItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

/// A user action coming from the view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Intent {
    IncrementWater,
    DecrementWater,
    SetExercise(bool),
    SetSleepStart(#[serde(with = "hhmm")] NaiveTime),
    SetSleepEnd(#[serde(with = "hhmm")] NaiveTime),
    AddTodo(String),
    ToggleTodo(String),
    DeleteTodo(String),
    RefreshQuote,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub date: String,
    pub date_label: String,
    pub water_cups: u8,
    pub water_goal: u8,
    pub water_progress_percent: f64,
    pub did_exercise: bool,
    pub sleep_start: String,
    pub sleep_end: String,
    pub sleep_hours: f64,
    pub todos: Vec<TodoItem>,
    pub incomplete_count: usize,
    pub quote: Quote,
}

#[derive(Debug, Deserialize)]
pub struct ExerciseForm {
    pub exercise: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SleepForm {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TodoForm {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intents_parse_from_tagged_json() {
        let start: Intent = serde_json::from_str(r#"{"type":"set_sleep_start","value":"22:30"}"#).unwrap();
        assert_eq!(start, Intent::SetSleepStart(NaiveTime::from_hms_opt(22, 30, 0).unwrap()));

        let water: Intent = serde_json::from_str(r#"{"type":"increment_water"}"#).unwrap();
        assert_eq!(water, Intent::IncrementWater);

        let todo: Intent = serde_json::from_str(r#"{"type":"add_todo","value":"Stretch"}"#).unwrap();
        assert_eq!(todo, Intent::AddTodo("Stretch".to_string()));

        assert!(serde_json::from_str::<Intent>(r#"{"type":"set_sleep_end","value":"late"}"#).is_err());
        assert!(serde_json::from_str::<Intent>(r#"{"type":"set_sleep_end"}"#).is_err());
    }
}
