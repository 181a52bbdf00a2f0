use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'daily_goals' table.
/// No route reads or writes it yet.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DailyGoal {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub goal_name: String,
    pub target_value: i64,
    pub current_value: i64,
    pub unit: String,
}
