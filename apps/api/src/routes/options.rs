use axum::Json;
use serde::Serialize;

use crate::models::goal::NetworkingGoal;
use crate::models::profile::ProfileCategory;

#[derive(Debug, Serialize)]
pub struct CategoryOption {
    pub id: ProfileCategory,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct GoalOption {
    pub id: NetworkingGoal,
    pub label: &'static str,
    pub description: &'static str,
}

/// GET /api/v1/categories
pub async fn handle_list_categories() -> Json<Vec<CategoryOption>> {
    let options = ProfileCategory::ALL
        .iter()
        .map(|c| CategoryOption {
            id: *c,
            label: c.label(),
            description: c.description(),
        })
        .collect();
    Json(options)
}

/// GET /api/v1/goals
pub async fn handle_list_goals() -> Json<Vec<GoalOption>> {
    let options = NetworkingGoal::ALL
        .iter()
        .map(|g| GoalOption {
            id: *g,
            label: g.label(),
            description: g.description(),
        })
        .collect();
    Json(options)
}
