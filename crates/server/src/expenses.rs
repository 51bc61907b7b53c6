//! Expense API endpoints

use api_types::{
    Message,
    expense::{AmountInput, ExpenseInput, ExpenseListQuery, ExpenseView},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use engine::CategoryFilter;

use crate::{ServerError, server::ServerState};

fn map_expense(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        date: expense.date,
        category: expense.category,
        amount: expense.amount.as_str().to_string(),
    }
}

fn split_input(payload: ExpenseInput) -> (String, Option<String>) {
    (
        payload.category.unwrap_or_default(),
        payload.amount.and_then(AmountInput::into_text),
    )
}

pub async fn add(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseInput>,
) -> Result<Json<Message>, ServerError> {
    let (category, amount) = split_input(payload);
    state.engine.add(&category, amount.as_deref()).await?;
    Ok(Json(Message::new("Expense added!")))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ExpenseListQuery>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let filter = CategoryFilter::from_query(query.category.as_deref());
    let expenses = state
        .engine
        .list(&filter)
        .await?
        .into_iter()
        .map(map_expense)
        .collect();
    Ok(Json(expenses))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete(&id).await?;
    Ok(Json(Message::new("Deleted!")))
}

pub async fn edit(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseInput>,
) -> Result<Json<Message>, ServerError> {
    let (category, amount) = split_input(payload);
    state.engine.edit(&id, &category, amount.as_deref()).await?;
    Ok(Json(Message::new("Edited!")))
}
