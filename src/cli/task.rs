//! Task commands: list, add, update, delete, reorder

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Args;

use super::{Reported, TABLE_COL_NAME};
use crate::mask::format_currency_display;
use crate::tasks::form::DEADLINE_FORMAT;
use crate::tasks::{Task, TaskForm, TaskManager, TaskPatch};

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task name
    name: String,

    /// Cost, e.g. 1250.50
    #[arg(short, long)]
    cost: String,

    /// Deadline (YYYY-MM-DD)
    #[arg(short, long)]
    deadline: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Task ID
    id: i64,

    /// New name
    #[arg(short, long)]
    name: Option<String>,

    /// New cost
    #[arg(short, long)]
    cost: Option<f64>,

    /// New deadline (YYYY-MM-DD)
    #[arg(short, long)]
    deadline: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task ID
    id: i64,
}

#[derive(Args)]
pub struct ReorderArgs {
    /// Task IDs in the order they should appear first
    #[arg(required = true)]
    ids: Vec<i64>,
}

pub async fn run_list(manager: &TaskManager, args: ListArgs) -> Result<()> {
    manager.load_tasks().await;
    if let Some(err) = manager.error() {
        return Err(Reported(err).into());
    }

    let tasks = manager.tasks();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    print_table(&tasks);
    Ok(())
}

pub async fn run_add(manager: &TaskManager, args: AddArgs) -> Result<()> {
    let input = TaskForm::new(args.name, args.cost, args.deadline).validate()?;

    match manager.create_task(&input).await {
        Some(task) => {
            println!("Created: {}", task);
            Ok(())
        }
        None => Err(Reported(manager.error().unwrap_or_default()).into()),
    }
}

pub async fn run_update(manager: &TaskManager, args: UpdateArgs) -> Result<()> {
    let patch = build_patch(args.name, args.cost, args.deadline)?;

    match manager.update_task(args.id, &patch).await {
        Some(task) => {
            println!("Updated: {}", task);
            Ok(())
        }
        None => Err(Reported(manager.error().unwrap_or_default()).into()),
    }
}

pub async fn run_delete(manager: &TaskManager, args: DeleteArgs) -> Result<()> {
    manager
        .delete_task(args.id)
        .await
        .map_err(|e| Reported(e.to_string()))?;
    println!("Deleted task #{}", args.id);
    Ok(())
}

pub async fn run_reorder(manager: &TaskManager, args: ReorderArgs) -> Result<()> {
    manager.load_tasks().await;
    if let Some(err) = manager.error() {
        return Err(Reported(err).into());
    }

    let reordered = apply_order(&manager.tasks(), &args.ids)?;
    match manager.reorder_tasks(&reordered).await {
        // The reload after a successful batch can still fail.
        Some(_) if manager.error().is_some() => {
            Err(Reported(manager.error().unwrap_or_default()).into())
        }
        Some(tasks) => {
            print_table(&tasks);
            Ok(())
        }
        None => Err(Reported(manager.error().unwrap_or_default()).into()),
    }
}

fn build_patch(
    name: Option<String>,
    cost: Option<f64>,
    deadline: Option<String>,
) -> Result<TaskPatch> {
    if let Some(name) = &name {
        if name.trim().is_empty() {
            bail!("Name cannot be empty");
        }
    }
    if let Some(cost) = cost {
        if !cost.is_finite() || cost < 0.0 {
            bail!("Cost must be zero or greater");
        }
    }
    if let Some(deadline) = &deadline {
        if NaiveDate::parse_from_str(deadline, DEADLINE_FORMAT).is_err() {
            bail!("Deadline must be a date (YYYY-MM-DD)");
        }
    }

    let patch = TaskPatch {
        name: name.map(|n| n.trim().to_string()),
        cost,
        deadline,
        order_number: None,
    };
    if patch.is_empty() {
        bail!("Nothing to update: pass --name, --cost or --deadline");
    }
    Ok(patch)
}

/// Give `ids` the positions 1..=n and place every other task after them,
/// keeping its current relative order.
pub fn apply_order(tasks: &[Task], ids: &[i64]) -> Result<Vec<Task>> {
    let mut front = Vec::with_capacity(ids.len());
    for (i, id) in ids.iter().enumerate() {
        if ids[..i].contains(id) {
            bail!("Task #{} listed more than once", id);
        }
        match tasks.iter().find(|t| t.id == *id) {
            Some(task) => front.push(task.clone()),
            None => bail!("Task not found: #{}", id),
        }
    }

    let rest = tasks.iter().filter(|t| !ids.contains(&t.id)).cloned();
    Ok(front
        .into_iter()
        .chain(rest)
        .enumerate()
        .map(|(i, mut task)| {
            task.order_number = i as i64 + 1;
            task
        })
        .collect())
}

fn print_table(tasks: &[Task]) {
    println!(
        "{:>5} {:>6} {:<width$} {:>14} DEADLINE",
        "ORDER",
        "ID",
        "NAME",
        "COST",
        width = TABLE_COL_NAME
    );
    println!("{}", "-".repeat(TABLE_COL_NAME + 40));
    for task in tasks {
        println!(
            "{:>5} {:>6} {:<width$} {:>14} {}",
            task.order_number,
            task.id,
            super::truncate(&task.name, TABLE_COL_NAME),
            format_currency_display(&task.cost.to_string()),
            task.deadline,
            width = TABLE_COL_NAME
        );
    }
}
