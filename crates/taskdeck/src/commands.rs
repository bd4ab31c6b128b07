//! Handlers for the non-interactive subcommands.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use taskdeck_app::{Change, StateStore, TaskBoard, TaskDraft};
use taskdeck_core::{Priority, Status, TaskFilter, TaskId, parse_date};

use crate::view;
use crate::{Command, LsFormat};

pub fn run<S: StateStore>(mut board: TaskBoard<S>, command: Command) -> Result<()> {
    match command {
        Command::Add {
            title,
            desc,
            priority,
            due,
        } => handle_add(&mut board, title, desc, &priority, due.as_deref()),
        Command::Ls {
            search,
            priority,
            due,
            status,
            sort,
            format,
        } => handle_ls(
            &mut board,
            search,
            priority.as_deref(),
            due.as_deref(),
            status.as_deref(),
            sort.as_deref(),
            format,
        ),
        Command::Toggle { id } => handle_toggle(&mut board, TaskId(id)),
        Command::Rm { id, yes } => handle_rm(&mut board, TaskId(id), yes),
        Command::Sort => handle_sort(&mut board),
        Command::Dark => handle_dark(&mut board),
        Command::Stats => {
            print!("{}", view::stats_block(board.stats()));
            Ok(())
        }
        Command::Tui => unreachable!("tui is dispatched before the handlers"),
    }
}

fn handle_add<S: StateStore>(
    board: &mut TaskBoard<S>,
    title: String,
    desc: String,
    priority: &str,
    due: Option<&str>,
) -> Result<()> {
    let priority: Priority = priority.parse()?;
    let due_date = due
        .map(parse_date)
        .transpose()
        .context("invalid --due date (expected YYYY-MM-DD)")?;

    let draft = TaskDraft {
        title,
        description: desc,
        priority,
        due_date,
    };
    match board.create(draft)? {
        Some(task) => println!("created task:\n{}", view::task_line(task)),
        None => println!("nothing added: title is blank"),
    }
    Ok(())
}

fn handle_ls<S: StateStore>(
    board: &mut TaskBoard<S>,
    search: Option<String>,
    priority: Option<&str>,
    due: Option<&str>,
    status: Option<&str>,
    sort: Option<&str>,
    format: LsFormat,
) -> Result<()> {
    if let Some(token) = sort {
        board.set_sort(token.parse()?);
    }

    let filter = build_filter(search, priority, due, status)?;
    let tasks = board.filtered(&filter);
    match format {
        LsFormat::Text => print!("{}", view::list_block(&tasks, board.stats())),
        LsFormat::Json => println!("{}", serde_json::to_string_pretty(&tasks)?),
    }
    Ok(())
}

fn build_filter(
    search: Option<String>,
    priority: Option<&str>,
    due: Option<&str>,
    status: Option<&str>,
) -> Result<TaskFilter> {
    let priority = priority.map(str::parse::<Priority>).transpose()?;
    let status = status.map(str::parse::<Status>).transpose()?;
    let due_date = due
        .map(parse_date)
        .transpose()
        .context("invalid --due date (expected YYYY-MM-DD)")?;

    Ok(TaskFilter::builder()
        .with_text(search)
        .with_priority(priority)
        .with_due_date(due_date)
        .with_status(status)
        .build())
}

fn handle_toggle<S: StateStore>(board: &mut TaskBoard<S>, id: TaskId) -> Result<()> {
    match board.toggle_status(id)? {
        Change::Dirty => {
            let status = board.get(id).map_or(Status::Pending, |task| task.status);
            println!("task {id} is now {status}");
        }
        Change::NoOp => println!("no task with id {id}"),
    }
    Ok(())
}

fn handle_rm<S: StateStore>(board: &mut TaskBoard<S>, id: TaskId, yes: bool) -> Result<()> {
    let Some(title) = board.get(id).map(|task| task.title.clone()) else {
        println!("no task with id {id}");
        return Ok(());
    };

    if !yes && !confirm(&format!("Delete '{title}'? [y/N] "))? {
        println!("kept task {id}");
        return Ok(());
    }

    match board.delete(id)? {
        Change::Dirty => println!("deleted task {id}"),
        Change::NoOp => println!("no task with id {id}"),
    }
    Ok(())
}

fn handle_sort<S: StateStore>(board: &mut TaskBoard<S>) -> Result<()> {
    let key = board.toggle_sort();
    println!("sorting by {key}");
    let tasks: Vec<_> = board.all().iter().collect();
    print!("{}", view::list_block(&tasks, board.stats()));
    Ok(())
}

fn handle_dark<S: StateStore>(board: &mut TaskBoard<S>) -> Result<()> {
    let dark = board.toggle_dark_mode()?;
    println!("dark mode {}", if dark { "on" } else { "off" });
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
