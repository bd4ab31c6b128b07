//! Board + LocalStore integration: write-through persistence survives reopen.

use anyhow::Result;
use taskdeck_app::{TaskBoard, TaskDraft};
use taskdeck_core::{Priority, SortKey, Status, parse_date};
use taskdeck_store::LocalStore;

fn draft(title: &str, priority: Priority, due: Option<&str>) -> TaskDraft {
    TaskDraft {
        title: title.into(),
        description: String::new(),
        priority,
        due_date: due.map(|raw| parse_date(raw).unwrap_or_else(|err| panic!("parse date: {err}"))),
    }
}

#[test]
fn mutations_survive_a_board_reopen() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let toggled_id = {
        let store = LocalStore::open(dir.path())?;
        let mut board = TaskBoard::open(store, SortKey::Priority);
        board.create(draft("pay rent", Priority::High, Some("2026-09-01")))?;
        board.create(draft("water plants", Priority::Low, None))?;
        let id = board.all()[0].id;
        board.toggle_status(id)?;
        board.toggle_dark_mode()?;
        id
    };

    let store = LocalStore::open(dir.path())?;
    let mut board = TaskBoard::open(store, SortKey::Priority);
    assert_eq!(board.all().len(), 2);
    assert_eq!(board.get(toggled_id).map(|t| t.status), Some(Status::Completed));
    assert!(board.dark_mode());

    // Field-for-field round trip: saving what was loaded changes nothing.
    let before = board.all().to_vec();
    board.create(draft("  ", Priority::Medium, None))?; // blank title: no write
    assert_eq!(board.all(), &before[..]);
    Ok(())
}

#[test]
fn reopen_with_due_date_default_sort_orders_dated_tasks_first() -> Result<()> {
    let dir = tempfile::tempdir()?;
    {
        let store = LocalStore::open(dir.path())?;
        let mut board = TaskBoard::open(store, SortKey::Priority);
        board.create(draft("no date", Priority::High, None))?;
        board.create(draft("later", Priority::Low, Some("2026-12-01")))?;
        board.create(draft("sooner", Priority::Low, Some("2026-09-01")))?;
    }

    let store = LocalStore::open(dir.path())?;
    let board = TaskBoard::open(store, SortKey::DueDate);
    let titles: Vec<&str> = board.all().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["sooner", "later", "no date"]);
    Ok(())
}

#[test]
fn corrupt_store_opens_as_an_empty_board() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("tasks"), "]]] definitely not json")?;

    let store = LocalStore::open(dir.path())?;
    let mut board = TaskBoard::open(store, SortKey::Priority);
    assert!(board.all().is_empty());

    // The board stays usable and the next write replaces the corrupt entry.
    board.create(draft("fresh start", Priority::Medium, None))?;
    let store = LocalStore::open(dir.path())?;
    assert_eq!(store.load_tasks().len(), 1);
    Ok(())
}
