//! Command loop and rendering
//!
//! Owns every piece of user interaction. The store only sees parsed
//! commands and hands back plain data; rendering never reaches into the
//! store's internals.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use td_core::session::AuthMode;
use td_core::store::ClientTaskStore;
use td_core::task::{StatusFilter, TaskStatus};
use td_core::Error;

type InputLines = Lines<BufReader<Stdin>>;

pub async fn run(mut store: ClientTaskStore) -> anyhow::Result<()> {
    match store.check_session().await {
        Some(session) => {
            println!("Signed in as {}.", session.username);
            render_tasks(&store);
        }
        None => {
            println!(
                "Not signed in. Use `login <username> <password>` or `register <username> <password>`."
            );
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if !dispatch(&mut store, &mut lines, &line).await? {
            break;
        }
    }

    Ok(())
}

async fn dispatch(
    store: &mut ClientTaskStore,
    lines: &mut InputLines,
    line: &str,
) -> anyhow::Result<bool> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "help" => print_help(),
        "quit" | "exit" => return Ok(false),
        "login" | "register" => authenticate(store, command, rest).await,
        "logout" => {
            store.logout().await;
            println!("Signed out.");
        }
        "whoami" => match store.session() {
            Some(session) => println!("{}", session.username),
            None => println!("Not signed in."),
        },
        "refresh" => match store.load_tasks().await {
            Ok(_) => render_tasks(store),
            Err(err) => report(&err),
        },
        "list" => render_tasks(store),
        "filter" => match rest.parse::<StatusFilter>() {
            Ok(filter) => {
                store.set_filter(filter);
                render_tasks(store);
            }
            Err(_) => println!("Usage: filter <all|todo|inprogress|completed>"),
        },
        "add" => match store.add_task(rest).await {
            Ok(()) => render_tasks(store),
            Err(err) => report(&err),
        },
        "edit" => open_edit(store, rest),
        "cancel" => {
            store.close_edit();
            println!("Edit cancelled.");
        }
        "update" => update(store, rest).await,
        "delete" => delete(store, lines, rest).await?,
        "stats" => render_stats(store),
        other => println!("Unknown command `{}`. Try `help`.", other),
    }

    Ok(true)
}

async fn authenticate(store: &mut ClientTaskStore, command: &str, rest: &str) {
    let mut parts = rest.split_whitespace();
    let (Some(username), Some(password)) = (parts.next(), parts.next()) else {
        println!("Usage: {} <username> <password>", command);
        return;
    };

    let mode = if command == "login" {
        AuthMode::Login
    } else {
        AuthMode::Register
    };

    match store.authenticate(username, password, mode).await {
        Ok(message) => {
            println!("{}", message);
            if matches!(mode, AuthMode::Login) {
                render_tasks(store);
            }
        }
        Err(err) => report(&err),
    }
}

fn open_edit(store: &mut ClientTaskStore, rest: &str) {
    let Ok(id) = rest.parse::<i64>() else {
        println!("Usage: edit <id>");
        return;
    };

    match store.open_for_edit(id) {
        Some(task) => {
            println!("Editing #{} [{}] {}", task.id, task.status, task.description);
            println!("Use `update <status> <description>` or `cancel`.");
        }
        None => println!("No task with id {}.", id),
    }
}

async fn update(store: &mut ClientTaskStore, rest: &str) {
    let Some(id) = store.editing() else {
        println!("No task is open for editing. Use `edit <id>` first.");
        return;
    };
    let Some((status, description)) = parse_update(rest) else {
        println!("Usage: update <todo|inprogress|completed> <description>");
        return;
    };

    match store.update_task(id, description, status).await {
        Ok(()) => render_tasks(store),
        Err(err) => report(&err),
    }
}

async fn delete(
    store: &mut ClientTaskStore,
    lines: &mut InputLines,
    rest: &str,
) -> anyhow::Result<()> {
    let Ok(id) = rest.parse::<i64>() else {
        println!("Usage: delete <id>");
        return Ok(());
    };

    print!("Delete task {}? This cannot be undone. [y/N] ", id);
    std::io::stdout().flush()?;
    let confirmed = matches!(
        lines.next_line().await?,
        Some(answer) if answer.trim().eq_ignore_ascii_case("y")
    );
    if !confirmed {
        println!("Aborted.");
        return Ok(());
    }

    match store.delete_task(id).await {
        Ok(()) => render_tasks(store),
        Err(err) => report(&err),
    }
    Ok(())
}

/// Split an update line into its status and the remaining description.
fn parse_update(rest: &str) -> Option<(TaskStatus, &str)> {
    let (status, description) = rest.split_once(char::is_whitespace)?;
    let status = status.parse::<TaskStatus>().ok()?;
    let description = description.trim();
    if description.is_empty() {
        return None;
    }
    Some((status, description))
}

fn render_tasks(store: &ClientTaskStore) {
    let visible = store.visible_tasks();
    if visible.is_empty() {
        match store.filter() {
            StatusFilter::All => println!("No tasks yet. Add one with `add <description>`."),
            StatusFilter::Status(status) => println!("No {} tasks.", status),
        }
        return;
    }

    for task in visible {
        println!(
            "  #{:<4} [{:<10}] {}",
            task.id,
            task.status.as_str(),
            task.description
        );
    }
}

fn render_stats(store: &ClientTaskStore) {
    let stats = store.stats();
    println!(
        "todo: {}  inprogress: {}  completed: {}  total: {}",
        stats.todo, stats.inprogress, stats.completed, stats.total
    );
}

fn report(err: &Error) {
    match err {
        Error::Unauthenticated { .. } => println!("{} Please sign in again.", err),
        Error::Transport(_) => println!("{}. Please check your connection and try again.", err),
        _ => println!("{}", err),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  register <username> <password>   create an account");
    println!("  login <username> <password>      sign in");
    println!("  logout                           sign out and clear local state");
    println!("  whoami                           show the signed-in user");
    println!("  list                             show tasks under the current filter");
    println!("  refresh                          re-fetch tasks from the server");
    println!("  filter <all|todo|inprogress|completed>");
    println!("  add <description>                create a task");
    println!("  edit <id>                        open a task for editing");
    println!("  update <status> <description>    rewrite the task open for editing");
    println!("  cancel                           close the editor");
    println!("  delete <id>                      delete a task (asks first)");
    println!("  stats                            status counts");
    println!("  quit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_update_splits_status_and_description() {
        let (status, description) = parse_update("completed ship the release").unwrap();
        assert_eq!(status, TaskStatus::Completed);
        assert_eq!(description, "ship the release");
    }

    #[test]
    fn test_parse_update_rejects_bad_status() {
        assert!(parse_update("done ship it").is_none());
    }

    #[test]
    fn test_parse_update_rejects_missing_description() {
        assert!(parse_update("todo").is_none());
        assert!(parse_update("todo   ").is_none());
    }
}
