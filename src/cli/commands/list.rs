use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Workspace;
use crate::core::refresh::{RefreshPolicy, poll};
use crate::core::snapshot::SnapshotReader;
use crate::core::stats::SnapshotStats;
use crate::core::view::ViewState;
use crate::errors::AppResult;
use crate::models::EmployeeRecord;
use crate::ui::messages::{error, header, info, metric};
use crate::utils::table::{Column, Table};
use chrono::Local;
use std::thread;
use std::time::Instant;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        refresh,
        watch,
        title,
    } = cmd
    {
        let ws = Workspace::open(cfg)?;
        let mut reader = ws.reader();

        match watch {
            None => {
                let (rows, view) = poll(
                    &mut reader,
                    ViewState::default(),
                    Instant::now(),
                    Local::now(),
                    *refresh,
                );
                render(&rows, reader.last_error(), title.as_deref(), &view);
            }
            Some(secs) => watch_loop(
                &mut reader,
                title.as_deref(),
                RefreshPolicy::every(*secs),
                *refresh,
            ),
        }
    }
    Ok(())
}

/// Single-threaded refresh loop; runs until the process is interrupted.
/// Ticks go through the reader's cache unless `force` is set.
fn watch_loop(
    reader: &mut SnapshotReader<'_>,
    title: Option<&str>,
    policy: RefreshPolicy,
    force: bool,
) {
    let mut view = ViewState::default();
    let mut last: Option<Instant> = None;
    loop {
        let now = Instant::now();
        if policy.is_due(last, now) {
            let (rows, next) = poll(reader, view, now, Local::now(), force);
            view = next;
            render(&rows, reader.last_error(), title, &view);
            info(format!(
                "Data fetched at {} ({} fetch(es)), next check in {}s. Ctrl-C to stop.",
                view.last_refresh_label(),
                view.refreshes,
                policy.interval.as_secs()
            ));
            last = Some(now);
        }
        thread::sleep(policy.wait_time(last, Instant::now()));
    }
}

fn render(rows: &[EmployeeRecord], failure: Option<&str>, title: Option<&str>, view: &ViewState) {
    if rows.is_empty() {
        match failure {
            Some(_) => error("No employee data could be loaded. Contact the system administrator."),
            None => info("The employee snapshot is empty."),
        }
        return;
    }

    let stats = SnapshotStats::from_records(rows);
    header("📊 Summary");
    metric("Total employees", stats.total);
    if let Some(d) = &stats.last_update {
        metric("Last update", d);
    }
    metric("Distinct titles", stats.distinct_titles);
    if view.last_refresh.is_some() {
        metric("Fetched at", view.last_refresh_label());
    }

    let shown: Vec<&EmployeeRecord> = match title {
        Some(t) => {
            let needle = t.to_lowercase();
            rows.iter()
                .filter(|r| r.title.to_lowercase().contains(&needle))
                .collect()
        }
        None => rows.iter().collect(),
    };

    header("📋 Employees");
    if shown.is_empty() {
        info("No employees match the filter.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID", 10),
        Column::new("Full name", 40),
        Column::new("Title", 30),
    ]);
    for r in shown {
        table.add_row(vec![r.employee_id.to_string(), r.name.clone(), r.title.clone()]);
    }
    print!("{}", table.render());
}
