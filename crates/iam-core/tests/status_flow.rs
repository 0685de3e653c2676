use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::Arc;

use iam_core::{
    Command, DateSelection, FixedClock, MemoryStore, Status, StatusService, StatusStore,
    TeamCalendar,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Service pinned to Monday 2026-10-19, 10:00 US/Eastern
fn service(store: MemoryStore) -> StatusService {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 14, 0, 0).unwrap();
    let calendar = TeamCalendar::new(chrono_tz::US::Eastern, Arc::new(FixedClock(now)));
    StatusService::new(Arc::new(store), calendar)
}

async fn run(service: &StatusService, user_id: &str, user_name: &str, text: &str) -> String {
    match Command::parse(text) {
        Command::Set { status, options } => {
            service
                .set_status(user_id, user_name, status, &options)
                .await
                .unwrap()
                .message
        }
        Command::Today => service.today_report().await.unwrap(),
        Command::Schedule => service.schedule_report().await.unwrap(),
        Command::History => service.history_report(user_id).await.unwrap(),
        other => panic!("unexpected command {:?}", other),
    }
}

#[tokio::test]
async fn test_wfh_today_then_today_query() {
    let service = service(MemoryStore::new());

    assert_eq!(run(&service, "U1", "alice", "wfh").await, "alice is WFH today.");
    assert_eq!(run(&service, "U1", "alice", "today").await, "alice - WFH");
}

#[tokio::test]
async fn test_team_week() {
    let store = MemoryStore::new();
    let service = service(store.clone());

    run(&service, "U1", "alice", "ooo 2026-10-21 through 2026-10-23").await;
    run(&service, "U2", "bob", "wfh tomorrow and friday").await;
    run(&service, "U3", "carol", "wfh today").await;
    // carol changes her mind
    run(&service, "U3", "carol", "in").await;

    assert_eq!(store.len().await, 6);
    assert_eq!(
        run(&service, "U3", "carol", "today").await,
        "Everyone is planning to be in office today."
    );
    assert_eq!(
        run(&service, "U1", "alice", "schedule").await,
        [
            "2026-10-20 - bob - WFH",
            "2026-10-21 - alice - OOO",
            "2026-10-22 - alice - OOO",
            "2026-10-23 - alice - OOO",
            "2026-10-23 - bob - WFH",
        ]
        .join("\n")
    );
}

#[tokio::test]
async fn test_last_write_wins_per_user_and_date() {
    let store = MemoryStore::new();
    let service = service(store.clone());

    service
        .set_status("U1", "alice", Status::Wfh, "next monday")
        .await
        .unwrap();
    let outcome = service
        .set_status("U1", "alice", Status::Ooo, "10/26")
        .await
        .unwrap();

    assert_eq!(outcome.selection, DateSelection::Single(date(2026, 10, 26)));
    assert_eq!(outcome.message, "alice will be OOO on 2026-10-26.");

    let entries = store.entries_on(date(2026, 10, 26)).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, Status::Ooo);
}

#[tokio::test]
async fn test_history_only_shows_own_past_month() {
    let service = service(MemoryStore::new());

    run(&service, "U1", "alice", "ooo last friday").await;
    run(&service, "U1", "alice", "wfh a month ago").await;
    run(&service, "U1", "alice", "wfh 2 months ago").await;
    run(&service, "U1", "alice", "wfh tomorrow").await;
    run(&service, "U2", "bob", "ooo yesterday").await;

    assert_eq!(
        run(&service, "U1", "alice", "history").await,
        "2026-09-19 - WFH\n2026-10-16 - OOO"
    );
}
