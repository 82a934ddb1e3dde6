use chrono::{DateTime, FixedOffset};
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::handlers::*;
use crate::application::commands::report_commands::ReportActivityCommand;
use crate::application::queries::LeaderboardQueryService;
use crate::application::services::MessageRouter;
use sweatbot_domain::clock::FixedClock;
use sweatbot_domain::report::{Report, ReportLock, ReportRepository, ReportTransition};
use sweatbot_domain::shared::{DomainError, MemberId};
use sweatbot_infrastructure::persistence::repositories::InMemoryReportRepository;

mockall::mock! {
    ReportRepo {}

    #[async_trait::async_trait]
    impl ReportRepository for ReportRepo {
        async fn lock_member(&self, member_id: &MemberId) -> Result<ReportLock, DomainError>;
        async fn find_by_member(&self, member_id: &MemberId) -> Result<Option<Report>, DomainError>;
        async fn save(&self, report: &Report) -> Result<(), DomainError>;
        async fn find_all(&self) -> Result<Vec<Report>, DomainError>;
    }
}

const NOW: &str = "2026-02-06T09:30:00+07:00";

fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

fn handler_with(repo: Arc<dyn ReportRepository>) -> ReportActivityCommandHandler {
    ReportActivityCommandHandler::new(repo, Arc::new(FixedClock::new(at(NOW))))
}

fn router_with(repo: Arc<dyn ReportRepository>) -> MessageRouter {
    let clock = Arc::new(FixedClock::new(at(NOW)));
    MessageRouter::new(
        Arc::new(ReportActivityCommandHandler::new(repo.clone(), clock.clone())),
        Arc::new(LeaderboardQueryService::new(repo, clock)),
    )
}

fn command(member: &str, name: &str) -> ReportActivityCommand {
    ReportActivityCommand {
        member_id: MemberId::from_string(member),
        display_name: name.to_string(),
    }
}

fn stored(member: &str, name: &str, streak: u32, count: u32, last: &str) -> Report {
    Report::restore(
        MemberId::from_string(member),
        name.to_string(),
        streak,
        count,
        at(last),
    )
    .unwrap()
}

#[tokio::test]
async fn test_first_report_creates_record() {
    let repo = Arc::new(InMemoryReportRepository::new());
    let handler = handler_with(repo.clone());

    let result = handler.handle(command("6281", "Alice")).await.unwrap();

    assert_eq!(result.transition, ReportTransition::Started);
    assert_eq!(
        result.reply,
        "Laporan diterima, Alice sudah berkeringat 1 hari. Lanjutkan 🔥"
    );

    let report = repo
        .find_by_member(&MemberId::from_string("6281"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!((report.streak(), report.activity_count()), (1, 1));
    assert_eq!(report.last_report_at(), at(NOW));
}

#[tokio::test]
async fn test_report_after_yesterday_extends_streak() {
    let repo = Arc::new(InMemoryReportRepository::with_reports([stored(
        "6282",
        "Bob",
        5,
        10,
        "2026-02-05T20:00:00+07:00",
    )]));
    let handler = handler_with(repo.clone());

    let result = handler.handle(command("6282", "Bobby")).await.unwrap();

    assert_eq!(result.transition, ReportTransition::Extended);
    assert_eq!((result.streak, result.activity_count), (6, 11));
    assert_eq!(
        result.reply,
        "Laporan diterima, Bobby sudah berkeringat 11 hari. Lanjutkan 🔥"
    );

    let report = repo
        .find_by_member(&MemberId::from_string("6282"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.display_name(), "Bobby");
    assert_eq!((report.streak(), report.activity_count()), (6, 11));
}

#[tokio::test]
async fn test_report_after_long_gap_restarts_streak() {
    let repo = Arc::new(InMemoryReportRepository::with_reports([stored(
        "6283",
        "Citra",
        36,
        36,
        "2026-01-07T09:30:00+07:00",
    )]));
    let handler = handler_with(repo.clone());

    let result = handler.handle(command("6283", "Citra")).await.unwrap();

    assert_eq!(result.transition, ReportTransition::Restarted);
    assert_eq!((result.streak, result.activity_count), (1, 37));
}

#[tokio::test]
async fn test_second_report_same_day_is_rejected_without_write() {
    let mut repo = MockReportRepo::new();
    repo.expect_lock_member()
        .times(1)
        .returning(|_| Ok(ReportLock::new(())));
    repo.expect_find_by_member().times(1).returning(|_| {
        Ok(Some(stored(
            "6284",
            "Diana",
            3,
            4,
            "2026-02-06T06:00:00+07:00",
        )))
    });
    repo.expect_save().never();

    let handler = handler_with(Arc::new(repo));
    let result = handler.handle(command("6284", "Diana")).await.unwrap();

    assert_eq!(result.transition, ReportTransition::AlreadyReported);
    assert_eq!((result.streak, result.activity_count), (3, 4));
    assert_eq!(
        result.reply,
        "Diana sudah laporan hari ini, ayo jangan curang! 😉"
    );
}

#[tokio::test]
async fn test_read_failure_aborts_without_write() {
    let mut repo = MockReportRepo::new();
    repo.expect_lock_member()
        .returning(|_| Ok(ReportLock::new(())));
    repo.expect_find_by_member()
        .returning(|_| Err(DomainError::Repository("disk I/O error".to_string())));
    repo.expect_save().never();

    let handler = handler_with(Arc::new(repo));
    let result = handler.handle(command("6285", "Eko")).await;

    assert!(matches!(result, Err(DomainError::Repository(_))));
}

#[tokio::test]
async fn test_write_failure_is_surfaced() {
    let mut repo = MockReportRepo::new();
    repo.expect_lock_member()
        .returning(|_| Ok(ReportLock::new(())));
    repo.expect_find_by_member().returning(|_| Ok(None));
    repo.expect_save()
        .times(1)
        .returning(|_| Err(DomainError::Repository("database is locked".to_string())));

    let handler = handler_with(Arc::new(repo));
    let result = handler.handle(command("6286", "Fajar")).await;

    assert!(matches!(result, Err(DomainError::Repository(_))));
}

#[tokio::test]
async fn test_concurrent_reports_for_one_member_accept_once() {
    let repo = Arc::new(InMemoryReportRepository::new());
    let handler = Arc::new(handler_with(repo.clone()));

    let mut tasks = Vec::new();
    for _ in 0..10 {
        let handler = handler.clone();
        tasks.push(tokio::spawn(async move {
            handler.handle(command("6287", "Gita")).await.unwrap()
        }));
    }

    let mut accepted = 0;
    for task in tasks {
        if task.await.unwrap().transition.is_accepted() {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 1);
    let report = repo
        .find_by_member(&MemberId::from_string("6287"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.activity_count(), 1);
}

#[tokio::test]
async fn test_router_ignores_chatter_without_touching_storage() {
    // No expectations: any repository call panics
    let router = router_with(Arc::new(MockReportRepo::new()));
    let member = MemberId::from_string("6288");

    for text in ["", "   ", "pagi semua", "lapor", "laporan #lapor"] {
        assert_eq!(router.route(&member, "Hana", text).await.unwrap(), None);
    }
}

#[tokio::test]
async fn test_router_dispatches_report_with_trailing_text() {
    let repo = Arc::new(InMemoryReportRepository::new());
    let router = router_with(repo.clone());

    let reply = router
        .route(&MemberId::from_string("6289"), "Indra", "  #LAPOR hari ini lari 5km ")
        .await
        .unwrap();

    assert_eq!(
        reply.as_deref(),
        Some("Laporan diterima, Indra sudah berkeringat 1 hari. Lanjutkan 🔥")
    );
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_router_leaderboard_read_failure_is_surfaced() {
    let mut repo = MockReportRepo::new();
    repo.expect_find_all()
        .times(1)
        .returning(|| Err(DomainError::Repository("no such table".to_string())));

    let router = router_with(Arc::new(repo));
    let result = router
        .route(&MemberId::from_string("6290"), "Joko", "#leaderboard")
        .await;

    assert!(result.is_err());
}
