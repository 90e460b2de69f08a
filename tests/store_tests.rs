mod common;

use chrono::{NaiveDate, TimeDelta};
use common::{seed_now, seeded_pool, utc};
use rfellowship::core::access::{AccessGate, TRIAL_WINDOW_DAYS, UNLIMITED_DAYS};
use rfellowship::core::auth::AuthLogic;
use rfellowship::core::devotional::{DevotionalLogic, DevotionalSource};
use rfellowship::core::events::EventLogic;
use rfellowship::core::feed::FeedLogic;
use rfellowship::core::members::MembersLogic;
use rfellowship::core::prayer::PrayerLogic;
use rfellowship::db::initialize::init_db;
use rfellowship::db::migrate::applied_versions;
use rfellowship::db::queries::{
    find_event, find_post, find_user_by_id, load_likes, load_prayers, load_rsvps,
};
use rfellowship::errors::AppError;
use rfellowship::models::devotional::Devotional;
use rfellowship::models::prayer::PrayerCategory;
use rfellowship::models::role::AccountStatus;
use rfellowship::models::user::ProfileChanges;
use rfellowship::services::payment::{
    PaymentMethod, PaymentRequest, SimulatedPayments,
};
use rfellowship::services::text::{
    DEFAULT_ENCOURAGEMENT, EMPTY_ENCOURAGEMENT, OfflineTextService, TextService,
};
use std::cell::Cell;
use std::time::Duration;

/// Text service double that always answers and counts generations.
struct ScriptedText {
    safe: bool,
    encouragement: String,
    generated: Cell<u32>,
}

impl ScriptedText {
    fn new(safe: bool, encouragement: &str) -> Self {
        Self {
            safe,
            encouragement: encouragement.to_string(),
            generated: Cell::new(0),
        }
    }
}

impl TextService for ScriptedText {
    fn generate_devotional(&self) -> Option<Devotional> {
        self.generated.set(self.generated.get() + 1);
        Some(Devotional {
            title: format!("Morning Light #{}", self.generated.get()),
            verse: "Psalm 46:10".into(),
            content: "Be still.".into(),
        })
    }

    fn is_content_safe(&self, _content: &str) -> bool {
        self.safe
    }

    fn prayer_encouragement(&self, _category: &str) -> String {
        self.encouragement.clone()
    }
}

#[test]
fn test_migrations_are_recorded_once() {
    let pool = seeded_pool();
    init_db(&pool.conn, seed_now()).unwrap();

    let versions = applied_versions(&pool.conn).unwrap();
    assert_eq!(
        versions,
        vec![
            "20251001_0001_community_schema".to_string(),
            "20251001_0002_seed_demo_community".to_string()
        ]
    );
}

#[test]
fn test_login_by_email_id_and_shortcut() {
    let pool = seeded_pool();

    let u = AuthLogic::login(&pool.conn, "SARAH@example.com").unwrap();
    assert_eq!(u.id, "u2");

    let u = AuthLogic::login(&pool.conn, "u3").unwrap();
    assert_eq!(u.name, "Pastor Michael");

    let u = AuthLogic::login(&pool.conn, "admin").unwrap();
    assert_eq!(u.id, "admin1");

    let session = AuthLogic::current_session(&pool.conn).unwrap();
    assert_eq!(session.user().unwrap().id, "admin1");
}

#[test]
fn test_login_refusals() {
    let pool = seeded_pool();

    let err = AuthLogic::login(&pool.conn, "nobody@example.com").unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));

    let err = AuthLogic::login(&pool.conn, "john.doe@example.com").unwrap_err();
    assert!(matches!(err, AppError::AccountInactive(_)));

    assert!(AuthLogic::current_session(&pool.conn).unwrap().user().is_none());
}

#[test]
fn test_logout_clears_session() {
    let pool = seeded_pool();
    AuthLogic::login(&pool.conn, "u1").unwrap();

    assert_eq!(AuthLogic::logout(&pool.conn).unwrap().as_deref(), Some("u1"));
    assert!(AuthLogic::current_session(&pool.conn).unwrap().user().is_none());
    assert_eq!(AuthLogic::logout(&pool.conn).unwrap(), None);
}

#[test]
fn test_stale_session_id_is_dropped() {
    let pool = seeded_pool();
    AuthLogic::login(&pool.conn, "u1").unwrap();
    pool.conn
        .execute("DELETE FROM users WHERE id = 'u1'", [])
        .unwrap();

    assert!(AuthLogic::current_session(&pool.conn).unwrap().user().is_none());
    assert_eq!(AuthLogic::logout(&pool.conn).unwrap(), None);
}

#[test]
fn test_seeded_access_matches_roles() {
    let pool = seeded_pool();
    let now = seed_now();

    let sarah = find_user_by_id(&pool.conn, "u2").unwrap().unwrap();
    let admin = find_user_by_id(&pool.conn, "admin1").unwrap().unwrap();

    let gate = AccessGate::for_session(
        &rfellowship::models::session::Session::signed_in(sarah),
        now,
        TRIAL_WINDOW_DAYS,
    );
    assert!(gate.has_access());
    assert_eq!(gate.state().days_remaining, 6);

    let gate = AccessGate::for_session(
        &rfellowship::models::session::Session::signed_in(admin),
        now + TimeDelta::days(300),
        TRIAL_WINDOW_DAYS,
    );
    assert_eq!(gate.state().days_remaining, UNLIMITED_DAYS);
}

#[test]
fn test_profile_update_persists() {
    let pool = seeded_pool();
    AuthLogic::login(&pool.conn, "u2").unwrap();
    let mut session = AuthLogic::current_session(&pool.conn).unwrap();

    let changes = ProfileChanges {
        bio: Some("Alto section lead.".into()),
        ..Default::default()
    };
    AuthLogic::update_profile(&pool.conn, &mut session, changes).unwrap();

    let stored = find_user_by_id(&pool.conn, "u2").unwrap().unwrap();
    assert_eq!(stored.bio, "Alto section lead.");
    assert_eq!(stored.name, "Sister Sarah");
}

#[test]
fn test_upgrade_persists_subscription() {
    let pool = seeded_pool();
    let later = seed_now() + TimeDelta::days(30);
    AuthLogic::login(&pool.conn, "u2").unwrap();

    let mut session = AuthLogic::current_session(&pool.conn).unwrap();
    let mut gate = AccessGate::for_session(&session, later, TRIAL_WINDOW_DAYS);
    assert!(!gate.has_access());

    let request = PaymentRequest {
        user_id: "u2".into(),
        amount: 100,
        method: PaymentMethod::Mobile {
            provider: "MTN Mobile Money".into(),
            phone: "0772 123 456".into(),
        },
    };
    let (receipt, state) = AuthLogic::upgrade(
        &pool.conn,
        &mut session,
        &mut gate,
        &SimulatedPayments::new(Duration::ZERO),
        &request,
        later,
    )
    .unwrap();

    assert_eq!(receipt.amount, 100);
    assert!(state.has_access);
    assert!(find_user_by_id(&pool.conn, "u2").unwrap().unwrap().is_subscribed());
}

#[test]
fn test_rejected_payment_changes_nothing() {
    let pool = seeded_pool();
    AuthLogic::login(&pool.conn, "u2").unwrap();
    let mut session = AuthLogic::current_session(&pool.conn).unwrap();
    let mut gate = AccessGate::for_session(&session, seed_now(), TRIAL_WINDOW_DAYS);

    let request = PaymentRequest {
        user_id: "u2".into(),
        amount: 55,
        method: PaymentMethod::Card {
            number: "4111111111111111".into(),
        },
    };
    let err = AuthLogic::upgrade(
        &pool.conn,
        &mut session,
        &mut gate,
        &SimulatedPayments::new(Duration::ZERO),
        &request,
        seed_now(),
    )
    .unwrap_err();

    assert!(matches!(err, AppError::Payment(_)));
    assert!(!session.user().unwrap().is_subscribed());
    assert!(!find_user_by_id(&pool.conn, "u2").unwrap().unwrap().is_subscribed());
}

#[test]
fn test_rsvp_toggle_tracks_attendees() {
    let pool = seeded_pool();

    let first = EventLogic::toggle_rsvp(&pool.conn, "u2", "e1").unwrap();
    assert!(first.attending);
    assert_eq!(first.event.attendees, 43);
    assert!(load_rsvps(&pool.conn, "u2").unwrap().contains("e1"));

    let second = EventLogic::toggle_rsvp(&pool.conn, "u2", "e1").unwrap();
    assert!(!second.attending);
    assert_eq!(find_event(&pool.conn, "e1").unwrap().unwrap().attendees, 42);

    let err = EventLogic::toggle_rsvp(&pool.conn, "u2", "nope").unwrap_err();
    assert!(matches!(err, AppError::EventNotFound(_)));
}

#[test]
fn test_next_event_for_user() {
    let pool = seeded_pool();
    let now = utc(2025, 10, 16, 12, 0, 0);

    assert!(EventLogic::next_for_user(&pool.conn, "u2", &now).unwrap().is_none());

    EventLogic::toggle_rsvp(&pool.conn, "u2", "e1").unwrap();
    EventLogic::toggle_rsvp(&pool.conn, "u2", "e2").unwrap();

    let next = EventLogic::next_for_user(&pool.conn, "u2", &now).unwrap().unwrap();
    assert_eq!(next.event.id, "e2");
    assert_eq!(next.starts_at, utc(2025, 10, 20, 19, 0, 0));
    let c = next.countdown.unwrap();
    assert_eq!((c.days, c.hours), (4, 7));
}

#[test]
fn test_calendar_groups_by_day() {
    let pool = seeded_pool();
    let events = rfellowship::db::queries::load_events(&pool.conn).unwrap();
    let days = EventLogic::calendar_days(&events, 10);
    assert_eq!(days.keys().copied().collect::<Vec<_>>(), vec![15, 20]);

    assert!(EventLogic::calendar_days(&events, 11).is_empty());
}

#[test]
fn test_month_layout_follows_the_calendar() {
    // October 2025 starts on a Wednesday
    let oct = NaiveDate::from_ymd_opt(2025, 10, 18).unwrap();
    assert_eq!(EventLogic::month_layout(oct), Some((3, 31)));

    let leap_feb = NaiveDate::from_ymd_opt(2028, 2, 10).unwrap();
    assert_eq!(EventLogic::month_layout(leap_feb), Some((2, 29)));

    let feb = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
    assert_eq!(EventLogic::month_layout(feb), Some((0, 28)));
}

#[test]
fn test_rsvp_is_all_or_nothing() {
    let pool = seeded_pool();
    pool.conn
        .execute_batch(
            "CREATE TRIGGER freeze_attendees BEFORE UPDATE OF attendees ON events
             BEGIN SELECT RAISE(ABORT, 'attendees frozen'); END;",
        )
        .unwrap();

    assert!(EventLogic::toggle_rsvp(&pool.conn, "u2", "e1").is_err());

    assert!(!load_rsvps(&pool.conn, "u2").unwrap().contains("e1"));
    assert_eq!(find_event(&pool.conn, "e1").unwrap().unwrap().attendees, 42);
}

#[test]
fn test_like_is_all_or_nothing() {
    let pool = seeded_pool();
    pool.conn
        .execute_batch(
            "CREATE TRIGGER freeze_likes BEFORE UPDATE OF likes ON posts
             BEGIN SELECT RAISE(ABORT, 'likes frozen'); END;",
        )
        .unwrap();

    assert!(FeedLogic::toggle_like(&pool.conn, "u2", "p1").is_err());

    assert!(!load_likes(&pool.conn, "u2").unwrap().contains("p1"));
    assert_eq!(find_post(&pool.conn, "p1").unwrap().unwrap().likes, 45);
}

#[test]
fn test_like_toggle() {
    let pool = seeded_pool();

    let (post, liked) = FeedLogic::toggle_like(&pool.conn, "u2", "p1").unwrap();
    assert!(liked);
    assert_eq!(post.likes, 46);

    let (post, liked) = FeedLogic::toggle_like(&pool.conn, "u2", "p1").unwrap();
    assert!(!liked);
    assert_eq!(post.likes, 45);

    assert!(matches!(
        FeedLogic::toggle_like(&pool.conn, "u2", "missing"),
        Err(AppError::PostNotFound(_))
    ));
}

#[test]
fn test_publish_moderation() {
    let pool = seeded_pool();
    let author = find_user_by_id(&pool.conn, "u1").unwrap().unwrap();

    let err = FeedLogic::publish(&pool.conn, &author, "   ", &OfflineTextService, seed_now())
        .unwrap_err();
    assert!(matches!(err, AppError::EmptyContent));

    let strict = ScriptedText::new(false, "");
    let err = FeedLogic::publish(&pool.conn, &author, "hello", &strict, seed_now()).unwrap_err();
    assert!(matches!(err, AppError::UnsafeContent));

    let post =
        FeedLogic::publish(&pool.conn, &author, " Sabbath blessings ", &OfflineTextService, seed_now())
            .unwrap();
    assert_eq!(post.content, "Sabbath blessings");
    assert_eq!(post.likes, 0);
    assert_eq!(post.id, seed_now().timestamp_millis().to_string());
}

#[test]
fn test_same_instant_submissions_get_distinct_ids() {
    let pool = seeded_pool();
    let author = find_user_by_id(&pool.conn, "u1").unwrap().unwrap();
    let base = seed_now().timestamp_millis();

    let first =
        FeedLogic::publish(&pool.conn, &author, "Sabbath blessings", &OfflineTextService, seed_now())
            .unwrap();
    let second =
        FeedLogic::publish(&pool.conn, &author, "See you at vespers", &OfflineTextService, seed_now())
            .unwrap();
    assert_eq!(first.id, base.to_string());
    assert_eq!(second.id, (base + 1).to_string());

    let mut ids = Vec::new();
    for text in ["Healing for Ana", "Rain for the farms"] {
        let (req, _) = PrayerLogic::submit(
            &pool.conn,
            &author,
            text,
            PrayerCategory::General,
            false,
            &OfflineTextService,
            seed_now(),
        )
        .unwrap();
        ids.push(req.id);
    }
    assert_ne!(ids[0], ids[1]);
    assert_eq!(load_prayers(&pool.conn, None).unwrap().len(), 4);
}

#[test]
fn test_prayer_flow() {
    let pool = seeded_pool();
    let author = find_user_by_id(&pool.conn, "u2").unwrap().unwrap();

    assert_eq!(PrayerLogic::pray(&pool.conn, "pr1").unwrap(), 16);

    let (req, words) = PrayerLogic::submit(
        &pool.conn,
        &author,
        "Strength for exams",
        PrayerCategory::Family,
        true,
        &OfflineTextService,
        seed_now(),
    )
    .unwrap();
    assert_eq!(words, DEFAULT_ENCOURAGEMENT);
    assert!(req.is_anonymous);

    let (_, words) = PrayerLogic::submit(
        &pool.conn,
        &author,
        "Travel mercies",
        PrayerCategory::General,
        false,
        &ScriptedText::new(true, "  "),
        seed_now() + TimeDelta::seconds(1),
    )
    .unwrap();
    assert_eq!(words, EMPTY_ENCOURAGEMENT);

    let family = load_prayers(&pool.conn, Some(PrayerCategory::Family)).unwrap();
    assert_eq!(family.len(), 1);
    assert_eq!(family[0].content, "Strength for exams");
}

#[test]
fn test_devotional_caching() {
    let pool = seeded_pool();
    let day = NaiveDate::from_ymd_opt(2025, 10, 18).unwrap();

    let (d, source) = DevotionalLogic::today(&pool.conn, &OfflineTextService, day, false).unwrap();
    assert_eq!(source, DevotionalSource::Fallback);
    assert_eq!(d, Devotional::fallback());

    let text = ScriptedText::new(true, "");
    let (first, source) = DevotionalLogic::today(&pool.conn, &text, day, false).unwrap();
    assert_eq!(source, DevotionalSource::Generated);

    let (again, source) = DevotionalLogic::today(&pool.conn, &text, day, false).unwrap();
    assert_eq!(source, DevotionalSource::Cached);
    assert_eq!(again, first);
    assert_eq!(text.generated.get(), 1);

    let next_day = day.succ_opt().unwrap();
    let (_, source) = DevotionalLogic::today(&pool.conn, &text, next_day, false).unwrap();
    assert_eq!(source, DevotionalSource::Generated);

    let (_, source) = DevotionalLogic::today(&pool.conn, &text, next_day, true).unwrap();
    assert_eq!(source, DevotionalSource::Generated);
    assert_eq!(text.generated.get(), 3);
}

fn user(pool: &rfellowship::db::pool::DbPool, id: &str) -> rfellowship::models::user::User {
    find_user_by_id(&pool.conn, id).unwrap().unwrap()
}

#[test]
fn test_clerk_approval_lets_member_sign_in() {
    let pool = seeded_pool();
    let clerk = user(&pool, "c1");

    assert!(matches!(
        AuthLogic::login(&pool.conn, "john.doe@example.com"),
        Err(AppError::AccountInactive(_))
    ));

    let pending: Vec<String> = MembersLogic::pending(&pool.conn, &clerk)
        .unwrap()
        .into_iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(pending, vec!["p1".to_string(), "p2".to_string()]);

    let approved = MembersLogic::approve(&pool.conn, &clerk, "p1").unwrap();
    assert_eq!(approved.status, Some(AccountStatus::Active));

    let signed_in = AuthLogic::login(&pool.conn, "john.doe@example.com").unwrap();
    assert_eq!(signed_in.id, "p1");

    let err = MembersLogic::approve(&pool.conn, &clerk, "p1").unwrap_err();
    assert!(matches!(err, AppError::InvalidStatus(_)));
}

#[test]
fn test_clerk_applications_need_an_admin() {
    let pool = seeded_pool();
    let clerk = user(&pool, "c1");
    let admin = user(&pool, "admin1");

    let err = MembersLogic::approve(&pool.conn, &clerk, "pc1").unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let pending = MembersLogic::pending(&pool.conn, &admin).unwrap();
    assert_eq!(pending.len(), 4);

    MembersLogic::approve(&pool.conn, &admin, "pc1").unwrap();
    assert_eq!(AuthLogic::login(&pool.conn, "thomas@example.com").unwrap().id, "pc1");
}

#[test]
fn test_members_only_for_back_office() {
    let pool = seeded_pool();
    let member = user(&pool, "u1");
    let pastor = user(&pool, "u3");

    for actor in [&member, &pastor] {
        assert!(matches!(
            MembersLogic::pending(&pool.conn, actor),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            MembersLogic::approve(&pool.conn, actor, "p1"),
            Err(AppError::Forbidden(_))
        ));
    }

    let admin = user(&pool, "admin1");
    assert!(matches!(
        MembersLogic::toggle_active(&pool.conn, &admin, "admin1"),
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        MembersLogic::approve(&pool.conn, &admin, "ghost"),
        Err(AppError::UserNotFound(_))
    ));
}

#[test]
fn test_reject_removes_application() {
    let pool = seeded_pool();
    let clerk = user(&pool, "c1");

    MembersLogic::reject(&pool.conn, &clerk, "p2").unwrap();
    assert!(find_user_by_id(&pool.conn, "p2").unwrap().is_none());

    // active accounts are deactivated, not rejected
    let err = MembersLogic::reject(&pool.conn, &clerk, "u1").unwrap_err();
    assert!(matches!(err, AppError::InvalidStatus(_)));
}

#[test]
fn test_deactivation_ends_session_and_blocks_login() {
    let pool = seeded_pool();
    let clerk = user(&pool, "c1");
    AuthLogic::login(&pool.conn, "u1").unwrap();

    let off = MembersLogic::toggle_active(&pool.conn, &clerk, "u1").unwrap();
    assert_eq!(off.status, Some(AccountStatus::Inactive));
    assert!(AuthLogic::current_session(&pool.conn).unwrap().user().is_none());
    assert!(matches!(
        AuthLogic::login(&pool.conn, "u1"),
        Err(AppError::AccountInactive(_))
    ));

    let on = MembersLogic::toggle_active(&pool.conn, &clerk, "u1").unwrap();
    assert_eq!(on.status, Some(AccountStatus::Active));
    assert!(AuthLogic::login(&pool.conn, "u1").is_ok());
}
