//! Demo community loaded on first initialization.

use crate::db::queries::{insert_event, insert_post, insert_prayer, insert_user};
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::models::post::Post;
use crate::models::prayer::{PrayerCategory, PrayerRequest};
use crate::models::role::{AccountStatus, Role};
use crate::models::user::User;
use chrono::{DateTime, TimeDelta, Utc};
use rusqlite::Connection;

fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - TimeDelta::days(days)
}

fn hours_ago(now: DateTime<Utc>, hours: i64) -> String {
    (now - TimeDelta::hours(hours)).to_rfc3339()
}

fn demo_users(now: DateTime<Utc>) -> AppResult<Vec<User>> {
    let mut users = Vec::new();

    let mut david = User::new("u1", "Brother David", Role::Member, days_ago(now, 20), true)?
        .with_email("david@example.com")
        .with_church("Central SDA Church")
        .with_bio("Lover of hymns and nature. AY Leader.");
    david.interests = vec![
        "Youth Ministry".into(),
        "Music".into(),
        "Community Service".into(),
    ];
    users.push(david);

    let mut sarah = User::new("u2", "Sister Sarah", Role::Member, days_ago(now, 2), false)?
        .with_email("sarah@example.com")
        .with_church("Central SDA Church")
        .with_bio("Choir director.");
    sarah.interests = vec!["Music".into()];
    users.push(sarah);

    let mut michael = User::new("u3", "Pastor Michael", Role::Pastor, days_ago(now, 100), true)?
        .with_email("pastor@church.org")
        .with_church("Central SDA Church")
        .with_bio("Serving the Lord with gladness.");
    michael.interests = vec!["Evangelism".into(), "Preaching".into()];
    users.push(michael);

    let mut mary = User::new("c1", "Sister Mary Clerk", Role::Clerk, days_ago(now, 50), true)?
        .with_email("clerk@church.org")
        .with_status(AccountStatus::Active)
        .with_church("Central SDA Church")
        .with_bio("Serving the church administration with joy.");
    mary.phone_number = Some("555-0123".into());
    mary.interests = vec!["Administration".into(), "Welcome Ministry".into()];
    users.push(mary);

    // Joined 8 days ago without a subscription: exempt only through the admin role.
    let mut james = User::new("admin1", "Elder James Admin", Role::Admin, days_ago(now, 8), false)?
        .with_email("admin@church.org")
        .with_status(AccountStatus::Active)
        .with_church("Conference HQ")
        .with_bio("Overseeing digital evangelism.");
    james.phone_number = Some("555-9999".into());
    james.interests = vec!["Technology".into(), "Leadership".into()];
    users.push(james);

    let pending = [
        ("p1", "John Doe", Role::Member, "john.doe@example.com", "Central SDA Church", 0),
        ("p2", "Jane Smith", Role::Member, "jane.smith@example.com", "Central SDA Church", 0),
        ("pc1", "Brother Thomas", Role::Clerk, "thomas@example.com", "Northside SDA", 1),
        ("pc2", "Sister Ruth", Role::Clerk, "ruth@example.com", "Maranatha District", 2),
    ];
    for (id, name, role, email, church, joined) in pending {
        users.push(
            User::new(id, name, role, days_ago(now, joined), false)?
                .with_email(email)
                .with_status(AccountStatus::Pending)
                .with_church(church),
        );
    }

    Ok(users)
}

fn demo_events() -> Vec<Event> {
    vec![
        Event {
            id: "e1".into(),
            title: "Community Health Fair".into(),
            date: "Oct 15".into(),
            time: "10:00 AM".into(),
            location: "Church Parking Lot".into(),
            description: "Free blood pressure checks and health consultations.".into(),
            attendees: 42,
        },
        Event {
            id: "e2".into(),
            title: "Youth Vespers".into(),
            date: "Oct 20".into(),
            time: "7:00 PM".into(),
            location: "Youth Hall".into(),
            description: "Join us to close the Sabbath with songs and testimony.".into(),
            attendees: 25,
        },
    ]
}

fn demo_posts(now: DateTime<Utc>) -> Vec<Post> {
    vec![
        Post {
            id: "p1".into(),
            user_id: "u3".into(),
            content: "Happy Sabbath church family! Remember that rest is a gift from God. Looking forward to seeing you all tomorrow.".into(),
            likes: 45,
            comments: 12,
            created_at: hours_ago(now, 2),
            kind: "text".into(),
        },
        Post {
            id: "p2".into(),
            user_id: "u2".into(),
            content: "The choir practice was amazing tonight. Getting ready for the Easter cantata!".into(),
            likes: 32,
            comments: 5,
            created_at: hours_ago(now, 5),
            kind: "image".into(),
        },
        Post {
            id: "p3".into(),
            user_id: "u1".into(),
            content: "\"For I know the plans I have for you,\" declares the Lord, \"plans to prosper you and not to harm you, plans to give you hope and a future.\" - Jeremiah 29:11".into(),
            likes: 89,
            comments: 8,
            created_at: hours_ago(now, 24),
            kind: "verse".into(),
        },
    ]
}

fn demo_prayers(now: DateTime<Utc>) -> Vec<PrayerRequest> {
    vec![
        PrayerRequest {
            id: "pr1".into(),
            user_id: "u2".into(),
            content: "Please pray for my mother who is undergoing surgery next week.".into(),
            is_anonymous: false,
            prayer_count: 15,
            created_at: hours_ago(now, 3),
            category: PrayerCategory::Health,
        },
        PrayerRequest {
            id: "pr2".into(),
            user_id: "u1".into(),
            content: "Praying for guidance in my career decisions.".into(),
            is_anonymous: true,
            prayer_count: 7,
            created_at: hours_ago(now, 6),
            category: PrayerCategory::General,
        },
    ]
}

pub fn seed_demo_community(conn: &Connection, now: DateTime<Utc>) -> AppResult<()> {
    for u in demo_users(now)? {
        insert_user(conn, &u)?;
    }
    for e in demo_events() {
        insert_event(conn, &e)?;
    }
    for p in demo_posts(now) {
        insert_post(conn, &p)?;
    }
    for p in demo_prayers(now) {
        insert_prayer(conn, &p)?;
    }
    Ok(())
}
