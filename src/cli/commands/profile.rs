use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::errors::AppResult;
use crate::models::user::ProfileChanges;
use crate::ui::messages::{header, success};
use crate::utils::date::Clock;
use crate::utils::formatting::wrap_indented;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &Clock) -> AppResult<()> {
    if let Commands::Profile {
        name,
        bio,
        church,
        phone,
        interests,
    } = cmd
    {
        let pool = super::open_db(cfg, clock)?;
        let mut session = AuthLogic::current_session(&pool.conn)?;

        let changes = ProfileChanges {
            name: name.clone(),
            bio: bio.clone(),
            church: church.clone(),
            phone_number: phone.clone(),
            interests: interests.clone(),
        };

        let user = if changes.is_empty() {
            session.require_user()?.clone()
        } else {
            let updated = AuthLogic::update_profile(&pool.conn, &mut session, changes)?;
            success("Profile updated");
            updated
        };

        header(&user.name);
        println!("{:<12} {}", "Church:", user.church);
        println!("{:<12} {}", "Phone:", user.phone_number.as_deref().unwrap_or("-"));
        println!("{:<12} {}", "Interests:", user.interests.join(", "));
        if !user.bio.is_empty() {
            println!("{}", wrap_indented(&user.bio, 72, "  "));
        }
    }

    Ok(())
}
