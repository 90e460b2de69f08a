use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::access::UNLIMITED_DAYS;
use crate::errors::AppResult;
use crate::models::access::AccessState;
use crate::models::user::User;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_access};
use crate::utils::date::{Clock, human};
use crate::utils::formatting::{bold, days_label};
use serde::Serialize;

#[derive(Serialize)]
struct StatusView<'a> {
    user: Option<&'a User>,
    access: AccessState,
    unlimited: bool,
}

pub fn handle(cmd: &Commands, cfg: &Config, clock: &Clock) -> AppResult<()> {
    if let Commands::Status { json } = cmd {
        let pool = super::open_db(cfg, clock)?;
        let (session, gate) = super::session_with_gate(&pool, cfg, clock)?;
        let state = gate.state();
        let unlimited = state.has_access && state.days_remaining == UNLIMITED_DAYS;

        if *json {
            let view = StatusView {
                user: session.user(),
                access: state,
                unlimited,
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
            return Ok(());
        }

        let Some(user) = session.user() else {
            info("Not signed in. Run `rfellowship login <email>`.");
            return Ok(());
        };

        header(&user.name);
        println!("{:<12} {}", "Id:", user.id);
        println!("{:<12} {}", "Role:", user.role.label());
        println!("{:<12} {}", "Email:", user.display_email());
        if !user.church.is_empty() {
            println!("{:<12} {}", "Church:", user.church);
        }
        println!("{:<12} {}", "Joined:", human(&user.joined_at()));
        println!(
            "{:<12} {}",
            "Plan:",
            if user.is_subscribed() { "Subscribed" } else { "Free" }
        );

        let color = color_for_access(state.has_access, unlimited);
        let banner = if unlimited {
            "Full access".to_string()
        } else if state.has_access {
            format!(
                "7-Day Free Trial Active: {} remaining",
                days_label(state.days_remaining)
            )
        } else {
            "Free Trial Expired".to_string()
        };
        println!("{:<12} {}{}{}", "Access:", color, bold(&banner), RESET);
    }

    Ok(())
}
