use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::core::members::MembersLogic;
use crate::errors::AppResult;
use crate::models::role::AccountStatus;
use crate::models::user::User;
use crate::ui::messages::{header, info, notify, success, warning};
use crate::utils::date::Clock;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, clock: &Clock) -> AppResult<()> {
    if let Commands::Members {
        pending,
        approve,
        reject,
        toggle_active,
    } = cmd
    {
        let pool = super::open_db(cfg, clock)?;
        let session = AuthLogic::current_session(&pool.conn)?;
        let actor = session.require_user()?;

        if let Some(id) = approve {
            let user = MembersLogic::approve(&pool.conn, actor, id)?;
            success(format!("Approved {} ({})", user.name, user.id));
            if cfg.notifications {
                notify(
                    "Membership Approved",
                    format!("{} is now an active member.", user.name),
                );
            }
            return Ok(());
        }

        if let Some(id) = reject {
            let user = MembersLogic::reject(&pool.conn, actor, id)?;
            warning(format!("Rejected application for {} ({})", user.name, user.id));
            return Ok(());
        }

        if let Some(id) = toggle_active {
            let user = MembersLogic::toggle_active(&pool.conn, actor, id)?;
            let state = user.status.map_or("active", |s| s.to_db_str());
            success(format!("{} ({}) is now {}", user.name, user.id, state));
            return Ok(());
        }

        let users = if *pending {
            MembersLogic::pending(&pool.conn, actor)?
        } else {
            MembersLogic::list(&pool.conn, actor)?
        };

        if users.is_empty() {
            info(if *pending {
                "No applications awaiting approval."
            } else {
                "No members found."
            });
            return Ok(());
        }

        header(if *pending { "Pending Applications" } else { "Members" });
        print_table(&users, cfg.separator());
    }

    Ok(())
}

fn print_table(users: &[User], sep: char) {
    let mut table = Table::new(
        vec![
            Column::new("ID"),
            Column::new("NAME"),
            Column::new("ROLE"),
            Column::new("EMAIL"),
            Column::new("CHURCH"),
            Column::new("STATUS"),
        ],
        sep,
    );

    for u in users {
        let status = u.status.unwrap_or(AccountStatus::Active);
        table.add_row(vec![
            u.id.clone(),
            u.name.clone(),
            u.role.label().to_string(),
            u.display_email().to_string(),
            u.church.clone(),
            status.to_db_str().to_string(),
        ]);
    }

    print!("{}", table.render());
}
