use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::errors::{AppError, AppResult};
use crate::services::payment::{MOBILE_PROVIDERS, PaymentMethod, PaymentRequest, SimulatedPayments};
use crate::ui::messages::{info, success};
use crate::ui::upsell;
use crate::utils::date::Clock;
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &Clock) -> AppResult<()> {
    if let Commands::Upgrade {
        plan,
        card,
        provider,
        phone,
    } = cmd
    {
        let pool = super::open_db(cfg, clock)?;
        let (mut session, mut gate) = super::session_with_gate(&pool, cfg, clock)?;
        let user = session.require_user()?;

        if user.is_subscribed() {
            info(format!("{} is already subscribed. Thank you!", user.name));
            return Ok(());
        }

        let Some(amount) = plan else {
            upsell::show(&gate.state());
            return Ok(());
        };

        let method = match (card, phone) {
            (Some(number), _) => PaymentMethod::Card {
                number: number.clone(),
            },
            (None, Some(phone)) => PaymentMethod::Mobile {
                provider: provider
                    .clone()
                    .unwrap_or_else(|| MOBILE_PROVIDERS[0].to_string()),
                phone: phone.clone(),
            },
            (None, None) => {
                return Err(AppError::Payment(
                    "choose a payment method with --card or --phone".into(),
                ));
            }
        };

        let request = PaymentRequest {
            user_id: user.id.clone(),
            amount: *amount,
            method,
        };

        info(format!("Processing payment with {}…", request.method.label()));

        let processor = SimulatedPayments::new(Duration::from_millis(cfg.payment_delay_ms));
        let (receipt, state) = AuthLogic::upgrade(
            &pool.conn,
            &mut session,
            &mut gate,
            &processor,
            &request,
            clock.utc_now(),
        )?;

        success(format!(
            "Subscription active ({} / month). Receipt {}",
            receipt.amount, receipt.reference
        ));
        if state.has_access {
            success("All features unlocked.");
        }
    }

    Ok(())
}
