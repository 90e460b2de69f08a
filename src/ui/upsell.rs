//! Subscription prompt shown when a guarded action is refused.

use crate::models::access::AccessState;
use crate::services::payment::{MOBILE_PROVIDERS, PLANS};
use crate::ui::messages::{header, warning};

pub fn show(state: &AccessState) {
    header("Monthly Subscription");

    if state.has_access {
        warning(format!(
            "7-Day Free Trial Active: {} remaining.",
            crate::utils::formatting::days_label(state.days_remaining)
        ));
    } else {
        warning("Free Trial Expired. Subscribe to keep posting, messaging and RSVPing.");
    }

    println!("Support the platform & ministry. Choose a plan:");
    for plan in PLANS {
        println!("  • {} / month", plan);
    }
    println!();
    println!("  rfellowship upgrade --plan <AMOUNT> --card <NUMBER>");
    println!(
        "  rfellowship upgrade --plan <AMOUNT> --provider \"{}\" --phone <NUMBER>",
        MOBILE_PROVIDERS[0]
    );
}
