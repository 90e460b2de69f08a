//! rFellowship main entrypoint.

use rfellowship::run;
use rfellowship::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
