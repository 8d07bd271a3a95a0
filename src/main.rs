//! staffledger main entrypoint.

use staffledger::run;
use staffledger::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
