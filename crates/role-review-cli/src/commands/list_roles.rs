//! List roles command implementation.

use role_review_core::Config;
use role_review_rules::all_checkers;

/// Runs the list-roles command.
pub fn run() {
    println!("Available roles:\n");
    println!("{:<4} {:<15} Checks", "", "Role");
    println!("{}", "-".repeat(80));

    for checker in all_checkers(&Config::default()) {
        let role = checker.role();
        println!(
            "{:<4} {:<15} {}",
            role.icon(),
            role.as_str(),
            checker.description()
        );
    }

    println!("\nUse --roles to run a subset, e.g.:");
    println!("  role-review check --roles dev,tester");
}
