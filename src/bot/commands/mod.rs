//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Owner-only maintenance commands
pub mod admin;

/// Order fulfillment commands
pub mod fulfill;

/// General utility commands
pub mod general;

/// Ledger commands
pub mod ledger;

/// Seller onboarding and drop creation
pub mod seller;

// Export commands
pub use admin::*;
pub use fulfill::*;
pub use general::*;
pub use ledger::*;
pub use seller::*;

use crate::{bot::BotData, errors::Error};

/// Every command the framework registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        c500(),
        fulfill(),
        ping(),
        uptime(),
        about(),
        serverinfo(),
        userinfo(),
        listings(),
        help(),
        shutdown(),
        setstatus(),
        say(),
        register(),
        ledger(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_commands_are_slash_only_with_unique_names() {
        let commands = all();
        for command in &commands {
            assert!(
                command.prefix_action.is_none(),
                "`{}` must not be a prefix command",
                command.name
            );
        }

        let names: HashSet<_> = commands.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names.len(), commands.len());
        assert!(names.contains("c500") && names.contains("fulfill") && names.contains("ledger"));
    }
}
