//! Discord interaction handlers
//!
//! This module provides handlers for interactions that are not slash commands:
//! the persistent buy button and the drop creation modal.

/// "Buy Now" button on marketplace posts
pub mod buy_button;
/// "Create C500 Drop" modal
pub mod drop_modal;
