//! Data models for Eqborrow

pub mod activity;
pub mod borrow;
pub mod enums;
pub mod inventory;
pub mod user;

// Re-export commonly used types
pub use activity::ActivityLogEntry;
pub use borrow::{BorrowLineItem, BorrowRequestDetails, CreateBorrowRequest};
pub use enums::{ActionType, BorrowStatus};
pub use inventory::InventoryItem;
pub use user::{Role, User, UserClaims};
