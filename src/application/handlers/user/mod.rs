//! User handlers.
//!
//! ## Commands
//! - Updating demographic and financial profile fields
//! - Changing the public handle
//!
//! ## Queries
//! - Own account view
//! - Public profile of any member
//! - Handle availability

mod check_handle;
mod get_own_profile;
mod get_user_profile;
mod update_handle;
mod update_profile;

// Commands
pub use update_handle::{UpdateHandleCommand, UpdateHandleHandler};
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler, UpdateProfileResult};

// Queries
pub use check_handle::{CheckHandleHandler, CheckHandleQuery, CheckHandleResult};
pub use get_own_profile::{GetOwnProfileHandler, GetOwnProfileQuery};
pub use get_user_profile::{GetUserProfileHandler, GetUserProfileQuery};
