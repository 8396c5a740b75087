// src/services/mod.rs

pub mod fair;
pub mod preference;
pub mod user;

pub use fair::FairService;
pub use preference::PreferenceService;
pub use user::UserService;
