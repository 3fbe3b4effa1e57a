//! Data models for GearGuard

pub mod category;
pub mod equipment;
pub mod request;
pub mod stage;
pub mod team;
pub mod user;

// Re-export commonly used types
pub use category::Category;
pub use equipment::{Equipment, EquipmentDetails};
pub use request::{MaintenanceRequest, Priority, RequestType};
pub use stage::Stage;
pub use team::Team;
pub use user::{User, UserBasic};
