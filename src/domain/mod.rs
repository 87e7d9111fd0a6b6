// Domain layer - Dashboard records, schedule resolution and rotation
pub mod announcement;
pub mod class;
pub mod dashboard;
pub mod error;
pub mod record_id;
pub mod rotation;
pub mod schedule;
