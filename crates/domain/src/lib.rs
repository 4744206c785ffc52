pub mod availability;
pub mod entities;
pub mod ordering;
pub mod ports;
pub mod value_objects;

pub use availability::AvailabilityService;
pub use entities::{Assignment, Participant, Role, StaffTask, TaskCategory};
pub use ordering::PrerequisiteConstraint;
pub use ports::{AssignmentSink, RosterFetcher};
pub use value_objects::TimeFrame;
