pub mod error;
pub mod models;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::{
    Booking, DashboardCounts, EnrollForm, Enrollment, EnrollmentDetail, JoinForm, RollNoForm,
    Sport, SportForm, Student,
};
pub use store::{AddSportOutcome, Database, EnrollOutcome};
