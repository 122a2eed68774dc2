pub mod auth;

pub mod courses;

pub mod assignments;

pub mod submissions;

pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use submissions::configure_submissions_routes;
