pub mod assignments;
pub mod auth;
pub mod courses;
pub mod submissions;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use submissions::SubmissionService;
