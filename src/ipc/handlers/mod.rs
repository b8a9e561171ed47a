pub mod classes;
pub mod core;
pub mod lecturers;
pub mod session;
pub mod students;
