//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Pure helpers (validation, labels, export rows) live next
//! to the page that uses them and are tested in the page's sidecar file.

pub mod admin_dashboard;
pub mod admin_students;
pub mod admin_teachers;
pub mod home;
pub mod login;
pub mod oauth_callback;
pub mod password;
pub mod signup;
pub mod student_dashboard;
pub mod teacher_attendance;
pub mod teacher_classroom;
pub mod teacher_dashboard;
pub mod teacher_marks;
pub mod teacher_tests;
