//! classroom-client — the classroom backend over HTTP.
//!
//! Implements the `QuizBackend` trait for the REST API and in memory, and
//! wraps the classroom, roster and account endpoints.

pub mod auth;
pub mod classrooms;
pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod quizzes;

pub use auth::{AuthResponse, SignupRequest};
pub use classrooms::{Classroom, StudentEnrollment};
pub use config::{load_config, load_config_from, ClientConfig};
pub use error::ClientError;
pub use http::ApiClient;
pub use mock::InMemoryBackend;
