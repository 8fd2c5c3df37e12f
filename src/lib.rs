//! # LearnHub client
//!
//! Client-side plumbing for the LearnHub learning platform: session handling,
//! route guarding and typed wrappers around the backend REST API
//! (dashboards, coding exercises, quizzes, study content search).
//!
//! ## Modules
//!
//! - [`session`]: persisted `token`/`user` state behind an explicit context
//! - [`http`]: shared HTTP client that attaches the bearer token
//! - [`router`]: static route table, navigation guard and router
//! - [`services`]: one wrapper per backend resource group
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use learnhub_client::{ApiConfig, HttpClient, Router, Services, SessionContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = SessionContext::in_memory();
//!     let http = HttpClient::new(&ApiConfig::default(), session.clone())?;
//!     let services = Services::new(http);
//!
//!     services.auth.login("ada@example.edu", "secret").await?;
//!     let dashboard = services.dashboard.get_student_dashboard().await?;
//!     println!("{}", dashboard);
//!
//!     let mut router = Router::with_default_routes(session);
//!     let nav = router.navigate("/login")?;
//!     assert_eq!(nav.path(), "/dashboard");
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod http;
pub mod router;
pub mod services;
pub mod session;

pub use config::{generate_default_config, ApiConfig, Config, ConfigError, LoggingConfig, SessionConfig};

pub use http::{ClientError, ClientResult, HttpClient, RequestOptions};

pub use router::{Decision, Guard, Navigation, RouteDescriptor, RouteTable, Router, RouterError};

pub use services::{AuthService, CodeExercisesService, DashboardService, Services, StudyService};

pub use session::{FileStore, MemoryStore, Session, SessionContext, SessionError, SessionStore, User};
