//! LearnHub CLI
//!
//! Command-line front end for the LearnHub client:
//! - Log in and out, inspect the stored session
//! - Evaluate navigations against the route guard
//! - Call the exercise, dashboard and study services

use anyhow::Context;
use clap::{Parser, Subcommand};
use learnhub_client::router::Navigation;
use learnhub_client::services::models::ExerciseFilters;
use learnhub_client::{
    generate_default_config, Config, FileStore, HttpClient, LoggingConfig, MemoryStore, Router,
    Services, SessionContext, SessionStore,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "learnhub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Command-line client for the LearnHub learning platform")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Keep the session in memory instead of the session file
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the token
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "student")]
        role: String,
    },

    /// Clear the stored session
    Logout,

    /// Fetch and store the current user profile
    Whoami,

    /// Check whether the stored token is still accepted
    Status,

    /// List the route table
    Routes,

    /// Run the navigation guard for a path or route name
    Navigate {
        /// Path such as `/code`, or a route name such as `studywithgenAI`
        target: String,
    },

    /// Code exercises
    Exercises {
        #[command(subcommand)]
        command: ExerciseCommand,
    },

    /// Quizzes and dashboards
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommand,
    },

    /// Study content search
    Study {
        #[command(subcommand)]
        command: StudyCommand,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ExerciseCommand {
    /// List exercises
    List {
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        lecture_id: Option<i64>,
    },
    /// Show one exercise
    Show { id: i64 },
    /// Stored test cases of an exercise
    TestCases { id: i64 },
    /// Submissions of a user
    Submissions {
        user_id: i64,
        #[arg(long)]
        exercise_id: Option<i64>,
    },
    /// Tutoring chats of a user
    Chats { user_id: i64 },
    /// Upload a question document and print the extracted text
    Upload { path: PathBuf },
    /// Search the web for material on an exercise
    Search { id: i64 },
}

#[derive(Subcommand)]
pub enum DashboardCommand {
    /// Student dashboard
    Student,
    /// Teacher dashboard
    Teacher {
        #[arg(long)]
        week: Option<i64>,
    },
    /// Upcoming quizzes
    Upcoming,
    /// Quizzes of a week
    Quizzes { week_id: i64 },
    /// Quizzes of a week as shown on the teacher dashboard
    WeekQuizzes { week_id: i64 },
    /// Performance breakdown of a quiz
    QuizPerformance { quiz_id: i64 },
}

#[derive(Subcommand)]
pub enum StudyCommand {
    /// Search for study material
    Search {
        lecture_id: i64,
        #[arg(default_value = "")]
        query: String,
    },
    /// Previously found material for a lecture
    Fetch { lecture_id: i64 },
    /// Relevant content stored for a lecture
    Relevant { lecture_id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging)?;

    let store: Arc<dyn SessionStore> = if cli.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        let path = config.session.resolved_path();
        Arc::new(
            FileStore::open(&path)
                .with_context(|| format!("opening session file {}", path.display()))?,
        )
    };
    let session = SessionContext::new(store);
    let http = HttpClient::new(&config.api, session.clone())?;
    let base_url = http.base_url().to_string();
    let services = Services::new(http);

    tracing::debug!(base_url = %base_url, "Client ready");

    match cli.command {
        Commands::Login { email, password } => {
            let response = services.auth.login(&email, &password).await?;
            println!("Logged in ({} token stored)", response.token_type);
        }

        Commands::Register {
            email,
            password,
            name,
            role,
        } => {
            let response = services.auth.register(&email, &password, &name, &role).await?;
            print_json(&response)?;
        }

        Commands::Logout => {
            services.auth.logout().await?;
            println!("Logged out");
        }

        Commands::Whoami => {
            let user = services.auth.get_user().await?;
            print_json(&user)?;
        }

        Commands::Status => {
            let verified = services.auth.verify_session().await?;
            let snapshot = session.snapshot();
            match snapshot.user {
                Some(user) if verified => {
                    let name = user
                        .name
                        .or(user.email)
                        .unwrap_or_else(|| "unknown user".to_string());
                    println!("Authenticated as {} on {}", name, base_url);
                }
                _ => println!("Not authenticated on {}", base_url),
            }
        }

        Commands::Routes => {
            let router = Router::with_default_routes(session);
            println!("{:<14} {:<16} {:<8} {}", "PATH", "NAME", "LAYOUT", "AUTH");
            for route in router.table().routes() {
                println!(
                    "{:<14} {:<16} {:<8} {}",
                    route.path,
                    route.name.unwrap_or("-"),
                    format!("{:?}", route.layout).to_lowercase(),
                    if route.requires_auth() { "required" } else { "-" }
                );
            }
        }

        Commands::Navigate { target } => {
            let mut router = Router::with_default_routes(session);
            let path = if target.starts_with('/') {
                target
            } else {
                router
                    .table()
                    .find_by_name(&target)
                    .map(|route| route.path.to_string())
                    .with_context(|| format!("no route named {}", target))?
            };
            match router.navigate(&path)? {
                Navigation::Arrived {
                    route,
                    redirected_from: Some(from),
                } => println!("{} -> {} (redirected)", from, route.path),
                Navigation::Arrived { route, .. } => println!("{} (allowed)", route.path),
                Navigation::NotFound { path } => println!("{} (no such route)", path),
            }
        }

        Commands::Exercises { command } => {
            let exercises = &services.code_exercises;
            match command {
                ExerciseCommand::List {
                    difficulty,
                    category,
                    lecture_id,
                } => {
                    let filters = ExerciseFilters {
                        difficulty,
                        category,
                        lecture_id,
                    };
                    print_json(&exercises.get_exercises(&filters).await?)?;
                }
                ExerciseCommand::Show { id } => print_json(&exercises.get_exercise(id).await?)?,
                ExerciseCommand::TestCases { id } => {
                    print_json(&exercises.get_test_cases(id).await?)?
                }
                ExerciseCommand::Submissions {
                    user_id,
                    exercise_id,
                } => print_json(&exercises.get_user_submissions(user_id, exercise_id).await?)?,
                ExerciseCommand::Chats { user_id } => {
                    print_json(&exercises.get_user_chats(user_id).await?)?
                }
                ExerciseCommand::Upload { path } => {
                    let contents = std::fs::read(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    let file_name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "question".to_string());
                    print_json(&exercises.upload_question_file(&file_name, contents).await?)?;
                }
                ExerciseCommand::Search { id } => {
                    print_json(&exercises.search_google(id).await?)?
                }
            }
        }

        Commands::Dashboard { command } => {
            let dashboard = &services.dashboard;
            let value = match command {
                DashboardCommand::Student => dashboard.get_student_dashboard().await?,
                DashboardCommand::Teacher { week } => dashboard.get_teacher_dashboard(week).await?,
                DashboardCommand::Upcoming => dashboard.get_upcoming_quizzes().await?,
                DashboardCommand::Quizzes { week_id } => dashboard.get_quizzes(week_id).await?,
                DashboardCommand::WeekQuizzes { week_id } => {
                    dashboard.get_quizzes_for_week(week_id).await?
                }
                DashboardCommand::QuizPerformance { quiz_id } => {
                    dashboard.get_quiz_performance(quiz_id).await?
                }
            };
            print_json(&value)?;
        }

        Commands::Study { command } => {
            let study = &services.study;
            let value = match command {
                StudyCommand::Search { lecture_id, query } => {
                    study.search_content(lecture_id, &query).await?
                }
                StudyCommand::Fetch { lecture_id } => study.fetch_content(lecture_id).await?,
                StudyCommand::Relevant { lecture_id } => {
                    study.get_relevant_content(lecture_id).await?
                }
            };
            print_json(&value)?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "learnhub={level},learnhub_client={level}",
            level = config.level
        ))
    });

    let writer = match &config.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init();
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
