//! classroom CLI — author, grade and publish classroom quizzes.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "classroom",
    version,
    about = "Author, grade and publish classroom quizzes"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate quiz TOML files
    Validate {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Grade an answer file against a local quiz
    Grade {
        /// Quiz TOML file
        #[arg(long)]
        quiz: PathBuf,

        /// Answer TOML file
        #[arg(long)]
        answers: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Save the attempt report as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Publish a quiz file to the backend
    Publish {
        /// Quiz TOML file
        #[arg(long)]
        quiz: PathBuf,

        /// Target classroom (overrides the quiz file and config)
        #[arg(long)]
        classroom_id: Option<u64>,
    },

    /// List the quizzes of a classroom
    Quizzes {
        #[arg(long)]
        classroom_id: Option<u64>,
    },

    /// Show a stored quiz with its correct answers
    Show {
        #[arg(long)]
        quiz_id: u64,
    },

    /// Submit an answer file to the backend for grading
    Submit {
        #[arg(long)]
        quiz_id: u64,

        /// Answer TOML file
        #[arg(long)]
        answers: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Delete a stored quiz
    DeleteQuiz {
        #[arg(long)]
        quiz_id: u64,
    },

    /// Manage classrooms and their rosters
    Classrooms {
        #[command(subcommand)]
        action: ClassroomAction,
    },

    /// Log in and print a bearer token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "CLASSROOM_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        username: String,

        /// Display name
        #[arg(long)]
        profile_name: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        /// Account type: teacher, student or parent
        #[arg(long = "type", default_value = "teacher")]
        account_type: String,

        #[arg(long, env = "CLASSROOM_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create starter config and example quiz
    Init,
}

#[derive(Subcommand)]
enum ClassroomAction {
    /// List your classrooms
    List,

    /// Create a classroom
    Create {
        #[arg(long)]
        name: String,
    },

    /// Delete a classroom
    Delete {
        #[arg(long)]
        classroom_id: u64,
    },

    /// Enroll a student
    AddStudent {
        #[arg(long)]
        classroom_id: u64,

        #[arg(long)]
        student: String,
    },

    /// Remove a student
    DropStudent {
        #[arg(long)]
        classroom_id: u64,

        #[arg(long)]
        student: String,
    },

    /// Link a parent account to a student (omit --parent to clear it)
    SetParent {
        #[arg(long)]
        classroom_id: u64,

        #[arg(long)]
        student: String,

        #[arg(long)]
        parent: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("classroom=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Grade {
            quiz,
            answers,
            format,
            output,
        } => commands::grade::execute(quiz, answers, format, output),
        Commands::Publish { quiz, classroom_id } => {
            commands::publish::execute(quiz, classroom_id, config).await
        }
        Commands::Quizzes { classroom_id } => commands::quizzes::list(classroom_id, config).await,
        Commands::Show { quiz_id } => commands::quizzes::show(quiz_id, config).await,
        Commands::DeleteQuiz { quiz_id } => commands::quizzes::delete(quiz_id, config).await,
        Commands::Submit {
            quiz_id,
            answers,
            format,
        } => commands::submit::execute(quiz_id, answers, format, config).await,
        Commands::Classrooms { action } => run_classroom_action(action, config).await,
        Commands::Login { email, password } => {
            commands::account::login(email, password, config).await
        }
        Commands::Signup {
            username,
            profile_name,
            email,
            phone,
            account_type,
            password,
        } => {
            let request = classroom_client::SignupRequest {
                username,
                profile_name,
                email,
                phone,
                account_type,
                password,
            };
            commands::account::signup(request, config).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run_classroom_action(action: ClassroomAction, config: Option<PathBuf>) -> anyhow::Result<()> {
    use commands::classrooms;

    match action {
        ClassroomAction::List => classrooms::list(config).await,
        ClassroomAction::Create { name } => classrooms::create(name, config).await,
        ClassroomAction::Delete { classroom_id } => classrooms::delete(classroom_id, config).await,
        ClassroomAction::AddStudent {
            classroom_id,
            student,
        } => classrooms::add_student(classroom_id, student, config).await,
        ClassroomAction::DropStudent {
            classroom_id,
            student,
        } => classrooms::drop_student(classroom_id, student, config).await,
        ClassroomAction::SetParent {
            classroom_id,
            student,
            parent,
        } => classrooms::set_parent(classroom_id, student, parent, config).await,
    }
}
