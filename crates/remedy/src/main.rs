use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use remedy::commands;
use remedy::event::{FeedbackSubmission, InputType};
use remedy::store;

#[derive(Parser)]
#[command(name = "remedy")]
#[command(
  about = "Remedi - Drug Recommendation Feedback System\nSymptom feedback logging and knowledge base reinforcement"
)]
#[command(version)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Record a user's rating of a drug recommendation
  Feedback {
    /// Identifier of the submitting user
    user_id: String,
    /// Symptom description exactly as submitted
    symptoms: String,
    /// Drug that was recommended
    drug: String,
    /// Rating from 1 (unhelpful) to 5 (helped)
    rating: u8,
    /// Optional free-text commentary
    #[arg(short, long)]
    comment: Option<String>,
    /// How the symptoms were supplied
    #[arg(short, long, value_enum, default_value = "text")]
    input_type: InputType,
    /// Pill-image compatibility verdict (image submissions only)
    #[arg(long)]
    compatible: Option<bool>,
  },
  /// Suggest drugs for a symptom description from the knowledge base
  Suggest {
    /// Free-text symptom description
    symptoms: String,
  },
  /// Show the condition → drug mapping
  Knowledge {
    /// Only show one condition
    #[arg(short, long)]
    condition: Option<String>,
  },
  /// List recorded feedback events
  Log {
    /// Only show the most recent N events
    #[arg(short, long)]
    limit: Option<usize>,
  },
  /// Show dashboard counters
  Stats,
  /// Manage registered users
  #[command(subcommand)]
  User(UserCommands),
}

#[derive(Subcommand)]
enum UserCommands {
  /// Register a new user
  Add {
    /// Full name of the user
    full_name: String,
    /// Email address, unique per user
    email: String,
    /// Age in years
    #[arg(short, long)]
    age: u32,
    /// Known allergies, comma separated
    #[arg(short = 'A', long, default_value = "")]
    allergies: String,
  },
  /// List all users
  List,
  /// Search users by name or email
  Search {
    /// Substring to look for
    term: String,
  },
  /// Update a user's details
  Update {
    /// Id of the user to update
    id: Uuid,
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    age: Option<u32>,
    #[arg(long)]
    allergies: Option<String>,
  },
  /// Deactivate a user without deleting the record
  Deactivate {
    /// Id of the user to deactivate
    id: Uuid,
  },
  /// Reactivate a deactivated user
  Activate {
    /// Id of the user to activate
    id: Uuid,
  },
  /// Delete a user record
  Remove {
    /// Id of the user to remove
    id: Uuid,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let root = store::data_root()?;

  match cli.command {
    Commands::Feedback { user_id, symptoms, drug, rating, comment, input_type, compatible } => {
      commands::record_feedback(
        &root,
        FeedbackSubmission {
          user_id,
          symptoms,
          recommended_drug: drug,
          rating,
          feedback_text: comment,
          input_type,
          is_compatible: compatible,
        },
      )?;
    }
    Commands::Suggest { symptoms } => {
      commands::suggest_drugs(&root, &symptoms)?;
    }
    Commands::Knowledge { condition } => {
      commands::show_knowledge(&root, condition.as_deref())?;
    }
    Commands::Log { limit } => {
      commands::list_log(&root, limit)?;
    }
    Commands::Stats => {
      commands::show_stats(&root)?;
    }
    Commands::User(user_command) => match user_command {
      UserCommands::Add { full_name, email, age, allergies } => {
        commands::add_user(&root, &full_name, &email, age, &allergies)?;
      }
      UserCommands::List => {
        commands::list_users(&root)?;
      }
      UserCommands::Search { term } => {
        commands::search_users(&root, &term)?;
      }
      UserCommands::Update { id, full_name, email, age, allergies } => {
        commands::update_user(
          &root,
          id,
          full_name.as_deref(),
          email.as_deref(),
          age,
          allergies.as_deref(),
        )?;
      }
      UserCommands::Deactivate { id } => {
        commands::set_user_active(&root, id, false)?;
      }
      UserCommands::Activate { id } => {
        commands::set_user_active(&root, id, true)?;
      }
      UserCommands::Remove { id } => {
        commands::remove_user(&root, id)?;
      }
    },
  }

  Ok(())
}
