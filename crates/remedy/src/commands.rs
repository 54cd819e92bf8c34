use anyhow::Result;
use colored::*;
use std::path::Path;
use uuid::Uuid;

use roster::{NewUser, UserChanges, UserStore};

use crate::desk::FeedbackDesk;
use crate::event::{EventLog, FeedbackSubmission};
use crate::knowledge::KnowledgeStore;
use crate::stats;
use crate::suggest;

/// Record one feedback submission and report the knowledge adjustments
pub fn record_feedback(root: &Path, submission: FeedbackSubmission) -> Result<()> {
  let mut desk = FeedbackDesk::open_or_create(root)?;
  let outcome = desk.record(submission)?;

  println!(
    "{} Logged feedback from {} on {}",
    "✓".green(),
    outcome.event.user_id.cyan(),
    outcome.event.recommended_drug.yellow()
  );

  if outcome.adjusted_conditions.is_empty() {
    println!("Knowledge base unchanged.");
  } else {
    for condition in &outcome.adjusted_conditions {
      if outcome.event.rating >= 4 {
        println!(
          "{} now listed for {}",
          outcome.event.recommended_drug.yellow(),
          condition.cyan()
        );
      } else {
        println!(
          "{} no longer listed for {}",
          outcome.event.recommended_drug.yellow(),
          condition.cyan()
        );
      }
    }
  }

  Ok(())
}

/// Look up drugs for a symptom description
pub fn suggest_drugs(root: &Path, symptoms: &str) -> Result<()> {
  let knowledge = KnowledgeStore::open_or_create(root)?;
  let suggestions = suggest::suggest(&knowledge, symptoms)?;

  if suggestions.is_empty() {
    println!("No known condition matches those symptoms.");
    return Ok(());
  }

  for suggestion in suggestions {
    println!("{}: {}", suggestion.condition.cyan(), suggestion.drugs.join(", "));
  }

  Ok(())
}

/// Print the condition → drug mapping, optionally for one condition
pub fn show_knowledge(root: &Path, condition: Option<&str>) -> Result<()> {
  let knowledge = KnowledgeStore::open_or_create(root)?;
  let snapshot = knowledge.snapshot()?;

  if let Some(condition) = condition {
    let wanted = condition.to_lowercase();
    match snapshot.get(&wanted) {
      Some(drugs) => println!("{}: {}", wanted.cyan(), drugs.join(", ")),
      None => println!("No condition named {}", wanted.yellow()),
    }
    return Ok(());
  }

  for (condition, drugs) in snapshot {
    println!("{}: {}", condition.cyan(), drugs.join(", "));
  }

  Ok(())
}

/// List recorded feedback events, most recent last
pub fn list_log(root: &Path, limit: Option<usize>) -> Result<()> {
  let log = EventLog::open_or_create(root)?;
  let events = log.events()?;

  if events.is_empty() {
    println!("No feedback recorded yet.");
    return Ok(());
  }

  let skip = limit.map_or(0, |n| events.len().saturating_sub(n));

  for event in events.into_iter().skip(skip) {
    println!(
      "{} {} rated {} {}/5 ({:?}): {}",
      event.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
      event.user_id.cyan(),
      event.recommended_drug.yellow(),
      event.rating,
      event.input_type,
      event.symptoms
    );
    if let Some(comment) = &event.feedback_text {
      println!("  {}", comment.dimmed());
    }
  }

  Ok(())
}

/// Print dashboard counters
pub fn show_stats(root: &Path) -> Result<()> {
  let events = EventLog::open_or_create(root)?;
  let knowledge = KnowledgeStore::open_or_create(root)?;
  let users = UserStore::open_or_create(root)?;

  let stats = stats::gather(&events, &knowledge, &users)?;

  println!("Registered users: {}", stats.registered_users);
  println!("Active users:     {}", stats.active_users);
  println!("Feedback events:  {}", stats.feedback_events);
  match stats.average_rating {
    Some(average) => println!("Average rating:   {average:.2}"),
    None => println!("Average rating:   n/a"),
  }

  println!("Conditions:");
  for (condition, drug_count) in stats.conditions {
    println!("  {}: {} drugs", condition.cyan(), drug_count);
  }

  Ok(())
}

/// Register a new user
pub fn add_user(root: &Path, full_name: &str, email: &str, age: u32, allergies: &str) -> Result<()> {
  let mut users = UserStore::open_or_create(root)?;

  let record = users.add(NewUser {
    full_name: full_name.to_string(),
    email: email.to_string(),
    age,
    allergies: allergies.to_string(),
  })?;

  println!("{} Added user {} ({})", "✓".green(), record.full_name.cyan(), record.id);
  Ok(())
}

/// List every registered user
pub fn list_users(root: &Path) -> Result<()> {
  let users = UserStore::open_or_create(root)?;
  let records = users.list()?;

  if records.is_empty() {
    println!("No users registered.");
    return Ok(());
  }

  for user in records {
    print_user(&user);
  }

  Ok(())
}

/// Search users by name or email
pub fn search_users(root: &Path, term: &str) -> Result<()> {
  let users = UserStore::open_or_create(root)?;
  let matches = users.search(term)?;

  if matches.is_empty() {
    println!("No users match {}", term.yellow());
    return Ok(());
  }

  for user in matches {
    print_user(&user);
  }

  Ok(())
}

/// Update a user's profile fields
pub fn update_user(
  root: &Path,
  id: Uuid,
  full_name: Option<&str>,
  email: Option<&str>,
  age: Option<u32>,
  allergies: Option<&str>,
) -> Result<()> {
  let mut users = UserStore::open_or_create(root)?;

  let updated = users.update(
    id,
    UserChanges {
      full_name: full_name.map(str::to_string),
      email: email.map(str::to_string),
      age,
      allergies: allergies.map(str::to_string),
    },
  )?;

  println!("{} Updated user {}", "✓".green(), updated.full_name.cyan());
  Ok(())
}

/// Activate or deactivate a user record
pub fn set_user_active(root: &Path, id: Uuid, active: bool) -> Result<()> {
  let mut users = UserStore::open_or_create(root)?;
  let updated = users.set_active(id, active)?;

  let state = if active { "activated" } else { "deactivated" };
  println!("{} {} user {}", "✓".green(), state, updated.full_name.cyan());
  Ok(())
}

/// Delete a user record
pub fn remove_user(root: &Path, id: Uuid) -> Result<()> {
  let mut users = UserStore::open_or_create(root)?;
  let removed = users.remove(id)?;

  println!("{} Removed user {}", "✓".green(), removed.full_name.cyan());
  Ok(())
}

fn print_user(user: &roster::UserRecord) {
  let status = if user.is_active { "active".green() } else { "inactive".red() };
  println!(
    "{} {} <{}> age {} [{}] {}",
    user.id.to_string().dimmed(),
    user.full_name.cyan(),
    user.email,
    user.age,
    status,
    user.allergies
  );
}
