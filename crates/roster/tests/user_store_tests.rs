use anyhow::Result;
use tempfile::TempDir;
use uuid::Uuid;

use roster::{NewUser, RosterError, UserChanges, UserStore};

fn new_user(name: &str, email: &str) -> NewUser {
  NewUser {
    full_name: name.to_string(),
    email: email.to_string(),
    age: 30,
    allergies: String::new(),
  }
}

#[test]
fn open_or_create_starts_empty() -> Result<()> {
  let temp = TempDir::new()?;

  let store = UserStore::open_or_create(temp.path())?;
  assert_eq!(store.count()?, 0);
  assert!(store.list()?.is_empty());
  Ok(())
}

#[test]
fn add_assigns_id_and_defaults() -> Result<()> {
  let temp = TempDir::new()?;
  let mut store = UserStore::open_or_create(temp.path())?;

  let record = store.add(new_user("Ada Park", "ada@example.com"))?;

  assert!(record.is_active);
  assert_eq!(record.email, "ada@example.com");
  assert_eq!(store.count()?, 1);
  Ok(())
}

#[test]
fn duplicate_email_is_rejected_case_insensitively() -> Result<()> {
  let temp = TempDir::new()?;
  let mut store = UserStore::open_or_create(temp.path())?;

  store.add(new_user("Ada Park", "ada@example.com"))?;
  let result = store.add(new_user("Other Ada", "ADA@example.com"));

  assert!(matches!(result, Err(RosterError::DuplicateEmail { .. })));
  assert_eq!(store.count()?, 1);
  Ok(())
}

#[test]
fn records_survive_reopening() -> Result<()> {
  let temp = TempDir::new()?;

  let added = {
    let mut store = UserStore::open_or_create(temp.path())?;
    store.add(new_user("Ben Osei", "ben@example.com"))?
  };

  let reopened = UserStore::open_or_create(temp.path())?;
  let listed = reopened.list()?;
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].id, added.id);
  assert_eq!(listed[0].created_at, added.created_at);
  Ok(())
}

#[test]
fn search_matches_name_and_email_substrings() -> Result<()> {
  let temp = TempDir::new()?;
  let mut store = UserStore::open_or_create(temp.path())?;

  store.add(new_user("Ada Park", "ada@example.com"))?;
  store.add(new_user("Ben Osei", "ben@elsewhere.net"))?;

  assert_eq!(store.search("park")?.len(), 1);
  assert_eq!(store.search("elsewhere")?.len(), 1);
  assert_eq!(store.search("example")?.len(), 1);
  assert!(store.search("nobody")?.is_empty());
  Ok(())
}

#[test]
fn update_changes_only_provided_fields() -> Result<()> {
  let temp = TempDir::new()?;
  let mut store = UserStore::open_or_create(temp.path())?;

  let record = store.add(new_user("Ada Park", "ada@example.com"))?;

  let updated = store.update(
    record.id,
    UserChanges { age: Some(35), allergies: Some("ibuprofen".to_string()), ..Default::default() },
  )?;

  assert_eq!(updated.full_name, "Ada Park");
  assert_eq!(updated.age, 35);
  assert_eq!(updated.allergies, "ibuprofen");
  Ok(())
}

#[test]
fn update_rejects_stealing_an_email() -> Result<()> {
  let temp = TempDir::new()?;
  let mut store = UserStore::open_or_create(temp.path())?;

  store.add(new_user("Ada Park", "ada@example.com"))?;
  let ben = store.add(new_user("Ben Osei", "ben@example.com"))?;

  let result = store.update(
    ben.id,
    UserChanges { email: Some("ada@example.com".to_string()), ..Default::default() },
  );

  assert!(matches!(result, Err(RosterError::DuplicateEmail { .. })));
  Ok(())
}

#[test]
fn keeping_your_own_email_is_not_a_duplicate() -> Result<()> {
  let temp = TempDir::new()?;
  let mut store = UserStore::open_or_create(temp.path())?;

  let ada = store.add(new_user("Ada Park", "ada@example.com"))?;
  let updated = store.update(
    ada.id,
    UserChanges {
      full_name: Some("Ada P.".to_string()),
      email: Some("ada@example.com".to_string()),
      ..Default::default()
    },
  )?;

  assert_eq!(updated.full_name, "Ada P.");
  Ok(())
}

#[test]
fn set_active_toggles_without_deleting() -> Result<()> {
  let temp = TempDir::new()?;
  let mut store = UserStore::open_or_create(temp.path())?;

  let record = store.add(new_user("Ada Park", "ada@example.com"))?;

  let deactivated = store.set_active(record.id, false)?;
  assert!(!deactivated.is_active);
  assert_eq!(store.count()?, 1);

  let reactivated = store.set_active(record.id, true)?;
  assert!(reactivated.is_active);
  Ok(())
}

#[test]
fn remove_deletes_exactly_one_record() -> Result<()> {
  let temp = TempDir::new()?;
  let mut store = UserStore::open_or_create(temp.path())?;

  let ada = store.add(new_user("Ada Park", "ada@example.com"))?;
  store.add(new_user("Ben Osei", "ben@example.com"))?;

  let removed = store.remove(ada.id)?;
  assert_eq!(removed.id, ada.id);

  let remaining = store.list()?;
  assert_eq!(remaining.len(), 1);
  assert_eq!(remaining[0].email, "ben@example.com");
  Ok(())
}

#[test]
fn unknown_ids_are_not_found() -> Result<()> {
  let temp = TempDir::new()?;
  let mut store = UserStore::open_or_create(temp.path())?;

  let missing = Uuid::new_v4();
  assert!(matches!(store.remove(missing), Err(RosterError::NotFound { .. })));
  assert!(matches!(store.set_active(missing, false), Err(RosterError::NotFound { .. })));
  assert!(matches!(
    store.update(missing, UserChanges::default()),
    Err(RosterError::NotFound { .. })
  ));
  Ok(())
}
