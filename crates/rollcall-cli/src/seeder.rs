//! Fake user generation and bulk store operations.

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use std::time::Instant;

use rollcall_db::{StoreError, UserStore};
use rollcall_models::NewUser;

/// Outcome of a seeding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    /// Users skipped because their email was already taken
    pub skipped: usize,
}

fn email_part(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Generates `count` fake users sharing one password hash.
///
/// Emails carry the user's index, so every generated email is distinct.
pub fn generate_users(count: usize, password_hash: &str) -> Vec<NewUser> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            NewUser {
                email: format!(
                    "{}.{}+user{}@example.com",
                    email_part(&first_name),
                    email_part(&last_name),
                    idx
                ),
                name: format!("{} {}", first_name, last_name),
                password_hash: password_hash.to_string(),
            }
        })
        .collect()
}

/// Inserts `users` one at a time, skipping emails already in use.
pub async fn seed_users(
    store: &dyn UserStore,
    users: Vec<NewUser>,
) -> Result<SeedReport, StoreError> {
    let start_time = Instant::now();
    println!("👥 Seeding {} users...", users.len());

    let mut report = SeedReport::default();
    for user in users {
        match store.insert(user).await {
            Ok(_) => report.inserted += 1,
            Err(StoreError::DuplicateEmail(_)) => report.skipped += 1,
            Err(err) => return Err(err),
        }
    }

    println!(
        "   ✅ Inserted {} users ({} skipped) in {:.2?}",
        report.inserted,
        report.skipped,
        start_time.elapsed()
    );

    Ok(report)
}

/// Deletes every user. Returns how many were removed.
pub async fn clear_users(store: &dyn UserStore) -> Result<usize, StoreError> {
    let mut removed = 0;
    for user in store.find_all().await? {
        if store.delete(user.id).await? {
            removed += 1;
        }
    }
    Ok(removed)
}
