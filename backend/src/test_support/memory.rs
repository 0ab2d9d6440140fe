//! In-memory repositories mirroring the Diesel adapters' observable
//! behaviour: unique usernames and emails, per-user habit ids starting at 1,
//! and an append-only completion ledger ordered by insertion.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    CompletionPersistenceError, CompletionRepository, HabitPersistenceError, HabitRepository,
    NewUserRecord, PasswordHash, StoredCredentials, UserPersistenceError, UserRepository,
};
use crate::domain::{
    CompletionId, CompletionRecord, Habit, HabitDraft, HabitId, NewCompletion, User, UserId,
    Username,
};

use super::lock;

const UNAVAILABLE: &str = "in-memory store marked unavailable";

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<StoredCredentials>>,
    unavailable: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with a connection error until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Remove a user, as an operator deleting the row would.
    pub fn remove(&self, id: UserId) {
        lock(&self.rows, "users").retain(|row| row.user.id() != id);
    }

    pub fn len(&self) -> usize {
        lock(&self.rows, "users").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), UserPersistenceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(UserPersistenceError::connection(UNAVAILABLE));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, record: &NewUserRecord) -> Result<User, UserPersistenceError> {
        self.check_available()?;
        let mut rows = lock(&self.rows, "users");
        if rows.iter().any(|row| row.user.username() == &record.username) {
            return Err(UserPersistenceError::duplicate("username"));
        }
        if rows.iter().any(|row| row.user.email() == &record.email) {
            return Err(UserPersistenceError::duplicate("email"));
        }
        let next = rows
            .iter()
            .map(|row| i64::from(row.user.id()))
            .max()
            .unwrap_or(0)
            + 1;
        let id = UserId::new(next).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let user = User::new(id, record.username.clone(), record.email.clone());
        rows.push(StoredCredentials {
            user: user.clone(),
            password_hash: PasswordHash::new(record.password_hash.as_str()),
        });
        Ok(user)
    }

    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        self.check_available()?;
        Ok(lock(&self.rows, "users")
            .iter()
            .find(|row| row.user.username() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        self.check_available()?;
        Ok(lock(&self.rows, "users")
            .iter()
            .find(|row| row.user.id() == id)
            .map(|row| row.user.clone()))
    }

    async fn record_login(
        &self,
        id: UserId,
        at: DateTime<Utc>,
    ) -> Result<(), UserPersistenceError> {
        self.check_available()?;
        let mut rows = lock(&self.rows, "users");
        if let Some(row) = rows.iter_mut().find(|row| row.user.id() == id) {
            row.user = row.user.clone().with_last_login(Some(at));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryHabitRepository {
    rows: Mutex<Vec<Habit>>,
    unavailable: AtomicBool,
}

impl InMemoryHabitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), HabitPersistenceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(HabitPersistenceError::connection(UNAVAILABLE));
        }
        Ok(())
    }
}

#[async_trait]
impl HabitRepository for InMemoryHabitRepository {
    async fn create(
        &self,
        user_id: UserId,
        draft: &HabitDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Habit, HabitPersistenceError> {
        self.check_available()?;
        let mut rows = lock(&self.rows, "habits");
        let owned = rows.iter().filter(|habit| habit.user_id() == user_id).count();
        let next = i32::try_from(owned + 1)
            .map_err(|err| HabitPersistenceError::query(err.to_string()))?;
        let id = HabitId::new(next).map_err(|err| HabitPersistenceError::query(err.to_string()))?;
        let habit = Habit::new(id, user_id, draft.clone(), created_at);
        rows.push(habit.clone());
        Ok(habit)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Habit>, HabitPersistenceError> {
        self.check_available()?;
        let mut owned: Vec<Habit> = lock(&self.rows, "habits")
            .iter()
            .filter(|habit| habit.user_id() == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(Habit::id);
        Ok(owned)
    }

    async fn find(
        &self,
        user_id: UserId,
        habit_id: HabitId,
    ) -> Result<Option<Habit>, HabitPersistenceError> {
        self.check_available()?;
        Ok(lock(&self.rows, "habits")
            .iter()
            .find(|habit| habit.user_id() == user_id && habit.id() == habit_id)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryCompletionRepository {
    rows: Mutex<Vec<CompletionRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryCompletionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Every record appended so far, in insertion order.
    pub fn records(&self) -> Vec<CompletionRecord> {
        lock(&self.rows, "completions").clone()
    }

    fn check_available(&self) -> Result<(), CompletionPersistenceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CompletionPersistenceError::connection(UNAVAILABLE));
        }
        Ok(())
    }
}

#[async_trait]
impl CompletionRepository for InMemoryCompletionRepository {
    async fn append(
        &self,
        completion: &NewCompletion,
    ) -> Result<CompletionRecord, CompletionPersistenceError> {
        self.check_available()?;
        let mut rows = lock(&self.rows, "completions");
        let next = i64::try_from(rows.len() + 1)
            .map_err(|err| CompletionPersistenceError::query(err.to_string()))?;
        let record = CompletionRecord::from_new(CompletionId::new(next), completion.clone());
        rows.push(record.clone());
        Ok(record)
    }

    async fn list_for_habit(
        &self,
        user_id: UserId,
        habit_id: HabitId,
    ) -> Result<Vec<CompletionRecord>, CompletionPersistenceError> {
        self.check_available()?;
        Ok(lock(&self.rows, "completions")
            .iter()
            .filter(|record| record.user_id == user_id && record.habit_id == habit_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmailAddress;
    use rstest::rstest;

    fn record(username: &str, email: &str) -> NewUserRecord {
        NewUserRecord {
            username: Username::new(username).expect("valid username"),
            email: EmailAddress::new(email).expect("valid email"),
            password_hash: PasswordHash::new("hash"),
        }
    }

    fn user(id: i64) -> UserId {
        UserId::new(id).expect("valid user id")
    }

    #[rstest]
    #[tokio::test]
    async fn users_reject_duplicate_username_then_email() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&record("alice", "alice@example.com"))
            .await
            .expect("first insert");

        let same_name = repo
            .insert(&record("alice", "other@example.com"))
            .await
            .expect_err("duplicate username");
        assert_eq!(same_name, UserPersistenceError::duplicate("username"));

        let same_email = repo
            .insert(&record("bob", "alice@example.com"))
            .await
            .expect_err("duplicate email");
        assert_eq!(same_email, UserPersistenceError::duplicate("email"));
    }

    #[rstest]
    #[tokio::test]
    async fn habit_ids_are_numbered_per_owner() {
        let repo = InMemoryHabitRepository::new();
        let draft = HabitDraft::try_from_parts("Exercise", None).expect("valid draft");
        let now = Utc::now();

        let first = repo.create(user(1), &draft, now).await.expect("create");
        let other = repo.create(user(2), &draft, now).await.expect("create");
        let second = repo.create(user(1), &draft, now).await.expect("create");

        assert_eq!(first.id().get(), 1);
        assert_eq!(other.id().get(), 1);
        assert_eq!(second.id().get(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn ledger_filters_by_owner_and_habit() {
        let repo = InMemoryCompletionRepository::new();
        let habit = HabitId::first();
        let now = Utc::now();
        repo.append(&NewCompletion::completed(user(1), habit, now))
            .await
            .expect("append");
        repo.append(&NewCompletion::completed(user(2), habit, now))
            .await
            .expect("append");

        let mine = repo.list_for_habit(user(1), habit).await.expect("list");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine.first().map(|r| r.user_id), Some(user(1)));
    }

    #[rstest]
    #[tokio::test]
    async fn unavailable_store_reports_connection_failure() {
        let repo = InMemoryHabitRepository::new();
        repo.set_unavailable(true);
        let err = repo.list_for_user(user(1)).await.expect_err("unavailable");
        assert!(matches!(err, HabitPersistenceError::Connection { .. }));
    }
}
