use std::sync::Arc;

use crate::models::user::normalize_email;
use crate::models::User;
use crate::repositories::store::{Collection, FleetStore};
use crate::utils::errors::AppResult;

const RESOURCE: &str = "User";

fn email_conflict(existing: &User, candidate: &User) -> Option<(&'static str, String)> {
    (normalize_email(&existing.email) == normalize_email(&candidate.email))
        .then(|| ("email", candidate.email.clone()))
}

pub struct UserRepository {
    users: Arc<Collection<User>>,
}

impl UserRepository {
    pub fn new(store: &FleetStore) -> Self {
        Self {
            users: store.users.clone(),
        }
    }

    pub async fn create(&self, user: User) -> AppResult<User> {
        self.users.insert_unique(RESOURCE, user, email_conflict).await
    }

    pub async fn find_by_id(&self, id: &str) -> Option<User> {
        self.users.find(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let email = normalize_email(email);
        self.users.find_by(|u| normalize_email(&u.email) == email).await
    }

    pub async fn list(&self) -> Vec<User> {
        self.users.list().await
    }

    pub async fn update<F>(&self, id: &str, apply: F) -> AppResult<User>
    where
        F: FnOnce(&mut User),
    {
        self.users.update_unique(RESOURCE, id, apply, email_conflict).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<User> {
        self.users.remove(RESOURCE, id).await
    }
}
