use tracing::{info, instrument};

use rollcall_core::{AppError, hash_password_with_cost};
use rollcall_db::UserStore;
use rollcall_models::{NewUser, User, UserId, UserPayload};

use crate::metrics::{track_user_created, track_user_deleted};

const USER_NOT_FOUND: &str = "User not found";

pub struct UserService;

impl UserService {
    fn to_new_user(dto: UserPayload, cost: u32) -> Result<NewUser, AppError> {
        Ok(NewUser {
            password_hash: hash_password_with_cost(&dto.password, cost)?,
            name: dto.name,
            email: dto.email,
        })
    }

    #[instrument(skip(store))]
    pub async fn list_users(store: &dyn UserStore) -> Result<Vec<User>, AppError> {
        let users = store.find_all().await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    #[instrument(skip(store))]
    pub async fn get_user(store: &dyn UserStore, id: UserId) -> Result<User, AppError> {
        store
            .find_by_id(id)
            .await?
            .map(User::from)
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
    }

    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn create_user(
        store: &dyn UserStore,
        dto: UserPayload,
        cost: u32,
    ) -> Result<User, AppError> {
        let new_user = Self::to_new_user(dto, cost)?;
        let record = store.insert(new_user).await?;

        info!(user_id = %record.id, "User created");
        track_user_created();

        Ok(record.into())
    }

    /// Replaces every field of the user. The identifier never changes.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn update_user(
        store: &dyn UserStore,
        id: UserId,
        dto: UserPayload,
        cost: u32,
    ) -> Result<User, AppError> {
        let new_user = Self::to_new_user(dto, cost)?;
        let record = store
            .replace(id, new_user)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        info!(user_id = %record.id, "User updated");

        Ok(record.into())
    }

    #[instrument(skip(store))]
    pub async fn delete_user(store: &dyn UserStore, id: UserId) -> Result<(), AppError> {
        if !store.delete(id).await? {
            return Err(AppError::not_found(USER_NOT_FOUND));
        }

        info!(user_id = %id, "User deleted");
        track_user_deleted();

        Ok(())
    }
}
