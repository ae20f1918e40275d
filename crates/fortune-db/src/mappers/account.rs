//! Account model -> entity mapper

use fortune_core::entities::Account;
use fortune_core::value_objects::AccountId;

use crate::models::AccountModel;

/// Convert AccountModel to Account entity
impl From<AccountModel> for Account {
    fn from(model: AccountModel) -> Self {
        Account {
            id: AccountId::new(model.id),
            username: model.username,
            password_verifier: model.password_hash,
            created_at: model.created_at,
        }
    }
}
