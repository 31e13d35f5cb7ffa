//! User administration API trait

use async_trait::async_trait;

use crate::client::models::{ApiDocument, RoleUpdate};
use crate::error::Result;

/// User permissions and roles (`/api/v1/utilisateurs`)
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn permissions(&self, user_id: &str) -> Result<ApiDocument>;

    async fn update_role(&self, user_id: &str, update: &RoleUpdate) -> Result<ApiDocument>;
}

pub mod keys {
    use crate::cache::QueryKey;

    pub const SCOPE: &str = "utilisateurs";

    pub fn permissions(user_id: &str) -> QueryKey {
        QueryKey::new(SCOPE, "permissions").with(user_id)
    }
}
