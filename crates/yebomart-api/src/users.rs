// Staff user endpoints

use crate::client::{AdminClient, path_segment};
use crate::error::Error;
use crate::models::{ListParams, UserDetail, UserPage};

impl AdminClient {
    /// `GET /api/admin/users?page&limit&search&...`
    pub async fn list_users(&self, params: &ListParams) -> Result<Option<UserPage>, Error> {
        self.get(&format!("/api/admin/users{}", params.query_suffix()))
            .await
    }

    /// `GET /api/admin/users/:id?days=N`, activity over the last `days`.
    pub async fn get_user_detail(&self, id: &str, days: u32) -> Result<Option<UserDetail>, Error> {
        self.get(&format!("/api/admin/users/{}?days={days}", path_segment(id)))
            .await
    }
}
