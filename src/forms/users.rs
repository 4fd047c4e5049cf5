//! Forms posted from the users admin table.

use serde::Deserialize;

use crate::domain::types::UserId;
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize)]
pub struct DeleteUserForm {
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Bulk delete: one `ids` entry per checked row.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteUsersForm {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub return_to: Option<String>,
}

impl DeleteUsersForm {
    /// Decodes a urlencoded body with repeated `ids` keys.
    pub fn from_bytes(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|err| {
            log::error!("Failed to parse delete users form: {err}");
            FormError::Malformed
        })
    }
}

pub struct DeleteUsersPayload {
    pub ids: Vec<UserId>,
}

impl TryFrom<&DeleteUsersForm> for DeleteUsersPayload {
    type Error = FormError;

    fn try_from(form: &DeleteUsersForm) -> Result<Self, Self::Error> {
        let mut ids = Vec::with_capacity(form.ids.len());
        for raw in form.ids.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
            let id = raw.parse::<UserId>().map_err(|_| FormError::InvalidUserId)?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        if ids.is_empty() {
            return Err(FormError::EmptySelection);
        }
        Ok(Self { ids })
    }
}
