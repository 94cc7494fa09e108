use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::DiarioResult;
use crate::domain::repositories::{Loaded, UserRepository};
use crate::domain::user::{Email, RepresentativeId, User};
use crate::infrastructure::spreadsheet::cells::RowReader;
use crate::infrastructure::spreadsheet::{load_rows, run_blocking, schema};

/// Credentials table stored in a spreadsheet
pub struct SpreadsheetUserRepository {
    path: PathBuf,
}

impl SpreadsheetUserRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl UserRepository for SpreadsheetUserRepository {
    async fn load_all(&self) -> DiarioResult<Loaded<User>> {
        let path = self.path.clone();
        run_blocking(move || load_rows(&path, &schema::USERS, parse_user)).await
    }
}

/// Rows without a login or password are skipped; a blank representative
/// falls back to the normalized login
fn parse_user(row: &mut RowReader<'_>) -> Option<User> {
    let Some(email) = row.text("email") else {
        row.warn("email", String::new(), "blank login, row skipped");
        return None;
    };
    if Email::new(&email).is_err() {
        row.warn("email", email.clone(), "login is not an email address");
    }
    let Some(password) = row.text("password") else {
        row.warn("password", String::new(), "blank password, row skipped");
        return None;
    };

    let representative_id = match row
        .text("representative_id")
        .and_then(|raw| RepresentativeId::new(raw).ok())
    {
        Some(id) => id,
        None => {
            row.warn(
                "representative_id",
                String::new(),
                "blank representative, using the login",
            );
            RepresentativeId::new(Email::normalize(&email)).ok()?
        }
    };

    Some(User::new(
        &email,
        &password,
        row.text("display_name"),
        representative_id,
    ))
}
