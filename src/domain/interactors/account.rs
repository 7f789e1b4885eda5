use uuid::Uuid;

use crate::data::models::User;
use crate::data::repo::AccountRepository;
use crate::domain::DomainError;

const MIN_PASSWORD_LEN: usize = 8;

/// Start a session for the given credentials.
pub struct SignInUser {
    account: AccountRepository,
}

impl SignInUser {
    pub fn new(account: AccountRepository) -> Self {
        Self { account }
    }

    pub async fn execute(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("Enter a valid email address"));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let display_name = email
            .split('@')
            .next()
            .unwrap_or(email)
            .to_string();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            display_name,
            anonymous: false,
        };
        self.account.sign_in(user.clone());
        Ok(user)
    }
}

/// End the current session.
pub struct SignOutUser {
    account: AccountRepository,
}

impl SignOutUser {
    pub fn new(account: AccountRepository) -> Self {
        Self { account }
    }

    pub async fn execute(&self) -> Result<(), DomainError> {
        self.account.sign_out();
        Ok(())
    }
}
