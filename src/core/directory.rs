//! Account directory
//!
//! This module provides the `AccountDirectory` struct which holds every
//! registered account keyed by email.
//!
//! The AccountDirectory is responsible for:
//! - Loading the user file once when it is opened
//! - Validating and persisting new accounts at signup
//! - Checking credentials at login
//!
//! Unlike the catalog, the directory never re-reads its file after opening;
//! the in-memory map is the source of truth for the rest of the process.

use crate::io::FileStore;
use crate::types::{Role, SignupForm, StoreError, User};
use crate::validation::{
    validate_email, validate_field, validate_password, validate_phone_number, validate_user_id,
};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Registered accounts keyed by email
#[derive(Debug)]
pub struct AccountDirectory {
    /// Map of email to account
    users: HashMap<String, User>,
    store: FileStore<User>,
}

impl AccountDirectory {
    /// Open the directory, loading every account from the user file
    ///
    /// Malformed lines are skipped without notice beyond a debug log. A file
    /// that cannot be read is logged and treated as an empty directory. When
    /// an email appears twice, the later line wins.
    pub fn open(store: FileStore<User>) -> Self {
        let mut users = HashMap::new();

        match store.load_all() {
            Ok(loaded) => {
                for skipped in &loaded.skipped {
                    debug!(line = skipped.line, error = %skipped.error, "skipping user line");
                }
                for user in loaded.records {
                    users.insert(user.email.clone(), user);
                }
            }
            Err(e) => {
                warn!(path = %store.path().display(), error = %e, "failed to read users, starting empty");
            }
        }

        debug!(accounts = users.len(), "account directory loaded");
        AccountDirectory { users, store }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, email: &str) -> Option<&User> {
        self.users.get(email)
    }

    /// Register a new account
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// 1. User id format and distinct digits
    /// 2. Email format
    /// 3. Email not already registered
    /// 4. Password complexity
    /// 5. Phone number format
    /// 6. Role
    /// 7. No delimiter in the free-text fields
    ///
    /// The account is written to the user file before it is added to the
    /// map, so a failed write leaves the directory unchanged.
    ///
    /// # Errors
    ///
    /// Returns the validation error of the first failed check, or an I/O
    /// error if the user file cannot be written.
    pub fn signup(&mut self, form: SignupForm) -> Result<&User, StoreError> {
        validate_user_id(&form.user_id)?;
        validate_email(&form.email)?;
        if self.users.contains_key(&form.email) {
            return Err(StoreError::duplicate_email(&form.email));
        }
        validate_password(&form.password)?;
        validate_phone_number(&form.phone_number)?;
        let role: Role = form.role.parse()?;
        validate_field("first_name", &form.first_name)?;
        validate_field("last_name", &form.last_name)?;
        validate_field("address", &form.address)?;

        let user = User {
            user_id: form.user_id,
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            password: form.password,
            phone_number: form.phone_number,
            address: form.address,
            role,
        };

        self.store.append(&user)?;
        info!(email = %user.email, role = %user.role, "account created");

        let email = user.email.clone();
        Ok(self.users.entry(email).or_insert(user))
    }

    /// Check credentials and return the matching account
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The email is malformed (`InvalidEmail`)
    /// - The email or password is empty (`EmptyCredentials`)
    /// - No account has this email (`AccountNotFound`)
    /// - The password does not match exactly (`IncorrectPassword`)
    pub fn login(&self, email: &str, password: &str) -> Result<&User, StoreError> {
        validate_email(email)?;

        if email.is_empty() || password.is_empty() {
            return Err(StoreError::EmptyCredentials);
        }

        let user = self
            .users
            .get(email)
            .ok_or_else(|| StoreError::account_not_found(email))?;

        if user.password != password {
            info!(email, "login rejected: incorrect password");
            return Err(StoreError::IncorrectPassword);
        }

        info!(email, role = %user.role, "login succeeded");
        Ok(user)
    }
}
