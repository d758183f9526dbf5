//! Creation form view mounted at `/create-user`.

use std::future::Future;

use crate::domain::{NewUser, UserRole, UserStore, UserValidationError, UsersState};

/// Raw form input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserForm {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Role label; must be `Admin`, `Editor` or `Viewer`.
    pub role: String,
}

impl CreateUserForm {
    /// Convert the form into a candidate user.
    ///
    /// # Errors
    /// Returns [`UserValidationError::UnknownRole`] when the role label is
    /// not one of the three known roles.
    pub fn into_candidate(self) -> Result<NewUser, UserValidationError> {
        let role = self.role.parse::<UserRole>()?;
        Ok(NewUser::new(self.name, self.email, role))
    }
}

/// Form that submits new users to the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateUserView;

impl CreateUserView {
    /// Submit `form`, appending the user optimistically.
    ///
    /// The user is in the store's list by the time this returns `Ok`; the
    /// returned future waits for the data layer to confirm or reject it.
    ///
    /// # Errors
    /// Returns [`UserValidationError`] when the form cannot be turned into a
    /// candidate; nothing is submitted in that case.
    pub fn submit(
        self,
        store: &UserStore,
        form: CreateUserForm,
    ) -> Result<impl Future<Output = ()> + Send + use<>, UserValidationError> {
        let candidate = form.into_candidate()?;
        Ok(store.add_user(candidate))
    }

    /// Text rendering of the form chrome for `state`.
    #[must_use]
    pub fn render(self, state: &UsersState) -> String {
        let roles = UserRole::ALL.map(UserRole::as_str).join(" | ");
        let mut lines = vec![
            "Create user".to_owned(),
            format!("name, email, role ({roles})"),
        ];
        if let Some(error) = state.error() {
            lines.push(format!("Error: {error}"));
        }
        lines.join("\n")
    }
}
