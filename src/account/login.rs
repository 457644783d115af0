//! Patient login form.

use super::{FormError, require};

/// Login form state.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub show_password: bool,
    pub remember_me: bool,
}

impl LoginForm {
    /// Check presence of both fields and return the trimmed username and
    /// the password as typed.
    pub fn validate(&self) -> Result<(String, String), FormError> {
        require(&self.username, "Username")?;
        require(&self.password, "Password")?;
        Ok((self.username.trim().to_string(), self.password.clone()))
    }

    /// Forget the password after an attempt, keeping the username.
    pub fn clear_password(&mut self) {
        self.password.clear();
        self.show_password = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_both_fields() {
        let mut form = LoginForm::default();
        assert_eq!(form.validate(), Err(FormError::MissingField("Username")));

        form.username = "demo".to_string();
        assert_eq!(form.validate(), Err(FormError::MissingField("Password")));

        form.password = "password".to_string();
        assert_eq!(form.validate().unwrap(), ("demo".to_string(), "password".to_string()));
    }

    #[test]
    fn test_username_is_trimmed() {
        let form = LoginForm {
            username: "  demo ".to_string(),
            password: " pw ".to_string(),
            ..Default::default()
        };
        let (user, pass) = form.validate().unwrap();
        assert_eq!(user, "demo");
        assert_eq!(pass, " pw ");
    }

    #[test]
    fn test_clear_password_keeps_username() {
        let mut form = LoginForm {
            username: "demo".to_string(),
            password: "secret".to_string(),
            show_password: true,
            remember_me: true,
        };
        form.clear_password();
        assert_eq!(form.username, "demo");
        assert!(form.password.is_empty());
        assert!(!form.show_password);
        assert!(form.remember_me);
    }
}
