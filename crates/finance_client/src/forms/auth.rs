use api_types::auth::RegisterRequest;
use chrono::NaiveDate;

use super::FormError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.email.trim().is_empty() {
            return Err(FormError::Required("email"));
        }
        if self.password.is_empty() {
            return Err(FormError::Required("mật khẩu"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    /// `YYYY-MM-DD`.
    pub birth_date: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::Required("họ tên"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(FormError::Required("email"));
        }
        let birth_date = NaiveDate::parse_from_str(self.birth_date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate)?;
        if self.password.is_empty() {
            return Err(FormError::Required("mật khẩu"));
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(RegisterRequest {
            email: email.to_string(),
            password: self.password.clone(),
            name: name.to_string(),
            birth_date: birth_date.format("%Y-%m-%d").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegisterForm {
        RegisterForm {
            name: "An".to_string(),
            email: "an@example.com".to_string(),
            birth_date: "1995-7-3".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
        }
    }

    #[test]
    fn register_normalizes_birth_date() {
        assert_eq!(form().validate().unwrap().birth_date, "1995-07-03");
    }

    #[test]
    fn register_rejects_mismatched_passwords() {
        let mut form = form();
        form.confirm_password = "other".to_string();
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Mật khẩu nhập lại không khớp");
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            email: "a@b.c".to_string(),
            password: String::new(),
        };
        assert_eq!(form.validate(), Err(FormError::Required("mật khẩu")));
    }
}
