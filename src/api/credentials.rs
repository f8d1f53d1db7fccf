use serde::Serialize;

/// The user's email and password, posted as-is to the login endpoint.
#[derive(Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_as_login_body() {
        let credentials = Credentials {
            email: "test22@gmail.com".to_string(),
            password: "password".to_string(),
        };
        let body = serde_json::to_value(&credentials).unwrap();
        assert_eq!(
            body,
            json!({ "email": "test22@gmail.com", "password": "password" })
        );
    }
}
