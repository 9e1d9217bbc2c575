//! Customer domain types and the requests that create or look them up.

use serde::{Deserialize, Serialize};

use bookstore_core::{CustomerId, StateCode, UserId};

use crate::validation::{ValidationErrors, required_text};

/// A registered customer (domain type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Surrogate key assigned by the store.
    pub id: CustomerId,
    /// Natural key (an email address).
    pub user_id: UserId,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: StateCode,
    pub zipcode: String,
}

/// A validated customer that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub user_id: UserId,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: StateCode,
    pub zipcode: String,
}

impl NewCustomer {
    /// Attach the store-assigned id.
    #[must_use]
    pub fn with_id(self, id: CustomerId) -> Customer {
        Customer {
            id,
            user_id: self.user_id,
            name: self.name,
            phone: self.phone,
            address: self.address,
            address2: self.address2,
            city: self.city,
            state: self.state,
            zipcode: self.zipcode,
        }
    }
}

/// Body of `POST /customers`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
}

impl CreateCustomerRequest {
    /// Validate the request into a [`NewCustomer`].
    ///
    /// # Errors
    ///
    /// Returns every failed field check.
    pub fn validate(self) -> Result<NewCustomer, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let user_id = validate_user_id(&mut errors, self.user_id.as_deref());
        let name = required_text(&mut errors, "name", self.name);
        let phone = required_text(&mut errors, "phone", self.phone);
        let address = required_text(&mut errors, "address", self.address);
        // An empty second address line is the same as none at all.
        let address2 = self.address2.filter(|line| !line.trim().is_empty());
        let city = required_text(&mut errors, "city", self.city);
        let state = required_text(&mut errors, "state", self.state)
            .and_then(|s| s.parse::<StateCode>().map_err(|e| errors.push(e.to_string())).ok());
        let zipcode = required_text(&mut errors, "zipcode", self.zipcode);

        errors.finish(|| {
            Some(NewCustomer {
                user_id: user_id?,
                name: name?,
                phone: phone?,
                address: address?,
                address2,
                city: city?,
                state: state?,
                zipcode: zipcode?,
            })
        })
    }
}

/// Query string of `GET /customers?userId=...`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    pub user_id: Option<String>,
}

impl UserIdQuery {
    /// Validate the query into a [`UserId`].
    ///
    /// # Errors
    ///
    /// Returns a failure if the user id is missing or not email-shaped.
    pub fn validate(self) -> Result<UserId, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let user_id = validate_user_id(&mut errors, self.user_id.as_deref());
        errors.finish(|| user_id)
    }
}

fn validate_user_id(errors: &mut ValidationErrors, value: Option<&str>) -> Option<UserId> {
    match value.map(UserId::parse) {
        Some(Ok(user_id)) => Some(user_id),
        Some(Err(e)) => {
            errors.push(e.to_string());
            None
        }
        None => {
            errors.push("userId should not be empty");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn create_body() -> Value {
        json!({
            "userId": "a@b.com",
            "name": "N",
            "phone": "555",
            "address": "Addr",
            "city": "City",
            "state": "CA",
            "zipcode": "90000"
        })
    }

    fn parse(body: Value) -> CreateCustomerRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_create_valid() {
        let customer = parse(create_body()).validate().unwrap();
        assert_eq!(customer.user_id.as_str(), "a@b.com");
        assert_eq!(customer.state, StateCode::CA);
        assert_eq!(customer.address2, None);
    }

    #[test]
    fn test_create_with_address2() {
        let mut body = create_body();
        body["address2"] = json!("Suite 5");
        let customer = parse(body).validate().unwrap();
        assert_eq!(customer.address2.as_deref(), Some("Suite 5"));
    }

    #[test]
    fn test_create_blank_address2_is_none() {
        let mut body = create_body();
        body["address2"] = json!("");
        let customer = parse(body).validate().unwrap();
        assert_eq!(customer.address2, None);
    }

    #[test]
    fn test_create_invalid_email() {
        let mut body = create_body();
        body["userId"] = json!("not-an-email");
        let errors = parse(body).validate().unwrap_err();
        assert_eq!(errors.messages(), ["userId must be an email"]);
    }

    #[test]
    fn test_create_invalid_state() {
        for state in ["ca", "XX", "California", ""] {
            let mut body = create_body();
            body["state"] = json!(state);
            let errors = parse(body).validate().unwrap_err();
            assert!(errors.mentions("state"), "{state}");
        }
    }

    #[test]
    fn test_create_reports_every_missing_field() {
        let errors = parse(json!({})).validate().unwrap_err();
        for field in ["userId", "name", "phone", "address", "city", "state", "zipcode"] {
            assert!(errors.mentions(field), "missing {field}");
        }
        assert!(!errors.mentions("address2"));
    }

    #[test]
    fn test_user_id_query() {
        let query = UserIdQuery {
            user_id: Some("nouser@x.com".into()),
        };
        assert_eq!(query.validate().unwrap().as_str(), "nouser@x.com");

        assert!(UserIdQuery::default().validate().is_err());
        assert!(
            UserIdQuery {
                user_id: Some("bogus".into())
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_customer_serializes_camel_case() {
        let customer = parse(create_body())
            .validate()
            .unwrap()
            .with_id(CustomerId::new(1));
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["userId"], "a@b.com");
        assert_eq!(json["state"], "CA");
        assert_eq!(json["address2"], Value::Null);
    }
}
