use cineos_common::{Catalog, Entity, Oid, Result};

use super::Reservation;
use crate::schema::FROM_CLIENT_TO_RESERVATION;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Entity for Client {
    const KIND: &'static str = "Client";
}

impl Client {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

pub trait ClientExt {
    fn reservations(self, catalog: &Catalog) -> Result<Vec<Oid<Reservation>>>;
}

impl ClientExt for Oid<Client> {
    fn reservations(self, catalog: &Catalog) -> Result<Vec<Oid<Reservation>>> {
        catalog.linked(FROM_CLIENT_TO_RESERVATION, self)
    }
}
