use std::fmt::Debug;

use serde::Deserialize;
use mongodb::bson::{doc, from_document, Bson, Document};

use crate::utils::errors::AppError;

/// The two categories of records a signed-in user owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Pets,
    Owners
}

impl RecordKind {
    pub fn collection_name(&self) -> &'static str {
        match self {
            RecordKind::Pets => "pets",
            RecordKind::Owners => "owners",
        }
    }
}

/// A record as the store hands it over: store-assigned id plus loosely typed fields.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredRecord {
    pub id: String,
    pub fields: Document,
}

impl StoredRecord {
    pub fn new(id: impl Into<String>, fields: Document) -> Self {
        StoredRecord { id: id.into(), fields }
    }
}

/// A typed, immutable record decoded from a [`StoredRecord`].
pub trait Record: Clone + Debug + Send + Sync + 'static {
    const KIND: RecordKind;

    /// Applies the default policy: absent fields become empty strings or zero,
    /// mistyped fields are an error.
    fn from_stored(stored: StoredRecord) -> Result<Self, AppError>;

    /// Fields for `RecordStore::create_record`; the id is never included.
    fn to_fields(&self) -> Document;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub pet_type: String,
    pub breed: String,
    pub age: u32,
}

#[derive(Deserialize, Default)]
struct PetFields {
    name: Option<String>,
    #[serde(rename = "type")]
    pet_type: Option<String>,
    breed: Option<String>,
    age: Option<Bson>,
}

/// Whole, non-negative numbers of any BSON numeric type.
fn age_from_bson(value: &Bson) -> Option<u32> {
    match value {
        Bson::Int32(age) => u32::try_from(*age).ok(),
        Bson::Int64(age) => u32::try_from(*age).ok(),
        Bson::Double(age) if age.fract() == 0.0 && *age >= 0.0 && *age <= f64::from(u32::MAX) => Some(*age as u32),
        _ => None,
    }
}

impl Pet {
    pub fn new(name: &str, pet_type: &str, breed: &str, age: u32) -> Self {
        Pet {
            id: String::new(),
            name: name.to_string(),
            pet_type: pet_type.to_string(),
            breed: breed.to_string(),
            age,
        }
    }
}

impl Record for Pet {
    const KIND: RecordKind = RecordKind::Pets;

    fn from_stored(stored: StoredRecord) -> Result<Self, AppError> {
        let fields: PetFields = from_document(stored.fields)?;

        let age = match fields.age {
            Some(age) => age_from_bson(&age)
                .ok_or_else(|| AppError::InvalidData(format!("pet {} has invalid age {}", stored.id, age)))?,
            None => 0,
        };

        Ok(Pet {
            id: stored.id,
            name: fields.name.unwrap_or_default(),
            pet_type: fields.pet_type.unwrap_or_default(),
            breed: fields.breed.unwrap_or_default(),
            age,
        })
    }

    fn to_fields(&self) -> Document {
        doc! {
            "name": &self.name,
            "type": &self.pet_type,
            "breed": &self.breed,
            "age": i64::from(self.age),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnerContact {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[derive(Deserialize, Default)]
struct OwnerContactFields {
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
}

impl OwnerContact {
    pub fn new(name: &str, phone: &str, email: &str, address: &str) -> Self {
        OwnerContact {
            id: String::new(),
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            address: address.to_string(),
        }
    }
}

impl Record for OwnerContact {
    const KIND: RecordKind = RecordKind::Owners;

    fn from_stored(stored: StoredRecord) -> Result<Self, AppError> {
        let fields: OwnerContactFields = from_document(stored.fields)?;

        Ok(OwnerContact {
            id: stored.id,
            name: fields.name.unwrap_or_default(),
            phone: fields.phone.unwrap_or_default(),
            email: fields.email.unwrap_or_default(),
            address: fields.address.unwrap_or_default(),
        })
    }

    fn to_fields(&self) -> Document {
        doc! {
            "name": &self.name,
            "phone": &self.phone,
            "email": &self.email,
            "address": &self.address,
        }
    }
}
