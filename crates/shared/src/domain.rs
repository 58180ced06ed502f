use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::ParseError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(WorkOrderId);
id_newtype!(TechnicianId);

/// Lifecycle state of a work order.
///
/// Decoding is total: anything the server sends that is not one of the known
/// wire values becomes [`WorkOrderStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkOrderStatus {
    New,
    InProgress,
    WaitingOnCustomer,
    Fixed,
    Closed,
    Cancelled,
    #[default]
    Unknown,
}

impl WorkOrderStatus {
    /// Statuses a technician can pick in the detail form.
    pub const ALL: [WorkOrderStatus; 6] = [
        WorkOrderStatus::New,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::WaitingOnCustomer,
        WorkOrderStatus::Fixed,
        WorkOrderStatus::Closed,
        WorkOrderStatus::Cancelled,
    ];

    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "new" => Self::New,
            "in_progress" => Self::InProgress,
            // older server builds spell this one without separators
            "waiting_on_customer" | "waittingoncustomer" => Self::WaitingOnCustomer,
            "fixed" => Self::Fixed,
            "closed" => Self::Closed,
            "cancelled" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }

    pub fn as_wire(self) -> Option<&'static str> {
        match self {
            Self::New => Some("new"),
            Self::InProgress => Some("in_progress"),
            Self::WaitingOnCustomer => Some("waiting_on_customer"),
            Self::Fixed => Some("fixed"),
            Self::Closed => Some("closed"),
            Self::Cancelled => Some("cancelled"),
            Self::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl FromStr for WorkOrderStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_wire(s) {
            Self::Unknown => Err(ParseError::UnknownStatus(s.to_string())),
            status => Ok(status),
        }
    }
}

impl Serialize for WorkOrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_wire() {
            Some(wire) => serializer.serialize_str(wire),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for WorkOrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .map(Self::from_wire)
            .unwrap_or(Self::Unknown))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

impl Priority {
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            "High" => Self::High,
            _ => Self::Unknown,
        }
    }

    pub fn as_wire(self) -> Option<&'static str> {
        match self {
            Self::Low => Some("Low"),
            Self::Medium => Some("Medium"),
            Self::High => Some("High"),
            Self::Unknown => None,
        }
    }

    /// Badge text; unrecognized priorities show as "None".
    pub fn label(self) -> &'static str {
        self.as_wire().unwrap_or("None")
    }
}

impl FromStr for Priority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_wire(s) {
            Self::Unknown => Err(ParseError::UnknownPriority(s.to_string())),
            priority => Ok(priority),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_wire() {
            Some(wire) => serializer.serialize_str(wire),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .map(Self::from_wire)
            .unwrap_or(Self::Unknown))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: String,
    #[serde(
        rename = "reg_no",
        alias = "registrationNumber",
        default,
        deserialize_with = "lenient_text"
    )]
    pub registration_number: String,
}

/// A service request as the server returns it from `/service_request/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: WorkOrderId,
    #[serde(
        rename = "servicereq_no",
        alias = "serviceRequestNumber",
        default,
        deserialize_with = "lenient_text"
    )]
    pub service_request_number: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub details: String,
    #[serde(default)]
    pub status: WorkOrderStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(alias = "createdAt", default, deserialize_with = "lenient_text")]
    pub created_at: String,
    #[serde(
        rename = "files",
        alias = "fileUrl",
        default,
        deserialize_with = "lenient_optional_text"
    )]
    pub file_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_customer")]
    pub customer: Customer,
}

impl WorkOrder {
    pub fn has_attachment(&self) -> bool {
        self.file_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Invoices can only be raised against closed work orders.
    pub fn can_create_invoice(&self) -> bool {
        self.status == WorkOrderStatus::Closed
    }

    pub fn created_at_parsed(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.created_at.trim()).ok()
    }

    /// Creation time for display; falls back to the raw server value.
    pub fn created_at_display(&self) -> String {
        match self.created_at_parsed() {
            Some(parsed) => parsed.format("%Y-%m-%d %H:%M").to_string(),
            None => self.created_at.clone(),
        }
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

fn lenient_customer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Customer, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if value.is_object() {
        serde_json::from_value(value).map_err(serde::de::Error::custom)
    } else {
        Ok(Customer::default())
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
