//! Enumerated reference values
//!
//! Branches, services, task statuses and the other closed sets the firm works
//! with. Every value serializes to its display label and parses back from it,
//! so anything arriving from outside the process is checked at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A label that does not belong to the enumeration it was parsed as.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

macro_rules! catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in canonical order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(UnknownVariant::new($kind, other)),
                }
            }
        }
    };
}

catalog_enum! {
    /// Physical office a client is assigned to
    Branch as "branch" {
        Ravulapalem => "Ravulapalem",
        Atreyapuram => "Atreyapuram",
        Amalapuram => "Amalapuram",
        Versatile => "Versatile",
    }
}

impl Default for Branch {
    fn default() -> Self {
        Self::Ravulapalem
    }
}

catalog_enum! {
    /// Compliance service category
    ServiceType as "service" {
        Gst => "GST",
        IncomeTax => "Income Tax",
        Tds => "TDS",
        TaxAudit => "Tax Audit",
        Roc => "ROC/Company",
        LabourLaws => "Labour Laws",
    }
}

catalog_enum! {
    /// Workflow status of a task.
    ///
    /// New → In Progress → (Pending Client | Review) → Filed → Completed.
    /// Pending Client and Review are parallel branches, not successive stages.
    TaskStatus as "status" {
        New => "New",
        InProgress => "In Progress",
        PendingClient => "Pending Client",
        Review => "Review",
        Filed => "Filed",
        Completed => "Completed",
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::New
    }
}

catalog_enum! {
    Priority as "priority" {
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

catalog_enum! {
    /// Legal form of a client business
    EntityType as "entity type" {
        Proprietorship => "Proprietorship",
        PartnershipFirm => "Partnership Firm",
        PrivateLimited => "Private Limited Company",
        Llp => "LLP",
        IndividualHuf => "Individual / HUF",
        TrustSociety => "Trust / Society",
    }
}

impl Default for EntityType {
    fn default() -> Self {
        Self::Proprietorship
    }
}

catalog_enum! {
    /// Preferred channel for client reminders
    CommChannel as "communication channel" {
        Email => "Email",
        WhatsApp => "WhatsApp",
        Sms => "SMS",
    }
}

impl Default for CommChannel {
    fn default() -> Self {
        Self::WhatsApp
    }
}

catalog_enum! {
    Language as "language" {
        English => "English",
        Telugu => "Telugu",
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::English
    }
}

catalog_enum! {
    ClientStatus as "client status" {
        Active => "Active",
        Inactive => "Inactive",
    }
}

impl Default for ClientStatus {
    fn default() -> Self {
        Self::Active
    }
}

catalog_enum! {
    /// Severity of an in-app notification
    NotificationKind as "notification kind" {
        Info => "info",
        Warning => "warning",
        Error => "error",
        Success => "success",
    }
}

/// Parse an optional label, treating `None` and the "All" sentinel used by
/// list filters as "no constraint".
pub fn parse_filter<T>(raw: Option<&str>) -> Result<Option<T>, UnknownVariant>
where
    T: FromStr<Err = UnknownVariant>,
{
    match raw.map(str::trim) {
        None | Some("") | Some("All") => Ok(None),
        Some(label) => label.parse().map(Some),
    }
}
