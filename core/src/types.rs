//! Wire enumerations and response envelopes shared across resources.
//!
//! Enumerations serialize to their exact upper-case literal; no case
//! transformation is applied in either direction.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Whether an activation request deploys or withdraws a version.
    #[derive(Default)]
    ActivationType {
        #[default]
        Activate => "ACTIVATE",
        Deactivate => "DEACTIVATE",
    }
}

wire_enum! {
    ActivationStatus {
        /// Currently serving traffic.
        Active => "ACTIVE",
        /// Superseded by a newer activation.
        Inactive => "INACTIVE",
        New => "NEW",
        Pending => "PENDING",
        /// A pending activation that was canceled.
        Aborted => "ABORTED",
        Failed => "FAILED",
        Zone1 => "ZONE_1",
        Zone2 => "ZONE_2",
        Zone3 => "ZONE_3",
        PendingDeactivation => "PENDING_DEACTIVATION",
        Deactivated => "DEACTIVATED",
        PendingCancellation => "PENDING_CANCELLATION",
    }
}

impl ActivationStatus {
    /// True once the status will no longer change on its own.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ActivationStatus::Active
                | ActivationStatus::Inactive
                | ActivationStatus::Aborted
                | ActivationStatus::Failed
                | ActivationStatus::Deactivated
        )
    }
}

wire_enum! {
    /// Deployment target.
    ActivationNetwork {
        Staging => "STAGING",
        Production => "PRODUCTION",
    }
}

wire_enum! {
    /// Per-network status of a property or include version.
    VersionStatus {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Pending => "PENDING",
        Deactivated => "DEACTIVATED",
    }
}

wire_enum! {
    IncludeType {
        Microservices => "MICROSERVICES",
        CommonSettings => "COMMON_SETTINGS",
    }
}

wire_enum! {
    /// How the certificate for a hostname is provisioned.
    CertType {
        CpsManaged => "CPS_MANAGED",
        Default => "DEFAULT",
    }
}

wire_enum! {
    HostnameCnameType {
        EdgeHostname => "EDGE_HOSTNAME",
    }
}

wire_enum! {
    /// Ordering of active property hostnames.
    SortOrder {
        Ascending => "hostname:a",
        Descending => "hostname:d",
    }
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// The `{"items": [...]}` wrapper used by most collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Items<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for Items<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

/// A paginated collection. Traversal via `next_link` is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub current_item_count: i64,
    #[serde(default)]
    pub total_items: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_link: Option<String>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_item_count: 0,
            total_items: 0,
            next_link: None,
            previous_link: None,
        }
    }
}
