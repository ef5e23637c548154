//! Campaign and order status enums as observed by the remote store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a mail campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Designing,
    PendingHygiene,
    Ready,
    Processing,
    Printed,
    Shipped,
    Completed,
    Cancelled,
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 9] = [
        CampaignStatus::Draft,
        CampaignStatus::Designing,
        CampaignStatus::PendingHygiene,
        CampaignStatus::Ready,
        CampaignStatus::Processing,
        CampaignStatus::Printed,
        CampaignStatus::Shipped,
        CampaignStatus::Completed,
        CampaignStatus::Cancelled,
    ];

    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Designing => "designing",
            CampaignStatus::PendingHygiene => "pending_hygiene",
            CampaignStatus::Ready => "ready",
            CampaignStatus::Processing => "processing",
            CampaignStatus::Printed => "printed",
            CampaignStatus::Shipped => "shipped",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Cancelled => "cancelled",
        }
    }

    /// Label shown on status badges.
    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "Draft",
            CampaignStatus::Designing => "Designing",
            CampaignStatus::PendingHygiene => "Validating",
            CampaignStatus::Ready => "Ready",
            CampaignStatus::Processing => "Processing",
            CampaignStatus::Printed => "Printed",
            CampaignStatus::Shipped => "Shipped",
            CampaignStatus::Completed => "Completed",
            CampaignStatus::Cancelled => "Cancelled",
        }
    }

    /// Parse from the wire name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.as_str() == s)
    }

    /// True while the design can still be edited.
    pub fn is_editable(&self) -> bool {
        matches!(self, CampaignStatus::Draft | CampaignStatus::Designing)
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a print order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Composing,
    Printing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Composing,
        OrderStatus::Printing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Composing => "composing",
            OrderStatus::Printing => "printing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Composing => "Composing",
            OrderStatus::Printing => "Printing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Refunded => "Refunded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.as_str() == s)
    }

    /// Terminal states never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Refunded
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_status_wire_names() {
        for status in CampaignStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(CampaignStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CampaignStatus::PendingHygiene.label(), "Validating");
        assert_eq!(CampaignStatus::parse("archived"), None);
    }

    #[test]
    fn test_order_status_terminal() {
        assert!(OrderStatus::Refunded.is_terminal());
        assert!(!OrderStatus::Printing.is_terminal());
        assert_eq!(OrderStatus::parse("delivered"), Some(OrderStatus::Delivered));
    }
}
