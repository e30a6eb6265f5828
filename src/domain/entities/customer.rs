//! Customer entity and repository trait.
//!
//! Maps to the `customers` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Loyalty rank granting a percentage discount on orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    #[default]
    None,
    Bronze,
    Silver,
    Gold,
}

impl MembershipTier {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "bronze" => Self::Bronze,
            "silver" => Self::Silver,
            "gold" => Self::Gold,
            _ => Self::None,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
        }
    }

    /// Fraction of the subtotal discounted for members of this tier.
    pub fn discount_rate(&self) -> Decimal {
        match self {
            Self::None => Decimal::ZERO,
            Self::Bronze => Decimal::new(5, 2),
            Self::Silver => Decimal::new(10, 2),
            Self::Gold => Decimal::new(15, 2),
        }
    }
}

impl std::fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A café customer with membership and loyalty state.
///
/// Maps to the `customers` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(100) NOT NULL
/// - email: VARCHAR(255) NOT NULL UNIQUE
/// - membership_tier: VARCHAR(10) NOT NULL DEFAULT 'none'
/// - loyalty_points: BIGINT NOT NULL DEFAULT 0 CHECK (loyalty_points >= 0)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,

    pub name: String,

    pub email: String,

    pub membership_tier: MembershipTier,

    /// Redeemable balance, never negative
    pub loyalty_points: i64,

    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Create a customer with no membership and an empty points balance.
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            membership_tier: MembershipTier::None,
            loyalty_points: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_tier(mut self, tier: MembershipTier) -> Self {
        self.membership_tier = tier;
        self
    }

    pub fn with_loyalty_points(mut self, points: i64) -> Self {
        self.loyalty_points = points.max(0);
        self
    }
}

/// Repository trait for Customer data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find a customer by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError>;
}
