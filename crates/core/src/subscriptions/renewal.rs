//! Renewal planning: decides which subscriptions get a renewal order today.
//!
//! Planning is side-effect free so the same result backs both the renewal
//! preview page and the renewal creation task.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::{Subscription, SubscriptionFrequency, SubscriptionKind};

/// Renewal days are capped so every month has one.
pub const LAST_RENEWAL_DAY: i32 = 28;

const FORTNIGHT_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    NotRenewalDay,
    AlreadyRenewed,
}

/// A subscription that should get a renewal order now.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalCandidate {
    pub subscription_id: String,
    pub customer_id: Option<String>,
    pub product_id: Option<String>,
    pub quantity: i32,
    pub frequency: SubscriptionFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRenewal {
    pub subscription_id: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalPlan {
    pub due: Vec<RenewalCandidate>,
    pub skipped: Vec<SkippedRenewal>,
}

/// Days of the month a subscription renews on.
pub fn renewal_days(subscription: &Subscription) -> Vec<u32> {
    let day = subscription.renewal_day.clamp(1, LAST_RENEWAL_DAY);
    match subscription.frequency {
        SubscriptionFrequency::Monthly => vec![day as u32],
        SubscriptionFrequency::Fortnightly => {
            let second = (day - 1 + FORTNIGHT_DAYS as i32) % LAST_RENEWAL_DAY + 1;
            let mut days = vec![day as u32, second as u32];
            days.sort_unstable();
            days
        }
    }
}

/// Whether a renewal was already generated in the period containing `today`.
pub fn renewed_this_period(subscription: &Subscription, today: NaiveDate) -> bool {
    let Some(last) = subscription.last_renewal_at.map(|ts| ts.date()) else {
        return false;
    };
    if last > today {
        return true;
    }
    match subscription.frequency {
        SubscriptionFrequency::Monthly => {
            last.year() == today.year() && last.month() == today.month()
        }
        SubscriptionFrequency::Fortnightly => (today - last).num_days() < FORTNIGHT_DAYS,
    }
}

/// Plan renewals for `today`.
///
/// Only active, non-gift subscriptions are considered; gift subscriptions are
/// prepaid and shipped from their purchase order. With `ignore_renewal_day`
/// every eligible subscription not yet renewed this period is due.
pub fn plan_renewals(
    subscriptions: &[Subscription],
    today: NaiveDate,
    ignore_renewal_day: bool,
) -> RenewalPlan {
    let mut plan = RenewalPlan::default();

    for subscription in subscriptions
        .iter()
        .filter(|s| s.is_active() && s.kind != SubscriptionKind::Gift)
    {
        let reason = if renewed_this_period(subscription, today) {
            Some(SkipReason::AlreadyRenewed)
        } else if !ignore_renewal_day && !renewal_days(subscription).contains(&today.day()) {
            Some(SkipReason::NotRenewalDay)
        } else {
            None
        };

        match reason {
            Some(reason) => plan.skipped.push(SkippedRenewal {
                subscription_id: subscription.id.clone(),
                reason,
            }),
            None => plan.due.push(RenewalCandidate {
                subscription_id: subscription.id.clone(),
                customer_id: subscription.customer_id.clone(),
                product_id: subscription.product_id.clone(),
                quantity: subscription.quantity,
                frequency: subscription.frequency,
            }),
        }
    }

    plan
}
