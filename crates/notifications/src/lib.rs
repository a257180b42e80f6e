//! `shopsphere-notifications` - the derived notification feed.
//!
//! Notifications are never persisted: the feed is recomputed from the
//! customer's order list on every read. Only the set of read identity
//! strings survives, which makes marking idempotent and keeps the feed
//! stable across reloads.

pub mod notification;
pub mod read_set;

pub use notification::{
    NotificationItem, NotificationKind, derive, order_label, status_message, unread_count,
};
pub use read_set::ReadSet;
