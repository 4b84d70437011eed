// ── Entity actions ──
//
// Mutating operations on a single shop or a selection of subscriptions,
// each gated by a confirmation dialog. A failed call leaves local state
// untouched and the dialog open.

pub mod bulk;
pub mod dialog;
pub mod shop_detail;

pub use bulk::{BulkAction, BulkFailure, BulkOutcome, SubscriptionBulkController, SubscriptionSelection};
pub use dialog::ConfirmDialog;
pub use shop_detail::{Navigation, ShopAction, ShopDetailController};
