pub mod bill;
pub mod model;
pub mod money;
pub mod numeric;
pub mod split;

pub use bill::{Bill, BillError, QUANTITY_CHOICES, TAX_PRESETS};
pub use model::{Item, ItemId, Person, PersonId};
pub use money::Money;
pub use numeric::{to_safe_number, PRICE_FALLBACK, QUANTITY_FALLBACK, TAX_PERCENT_FALLBACK};
pub use split::{PersonShare, SplitCalculator, SplitSummary};
