mod context;
mod movie;
mod plan;

pub use context::{ConversationContext, Intent, Message, Role, SlotUpdates};
pub use movie::{AvailabilityOption, Movie, OptionKind};
pub use plan::{AdsPreference, Plan, RawProfile, ViewerProfile};
