pub mod current_identity;
pub mod validated_json;

pub use current_identity::{CurrentIdentity, MaybeIdentity};
pub use validated_json::ValidatedJson;
