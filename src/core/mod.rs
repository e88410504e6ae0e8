pub mod profile;
pub mod store;

pub use crate::domain::model::{
    FetchOutcome, MutationRecord, ProfilePayload, ProfileState, RawResponse, RootState,
};
pub use crate::domain::ports::{CommitPolicy, ConfigProvider, ProfileSource, StoreModule};
pub use crate::utils::error::Result;
