mod client;
mod errors;
mod pagination;
mod query;
mod records;
mod request;
mod resource;
mod transport;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::pagination::{fold_page, PageEnvelope, PageInfo};
pub use self::query::{ListQuery, OrderDirection, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use self::records::{
    parse_fields_json, CompanyFields, NoteFields, OpportunityFields, OpportunityStage,
    PersonFields, TaskFields, TaskStatus,
};
pub use self::request::{Method, RequestDescriptor};
pub use self::resource::Resource;
pub use self::transport::{HttpSender, Sender};
