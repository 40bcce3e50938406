pub mod adapter;
pub mod endpoint;

pub use adapter::{
    ApiPayload, DetailDocument, DownloadDocument, DownloadStats, ListDocument, PopularDocument,
    PopularEntry, SourceError, StaticDataSource, StatsDocument, UserDocument, UserInfo,
};
pub use endpoint::Endpoint;
