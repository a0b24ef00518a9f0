pub mod v1;

pub mod prelude {
    pub use crate::v1::aws::{
        dynamodb::{expression::*, table::*},
        s3::object::*,
        *,
    };
    pub use crate::v1::book::*;
    pub use crate::v1::config::*;
    pub use crate::v1::handler::{
        delete::{DeleteOutcome, ImageCleanup},
        error::RequestError,
        request::{ApiRequest, Operation},
        response::{ApiResponse, BookResponse},
        Handler,
    };
    pub use crate::v1::storage::memory::{MemoryBlobStore, MemoryRecordStore};
    pub use crate::v1::store::*;
}
