//! Request and response shapes exchanged with the fetch capability.

mod request;
mod response;

pub use request::FetchRequest;
pub use response::{ByteStream, FetchResponse, ResponseParts};
