pub mod framing;
pub mod protocol;
pub mod registry;
pub mod schema;
pub mod transport;
pub mod types;

pub use framing::{encode_frame, FrameDecoder};
pub use protocol::{error_codes, Protocol};
pub use registry::{Actions, Capability, Registry, RegistryError};
pub use schema::{Field, FieldType, Schema};
pub use transport::{Transport, TransportError};
pub use types::{ErrorObject, Message, Payload, RequestPayload, ResponsePayload, ResponseStatus};
