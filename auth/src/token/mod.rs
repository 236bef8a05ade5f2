pub mod claims;
pub mod codec;
pub mod errors;
pub mod key;

pub use claims::Claims;
pub use codec::TokenCodec;
pub use errors::DecodeError;
pub use errors::EncodeError;
pub use errors::KeyError;
pub use key::SigningKey;
