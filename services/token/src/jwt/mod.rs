pub mod builder;
pub mod claims;
pub mod issuer;
pub mod serializer;

pub use builder::JwtBuilder;
pub use claims::Claims;
pub use issuer::{IssuePolicy, IssuedToken, TokenIssuer};
pub use serializer::JwtSerializer;
