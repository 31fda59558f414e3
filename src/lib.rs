pub mod constants;
mod context;
mod cors;
mod errors;
mod filter;
mod headers;
mod options;
mod pattern;
mod policy;
mod preflight;
mod registry;
mod validator;

pub use context::RequestContext;
pub use cors::{Cors, Dispatch};
pub use errors::{CorsError, ErrorSink, Errors, PolicyError};
pub use filter::ResponseFilter;
pub use headers::{HeaderReader, HeaderWriter, Headers};
pub use options::{MethodOptions, ServiceOptions};
pub use pattern::{OriginPattern, PatternError};
pub use policy::PolicyDescriptor;
pub use preflight::{PreflightHandler, PreflightResult};
pub use registry::{FilterFn, PolicyRegistry, Route, ValidatorFn};
pub use validator::RequestValidator;
