//! Consumer side of the report API: explicit request context, a typed HTTP
//! client, and the session state a report form keeps between actions.

pub mod context;
pub mod http;
pub mod session;

pub use context::{RequestContext, RequestSequence, RequestTicket};
pub use http::{ClientError, ReportClient};
pub use session::{Notice, ReportSession};
