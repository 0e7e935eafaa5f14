//! Route rendering: view state, HTML views, Markdown, head metadata and the
//! error boundary.

pub mod boundary;
pub mod html;
pub mod markdown;
pub mod seo;
pub mod view;

pub use boundary::{ErrorContext, ErrorReporter, LogReporter};
pub use html::{Chrome, View, ViewContext};
pub use view::{ContentRequest, PageContent, RouteRenderer, ViewState};
