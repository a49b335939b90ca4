//! Startup investigation pipeline
//!
//! A fixed sequence of model and search calls that turns a startup goal into
//! market gaps, a brand name, a tagline, a pricing table and an investor email.
//!
//! ## Steps
//!
//! 1. **Plan** - two web search queries for the goal
//! 2. **Search A** / 3. **Search B** - one search per query
//! 4. **Analysis** - "Market Gaps" summary over the transcript so far
//! 5. **Ideation** - five candidate names
//! 6. **Selection** - the best name
//! 7. **Tagline** - one slogan
//! 8. **Pricing** - pricing table as CSV
//! 9. **Email** - investor cold email
//! 10. **Finalize** - assemble the response

pub mod orchestrator;
pub mod output;
pub mod parsing;
pub mod prompts;
pub mod steps;
pub mod transcript;

pub use orchestrator::{StartupPipeline, SEARCH_MAX_RESULTS};
pub use output::{InvestigationOutput, PartialFailure, PartialOutput, FALLBACK_ERROR};
pub use parsing::{first_line_or_bullet, parse_two_queries, strip_code_fences};
pub use steps::{ProgressCategory, ProgressEvent, Step, PROGRESS_EVENT};
pub use transcript::Transcript;
