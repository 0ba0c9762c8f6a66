pub mod client;
pub mod error;
pub mod types;

pub use client::{AgentClient, AgentInvoker};
pub use error::AgentError;
pub use types::{AgentResponse, InvokeAgentRequest};
