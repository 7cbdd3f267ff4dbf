//! ModelKit - mental model and audit framework template library
//!
//! Providers are immutable, named templates that turn a task description
//! into an ordered checklist of step descriptors. Two families ship with
//! the crate:
//!
//! - [`mental`] - mental models for planning enhancement
//! - [`audit`] - professional audit methodologies
//!
//! Both families satisfy the same [`Provider`] contract and are served out
//! of a [`ProviderRegistry`]. Registries are built explicitly at startup
//! from the compiled-in `all()` lists; there is no runtime plugin scanning.
//!
//! # Example
//!
//! ```ignore
//! use modelkit::{ProviderRegistry, mental};
//!
//! let registry = ProviderRegistry::with_providers(mental::all());
//! let provider = registry.get("first_principles").unwrap();
//! let steps = provider.generate("migrate the billing service", &serde_json::json!({}))?;
//! ```

pub mod audit;
pub mod cli;
pub mod mental;
mod registry;
mod template;

pub use registry::ProviderRegistry;
pub use template::{Provider, StepBlueprint, StepDescriptor, Template};
