// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod chat;
pub mod forms;
pub mod ids;
pub mod model;
pub mod query;
pub mod record;
pub mod state;
pub mod summary;
pub mod validation;

pub use chat::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use query::*;
pub use record::*;
pub use state::*;
pub use summary::*;
pub use validation::{ValidationError, ValidationResult};
