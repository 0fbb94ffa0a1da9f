// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod catalog;
pub mod collate;
pub mod ids;
pub mod model;
pub mod query;
pub mod session;
pub mod state;

pub use catalog::*;
pub use collate::*;
pub use ids::*;
pub use model::*;
pub use query::*;
pub use session::*;
pub use state::*;
