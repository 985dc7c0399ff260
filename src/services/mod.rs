// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod aggregator;
pub mod coros;
pub mod data_store;
pub mod metrics;

pub use coros::{parse_token_file, CorosAuth, CorosClient};
pub use data_store::{DataSource, TrainingDataStore, TrainingSnapshot};
