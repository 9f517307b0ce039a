// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.


#![warn(missing_docs, clippy::needless_borrow)]
// Clippy lints, some should be disabled incrementally
#![allow(clippy::new_without_default, clippy::upper_case_acronyms)]

//! lambda-deploy creates, updates and versions an AWS Lambda function, and
//! keeps a named alias pointing at one of its versions.
//!
//! Two operations are provided:
//!
//! - **deploy** creates the function, or updates the code and configuration
//!   of its `$LATEST` working copy, then creates the alias bound to `$LATEST`
//!   if it does not exist yet.
//! - **publish** snapshots `$LATEST` into a new immutable version and points
//!   the alias at it, unless nothing changed since the last version.

pub mod aws;
pub mod client;
pub mod configs;
pub mod driver;
pub mod error;
pub mod function;
pub mod prelude;
pub mod probe;

#[cfg(test)]
pub(crate) mod tests;
