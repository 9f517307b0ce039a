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


//! The data model of a deployment: the function definition, its deployment
//! package and the results produced by the remote platform.

mod code;
pub use code::FunctionCode;

mod definition;
pub use definition::{
    parse_environment_variables, split_list, AliasResult, FunctionDefinition, PublishedVersion,
    VpcConfig,
};
