// SPDX-License-Identifier: Apache-2.0

pub(crate) mod cats;
pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod missions;
pub(crate) mod request_tracing;
