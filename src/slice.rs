//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

//! ONNX-style strided slice extraction.
//!
//! `slice()` selects a `(start, end, step)` sub-range along each referenced
//! axis of a dense tensor and materializes the result as a new tensor.
//! Unreferenced axes are copied in full. The computation is pure: all inputs
//! are borrowed immutably and the output is the only allocation made.

use crate::tensor::{Tensor, TensorNewError};
use crate::{ErrExtra, ErrPack};

mod axes;
mod extract;
mod plan;
mod validate;

pub use plan::AxisSpec;

//--------------------------------------------------------------------------------------------------

/// All slice failures are caller-side bugs in constructing the parameters,
/// so a single code is enough; the `ErrPack` message names the offending
/// field and entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SliceOpError {
	InvalidArgument,
}

impl SliceOpError {
	#[cold]
	#[inline(never)]
	pub(crate) fn invalid_argument(message: String) -> ErrPack<Self> {
		ErrPack {
			code: Self::InvalidArgument,
			extra: Some(Box::new(ErrExtra { message: message.into(), nested: None })),
		}
	}
}

impl From<TensorNewError> for ErrPack<SliceOpError> {
	#[cold]
	#[inline(never)]
	fn from(err: TensorNewError) -> Self {
		Self {
			code: SliceOpError::InvalidArgument,
			extra: Some(Box::new(ErrExtra {
				message: "Could not allocate the output tensor".into(),
				nested: Some(Box::new(err)),
			})),
		}
	}
}

//--------------------------------------------------------------------------------------------------

/// Extracts a strided slice of `src`.
///
/// `start` and `end` are rank-1 tensors of equal length `num_axes <= src.ndim()`.
/// Entry `i` selects the half-open range `start(i) .. end(i)` with stride
/// `steps(i)` along the source axis named by `axes(i)`. Negative axis values
/// count from the last axis. Empty spans are rejected: `end(i)` must be
/// greater than `start(i)` and at most the extent of the targeted axis.
///
/// When `axes` is `None` it defaults to `{1, 2, .., num_axes}`. The list is
/// one-based for historical compatibility, so with all other indexing in this
/// crate being zero-based, the defaults reference axes starting at the
/// *second* source axis. A defaulted entry that falls off the end of the
/// shape selects nothing. Callers that want entry `i` to slice axis `i` must
/// pass `axes` explicitly.
///
/// When `steps` is `None` every step defaults to 1. Steps must be at least 1;
/// reverse iteration is not supported.
pub fn slice<T: Copy>(
	src: &Tensor<T>,
	start: &Tensor<i64>,
	end: &Tensor<i64>,
	axes: Option<&Tensor<i64>>,
	steps: Option<&Tensor<i64>>,
) -> Result<Tensor<T>, ErrPack<SliceOpError>> {
	validate::check_args(src, start, end, axes, steps)?;

	let num_axes = start.elems();
	let resolved = axes::normalize(
		src.ndim(),
		num_axes,
		axes.map(Tensor::as_slice),
		steps.map(Tensor::as_slice),
	)?;

	validate::check_bounds(src, start.as_slice(), end.as_slice(), &resolved)?;

	let plan = plan::plan(src.dims(), start.as_slice(), end.as_slice(), &resolved);
	log::debug!("slice: planned output shape {:?}", plan.out_shape);

	extract::extract(src, &plan)
}

//--------------------------------------------------------------------------------------------------
