//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

//! Eager validation of the slice inputs. Nothing is extracted until every
//! check has passed, so a failure never leaves a partial result.

use crate::ErrPack;
use crate::tensor::Tensor;

use super::SliceOpError;
use super::axes::ResolvedAxes;

//--------------------------------------------------------------------------------------------------

fn ensure_rank_1(tensor: &Tensor<i64>, name: &str) -> Result<(), ErrPack<SliceOpError>> {
	if tensor.ndim() != 1 {
		return Err(SliceOpError::invalid_argument(format!(
			"{name} tensor is {}-dimensional (should be 1-dimensional)",
			tensor.ndim()
		)));
	}
	Ok(())
}

fn ensure_same_len(
	tensor: &Tensor<i64>,
	name: &str,
	num_axes: usize,
) -> Result<(), ErrPack<SliceOpError>> {
	if tensor.elems() != num_axes {
		return Err(SliceOpError::invalid_argument(format!(
			"start and {name} tensor sizes don't match (start size = {num_axes}, {name} size = {})",
			tensor.elems()
		)));
	}
	Ok(())
}

/// Shape and rank consistency of the source and the four raw input arrays.
pub(crate) fn check_args<T>(
	src: &Tensor<T>,
	start: &Tensor<i64>,
	end: &Tensor<i64>,
	axes: Option<&Tensor<i64>>,
	steps: Option<&Tensor<i64>>,
) -> Result<(), ErrPack<SliceOpError>> {
	if src.ndim() == 0 {
		return Err(SliceOpError::invalid_argument(
			"cannot slice a 0-dimensional tensor".to_string(),
		));
	}
	for (axis, dim) in src.dims().iter().enumerate() {
		if dim.size == 0 {
			return Err(SliceOpError::invalid_argument(format!(
				"input tensor has size 0 along axis {axis}"
			)));
		}
	}

	ensure_rank_1(start, "start")?;
	ensure_rank_1(end, "end")?;

	let num_axes = start.elems();
	ensure_same_len(end, "end", num_axes)?;

	if num_axes > src.ndim() {
		return Err(SliceOpError::invalid_argument(format!(
			"more slice entries ({num_axes}) than input tensor dimensions ({})",
			src.ndim()
		)));
	}

	if let Some(axes) = axes {
		ensure_rank_1(axes, "axes")?;
		ensure_same_len(axes, "axes", num_axes)?;
	}
	if let Some(steps) = steps {
		ensure_rank_1(steps, "steps")?;
		ensure_same_len(steps, "steps", num_axes)?;
	}

	Ok(())
}

/// Per-entry bound legality, checked against the extent of the axis each
/// entry actually targets. Entries whose defaulted axis fell off the end of
/// the shape select nothing and are skipped.
#[allow(clippy::indexing_slicing)]
pub(crate) fn check_bounds<T>(
	src: &Tensor<T>,
	start: &[i64],
	end: &[i64],
	resolved: &ResolvedAxes,
) -> Result<(), ErrPack<SliceOpError>> {
	for (i, &axis) in resolved.axes.iter().enumerate() {
		let step = resolved.steps[i];
		if step < 1 {
			return Err(SliceOpError::invalid_argument(format!(
				"steps value ({step}) at index {i} must be at least 1"
			)));
		}

		if axis >= src.ndim() {
			continue;
		}
		let extent = src.size(axis) as i64;
		let s = start[i];
		let e = end[i];

		if s < 0 || s >= extent {
			return Err(SliceOpError::invalid_argument(format!(
				"start value ({s}) at index {i} is beyond the size ({extent}) of the input tensor along axis {axis}"
			)));
		}
		if e > extent {
			return Err(SliceOpError::invalid_argument(format!(
				"end value ({e}) at index {i} is beyond the size ({extent}) of the input tensor along axis {axis}"
			)));
		}
		if e <= s {
			return Err(SliceOpError::invalid_argument(format!(
				"end value ({e}) at index {i} is not greater than the start value ({s}) along axis {axis}"
			)));
		}
	}
	Ok(())
}

//--------------------------------------------------------------------------------------------------
