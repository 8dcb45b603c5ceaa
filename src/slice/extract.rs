//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

//! Materialization of the planned slice.
//!
//! One odometer walk handles every rank: the per-axis counters advance over
//! the planned ranges while the source offset is maintained incrementally,
//! so there are no per-rank loop bodies and no rank ceiling.

use smallvec::SmallVec;

use crate::ErrPack;
use crate::tensor::{DimVec, INLINE_DIMS, SizeAndStride, StrideCounter, Tensor, TensorNewError};

use super::SliceOpError;
use super::plan::SlicePlan;

//--------------------------------------------------------------------------------------------------

/// Copies the selected elements into a freshly allocated contiguous tensor.
///
/// Iteration is row-major over the output: axis 0 is the outermost wheel of
/// the odometer. Each wheel `a` steps the source offset by
/// `step_a * stride_a` and rewinds it on wrap-around.
#[allow(clippy::indexing_slicing)]
pub(crate) fn extract<T: Copy>(
	src: &Tensor<T>,
	plan: &SlicePlan,
) -> Result<Tensor<T>, ErrPack<SliceOpError>> {
	let ndim = plan.specs.len();
	debug_assert!(ndim >= 1);
	let src_dims = src.dims();
	let src_data = src.as_slice();

	let mut out_dims = DimVec::from_elem(SizeAndStride::default(), ndim);
	let mut counter = StrideCounter::new();
	for (dim, &size) in out_dims.iter_mut().zip(plan.out_shape.iter()).rev() {
		// cannot overflow: the output never has more elements than the source
		*dim = counter.prepend_dim(size).map_err(TensorNewError::from)?;
	}
	let out_elems = counter.elems();
	let mut out_data = Vec::with_capacity(out_elems);

	let mut counters: SmallVec<[usize; INLINE_DIMS]> = SmallVec::from_elem(0, ndim);
	let mut offset: usize = plan
		.specs
		.iter()
		.zip(src_dims.iter())
		.map(|(spec, dim)| spec.start * dim.stride)
		.sum();

	'outer: loop {
		out_data.push(src_data[offset]);

		let mut a = ndim;
		loop {
			if a == 0 {
				break 'outer;
			}
			a -= 1;
			counters[a] += 1;
			if counters[a] < plan.out_shape[a] {
				offset += plan.specs[a].step * src_dims[a].stride;
				continue 'outer;
			}
			counters[a] = 0;
			offset -= (plan.out_shape[a] - 1) * plan.specs[a].step * src_dims[a].stride;
		}
	}

	debug_assert!(out_data.len() == out_elems);
	Ok(Tensor::from_parts(out_dims, out_elems, out_data))
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
	use super::*;
	use crate::slice::axes::normalize;
	use crate::slice::plan::plan;

	#[test]
	fn test_strided_1d() {
		let src = Tensor::from_vec(&[8], (0..8).collect::<Vec<i64>>()).unwrap();
		let resolved = normalize(1, 1, Some(&[0]), Some(&[3])).unwrap();
		let plan = plan(src.dims(), &[1], &[8], &resolved);
		let out = extract(&src, &plan).unwrap();
		assert_eq!(out.as_slice(), &[1, 4, 7]);
	}

	#[test]
	fn test_row_major_order() {
		let src = Tensor::from_vec(&[2, 2, 3], (0..12).collect::<Vec<i64>>()).unwrap();
		let resolved = normalize(3, 1, Some(&[2]), Some(&[2])).unwrap();
		let plan = plan(src.dims(), &[0], &[3], &resolved);
		let out = extract(&src, &plan).unwrap();
		assert_eq!(out.shape().to_vec(), vec![2, 2, 2]);
		assert_eq!(out.as_slice(), &[0, 2, 3, 5, 6, 8, 9, 11]);
	}
}
